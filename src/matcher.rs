//! Tree matching
//!
//! A narrowing step replaces a working set of elements with the elements
//! found by applying one predicate under one traversal strategy to each
//! member. Result groups hold one working set per comma-separated selector.

use log::trace;
use rustc_hash::FxHashSet;

use crate::pattern::Predicate;
use crate::tree::Element;

/// Where a step looks, relative to each element of the working set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// The element itself
    Current,
    /// Direct element children, not the element and not deeper
    Children,
    /// The element and all its element descendants, pre-order
    Descendants,
}

/// One narrowing step: a predicate and the traversal it runs under
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub predicate: Predicate,
    pub strategy: Strategy,
}

impl Step {
    pub fn new(predicate: Predicate, strategy: Strategy) -> Self {
        Self {
            predicate,
            strategy,
        }
    }
}

/// Apply one step to a working set
///
/// Members of `frontier` are visited in order. Matches are returned in the
/// order they are first found; an element reached from more than one member
/// is only returned once.
pub fn narrow<E: Element>(frontier: &[E], step: &Step) -> Vec<E> {
    let mut results = Vec::new();
    let mut visited: FxHashSet<E> = FxHashSet::default();

    let mut accept = |element: E| {
        if step.predicate.matches(&element) && visited.insert(element) {
            results.push(element);
        }
    };

    let mut stack: Vec<E> = Vec::new();
    for &element in frontier {
        match step.strategy {
            Strategy::Current => accept(element),
            Strategy::Children => element.element_children().for_each(&mut accept),
            Strategy::Descendants => {
                stack.push(element);
                while let Some(node) = stack.pop() {
                    accept(node);
                    let start = stack.len();
                    stack.extend(node.element_children());
                    stack[start..].reverse();
                }
            }
        }
    }

    trace!(
        "{:?} {}: {} -> {} element(s)",
        step.strategy,
        step.predicate,
        frontier.len(),
        results.len()
    );
    results
}

/// Working sets for a selector group, one per comma-separated selector
///
/// Starts with a single group seeded with the root. Steps always narrow the
/// most recently added group.
#[derive(Debug, Clone)]
pub struct ResultGroups<E> {
    root: E,
    groups: Vec<Vec<E>>,
}

impl<E: Element> ResultGroups<E> {
    pub fn new(root: E) -> Self {
        Self {
            root,
            groups: vec![vec![root]],
        }
    }

    /// Start a new group seeded with the root
    pub fn new_group(&mut self) {
        self.groups.push(vec![self.root]);
    }

    /// Narrow the last group by one step
    pub fn apply(&mut self, step: &Step) {
        if let Some(active) = self.groups.last_mut() {
            *active = narrow(active, step);
        }
    }

    pub fn groups(&self) -> &[Vec<E>] {
        &self.groups
    }

    /// Concatenate all groups in order
    ///
    /// An element matched by several selectors appears once per group.
    pub fn collect(self) -> Vec<E> {
        self.groups.into_iter().flatten().collect()
    }
}
