//! End-to-end selector search
//!
//! The search pipeline:
//! 1. Tokenize and parse selector text into a SelectorGroup
//! 2. Compile the group into one step list per selector
//! 3. Seed one result group with the root per selector
//! 4. Run each step list against its group
//! 5. Concatenate the groups

use log::debug;

use crate::compiler::compile;
use crate::matcher::ResultGroups;
use crate::parser::parse_selector;
use crate::pattern::SelectorGroup;
use crate::tree::Element;

/// Search the tree under `root` with a parsed selector group
///
/// Matches are returned group by group in selector order. An empty selector
/// narrows nothing, so it contributes `root` itself.
pub fn search<E: Element>(root: E, group: &SelectorGroup) -> Vec<E> {
    let program = compile(group);
    let mut results = ResultGroups::new(root);

    for (i, steps) in program.groups.iter().enumerate() {
        if i > 0 {
            results.new_group();
        }
        for step in steps {
            results.apply(step);
        }
    }

    let matches = results.collect();
    debug!(
        "selector {:?}: {} step(s), {} match(es)",
        group.to_string(),
        program.step_count(),
        matches.len()
    );
    matches
}

/// Search the tree under `root` with selector text
pub fn search_query<E: Element>(root: E, selector: &str) -> Vec<E> {
    search(root, &parse_selector(selector))
}

/// Elements matched by `selector` in the tree under `root`
///
/// Malformed trailing text is ignored and a selector that matches nothing
/// gives an empty result; this never fails.
pub fn query<E: Element>(selector: &str, root: E) -> Vec<E> {
    search_query(root, selector)
}
