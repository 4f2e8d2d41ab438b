//! Selector AST
//!
//! A parsed selector group, independent of any tree. Selectors are kept as
//! a list of compounds joined by the descendant combinator, the only
//! combinator the language has.

use crate::tree::Element;
use std::fmt;

/// A single condition tested against one element
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Predicate {
    /// Tag name, compared ASCII case-insensitively
    Tag(String),
    /// Exact `id`
    Id(String),
    /// Exact class membership
    Class(String),
}

impl Predicate {
    /// Test an element; an element without the attribute never matches
    pub fn matches<E: Element>(&self, element: &E) -> bool {
        match self {
            Predicate::Tag(tag) => element
                .tag_name()
                .is_some_and(|name| name.eq_ignore_ascii_case(tag)),
            Predicate::Id(id) => element.identifier() == Some(id.as_str()),
            Predicate::Class(class) => element.has_class(class),
        }
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Predicate::Tag(tag) => write!(f, "{}", tag),
            Predicate::Id(id) => write!(f, "#{}", id),
            Predicate::Class(class) => write!(f, ".{}", class),
        }
    }
}

/// Predicates matched against a single element without re-traversal,
/// e.g. `div.warn#x`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Compound {
    pub predicates: Vec<Predicate>,
}

impl Compound {
    pub fn new(predicates: Vec<Predicate>) -> Self {
        Self { predicates }
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    pub fn matches<E: Element>(&self, element: &E) -> bool {
        self.predicates.iter().all(|p| p.matches(element))
    }
}

impl fmt::Display for Compound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.predicates.iter().try_for_each(|p| write!(f, "{}", p))
    }
}

/// Compounds joined by descendant combinators, e.g. `ul li.item`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selector {
    pub compounds: Vec<Compound>,
}

impl Selector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a compound; empty compounds narrow nothing and are dropped
    pub fn push(&mut self, compound: Compound) {
        if !compound.is_empty() {
            self.compounds.push(compound);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.compounds.is_empty()
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, compound) in self.compounds.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", compound)?;
        }
        Ok(())
    }
}

/// Comma-separated alternatives; each gets its own result group
///
/// A group always has at least one selector, possibly empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorGroup {
    pub selectors: Vec<Selector>,
}

impl SelectorGroup {
    pub fn new(selectors: Vec<Selector>) -> Self {
        if selectors.is_empty() {
            return Self::default();
        }
        Self { selectors }
    }
}

impl Default for SelectorGroup {
    fn default() -> Self {
        Self {
            selectors: vec![Selector::new()],
        }
    }
}

impl fmt::Display for SelectorGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, selector) in self.selectors.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", selector)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::Document;

    #[test]
    fn test_predicate_matching() {
        let mut doc = Document::new();
        let div = doc.append_element(Document::ROOT, "Div").unwrap();
        doc.set_id(div, "Main").unwrap();
        doc.add_class(div, "warn").unwrap();
        let div = doc.get(div).unwrap();

        assert!(Predicate::Tag("div".to_string()).matches(&div));
        assert!(Predicate::Tag("DIV".to_string()).matches(&div));
        assert!(!Predicate::Tag("span".to_string()).matches(&div));

        assert!(Predicate::Id("Main".to_string()).matches(&div));
        assert!(!Predicate::Id("main".to_string()).matches(&div));

        assert!(Predicate::Class("warn".to_string()).matches(&div));
        assert!(!Predicate::Class("Warn".to_string()).matches(&div));
    }

    #[test]
    fn test_missing_attributes_never_match() {
        let mut doc = Document::new();
        let p = doc.append_element(Document::ROOT, "p").unwrap();
        let p = doc.get(p).unwrap();
        let root = doc.root();

        assert!(!Predicate::Id("x".to_string()).matches(&p));
        assert!(!Predicate::Class("x".to_string()).matches(&p));
        assert!(!Predicate::Tag("p".to_string()).matches(&root));
    }

    #[test]
    fn test_compound_matches_all() {
        let mut doc = Document::new();
        let div = doc.append_element(Document::ROOT, "div").unwrap();
        doc.add_class(div, "warn").unwrap();
        let div = doc.get(div).unwrap();

        let compound = Compound::new(vec![
            Predicate::Tag("div".to_string()),
            Predicate::Class("warn".to_string()),
        ]);
        assert!(compound.matches(&div));

        let compound = Compound::new(vec![
            Predicate::Tag("div".to_string()),
            Predicate::Id("x".to_string()),
        ]);
        assert!(!compound.matches(&div));
    }

    #[test]
    fn test_display() {
        let mut first = Selector::new();
        first.push(Compound::new(vec![
            Predicate::Tag("div".to_string()),
            Predicate::Class("warn".to_string()),
            Predicate::Id("x".to_string()),
        ]));
        first.push(Compound::default());
        first.push(Compound::new(vec![Predicate::Tag("p".to_string())]));

        let mut second = Selector::new();
        second.push(Compound::new(vec![Predicate::Class("a".to_string())]));

        let group = SelectorGroup::new(vec![first, second]);
        assert_eq!(group.to_string(), "div.warn#x p, .a");
    }

    #[test]
    fn test_empty_group_has_one_selector() {
        let group = SelectorGroup::new(Vec::new());
        assert_eq!(group.selectors.len(), 1);
        assert!(group.selectors[0].is_empty());
        assert_eq!(group.to_string(), "");
    }
}
