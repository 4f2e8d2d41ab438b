//! Selector compilation to narrowing steps
//!
//! Each selector of a group becomes a list of [`Step`]s run against its own
//! result group. The first predicate of a compound searches the subtree of
//! every element in the working set; the rest filter the set in place.

use crate::matcher::{Step, Strategy};
use crate::pattern::{Selector, SelectorGroup};

/// Compiled selector group: one step list per result group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    pub groups: Vec<Vec<Step>>,
}

impl Program {
    pub fn step_count(&self) -> usize {
        self.groups.iter().map(Vec::len).sum()
    }
}

/// Compile a selector group
pub fn compile(group: &SelectorGroup) -> Program {
    Program {
        groups: group.selectors.iter().map(compile_selector).collect(),
    }
}

fn compile_selector(selector: &Selector) -> Vec<Step> {
    let mut steps = Vec::new();
    for compound in &selector.compounds {
        for (i, predicate) in compound.predicates.iter().enumerate() {
            let strategy = if i == 0 {
                Strategy::Descendants
            } else {
                Strategy::Current
            };
            steps.push(Step::new(predicate.clone(), strategy));
        }
    }
    steps
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_selector;
    use crate::pattern::Predicate;

    #[test]
    fn test_compile_compound() {
        let program = compile(&parse_selector("div.warn#x"));

        assert_eq!(program.groups.len(), 1);
        assert_eq!(
            program.groups[0],
            vec![
                Step::new(Predicate::Tag("div".to_string()), Strategy::Descendants),
                Step::new(Predicate::Class("warn".to_string()), Strategy::Current),
                Step::new(Predicate::Id("x".to_string()), Strategy::Current),
            ]
        );
    }

    #[test]
    fn test_compile_descendant_chain() {
        let program = compile(&parse_selector("ul.nav li a"));

        let strategies: Vec<_> = program.groups[0].iter().map(|s| s.strategy).collect();
        assert_eq!(
            strategies,
            vec![
                Strategy::Descendants,
                Strategy::Current,
                Strategy::Descendants,
                Strategy::Descendants,
            ]
        );
    }

    #[test]
    fn test_compile_group() {
        let program = compile(&parse_selector("a, .b.c,"));

        assert_eq!(program.groups.len(), 3);
        assert_eq!(program.groups[0].len(), 1);
        assert_eq!(program.groups[1].len(), 2);
        assert!(program.groups[2].is_empty());
        assert_eq!(program.step_count(), 3);
    }

    #[test]
    fn test_compile_empty() {
        let program = compile(&parse_selector(""));

        assert_eq!(program.groups, vec![Vec::new()]);
    }
}
