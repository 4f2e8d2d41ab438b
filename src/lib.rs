//! Treeselect: selector queries over element trees
//!
//! Finds the elements of a tree matched by a small subset of CSS selector
//! syntax: type, `#id` and `.class` selectors, compounds of those, the
//! descendant combinator, and comma-separated groups.
//!
//! ```
//! use treeselect::{Document, query};
//!
//! let mut doc = Document::new();
//! let div = doc.append_element(Document::ROOT, "div").unwrap();
//! doc.add_class(div, "warn").unwrap();
//! let p = doc.append_element(div, "p").unwrap();
//!
//! let found = query("div.warn p", doc.root());
//! assert_eq!(found.len(), 1);
//! assert_eq!(found[0].node_id(), p);
//! ```

pub mod compiler; // Selector groups to narrowing steps
pub mod lexer; // Selector tokenizer
pub mod matcher; // Traversal strategies and result groups
pub mod parser; // Selector grammar
pub mod pattern; // Selector AST
pub mod searcher; // End-to-end search (parse + compile + narrow)
pub mod tree; // Element trait and owned document trees

// Python bindings
#[cfg(feature = "pyo3")]
pub mod python;

// Re-exports for convenience
pub use lexer::{Token, TokenKind, Tokens, tokenize};
pub use matcher::{Step, Strategy, narrow};
pub use parser::{parse_selector, parse_tokens};
pub use pattern::{Compound, Predicate, Selector, SelectorGroup};
pub use searcher::{query, search, search_query};
pub use tree::{Document, DocumentError, Element, ElementRef, NodeId};
