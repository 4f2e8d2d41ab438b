//! Python bindings for treeselect
//!
//! This module provides PyO3-based Python bindings for the Rust core.
//! Elements are exposed to Python as integer node ids.

use pyo3::exceptions::{PyIndexError, PyValueError};
use pyo3::prelude::*;

use crate::lexer::tokenize;
use crate::parser::parse_selector;
use crate::searcher::search;
use crate::tree::{Document as RustDocument, DocumentError, Element, NodeId};

/// Convert DocumentError to Python exception
impl From<DocumentError> for PyErr {
    fn from(err: DocumentError) -> PyErr {
        match err {
            DocumentError::UnknownNode(_) => PyIndexError::new_err(err.to_string()),
            DocumentError::NotAnElement(_) | DocumentError::NotAContainer(_) => {
                PyValueError::new_err(err.to_string())
            }
        }
    }
}

#[pyclass(name = "Document", unsendable)]
pub struct PyDocument {
    inner: RustDocument,
}

#[pymethods]
impl PyDocument {
    #[new]
    fn new() -> Self {
        PyDocument {
            inner: RustDocument::new(),
        }
    }

    /// Node id of the document node.
    #[getter]
    fn root(&self) -> NodeId {
        RustDocument::ROOT
    }

    /// Append an element to `parent`.
    ///
    /// Args:
    ///     parent: Node id of the parent (document node or element)
    ///     tag: Tag name
    ///     id: Optional element id
    ///     classes: Optional whitespace-separated class list
    ///
    /// Returns:
    ///     Node id of the new element
    #[pyo3(signature = (parent, tag, id=None, classes=None))]
    fn append_element(
        &mut self,
        parent: NodeId,
        tag: &str,
        id: Option<&str>,
        classes: Option<&str>,
    ) -> PyResult<NodeId> {
        let node = self.inner.append_element(parent, tag)?;
        if let Some(id) = id {
            self.inner.set_id(node, id)?;
        }
        if let Some(classes) = classes {
            self.inner.set_class_attr(node, classes)?;
        }
        Ok(node)
    }

    fn append_text(&mut self, parent: NodeId, text: &str) -> PyResult<NodeId> {
        Ok(self.inner.append_text(parent, text)?)
    }

    fn append_comment(&mut self, parent: NodeId, text: &str) -> PyResult<NodeId> {
        Ok(self.inner.append_comment(parent, text)?)
    }

    fn set_id(&mut self, node: NodeId, id: &str) -> PyResult<()> {
        Ok(self.inner.set_id(node, id)?)
    }

    fn add_class(&mut self, node: NodeId, class: &str) -> PyResult<()> {
        Ok(self.inner.add_class(node, class)?)
    }

    fn tag_name(&self, node: NodeId) -> Option<String> {
        self.inner
            .get(node)
            .and_then(|e| e.tag_name().map(str::to_string))
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.inner.parent(node)
    }

    /// Find elements matching a selector.
    ///
    /// Args:
    ///     selector: Selector text, e.g. "div.warn p, #main"
    ///     node: Node id to search under (default: the document node)
    ///
    /// Returns:
    ///     List of node ids, grouped by comma-separated selector
    ///
    /// Raises:
    ///     IndexError: If `node` is not the document node or an element
    #[pyo3(signature = (selector, node=None))]
    fn query(&self, selector: &str, node: Option<NodeId>) -> PyResult<Vec<NodeId>> {
        let node = node.unwrap_or(RustDocument::ROOT);
        let root = self
            .inner
            .get(node)
            .ok_or_else(|| PyIndexError::new_err(format!("not an element: {}", node)))?;
        let group = parse_selector(selector);
        Ok(search(root, &group).iter().map(|e| e.node_id()).collect())
    }

    fn __len__(&self) -> usize {
        self.inner.node_count()
    }

    fn __repr__(&self) -> String {
        format!("<Document nodes={}>", self.inner.node_count())
    }
}

/// Split selector text into tokens.
///
/// Returns:
///     ([(kind, value), ...], remainder) where remainder is the input left
///     after the first unrecognized character
#[pyfunction(name = "tokenize")]
fn py_tokenize(selector: &str) -> (Vec<(String, String)>, String) {
    let scanned = tokenize(selector);
    let tokens = scanned
        .tokens
        .into_iter()
        .map(|t| (t.kind.to_string(), t.value))
        .collect();
    (tokens, scanned.remainder.to_string())
}

/// Parse selector text and return it in canonical form.
#[pyfunction(name = "normalize_selector")]
fn py_normalize_selector(selector: &str) -> String {
    parse_selector(selector).to_string()
}

#[pyfunction]
fn __version__() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[pymodule]
fn treeselect(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyDocument>()?;

    m.add_function(wrap_pyfunction!(py_tokenize, m)?)?;
    m.add_function(wrap_pyfunction!(py_normalize_selector, m)?)?;
    m.add_function(wrap_pyfunction!(__version__, m)?)?;

    Ok(())
}
