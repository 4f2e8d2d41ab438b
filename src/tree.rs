//! Element trees for selector matching
//!
//! The search engine only sees trees through the [`Element`] trait. This
//! module also provides [`Document`], an owned arena tree with interned
//! tag, id and class names, whose handles ([`ElementRef`]) implement it.

use lasso::{Rodeo, Spur};
use std::fmt;
use std::hash::{Hash, Hasher};
use thiserror::Error;

/// Unique identifier for a node within a [`Document`]
pub type NodeId = usize;

/// Read-only view of an element as seen by the selector engine
///
/// Implementors are cheap handles. Equality must be element identity: two
/// handles are equal exactly when they refer to the same element, since the
/// engine uses them as keys when suppressing duplicates.
pub trait Element: Copy + Eq + Hash {
    /// The element's `id`, if it has one
    fn identifier(&self) -> Option<&str>;

    /// The element's tag name, if it has one (a document node does not)
    fn tag_name(&self) -> Option<&str>;

    /// The element's class names
    fn class_names(&self) -> impl Iterator<Item = &str>;

    /// Element children in document order; text and comment nodes are skipped
    fn element_children(&self) -> impl Iterator<Item = Self>;

    fn has_class(&self, name: &str) -> bool {
        self.class_names().any(|class| class == name)
    }
}

/// Error for structurally invalid document edits
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DocumentError {
    #[error("Document error: Unknown node: {0}")]
    UnknownNode(NodeId),

    #[error("Document error: Node {0} is not an element")]
    NotAnElement(NodeId),

    #[error("Document error: Node {0} cannot have children")]
    NotAContainer(NodeId),
}

/// Attributes of an element node
#[derive(Debug, Clone)]
pub struct ElementData {
    pub tag: Spur,
    pub id: Option<Spur>,
    pub classes: Vec<Spur>,
}

#[derive(Debug, Clone)]
pub enum NodeKind {
    /// The document node; has element children but no tag, id or classes
    Root,
    Element(ElementData),
    Text(String),
    Comment(String),
}

/// A node in a document tree
#[derive(Debug, Clone)]
pub struct Node {
    pub id: NodeId,
    pub kind: NodeKind,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
}

impl Node {
    fn new(id: NodeId, kind: NodeKind, parent: Option<NodeId>) -> Self {
        Self {
            id,
            kind,
            parent,
            children: Vec::new(),
        }
    }

    fn is_container(&self) -> bool {
        matches!(self.kind, NodeKind::Root | NodeKind::Element(_))
    }
}

/// An owned document tree
///
/// Node 0 is always the document node. Nodes are only ever appended, so a
/// [`NodeId`] stays valid for the lifetime of the document.
#[derive(Debug)]
pub struct Document {
    nodes: Vec<Node>,
    names: Rodeo,
}

impl Document {
    pub const ROOT: NodeId = 0;

    /// Create a document containing only the document node
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new(Self::ROOT, NodeKind::Root, None)],
            names: Rodeo::default(),
        }
    }

    /// Handle for the document node
    pub fn root(&self) -> ElementRef<'_> {
        ElementRef {
            doc: self,
            node: &self.nodes[Self::ROOT],
        }
    }

    /// Handle for the document node or an element; `None` for text, comments
    /// and unknown ids
    pub fn get(&self, id: NodeId) -> Option<ElementRef<'_>> {
        let node = self.nodes.get(id)?;
        node.is_container().then_some(ElementRef { doc: self, node })
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id).and_then(|node| node.parent)
    }

    /// Text content of a text or comment node
    pub fn text(&self, id: NodeId) -> Option<&str> {
        match &self.nodes.get(id)?.kind {
            NodeKind::Text(text) | NodeKind::Comment(text) => Some(text),
            _ => None,
        }
    }

    /// Append a new element with the given tag as the last child of `parent`
    pub fn append_element(&mut self, parent: NodeId, tag: &str) -> Result<NodeId, DocumentError> {
        let tag = self.names.get_or_intern(tag);
        self.append(
            parent,
            NodeKind::Element(ElementData {
                tag,
                id: None,
                classes: Vec::new(),
            }),
        )
    }

    pub fn append_text(&mut self, parent: NodeId, text: &str) -> Result<NodeId, DocumentError> {
        self.append(parent, NodeKind::Text(text.to_string()))
    }

    pub fn append_comment(&mut self, parent: NodeId, text: &str) -> Result<NodeId, DocumentError> {
        self.append(parent, NodeKind::Comment(text.to_string()))
    }

    fn append(&mut self, parent: NodeId, kind: NodeKind) -> Result<NodeId, DocumentError> {
        let id = self.nodes.len();
        let parent_node = self
            .nodes
            .get_mut(parent)
            .ok_or(DocumentError::UnknownNode(parent))?;
        if !parent_node.is_container() {
            return Err(DocumentError::NotAContainer(parent));
        }
        parent_node.children.push(id);
        self.nodes.push(Node::new(id, kind, Some(parent)));
        Ok(id)
    }

    /// Set (or replace) an element's `id`
    pub fn set_id(&mut self, node: NodeId, value: &str) -> Result<(), DocumentError> {
        let value = self.names.get_or_intern(value);
        self.element_data_mut(node)?.id = Some(value);
        Ok(())
    }

    /// Add a class to an element; adding a class it already has is a no-op
    pub fn add_class(&mut self, node: NodeId, class: &str) -> Result<(), DocumentError> {
        let class = self.names.get_or_intern(class);
        let data = self.element_data_mut(node)?;
        if !data.classes.contains(&class) {
            data.classes.push(class);
        }
        Ok(())
    }

    /// Replace an element's classes with those in a whitespace-separated
    /// `class` attribute value
    pub fn set_class_attr(&mut self, node: NodeId, attr: &str) -> Result<(), DocumentError> {
        self.element_data_mut(node)?.classes.clear();
        for class in attr.split_ascii_whitespace() {
            self.add_class(node, class)?;
        }
        Ok(())
    }

    fn element_data_mut(&mut self, node: NodeId) -> Result<&mut ElementData, DocumentError> {
        match self.nodes.get_mut(node) {
            Some(Node {
                kind: NodeKind::Element(data),
                ..
            }) => Ok(data),
            Some(_) => Err(DocumentError::NotAnElement(node)),
            None => Err(DocumentError::UnknownNode(node)),
        }
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

/// Borrowed handle to the document node or an element of a [`Document`]
#[derive(Clone, Copy)]
pub struct ElementRef<'a> {
    doc: &'a Document,
    node: &'a Node,
}

impl<'a> ElementRef<'a> {
    pub fn node_id(&self) -> NodeId {
        self.node.id
    }

    pub fn document(&self) -> &'a Document {
        self.doc
    }

    fn data(&self) -> Option<&'a ElementData> {
        match &self.node.kind {
            NodeKind::Element(data) => Some(data),
            _ => None,
        }
    }
}

impl Element for ElementRef<'_> {
    fn identifier(&self) -> Option<&str> {
        let id = self.data()?.id.as_ref()?;
        Some(self.doc.names.resolve(id))
    }

    fn tag_name(&self) -> Option<&str> {
        let data = self.data()?;
        Some(self.doc.names.resolve(&data.tag))
    }

    fn class_names(&self) -> impl Iterator<Item = &str> {
        let names = &self.doc.names;
        let classes: &[Spur] = match self.data() {
            Some(data) => &data.classes,
            None => &[],
        };
        classes.iter().map(move |class| names.resolve(class))
    }

    fn element_children(&self) -> impl Iterator<Item = Self> {
        let doc = self.doc;
        self.node.children.iter().filter_map(move |&id| {
            let node = &doc.nodes[id];
            matches!(node.kind, NodeKind::Element(_)).then_some(ElementRef { doc, node })
        })
    }
}

// Identity: same document, same node
impl PartialEq for ElementRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.node.id == other.node.id && std::ptr::eq(self.doc, other.doc)
    }
}

impl Eq for ElementRef<'_> {}

impl Hash for ElementRef<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.node.id.hash(state);
    }
}

impl fmt::Debug for ElementRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("ElementRef");
        s.field("id", &self.node.id);
        if let Some(tag) = self.tag_name() {
            s.field("tag", &tag);
        }
        s.finish()
    }
}
