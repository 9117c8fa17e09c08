//! Tree node representation
//!
//! Nodes live in the [`DomTree`](crate::DomTree) arena and link to their
//! neighbours by [`NodeId`] instead of pointers.

use crate::NodeId;
use crate::attributes::AttrMap;
use crate::data::DataMap;

/// A single node in the tree
#[derive(Debug)]
pub struct Node {
    /// Parent node (NONE if detached or root)
    pub parent: NodeId,
    /// First child
    pub first_child: NodeId,
    /// Last child (for O(1) append)
    pub last_child: NodeId,
    /// Previous sibling
    pub prev_sibling: NodeId,
    /// Next sibling
    pub next_sibling: NodeId,
    /// Node-specific data
    pub data: NodeData,
}

impl Node {
    pub fn element(name: impl Into<String>) -> Self {
        Self::with_data(NodeData::Element(ElementData::new(name)))
    }

    pub fn text(content: impl Into<String>) -> Self {
        Self::with_data(NodeData::Text(content.into()))
    }

    pub fn comment(content: impl Into<String>) -> Self {
        Self::with_data(NodeData::Comment(content.into()))
    }

    pub fn document() -> Self {
        Self::with_data(NodeData::Document)
    }

    fn with_data(data: NodeData) -> Self {
        Self {
            parent: NodeId::NONE,
            first_child: NodeId::NONE,
            last_child: NodeId::NONE,
            prev_sibling: NodeId::NONE,
            next_sibling: NodeId::NONE,
            data,
        }
    }

    /// Check if this is an element
    #[inline]
    pub fn is_element(&self) -> bool {
        matches!(self.data, NodeData::Element(_))
    }

    /// Get element data if this is an element
    #[inline]
    pub fn as_element(&self) -> Option<&ElementData> {
        match &self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Get mutable element data
    #[inline]
    pub fn as_element_mut(&mut self) -> Option<&mut ElementData> {
        match &mut self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Get text content if this is a text node
    #[inline]
    pub fn as_text(&self) -> Option<&str> {
        match &self.data {
            NodeData::Text(t) => Some(t),
            _ => None,
        }
    }
}

/// Node-specific data
#[derive(Debug)]
pub enum NodeData {
    /// Document root
    Document,
    /// Element (tag)
    Element(ElementData),
    /// Text content
    Text(String),
    /// Comment
    Comment(String),
}

/// Element-specific data
///
/// Both maps are constructed empty when the element is created; there is
/// no lazy initialization on first access.
#[derive(Debug)]
pub struct ElementData {
    /// Tag name, case preserved as given
    pub name: String,
    /// Attribute map, insertion ordered
    pub attrs: AttrMap,
    /// Auxiliary data-* map, insertion ordered
    pub data: DataMap,
}

impl ElementData {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attrs: AttrMap::new(),
            data: DataMap::new(),
        }
    }

    /// Tag-name comparison, ASCII case-insensitive as markup requires
    #[inline]
    pub fn is_named(&self, tag: &str) -> bool {
        self.name.eq_ignore_ascii_case(tag)
    }
}
