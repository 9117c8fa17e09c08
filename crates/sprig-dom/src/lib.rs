//! sprig-dom - Attribute manipulation over a parsed markup tree
//!
//! The mutation layer of sprig: attribute, class, data-* and form-value
//! access on element nodes. Parsing, selector matching and serialization
//! live in sibling crates; this one only reads and mutates node state
//! through a [`Selection`] of arena node ids.

mod attributes;
mod class_list;
mod codec;
mod data;
mod node;
mod traverse;
mod tree;
mod value;

pub use attributes::{Attr, AttrMap, AttrSet, AttrValue, attr, attr_map, has_attr, remove_attr, set_attr, set_attr_map};
pub use class_list::{add_class, add_class_with, has_class, is, remove_class, remove_class_with, toggle_class, toggle_class_with};
pub use codec::{decode, encode};
pub use data::{CoerceError, DataMap, DataValue, data, data_map, remove_data, set_data, set_data_map};
pub use node::{ElementData, Node, NodeData};
pub use traverse::{NodePredicate, Selection, closest, filter, find, for_each, parents, wrap};
pub use tree::DomTree;
pub use value::{ValInput, Value, set_text, set_val, text, val};

/// Node identifier (index into arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Document root ID
    pub const ROOT: NodeId = NodeId(0);
    /// Sentinel for "no node"
    pub const NONE: NodeId = NodeId(u32::MAX);

    #[inline]
    pub fn is_valid(self) -> bool {
        self != Self::NONE
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}
