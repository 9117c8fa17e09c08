//! Selections and structural traversal
//!
//! A [`Selection`] is an ordered, non-owning view over arena node ids:
//! getters read its first node, setters visit every node in order.
//! Queries here are structural (predicates over the tree), not selector
//! strings; selector matching belongs to a sibling crate.

use crate::{DomTree, NodeId};

/// Structural node predicate used by [`filter`], [`find`] and [`closest`]
pub type NodePredicate<'a> = dyn Fn(&DomTree, NodeId) -> bool + 'a;

/// Ordered view over a set of nodes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ids: Vec<NodeId>,
}

impl Selection {
    /// Empty selection
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_ids(ids: Vec<NodeId>) -> Self {
        Self { ids }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// First node, the one getters read
    pub fn first(&self) -> Option<NodeId> {
        self.ids.first().copied()
    }

    pub fn last(&self) -> Option<NodeId> {
        self.ids.last().copied()
    }

    /// Node ids in selection order
    pub fn iter(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.ids.iter().copied()
    }

    pub fn ids(&self) -> &[NodeId] {
        &self.ids
    }

    fn push_unique(&mut self, id: NodeId) {
        if !self.ids.contains(&id) {
            self.ids.push(id);
        }
    }
}

impl FromIterator<NodeId> for Selection {
    fn from_iter<I: IntoIterator<Item = NodeId>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}

/// Single-node selection factory; re-roots queries at an arbitrary node
pub fn wrap(id: NodeId) -> Selection {
    Selection::from_ids(vec![id])
}

/// Nodes of `sel` satisfying `pred`, in selection order
pub fn filter(tree: &DomTree, sel: &Selection, pred: &NodePredicate) -> Selection {
    sel.iter().filter(|&id| pred(tree, id)).collect()
}

/// Descendants of every selected node satisfying `pred`, document order
/// per node, duplicates dropped
pub fn find(tree: &DomTree, sel: &Selection, pred: &NodePredicate) -> Selection {
    let mut out = Selection::new();
    for id in sel.iter() {
        for desc in tree.descendants(id) {
            if pred(tree, desc) {
                out.push_unique(desc);
            }
        }
    }
    out
}

/// Nearest ancestor-or-self of each selected node satisfying `pred`
pub fn closest(tree: &DomTree, sel: &Selection, pred: &NodePredicate) -> Selection {
    let mut out = Selection::new();
    for id in sel.iter() {
        let found = std::iter::once(id)
            .chain(tree.ancestors(id))
            .find(|&cur| pred(tree, cur));
        if let Some(hit) = found {
            out.push_unique(hit);
        }
    }
    out
}

/// Element ancestors of every selected node, innermost first and
/// outermost last, duplicates dropped
pub fn parents(tree: &DomTree, sel: &Selection) -> Selection {
    let mut out = Selection::new();
    for id in sel.iter() {
        for anc in tree.ancestors(id) {
            if tree.get(anc).is_some_and(|n| n.is_element()) {
                out.push_unique(anc);
            }
        }
    }
    out
}

/// Visit every selected node in order with its selection index
pub fn for_each(sel: &Selection, mut f: impl FnMut(usize, NodeId)) {
    for (i, id) in sel.iter().enumerate() {
        f(i, id);
    }
}
