//! Arena tree
//!
//! Flat `Vec<Node>` arena with sibling links. Node 0 is always the
//! document root. The tree owns every node; selections only borrow ids.

use crate::{Node, NodeId};

/// Arena-based markup tree
#[derive(Debug)]
pub struct DomTree {
    nodes: Vec<Node>,
}

impl DomTree {
    /// Create a tree holding only the document root
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::document()],
        }
    }

    /// Document root id
    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by ID
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        if !id.is_valid() {
            return None;
        }
        self.nodes.get(id.index())
    }

    /// Get a mutable node by ID
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        if !id.is_valid() {
            return None;
        }
        self.nodes.get_mut(id.index())
    }

    /// Element data of `id`, if it is an element
    pub fn element(&self, id: NodeId) -> Option<&crate::ElementData> {
        self.get(id).and_then(Node::as_element)
    }

    /// Mutable element data of `id`, if it is an element
    pub fn element_mut(&mut self, id: NodeId) -> Option<&mut crate::ElementData> {
        self.get_mut(id).and_then(Node::as_element_mut)
    }

    /// Number of nodes ever allocated (detached nodes included)
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Allocate a new element node
    pub fn create_element(&mut self, name: impl Into<String>) -> NodeId {
        self.alloc(Node::element(name))
    }

    /// Allocate a new text node
    pub fn create_text(&mut self, content: impl Into<String>) -> NodeId {
        self.alloc(Node::text(content))
    }

    /// Allocate a new comment node
    pub fn create_comment(&mut self, content: impl Into<String>) -> NodeId {
        self.alloc(Node::comment(content))
    }

    fn alloc(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Append `child` as the last child of `parent`
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if parent == child || self.get(parent).is_none() || self.get(child).is_none() {
            return;
        }
        self.detach(child);

        let prev = self.nodes[parent.index()].last_child;
        {
            let c = &mut self.nodes[child.index()];
            c.parent = parent;
            c.prev_sibling = prev;
            c.next_sibling = NodeId::NONE;
        }
        if prev.is_valid() {
            self.nodes[prev.index()].next_sibling = child;
        } else {
            self.nodes[parent.index()].first_child = child;
        }
        self.nodes[parent.index()].last_child = child;
    }

    /// Unlink `id` from its parent and siblings; the node stays allocated
    pub fn detach(&mut self, id: NodeId) {
        let Some(node) = self.get(id) else { return };
        let (parent, prev, next) = (node.parent, node.prev_sibling, node.next_sibling);
        if !parent.is_valid() {
            return;
        }

        if prev.is_valid() {
            self.nodes[prev.index()].next_sibling = next;
        } else {
            self.nodes[parent.index()].first_child = next;
        }
        if next.is_valid() {
            self.nodes[next.index()].prev_sibling = prev;
        } else {
            self.nodes[parent.index()].last_child = prev;
        }

        let n = &mut self.nodes[id.index()];
        n.parent = NodeId::NONE;
        n.prev_sibling = NodeId::NONE;
        n.next_sibling = NodeId::NONE;
    }

    /// Direct children of `id`, in document order
    pub fn children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let first = self.get(id).map_or(NodeId::NONE, |n| n.first_child);
        std::iter::successors(
            if first.is_valid() { Some(first) } else { None },
            move |&cur| {
                let next = self.nodes[cur.index()].next_sibling;
                if next.is_valid() { Some(next) } else { None }
            },
        )
    }

    /// Ancestors of `id`, innermost first, document root last
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let parent = self.get(id).map_or(NodeId::NONE, |n| n.parent);
        std::iter::successors(
            if parent.is_valid() { Some(parent) } else { None },
            move |&cur| {
                let up = self.nodes[cur.index()].parent;
                if up.is_valid() { Some(up) } else { None }
            },
        )
    }

    /// All descendants of `id` in document (pre-order) order, `id` excluded
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).collect();
        stack.reverse();
        while let Some(cur) = stack.pop() {
            out.push(cur);
            let mut kids: Vec<NodeId> = self.children(cur).collect();
            kids.reverse();
            stack.extend(kids);
        }
        out
    }

    /// Concatenated text of `id` and its descendants
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        if let Some(t) = self.get(id).and_then(Node::as_text) {
            out.push_str(t);
        }
        for desc in self.descendants(id) {
            if let Some(t) = self.get(desc).and_then(Node::as_text) {
                out.push_str(t);
            }
        }
        out
    }

    /// Replace all children of `id` with a single text node
    pub fn set_text_content(&mut self, id: NodeId, content: &str) {
        if self.get(id).is_none() {
            return;
        }
        tracing::trace!("replacing text content of node {:?}", id);
        let children: Vec<NodeId> = self.children(id).collect();
        for child in children {
            self.detach(child);
        }
        let text = self.create_text(content);
        self.append_child(id, text);
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (DomTree, NodeId, NodeId, NodeId) {
        let mut tree = DomTree::new();
        let div = tree.create_element("div");
        let p = tree.create_element("p");
        let text = tree.create_text("hello");
        tree.append_child(tree.root(), div);
        tree.append_child(div, p);
        tree.append_child(p, text);
        (tree, div, p, text)
    }

    #[test]
    fn test_append_and_children() {
        let (tree, div, p, _) = sample();
        let kids: Vec<_> = tree.children(tree.root()).collect();
        assert_eq!(kids, vec![div]);
        assert_eq!(tree.children(div).collect::<Vec<_>>(), vec![p]);
    }

    #[test]
    fn test_ancestors_order() {
        let (tree, div, p, text) = sample();
        let ups: Vec<_> = tree.ancestors(text).collect();
        assert_eq!(ups, vec![p, div, tree.root()]);
    }

    #[test]
    fn test_descendants_document_order() {
        let (mut tree, div, p, text) = sample();
        let span = tree.create_element("span");
        tree.append_child(div, span);
        assert_eq!(tree.descendants(tree.root()), vec![div, p, text, span]);
    }

    #[test]
    fn test_text_content_round_trip() {
        let (mut tree, div, _, _) = sample();
        assert_eq!(tree.text_content(div), "hello");
        tree.set_text_content(div, "goodbye");
        assert_eq!(tree.text_content(div), "goodbye");
        assert_eq!(tree.children(div).count(), 1);
    }

    #[test]
    fn test_detach_relinks_siblings() {
        let mut tree = DomTree::new();
        let a = tree.create_element("a");
        let b = tree.create_element("b");
        let c = tree.create_element("c");
        for id in [a, b, c] {
            tree.append_child(tree.root(), id);
        }
        tree.detach(b);
        assert_eq!(tree.children(tree.root()).collect::<Vec<_>>(), vec![a, c]);
    }
}
