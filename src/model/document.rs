//! The document tree.
//!
//! Nodes live in an arena and are linked parent / first-child / last-child /
//! prev-sibling / next-sibling. Removing a node only unlinks it: the slot
//! stays allocated, so a stale `NodeId` never aliases a different node.
//! [`Document::compact`] reclaims those slots and renumbers the tree.

use crate::style::{Style, StyleCatalog};

use super::node::{Block, Node, NodeId, NodeKind};

/// A rich-text document being edited.
#[derive(Debug, Clone)]
pub struct Document {
    /// All nodes ever allocated (index 0 is always the root).
    nodes: Vec<Node>,
    /// Default values for the value-carrying style kinds.
    catalog: StyleCatalog,
    /// Caret node of the outstanding pending insertion point, if any.
    pending: Option<NodeId>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create an empty document with the default style catalog.
    pub fn new() -> Self {
        Self::with_catalog(StyleCatalog::default())
    }

    pub fn with_catalog(catalog: StyleCatalog) -> Self {
        Self {
            nodes: vec![Node::new(NodeKind::Root)],
            catalog,
            pending: None,
        }
    }

    pub fn catalog(&self) -> &StyleCatalog {
        &self.catalog
    }

    pub fn set_catalog(&mut self, catalog: StyleCatalog) {
        self.catalog = catalog;
    }

    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0 as usize)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0 as usize)
    }

    /// Number of allocated nodes, detached ones included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Allocate a new, unlinked node and return its ID.
    pub fn alloc_node(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    pub fn kind(&self, id: NodeId) -> Option<&NodeKind> {
        self.node(id).map(|n| &n.kind)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(|n| n.parent)
    }

    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(|n| n.first_child)
    }

    pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(|n| n.last_child)
    }

    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(|n| n.next_sibling)
    }

    pub fn prev_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(|n| n.prev_sibling)
    }

    pub fn style_of(&self, id: NodeId) -> Option<&Style> {
        self.node(id).and_then(Node::style)
    }

    pub fn text_of(&self, id: NodeId) -> Option<&str> {
        self.node(id).and_then(Node::as_text)
    }

    pub fn is_span(&self, id: NodeId) -> bool {
        self.node(id).is_some_and(Node::is_span)
    }

    pub fn is_text(&self, id: NodeId) -> bool {
        self.node(id).is_some_and(Node::is_text)
    }

    // ------------------------------------------------------------------------
    // Linking
    // ------------------------------------------------------------------------

    /// Append `child` as the last child of `parent`, detaching it first.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if parent == child || self.node(parent).is_none() {
            return;
        }
        self.detach(child);

        let last = self.last_child(parent);
        if let Some(child_node) = self.node_mut(child) {
            child_node.parent = Some(parent);
            child_node.prev_sibling = last;
            child_node.next_sibling = None;
        }
        match last {
            Some(last_id) => {
                if let Some(last_node) = self.node_mut(last_id) {
                    last_node.next_sibling = Some(child);
                }
            }
            None => {
                if let Some(parent_node) = self.node_mut(parent) {
                    parent_node.first_child = Some(child);
                }
            }
        }
        if let Some(parent_node) = self.node_mut(parent) {
            parent_node.last_child = Some(child);
        }
    }

    /// Insert `child` immediately before `reference`, detaching it first.
    ///
    /// Does nothing if `reference` has no parent.
    pub fn insert_before(&mut self, reference: NodeId, child: NodeId) {
        if reference == child || self.parent(reference).is_none() {
            return;
        }
        self.detach(child);

        let Some(parent) = self.parent(reference) else {
            return;
        };
        let prev = self.prev_sibling(reference);
        if let Some(child_node) = self.node_mut(child) {
            child_node.parent = Some(parent);
            child_node.prev_sibling = prev;
            child_node.next_sibling = Some(reference);
        }
        if let Some(reference_node) = self.node_mut(reference) {
            reference_node.prev_sibling = Some(child);
        }
        match prev {
            Some(prev_id) => {
                if let Some(prev_node) = self.node_mut(prev_id) {
                    prev_node.next_sibling = Some(child);
                }
            }
            None => {
                if let Some(parent_node) = self.node_mut(parent) {
                    parent_node.first_child = Some(child);
                }
            }
        }
    }

    /// Insert `child` immediately after `reference`, detaching it first.
    pub fn insert_after(&mut self, reference: NodeId, child: NodeId) {
        if reference == child {
            return;
        }
        match self.next_sibling(reference) {
            Some(next) => self.insert_before(next, child),
            None => {
                if let Some(parent) = self.parent(reference) {
                    self.append_child(parent, child);
                }
            }
        }
    }

    /// Insert `child` so that it becomes child number `index` of `parent`
    /// (appending when `index` is past the end).
    pub fn insert_child_at(&mut self, parent: NodeId, index: usize, child: NodeId) {
        self.detach(child);
        match self.child_at(parent, index) {
            Some(reference) => self.insert_before(reference, child),
            None => self.append_child(parent, child),
        }
    }

    /// Unlink a node (and its subtree) from its parent and siblings.
    pub fn detach(&mut self, id: NodeId) {
        let Some(node) = self.node(id) else {
            return;
        };
        let (parent, prev, next) = (node.parent, node.prev_sibling, node.next_sibling);

        match prev {
            Some(prev_id) => {
                if let Some(prev_node) = self.node_mut(prev_id) {
                    prev_node.next_sibling = next;
                }
            }
            None => {
                if let Some(parent_node) = parent.and_then(|p| self.node_mut(p)) {
                    parent_node.first_child = next;
                }
            }
        }
        match next {
            Some(next_id) => {
                if let Some(next_node) = self.node_mut(next_id) {
                    next_node.prev_sibling = prev;
                }
            }
            None => {
                if let Some(parent_node) = parent.and_then(|p| self.node_mut(p)) {
                    parent_node.last_child = prev;
                }
            }
        }

        if let Some(node) = self.node_mut(id) {
            node.parent = None;
            node.prev_sibling = None;
            node.next_sibling = None;
        }
    }

    /// Replace a node with its children, in order.
    pub fn unwrap_node(&mut self, id: NodeId) {
        if self.parent(id).is_none() {
            return;
        }
        let children: Vec<NodeId> = self.children(id).collect();
        for child in children {
            self.insert_before(id, child);
        }
        self.detach(id);
    }

    /// Move every child of `from` to the front of `to`, keeping their order.
    pub fn prepend_children(&mut self, from: NodeId, to: NodeId) {
        let children: Vec<NodeId> = self.children(from).collect();
        match self.first_child(to) {
            Some(first) => {
                for child in children {
                    self.insert_before(first, child);
                }
            }
            None => {
                for child in children {
                    self.append_child(to, child);
                }
            }
        }
    }

    // ------------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------------

    /// Iterate over children of a node.
    pub fn children(&self, parent: NodeId) -> ChildIter<'_> {
        ChildIter {
            doc: self,
            current: self.first_child(parent),
        }
    }

    /// Iterate from a node up to the root, starting with the node itself.
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            doc: self,
            current: self.node(id).map(|_| id),
        }
    }

    /// Iterate over a subtree in depth-first pre-order, starting with `id`.
    pub fn descendants(&self, id: NodeId) -> DfsIter<'_> {
        let stack = if self.node(id).is_some() {
            vec![id]
        } else {
            Vec::new()
        };
        DfsIter { doc: self, stack }
    }

    /// Whether the node is reachable from the root.
    pub fn is_attached(&self, id: NodeId) -> bool {
        self.ancestors(id).last() == Some(NodeId::ROOT)
    }

    /// Whether `ancestor` is `node` or one of its ancestors.
    pub fn is_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        self.ancestors(node).any(|a| a == ancestor)
    }

    pub fn child_index(&self, id: NodeId) -> Option<usize> {
        let parent = self.parent(id)?;
        self.children(parent).position(|c| c == id)
    }

    pub fn child_at(&self, parent: NodeId, index: usize) -> Option<NodeId> {
        self.children(parent).nth(index)
    }

    pub fn child_count(&self, parent: NodeId) -> usize {
        self.children(parent).count()
    }

    /// Lowest node that is an ancestor of (or equal to) both `a` and `b`.
    pub fn common_ancestor(&self, a: NodeId, b: NodeId) -> Option<NodeId> {
        let chain: Vec<NodeId> = self.ancestors(a).collect();
        self.ancestors(b).find(|n| chain.contains(n))
    }

    /// The block (or root) that contains `id`, including `id` itself.
    pub fn nearest_block(&self, id: NodeId) -> NodeId {
        self.ancestors(id)
            .find(|&n| {
                self.node(n)
                    .is_some_and(|node| matches!(node.kind, NodeKind::Block(_) | NodeKind::Root))
            })
            .unwrap_or(NodeId::ROOT)
    }

    /// Number of chars under a node.
    pub fn text_len(&self, id: NodeId) -> usize {
        self.descendants(id)
            .filter_map(|n| self.node(n))
            .map(Node::char_len)
            .sum()
    }

    /// Whether any text under the node is non-empty.
    pub fn has_text(&self, id: NodeId) -> bool {
        self.descendants(id)
            .filter_map(|n| self.text_of(n))
            .any(|t| !t.is_empty())
    }

    /// Concatenated text under a node.
    pub fn text_content(&self, id: NodeId) -> String {
        self.descendants(id)
            .filter_map(|n| self.text_of(n))
            .collect()
    }

    // ------------------------------------------------------------------------
    // Building
    // ------------------------------------------------------------------------

    pub fn push_block(&mut self, parent: NodeId, block: impl Into<Block>) -> NodeId {
        let id = self.alloc_node(Node::block(block));
        self.append_child(parent, id);
        id
    }

    pub fn push_span(&mut self, parent: NodeId, style: Style) -> NodeId {
        let id = self.alloc_node(Node::span(style));
        self.append_child(parent, id);
        id
    }

    pub fn push_text(&mut self, parent: NodeId, text: &str) -> NodeId {
        let id = self.alloc_node(Node::text(text));
        self.append_child(parent, id);
        id
    }

    // ------------------------------------------------------------------------
    // Pending insertion point
    // ------------------------------------------------------------------------

    /// Caret node of the outstanding pending insertion point.
    pub fn pending(&self) -> Option<NodeId> {
        self.pending
    }

    pub(crate) fn set_pending(&mut self, caret: Option<NodeId>) {
        self.pending = caret;
    }

    /// Clear and return the pending insertion point. A second call returns
    /// `None`, which is what makes legitimize/abandon fire at most once.
    pub(crate) fn take_pending(&mut self) -> Option<NodeId> {
        self.pending.take()
    }

    /// Drop detached nodes from the arena.
    ///
    /// Attached nodes are renumbered in document order, so every `NodeId`
    /// held outside the document goes stale; translate them with the
    /// returned [`NodeRemap`].
    pub fn compact(&mut self) -> NodeRemap {
        let order: Vec<NodeId> = self.descendants(NodeId::ROOT).collect();
        let mut slots = vec![None; self.nodes.len()];
        for (index, &old) in order.iter().enumerate() {
            slots[old.0 as usize] = Some(NodeId(index as u32));
        }
        let remap = NodeRemap { slots };

        let nodes = order
            .iter()
            .filter_map(|&old| self.node(old))
            .map(|node| Node {
                parent: remap.link(node.parent),
                first_child: remap.link(node.first_child),
                last_child: remap.link(node.last_child),
                prev_sibling: remap.link(node.prev_sibling),
                next_sibling: remap.link(node.next_sibling),
                ..node.clone()
            })
            .collect();
        self.nodes = nodes;
        self.pending = remap.link(self.pending);
        remap
    }
}

/// Old-to-new `NodeId` mapping produced by [`Document::compact`].
#[derive(Debug, Clone, Default)]
pub struct NodeRemap {
    slots: Vec<Option<NodeId>>,
}

impl NodeRemap {
    /// New id of `old`, or `None` if it was detached and dropped.
    pub fn get(&self, old: NodeId) -> Option<NodeId> {
        self.slots.get(old.0 as usize).copied().flatten()
    }

    /// Number of nodes dropped.
    pub fn dropped(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_none()).count()
    }

    fn link(&self, old: Option<NodeId>) -> Option<NodeId> {
        old.and_then(|id| self.get(id))
    }
}

/// Iterator over children of a node.
pub struct ChildIter<'a> {
    doc: &'a Document,
    current: Option<NodeId>,
}

impl Iterator for ChildIter<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.current?;
        self.current = self.doc.next_sibling(current);
        Some(current)
    }
}

/// Iterator from a node up to the root.
pub struct Ancestors<'a> {
    doc: &'a Document,
    current: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.current?;
        self.current = self.doc.parent(current);
        Some(current)
    }
}

/// Depth-first pre-order iterator over a subtree.
pub struct DfsIter<'a> {
    doc: &'a Document,
    stack: Vec<NodeId>,
}

impl Iterator for DfsIter<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.stack.pop()?;

        // Push children in reverse order so they're visited left-to-right
        let mut child = self.doc.last_child(current);
        while let Some(id) = child {
            self.stack.push(id);
            child = self.doc.prev_sibling(id);
        }

        Some(current)
    }
}
