//! Identity-free structural snapshots of a document subtree.
//!
//! Two trees whose views compare equal are structurally equal regardless of
//! which arena slots their nodes occupy.

use crate::style::Style;

use super::document::Document;
use super::node::{Align, Block, BlockKind, Node, NodeId, NodeKind};

/// Owned snapshot of a node and its descendants.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(serde::Serialize))]
#[cfg_attr(feature = "cli", serde(tag = "node", rename_all = "snake_case"))]
pub enum NodeView {
    Root {
        children: Vec<NodeView>,
    },
    Block {
        block: BlockKind,
        #[cfg_attr(feature = "cli", serde(skip_serializing_if = "Option::is_none"))]
        align: Option<Align>,
        children: Vec<NodeView>,
    },
    Span {
        style: Style,
        children: Vec<NodeView>,
    },
    Text {
        text: String,
    },
}

impl NodeView {
    pub fn text(text: &str) -> Self {
        NodeView::Text {
            text: text.to_string(),
        }
    }

    pub fn span(style: Style, children: Vec<NodeView>) -> Self {
        NodeView::Span { style, children }
    }

    pub fn block(block: BlockKind, children: Vec<NodeView>) -> Self {
        NodeView::Block {
            block,
            align: None,
            children,
        }
    }

    pub fn paragraph(children: Vec<NodeView>) -> Self {
        Self::block(BlockKind::Paragraph, children)
    }

    pub fn root(children: Vec<NodeView>) -> Self {
        NodeView::Root { children }
    }

    pub fn children(&self) -> &[NodeView] {
        match self {
            NodeView::Root { children }
            | NodeView::Block { children, .. }
            | NodeView::Span { children, .. } => children,
            NodeView::Text { .. } => &[],
        }
    }
}

impl Document {
    /// Snapshot the subtree rooted at `id`.
    pub fn view(&self, id: NodeId) -> Option<NodeView> {
        let node = self.node(id)?;
        let children = || {
            self.children(id)
                .filter_map(|child| self.view(child))
                .collect::<Vec<_>>()
        };
        Some(match &node.kind {
            NodeKind::Root => NodeView::Root {
                children: children(),
            },
            NodeKind::Block(block) => NodeView::Block {
                block: block.kind.clone(),
                align: block.align,
                children: children(),
            },
            NodeKind::Span(style) => NodeView::Span {
                style: style.clone(),
                children: children(),
            },
            NodeKind::Text(text) => NodeView::Text { text: text.clone() },
        })
    }

    /// Snapshot the whole document.
    pub fn root_view(&self) -> NodeView {
        self.view(NodeId::ROOT)
            .unwrap_or(NodeView::Root { children: vec![] })
    }

    /// Build a document whose root holds the given views.
    pub fn from_views(views: &[NodeView]) -> Self {
        let mut doc = Document::new();
        for view in views {
            doc.push_view(NodeId::ROOT, view);
        }
        doc
    }

    /// Append a copy of `view` under `parent`. A nested `Root` view splices
    /// its children in place.
    pub fn push_view(&mut self, parent: NodeId, view: &NodeView) -> NodeId {
        let id = match view {
            NodeView::Root { children } => {
                for child in children {
                    self.push_view(parent, child);
                }
                return parent;
            }
            NodeView::Block { block, align, .. } => self.alloc_node(Node::block(Block {
                kind: block.clone(),
                align: *align,
            })),
            NodeView::Span { style, .. } => self.alloc_node(Node::span(style.clone())),
            NodeView::Text { text } => self.alloc_node(Node::text(text.as_str())),
        };
        self.append_child(parent, id);
        for child in view.children() {
            self.push_view(id, child);
        }
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_round_trip() {
        let views = vec![NodeView::paragraph(vec![
            NodeView::span(Style::Bold, vec![NodeView::text("hello")]),
            NodeView::text(" world"),
        ])];
        let doc = Document::from_views(&views);
        assert_eq!(doc.root_view(), NodeView::root(views));
    }

    #[test]
    fn test_views_ignore_identity() {
        let mut a = Document::new();
        let para = a.push_block(NodeId::ROOT, BlockKind::Paragraph);
        a.push_text(para, "x");

        let mut b = Document::new();
        let unused = b.alloc_node(Node::text("detached"));
        let para = b.push_block(NodeId::ROOT, BlockKind::Paragraph);
        b.push_text(para, "x");

        assert!(!b.is_attached(unused));
        assert_eq!(a.root_view(), b.root_view());
    }
}
