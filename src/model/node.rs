//! Document node types.

use std::fmt;

use crate::style::Style;

/// Unique identifier for a node within a [`Document`](super::Document).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "cli", derive(serde::Serialize))]
pub struct NodeId(pub u32);

impl NodeId {
    /// The root node ID (always 0).
    pub const ROOT: NodeId = NodeId(0);
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Horizontal alignment of a block, stored as an `align-*` class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cli", derive(serde::Serialize))]
#[cfg_attr(feature = "cli", serde(rename_all = "snake_case"))]
pub enum Align {
    Left,
    Center,
    Right,
    Justify,
}

impl Align {
    pub fn class_name(self) -> &'static str {
        match self {
            Align::Left => "align-left",
            Align::Center => "align-center",
            Align::Right => "align-right",
            Align::Justify => "align-justify",
        }
    }

    /// Find the alignment named in a space-separated class list.
    pub fn from_class_list(classes: &str) -> Option<Self> {
        classes.split_ascii_whitespace().find_map(|class| match class {
            "align-left" => Some(Align::Left),
            "align-center" => Some(Align::Center),
            "align-right" => Some(Align::Right),
            "align-justify" => Some(Align::Justify),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cli", derive(serde::Serialize))]
#[cfg_attr(feature = "cli", serde(rename_all = "snake_case"))]
pub enum ListKind {
    Ordered,
    Unordered,
}

/// Structural role of a block.
///
/// The engine treats blocks opaquely: it only needs their children and,
/// when saving, a recognized type tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cli", derive(serde::Serialize))]
#[cfg_attr(feature = "cli", serde(tag = "type", rename_all = "snake_case"))]
pub enum BlockKind {
    Paragraph,
    /// Headings with level 1-6.
    Heading { level: u8 },
    List { kind: ListKind },
    ListItem,
    Quote,
    /// Leaf media: an image placeholder.
    Image { src: String },
    /// Leaf media: an embedded resource placeholder.
    Embed { href: String },
    /// Host-defined block with no storable tag (e.g. a calendar widget).
    Other { name: String },
}

impl BlockKind {
    /// Leaf media never hold content.
    pub fn is_leaf(&self) -> bool {
        matches!(self, BlockKind::Image { .. } | BlockKind::Embed { .. })
    }
}

/// A structural container.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Block {
    pub kind: BlockKind,
    pub align: Option<Align>,
}

impl Block {
    pub fn new(kind: BlockKind) -> Self {
        Self { kind, align: None }
    }

    pub fn with_align(mut self, align: Align) -> Self {
        self.align = Some(align);
        self
    }
}

impl From<BlockKind> for Block {
    fn from(kind: BlockKind) -> Self {
        Self::new(kind)
    }
}

/// What a node is. A closed set: no string-tag dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// Root document node.
    Root,
    Block(Block),
    /// Inline node applying one style to its content.
    Span(Style),
    /// Leaf text content.
    Text(String),
}

/// A node in the document tree.
#[derive(Debug, Clone)]
pub struct Node {
    pub kind: NodeKind,
    /// Parent node (None for root and detached nodes).
    pub parent: Option<NodeId>,
    pub first_child: Option<NodeId>,
    pub last_child: Option<NodeId>,
    pub prev_sibling: Option<NodeId>,
    pub next_sibling: Option<NodeId>,
    /// Whether the serializer may persist this node. Hosts clear it on
    /// transient UI elements.
    pub exportable: bool,
}

impl Node {
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            parent: None,
            first_child: None,
            last_child: None,
            prev_sibling: None,
            next_sibling: None,
            exportable: true,
        }
    }

    pub fn text(content: impl Into<String>) -> Self {
        Self::new(NodeKind::Text(content.into()))
    }

    pub fn span(style: Style) -> Self {
        Self::new(NodeKind::Span(style))
    }

    pub fn block(block: impl Into<Block>) -> Self {
        Self::new(NodeKind::Block(block.into()))
    }

    /// An unlinked copy carrying the same kind and export marker.
    pub fn shallow_clone(&self) -> Self {
        Self {
            exportable: self.exportable,
            ..Self::new(self.kind.clone())
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn style(&self) -> Option<&Style> {
        match &self.kind {
            NodeKind::Span(style) => Some(style),
            _ => None,
        }
    }

    pub fn as_block(&self) -> Option<&Block> {
        match &self.kind {
            NodeKind::Block(block) => Some(block),
            _ => None,
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self.kind, NodeKind::Text(_))
    }

    pub fn is_span(&self) -> bool {
        matches!(self.kind, NodeKind::Span(_))
    }

    pub fn is_block(&self) -> bool {
        matches!(self.kind, NodeKind::Block(_))
    }

    /// Length in chars of a text node (0 for everything else).
    pub fn char_len(&self) -> usize {
        self.as_text().map_or(0, |t| t.chars().count())
    }
}
