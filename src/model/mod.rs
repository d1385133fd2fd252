//! Core data model for the editor tree.
//!
//! This module contains:
//! - Node identifiers and the closed set of node kinds
//! - Block roles and alignment
//! - The arena-backed [`Document`] with its link operations
//! - [`NodeView`] structural snapshots

mod document;
mod node;
mod view;

pub use document::{Ancestors, ChildIter, DfsIter, Document, NodeRemap};
pub use node::{Align, Block, BlockKind, ListKind, Node, NodeId, NodeKind};
pub use view::NodeView;
