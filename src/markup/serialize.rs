//! Tree to markup.
//!
//! Serialization runs in two phases. Finalization validates each node and
//! builds a whitelisted [`Fragment`] copy of it; writing then renders the
//! fragments. A tree that fails validation produces no output at all.

use std::fmt::Write;

use crate::error::SerializeError;
use crate::model::{BlockKind, Document, NodeId, NodeKind};

use super::escape::escape;
use super::tags::{attributes_for, tag_for};

/// A validated, export-ready copy of a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment {
    Text(String),
    Element {
        tag: &'static str,
        attrs: Vec<(&'static str, String)>,
        /// Leaf media are written self-closing and never hold children.
        leaf: bool,
        children: Vec<Fragment>,
    },
}

/// Serialize every child of the root.
pub fn serialize(doc: &Document) -> Result<String, SerializeError> {
    let fragments = doc
        .children(NodeId::ROOT)
        .map(|child| finalize(doc, child))
        .collect::<Result<Vec<_>, _>>()?;

    let mut out = String::new();
    for fragment in &fragments {
        write_fragment(&mut out, fragment);
    }
    Ok(out)
}

/// Validate one node and copy it with only whitelisted attributes.
pub fn finalize(doc: &Document, id: NodeId) -> Result<Fragment, SerializeError> {
    let node = doc
        .node(id)
        .ok_or(SerializeError::NotTextOrElement { node: id })?;

    let (leaf, name) = match &node.kind {
        NodeKind::Text(text) => return Ok(Fragment::Text(text.clone())),
        NodeKind::Root => return Err(SerializeError::NotTextOrElement { node: id }),
        NodeKind::Block(block) => (block.kind.is_leaf(), block_name(&block.kind)),
        NodeKind::Span(style) => (false, style.kind().name().to_string()),
    };

    if !node.exportable {
        return Err(SerializeError::MissingExportMarker { node: id });
    }
    let tag = tag_for(&node.kind).ok_or(SerializeError::UnrecognizedType { node: id, name })?;

    let children = if leaf {
        Vec::new()
    } else {
        doc.children(id)
            .map(|child| finalize(doc, child))
            .collect::<Result<Vec<_>, _>>()?
    };

    Ok(Fragment::Element {
        tag,
        attrs: attributes_for(&node.kind),
        leaf,
        children,
    })
}

fn block_name(kind: &BlockKind) -> String {
    match kind {
        BlockKind::Other { name } => name.clone(),
        other => format!("{:?}", other),
    }
}

fn write_fragment(out: &mut String, fragment: &Fragment) {
    match fragment {
        Fragment::Text(text) => out.push_str(&escape(text)),
        Fragment::Element {
            tag,
            attrs,
            leaf,
            children,
        } => {
            out.push('<');
            out.push_str(tag);
            for (name, value) in attrs {
                let _ = write!(out, " {}=\"{}\"", name, escape(value));
            }
            if *leaf {
                out.push_str("/>");
                return;
            }
            out.push('>');
            for child in children {
                write_fragment(out, child);
            }
            out.push_str("</");
            out.push_str(tag);
            out.push('>');
        }
    }
}
