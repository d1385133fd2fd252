//! Tree surgery: splitting text and spans, wrapping and unwrapping runs.
//!
//! All helpers keep node identity for content: text is split into new
//! nodes but never copied, and span fragments are fresh shallow clones that
//! carry the original style.

use crate::model::{Document, Node, NodeId, NodeKind};
use crate::selection::Position;
use crate::style::{Style, StyleKind};

/// Split a text node at a char index. Returns the new right-hand node, or
/// `None` when the index is at either end (nothing to split).
pub fn split_text(doc: &mut Document, id: NodeId, at: usize) -> Option<NodeId> {
    let node = doc.node(id)?;
    let text = node.as_text()?;
    let (byte_idx, _) = text.char_indices().nth(at)?;
    if byte_idx == 0 {
        return None;
    }

    let right_text = text[byte_idx..].to_string();
    let mut right = node.shallow_clone();
    right.kind = NodeKind::Text(right_text);

    if let Some(NodeKind::Text(text)) = doc.node_mut(id).map(|n| &mut n.kind) {
        text.truncate(byte_idx);
    }
    let right_id = doc.alloc_node(right);
    doc.insert_after(id, right_id);
    Some(right_id)
}

/// Split whichever text leaf strictly contains the document char offset.
pub fn split_at_offset(doc: &mut Document, offset: usize) {
    let mut start = 0;
    let mut target = None;
    for id in doc.descendants(NodeId::ROOT) {
        let len = doc.node(id).map_or(0, Node::char_len);
        if start < offset && offset < start + len {
            target = Some((id, offset - start));
            break;
        }
        start += len;
    }
    if let Some((id, at)) = target {
        split_text(doc, id, at);
    }
}

/// Non-empty text leaves lying entirely within document chars `[a, b)`,
/// in document order.
pub fn text_leaves_between(doc: &Document, a: usize, b: usize) -> Vec<NodeId> {
    let mut start = 0;
    let mut leaves = Vec::new();
    for id in doc.descendants(NodeId::ROOT) {
        let len = doc.node(id).map_or(0, Node::char_len);
        if len > 0 && start >= a && start + len <= b {
            leaves.push(id);
        }
        start += len;
    }
    leaves
}

/// Partition leaves into consecutive runs sharing a nearest block.
pub fn group_by_block(doc: &Document, leaves: &[NodeId]) -> Vec<(NodeId, Vec<NodeId>)> {
    let mut groups: Vec<(NodeId, Vec<NodeId>)> = Vec::new();
    for &leaf in leaves {
        let block = doc.nearest_block(leaf);
        match groups.last_mut() {
            Some((current, members)) if *current == block => members.push(leaf),
            _ => groups.push((block, vec![leaf])),
        }
    }
    groups
}

/// Lowest common ancestor of a non-empty set of nodes.
pub fn common_ancestor_of(doc: &Document, nodes: &[NodeId]) -> Option<NodeId> {
    let (&first, rest) = nodes.split_first()?;
    rest.iter()
        .try_fold(first, |acc, &n| doc.common_ancestor(acc, n))
}

/// Make `node` the leading content of its ancestor chain below `top`.
///
/// Every ancestor between `node` and `top` that has content before the
/// chain is split: that content moves into a shallow clone inserted just
/// before it. Returns the child of `top` that now starts with `node`.
pub fn split_before(doc: &mut Document, node: NodeId, top: NodeId) -> NodeId {
    let mut current = node;
    while let Some(parent) = doc.parent(current) {
        if parent == top {
            break;
        }
        if doc.prev_sibling(current).is_some()
            && let Some(clone) = doc.node(parent).map(Node::shallow_clone)
        {
            let clone_id = doc.alloc_node(clone);
            doc.insert_before(parent, clone_id);
            while let Some(first) = doc.first_child(parent) {
                if first == current {
                    break;
                }
                doc.append_child(clone_id, first);
            }
        }
        current = parent;
    }
    current
}

/// Mirror of [`split_before`]: content after the chain moves into clones
/// inserted just after each ancestor.
pub fn split_after(doc: &mut Document, node: NodeId, top: NodeId) -> NodeId {
    let mut current = node;
    while let Some(parent) = doc.parent(current) {
        if parent == top {
            break;
        }
        if doc.next_sibling(current).is_some()
            && let Some(clone) = doc.node(parent).map(Node::shallow_clone)
        {
            let clone_id = doc.alloc_node(clone);
            doc.insert_after(parent, clone_id);
            while let Some(next) = doc.next_sibling(current) {
                doc.append_child(clone_id, next);
            }
        }
        current = parent;
    }
    current
}

/// Split ancestors so that the content from `first` through `last` forms a
/// run of whole children of `top`. Returns the first and last child of
/// that run.
pub fn isolate(doc: &mut Document, first: NodeId, last: NodeId, top: NodeId) -> (NodeId, NodeId) {
    let x = split_before(doc, first, top);
    let y = split_after(doc, last, top);
    (x, y)
}

/// Siblings from `x` through `y`, inclusive.
pub fn sibling_run(doc: &Document, x: NodeId, y: NodeId) -> Vec<NodeId> {
    let mut run = Vec::new();
    let mut cursor = Some(x);
    while let Some(id) = cursor {
        run.push(id);
        if id == y {
            break;
        }
        cursor = doc.next_sibling(id);
    }
    run
}

/// Wrap the sibling run `x..=y` in new spans of `style`. Blocks inside the
/// run are left outside, splitting the wrap. Returns the created spans.
pub fn wrap_run(doc: &mut Document, x: NodeId, y: NodeId, style: &Style) -> Vec<NodeId> {
    let mut created = Vec::new();
    let mut segment: Vec<NodeId> = Vec::new();
    for id in sibling_run(doc, x, y) {
        if doc.node(id).is_some_and(Node::is_block) {
            created.extend(wrap_segment(doc, &segment, style));
            segment.clear();
        } else {
            segment.push(id);
        }
    }
    created.extend(wrap_segment(doc, &segment, style));
    created
}

fn wrap_segment(doc: &mut Document, segment: &[NodeId], style: &Style) -> Option<NodeId> {
    let &first = segment.first()?;
    let span = doc.alloc_node(Node::span(style.clone()));
    doc.insert_before(first, span);
    for &id in segment {
        doc.append_child(span, id);
    }
    Some(span)
}

/// Unwrap every span of `kind` below `span`, keeping `span` itself.
pub fn resolve_self_ancestors(doc: &mut Document, span: NodeId) {
    let Some(kind) = doc.style_of(span).map(Style::kind) else {
        return;
    };
    let nested: Vec<NodeId> = doc
        .descendants(span)
        .skip(1)
        .filter(|&n| doc.style_of(n).is_some_and(|s| s.kind() == kind))
        .collect();
    for id in nested {
        doc.unwrap_node(id);
    }
}

/// Unwrap every span of `kind` in the subtree at `node`, `node` included.
pub fn strip_kind(doc: &mut Document, node: NodeId, kind: StyleKind) {
    let spans: Vec<NodeId> = doc
        .descendants(node)
        .filter(|&n| doc.style_of(n).is_some_and(|s| s.kind() == kind))
        .collect();
    for id in spans {
        doc.unwrap_node(id);
    }
}

/// Insert a zero-length text node at `pos`, splitting text if needed.
pub fn materialize_caret(doc: &mut Document, pos: Position) -> Option<NodeId> {
    let kind = &doc.node(pos.node)?.kind;
    let text_len = match kind {
        NodeKind::Text(text) => Some(text.chars().count()),
        _ => None,
    };
    let is_leaf = matches!(kind, NodeKind::Block(block) if block.kind.is_leaf());
    let caret = doc.alloc_node(Node::text(""));

    match text_len {
        Some(_) if pos.offset == 0 => doc.insert_before(pos.node, caret),
        Some(len) if pos.offset >= len => doc.insert_after(pos.node, caret),
        Some(_) => {
            split_text(doc, pos.node, pos.offset);
            doc.insert_after(pos.node, caret);
        }
        None if is_leaf => doc.insert_after(pos.node, caret),
        None => doc.insert_child_at(pos.node, pos.offset, caret),
    }

    doc.is_attached(caret).then_some(caret)
}
