//! Shared predicates for normalization passes.

use crate::model::{Document, NodeId};

use super::Guard;

/// Whether a span has an ancestor span with an identical style.
pub fn has_identical_ancestor(doc: &Document, id: NodeId) -> bool {
    let Some(style) = doc.style_of(id) else {
        return false;
    };
    doc.ancestors(id)
        .skip(1)
        .take_while(|&a| doc.is_span(a))
        .any(|a| doc.style_of(a) == Some(style))
}

/// Whether two nodes are spans with identical styles.
pub fn same_style(doc: &Document, a: NodeId, b: NodeId) -> bool {
    match (doc.style_of(a), doc.style_of(b)) {
        (Some(x), Some(y)) => x == y,
        _ => false,
    }
}

pub fn is_zero_length_text(doc: &Document, id: NodeId) -> bool {
    doc.text_of(id).is_some_and(str::is_empty)
}

/// A span without any text underneath it.
pub fn is_empty_span(doc: &Document, id: NodeId) -> bool {
    doc.is_span(id) && !doc.has_text(id)
}

/// The next sibling that is not a zero-length text run. The guarded caret
/// counts as meaningful, so merges never reach across it.
pub fn next_meaningful_sibling(doc: &Document, id: NodeId, guard: &Guard) -> Option<NodeId> {
    let mut next = doc.next_sibling(id);
    while let Some(candidate) = next {
        if !is_zero_length_text(doc, candidate) || guard.is_caret(candidate) {
            return Some(candidate);
        }
        next = doc.next_sibling(candidate);
    }
    None
}
