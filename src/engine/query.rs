//! Containment queries.

use crate::model::{Document, NodeId};
use crate::selection::Selection;
use crate::style::{Color, StyleKind};

/// The innermost span of `kind` enclosing the whole selection.
///
/// Starts from the lowest common ancestor of the two selection containers
/// (inclusive) and walks up. When `value` is given only spans carrying that
/// color match. Returns `None` for a missing or stale selection.
pub fn nearest_enclosing_span(
    doc: &Document,
    selection: Option<&Selection>,
    kind: StyleKind,
    value: Option<&Color>,
) -> Option<NodeId> {
    let selection = selection.filter(|s| doc.is_live(s))?;
    let container = doc.common_ancestor(selection.start.node, selection.end.node)?;
    nearest_span_from(doc, container, kind, value)
}

/// Whether the selection lies entirely within a span of `kind` (and
/// `value`, when given).
pub fn is_within(
    doc: &Document,
    selection: Option<&Selection>,
    kind: StyleKind,
    value: Option<&Color>,
) -> bool {
    nearest_enclosing_span(doc, selection, kind, value).is_some()
}

/// Walk up from `node` (inclusive) to the first matching span.
pub(crate) fn nearest_span_from(
    doc: &Document,
    node: NodeId,
    kind: StyleKind,
    value: Option<&Color>,
) -> Option<NodeId> {
    doc.ancestors(node).find(|&a| {
        doc.style_of(a)
            .is_some_and(|style| style.matches(kind, value))
    })
}
