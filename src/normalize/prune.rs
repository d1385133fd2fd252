//! Empty span and empty text removal.

use crate::model::{Document, NodeId};

use super::Guard;
use super::pass::walk_bottom_up;
use super::predicates::{is_empty_span, is_zero_length_text};

/// Delete `node` if it is a span with no text content.
pub fn drop_if_empty(doc: &mut Document, node: NodeId) -> bool {
    drop_if_empty_guarded(doc, node, &Guard::none())
}

pub(super) fn drop_if_empty_guarded(doc: &mut Document, node: NodeId, guard: &Guard) -> bool {
    if !is_empty_span(doc, node) || guard.protects(doc, node) {
        return false;
    }
    doc.detach(node);
    true
}

/// Remove empty spans and zero-length text runs in post-order, so a span
/// that only held empty spans vanishes in the same walk.
pub(super) fn prune_empty(doc: &mut Document, scope: NodeId, guard: &Guard) -> bool {
    let mut changed = false;
    walk_bottom_up(doc, scope, |doc, parent_id| {
        let mut cursor_opt = doc.first_child(parent_id);
        while let Some(current_id) = cursor_opt {
            let next_opt = doc.next_sibling(current_id);
            if is_zero_length_text(doc, current_id) && !guard.is_caret(current_id) {
                doc.detach(current_id);
                changed = true;
            } else {
                changed |= drop_if_empty_guarded(doc, current_id, guard);
            }
            cursor_opt = next_opt;
        }
    });
    changed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BlockKind, NodeView};
    use crate::style::Style;

    #[test]
    fn test_drops_only_empty_spans() {
        let mut doc = Document::new();
        let para = doc.push_block(NodeId::ROOT, BlockKind::Paragraph);
        let empty = doc.push_span(para, Style::Bold);
        let full = doc.push_span(para, Style::Italic);
        let text = doc.push_text(full, "x");

        assert!(!drop_if_empty(&mut doc, full));
        assert!(!drop_if_empty(&mut doc, text));
        assert!(drop_if_empty(&mut doc, empty));
        assert!(!doc.is_attached(empty));
    }

    #[test]
    fn test_prune_cascades() {
        let mut doc = Document::new();
        let para = doc.push_block(NodeId::ROOT, BlockKind::Paragraph);
        let outer = doc.push_span(para, Style::Bold);
        let inner = doc.push_span(outer, Style::Italic);
        doc.push_text(inner, "");
        doc.push_text(para, "kept");

        assert!(prune_empty(&mut doc, NodeId::ROOT, &Guard::none()));
        assert_eq!(
            doc.view(para),
            Some(NodeView::paragraph(vec![NodeView::text("kept")]))
        );
    }

    #[test]
    fn test_prune_spares_guarded_caret() {
        let mut doc = Document::new();
        let para = doc.push_block(NodeId::ROOT, BlockKind::Paragraph);
        let italic = doc.push_span(para, Style::Italic);
        let caret = doc.push_text(italic, "");

        assert!(!prune_empty(&mut doc, NodeId::ROOT, &Guard::caret(caret)));
        assert!(doc.is_attached(caret));
        assert!(doc.is_attached(italic));
    }

    #[test]
    fn test_empty_blocks_survive() {
        let mut doc = Document::new();
        let para = doc.push_block(NodeId::ROOT, BlockKind::Paragraph);
        assert!(!prune_empty(&mut doc, NodeId::ROOT, &Guard::none()));
        assert!(doc.is_attached(para));
    }
}
