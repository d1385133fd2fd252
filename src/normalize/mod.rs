//! Tree normalization.
//!
//! After every engine call the touched blocks satisfy four invariants:
//!
//! 1. No span sits under an identical span (redundant nesting)
//! 2. No two adjacent sibling spans are identical (maximal merging)
//! 3. No span is without text (no empty spans)
//! 4. No two adjacent text siblings (maximal coalescing)
//!
//! ## Pipeline Order
//!
//! 1. **Unwrap** - Replace redundantly nested spans with their children
//! 2. **Prune** - Remove empty spans and zero-length text runs (cascading)
//! 3. **Merge** - Fold identical neighbours into one span
//! 4. **Coalesce** - Join adjacent text runs
//!
//! Each pass can expose work for another (a merge can bring two identical
//! spans or two texts together), so [`normalize`] repeats the pipeline
//! until nothing changes.
//!
//! The only exception to the invariants is the pending insertion point: its
//! zero-length caret node and the spans holding it are left alone until the
//! caret is typed into or abandoned.

mod coalesce;
mod merge;
mod pass;
mod predicates;
mod prune;
mod unwrap;

pub use coalesce::coalesce_text;
pub use merge::merge_if_adjacent_identical;
pub use pass::walk_bottom_up;
pub use prune::drop_if_empty;
pub use unwrap::unwrap_if_redundant;

use crate::model::{Document, NodeId};

/// Nodes the normalizer must not remove, merge, or coalesce.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Guard {
    caret: Option<NodeId>,
}

impl Guard {
    pub fn none() -> Self {
        Self::default()
    }

    /// Protect a zero-length caret node and every span holding it.
    pub fn caret(caret: NodeId) -> Self {
        Self { caret: Some(caret) }
    }

    pub fn is_caret(&self, id: NodeId) -> bool {
        self.caret == Some(id)
    }

    /// Whether `node` is the caret or one of its ancestors.
    pub fn protects(&self, doc: &Document, node: NodeId) -> bool {
        self.caret.is_some_and(|caret| doc.is_ancestor(node, caret))
    }
}

/// Run all passes over the subtree at `scope` until it is stable.
pub fn normalize(doc: &mut Document, scope: NodeId, guard: &Guard) {
    let mut rounds = 0;
    loop {
        rounds += 1;
        let mut changed = unwrap::unwrap_redundant(doc, scope);
        changed |= prune::prune_empty(doc, scope, guard);
        changed |= merge::merge_adjacent(doc, scope, guard);
        changed |= coalesce::coalesce_guarded(doc, scope, guard);
        if !changed {
            break;
        }
    }
    log::trace!("normalized {} in {} round(s)", scope, rounds);
}

/// Normalize the whole document, sparing the pending caret if there is one.
pub fn normalize_document(doc: &mut Document) {
    let guard = doc.pending().map(Guard::caret).unwrap_or_default();
    normalize(doc, NodeId::ROOT, &guard);
}

/// A breach of one of the tree invariants.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "cli", derive(serde::Serialize))]
#[cfg_attr(feature = "cli", serde(tag = "violation", rename_all = "snake_case"))]
pub enum Violation {
    #[error("span {span} is nested inside an identical span")]
    RedundantNesting { span: NodeId },

    #[error("spans {first} and {second} are adjacent and identical")]
    AdjacentDuplicate { first: NodeId, second: NodeId },

    #[error("span {span} has no text")]
    EmptySpan { span: NodeId },

    #[error("text nodes {first} and {second} are adjacent")]
    AdjacentText { first: NodeId, second: NodeId },
}

/// Report every invariant breach under `scope`.
///
/// The document's pending caret, and the spans holding it, are exempt.
pub fn check_invariants(doc: &Document, scope: NodeId) -> Vec<Violation> {
    let guard = doc.pending().map(Guard::caret).unwrap_or_default();
    let mut violations = Vec::new();

    for id in doc.descendants(scope) {
        if doc.is_span(id) {
            if predicates::has_identical_ancestor(doc, id) {
                violations.push(Violation::RedundantNesting { span: id });
            }
            if predicates::is_empty_span(doc, id) && !guard.protects(doc, id) {
                violations.push(Violation::EmptySpan { span: id });
            }
        }

        let Some(next) = doc.next_sibling(id) else {
            continue;
        };
        if guard.protects(doc, id) || guard.protects(doc, next) {
            continue;
        }
        if predicates::same_style(doc, id, next) {
            violations.push(Violation::AdjacentDuplicate {
                first: id,
                second: next,
            });
        }
        if doc.is_text(id) && doc.is_text(next) {
            violations.push(Violation::AdjacentText {
                first: id,
                second: next,
            });
        }
    }

    violations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BlockKind, NodeView};
    use crate::style::Style;

    #[test]
    fn test_full_pipeline() {
        // P[B["ab"], B[B["c"], ""], "", I[], "d", "e"]
        let mut doc = Document::new();
        let para = doc.push_block(NodeId::ROOT, BlockKind::Paragraph);
        let b1 = doc.push_span(para, Style::Bold);
        doc.push_text(b1, "ab");
        let b2 = doc.push_span(para, Style::Bold);
        let b3 = doc.push_span(b2, Style::Bold);
        doc.push_text(b3, "c");
        doc.push_text(b2, "");
        doc.push_text(para, "");
        doc.push_span(para, Style::Italic);
        doc.push_text(para, "d");
        doc.push_text(para, "e");

        assert!(!check_invariants(&doc, NodeId::ROOT).is_empty());
        normalize(&mut doc, NodeId::ROOT, &Guard::none());

        assert_eq!(
            doc.view(para),
            Some(NodeView::paragraph(vec![
                NodeView::span(Style::Bold, vec![NodeView::text("abc")]),
                NodeView::text("de"),
            ]))
        );
        assert!(check_invariants(&doc, NodeId::ROOT).is_empty());
    }

    #[test]
    fn test_check_reports_each_kind() {
        let mut doc = Document::new();
        let para = doc.push_block(NodeId::ROOT, BlockKind::Paragraph);
        let outer = doc.push_span(para, Style::Bold);
        let inner = doc.push_span(outer, Style::Bold);
        doc.push_text(inner, "x");
        let twin = doc.push_span(para, Style::Bold);
        doc.push_text(twin, "y");
        let empty = doc.push_span(para, Style::Italic);
        let t1 = doc.push_text(para, "a");
        let t2 = doc.push_text(para, "b");

        let violations = check_invariants(&doc, NodeId::ROOT);
        assert!(violations.contains(&Violation::RedundantNesting { span: inner }));
        assert!(violations.contains(&Violation::AdjacentDuplicate {
            first: outer,
            second: twin
        }));
        assert!(violations.contains(&Violation::EmptySpan { span: empty }));
        assert!(violations.contains(&Violation::AdjacentText {
            first: t1,
            second: t2
        }));
    }

    #[test]
    fn test_pending_caret_is_exempt() {
        let mut doc = Document::new();
        let para = doc.push_block(NodeId::ROOT, BlockKind::Paragraph);
        doc.push_text(para, "ab");
        let italic = doc.push_span(para, Style::Italic);
        let caret = doc.push_text(italic, "");
        doc.set_pending(Some(caret));

        assert!(check_invariants(&doc, NodeId::ROOT).is_empty());
        normalize_document(&mut doc);
        assert!(doc.is_attached(caret));

        doc.set_pending(None);
        assert_eq!(
            check_invariants(&doc, NodeId::ROOT),
            vec![Violation::EmptySpan { span: italic }]
        );
    }
}
