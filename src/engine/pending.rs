//! Pending insertion point lifecycle.
//!
//! Toggling a style at a collapsed caret leaves a zero-length caret node in
//! the styled context and records it on the document. Exactly one of
//! [`insert_text`] (typing fills the caret) or [`abandon_pending`] (focus
//! left, the caret is removed) consumes it: both take the document's
//! pending slot, so whichever runs second finds nothing to do.

use log::{debug, warn};

use crate::model::{Document, NodeId, NodeKind};
use crate::normalize::{Guard, normalize};
use crate::selection::{Affinity, Position, Selection};

use super::surgery::materialize_caret;

/// Type `text` at a collapsed selection.
///
/// At the pending caret this legitimizes the pending styling. Elsewhere the
/// text is inserted at the caret in whatever context it sits. Returns the
/// caret after the typed text. A range selection is returned unchanged.
pub fn insert_text(
    doc: &mut Document,
    selection: Option<&Selection>,
    text: &str,
) -> Option<Selection> {
    let selection = *selection.filter(|s| doc.is_live(s))?;
    if !selection.is_collapsed() {
        warn!("insert_text ignores range selections; replace the range first");
        return Some(selection);
    }
    if text.is_empty() {
        return Some(selection);
    }

    let caret = match doc.pending() {
        Some(pending) if pending == selection.start.node => {
            doc.take_pending();
            debug!("legitimizing pending caret {}", pending);
            pending
        }
        _ => {
            let at = caret_after_release(doc, selection.start)?;
            materialize_caret(doc, at)?
        }
    };

    if let Some(NodeKind::Text(content)) = doc.node_mut(caret).map(|n| &mut n.kind) {
        content.push_str(text);
    }

    let block = doc.nearest_block(caret);
    let start = doc.offset_in(block, Position::new(caret, 0))?;
    normalize(doc, block, &Guard::none());
    let end = start + text.chars().count();
    Some(Selection::caret(doc.position_in(block, end, Affinity::Backward)))
}

/// Drop the pending insertion point, if the document still has one.
///
/// Removes the caret node and re-normalizes its block, which deletes the
/// empty span or re-merges the split fragments. Returns a caret at the same
/// char offset. With nothing pending the selection is returned as is.
pub fn abandon_pending(doc: &mut Document, selection: Option<&Selection>) -> Option<Selection> {
    let Some(caret) = doc.take_pending() else {
        return selection.copied().map(|mut s| {
            s.pending = None;
            s
        });
    };
    debug!("abandoning pending caret {}", caret);
    discard_caret(doc, caret).map(|(block, offset)| {
        Selection::caret(doc.position_in(block, offset, Affinity::Backward))
    })
}

/// Abandon a pending caret other than `keep`.
pub(crate) fn release_stale_pending(doc: &mut Document, keep: Option<NodeId>) {
    match doc.pending() {
        Some(pending) if Some(pending) != keep => {
            doc.take_pending();
            debug!("releasing stale pending caret {}", pending);
            discard_caret(doc, pending);
        }
        _ => {}
    }
}

/// Release any stale pending caret, then return a position equivalent to
/// `pos` in the possibly renormalized tree.
pub(crate) fn caret_after_release(doc: &mut Document, pos: Position) -> Option<Position> {
    let offset = doc.offset_in(NodeId::ROOT, pos)?;
    release_stale_pending(doc, None);
    let still_valid = doc.offset_in(NodeId::ROOT, pos) == Some(offset);
    Some(if still_valid {
        pos
    } else {
        doc.position_in(NodeId::ROOT, offset, Affinity::Backward)
    })
}

/// Detach a caret node and normalize its block. Returns the block and the
/// caret's char offset within it.
fn discard_caret(doc: &mut Document, caret: NodeId) -> Option<(NodeId, usize)> {
    if !doc.is_attached(caret) {
        return None;
    }
    let block = doc.nearest_block(caret);
    let offset = doc.offset_in(block, Position::new(caret, 0))?;
    doc.detach(caret);
    normalize(doc, block, &Guard::none());
    Some((block, offset))
}
