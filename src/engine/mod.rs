//! The apply/toggle engine.
//!
//! [`apply_style`] adds, removes, or replaces one style over exactly the
//! selected content and hands back a selection that is valid in the
//! mutated tree.
//!
//! ## Range selections
//!
//! 1. The selection is converted to document char offsets and any stale
//!    pending caret is abandoned. Everything after this point works from
//!    those offsets, so nodes consumed by merges can never leak into the
//!    returned selection.
//! 2. The span of the requested kind enclosing the selection (if any)
//!    decides the mode: remove when present, add otherwise. An enclosing
//!    span with a different value means remove then add (replace).
//! 3. Text leaves are split at both offsets and the selected leaves are
//!    isolated by splitting their ancestor spans into clones.
//! 4. Remove unwraps spans of the kind over the isolated run. Add wraps the
//!    run in a new span and unwraps same-kind spans inside it.
//! 5. Touched blocks are normalized and the selection is rebuilt from the
//!    recorded offsets.
//!
//! ## Collapsed selections
//!
//! A zero-length caret node is inserted at the caret and styled like a
//! one-node run. It becomes the document's pending insertion point and is
//! guarded from the normalizer until it is typed into or abandoned (see
//! [`insert_text`] and [`abandon_pending`]).

mod pending;
mod query;
mod surgery;

pub use pending::{abandon_pending, insert_text};
pub use query::{is_within, nearest_enclosing_span};
pub use surgery::{isolate, split_text, strip_kind, wrap_run};

use log::debug;

use crate::model::{Document, NodeId};
use crate::normalize::{Guard, normalize};
use crate::selection::{Position, Selection};
use crate::style::{Color, Style, StyleKind};

use pending::{caret_after_release, release_stale_pending};
use query::nearest_span_from;

/// Outcome of [`apply_style`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Applied {
    /// Selection to show after the edit; `None` when there was no active
    /// selection.
    pub selection: Option<Selection>,
    /// Whether the new selection lies within a span of the applied style.
    pub active: bool,
}

impl Applied {
    fn inactive() -> Self {
        Self {
            selection: None,
            active: false,
        }
    }
}

/// Toggle `kind` over the selection.
///
/// `value` picks the color for the color kinds; `None` falls back to the
/// document's catalog default. Presence-only kinds ignore it.
///
/// A missing or stale selection leaves the document untouched.
pub fn apply_style(
    doc: &mut Document,
    selection: Option<&Selection>,
    kind: StyleKind,
    value: Option<Color>,
) -> Applied {
    let Some(selection) = selection.filter(|s| doc.is_live(s)).copied() else {
        debug!("apply_style({}) without an active selection", kind);
        return Applied::inactive();
    };
    let style = doc.catalog().style(kind, value);

    match doc.range_offsets(&selection) {
        Some((a, b)) if a != b => apply_to_range(doc, a, b, style),
        _ => {
            let caret = if selection.is_collapsed() {
                selection
            } else {
                Selection::caret(selection.start)
            };
            apply_at_caret(doc, caret, style)
        }
    }
}

fn apply_to_range(doc: &mut Document, a: usize, b: usize, style: Style) -> Applied {
    let kind = style.kind();

    // The caret node is zero-length, so releasing it keeps `a..b` valid.
    release_stale_pending(doc, None);

    // Mode is decided on the text the offsets cover.
    let bounds = doc.select(a, b);
    let active = doc
        .common_ancestor(bounds.start.node, bounds.end.node)
        .and_then(|container| nearest_span_from(doc, container, kind, None));
    let replace = active
        .and_then(|span| doc.style_of(span))
        .is_some_and(|current| *current != style);
    debug!(
        "apply {} over chars {}..{}: {}{}",
        style,
        a,
        b,
        if active.is_some() { "remove" } else { "add" },
        if replace { " (replace)" } else { "" }
    );

    surgery::split_at_offset(doc, a);
    surgery::split_at_offset(doc, b);
    let leaves = surgery::text_leaves_between(doc, a, b);
    if leaves.is_empty() {
        let selection = doc.select(a, b);
        let active = is_within(doc, Some(&selection), kind, style.color());
        return Applied {
            selection: Some(selection),
            active,
        };
    }

    let mut touched = Vec::new();
    if active.is_some() {
        if let Some(block) = remove_from_run(doc, &leaves, kind) {
            touched.push(block);
        }
    } else {
        for (block, group) in surgery::group_by_block(doc, &leaves) {
            add_to_run(doc, &group, &style);
            touched.push(block);
        }
    }

    touched.dedup();
    for block in touched {
        normalize(doc, block, &Guard::none());
    }

    let selection = doc.select(a, b);
    finish(doc, selection, style, replace)
}

/// Strip `kind` from the content covered by `leaves`. Returns the block
/// that was edited.
fn remove_from_run(doc: &mut Document, leaves: &[NodeId], kind: StyleKind) -> Option<NodeId> {
    let (&first, &last) = (leaves.first()?, leaves.last()?);
    let lca = surgery::common_ancestor_of(doc, leaves)?;
    let span = nearest_span_from(doc, lca, kind, None)?;
    let top = doc.parent(span)?;

    let (x, y) = surgery::isolate(doc, first, last, top);
    for node in surgery::sibling_run(doc, x, y) {
        surgery::strip_kind(doc, node, kind);
    }
    Some(doc.nearest_block(top))
}

/// Wrap the content covered by `leaves` (all in one block) in `style`.
fn add_to_run(doc: &mut Document, leaves: &[NodeId], style: &Style) {
    let (Some(&first), Some(&last)) = (leaves.first(), leaves.last()) else {
        return;
    };
    let Some(lca) = surgery::common_ancestor_of(doc, leaves) else {
        return;
    };
    let Some(mut top) = (if doc.is_text(lca) { doc.parent(lca) } else { Some(lca) }) else {
        return;
    };

    // Climb out of same-kind spans so the new span is not nested in one.
    let outermost = doc
        .ancestors(top)
        .take_while(|&n| doc.is_span(n))
        .filter(|&n| doc.style_of(n).is_some_and(|s| s.kind() == style.kind()))
        .last();
    if let Some(parent) = outermost.and_then(|span| doc.parent(span)) {
        top = parent;
    }

    let (x, y) = surgery::isolate(doc, first, last, top);
    for span in surgery::wrap_run(doc, x, y, style) {
        surgery::resolve_self_ancestors(doc, span);
    }
}

fn apply_at_caret(doc: &mut Document, selection: Selection, style: Style) -> Applied {
    let kind = style.kind();

    let caret = match doc.pending() {
        Some(pending) if pending == selection.start.node => pending,
        _ => {
            let Some(at) = caret_after_release(doc, selection.start) else {
                return Applied::inactive();
            };
            match surgery::materialize_caret(doc, at) {
                Some(caret) => caret,
                None => return Applied::inactive(),
            }
        }
    };
    release_stale_pending(doc, Some(caret));

    let active = nearest_span_from(doc, caret, kind, None);
    let replace = active
        .and_then(|span| doc.style_of(span))
        .is_some_and(|current| *current != style);
    debug!(
        "apply {} at caret {}: {}{}",
        style,
        caret,
        if active.is_some() { "remove" } else { "add" },
        if replace { " (replace)" } else { "" }
    );

    match active.and_then(|span| doc.parent(span)) {
        Some(top) => {
            let (x, _) = surgery::isolate(doc, caret, caret, top);
            surgery::strip_kind(doc, x, kind);
        }
        None => {
            surgery::wrap_run(doc, caret, caret, &style);
        }
    }

    let block = doc.nearest_block(caret);
    normalize(doc, block, &Guard::caret(caret));
    doc.set_pending(Some(caret));

    let selection = Selection::caret(Position::new(caret, 0)).with_pending(caret);
    finish(doc, selection, style, replace)
}

/// Run the add half of a replace, or report containment.
fn finish(doc: &mut Document, selection: Selection, style: Style, replace: bool) -> Applied {
    let kind = style.kind();
    if replace {
        return apply_style(doc, Some(&selection), kind, style.color().cloned());
    }
    let active = is_within(doc, Some(&selection), kind, style.color());
    Applied {
        selection: Some(selection),
        active,
    }
}
