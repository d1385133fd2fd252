//! Adjacent identical span merging.

use crate::model::{Document, NodeId};

use super::Guard;
use super::pass::walk_bottom_up;
use super::predicates::{next_meaningful_sibling, same_style};

/// If the next meaningful sibling of `node` is a span with the same style,
/// move `node`'s children to the front of that sibling and remove `node`.
pub fn merge_if_adjacent_identical(doc: &mut Document, node: NodeId) -> bool {
    merge_if_adjacent_identical_guarded(doc, node, &Guard::none())
}

pub(super) fn merge_if_adjacent_identical_guarded(
    doc: &mut Document,
    node: NodeId,
    guard: &Guard,
) -> bool {
    if !doc.is_span(node) || guard.protects(doc, node) {
        return false;
    }
    let Some(next) = next_meaningful_sibling(doc, node, guard) else {
        return false;
    };
    if !same_style(doc, node, next) || guard.protects(doc, next) {
        return false;
    }

    doc.prepend_children(node, next);
    doc.detach(node);
    true
}

/// Merge runs of identical sibling spans under `scope`.
pub(super) fn merge_adjacent(doc: &mut Document, scope: NodeId, guard: &Guard) -> bool {
    let mut changed = false;
    walk_bottom_up(doc, scope, |doc, parent_id| {
        let mut cursor_opt = doc.first_child(parent_id);
        while let Some(current_id) = cursor_opt {
            let next_opt = doc.next_sibling(current_id);
            changed |= merge_if_adjacent_identical_guarded(doc, current_id, guard);
            cursor_opt = next_opt;
        }
    });
    changed
}
