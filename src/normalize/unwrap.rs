//! Redundant nesting removal.

use crate::model::{Document, NodeId};

use super::pass::walk_bottom_up;
use super::predicates::has_identical_ancestor;

/// If `node` is a span nested under an identical span, replace it with its
/// children.
pub fn unwrap_if_redundant(doc: &mut Document, node: NodeId) -> bool {
    if !has_identical_ancestor(doc, node) {
        return false;
    }
    doc.unwrap_node(node);
    true
}

/// Unwrap every redundantly nested span under `scope`.
pub(super) fn unwrap_redundant(doc: &mut Document, scope: NodeId) -> bool {
    let mut changed = false;
    walk_bottom_up(doc, scope, |doc, parent_id| {
        let mut cursor_opt = doc.first_child(parent_id);
        while let Some(current_id) = cursor_opt {
            let next_opt = doc.next_sibling(current_id);
            changed |= unwrap_if_redundant(doc, current_id);
            cursor_opt = next_opt;
        }
    });
    changed
}
