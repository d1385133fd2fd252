//! Adjacent text coalescing.

use crate::model::{Document, NodeId, NodeKind};

use super::Guard;
use super::pass::walk_bottom_up;

/// Merge adjacent text siblings everywhere under `root`.
pub fn coalesce_text(doc: &mut Document, root: NodeId) -> bool {
    coalesce_guarded(doc, root, &Guard::none())
}

pub(super) fn coalesce_guarded(doc: &mut Document, scope: NodeId, guard: &Guard) -> bool {
    let mut changed = false;
    walk_bottom_up(doc, scope, |doc, parent_id| {
        let mut cursor_opt = doc.first_child(parent_id);
        while let Some(current_id) = cursor_opt {
            let next_opt = doc.next_sibling(current_id);

            if let Some(next_id) = next_opt
                && can_coalesce(doc, current_id, next_id, guard)
            {
                let tail = doc.text_of(next_id).unwrap_or_default().to_string();
                if let Some(NodeKind::Text(text)) = doc.node_mut(current_id).map(|n| &mut n.kind) {
                    text.push_str(&tail);
                }
                doc.detach(next_id);
                changed = true;
                // Don't advance cursor - the new next might also be a text
                continue;
            }

            cursor_opt = next_opt;
        }
    });
    changed
}

fn can_coalesce(doc: &Document, left: NodeId, right: NodeId, guard: &Guard) -> bool {
    doc.is_text(left) && doc.is_text(right) && !guard.is_caret(left) && !guard.is_caret(right)
}
