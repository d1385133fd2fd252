//! Tree traversal utilities for normalization passes.

use crate::model::{Document, NodeId};

/// Walk the subtree under `scope` bottom-up and call `visitor` at each
/// parent.
///
/// Children are processed before their parent, so a pass that empties a
/// span lets the parent's visit see (and remove) it in the same walk. The
/// visitor may relink the children of the node it is given, but nothing
/// above it.
pub fn walk_bottom_up<F>(doc: &mut Document, scope: NodeId, mut visitor: F)
where
    F: FnMut(&mut Document, NodeId),
{
    if doc.node(scope).is_some() {
        walk_children(doc, scope, &mut visitor);
    }
}

fn walk_children<F>(doc: &mut Document, parent_id: NodeId, visitor: &mut F)
where
    F: FnMut(&mut Document, NodeId),
{
    // 1. Recurse into children first (bottom-up)
    let mut child_opt = doc.first_child(parent_id);
    while let Some(child_id) = child_opt {
        walk_children(doc, child_id, visitor);
        child_opt = doc.next_sibling(child_id);
    }
    // 2. Visit this parent after children
    visitor(doc, parent_id);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BlockKind;
    use crate::style::Style;

    #[test]
    fn test_visits_children_before_parents() {
        let mut doc = Document::new();
        let para = doc.push_block(NodeId::ROOT, BlockKind::Paragraph);
        let bold = doc.push_span(para, Style::Bold);
        let text = doc.push_text(bold, "x");

        let mut order = Vec::new();
        walk_bottom_up(&mut doc, NodeId::ROOT, |_, id| order.push(id));
        assert_eq!(order, vec![text, bold, para, NodeId::ROOT]);

        order.clear();
        walk_bottom_up(&mut doc, bold, |_, id| order.push(id));
        assert_eq!(order, vec![text, bold]);
    }
}
