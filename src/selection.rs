//! Selection values and char-offset mapping.
//!
//! A [`Selection`] is a plain value: the host builds one, hands it to an
//! engine call, and gets a fresh one back. The engine never stores it.

use crate::model::{Document, NodeId, NodeKind, NodeRemap};

/// A point in the tree.
///
/// `offset` is a char index when `node` is a text node and a child index
/// otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub node: NodeId,
    pub offset: usize,
}

impl Position {
    pub fn new(node: NodeId, offset: usize) -> Self {
        Self { node, offset }
    }
}

/// Token for a caret that was styled before anything was typed.
///
/// `caret` is a zero-length text node inside the styled context. Typing
/// fills it ([`insert_text`](crate::engine::insert_text)); leaving removes
/// it ([`abandon_pending`](crate::engine::abandon_pending)).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PendingInsertion {
    pub caret: NodeId,
}

/// A start/end pair of positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub start: Position,
    pub end: Position,
    pub pending: Option<PendingInsertion>,
}

impl Selection {
    pub fn new(start: Position, end: Position) -> Self {
        Self {
            start,
            end,
            pending: None,
        }
    }

    pub fn caret(at: Position) -> Self {
        Self::new(at, at)
    }

    pub fn with_pending(mut self, caret: NodeId) -> Self {
        self.pending = Some(PendingInsertion { caret });
        self
    }

    pub fn is_collapsed(&self) -> bool {
        self.start == self.end
    }

    /// Translate the selection across [`Document::compact`]. `None` when an
    /// endpoint was dropped.
    pub fn remapped(&self, remap: &NodeRemap) -> Option<Selection> {
        let position =
            |pos: Position| remap.get(pos.node).map(|node| Position::new(node, pos.offset));
        let pending = match self.pending {
            Some(token) => Some(PendingInsertion {
                caret: remap.get(token.caret)?,
            }),
            None => None,
        };
        Some(Selection {
            start: position(self.start)?,
            end: position(self.end)?,
            pending,
        })
    }
}

/// Which side of an offset a position binds to when the offset falls on a
/// boundary between two text runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Affinity {
    /// The text after the offset.
    Forward,
    /// The text before the offset.
    Backward,
}

impl Document {
    /// Char offset of `pos` relative to the start of `scope`.
    ///
    /// Returns `None` when the position lies outside `scope` or its offset
    /// is out of range.
    pub fn offset_in(&self, scope: NodeId, pos: Position) -> Option<usize> {
        if !self.is_ancestor(scope, pos.node) {
            return None;
        }
        let node = self.node(pos.node)?;
        match &node.kind {
            NodeKind::Text(text) => {
                if pos.offset > text.chars().count() {
                    return None;
                }
                Some(self.start_offset(scope, pos.node) + pos.offset)
            }
            _ => {
                if pos.offset > self.child_count(pos.node) {
                    return None;
                }
                match self.child_at(pos.node, pos.offset) {
                    Some(child) => Some(self.start_offset(scope, child)),
                    None => Some(self.start_offset(scope, pos.node) + self.text_len(pos.node)),
                }
            }
        }
    }

    /// Chars of text that precede `target` within `scope`.
    fn start_offset(&self, scope: NodeId, target: NodeId) -> usize {
        self.descendants(scope)
            .take_while(|&n| n != target)
            .filter_map(|n| self.node(n))
            .map(|n| n.char_len())
            .sum()
    }

    /// Resolve a char offset within `scope` to a text position.
    ///
    /// Zero-length text nodes are never chosen. Offsets past the end clamp
    /// to the end of the last text. A scope without text resolves to the
    /// start of its first innermost block.
    pub fn position_in(&self, scope: NodeId, offset: usize, affinity: Affinity) -> Position {
        let mut start = 0;
        let mut first = None;
        let mut last = None;

        for id in self.descendants(scope) {
            let len = match self.text_of(id) {
                Some(text) if !text.is_empty() => text.chars().count(),
                _ => continue,
            };
            let end = start + len;
            let hit = match affinity {
                Affinity::Forward => start <= offset && offset < end,
                Affinity::Backward => start < offset && offset <= end,
            };
            if hit {
                return Position::new(id, offset - start);
            }
            first.get_or_insert(id);
            last = Some((id, len));
            start = end;
        }

        match (affinity, first, last) {
            (Affinity::Backward, Some(id), _) if offset == 0 => Position::new(id, 0),
            (_, _, Some((id, len))) => Position::new(id, len),
            _ => Position::new(self.innermost_block(scope), 0),
        }
    }

    fn innermost_block(&self, scope: NodeId) -> NodeId {
        let mut current = scope;
        loop {
            let next = self.children(current).find(|&child| {
                self.node(child)
                    .and_then(|n| n.as_block())
                    .is_some_and(|b| !b.kind.is_leaf())
            });
            match next {
                Some(child) => current = child,
                None => return current,
            }
        }
    }

    /// Build a selection from document char offsets. Reversed ranges are
    /// normalized so that `start <= end`.
    pub fn select(&self, start: usize, end: usize) -> Selection {
        let (start, end) = if start <= end { (start, end) } else { (end, start) };
        if start == end {
            return Selection::caret(self.position_in(NodeId::ROOT, start, Affinity::Backward));
        }
        Selection::new(
            self.position_in(NodeId::ROOT, start, Affinity::Forward),
            self.position_in(NodeId::ROOT, end, Affinity::Backward),
        )
    }

    /// Document char offsets of a selection, ordered.
    pub fn range_offsets(&self, selection: &Selection) -> Option<(usize, usize)> {
        let a = self.offset_in(NodeId::ROOT, selection.start)?;
        let b = self.offset_in(NodeId::ROOT, selection.end)?;
        Some(if a <= b { (a, b) } else { (b, a) })
    }

    /// Whether both ends of the selection point at attached nodes with
    /// in-range offsets.
    pub fn is_live(&self, selection: &Selection) -> bool {
        self.range_offsets(selection).is_some()
    }
}
