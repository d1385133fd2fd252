//! Host adapter: one document plus the current selection.
//!
//! The engine functions take and return selections as values. An
//! [`EditSession`] is the thin layer a host keeps between UI events: it maps
//! char offsets to selections, forwards toolbar and typing events, and
//! drops the pending insertion point when focus moves away.

use crate::engine::{abandon_pending, apply_style, insert_text, is_within};
use crate::error::{ParseError, SerializeError};
use crate::markup::{deserialize, serialize};
use crate::model::Document;
use crate::selection::Selection;
use crate::style::{Color, StyleKind};

#[derive(Debug, Clone, Default)]
pub struct EditSession {
    doc: Document,
    selection: Option<Selection>,
}

impl EditSession {
    pub fn new(doc: Document) -> Self {
        Self {
            doc,
            selection: None,
        }
    }

    /// Start a session from stored markup.
    pub fn from_markup(markup: &str) -> Result<Self, ParseError> {
        Ok(Self::new(deserialize(markup)?))
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn into_document(self) -> Document {
        self.doc
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    /// Replace the selection with one the host computed itself.
    pub fn set_selection(&mut self, selection: Option<Selection>) {
        self.selection = selection;
    }

    /// Select document chars `start..end`.
    ///
    /// Moving the selection off a pending caret abandons it.
    pub fn select(&mut self, start: usize, end: usize) {
        self.release_pending();
        self.selection = Some(self.doc.select(start, end));
    }

    /// Place a collapsed caret at a document char offset.
    pub fn select_caret(&mut self, offset: usize) {
        self.select(offset, offset);
    }

    /// Current selection as ordered document char offsets.
    pub fn selection_offsets(&self) -> Option<(usize, usize)> {
        self.selection
            .as_ref()
            .and_then(|s| self.doc.range_offsets(s))
    }

    /// Toggle a style over the selection. Returns the new containment state.
    pub fn toggle(&mut self, kind: StyleKind, value: Option<Color>) -> bool {
        let applied = apply_style(&mut self.doc, self.selection.as_ref(), kind, value);
        self.selection = applied.selection;
        applied.active
    }

    pub fn is_within(&self, kind: StyleKind, value: Option<&Color>) -> bool {
        is_within(&self.doc, self.selection.as_ref(), kind, value)
    }

    /// Type text at the caret.
    pub fn type_text(&mut self, text: &str) {
        self.selection = insert_text(&mut self.doc, self.selection.as_ref(), text);
    }

    /// Focus left the editor.
    pub fn blur(&mut self) {
        self.release_pending();
        self.selection = None;
    }

    /// Reclaim arena slots left behind by edits. The selection, including a
    /// pending caret, is carried over. Returns the number of nodes dropped.
    pub fn compact(&mut self) -> usize {
        let remap = self.doc.compact();
        self.selection = self.selection.and_then(|s| s.remapped(&remap));
        remap.dropped()
    }

    pub fn serialize(&self) -> Result<String, SerializeError> {
        serialize(&self.doc)
    }

    fn release_pending(&mut self) {
        if self.doc.pending().is_some() {
            abandon_pending(&mut self.doc, self.selection.as_ref());
        }
    }
}
