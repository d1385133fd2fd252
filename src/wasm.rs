//! WASM bindings for browser-hosted editors.
//!
//! This module exposes [`EditSession`] to JavaScript via wasm-bindgen. The
//! host maps DOM selections to char offsets before calling in.

use wasm_bindgen::prelude::*;

use crate::session::EditSession;
use crate::style::{Color, StyleKind};

/// Initialize panic hook for better error messages in the browser console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "wasm")]
    console_error_panic_hook::set_once();
}

fn parse_kind(kind: &str) -> Result<StyleKind, JsValue> {
    kind.parse::<StyleKind>()
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// An editing session over one document.
#[wasm_bindgen]
pub struct WasmSession {
    inner: EditSession,
}

#[wasm_bindgen]
impl WasmSession {
    /// Open a session from stored markup (an empty string for a new
    /// document).
    #[wasm_bindgen(constructor)]
    pub fn new(markup: &str) -> Result<WasmSession, JsValue> {
        let inner =
            EditSession::from_markup(markup).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(WasmSession { inner })
    }

    pub fn select(&mut self, start: usize, end: usize) {
        self.inner.select(start, end);
    }

    /// Toggle a style (`bold`, `italic`, `underline`, `strikethrough`,
    /// `text-color`, `background-color`) over the selection.
    pub fn toggle(&mut self, kind: &str, value: Option<String>) -> Result<bool, JsValue> {
        let kind = parse_kind(kind)?;
        Ok(self.inner.toggle(kind, value.map(Color::from)))
    }

    #[wasm_bindgen(js_name = isWithin)]
    pub fn is_within(&self, kind: &str, value: Option<String>) -> Result<bool, JsValue> {
        let kind = parse_kind(kind)?;
        let value = value.map(Color::from);
        Ok(self.inner.is_within(kind, value.as_ref()))
    }

    #[wasm_bindgen(js_name = typeText)]
    pub fn type_text(&mut self, text: &str) {
        self.inner.type_text(text);
    }

    pub fn blur(&mut self) {
        self.inner.blur();
    }

    /// Reclaim nodes left behind by edits. Returns how many were dropped.
    pub fn compact(&mut self) -> usize {
        self.inner.compact()
    }

    /// Selection as `[start, end]` char offsets, or `undefined`.
    #[wasm_bindgen(js_name = selectionOffsets)]
    pub fn selection_offsets(&self) -> Option<Vec<usize>> {
        self.inner.selection_offsets().map(|(a, b)| vec![a, b])
    }

    pub fn serialize(&self) -> Result<String, JsValue> {
        self.inner
            .serialize()
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }
}
