//! Inline style kinds and their values.
//!
//! This module contains:
//! - [`StyleKind`], the closed set of formatting attributes a span can carry
//! - [`Style`], a kind together with its typed payload
//! - [`Color`], the case-insensitive value of the color kinds
//! - [`StyleCatalog`], the configurable default values

mod catalog;

pub use catalog::{Color, ParseStyleKindError, Style, StyleCatalog, StyleKind};
