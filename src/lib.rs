//! # richspan
//!
//! An inline style-span engine for rich-text editors.
//!
//! ## Features
//!
//! - Toggle bold, italic, underline, strikethrough, text color, and
//!   background color over any selection, including a collapsed caret
//! - Keeps the tree normalized: no redundant nesting, no adjacent duplicate
//!   spans, no empty spans, no split text runs
//! - Returns a selection that stays valid after the edit
//! - Serializes to (and parses from) a small, whitelisted markup
//!
//! ## Quick Start
//!
//! ```
//! use richspan::{Document, StyleKind, apply_style, is_within, serialize};
//! use richspan::markup::deserialize;
//!
//! let mut doc = deserialize("<p>hello world</p>").unwrap();
//! let selection = doc.select(0, 5);
//!
//! let applied = apply_style(&mut doc, Some(&selection), StyleKind::Bold, None);
//! assert!(applied.active);
//! assert!(is_within(&doc, applied.selection.as_ref(), StyleKind::Bold, None));
//! assert_eq!(serialize(&doc).unwrap(), "<p><b>hello</b> world</p>");
//! ```
//!
//! ## Editing sessions
//!
//! Hosts that track a single selection can use [`EditSession`]:
//!
//! ```
//! use richspan::{EditSession, StyleKind};
//!
//! let mut session = EditSession::from_markup("<p></p>").unwrap();
//! session.select_caret(0);
//! session.toggle(StyleKind::Italic, None);
//! session.type_text("x");
//! assert_eq!(session.serialize().unwrap(), "<p><i>x</i></p>");
//! ```

pub mod engine;
pub mod error;
pub mod markup;
pub mod model;
pub mod normalize;
pub mod selection;
pub mod session;
pub mod style;
pub(crate) mod util;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use engine::{
    Applied, abandon_pending, apply_style, insert_text, is_within, nearest_enclosing_span,
};
pub use error::{Error, ParseError, Result, SerializeError};
pub use markup::{read_document, serialize, write_document};
pub use model::{Document, NodeId, NodeRemap, NodeView};
pub use normalize::{Violation, check_invariants};
pub use selection::{Affinity, PendingInsertion, Position, Selection};
pub use session::EditSession;
pub use style::{Color, Style, StyleCatalog, StyleKind};
