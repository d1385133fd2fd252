//! Stored markup: serialization, parsing, and file I/O.
//!
//! | Node | Tag | Attributes |
//! |---|---|---|
//! | Paragraph | `p` | `class` |
//! | Heading | `h1`..`h6` | `class` |
//! | List | `ul` / `ol` | `class` |
//! | ListItem | `li` | `class` |
//! | Quote | `blockquote` | `class` |
//! | Image | `img` (leaf) | `src`, `class` |
//! | Embed | `embed` (leaf) | `href`, `class` |
//! | Bold / Italic / Underline / Strikethrough | `b` / `i` / `u` / `s` | |
//! | TextColor | `font` | `color` |
//! | BackgroundColor | `mark` | `color` |
//!
//! `class` carries the block alignment as `align-left`, `align-center`,
//! `align-right`, or `align-justify`.

mod escape;
mod parse;
mod serialize;
mod tags;

pub use escape::{escape, resolve_entity, unescape};
pub use parse::{deserialize, deserialize_verbatim};
pub use serialize::{Fragment, finalize, serialize};

use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::model::Document;
use crate::util::decode_markup;

/// Read a markup file, decoding it to text.
pub fn read_markup<P: AsRef<Path>>(path: P) -> Result<String> {
    let bytes = fs::read(path)?;
    Ok(decode_markup(&bytes).into_owned())
}

/// Read a stored document from a file.
pub fn read_document<P: AsRef<Path>>(path: P) -> Result<Document> {
    let text = read_markup(path)?;
    Ok(deserialize(&text)?)
}

/// Serialize a document and write it to a file.
pub fn write_document<P: AsRef<Path>>(doc: &Document, path: P) -> Result<()> {
    let markup = serialize(doc)?;
    fs::write(path, markup)?;
    Ok(())
}
