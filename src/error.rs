//! Error types for richspan operations.

use thiserror::Error;

use crate::model::NodeId;

/// Errors raised while turning a document tree into markup.
///
/// All of these indicate a structurally invalid in-memory tree, not bad user
/// input. Hosts should treat them as fatal for the save attempt.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SerializeError {
    #[error("node {node} has unrecognized type `{name}`")]
    UnrecognizedType { node: NodeId, name: String },

    #[error("node {node} is not marked exportable")]
    MissingExportMarker { node: NodeId },

    #[error("node {node} is neither text nor element")]
    NotTextOrElement { node: NodeId },
}

/// Errors raised while reading stored markup.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("XML parsing error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("UTF-8 decoding error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("unknown tag <{0}>")]
    UnknownTag(String),

    #[error("escape error: {0}")]
    Escape(#[from] quick_xml::escape::EscapeError),

    #[error("unknown entity &{0};")]
    UnknownEntity(String),

    #[error("<{tag}> requires attribute `{attribute}`")]
    MissingAttribute { tag: String, attribute: &'static str },

    #[error("<{child}> cannot appear inside <{parent}>")]
    InvalidNesting { parent: String, child: String },

    #[error("<{0}> cannot have content")]
    UnexpectedContent(String),

    #[error("{0} is not allowed in stored markup")]
    UnexpectedMarkup(&'static str),

    #[error("unexpected closing tag </{0}>")]
    UnexpectedClose(String),

    #[error("unclosed tag <{0}>")]
    Unclosed(String),
}

/// Errors that can occur during document reading or writing.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialize(#[from] SerializeError),

    #[error("parse error: {0}")]
    Parse(#[from] ParseError),
}

pub type Result<T> = std::result::Result<T, Error>;
