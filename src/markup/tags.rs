//! Tag and attribute mapping for stored markup.

use log::debug;

use crate::error::ParseError;
use crate::model::{Align, Block, BlockKind, ListKind, NodeKind};
use crate::style::Style;

/// Markup tag for an element kind. `None` for kinds that cannot be stored
/// (host-defined blocks, the root, text).
pub fn tag_for(kind: &NodeKind) -> Option<&'static str> {
    match kind {
        NodeKind::Block(block) => match &block.kind {
            BlockKind::Paragraph => Some("p"),
            BlockKind::Heading { level } => heading_tag(*level),
            BlockKind::List {
                kind: ListKind::Unordered,
            } => Some("ul"),
            BlockKind::List {
                kind: ListKind::Ordered,
            } => Some("ol"),
            BlockKind::ListItem => Some("li"),
            BlockKind::Quote => Some("blockquote"),
            BlockKind::Image { .. } => Some("img"),
            BlockKind::Embed { .. } => Some("embed"),
            BlockKind::Other { .. } => None,
        },
        NodeKind::Span(style) => Some(match style {
            Style::Bold => "b",
            Style::Italic => "i",
            Style::Underline => "u",
            Style::Strikethrough => "s",
            Style::TextColor(_) => "font",
            Style::BackgroundColor(_) => "mark",
        }),
        NodeKind::Root | NodeKind::Text(_) => None,
    }
}

fn heading_tag(level: u8) -> Option<&'static str> {
    match level {
        1 => Some("h1"),
        2 => Some("h2"),
        3 => Some("h3"),
        4 => Some("h4"),
        5 => Some("h5"),
        6 => Some("h6"),
        _ => None,
    }
}

/// Whitelisted attributes of an element, in output order.
pub fn attributes_for(kind: &NodeKind) -> Vec<(&'static str, String)> {
    let mut attrs = Vec::new();
    match kind {
        NodeKind::Block(block) => {
            match &block.kind {
                BlockKind::Image { src } => attrs.push(("src", src.clone())),
                BlockKind::Embed { href } => attrs.push(("href", href.clone())),
                _ => {}
            }
            if let Some(align) = block.align {
                attrs.push(("class", align.class_name().to_string()));
            }
        }
        NodeKind::Span(style) => {
            if let Some(color) = style.color() {
                attrs.push(("color", color.to_string()));
            }
        }
        NodeKind::Root | NodeKind::Text(_) => {}
    }
    attrs
}

/// Build the node kind for a tag and its (already unescaped) attributes.
///
/// Attributes outside the whitelist are dropped.
pub fn kind_for(tag: &str, attrs: &[(String, String)]) -> Result<NodeKind, ParseError> {
    let lookup = |name: &str| {
        attrs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.clone())
    };
    let require = |name: &'static str| {
        lookup(name).ok_or_else(|| ParseError::MissingAttribute {
            tag: tag.to_string(),
            attribute: name,
        })
    };

    let (kind, allowed): (NodeKind, &[&str]) = match tag {
        "b" => (NodeKind::Span(Style::Bold), &[]),
        "i" => (NodeKind::Span(Style::Italic), &[]),
        "u" => (NodeKind::Span(Style::Underline), &[]),
        "s" => (NodeKind::Span(Style::Strikethrough), &[]),
        "font" => (
            NodeKind::Span(Style::TextColor(require("color")?.into())),
            &["color"],
        ),
        "mark" => (
            NodeKind::Span(Style::BackgroundColor(require("color")?.into())),
            &["color"],
        ),
        _ => {
            let block_kind = match tag {
                "p" => BlockKind::Paragraph,
                "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => BlockKind::Heading {
                    level: tag.as_bytes()[1] - b'0',
                },
                "ul" => BlockKind::List {
                    kind: ListKind::Unordered,
                },
                "ol" => BlockKind::List {
                    kind: ListKind::Ordered,
                },
                "li" => BlockKind::ListItem,
                "blockquote" => BlockKind::Quote,
                "img" => BlockKind::Image {
                    src: require("src")?,
                },
                "embed" => BlockKind::Embed {
                    href: require("href")?,
                },
                _ => return Err(ParseError::UnknownTag(tag.to_string())),
            };
            let allowed: &[&str] = match block_kind {
                BlockKind::Image { .. } => &["src", "class"],
                BlockKind::Embed { .. } => &["href", "class"],
                _ => &["class"],
            };
            let mut block = Block::new(block_kind);
            block.align = lookup("class").and_then(|c| Align::from_class_list(&c));
            (NodeKind::Block(block), allowed)
        }
    };

    for (key, _) in attrs {
        if !allowed.contains(&key.as_str()) {
            debug!("dropping attribute `{}` on <{}>", key, tag);
        }
    }
    Ok(kind)
}
