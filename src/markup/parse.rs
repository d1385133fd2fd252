//! Markup to tree.
//!
//! The grammar is the one [`serialize`](super::serialize) emits:
//!
//! ```text
//! document := node*
//! node     := text | element
//! element  := "<" tag attr* ">" node* "</" tag ">"
//!           | "<" leaf-tag attr* "/>"
//! attr     := name "=\"" escaped-value "\""
//! ```
//!
//! Nesting rules: blocks may hold blocks, spans, and text; spans hold only
//! spans and text; leaf media hold nothing.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::error::ParseError;
use crate::model::{Document, Node, NodeId, NodeKind};
use crate::normalize::normalize_document;

use super::escape::{resolve_entity, unescape};
use super::tags::kind_for;

/// Parse stored markup into a normalized document.
pub fn deserialize(input: &str) -> Result<Document, ParseError> {
    let mut doc = deserialize_verbatim(input)?;
    normalize_document(&mut doc);
    Ok(doc)
}

/// Parse stored markup without normalizing it, so the tree mirrors the
/// markup exactly.
pub fn deserialize_verbatim(input: &str) -> Result<Document, ParseError> {
    let mut reader = Reader::from_str(input);
    let mut doc = Document::new();
    // Open elements: (node, tag name)
    let mut stack: Vec<(NodeId, String)> = Vec::new();
    let mut buf_text = String::new();

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                flush_text(&mut doc, &stack, &mut buf_text)?;
                let (id, name) = open_element(&mut doc, &stack, &e)?;
                stack.push((id, name));
            }
            Event::Empty(e) => {
                flush_text(&mut doc, &stack, &mut buf_text)?;
                open_element(&mut doc, &stack, &e)?;
            }
            Event::Text(e) => {
                buf_text.push_str(&String::from_utf8(e.as_ref().to_vec())?);
            }
            Event::GeneralRef(e) => {
                let entity = String::from_utf8(e.as_ref().to_vec())?;
                let c = resolve_entity(&entity).ok_or(ParseError::UnknownEntity(entity))?;
                buf_text.push(c);
            }
            Event::End(e) => {
                flush_text(&mut doc, &stack, &mut buf_text)?;
                let name = String::from_utf8(e.name().as_ref().to_vec())?;
                match stack.pop() {
                    Some((_, open)) if open == name => {}
                    _ => return Err(ParseError::UnexpectedClose(name)),
                }
            }
            Event::CData(_) => return Err(ParseError::UnexpectedMarkup("CDATA section")),
            Event::PI(_) => return Err(ParseError::UnexpectedMarkup("processing instruction")),
            Event::DocType(_) => return Err(ParseError::UnexpectedMarkup("doctype")),
            Event::Eof => break,
            // Comments and the XML declaration carry no content.
            _ => {}
        }
    }

    if let Some((_, name)) = stack.pop() {
        return Err(ParseError::Unclosed(name));
    }
    flush_text(&mut doc, &stack, &mut buf_text)?;
    Ok(doc)
}

fn current_parent(stack: &[(NodeId, String)]) -> (NodeId, &str) {
    stack
        .last()
        .map_or((NodeId::ROOT, "document"), |(id, name)| (*id, name.as_str()))
}

fn is_leaf(doc: &Document, id: NodeId) -> bool {
    doc.node(id)
        .and_then(Node::as_block)
        .is_some_and(|block| block.kind.is_leaf())
}

fn flush_text(
    doc: &mut Document,
    stack: &[(NodeId, String)],
    buf_text: &mut String,
) -> Result<(), ParseError> {
    if buf_text.is_empty() {
        return Ok(());
    }
    let (parent, parent_name) = current_parent(stack);
    if is_leaf(doc, parent) {
        return Err(ParseError::UnexpectedContent(parent_name.to_string()));
    }
    doc.push_text(parent, buf_text);
    buf_text.clear();
    Ok(())
}

fn open_element(
    doc: &mut Document,
    stack: &[(NodeId, String)],
    e: &BytesStart,
) -> Result<(NodeId, String), ParseError> {
    let name = String::from_utf8(e.name().as_ref().to_vec())?;

    let mut attrs = Vec::new();
    for attr in e.attributes().flatten() {
        let key = String::from_utf8(attr.key.as_ref().to_vec())?;
        let raw = String::from_utf8(attr.value.to_vec())?;
        let value = unescape(&raw)?.into_owned();
        attrs.push((key, value));
    }
    let kind = kind_for(&name, &attrs)?;

    let (parent, parent_name) = current_parent(stack);
    if is_leaf(doc, parent) {
        return Err(ParseError::UnexpectedContent(parent_name.to_string()));
    }
    if doc.is_span(parent) && matches!(kind, NodeKind::Block(_)) {
        return Err(ParseError::InvalidNesting {
            parent: parent_name.to_string(),
            child: name,
        });
    }

    let id = doc.alloc_node(Node::new(kind));
    doc.append_child(parent, id);
    Ok((id, name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Align, BlockKind, ListKind, NodeView};
    use crate::style::Style;

    fn parse_view(input: &str) -> Option<NodeView> {
        deserialize(input).ok().map(|doc| doc.root_view())
    }

    #[test]
    fn test_parse_nested_markup() {
        assert_eq!(
            parse_view("<p>a <b>bold <i>both</i></b> &amp; c&#61;d</p>"),
            Some(NodeView::root(vec![NodeView::paragraph(vec![
                NodeView::text("a "),
                NodeView::span(
                    Style::Bold,
                    vec![
                        NodeView::text("bold "),
                        NodeView::span(Style::Italic, vec![NodeView::text("both")]),
                    ]
                ),
                NodeView::text(" & c=d"),
            ])]))
        );
    }

    #[test]
    fn test_parse_attributes() {
        let view = parse_view(
            "<h2 class=\"align-center\" id=\"x\"><font color=\"#00FF00\">g</font></h2>\
             <img src=\"a&amp;b.png\"/>",
        );
        assert_eq!(
            view,
            Some(NodeView::root(vec![
                NodeView::Block {
                    block: BlockKind::Heading { level: 2 },
                    align: Some(Align::Center),
                    children: vec![NodeView::span(
                        Style::TextColor("#00ff00".into()),
                        vec![NodeView::text("g")]
                    )],
                },
                NodeView::block(
                    BlockKind::Image {
                        src: "a&b.png".to_string()
                    },
                    vec![]
                ),
            ]))
        );
    }

    #[test]
    fn test_parse_normalizes() {
        assert_eq!(
            parse_view("<p><b>ab</b><b>cd</b><i></i></p>"),
            Some(NodeView::root(vec![NodeView::paragraph(vec![
                NodeView::span(Style::Bold, vec![NodeView::text("abcd")]),
            ])]))
        );
    }

    #[test]
    fn test_verbatim_keeps_structure() {
        let doc = deserialize_verbatim("<p><b>ab</b><b>cd</b></p>").ok();
        assert_eq!(
            doc.map(|d| d.root_view()),
            Some(NodeView::root(vec![NodeView::paragraph(vec![
                NodeView::span(Style::Bold, vec![NodeView::text("ab")]),
                NodeView::span(Style::Bold, vec![NodeView::text("cd")]),
            ])]))
        );
    }

    #[test]
    fn test_parse_keeps_empty_blocks() {
        let doc = deserialize("<ul><li></li></ul>").ok();
        let expected = NodeView::root(vec![NodeView::block(
            BlockKind::List {
                kind: ListKind::Unordered,
            },
            vec![NodeView::block(BlockKind::ListItem, vec![])],
        )]);
        assert_eq!(doc.map(|d| d.root_view()), Some(expected));
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            deserialize("<div>x</div>"),
            Err(ParseError::UnknownTag(tag)) if tag == "div"
        ));
        assert!(matches!(
            deserialize("<b><p>x</p></b>"),
            Err(ParseError::InvalidNesting { parent, child }) if parent == "b" && child == "p"
        ));
        assert!(matches!(
            deserialize("<img src=\"a\">x</img>"),
            Err(ParseError::UnexpectedContent(tag)) if tag == "img"
        ));
        assert!(matches!(
            deserialize("<font>x</font>"),
            Err(ParseError::MissingAttribute { attribute: "color", .. })
        ));
        assert!(matches!(
            deserialize("<p>&nbsp;</p>"),
            Err(ParseError::UnknownEntity(name)) if name == "nbsp"
        ));
        assert!(matches!(
            deserialize("<p>a<![CDATA[<x>]]>b</p>"),
            Err(ParseError::UnexpectedMarkup("CDATA section"))
        ));
        assert!(matches!(
            deserialize("<?php echo 1; ?><p>x</p>"),
            Err(ParseError::UnexpectedMarkup("processing instruction"))
        ));
        assert!(matches!(
            deserialize("<!DOCTYPE html><p>x</p>"),
            Err(ParseError::UnexpectedMarkup("doctype"))
        ));
        assert_eq!(
            parse_view("<p>a<!-- note -->b</p>"),
            Some(NodeView::root(vec![NodeView::paragraph(vec![NodeView::text("ab")])]))
        );
        assert!(deserialize("<p><b>x</p>").is_err());
        assert!(deserialize("<p>x").is_err());
        assert!(deserialize("x</p>").is_err());
    }
}
