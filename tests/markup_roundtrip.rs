//! Stored markup: parse/serialize symmetry and file I/O.

use std::fs;

use richspan::markup::{deserialize, escape, serialize, unescape};
use richspan::{Error, ParseError, StyleKind, apply_style, read_document, write_document};

const SAMPLES: &[&str] = &[
    "<p>hello world</p>",
    "<p><b>bold</b> and <i>italic <u>under</u></i></p>",
    "<h2 class=\"align-center\">Title</h2><p>body</p>",
    "<ul><li>one</li><li><s>two</s></li></ul><ol><li>three</li></ol>",
    "<blockquote><font color=\"#ff0000\">red</font> <mark color=\"#ffff00\">lit</mark></blockquote>",
    "<p>a &lt; b &amp;&amp; c &gt; d &quot;q&quot; x&#61;1</p>",
    "<p>caf\u{e9} \u{1f600}</p><img src=\"a.png\"/><embed href=\"https://example.com/v\" class=\"align-right\"/>",
    "<p></p>",
    "",
];

#[test]
fn test_serialize_inverts_deserialize() {
    for &markup in SAMPLES {
        let doc = deserialize(markup).unwrap();
        assert_eq!(serialize(&doc).unwrap(), markup);

        let again = deserialize(&serialize(&doc).unwrap()).unwrap();
        assert_eq!(again.root_view(), doc.root_view());
    }
}

#[test]
fn test_escaping_is_reversible() {
    for raw in ["plain", "a & b", "<tag attr=\"v\">", "=&=<>\"", "é ü 日本"] {
        let escaped = escape(raw);
        assert!(!escaped.contains('<'));
        assert!(!escaped.contains('"'));
        assert_eq!(unescape(&escaped).unwrap(), raw);
    }
}

#[test]
fn test_parse_normalizes_stored_duplicates() {
    let doc = deserialize("<p><b>ab</b><b>cd</b><b><b>ef</b></b><i></i></p>").unwrap();
    assert_eq!(serialize(&doc).unwrap(), "<p><b>abcdef</b></p>");
}

#[test]
fn test_rejects_unknown_tags() {
    assert!(matches!(
        deserialize("<p><blink>x</blink></p>"),
        Err(ParseError::UnknownTag(tag)) if tag == "blink"
    ));
    assert!(matches!(
        deserialize("<b><p>x</p></b>"),
        Err(ParseError::InvalidNesting { .. })
    ));
    assert!(deserialize("<p>open").is_err());
}

#[test]
fn test_read_and_write_files() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("note.html");
    fs::write(&path, "<p>hello world</p>").unwrap();

    let mut doc = read_document(&path).unwrap();
    let sel = doc.select(6, 11);
    apply_style(&mut doc, Some(&sel), StyleKind::Italic, None);
    write_document(&doc, &path).unwrap();

    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "<p>hello <i>world</i></p>"
    );
}

#[test]
fn test_read_legacy_encodings() {
    let dir = tempfile::tempdir().unwrap();

    let latin = dir.path().join("latin.html");
    fs::write(&latin, b"<p>caf\xe9</p>").unwrap();
    let doc = read_document(&latin).unwrap();
    assert_eq!(doc.text_content(richspan::NodeId::ROOT), "café");

    let bom = dir.path().join("bom.html");
    fs::write(&bom, b"\xef\xbb\xbf<p>x</p>").unwrap();
    assert_eq!(serialize(&read_document(&bom).unwrap()).unwrap(), "<p>x</p>");
}

#[test]
fn test_read_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let result = read_document(dir.path().join("absent.html"));
    assert!(matches!(result, Err(Error::Io(_))));
}
