//! End-to-end toggle behavior through the public API.

use richspan::markup::deserialize;
use richspan::model::{BlockKind, NodeView};
use richspan::{
    Document, NodeId, Position, Selection, Style, StyleKind, abandon_pending, apply_style,
    check_invariants, insert_text, is_within, nearest_enclosing_span, serialize,
};

fn bold(children: Vec<NodeView>) -> NodeView {
    NodeView::span(Style::Bold, children)
}

fn italic(children: Vec<NodeView>) -> NodeView {
    NodeView::span(Style::Italic, children)
}

fn text_color(color: &str, children: Vec<NodeView>) -> NodeView {
    NodeView::span(Style::TextColor(color.into()), children)
}

fn paragraphs(paras: Vec<Vec<NodeView>>) -> NodeView {
    NodeView::root(paras.into_iter().map(NodeView::paragraph).collect())
}

#[test]
fn test_bold_first_word() {
    let mut doc = deserialize("<p>hello world</p>").unwrap();
    let sel = doc.select(0, 5);
    let applied = apply_style(&mut doc, Some(&sel), StyleKind::Bold, None);

    assert_eq!(
        doc.root_view(),
        paragraphs(vec![vec![
            bold(vec![NodeView::text("hello")]),
            NodeView::text(" world"),
        ]])
    );
    assert!(applied.active);
    assert!(is_within(&doc, applied.selection.as_ref(), StyleKind::Bold, None));
}

#[test]
fn test_bold_twice_restores_text() {
    let mut doc = deserialize("<p>hello world</p>").unwrap();
    let sel = doc.select(0, 5);
    apply_style(&mut doc, Some(&sel), StyleKind::Bold, None);

    let sel = doc.select(0, 5);
    let applied = apply_style(&mut doc, Some(&sel), StyleKind::Bold, None);

    assert!(!applied.active);
    assert_eq!(
        doc.root_view(),
        paragraphs(vec![vec![NodeView::text("hello world")]])
    );
    assert_eq!(serialize(&doc).unwrap(), "<p>hello world</p>");
}

#[test]
fn test_replace_color_without_nesting() {
    let mut doc = Document::from_views(&[NodeView::paragraph(vec![text_color(
        "#ff0000",
        vec![NodeView::text("red")],
    )])]);
    let sel = doc.select(0, 3);
    let applied = apply_style(
        &mut doc,
        Some(&sel),
        StyleKind::TextColor,
        Some("#00ff00".into()),
    );

    assert_eq!(
        doc.root_view(),
        paragraphs(vec![vec![text_color("#00ff00", vec![NodeView::text("red")])]])
    );
    assert!(applied.active);
    assert!(is_within(
        &doc,
        applied.selection.as_ref(),
        StyleKind::TextColor,
        Some(&"#00ff00".into())
    ));
    assert!(!is_within(
        &doc,
        applied.selection.as_ref(),
        StyleKind::TextColor,
        Some(&"#ff0000".into())
    ));
}

#[test]
fn test_adjacent_duplicates_merge_on_touch() {
    let mut doc = Document::from_views(&[NodeView::paragraph(vec![
        bold(vec![NodeView::text("ab")]),
        bold(vec![NodeView::text("cd")]),
    ])]);
    let sel = doc.select(0, 4);
    let applied = apply_style(&mut doc, Some(&sel), StyleKind::Bold, None);

    assert!(applied.active);
    assert_eq!(
        doc.root_view(),
        paragraphs(vec![vec![bold(vec![NodeView::text("abcd")])]])
    );
}

#[test]
fn test_unrelated_style_still_merges_duplicates() {
    let mut doc = Document::from_views(&[NodeView::paragraph(vec![
        bold(vec![NodeView::text("ab")]),
        bold(vec![NodeView::text("cd")]),
    ])]);
    let sel = doc.select(0, 1);
    apply_style(&mut doc, Some(&sel), StyleKind::Italic, None);

    assert_eq!(
        doc.root_view(),
        paragraphs(vec![vec![bold(vec![
            italic(vec![NodeView::text("a")]),
            NodeView::text("bcd"),
        ])]])
    );
    assert!(check_invariants(&doc, NodeId::ROOT).is_empty());
}

#[test]
fn test_caret_italic_then_type() {
    let mut doc = Document::from_views(&[NodeView::paragraph(vec![])]);
    let caret = doc.select(0, 0);
    let applied = apply_style(&mut doc, Some(&caret), StyleKind::Italic, None);

    assert!(applied.active);
    let sel = applied.selection.unwrap();
    assert!(sel.pending.is_some());
    assert_eq!(
        doc.root_view(),
        paragraphs(vec![vec![italic(vec![NodeView::text("")])]])
    );

    let typed = insert_text(&mut doc, Some(&sel), "x");
    assert_eq!(
        doc.root_view(),
        paragraphs(vec![vec![italic(vec![NodeView::text("x")])]])
    );
    assert!(doc.pending().is_none());
    assert!(typed.is_some_and(|s| s.pending.is_none()));
    assert_eq!(serialize(&doc).unwrap(), "<p><i>x</i></p>");
}

#[test]
fn test_caret_italic_then_focus_away() {
    let mut doc = Document::from_views(&[NodeView::paragraph(vec![])]);
    let before = doc.root_view();
    let caret = doc.select(0, 0);
    let applied = apply_style(&mut doc, Some(&caret), StyleKind::Italic, None);

    abandon_pending(&mut doc, applied.selection.as_ref());
    assert_eq!(doc.root_view(), before);
    assert!(doc.pending().is_none());
    assert!(check_invariants(&doc, NodeId::ROOT).is_empty());
}

#[test]
fn test_pending_resolves_once() {
    let mut doc = deserialize("<p>ab</p>").unwrap();
    let caret = doc.select(1, 1);
    let applied = apply_style(&mut doc, Some(&caret), StyleKind::Bold, None);
    let typed = insert_text(&mut doc, applied.selection.as_ref(), "z");
    let after_typing = doc.root_view();

    // The insertion point was already legitimized; abandoning is a no-op.
    let abandoned = abandon_pending(&mut doc, applied.selection.as_ref());
    assert_eq!(doc.root_view(), after_typing);
    assert!(abandoned.is_some_and(|s| s.pending.is_none()));
    assert_eq!(serialize(&doc).unwrap(), "<p>a<b>z</b>b</p>");
    assert_eq!(typed.and_then(|s| doc.range_offsets(&s)), Some((2, 2)));
}

#[test]
fn test_active_matches_containment() {
    let mut doc = deserialize("<p>one <i>two</i> three</p><p>four</p>").unwrap();
    for (a, b) in [(0, 3), (4, 7), (2, 9), (5, 6), (14, 17)] {
        for kind in [StyleKind::Bold, StyleKind::Italic, StyleKind::Underline] {
            let sel = doc.select(a, b);
            let applied = apply_style(&mut doc, Some(&sel), kind, None);
            assert_eq!(
                applied.active,
                is_within(&doc, applied.selection.as_ref(), kind, None),
                "{kind} over {a}..{b}"
            );
            assert!(check_invariants(&doc, NodeId::ROOT).is_empty());
        }
    }
}

#[test]
fn test_selection_survives_edit() {
    let mut doc = deserialize("<p>ab<b>cd</b>ef</p>").unwrap();
    let sel = doc.select(1, 5);
    let applied = apply_style(&mut doc, Some(&sel), StyleKind::Bold, None);

    let after = applied.selection.unwrap();
    assert!(doc.is_live(&after));
    assert!(doc.is_attached(after.start.node));
    assert!(doc.is_attached(after.end.node));
    assert_eq!(doc.range_offsets(&after), Some((1, 5)));
    assert_eq!(serialize(&doc).unwrap(), "<p>a<b>bcde</b>f</p>");
}

#[test]
fn test_redundant_chain_collapses() {
    let mut doc = Document::from_views(&[NodeView::paragraph(vec![bold(vec![bold(vec![
        bold(vec![NodeView::text("abc")]),
    ])])])]);
    let sel = doc.select(0, 1);
    apply_style(&mut doc, Some(&sel), StyleKind::Italic, None);

    assert_eq!(
        doc.root_view(),
        paragraphs(vec![vec![bold(vec![
            italic(vec![NodeView::text("a")]),
            NodeView::text("bc"),
        ])]])
    );
}

#[test]
fn test_nearest_span_found_through_other_styles() {
    let doc = deserialize("<p><b>x<i>yz</i></b></p>").unwrap();
    let sel = doc.select(1, 2);

    let span = nearest_enclosing_span(&doc, Some(&sel), StyleKind::Bold, None);
    assert!(span.is_some_and(|s| doc.style_of(s) == Some(&Style::Bold)));
    assert!(nearest_enclosing_span(&doc, Some(&sel), StyleKind::Underline, None).is_none());
    assert!(nearest_enclosing_span(&doc, None, StyleKind::Bold, None).is_none());
}

#[test]
fn test_stale_selection_is_ignored() {
    let mut doc = deserialize("<p>abc</p>").unwrap();
    let live = doc.select(0, 1);
    let stale = Selection::new(live.start, Position::new(live.end.node, 40));
    let before = doc.root_view();

    let applied = apply_style(&mut doc, Some(&stale), StyleKind::Bold, None);
    assert!(applied.selection.is_none());
    assert!(!applied.active);
    assert_eq!(doc.root_view(), before);
}

#[test]
fn test_cross_block_wrap_stays_inside_blocks() {
    let mut doc = Document::from_views(&[
        NodeView::block(BlockKind::Quote, vec![NodeView::text("abc")]),
        NodeView::paragraph(vec![NodeView::text("def")]),
    ]);
    let sel = doc.select(1, 5);
    apply_style(&mut doc, Some(&sel), StyleKind::Underline, None);

    assert_eq!(
        serialize(&doc).unwrap(),
        "<blockquote>a<u>bc</u></blockquote><p><u>de</u>f</p>"
    );
    assert!(check_invariants(&doc, NodeId::ROOT).is_empty());
}

#[test]
fn test_range_toggle_after_caret_split() {
    let mut doc = deserialize("<p><b>abcd</b></p>").unwrap();
    let caret = doc.select(2, 2);
    let split = apply_style(&mut doc, Some(&caret), StyleKind::Bold, None);
    assert!(!split.active);
    assert!(doc.pending().is_some());

    // The abandoned caret rejoins the bold fragments before the mode is
    // chosen, so the range toggle removes bold.
    let sel = doc.select(1, 3);
    let applied = apply_style(&mut doc, Some(&sel), StyleKind::Bold, None);

    assert!(!applied.active);
    assert!(doc.pending().is_none());
    assert_eq!(serialize(&doc).unwrap(), "<p><b>a</b>bc<b>d</b></p>");
    assert!(check_invariants(&doc, NodeId::ROOT).is_empty());
}
