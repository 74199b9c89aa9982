//! Formatting behavior through the public API

use quire_editor::{
    is_align_active, is_block_active, is_mark_active, toggle_align, toggle_block, toggle_mark,
    try_toggle_block, Alignment, Block, BlockFormat, CompileOptions, ContentDocument, ListItem,
    ListKind, Mark, Mutation, MutationError, Path, Selection, Text,
};
use quire_compiler_html::{compile_to_html, compile_to_text};
use quire_parser::parse;

fn paragraph(align: Alignment, content: &str) -> Block {
    Block::aligned(align, vec![Text::new(content)])
}

#[test]
fn test_initial_document_serializes_empty() {
    let doc = ContentDocument::new();
    assert_eq!(compile_to_text(&doc), "");
    assert_eq!(compile_to_html(&doc, CompileOptions::default()), "<p></p>");
}

#[test]
fn test_bold_over_full_text() {
    let doc = ContentDocument::from_blocks(vec![paragraph(Alignment::Left, "Hello")]).unwrap();
    let selection = Selection::all(&doc);

    let bold = toggle_mark(&doc, &selection, Mark::Bold);
    assert!(is_mark_active(&bold, &selection, Mark::Bold));
    assert_eq!(
        compile_to_html(&bold, CompileOptions::default()),
        r#"<p style="text-align:left"><strong>Hello</strong></p>"#
    );
}

#[test]
fn test_bulleted_then_numbered() {
    let doc = ContentDocument::from_blocks(vec![Block::paragraph(vec![Text::new("Item")])]).unwrap();

    let bulleted = try_toggle_block(&doc, &Selection::all(&doc), BlockFormat::BulletedList).unwrap();
    assert_eq!(
        bulleted.document.blocks(),
        &[Block::list(ListKind::Bulleted, vec![ListItem::new(vec![Text::new("Item")])])]
    );
    assert!(is_block_active(&bulleted.document, &bulleted.selection, BlockFormat::BulletedList));

    let numbered = toggle_block(&bulleted.document, &bulleted.selection, BlockFormat::NumberedList);
    assert_eq!(
        numbered.blocks(),
        &[Block::list(ListKind::Numbered, vec![ListItem::new(vec![Text::new("Item")])])]
    );
}

#[test]
fn test_mark_toggle_twice_is_identity() {
    let doc = parse("<p>one</p><ul><li><em>two</em></li></ul>").unwrap();
    let selection = Selection::all(&doc);

    for mark in [Mark::Bold, Mark::Underline] {
        let once = toggle_mark(&doc, &selection, mark);
        assert_ne!(once, doc);
        assert_eq!(toggle_mark(&once, &selection, mark), doc);
    }
}

#[test]
fn test_align_toggle_twice_leaves_unset() {
    let doc = parse("<p>a</p><p>b</p>").unwrap();
    let selection = Selection::all(&doc);

    for align in [Alignment::Left, Alignment::Center, Alignment::Right, Alignment::Justify] {
        let once = toggle_align(&doc, &selection, align);
        assert!(is_align_active(&once, &selection, align));
        let twice = toggle_align(&once, &selection, align);
        assert!(twice
            .blocks()
            .iter()
            .all(|block| matches!(block, Block::Paragraph { align: Alignment::Unset, .. })));
    }
}

#[test]
fn test_align_toggle_twice_drops_prior_alignment() {
    let doc = parse(r#"<p style="text-align:right">a</p>"#).unwrap();
    let selection = Selection::all(&doc);

    let once = toggle_align(&doc, &selection, Alignment::Center);
    assert!(is_align_active(&once, &selection, Alignment::Center));
    assert!(!is_align_active(&once, &selection, Alignment::Right));

    let twice = toggle_align(&once, &selection, Alignment::Center);
    assert_eq!(twice.blocks(), &[paragraph(Alignment::Unset, "a")]);
}

#[test]
fn test_list_toggle_round_trips_paragraphs() {
    let sources = [
        "<p>a</p>",
        r#"<p style="text-align:center">a</p><p>b</p><p>c</p>"#,
        "<p>x</p><ul><li>y</li></ul><p>z</p>",
    ];

    for source in sources {
        let doc = parse(source).unwrap();
        for index in 0..doc.blocks().len() {
            if !matches!(doc.blocks()[index], Block::Paragraph { .. }) {
                continue;
            }
            let selection = Selection::block(&doc, index).unwrap();
            for format in [BlockFormat::BulletedList, BlockFormat::NumberedList] {
                let once = try_toggle_block(&doc, &selection, format).unwrap();
                let twice = try_toggle_block(&once.document, &once.selection, format).unwrap();
                assert_eq!(twice.document, doc, "{} block {} {}", source, index, format);
            }
        }
    }
}

#[test]
fn test_list_toggle_round_trips_items() {
    let doc = parse("<ol><li>1</li><li>2</li><li>3</li><li>4</li></ol>").unwrap();

    for start in 0..4 {
        for end in start..4 {
            let selection = Selection::new(Path::new([0, start, 0]), Path::new([0, end, 0]));
            let once = try_toggle_block(&doc, &selection, BlockFormat::NumberedList).unwrap();
            assert!(!is_block_active(&once.document, &once.selection, BlockFormat::NumberedList));

            let twice = try_toggle_block(&once.document, &once.selection, BlockFormat::NumberedList).unwrap();
            assert_eq!(twice.document, doc, "items {}..={}", start, end);
        }
    }
}

#[test]
fn test_selection_spanning_paragraph_and_list() {
    let doc = parse("<p>a</p><ul><li>b</li><li>c</li></ul>").unwrap();
    let selection = Selection::new(Path::new([0, 0]), Path::new([1, 0, 0]));

    let edit = try_toggle_block(&doc, &selection, BlockFormat::BulletedList).unwrap();
    // bulleted is active on the list item, so both targets become paragraphs
    assert_eq!(
        edit.document.blocks(),
        &[
            Block::paragraph(vec![Text::new("a")]),
            Block::paragraph(vec![Text::new("b")]),
            Block::list(ListKind::Bulleted, vec![ListItem::new(vec![Text::new("c")])]),
        ]
    );
    assert_eq!(edit.selection, Selection::new(Path::new([0, 0]), Path::new([1, 0])));
}

#[test]
fn test_mutations_apply_through_enum() {
    let doc = parse("<p>Hello</p>").unwrap();
    let selection = Selection::all(&doc);

    let edit = Mutation::ToggleAlign {
        align: Alignment::Right,
    }
    .apply(&doc, &selection)
    .unwrap();
    let edit = Mutation::ToggleMark { mark: Mark::Italic }
        .apply(&edit.document, &edit.selection)
        .unwrap();

    assert_eq!(
        compile_to_html(&edit.document, CompileOptions::default()),
        r#"<p style="text-align:right"><em>Hello</em></p>"#
    );
}

#[test]
fn test_update_text_rejects_missing_leaf() {
    let doc = parse("<p>Hello</p>").unwrap();
    let result = Mutation::UpdateText {
        path: Path::new([0, 1]),
        content: "x".to_string(),
    }
    .apply(&doc, &Selection::all(&doc));

    assert_eq!(result, Err(MutationError::NodeNotFound(Path::new([0, 1]))));
}
