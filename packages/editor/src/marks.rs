//! # Mark Engine
//!
//! Bold, italic and underline are flags on text leaves. A mark is active
//! when at least one selected leaf carries it; toggling sets or clears the
//! flag on every selected leaf depending on that answer, so a mixed
//! selection is cleared first and a second toggle sets it everywhere.

use crate::mutations::MutationError;
use crate::selection::{NodeMut, NodeRef, Selection};
use crate::transforms::{fail_closed, query, transform};
use quire_parser::ast::{Document, Mark};

pub fn is_mark_active(document: &Document, selection: &Selection, mark: Mark) -> bool {
    query(document, selection, |node| match node {
        NodeRef::Text(text) => text.has_mark(mark),
        _ => false,
    })
}

pub fn try_toggle_mark(document: &Document, selection: &Selection, mark: Mark) -> Result<Document, MutationError> {
    let enable = !is_mark_active(document, selection, mark);
    tracing::debug!(mark = mark.as_str(), enable, "toggle mark");

    transform(document, selection, |node| {
        if let NodeMut::Text(text) = node {
            text.set_mark(mark, enable);
        }
    })
}

/// Toggle `mark` across the selection, keeping the prior document if the
/// result would be invalid
pub fn toggle_mark(document: &Document, selection: &Selection, mark: Mark) -> Document {
    fail_closed(document, "toggle_mark", try_toggle_mark(document, selection, mark))
}

#[cfg(test)]
mod tests {
    use super::*;
    use quire_parser::ast::{Path, Text};
    use quire_parser::parse;

    #[test]
    fn test_toggle_sets_mark() {
        let doc = parse("<p>Hello</p>").unwrap();
        let selection = Selection::all(&doc);

        assert!(!is_mark_active(&doc, &selection, Mark::Bold));
        let next = toggle_mark(&doc, &selection, Mark::Bold);
        assert_eq!(
            next.leaf(&Path::new([0, 0])),
            Some(&Text::new("Hello").with_mark(Mark::Bold))
        );
        assert!(is_mark_active(&next, &selection, Mark::Bold));
    }

    #[test]
    fn test_mixed_selection_clears_first() {
        let doc = parse("<p><em>a</em>b</p>").unwrap();
        let selection = Selection::all(&doc);
        assert!(is_mark_active(&doc, &selection, Mark::Italic));

        let cleared = toggle_mark(&doc, &selection, Mark::Italic);
        assert!(cleared.blocks()[0].texts().all(|text| !text.italic));

        let set = toggle_mark(&cleared, &selection, Mark::Italic);
        assert!(set.blocks()[0].texts().all(|text| text.italic));
    }

    #[test]
    fn test_other_marks_untouched() {
        let doc = parse("<p><u>x</u></p>").unwrap();
        let next = toggle_mark(&doc, &Selection::all(&doc), Mark::Bold);
        let leaf = next.leaf(&Path::new([0, 0])).unwrap();
        assert!(leaf.bold && leaf.underline && !leaf.italic);
    }

    #[test]
    fn test_only_selected_leaves_change() {
        let doc = parse("<p>a</p><ul><li>b</li></ul>").unwrap();
        let selection = Selection::collapsed(Path::new([1, 0, 0]));
        let next = toggle_mark(&doc, &selection, Mark::Underline);

        assert!(!next.leaf(&Path::new([0, 0])).unwrap().underline);
        assert!(next.leaf(&Path::new([1, 0, 0])).unwrap().underline);
    }

    #[test]
    fn test_double_toggle_restores() {
        let doc = parse("<p>one <strong>two</strong></p><ol><li>three</li></ol>").unwrap();
        let selection = Selection::all(&doc);
        for mark in Mark::ALL {
            let once = toggle_mark(&doc, &selection, mark);
            let twice = toggle_mark(&once, &selection, mark);
            if mark == Mark::Bold {
                // mixed: first toggle clears, second sets everywhere
                assert!(twice.blocks().iter().flat_map(|b| b.texts()).all(|t| t.bold));
            } else {
                assert_eq!(twice, doc);
            }
        }
    }

    #[test]
    fn test_empty_selection_is_noop() {
        let doc = parse("<p>x</p>").unwrap();
        let selection = Selection::collapsed(Path::new([4, 0]));
        assert_eq!(toggle_mark(&doc, &selection, Mark::Bold), doc);
    }
}
