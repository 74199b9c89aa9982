use crate::visitor::{walk_block, walk_list_item, Visitor};
use quire_parser::ast::{Block, Document, ListItem, Text};
use serde::Serialize;

/// Content counts for a document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DocumentStats {
    pub paragraphs: usize,
    pub lists: usize,
    pub list_items: usize,
    pub leaves: usize,
    pub words: usize,
    pub characters: usize,
}

impl DocumentStats {
    pub fn collect(doc: &Document) -> Self {
        let mut stats = Self::default();
        stats.visit_document(doc);
        stats
    }
}

impl Visitor for DocumentStats {
    fn visit_block(&mut self, block: &Block) {
        match block {
            Block::Paragraph { .. } => self.paragraphs += 1,
            Block::BulletedList { .. } | Block::NumberedList { .. } => self.lists += 1,
            Block::ListItem(_) => {}
        }
        walk_block(self, block);
    }

    fn visit_list_item(&mut self, item: &ListItem) {
        self.list_items += 1;
        walk_list_item(self, item);
    }

    fn visit_text(&mut self, text: &Text) {
        self.leaves += 1;
        self.words += text.content.split_whitespace().count();
        self.characters += text.content.chars().count();
    }
}
