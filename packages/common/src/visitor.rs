use quire_parser::ast::*;

/// Visitor pattern for traversing document nodes immutably
///
/// This trait provides default implementations that walk the entire tree.
/// Override specific visit_* methods to perform custom actions on nodes.
pub trait Visitor: Sized {
    fn visit_document(&mut self, doc: &Document) {
        walk_document(self, doc);
    }

    fn visit_block(&mut self, block: &Block) {
        walk_block(self, block);
    }

    fn visit_list_item(&mut self, item: &ListItem) {
        walk_list_item(self, item);
    }

    fn visit_text(&mut self, _text: &Text) {
        // Leaf node, no children to walk
    }
}

// Default walk implementations

pub fn walk_document<V: Visitor>(visitor: &mut V, doc: &Document) {
    for block in doc.blocks() {
        visitor.visit_block(block);
    }
}

pub fn walk_block<V: Visitor>(visitor: &mut V, block: &Block) {
    match block {
        Block::Paragraph { children, .. } => {
            for text in children {
                visitor.visit_text(text);
            }
        }
        Block::ListItem(item) => {
            visitor.visit_list_item(item);
        }
        Block::BulletedList { children } | Block::NumberedList { children } => {
            for item in children {
                visitor.visit_list_item(item);
            }
        }
    }
}

pub fn walk_list_item<V: Visitor>(visitor: &mut V, item: &ListItem) {
    for text in &item.children {
        visitor.visit_text(text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct LeafCollector {
        leaves: Vec<String>,
        items: usize,
    }

    impl Visitor for LeafCollector {
        fn visit_list_item(&mut self, item: &ListItem) {
            self.items += 1;
            walk_list_item(self, item);
        }

        fn visit_text(&mut self, text: &Text) {
            self.leaves.push(text.content.clone());
        }
    }

    #[test]
    fn test_walks_leaves_in_order() {
        let doc = Document::from_blocks(vec![
            Block::paragraph(vec![Text::new("a"), Text::new("b")]),
            Block::list(
                ListKind::Numbered,
                vec![ListItem::new(vec![Text::new("c")]), ListItem::new(vec![Text::new("d")])],
            ),
            Block::ListItem(ListItem::new(vec![Text::new("e")])),
        ])
        .unwrap();

        let mut collector = LeafCollector {
            leaves: Vec::new(),
            items: 0,
        };
        collector.visit_document(&doc);

        assert_eq!(collector.leaves, vec!["a", "b", "c", "d", "e"]);
        assert_eq!(collector.items, 3);
    }
}
