use quire_common::{walk_block, Visitor};
use quire_parser::ast::{Document, Text};

#[derive(Default)]
struct TextCollector {
    lines: Vec<String>,
}

impl Visitor for TextCollector {
    fn visit_document(&mut self, doc: &Document) {
        for block in doc.blocks() {
            self.lines.push(String::new());
            walk_block(self, block);
        }
    }

    fn visit_text(&mut self, text: &Text) {
        if let Some(line) = self.lines.last_mut() {
            line.push_str(&text.content);
        }
    }
}

/// Plain-text join: leaf content concatenated depth-first, top-level blocks
/// separated by `\n`. Drops every mark, alignment and list boundary.
pub fn compile_to_text(document: &Document) -> String {
    let mut collector = TextCollector::default();
    collector.visit_document(document);
    collector.lines.join("\n")
}
