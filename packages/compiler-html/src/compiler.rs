use quire_common::{walk_list_item, Visitor};
use quire_parser::ast::*;
use serde::{Deserialize, Serialize};

/// Options for HTML compilation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompileOptions {
    /// One block per line, list items indented
    pub pretty: bool,
    /// Indentation string
    pub indent: String,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            pretty: false,
            indent: "  ".to_string(),
        }
    }
}

struct Context {
    options: CompileOptions,
    depth: usize,
    buffer: String,
}

impl Context {
    fn new(options: CompileOptions) -> Self {
        Self {
            options,
            depth: 0,
            buffer: String::new(),
        }
    }

    fn add(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    fn start_line(&mut self) {
        if self.options.pretty {
            for _ in 0..self.depth {
                self.buffer.push_str(&self.options.indent);
            }
        }
    }

    fn end_line(&mut self) {
        if self.options.pretty {
            self.add("\n");
        }
    }

    fn indent(&mut self) {
        self.depth += 1;
    }

    fn dedent(&mut self) {
        if self.depth > 0 {
            self.depth -= 1;
        }
    }

    fn get_output(self) -> String {
        self.buffer
    }

    fn compile_list(&mut self, tag: &str, items: &[ListItem]) {
        self.start_line();
        self.add(&format!("<{}>", tag));
        self.end_line();
        self.indent();
        for item in items {
            self.visit_list_item(item);
        }
        self.dedent();
        self.start_line();
        self.add(&format!("</{}>", tag));
        self.end_line();
    }
}

impl Visitor for Context {
    fn visit_block(&mut self, block: &Block) {
        match block {
            Block::Paragraph { align, children } => {
                self.start_line();
                match align.as_css() {
                    Some(value) => self.add(&format!("<p style=\"text-align:{}\">", value)),
                    None => self.add("<p>"),
                }
                for text in children {
                    self.visit_text(text);
                }
                self.add("</p>");
                self.end_line();
            }
            Block::ListItem(item) => self.visit_list_item(item),
            Block::BulletedList { children } => self.compile_list("ul", children),
            Block::NumberedList { children } => self.compile_list("ol", children),
        }
    }

    fn visit_list_item(&mut self, item: &ListItem) {
        self.start_line();
        self.add("<li>");
        walk_list_item(self, item);
        self.add("</li>");
        self.end_line();
    }

    fn visit_text(&mut self, text: &Text) {
        if text.content.is_empty() {
            return;
        }

        let mut html = escape_html(&text.content).replace('\n', "<br>");
        if text.bold {
            html = format!("<strong>{}</strong>", html);
        }
        if text.italic {
            html = format!("<em>{}</em>", html);
        }
        if text.underline {
            html = format!("<u>{}</u>", html);
        }
        self.add(&html);
    }
}

/// Compile a document to structural HTML.
///
/// The pristine empty document compiles to `<p></p>`.
pub fn compile_to_html(document: &Document, options: CompileOptions) -> String {
    if document.is_empty_paragraph() {
        return "<p></p>".to_string();
    }

    let mut ctx = Context::new(options);
    ctx.visit_document(document);

    let mut output = ctx.get_output();
    if output.ends_with('\n') {
        output.pop();
    }
    output
}

pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
