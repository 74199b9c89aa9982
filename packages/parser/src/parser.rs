use crate::ast::*;
use crate::error::{ParseError, ParseResult};
use crate::tokenizer::{decode_entities, tokenize, Tag, Token};
use std::ops::Range;

/// Parse an HTML seed into a document.
///
/// Blank input yields [`Document::new`]. Text outside of any block is
/// wrapped in an unaligned paragraph.
pub fn parse(source: &str) -> ParseResult<Document> {
    Parser::new(source).parse_document()
}

/// Formatting flags active while descending through inline tags
#[derive(Debug, Clone, Copy, Default)]
struct Marks {
    bold: bool,
    italic: bool,
    underline: bool,
}

impl Marks {
    fn with(mut self, mark: Mark) -> Self {
        match mark {
            Mark::Bold => self.bold = true,
            Mark::Italic => self.italic = true,
            Mark::Underline => self.underline = true,
        }
        self
    }

    fn text(&self, content: String) -> Text {
        Text {
            content,
            bold: self.bold,
            italic: self.italic,
            underline: self.underline,
        }
    }
}

/// Parser for the editor's HTML subset
pub struct Parser<'src> {
    tokens: Vec<(Token<'src>, Range<usize>)>,
    pos: usize,
    source_len: usize,
}

impl<'src> Parser<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            tokens: tokenize(source),
            pos: 0,
            source_len: source.len(),
        }
    }

    /// Parse a complete document
    pub fn parse_document(&mut self) -> ParseResult<Document> {
        let mut blocks = Vec::new();
        let mut loose: Vec<Text> = Vec::new();

        while let Some((token, span)) = self.peek().cloned() {
            match token {
                Token::OpenTag(tag) if is_block_tag(&tag) => {
                    Self::flush_loose(&mut loose, &mut blocks);
                    self.advance();
                    if let Some(block) = self.parse_block(&tag, span)? {
                        blocks.push(block);
                    }
                }
                Token::Text(raw) if loose.is_empty() && raw.trim().is_empty() => {
                    self.advance();
                }
                Token::CloseTag(name) => {
                    return Err(ParseError::unexpected_token(
                        span,
                        "block element",
                        format!("</{}>", name),
                    ));
                }
                _ => {
                    let mut run = self.parse_inlines(None, Marks::default())?;
                    loose.append(&mut run);
                }
            }
        }

        Self::flush_loose(&mut loose, &mut blocks);

        if blocks.is_empty() {
            return Ok(Document::new());
        }

        Ok(Document::from_blocks(blocks)?)
    }

    /// Wrap pending top-level inline content into a paragraph
    fn flush_loose(loose: &mut Vec<Text>, blocks: &mut Vec<Block>) {
        if loose.is_empty() {
            return;
        }
        let run = std::mem::take(loose);
        if run.iter().any(|text| !text.content.trim().is_empty()) {
            blocks.push(Block::paragraph(run));
        }
    }

    /// Parse the body of a block whose open tag was just consumed
    fn parse_block(&mut self, tag: &Tag<'src>, span: Range<usize>) -> ParseResult<Option<Block>> {
        if tag.is("p") {
            let align = tag
                .attribute("style")
                .and_then(text_align)
                .unwrap_or_default();
            let children = self.parse_block_inlines(tag)?;
            return Ok(Some(Block::Paragraph { align, children }));
        }

        if tag.is("li") {
            let align = tag
                .attribute("style")
                .and_then(text_align)
                .unwrap_or_default();
            let children = self.parse_block_inlines(tag)?;
            return Ok(Some(Block::ListItem(ListItem { align, children })));
        }

        let kind = if tag.is("ul") {
            ListKind::Bulleted
        } else if tag.is("ol") {
            ListKind::Numbered
        } else {
            return Err(ParseError::unsupported_tag(span, tag.name));
        };

        if tag.self_closing {
            return Ok(None);
        }

        let items = self.parse_list_items(tag.name)?;
        if items.is_empty() {
            return Ok(None);
        }

        Ok(Some(Block::list(kind, items)))
    }

    fn parse_block_inlines(&mut self, tag: &Tag<'src>) -> ParseResult<Vec<Text>> {
        let mut children = if tag.self_closing {
            Vec::new()
        } else {
            self.parse_inlines(Some(tag.name), Marks::default())?
        };
        if children.is_empty() {
            children.push(Text::default());
        }
        Ok(children)
    }

    /// Parse `<li>` children until the list's close tag
    fn parse_list_items(&mut self, list_tag: &str) -> ParseResult<Vec<ListItem>> {
        let mut items = Vec::new();

        loop {
            let Some((token, span)) = self.peek().cloned() else {
                return Err(ParseError::unexpected_eof(
                    self.source_len,
                    format!("</{}>", list_tag),
                ));
            };

            match token {
                Token::Text(raw) if raw.trim().is_empty() => {
                    self.advance();
                }
                Token::OpenTag(tag) if tag.is("li") => {
                    self.advance();
                    let align = tag
                        .attribute("style")
                        .and_then(text_align)
                        .unwrap_or_default();
                    let children = self.parse_block_inlines(&tag)?;
                    items.push(ListItem { align, children });
                }
                Token::CloseTag(name) if name.eq_ignore_ascii_case(list_tag) => {
                    self.advance();
                    return Ok(items);
                }
                other => {
                    return Err(ParseError::unexpected_token(
                        span,
                        "<li>",
                        Self::format_token(&other),
                    ));
                }
            }
        }
    }

    /// Parse inline content.
    ///
    /// With `closing = Some(name)` this consumes through `</name>`. With
    /// `None` it stops before the next block-level tag or at end of input.
    fn parse_inlines(&mut self, closing: Option<&str>, marks: Marks) -> ParseResult<Vec<Text>> {
        let mut out = Vec::new();

        loop {
            let Some((token, span)) = self.peek().cloned() else {
                return match closing {
                    Some(name) => Err(ParseError::unexpected_eof(
                        self.source_len,
                        format!("</{}>", name),
                    )),
                    None => Ok(out),
                };
            };

            match token {
                Token::Text(raw) => {
                    self.advance();
                    out.push(marks.text(decode_entities(raw)));
                }
                Token::LessThan => {
                    self.advance();
                    out.push(marks.text("<".to_string()));
                }
                Token::CloseTag(name) => {
                    match closing {
                        Some(expected) if name.eq_ignore_ascii_case(expected) => {
                            self.advance();
                            return Ok(out);
                        }
                        Some(expected) => {
                            return Err(ParseError::unexpected_token(
                                span,
                                format!("</{}>", expected),
                                format!("</{}>", name),
                            ));
                        }
                        None => return Ok(out),
                    }
                }
                Token::OpenTag(tag) if is_block_tag(&tag) => {
                    if closing.is_none() {
                        return Ok(out);
                    }
                    return Err(ParseError::unsupported_tag(span, tag.name));
                }
                Token::OpenTag(tag) => {
                    self.advance();
                    if tag.is("br") {
                        out.push(marks.text("\n".to_string()));
                        continue;
                    }

                    let inner = match inline_mark(&tag) {
                        Some(InlineTag::Mark(mark)) => marks.with(mark),
                        Some(InlineTag::Transparent) => marks,
                        None => return Err(ParseError::unsupported_tag(span, tag.name)),
                    };

                    if !tag.self_closing {
                        let mut nested = self.parse_inlines(Some(tag.name), inner)?;
                        out.append(&mut nested);
                    }
                }
            }
        }
    }

    fn peek(&self) -> Option<&(Token<'src>, Range<usize>)> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<&(Token<'src>, Range<usize>)> {
        let token = self.tokens.get(self.pos);
        self.pos += 1;
        token
    }

    /// Format a token for display in error messages
    fn format_token(token: &Token) -> String {
        match token {
            Token::OpenTag(tag) => format!("<{}>", tag.name),
            Token::CloseTag(name) => format!("</{}>", name),
            Token::Text(raw) => format!("text {:?}", raw),
            Token::LessThan => "'<'".to_string(),
        }
    }
}

enum InlineTag {
    Mark(Mark),
    Transparent,
}

fn inline_mark(tag: &Tag) -> Option<InlineTag> {
    if tag.is("strong") || tag.is("b") {
        Some(InlineTag::Mark(Mark::Bold))
    } else if tag.is("em") || tag.is("i") {
        Some(InlineTag::Mark(Mark::Italic))
    } else if tag.is("u") {
        Some(InlineTag::Mark(Mark::Underline))
    } else if tag.is("span") {
        Some(InlineTag::Transparent)
    } else {
        None
    }
}

fn is_block_tag(tag: &Tag) -> bool {
    ["p", "li", "ul", "ol"].iter().any(|name| tag.is(name))
}

/// Extract `text-align` from an inline style attribute
fn text_align(style: &str) -> Option<Alignment> {
    style.split(';').find_map(|declaration| {
        let (property, value) = declaration.split_once(':')?;
        if property.trim().eq_ignore_ascii_case("text-align") {
            value.parse().ok()
        } else {
            None
        }
    })
}
