use logos::{Lexer, Logos};
use std::ops::Range;

/// Token types for the HTML subset the editor reads back
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"<!--([^-]|-[^-]|--[^>])*-->")]
#[logos(skip r"<![a-zA-Z][^>]*>")]
pub enum Token<'src> {
    /// `<name attrs>` or `<name attrs />`
    #[regex(r"<[a-zA-Z][a-zA-Z0-9]*([ \t\r\n][^>]*)?/?>", open_tag)]
    OpenTag(Tag<'src>),

    /// `</name>`
    #[regex(r"</[a-zA-Z][a-zA-Z0-9]*[ \t\r\n]*>", close_tag)]
    CloseTag(&'src str),

    /// Raw character data (entities still encoded)
    #[regex(r"[^<]+", |lex| lex.slice())]
    Text(&'src str),

    /// A `<` that does not start a tag
    #[token("<")]
    LessThan,
}

/// Opening tag with its raw attribute source
#[derive(Debug, Clone, PartialEq)]
pub struct Tag<'src> {
    pub name: &'src str,
    pub attrs: &'src str,
    pub self_closing: bool,
}

impl<'src> Tag<'src> {
    pub fn is(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }

    /// Value of attribute `name`, quoted or bare
    pub fn attribute(&self, name: &str) -> Option<&'src str> {
        let mut rest = self.attrs;
        loop {
            rest = rest.trim_start();
            if rest.is_empty() {
                return None;
            }

            let key_end = rest
                .find(|c: char| c == '=' || c.is_whitespace())
                .unwrap_or(rest.len());
            let key = &rest[..key_end];
            rest = rest[key_end..].trim_start();

            let value = if let Some(after_eq) = rest.strip_prefix('=') {
                let after_eq = after_eq.trim_start();
                let (value, remaining) = match after_eq.chars().next() {
                    Some(quote @ ('"' | '\'')) => {
                        let body = &after_eq[1..];
                        let end = body.find(quote).unwrap_or(body.len());
                        (&body[..end], body.get(end + 1..).unwrap_or(""))
                    }
                    _ => {
                        let end = after_eq
                            .find(char::is_whitespace)
                            .unwrap_or(after_eq.len());
                        (&after_eq[..end], &after_eq[end..])
                    }
                };
                rest = remaining;
                value
            } else {
                ""
            };

            if key.eq_ignore_ascii_case(name) {
                return Some(value);
            }
        }
    }
}

fn open_tag<'src>(lex: &mut Lexer<'src, Token<'src>>) -> Tag<'src> {
    let slice = lex.slice();
    let inner = &slice[1..slice.len() - 1];
    let (inner, self_closing) = match inner.strip_suffix('/') {
        Some(stripped) => (stripped, true),
        None => (inner, false),
    };
    let name_end = inner
        .find(|c: char| !c.is_ascii_alphanumeric())
        .unwrap_or(inner.len());

    Tag {
        name: &inner[..name_end],
        attrs: &inner[name_end..],
        self_closing,
    }
}

fn close_tag<'src>(lex: &mut Lexer<'src, Token<'src>>) -> &'src str {
    let slice = lex.slice();
    slice[2..slice.len() - 1].trim_end()
}

/// Tokenize source, dropping anything the lexer cannot classify
pub fn tokenize(source: &str) -> Vec<(Token<'_>, Range<usize>)> {
    Token::lexer(source)
        .spanned()
        .filter_map(|(result, span)| result.ok().map(|token| (token, span)))
        .collect()
}

/// Decode the character references an editor emits
pub fn decode_entities(raw: &str) -> String {
    if !raw.contains('&') {
        return raw.to_string();
    }

    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;

    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let candidate = &rest[amp..];

        let decoded = candidate.find(';').and_then(|semi| {
            let entity = &candidate[1..semi];
            decode_entity(entity).map(|c| (c, semi + 1))
        });

        match decoded {
            Some((c, consumed)) => {
                out.push(c);
                rest = &candidate[consumed..];
            }
            None => {
                out.push('&');
                rest = &candidate[1..];
            }
        }
    }

    out.push_str(rest);
    out
}

fn decode_entity(entity: &str) -> Option<char> {
    match entity {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some('\u{a0}'),
        _ => {
            let digits = entity.strip_prefix('#')?;
            let code = match digits.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => digits.parse::<u32>().ok()?,
            };
            char::from_u32(code)
        }
    }
}
