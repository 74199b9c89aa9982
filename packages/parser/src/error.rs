use crate::ast::Path;
use std::ops::Range;
use thiserror::Error;

pub type ParseResult<T> = Result<T, ParseError>;

/// Violations of the document tree invariants
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StructureError {
    #[error("Document must contain at least one block")]
    EmptyDocument,

    #[error("List at block {0} has no items")]
    EmptyList(usize),

    #[error("Block at {0} has no text leaves")]
    EmptyBlock(Path),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("Unexpected token at {span:?}: expected {expected}, found {found}")]
    UnexpectedToken {
        span: Range<usize>,
        expected: String,
        found: String,
    },

    #[error("Unexpected end of input at {pos}: expected {expected}")]
    UnexpectedEof { pos: usize, expected: String },

    #[error("Unsupported tag <{tag}> at {span:?}")]
    UnsupportedTag { span: Range<usize>, tag: String },

    #[error("Invalid document: {0}")]
    Structure(#[from] StructureError),
}

impl ParseError {
    pub fn unexpected_token(span: Range<usize>, expected: impl Into<String>, found: impl Into<String>) -> Self {
        Self::UnexpectedToken {
            span,
            expected: expected.into(),
            found: found.into(),
        }
    }

    pub fn unexpected_eof(pos: usize, expected: impl Into<String>) -> Self {
        Self::UnexpectedEof {
            pos,
            expected: expected.into(),
        }
    }

    pub fn unsupported_tag(span: Range<usize>, tag: impl Into<String>) -> Self {
        Self::UnsupportedTag {
            span,
            tag: tag.into(),
        }
    }

    /// Source range the error points at, if any
    pub fn span(&self) -> Option<Range<usize>> {
        match self {
            ParseError::UnexpectedToken { span, .. }
            | ParseError::UnsupportedTag { span, .. } => Some(span.clone()),
            ParseError::UnexpectedEof { pos, .. } => Some(*pos..*pos),
            ParseError::Structure(_) => None,
        }
    }
}

/// Pretty-print errors with source context using ariadne
#[cfg(feature = "pretty-errors")]
pub mod pretty {
    use super::ParseError;
    use ariadne::{Color, Label, Report, ReportKind, Source};

    pub fn format_error(error: &ParseError, filename: &str, source: &str) -> String {
        let span = error
            .span()
            .unwrap_or_else(|| source.len().saturating_sub(1)..source.len());
        // ariadne wants a non-empty label range
        let span = if span.is_empty() {
            let end = (span.start + 1).min(source.len());
            end.saturating_sub(1)..end
        } else {
            span
        };

        let label_message = match error {
            ParseError::UnexpectedToken { expected, .. } | ParseError::UnexpectedEof { expected, .. } => {
                format!("expected {}", expected)
            }
            ParseError::UnsupportedTag { tag, .. } => format!("<{}> is not supported here", tag),
            ParseError::Structure(inner) => inner.to_string(),
        };

        let mut output = Vec::new();
        let report = Report::build(ReportKind::Error, filename, span.start)
            .with_message(error.to_string())
            .with_label(
                Label::new((filename, span))
                    .with_color(Color::Red)
                    .with_message(label_message),
            )
            .finish();

        if report
            .write((filename, Source::from(source)), &mut output)
            .is_err()
        {
            return error.to_string();
        }

        String::from_utf8_lossy(&output).into_owned()
    }
}
