//! Serializers turning a document into the string the backend stores.
//!
//! Two output contracts exist. Structural HTML keeps every mark, alignment
//! and list; plain text keeps only the characters. A deployment picks one
//! through [`OutputFormat`].

mod compiler;
mod text;


pub use compiler::{compile_to_html, escape_html, CompileOptions};
pub use text::compile_to_text;

use quire_parser::ast::Document;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Output contract for serialized content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Html,
    Text,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "html" => Ok(OutputFormat::Html),
            "text" | "plain" | "txt" => Ok(OutputFormat::Text),
            other => Err(format!("Unknown output format: {}", other)),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Html => write!(f, "html"),
            OutputFormat::Text => write!(f, "text"),
        }
    }
}

/// Serialize `doc` in the given format
pub fn render(doc: &Document, format: OutputFormat, options: &CompileOptions) -> String {
    match format {
        OutputFormat::Html => compile_to_html(doc, options.clone()),
        OutputFormat::Text => compile_to_text(doc),
    }
}
