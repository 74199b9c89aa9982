pub mod apply;
pub mod init;
pub mod render;
pub mod toolbar;

pub use apply::{apply, ApplyArgs};
pub use init::{init, InitArgs};
pub use render::{render, RenderArgs};
pub use toolbar::{toolbar, ToolbarArgs};

use anyhow::{anyhow, Context, Result};
use quire_editor::{ContentDocument, Document, EditorError, Path as NodePath, Selection};
use std::path::Path;

/// Load a document, rendering seed parse errors against their source
pub fn load_document(path: &Path) -> Result<Document> {
    match Document::load(path) {
        Ok(document) => Ok(document),
        Err(EditorError::Parse(err)) => {
            use quire_parser::error::pretty;
            let source = std::fs::read_to_string(path)?;
            let file_name = path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("unknown");
            Err(anyhow!("\n{}", pretty::format_error(&err, file_name, &source)))
        }
        Err(err) => Err(err).with_context(|| format!("Failed to load {}", path.display())),
    }
}

/// Parse a `--select` value: `all`, a single path (`0.1`) or a range
/// (`0.0:2.1`)
pub fn parse_selection(value: Option<&str>, document: &ContentDocument) -> Result<Selection> {
    let value = match value.map(str::trim) {
        None | Some("all") => return Ok(Selection::all(document)),
        Some(value) => value,
    };

    let parse_path = |part: &str| part.parse::<NodePath>().map_err(|e| anyhow!(e));
    match value.split_once(':') {
        Some((anchor, focus)) => Ok(Selection::new(parse_path(anchor)?, parse_path(focus)?)),
        None => Ok(Selection::collapsed(parse_path(value)?)),
    }
}
