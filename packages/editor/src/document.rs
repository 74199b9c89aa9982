//! # Document Handle
//!
//! Editing state around one rich-text value.
//!
//! A Document can be:
//! - **Memory-backed**: seeded from a string, for forms and tests
//! - **File-backed**: loaded from a `.html` or `.json` file and saved back
//!
//! ## Lifecycle
//!
//! ```text
//! Load → Parse → Edit → Serialize → Save
//!   ↓      ↓       ↓        ↓         ↓
//! File   Tree  Mutations  HTML/text  File
//! ```

use crate::{EditorError, Mutation, MutationResult, Selection};
use quire_compiler_html::{render, CompileOptions, OutputFormat};
use quire_parser::{ast::Document as ContentDocument, parse};
use std::path::{Path, PathBuf};

/// Editable rich-text document
#[derive(Debug)]
pub struct Document {
    /// Current version number (increments on each accepted change)
    pub version: u64,

    storage: DocumentStorage,
}

/// Storage backend for document
#[derive(Debug)]
pub enum DocumentStorage {
    Memory {
        content: ContentDocument,
    },

    File {
        path: PathBuf,
        content: ContentDocument,
        dirty: bool,
    },
}

/// On-disk representation, chosen by file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Html,
    Json,
}

impl FileFormat {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => FileFormat::Json,
            _ => FileFormat::Html,
        }
    }
}

impl Document {
    /// Fresh document holding the initial empty paragraph
    pub fn new() -> Self {
        Self::from_content(ContentDocument::new())
    }

    pub fn from_content(content: ContentDocument) -> Self {
        Self {
            version: 0,
            storage: DocumentStorage::Memory { content },
        }
    }

    /// Create document from an HTML seed (memory-backed)
    pub fn from_html(source: &str) -> Result<Self, EditorError> {
        Ok(Self::from_content(parse(source)?))
    }

    /// Create document from a JSON seed (memory-backed)
    pub fn from_json(source: &str) -> Result<Self, EditorError> {
        Ok(Self::from_content(serde_json::from_str(source)?))
    }

    /// Load document from file (file-backed)
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, EditorError> {
        let path = path.into();
        let source = std::fs::read_to_string(&path)?;
        let content = match FileFormat::from_path(&path) {
            FileFormat::Json => serde_json::from_str(&source)?,
            FileFormat::Html => parse(&source)?,
        };
        tracing::debug!(path = %path.display(), "loaded document");

        Ok(Self {
            version: 0,
            storage: DocumentStorage::File {
                path,
                content,
                dirty: false,
            },
        })
    }

    pub fn content(&self) -> &ContentDocument {
        match &self.storage {
            DocumentStorage::Memory { content } => content,
            DocumentStorage::File { content, .. } => content,
        }
    }

    pub fn path(&self) -> Option<&Path> {
        match &self.storage {
            DocumentStorage::File { path, .. } => Some(path),
            DocumentStorage::Memory { .. } => None,
        }
    }

    /// Swap in new content, bumping the version
    pub fn replace(&mut self, next: ContentDocument) {
        self.version += 1;
        match &mut self.storage {
            DocumentStorage::Memory { content } => *content = next,
            DocumentStorage::File { content, dirty, .. } => {
                *content = next;
                *dirty = true;
            }
        }
    }

    /// Apply a mutation against `selection`.
    ///
    /// A rejected mutation, or one that changes nothing, leaves content and
    /// version untouched.
    pub fn apply(&mut self, mutation: &Mutation, selection: &Selection) -> Result<MutationResult, EditorError> {
        let edit = mutation.apply(self.content(), selection).map_err(|error| {
            tracing::warn!(mutation = %mutation.description(), %error, "mutation rejected");
            error
        })?;

        if edit.document == *self.content() {
            tracing::debug!(mutation = %mutation.description(), "mutation changed nothing");
        } else {
            self.replace(edit.document);
            tracing::debug!(mutation = %mutation.description(), version = self.version, "mutation applied");
        }

        Ok(MutationResult {
            version: self.version,
            selection: edit.selection,
        })
    }

    /// Check if document has unsaved changes
    pub fn is_dirty(&self) -> bool {
        match &self.storage {
            DocumentStorage::File { dirty, .. } => *dirty,
            _ => false,
        }
    }

    /// Serialize the content
    pub fn render(&self, format: OutputFormat, options: &CompileOptions) -> String {
        render(self.content(), format, options)
    }

    pub fn to_json(&self) -> Result<String, EditorError> {
        Ok(serde_json::to_string_pretty(self.content())?)
    }

    /// Save document to disk (if file-backed).
    ///
    /// `.json` files get the JSON tree, anything else structural HTML.
    pub fn save(&mut self, options: &CompileOptions) -> Result<(), EditorError> {
        let output = match self.path().map(FileFormat::from_path) {
            Some(FileFormat::Json) => self.to_json()?,
            Some(FileFormat::Html) => render(self.content(), OutputFormat::Html, options),
            None => return Err(EditorError::NotFileBacked),
        };

        if let DocumentStorage::File { path, dirty, .. } = &mut self.storage {
            std::fs::write(&*path, output)?;
            *dirty = false;
            tracing::debug!(path = %path.display(), "saved document");
        }
        Ok(())
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quire_parser::ast::{Alignment, Mark, Path as NodePath};

    #[test]
    fn test_create_memory_document() {
        let doc = Document::from_html("<p>Click me</p>").unwrap();
        assert_eq!(doc.version, 0);
        assert!(!doc.is_dirty());
        assert!(doc.path().is_none());
        assert_eq!(doc.content().blocks().len(), 1);
    }

    #[test]
    fn test_document_version_increments() {
        let mut doc = Document::from_html("<p>text</p>").unwrap();
        let selection = Selection::all(doc.content());

        let result = doc
            .apply(&Mutation::ToggleMark { mark: Mark::Bold }, &selection)
            .unwrap();
        assert_eq!(result.version, 1);
        assert_eq!(doc.version, 1);
    }

    #[test]
    fn test_rejected_mutation_keeps_version() {
        let mut doc = Document::new();
        let before = doc.content().clone();
        let mutation = Mutation::UpdateText {
            path: NodePath::new([5, 0]),
            content: "x".to_string(),
        };

        assert!(doc.apply(&mutation, &Selection::all(&before)).is_err());
        assert_eq!(doc.version, 0);
        assert_eq!(doc.content(), &before);
    }

    #[test]
    fn test_noop_mutation_keeps_version() {
        let mut doc = Document::from_html("<ul><li>item</li></ul>").unwrap();
        let selection = Selection::all(doc.content());

        let result = doc
            .apply(&Mutation::ToggleAlign { align: Alignment::Left }, &selection)
            .unwrap();
        assert_eq!(result.version, 0);
        assert_eq!(doc.version, 0);
    }

    #[test]
    fn test_invalid_json_seed() {
        assert!(matches!(Document::from_json("[]"), Err(EditorError::Json(_))));
        assert!(matches!(Document::from_html("<h2>x</h2>"), Err(EditorError::Parse(_))));
    }

    #[test]
    fn test_memory_document_cannot_save() {
        let mut doc = Document::new();
        assert!(matches!(
            doc.save(&CompileOptions::default()),
            Err(EditorError::NotFileBacked)
        ));
    }

    #[test]
    fn test_file_format_from_extension() {
        assert_eq!(FileFormat::from_path(Path::new("a.JSON")), FileFormat::Json);
        assert_eq!(FileFormat::from_path(Path::new("a.html")), FileFormat::Html);
        assert_eq!(FileFormat::from_path(Path::new("notes")), FileFormat::Html);
    }
}
