//! # Quire Editor
//!
//! Formatting core for the rich-text field.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ parser: HTML / JSON seed → document tree    │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: selection-scoped formatting         │
//! │  - Marks (bold, italic, underline)          │
//! │  - Alignment and list wrapping              │
//! │  - Named toolbar commands                   │
//! │  - Undo history, sessions, change events    │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ compiler-html: tree → HTML or plain text    │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Trees are values**: every edit produces a new document
//! 2. **Fail closed**: an edit that would break the tree changes nothing
//! 3. **Selection is borrowed**: the host owns it, edits hand back a remapped one
//!
//! ## Usage
//!
//! ```rust,ignore
//! use quire_editor::{Document, EditSession, EditorConfig};
//!
//! let doc = Document::from_html("<p>Hello</p>")?;
//! let mut session = EditSession::new("form-1", doc, EditorConfig::default());
//!
//! session.on_change(|event| println!("{}", event.output));
//! session.execute("bold")?;
//! session.execute("list:bulleted")?;
//! session.undo();
//! ```

mod blocks;
mod commands;
mod config;
mod document;
mod errors;
mod marks;
mod mutations;
mod selection;
mod session;
mod transforms;
mod undo_stack;

pub use blocks::{
    is_align_active, is_block_active, toggle_align, toggle_block, try_toggle_align, try_toggle_block,
    BlockFormat,
};
pub use commands::{execute, toolbar_state, Command, ToolbarEntry, ToolbarState};
pub use config::EditorConfig;
pub use document::{Document, DocumentStorage, FileFormat};
pub use errors::EditorError;
pub use marks::{is_mark_active, toggle_mark, try_toggle_mark};
pub use mutations::{Mutation, MutationError, MutationResult};
pub use selection::{NodeMut, NodeRef, Selection};
pub use session::{ChangeEvent, EditSession};
pub use transforms::{query, transform, Edit};
pub use undo_stack::{Snapshot, UndoStack};

// Re-export common types for convenience
pub use quire_compiler_html::{CompileOptions, OutputFormat};
pub use quire_parser::ast::{
    Alignment, Block, Document as ContentDocument, ListItem, ListKind, Mark, Path, Text,
};
