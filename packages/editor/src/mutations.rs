//! # Mutations
//!
//! Serializable edit intents. Every change to a document goes through a
//! [`Mutation`], which makes edits scriptable and gives the undo stack a
//! single entry point.
//!
//! ## Semantics
//!
//! ### Toggles
//! - Resolve against the selection at the time they are applied
//! - `ToggleBlock` also returns the selection remapped into the new tree
//!
//! ### UpdateText
//! - Atomic replacement of one leaf's content, marks untouched
//!
//! ### Reset
//! - Replace the document with a single empty paragraph
//!
//! Every mutation validates the resulting tree. A failed mutation produces
//! no change.

use crate::blocks::{try_toggle_align, try_toggle_block, BlockFormat};
use crate::marks::try_toggle_mark;
use crate::selection::Selection;
use crate::transforms::Edit;
use quire_parser::ast::{Alignment, Document, Mark, Path};
use quire_parser::StructureError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Mutation {
    ToggleMark { mark: Mark },

    ToggleAlign { align: Alignment },

    ToggleBlock { format: BlockFormat },

    /// Replace the content of the leaf at `path`
    UpdateText { path: Path, content: String },

    Reset,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MutationError {
    #[error("Node not found: {0}")]
    NodeNotFound(Path),

    #[error("Node at {0} is not text")]
    NotText(Path),

    #[error("Invalid structure: {0}")]
    InvalidStructure(#[from] StructureError),
}

/// Result of applying a mutation to an editor document
#[derive(Debug, Clone, PartialEq)]
pub struct MutationResult {
    /// Document version after the mutation
    pub version: u64,

    /// Selection remapped into the new tree
    pub selection: Selection,
}

impl Mutation {
    /// Apply to a document, returning the new document and selection.
    ///
    /// The input document is never modified.
    pub fn apply(&self, doc: &Document, selection: &Selection) -> Result<Edit, MutationError> {
        self.validate(doc)?;

        match self {
            Mutation::ToggleMark { mark } => {
                let document = try_toggle_mark(doc, selection, *mark)?;
                Ok(Edit::new(document, selection.clone()))
            }

            Mutation::ToggleAlign { align } => {
                let document = try_toggle_align(doc, selection, *align)?;
                Ok(Edit::new(document, selection.clone()))
            }

            Mutation::ToggleBlock { format } => try_toggle_block(doc, selection, *format),

            Mutation::UpdateText { path, content } => {
                let mut document = doc.clone();
                if let Some(leaf) = document.leaf_mut(path) {
                    leaf.content = content.clone();
                }
                document.validate()?;
                Ok(Edit::new(document, selection.clone()))
            }

            Mutation::Reset => Ok(Edit::new(
                Document::new(),
                Selection::collapsed(Path::new([0, 0])),
            )),
        }
    }

    /// Check that the mutation can be applied to this document
    pub fn validate(&self, doc: &Document) -> Result<(), MutationError> {
        match self {
            Mutation::UpdateText { path, .. } => {
                if doc.leaf(path).is_some() {
                    return Ok(());
                }
                // distinguish a container address from a missing node
                if path.len() < 3 && doc.inlines(path).is_some() {
                    Err(MutationError::NotText(path.clone()))
                } else {
                    Err(MutationError::NodeNotFound(path.clone()))
                }
            }
            _ => Ok(()),
        }
    }

    /// Short human-readable description, used for undo history
    pub fn description(&self) -> String {
        match self {
            Mutation::ToggleMark { mark } => format!("Toggle {}", mark.as_str()),
            Mutation::ToggleAlign { align } => format!("Align {:?}", align),
            Mutation::ToggleBlock { format } => format!("Toggle {}", format),
            Mutation::UpdateText { path, .. } => format!("Edit text at {}", path),
            Mutation::Reset => "Reset".to_string(),
        }
    }
}
