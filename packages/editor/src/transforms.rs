//! # Tree Queries and Transforms
//!
//! The two primitives every formatting command is built from:
//!
//! - [`query`] asks whether any node the selection intersects satisfies a
//!   predicate.
//! - [`transform`] rewrites those nodes on a copy of the document and
//!   validates the result. The caller's document is never touched; a
//!   rejected result leaves the prior document as the outcome.

use crate::mutations::MutationError;
use crate::selection::{list_items_mut, NodeMut, NodeRef, Selection};
use quire_parser::ast::{Document, Path};
use serde::{Deserialize, Serialize};

/// Outcome of an edit: the new document and the selection remapped into it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edit {
    pub document: Document,
    pub selection: Selection,
}

impl Edit {
    pub fn new(document: Document, selection: Selection) -> Self {
        Self { document, selection }
    }

    /// An edit that changes nothing
    pub fn unchanged(document: &Document, selection: &Selection) -> Self {
        Self::new(document.clone(), selection.clone())
    }
}

/// True if any intersected node satisfies `predicate`
pub fn query<F>(document: &Document, selection: &Selection, predicate: F) -> bool
where
    F: Fn(NodeRef<'_>) -> bool,
{
    selection.nodes(document).into_iter().any(predicate)
}

/// Apply `op` to every intersected node of a copy of `document`.
///
/// Nodes are visited bottom-up: all touched leaves, then all touched list
/// items, then the touched top-level blocks. The copy is validated before it
/// is returned.
pub fn transform<F>(document: &Document, selection: &Selection, mut op: F) -> Result<Document, MutationError>
where
    F: FnMut(NodeMut<'_>),
{
    let leaves = selection.leaves(document);
    let mut next = document.clone();

    for leaf in &leaves {
        let text = next
            .leaf_mut(leaf)
            .ok_or_else(|| MutationError::NodeNotFound(leaf.clone()))?;
        op(NodeMut::Text(text));
    }

    let mut items: Vec<(usize, usize)> = leaves
        .iter()
        .filter(|leaf| leaf.len() == 3)
        .map(|leaf| (leaf.0[0], leaf.0[1]))
        .collect();
    items.dedup();

    for (block_index, item_index) in items {
        let item = next
            .blocks_mut()
            .get_mut(block_index)
            .and_then(list_items_mut)
            .and_then(|children| children.get_mut(item_index))
            .ok_or_else(|| MutationError::NodeNotFound(Path::new([block_index, item_index])))?;
        op(NodeMut::Item(item));
    }

    let mut blocks: Vec<usize> = leaves.iter().filter_map(|leaf| leaf.0.first().copied()).collect();
    blocks.dedup();

    for block_index in blocks {
        let block = next
            .blocks_mut()
            .get_mut(block_index)
            .ok_or_else(|| MutationError::NodeNotFound(Path::new([block_index])))?;
        op(NodeMut::Block(block));
    }

    next.validate()?;
    Ok(next)
}

/// Collapse a fallible edit into its total form.
///
/// On failure the prior document is returned unchanged and the rejection is
/// logged.
pub(crate) fn fail_closed(document: &Document, operation: &str, result: Result<Document, MutationError>) -> Document {
    result.unwrap_or_else(|error| {
        tracing::warn!(operation, %error, "edit rejected, keeping prior document");
        document.clone()
    })
}
