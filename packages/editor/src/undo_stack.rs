//! # Undo/Redo Stack
//!
//! Edit history as a stack of document snapshots.
//!
//! ## Design
//!
//! - Before an edit is committed, the state it replaces is recorded
//! - Undo swaps the current state for the most recent snapshot and keeps the
//!   current state for redo
//! - New edits clear the redo stack
//! - Batches group several edits into one undo step
//!
//! ## Example
//!
//! ```rust,ignore
//! let mut stack = UndoStack::new();
//!
//! stack.record(Snapshot::new(doc.clone(), selection.clone()));
//! let doc = toggle_mark(&doc, &selection, Mark::Bold);
//!
//! let previous = stack.undo(Snapshot::new(doc, selection)).unwrap();
//! ```

use crate::selection::Selection;
use quire_parser::ast::Document;

/// Document and selection at one point in history
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub document: Document,
    pub selection: Selection,

    /// Description of the edit that moved away from this state
    pub description: Option<String>,
}

impl Snapshot {
    pub fn new(document: Document, selection: Selection) -> Self {
        Self {
            document,
            selection,
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Undo/redo stack for document editing
#[derive(Debug)]
pub struct UndoStack {
    /// States before each applied edit (most recent last)
    undo_stack: Vec<Snapshot>,

    /// States replaced by undo (most recent last)
    redo_stack: Vec<Snapshot>,

    /// Maximum number of undo levels (0 = unlimited)
    max_levels: usize,

    /// Open batch; holds the state before its first edit once one is recorded
    current_batch: Option<Option<Snapshot>>,

    batch_description: Option<String>,
}

impl UndoStack {
    /// Create a new undo stack with default max levels (100)
    pub fn new() -> Self {
        Self::with_max_levels(100)
    }

    pub fn with_max_levels(max_levels: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_levels,
            current_batch: None,
            batch_description: None,
        }
    }

    /// Record the state an edit is about to replace
    pub fn record(&mut self, before: Snapshot) {
        self.redo_stack.clear();
        match &mut self.current_batch {
            Some(start @ None) => *start = Some(before),
            Some(Some(_)) => {}
            None => self.push_snapshot(before),
        }
    }

    /// Start a batch of edits (undone/redone together). No-op while a batch
    /// is already open.
    pub fn begin_batch(&mut self) {
        if self.is_batching() {
            return;
        }
        self.current_batch = Some(None);
        self.batch_description = None;
    }

    /// End the current batch and push it to the undo stack
    pub fn end_batch(&mut self) {
        if let Some(Some(mut start)) = self.current_batch.take() {
            if let Some(description) = self.batch_description.take() {
                start.description = Some(description);
            }
            self.push_snapshot(start);
        }
        self.batch_description = None;
    }

    pub fn is_batching(&self) -> bool {
        self.current_batch.is_some()
    }

    /// Set description for current batch (if batching)
    pub fn set_batch_description(&mut self, description: impl Into<String>) {
        if self.current_batch.is_some() {
            self.batch_description = Some(description.into());
        }
    }

    fn push_snapshot(&mut self, snapshot: Snapshot) {
        self.undo_stack.push(snapshot);

        if self.max_levels > 0 && self.undo_stack.len() > self.max_levels {
            self.undo_stack.remove(0);
        }

        self.redo_stack.clear();
    }

    /// Step back: returns the state to restore, keeping `current` for redo
    pub fn undo(&mut self, current: Snapshot) -> Option<Snapshot> {
        let previous = self.undo_stack.pop()?;
        tracing::debug!(description = ?previous.description, "undo");

        self.redo_stack.push(Snapshot {
            description: previous.description.clone(),
            ..current
        });
        Some(previous)
    }

    /// Step forward: returns the state to restore, keeping `current` for undo
    pub fn redo(&mut self, current: Snapshot) -> Option<Snapshot> {
        let next = self.redo_stack.pop()?;
        tracing::debug!(description = ?next.description, "redo");

        self.undo_stack.push(Snapshot {
            description: next.description.clone(),
            ..current
        });
        Some(next)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_levels(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_levels(&self) -> usize {
        self.redo_stack.len()
    }

    /// Clear all undo/redo history
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.current_batch = None;
        self.batch_description = None;
    }

    /// Get description of the next undo operation
    pub fn undo_description(&self) -> Option<&str> {
        self.undo_stack
            .last()
            .and_then(|snapshot| snapshot.description.as_deref())
    }

    /// Get description of the next redo operation
    pub fn redo_description(&self) -> Option<&str> {
        self.redo_stack
            .last()
            .and_then(|snapshot| snapshot.description.as_deref())
    }
}

impl Default for UndoStack {
    fn default() -> Self {
        Self::new()
    }
}
