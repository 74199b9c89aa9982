//! # Edit Session Management
//!
//! An EditSession is one editor instance: the document, the host-supplied
//! selection, undo history and the listeners notified after every accepted
//! change.

use crate::commands::{toolbar_state, Command, ToolbarState};
use crate::undo_stack::{Snapshot, UndoStack};
use crate::{Document, EditorConfig, EditorError, Mutation, MutationResult, Selection};
use quire_parser::ast::Document as ContentDocument;

/// Notification sent to listeners after each accepted change
#[derive(Debug, Clone, PartialEq)]
pub struct ChangeEvent {
    pub version: u64,
    pub document: ContentDocument,

    /// Document serialized in the configured output format
    pub output: String,
}

type Listener = Box<dyn FnMut(&ChangeEvent)>;

/// Single editor instance
pub struct EditSession {
    /// Unique session identifier
    pub id: String,

    /// Document being edited
    pub document: Document,

    selection: Selection,
    history: UndoStack,
    config: EditorConfig,
    listeners: Vec<Listener>,
}

impl EditSession {
    pub fn new(id: impl Into<String>, document: Document, config: EditorConfig) -> Self {
        let selection = Selection::all(document.content());
        Self {
            id: id.into(),
            document,
            selection,
            history: UndoStack::with_max_levels(config.undo_levels),
            config,
            listeners: Vec::new(),
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn content(&self) -> &ContentDocument {
        self.document.content()
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Update selection (owned by the host)
    pub fn set_selection(&mut self, selection: Selection) {
        self.selection = selection;
    }

    pub fn history(&self) -> &UndoStack {
        &self.history
    }

    /// Register a change listener
    pub fn on_change(&mut self, listener: impl FnMut(&ChangeEvent) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Apply a mutation at the current selection, recording it for undo.
    ///
    /// An edit that leaves the document unchanged is neither recorded nor
    /// reported to listeners.
    pub fn apply(&mut self, mutation: Mutation) -> Result<MutationResult, EditorError> {
        let before = Snapshot::new(self.content().clone(), self.selection.clone())
            .with_description(mutation.description());
        let version = self.document.version;

        let result = self.document.apply(&mutation, &self.selection)?;
        self.selection = result.selection.clone();
        if result.version == version {
            return Ok(result);
        }

        self.history.record(before);
        self.notify();

        Ok(result)
    }

    /// Run a named toolbar command
    pub fn execute(&mut self, name: &str) -> Result<MutationResult, EditorError> {
        let command: Command = name.parse()?;
        self.run(command)
    }

    pub fn run(&mut self, command: Command) -> Result<MutationResult, EditorError> {
        self.apply(command.to_mutation())
    }

    /// Group the following edits into one undo step. Ignored while a batch is
    /// already open.
    pub fn begin_batch(&mut self, description: impl Into<String>) {
        if self.history.is_batching() {
            return;
        }
        self.history.begin_batch();
        self.history.set_batch_description(description);
    }

    pub fn end_batch(&mut self) {
        self.history.end_batch();
    }

    /// Returns false when there is nothing to undo
    pub fn undo(&mut self) -> bool {
        let current = Snapshot::new(self.content().clone(), self.selection.clone());
        match self.history.undo(current) {
            Some(previous) => {
                self.restore(previous);
                true
            }
            None => false,
        }
    }

    /// Returns false when there is nothing to redo
    pub fn redo(&mut self) -> bool {
        let current = Snapshot::new(self.content().clone(), self.selection.clone());
        match self.history.redo(current) {
            Some(next) => {
                self.restore(next);
                true
            }
            None => false,
        }
    }

    /// Return to the initial document and forget history
    pub fn reset(&mut self) -> Result<MutationResult, EditorError> {
        let result = self.apply(Mutation::Reset)?;
        self.history.clear();
        Ok(result)
    }

    pub fn toolbar(&self) -> ToolbarState {
        toolbar_state(self.content(), &self.selection)
    }

    /// Current document in the configured output format
    pub fn output(&self) -> String {
        self.document
            .render(self.config.output_format, &self.config.html)
    }

    fn restore(&mut self, snapshot: Snapshot) {
        self.document.replace(snapshot.document);
        self.selection = snapshot.selection;
        self.notify();
    }

    fn notify(&mut self) {
        if self.listeners.is_empty() {
            return;
        }

        let event = ChangeEvent {
            version: self.document.version,
            document: self.content().clone(),
            output: self.output(),
        };
        for listener in &mut self.listeners {
            listener(&event);
        }
    }
}
