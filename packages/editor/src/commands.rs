//! # Command Surface
//!
//! The fixed set of named toolbar commands. Each command pairs an activity
//! query with the mutation that toggles it.
//!
//! | name            | query             | mutation                  |
//! |-----------------|-------------------|---------------------------|
//! | `bold`          | `is_mark_active`  | `ToggleMark`              |
//! | `align:center`  | `is_align_active` | `ToggleAlign`             |
//! | `list:numbered` | `is_block_active` | `ToggleBlock`             |

use crate::blocks::{is_align_active, is_block_active, BlockFormat};
use crate::marks::is_mark_active;
use crate::mutations::Mutation;
use crate::selection::Selection;
use crate::transforms::Edit;
use crate::EditorError;
use quire_parser::ast::{Alignment, Document, ListKind, Mark};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Command {
    Mark(Mark),
    Align(Alignment),
    List(ListKind),
}

impl Command {
    /// Every command, in toolbar order
    pub const ALL: [Command; 9] = [
        Command::Mark(Mark::Bold),
        Command::Mark(Mark::Italic),
        Command::Mark(Mark::Underline),
        Command::Align(Alignment::Left),
        Command::Align(Alignment::Center),
        Command::Align(Alignment::Right),
        Command::Align(Alignment::Justify),
        Command::List(ListKind::Bulleted),
        Command::List(ListKind::Numbered),
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Command::Mark(Mark::Bold) => "bold",
            Command::Mark(Mark::Italic) => "italic",
            Command::Mark(Mark::Underline) => "underline",
            Command::Align(Alignment::Left) => "align:left",
            Command::Align(Alignment::Center) => "align:center",
            Command::Align(Alignment::Right) => "align:right",
            Command::Align(Alignment::Justify) => "align:justify",
            Command::Align(Alignment::Unset) => "align:unset",
            Command::List(ListKind::Bulleted) => "list:bulleted",
            Command::List(ListKind::Numbered) => "list:numbered",
        }
    }

    /// Button label
    pub fn label(&self) -> &'static str {
        match self {
            Command::Mark(Mark::Bold) => "Bold",
            Command::Mark(Mark::Italic) => "Italic",
            Command::Mark(Mark::Underline) => "Underline",
            Command::Align(Alignment::Left) => "Align Left",
            Command::Align(Alignment::Center) => "Align Center",
            Command::Align(Alignment::Right) => "Align Right",
            Command::Align(Alignment::Justify) => "Justify",
            Command::Align(Alignment::Unset) => "Clear Alignment",
            Command::List(ListKind::Bulleted) => "Bulleted List",
            Command::List(ListKind::Numbered) => "Numbered List",
        }
    }

    pub fn is_active(&self, doc: &Document, selection: &Selection) -> bool {
        match *self {
            Command::Mark(mark) => is_mark_active(doc, selection, mark),
            Command::Align(align) => is_align_active(doc, selection, align),
            Command::List(kind) => is_block_active(doc, selection, BlockFormat::from(kind)),
        }
    }

    pub fn to_mutation(&self) -> Mutation {
        match *self {
            Command::Mark(mark) => Mutation::ToggleMark { mark },
            Command::Align(align) => Mutation::ToggleAlign { align },
            Command::List(kind) => Mutation::ToggleBlock {
                format: BlockFormat::from(kind),
            },
        }
    }

    pub fn apply(&self, doc: &Document, selection: &Selection) -> Result<Edit, EditorError> {
        Ok(self.to_mutation().apply(doc, selection)?)
    }
}

impl FromStr for Command {
    type Err = EditorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        Command::ALL
            .into_iter()
            .find(|command| command.name() == name)
            .ok_or_else(|| EditorError::UnknownCommand(s.to_string()))
    }
}

impl TryFrom<String> for Command {
    type Error = EditorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Command> for String {
    fn from(command: Command) -> Self {
        command.name().to_string()
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Active state of one toolbar button
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolbarEntry {
    pub command: Command,
    pub label: &'static str,
    pub active: bool,
}

/// Active state of every command for a selection
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ToolbarState {
    pub entries: Vec<ToolbarEntry>,
}

impl ToolbarState {
    pub fn is_active(&self, command: Command) -> bool {
        self.entries
            .iter()
            .any(|entry| entry.command == command && entry.active)
    }

    /// Names of the active commands
    pub fn active(&self) -> Vec<&'static str> {
        self.entries
            .iter()
            .filter(|entry| entry.active)
            .map(|entry| entry.command.name())
            .collect()
    }
}

pub fn toolbar_state(doc: &Document, selection: &Selection) -> ToolbarState {
    ToolbarState {
        entries: Command::ALL
            .into_iter()
            .map(|command| ToolbarEntry {
                command,
                label: command.label(),
                active: command.is_active(doc, selection),
            })
            .collect(),
    }
}

/// Parse a command name and apply it
pub fn execute(name: &str, doc: &Document, selection: &Selection) -> Result<Edit, EditorError> {
    let command: Command = name.parse()?;
    tracing::debug!(command = command.name(), "execute");
    command.apply(doc, selection)
}
