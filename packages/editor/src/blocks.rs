//! # Block Engine
//!
//! Alignment and list formatting for the blocks a selection touches.
//!
//! Alignment lives on paragraphs only. List formatting moves text
//! containers between paragraphs and list items: activating a list wraps
//! every selected container into one list of that kind (merged into an
//! adjacent list of the same kind), deactivating unwraps them back into
//! paragraphs and splits the surrounding list where needed.

use crate::mutations::MutationError;
use crate::selection::{list_items_mut, NodeMut, NodeRef, Selection};
use crate::transforms::{fail_closed, query, transform, Edit};
use quire_parser::ast::{Alignment, Block, Document, ListItem, ListKind, Path, Text};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;

/// Target block type for [`toggle_block`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlockFormat {
    Paragraph,
    BulletedList,
    NumberedList,
}

impl BlockFormat {
    pub fn list_kind(&self) -> Option<ListKind> {
        match self {
            BlockFormat::Paragraph => None,
            BlockFormat::BulletedList => Some(ListKind::Bulleted),
            BlockFormat::NumberedList => Some(ListKind::Numbered),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BlockFormat::Paragraph => "paragraph",
            BlockFormat::BulletedList => "bulleted-list",
            BlockFormat::NumberedList => "numbered-list",
        }
    }
}

impl From<ListKind> for BlockFormat {
    fn from(kind: ListKind) -> Self {
        match kind {
            ListKind::Bulleted => BlockFormat::BulletedList,
            ListKind::Numbered => BlockFormat::NumberedList,
        }
    }
}

impl fmt::Display for BlockFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BlockFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "paragraph" => Ok(BlockFormat::Paragraph),
            "bulleted-list" | "bulleted" => Ok(BlockFormat::BulletedList),
            "numbered-list" | "numbered" => Ok(BlockFormat::NumberedList),
            other => Err(format!("unknown block format '{}'", other)),
        }
    }
}

// Alignment

pub fn is_align_active(document: &Document, selection: &Selection, align: Alignment) -> bool {
    query(document, selection, |node| {
        matches!(node, NodeRef::Block(Block::Paragraph { align: current, .. }) if *current == align)
    })
}

/// Set `align` on every selected paragraph, or reset them to unset when it
/// is already active on any of them. List containers are left alone.
pub fn try_toggle_align(document: &Document, selection: &Selection, align: Alignment) -> Result<Document, MutationError> {
    let target = if is_align_active(document, selection, align) {
        Alignment::Unset
    } else {
        align
    };
    tracing::debug!(align = ?align, target = ?target, "toggle alignment");

    transform(document, selection, |node| {
        if let NodeMut::Block(Block::Paragraph { align: current, .. }) = node {
            *current = target;
        }
    })
}

pub fn toggle_align(document: &Document, selection: &Selection, align: Alignment) -> Document {
    fail_closed(document, "toggle_align", try_toggle_align(document, selection, align))
}

// Lists

/// Is `format` the block type around the selection?
///
/// For lists this asks whether a selected block is a list of that kind; for
/// paragraphs whether a selected block is a paragraph.
pub fn is_block_active(document: &Document, selection: &Selection, format: BlockFormat) -> bool {
    query(document, selection, |node| match (node, format.list_kind()) {
        (NodeRef::Block(block), Some(kind)) => block.list_kind() == Some(kind),
        (NodeRef::Block(block), None) => matches!(block, Block::Paragraph { .. }),
        _ => false,
    })
}

/// Convert the selected text containers to `format`.
///
/// When `format` is already active, or is `Paragraph`, every selected
/// container becomes a paragraph. Otherwise they are gathered into a single
/// list of the requested kind. The returned selection covers the same
/// leaves in the new tree.
pub fn try_toggle_block(document: &Document, selection: &Selection, format: BlockFormat) -> Result<Edit, MutationError> {
    let leaves = selection.leaves(document);
    let (Some(first), Some(last)) = (leaves.first(), leaves.last()) else {
        return Ok(Edit::unchanged(document, selection));
    };

    let targets: HashSet<Path> = selection.containers(document).into_iter().collect();
    let wrap = if is_block_active(document, selection, format) {
        None
    } else {
        format.list_kind()
    };
    tracing::debug!(format = %format, wrap = ?wrap, targets = targets.len(), "toggle block");

    let mut builder = Rebuild::new(wrap);
    for (index, block) in document.blocks().iter().enumerate() {
        let path = Path::new([index]);
        match block {
            Block::Paragraph { align, children } if targets.contains(&path) => {
                builder.target(path, *align, children);
            }
            Block::ListItem(item) if targets.contains(&path) => {
                builder.target(path, item.align, &item.children);
            }
            Block::BulletedList { children } | Block::NumberedList { children } => {
                let kind = if matches!(block, Block::BulletedList { .. }) {
                    ListKind::Bulleted
                } else {
                    ListKind::Numbered
                };
                let mut run = Vec::new();
                for (item_index, item) in children.iter().enumerate() {
                    let item_path = path.child(item_index);
                    if targets.contains(&item_path) {
                        builder.keep_list(kind, std::mem::take(&mut run));
                        builder.target(item_path, item.align, &item.children);
                    } else {
                        run.push(item.clone());
                    }
                }
                builder.keep_list(kind, run);
            }
            other => builder.keep(other.clone()),
        }
    }

    let (blocks, moved) = builder.finish();
    let next = Document::from_blocks(blocks)?;
    next.validate()?;

    let remap = |leaf: &Path| -> Option<Path> {
        let (index, parent) = leaf.split_last()?;
        moved.get(&parent).map(|container| container.child(index))
    };
    let remapped = match (remap(first), remap(last)) {
        (Some(start), Some(end)) if selection.is_forward() => Selection::new(start, end),
        (Some(start), Some(end)) => Selection::new(end, start),
        _ => selection.clone(),
    };

    Ok(Edit::new(next, remapped))
}

pub fn toggle_block(document: &Document, selection: &Selection, format: BlockFormat) -> Document {
    let result = try_toggle_block(document, selection, format).map(|edit| edit.document);
    fail_closed(document, "toggle_block", result)
}

/// Accumulates the rebuilt top-level block list
struct Rebuild {
    wrap: Option<ListKind>,
    out: Vec<Block>,
    /// Old container path to new container path
    moved: HashMap<Path, Path>,
    group: Vec<ListItem>,
    group_paths: Vec<Path>,
    group_at: Option<usize>,
}

impl Rebuild {
    fn new(wrap: Option<ListKind>) -> Self {
        Self {
            wrap,
            out: Vec::new(),
            moved: HashMap::new(),
            group: Vec::new(),
            group_paths: Vec::new(),
            group_at: None,
        }
    }

    fn keep(&mut self, block: Block) {
        self.out.push(block);
    }

    /// Keep a run of untouched items as a list of their original kind
    fn keep_list(&mut self, kind: ListKind, items: Vec<ListItem>) {
        if !items.is_empty() {
            self.out.push(Block::list(kind, items));
        }
    }

    fn target(&mut self, old: Path, align: Alignment, children: &[Text]) {
        let children = children.to_vec();
        match self.wrap {
            Some(_) => {
                self.group_at.get_or_insert(self.out.len());
                self.group_paths.push(old);
                self.group.push(ListItem { align, children });
            }
            None => {
                self.moved.insert(old, Path::new([self.out.len()]));
                self.out.push(Block::Paragraph { align, children });
            }
        }
    }

    fn finish(mut self) -> (Vec<Block>, HashMap<Path, Path>) {
        let (Some(kind), Some(at)) = (self.wrap, self.group_at) else {
            return (self.out, self.moved);
        };

        let items = std::mem::take(&mut self.group);
        self.out.insert(at, Block::list(kind, items));

        let mut index = at;
        let mut offset = 0;

        if index > 0 && self.out[index - 1].list_kind() == Some(kind) {
            let block = self.out.remove(index);
            if let (Some(previous), Some(mut items)) = (list_items_mut(&mut self.out[index - 1]), into_items(block)) {
                offset = previous.len();
                previous.append(&mut items);
            }
            index -= 1;
        }

        if self.out.get(index + 1).and_then(Block::list_kind) == Some(kind) {
            let next = self.out.remove(index + 1);
            if let (Some(current), Some(mut items)) = (list_items_mut(&mut self.out[index]), into_items(next)) {
                current.append(&mut items);
            }
        }

        for (position, old) in self.group_paths.drain(..).enumerate() {
            self.moved.insert(old, Path::new([index, offset + position]));
        }

        (self.out, self.moved)
    }
}

fn into_items(block: Block) -> Option<Vec<ListItem>> {
    match block {
        Block::BulletedList { children } | Block::NumberedList { children } => Some(children),
        _ => None,
    }
}
