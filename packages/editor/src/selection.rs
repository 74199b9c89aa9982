//! # Selection
//!
//! A selection is a pair of paths into the document tree. `anchor` is
//! where the selection started and `focus` where it ended; either may come
//! first in document order.
//!
//! Granularity is the leaf: a leaf that the selection touches at all is
//! selected as a whole.

use quire_parser::ast::{Block, Document, ListItem, Path, Text};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Selection {
    pub anchor: Path,
    pub focus: Path,
}

impl Selection {
    pub fn new(anchor: Path, focus: Path) -> Self {
        Self { anchor, focus }
    }

    /// Caret at a single path
    pub fn collapsed(path: Path) -> Self {
        Self {
            anchor: path.clone(),
            focus: path,
        }
    }

    /// Span every leaf of the document
    pub fn all(document: &Document) -> Self {
        let leaves = document.leaf_paths();
        match (leaves.first(), leaves.last()) {
            (Some(first), Some(last)) => Self::new(first.clone(), last.clone()),
            _ => Self::collapsed(Path::new([0, 0])),
        }
    }

    /// Span every leaf of the top-level block at `index`
    pub fn block(document: &Document, index: usize) -> Option<Self> {
        let prefix = Path::new([index]);
        let leaves: Vec<Path> = document
            .leaf_paths()
            .into_iter()
            .filter(|path| path.starts_with(&prefix))
            .collect();

        Some(Self::new(leaves.first()?.clone(), leaves.last()?.clone()))
    }

    pub fn is_collapsed(&self) -> bool {
        self.anchor == self.focus
    }

    /// True when the anchor does not come after the focus
    pub fn is_forward(&self) -> bool {
        self.anchor <= self.focus
    }

    /// Earlier endpoint in document order
    pub fn start(&self) -> &Path {
        if self.is_forward() {
            &self.anchor
        } else {
            &self.focus
        }
    }

    /// Later endpoint in document order
    pub fn end(&self) -> &Path {
        if self.is_forward() {
            &self.focus
        } else {
            &self.anchor
        }
    }

    /// Does the selection touch this leaf?
    ///
    /// An endpoint may address an ancestor rather than a leaf, in which case
    /// every leaf under it counts as covered.
    pub fn contains(&self, leaf: &Path) -> bool {
        let (start, end) = (self.start(), self.end());
        start <= leaf && (leaf <= end || leaf.starts_with(end))
    }

    /// Leaf paths touched by the selection, in document order
    pub fn leaves(&self, document: &Document) -> Vec<Path> {
        document
            .leaf_paths()
            .into_iter()
            .filter(|leaf| self.contains(leaf))
            .collect()
    }

    /// Paths of the text containers (paragraphs, list items) holding a
    /// selected leaf, in document order and without duplicates
    pub fn containers(&self, document: &Document) -> Vec<Path> {
        let mut containers: Vec<Path> = Vec::new();
        for leaf in self.leaves(document) {
            if let Some((_, parent)) = leaf.split_last() {
                if containers.last() != Some(&parent) {
                    containers.push(parent);
                }
            }
        }
        containers
    }

    /// Every node the selection intersects: each touched top-level block,
    /// each touched list item inside a list, and each touched leaf
    pub fn nodes<'a>(&self, document: &'a Document) -> Vec<NodeRef<'a>> {
        let mut nodes = Vec::new();
        let mut block_seen: Option<usize> = None;
        let mut item_seen: Option<(usize, usize)> = None;

        for leaf in self.leaves(document) {
            let Some(&block_index) = leaf.0.first() else {
                continue;
            };
            let Some(block) = document.blocks().get(block_index) else {
                continue;
            };

            if block_seen != Some(block_index) {
                block_seen = Some(block_index);
                nodes.push(NodeRef::Block(block));
            }

            if leaf.len() == 3 {
                let item_index = leaf.0[1];
                if item_seen != Some((block_index, item_index)) {
                    item_seen = Some((block_index, item_index));
                    if let Some(item) = list_items(block).and_then(|items| items.get(item_index)) {
                        nodes.push(NodeRef::Item(item));
                    }
                }
            }

            if let Some(text) = document.leaf(&leaf) {
                nodes.push(NodeRef::Text(text));
            }
        }

        nodes
    }
}

/// Borrowed view of a node in the tree
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NodeRef<'a> {
    Block(&'a Block),
    Item(&'a ListItem),
    Text(&'a Text),
}

/// Mutable view of a node in the tree
#[derive(Debug)]
pub enum NodeMut<'a> {
    Block(&'a mut Block),
    Item(&'a mut ListItem),
    Text(&'a mut Text),
}

pub(crate) fn list_items(block: &Block) -> Option<&Vec<ListItem>> {
    match block {
        Block::BulletedList { children } | Block::NumberedList { children } => Some(children),
        _ => None,
    }
}

pub(crate) fn list_items_mut(block: &mut Block) -> Option<&mut Vec<ListItem>> {
    match block {
        Block::BulletedList { children } | Block::NumberedList { children } => Some(children),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quire_parser::parse;

    fn sample() -> Document {
        parse("<p>a<strong>b</strong></p><ul><li>c</li><li>d</li></ul><p>e</p>").unwrap()
    }

    #[test]
    fn test_all_spans_first_to_last_leaf() {
        let doc = sample();
        let selection = Selection::all(&doc);
        assert_eq!(selection.anchor, Path::new([0, 0]));
        assert_eq!(selection.focus, Path::new([2, 0]));
        assert_eq!(selection.leaves(&doc).len(), 5);
    }

    #[test]
    fn test_backward_selection_orders_endpoints() {
        let doc = sample();
        let selection = Selection::new(Path::new([1, 1, 0]), Path::new([0, 1]));
        assert!(!selection.is_forward());
        assert_eq!(selection.start(), &Path::new([0, 1]));
        assert_eq!(
            selection.leaves(&doc),
            vec![Path::new([0, 1]), Path::new([1, 0, 0]), Path::new([1, 1, 0])]
        );
    }

    #[test]
    fn test_ancestor_endpoint_covers_descendants() {
        let doc = sample();
        let selection = Selection::new(Path::new([1]), Path::new([1]));
        assert_eq!(
            selection.containers(&doc),
            vec![Path::new([1, 0]), Path::new([1, 1])]
        );
    }

    #[test]
    fn test_block_selection() {
        let doc = sample();
        let selection = Selection::block(&doc, 0).unwrap();
        assert_eq!(selection, Selection::new(Path::new([0, 0]), Path::new([0, 1])));
        assert!(Selection::block(&doc, 7).is_none());
    }

    #[test]
    fn test_nodes_lists_ancestors_before_leaves() {
        let doc = sample();
        let selection = Selection::collapsed(Path::new([1, 1, 0]));
        let nodes = selection.nodes(&doc);

        assert_eq!(nodes.len(), 3);
        assert!(matches!(nodes[0], NodeRef::Block(Block::BulletedList { .. })));
        assert!(matches!(nodes[1], NodeRef::Item(item) if item.children[0].content == "d"));
        assert!(matches!(nodes[2], NodeRef::Text(text) if text.content == "d"));
    }

    #[test]
    fn test_out_of_range_selects_nothing() {
        let doc = sample();
        let selection = Selection::collapsed(Path::new([9, 0]));
        assert!(selection.leaves(&doc).is_empty());
        assert!(selection.nodes(&doc).is_empty());
    }
}
