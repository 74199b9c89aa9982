use crate::error::StructureError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Root document node
///
/// Always holds at least one block. Construction goes through [`Document::new`]
/// or [`Document::from_blocks`], so an empty document cannot be built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Block>", into = "Vec<Block>")]
pub struct Document {
    blocks: Vec<Block>,
}

/// Block-level node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Block {
    Paragraph {
        #[serde(default, skip_serializing_if = "Alignment::is_unset")]
        align: Alignment,
        children: Vec<Text>,
    },

    /// A list item outside of any list container
    ListItem(ListItem),

    BulletedList {
        #[serde(with = "tagged_items")]
        children: Vec<ListItem>,
    },

    NumberedList {
        #[serde(with = "tagged_items")]
        children: Vec<ListItem>,
    },
}

/// List item (only inline children)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ListItem {
    /// Alignment carried over from the paragraph this item was made from.
    /// Not rendered; restored when the item turns back into a paragraph.
    #[serde(default, skip_serializing_if = "Alignment::is_unset")]
    pub align: Alignment,
    pub children: Vec<Text>,
}

/// Text leaf with its own formatting flags
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Text {
    #[serde(rename = "text")]
    pub content: String,
    #[serde(default, skip_serializing_if = "is_false")]
    pub bold: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub italic: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub underline: bool,
}

/// Inline formatting attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mark {
    Bold,
    Italic,
    Underline,
}

/// Paragraph alignment. `Unset` renders as the default (left).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    Left,
    Center,
    Right,
    Justify,
    #[default]
    Unset,
}

/// Kind of list container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListKind {
    Bulleted,
    Numbered,
}

/// Address of a node: child indices from the document root.
///
/// Leaves live at `[block, leaf]` inside paragraphs and bare list items, and
/// at `[block, item, leaf]` inside list containers.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Path(pub Vec<usize>);

impl Document {
    /// The initial document: one left-aligned paragraph with one empty leaf
    pub fn new() -> Self {
        Self {
            blocks: vec![Block::Paragraph {
                align: Alignment::Left,
                children: vec![Text::default()],
            }],
        }
    }

    /// Build a document from blocks, rejecting malformed trees
    pub fn from_blocks(blocks: Vec<Block>) -> Result<Self, StructureError> {
        let doc = Self { blocks };
        doc.validate()?;
        Ok(doc)
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn into_blocks(self) -> Vec<Block> {
        self.blocks
    }

    /// Mutable access for in-crate transforms. Callers must re-validate.
    pub fn blocks_mut(&mut self) -> &mut Vec<Block> {
        &mut self.blocks
    }

    /// Check every structural invariant
    pub fn validate(&self) -> Result<(), StructureError> {
        if self.blocks.is_empty() {
            return Err(StructureError::EmptyDocument);
        }

        for (index, block) in self.blocks.iter().enumerate() {
            match block {
                Block::Paragraph { children, .. } | Block::ListItem(ListItem { children, .. }) => {
                    if children.is_empty() {
                        return Err(StructureError::EmptyBlock(Path(vec![index])));
                    }
                }
                Block::BulletedList { children } | Block::NumberedList { children } => {
                    if children.is_empty() {
                        return Err(StructureError::EmptyList(index));
                    }
                    for (item, list_item) in children.iter().enumerate() {
                        if list_item.children.is_empty() {
                            return Err(StructureError::EmptyBlock(Path(vec![index, item])));
                        }
                    }
                }
            }
        }

        Ok(())
    }

    /// All leaf paths in document order
    pub fn leaf_paths(&self) -> Vec<Path> {
        let mut paths = Vec::new();
        for (index, block) in self.blocks.iter().enumerate() {
            match block {
                Block::Paragraph { children, .. } | Block::ListItem(ListItem { children, .. }) => {
                    paths.extend((0..children.len()).map(|leaf| Path(vec![index, leaf])));
                }
                Block::BulletedList { children } | Block::NumberedList { children } => {
                    for (item, list_item) in children.iter().enumerate() {
                        paths.extend(
                            (0..list_item.children.len()).map(|leaf| Path(vec![index, item, leaf])),
                        );
                    }
                }
            }
        }
        paths
    }

    /// Leaves of the paragraph or list item at `path` (one or two indices)
    pub fn inlines(&self, path: &Path) -> Option<&[Text]> {
        let block = self.blocks.get(*path.0.first()?)?;
        match (block, path.0.len()) {
            (Block::Paragraph { children, .. }, 1) => Some(children),
            (Block::ListItem(item), 1) => Some(&item.children),
            (Block::BulletedList { children } | Block::NumberedList { children }, 2) => {
                children.get(path.0[1]).map(|item| item.children.as_slice())
            }
            _ => None,
        }
    }

    pub fn inlines_mut(&mut self, path: &Path) -> Option<&mut Vec<Text>> {
        let block = self.blocks.get_mut(*path.0.first()?)?;
        match (block, path.0.len()) {
            (Block::Paragraph { children, .. }, 1) => Some(children),
            (Block::ListItem(item), 1) => Some(&mut item.children),
            (Block::BulletedList { children } | Block::NumberedList { children }, 2) => {
                children.get_mut(path.0[1]).map(|item| &mut item.children)
            }
            _ => None,
        }
    }

    /// Text leaf at `path`
    pub fn leaf(&self, path: &Path) -> Option<&Text> {
        let (leaf, parent) = path.split_last()?;
        self.inlines(&parent)?.get(leaf)
    }

    pub fn leaf_mut(&mut self, path: &Path) -> Option<&mut Text> {
        let (leaf, parent) = path.split_last()?;
        self.inlines_mut(&parent)?.get_mut(leaf)
    }

    /// True when there is no visible text anywhere
    pub fn is_blank(&self) -> bool {
        self.blocks
            .iter()
            .flat_map(Block::texts)
            .all(|text| text.content.trim().is_empty())
    }

    /// True for the pristine single-paragraph document with no content
    pub fn is_empty_paragraph(&self) -> bool {
        match self.blocks.as_slice() {
            [Block::Paragraph { children, .. }] => children.iter().all(|t| t.content.is_empty()),
            _ => false,
        }
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl TryFrom<Vec<Block>> for Document {
    type Error = StructureError;

    fn try_from(blocks: Vec<Block>) -> Result<Self, Self::Error> {
        Self::from_blocks(blocks)
    }
}

impl From<Document> for Vec<Block> {
    fn from(doc: Document) -> Self {
        doc.blocks
    }
}

impl Block {
    pub fn paragraph(children: Vec<Text>) -> Self {
        Block::Paragraph {
            align: Alignment::Unset,
            children,
        }
    }

    pub fn aligned(align: Alignment, children: Vec<Text>) -> Self {
        Block::Paragraph { align, children }
    }

    pub fn list(kind: ListKind, children: Vec<ListItem>) -> Self {
        match kind {
            ListKind::Bulleted => Block::BulletedList { children },
            ListKind::Numbered => Block::NumberedList { children },
        }
    }

    /// Kind of list container, if this block is one
    pub fn list_kind(&self) -> Option<ListKind> {
        match self {
            Block::BulletedList { .. } => Some(ListKind::Bulleted),
            Block::NumberedList { .. } => Some(ListKind::Numbered),
            _ => None,
        }
    }

    /// Every text leaf under this block, in order
    pub fn texts(&self) -> Box<dyn Iterator<Item = &Text> + '_> {
        match self {
            Block::Paragraph { children, .. } | Block::ListItem(ListItem { children, .. }) => {
                Box::new(children.iter())
            }
            Block::BulletedList { children } | Block::NumberedList { children } => {
                Box::new(children.iter().flat_map(|item| item.children.iter()))
            }
        }
    }
}

impl ListItem {
    pub fn new(children: Vec<Text>) -> Self {
        Self {
            align: Alignment::Unset,
            children,
        }
    }
}

impl Text {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Self::default()
        }
    }

    pub fn with_mark(mut self, mark: Mark) -> Self {
        self.set_mark(mark, true);
        self
    }

    pub fn has_mark(&self, mark: Mark) -> bool {
        match mark {
            Mark::Bold => self.bold,
            Mark::Italic => self.italic,
            Mark::Underline => self.underline,
        }
    }

    pub fn set_mark(&mut self, mark: Mark, on: bool) {
        match mark {
            Mark::Bold => self.bold = on,
            Mark::Italic => self.italic = on,
            Mark::Underline => self.underline = on,
        }
    }
}

impl Mark {
    pub const ALL: [Mark; 3] = [Mark::Bold, Mark::Italic, Mark::Underline];

    pub fn as_str(&self) -> &'static str {
        match self {
            Mark::Bold => "bold",
            Mark::Italic => "italic",
            Mark::Underline => "underline",
        }
    }
}

impl Alignment {
    pub fn is_unset(&self) -> bool {
        matches!(self, Alignment::Unset)
    }

    /// CSS `text-align` value, `None` when unset
    pub fn as_css(&self) -> Option<&'static str> {
        match self {
            Alignment::Left => Some("left"),
            Alignment::Center => Some("center"),
            Alignment::Right => Some("right"),
            Alignment::Justify => Some("justify"),
            Alignment::Unset => None,
        }
    }
}

impl FromStr for Alignment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "left" | "start" => Ok(Alignment::Left),
            "center" => Ok(Alignment::Center),
            "right" | "end" => Ok(Alignment::Right),
            "justify" => Ok(Alignment::Justify),
            other => Err(format!("unknown alignment: {}", other)),
        }
    }
}

impl ListKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ListKind::Bulleted => "bulleted",
            ListKind::Numbered => "numbered",
        }
    }
}

impl Path {
    pub fn new(indices: impl Into<Vec<usize>>) -> Self {
        Self(indices.into())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn starts_with(&self, prefix: &Path) -> bool {
        self.0.starts_with(&prefix.0)
    }

    /// Split into last index and parent path
    pub fn split_last(&self) -> Option<(usize, Path)> {
        let (last, parent) = self.0.split_last()?;
        Some((*last, Path(parent.to_vec())))
    }

    /// Path of a child of this node
    pub fn child(&self, index: usize) -> Path {
        let mut indices = self.0.clone();
        indices.push(index);
        Path(indices)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|i| i.to_string()).collect();
        write!(f, "{}", parts.join("."))
    }
}

impl FromStr for Path {
    type Err = String;

    /// Parses dotted indices, e.g. `0.2.1`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split('.')
            .map(|part| {
                part.trim()
                    .parse::<usize>()
                    .map_err(|_| format!("invalid path segment '{}' in '{}'", part, s))
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Path)
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// List items nested in a container carry their own `"type": "list-item"` tag
mod tagged_items {
    use super::ListItem;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Serialize, Deserialize)]
    enum ItemTag {
        #[serde(rename = "list-item")]
        ListItem,
    }

    #[derive(Serialize)]
    struct TaggedRef<'a> {
        #[serde(rename = "type")]
        tag: ItemTag,
        #[serde(flatten)]
        item: &'a ListItem,
    }

    #[derive(Deserialize)]
    struct Tagged {
        #[serde(rename = "type")]
        #[allow(dead_code)]
        tag: ItemTag,
        #[serde(flatten)]
        item: ListItem,
    }

    pub fn serialize<S: Serializer>(items: &[ListItem], serializer: S) -> Result<S::Ok, S::Error> {
        let tagged: Vec<TaggedRef<'_>> = items
            .iter()
            .map(|item| TaggedRef {
                tag: ItemTag::ListItem,
                item,
            })
            .collect();
        tagged.serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<ListItem>, D::Error> {
        let tagged = Vec::<Tagged>::deserialize(deserializer)?;
        Ok(tagged.into_iter().map(|t| t.item).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Document {
        Document::from_blocks(vec![
            Block::aligned(Alignment::Center, vec![Text::new("Title").with_mark(Mark::Bold)]),
            Block::list(
                ListKind::Bulleted,
                vec![
                    ListItem::new(vec![Text::new("one")]),
                    ListItem::new(vec![Text::new("two"), Text::new("!").with_mark(Mark::Italic)]),
                ],
            ),
        ])
        .unwrap()
    }

    #[test]
    fn test_new_document_is_single_empty_left_paragraph() {
        let doc = Document::new();
        assert_eq!(doc.blocks().len(), 1);
        assert_eq!(
            doc.blocks()[0],
            Block::Paragraph {
                align: Alignment::Left,
                children: vec![Text::default()],
            }
        );
        assert!(doc.is_blank());
        assert!(doc.is_empty_paragraph());
    }

    #[test]
    fn test_empty_document_rejected() {
        assert_eq!(Document::from_blocks(vec![]), Err(StructureError::EmptyDocument));
    }

    #[test]
    fn test_empty_list_rejected() {
        let result = Document::from_blocks(vec![Block::list(ListKind::Numbered, vec![])]);
        assert_eq!(result, Err(StructureError::EmptyList(0)));
    }

    #[test]
    fn test_leafless_item_rejected() {
        let result = Document::from_blocks(vec![
            Block::paragraph(vec![Text::new("a")]),
            Block::list(ListKind::Bulleted, vec![ListItem::new(vec![])]),
        ]);
        assert_eq!(result, Err(StructureError::EmptyBlock(Path::new([1, 0]))));
    }

    #[test]
    fn test_leaf_paths_in_document_order() {
        let paths = sample().leaf_paths();
        assert_eq!(
            paths,
            vec![
                Path::new([0, 0]),
                Path::new([1, 0, 0]),
                Path::new([1, 1, 0]),
                Path::new([1, 1, 1]),
            ]
        );
    }

    #[test]
    fn test_leaf_lookup() {
        let doc = sample();
        assert_eq!(doc.leaf(&Path::new([1, 1, 1])).map(|t| t.italic), Some(true));
        assert!(doc.leaf(&Path::new([1, 2, 0])).is_none());
        assert!(doc.leaf(&Path::new([0])).is_none());
    }

    #[test]
    fn test_json_shape() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(
            json,
            serde_json::json!([
                {
                    "type": "paragraph",
                    "align": "center",
                    "children": [{ "text": "Title", "bold": true }]
                },
                {
                    "type": "bulleted-list",
                    "children": [
                        { "type": "list-item", "children": [{ "text": "one" }] },
                        {
                            "type": "list-item",
                            "children": [{ "text": "two" }, { "text": "!", "italic": true }]
                        }
                    ]
                }
            ])
        );
    }

    #[test]
    fn test_json_rejects_empty_array() {
        let result: Result<Document, _> = serde_json::from_str("[]");
        assert!(result.is_err());
    }

    #[test]
    fn test_json_accepts_structured_editor_value() {
        let json = r#"[
            { "type": "paragraph", "align": "left", "children": [{ "text": "Tulis artikel di sini..." }] },
            { "type": "numbered-list", "children": [
                { "type": "list-item", "children": [{ "text": "x", "underline": true }] }
            ] }
        ]"#;
        let doc: Document = serde_json::from_str(json).unwrap();
        assert_eq!(doc.blocks()[1].list_kind(), Some(ListKind::Numbered));
        assert_eq!(doc.leaf(&Path::new([1, 0, 0])).map(|t| t.underline), Some(true));
    }

    #[test]
    fn test_path_parse_and_display() {
        let path: Path = "1.0.2".parse().unwrap();
        assert_eq!(path, Path::new([1, 0, 2]));
        assert_eq!(path.to_string(), "1.0.2");
        assert!("1.x".parse::<Path>().is_err());
    }

    #[test]
    fn test_is_blank_ignores_whitespace() {
        let doc = Document::from_blocks(vec![Block::paragraph(vec![Text::new("  \n ")])]).unwrap();
        assert!(doc.is_blank());
        assert!(!doc.is_empty_paragraph());
        assert!(!sample().is_blank());
    }
}
