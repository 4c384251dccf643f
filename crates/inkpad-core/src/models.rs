//! Data models shared across inkpad crates.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value as JsonValue};
use std::fmt;
use std::str::FromStr;

use crate::defaults;
use crate::error::{Error, Result};

// =============================================================================
// NODE AND MARK TYPES
// =============================================================================

/// Block node types the editor knows how to toggle and render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlockType {
    #[serde(rename = "paragraph")]
    Paragraph,
    #[serde(rename = "heading-one")]
    HeadingOne,
    #[serde(rename = "heading-two")]
    HeadingTwo,
    #[serde(rename = "block-quote")]
    BlockQuote,
    #[serde(rename = "ol_list")]
    OlList,
    #[serde(rename = "ul_list")]
    UlList,
    #[serde(rename = "list_item")]
    ListItem,
    #[serde(rename = "image")]
    Image,
    #[serde(rename = "link")]
    Link,
}

impl BlockType {
    pub const ALL: [BlockType; 9] = [
        BlockType::Paragraph,
        BlockType::HeadingOne,
        BlockType::HeadingTwo,
        BlockType::BlockQuote,
        BlockType::OlList,
        BlockType::UlList,
        BlockType::ListItem,
        BlockType::Image,
        BlockType::Link,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Paragraph => "paragraph",
            Self::HeadingOne => "heading-one",
            Self::HeadingTwo => "heading-two",
            Self::BlockQuote => "block-quote",
            Self::OlList => "ol_list",
            Self::UlList => "ul_list",
            Self::ListItem => "list_item",
            Self::Image => "image",
            Self::Link => "link",
        }
    }

    /// True for the two list container types.
    pub fn is_list(&self) -> bool {
        matches!(self, Self::OlList | Self::UlList)
    }

    /// Void blocks carry no editable text.
    pub fn is_void(&self) -> bool {
        matches!(self, Self::Image)
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BlockType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| Error::InvalidInput(format!("unknown block type: {}", s)))
    }
}

/// Inline formatting marks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkType {
    Bold,
    Italic,
    Underlined,
    Code,
}

impl MarkType {
    pub const ALL: [MarkType; 4] = [
        MarkType::Bold,
        MarkType::Italic,
        MarkType::Underlined,
        MarkType::Code,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bold => "bold",
            Self::Italic => "italic",
            Self::Underlined => "underlined",
            Self::Code => "code",
        }
    }
}

impl fmt::Display for MarkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MarkType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| Error::InvalidInput(format!("unknown mark type: {}", s)))
    }
}

// =============================================================================
// BLOCKS AND FRAGMENTS
// =============================================================================

/// Specification of a block handed to the document model for insertion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockSpec {
    #[serde(rename = "type")]
    pub block_type: BlockType,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub data: Map<String, JsonValue>,
    #[serde(rename = "isVoid", default)]
    pub is_void: bool,
}

impl BlockSpec {
    /// Plain block of the given type with no data.
    pub fn new(block_type: BlockType) -> Self {
        Self {
            block_type,
            data: Map::new(),
            is_void: block_type.is_void(),
        }
    }

    /// Void image block whose `src` is a remote URL or a data URL.
    pub fn image(src: impl Into<String>) -> Self {
        let mut data = Map::new();
        data.insert("src".to_string(), JsonValue::String(src.into()));
        Self {
            block_type: BlockType::Image,
            data,
            is_void: true,
        }
    }

    /// The block inserted after an image so typing can continue.
    pub fn default_node() -> Self {
        Self::new(BlockType::Paragraph)
    }

    /// `src` of an image block.
    pub fn src(&self) -> Option<&str> {
        self.data.get("src").and_then(JsonValue::as_str)
    }
}

/// Text of a pasted fragment plus the type of the node it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fragment {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_type: Option<String>,
}

impl Fragment {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            node_type: None,
        }
    }

    pub fn with_node_type(mut self, node_type: impl Into<String>) -> Self {
        self.node_type = Some(node_type.into());
        self
    }
}

// =============================================================================
// PASTE CLASSIFICATION
// =============================================================================

/// A pending insertion considered for image reclassification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PasteCandidate {
    /// Plain text insertion.
    Text(String),
    /// Fragment insertion; classification looks at its text.
    Fragment(Fragment),
}

impl PasteCandidate {
    /// The string examined by the classifier.
    pub fn payload(&self) -> &str {
        match self {
            Self::Text(text) => text,
            Self::Fragment(fragment) => &fragment.text,
        }
    }

    /// The unmodified insertion, applied on pass-through.
    pub fn into_command(self) -> EditCommand {
        match self {
            Self::Text(text) => EditCommand::InsertText(text),
            Self::Fragment(fragment) => EditCommand::InsertFragment(fragment),
        }
    }
}

/// Replace the insertion with an image block referencing `target_url`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageIntent {
    #[serde(rename = "targetUrl")]
    pub target_url: String,
}

impl ImageIntent {
    pub fn new(target_url: impl Into<String>) -> Self {
        Self {
            target_url: target_url.into(),
        }
    }
}

/// Outcome of classifying a paste.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// Insert an image instead of the text.
    Handled(ImageIntent),
    /// Insert the original text unchanged.
    PassThrough,
}

impl Classification {
    pub fn is_image(&self) -> bool {
        matches!(self, Self::Handled(_))
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Handled(_) => "image",
            Self::PassThrough => "pass_through",
        }
    }
}

// =============================================================================
// DOCUMENT MODEL
// =============================================================================

/// Mutations the external document model is asked to perform.
#[derive(Debug, Clone, PartialEq)]
pub enum EditCommand {
    InsertBlock(BlockSpec),
    InsertText(String),
    InsertFragment(Fragment),
    MoveToEnd,
    MoveToStartOfNextText,
    Focus,
    ToggleMark(MarkType),
    SetBlocks(BlockType),
    WrapBlock(BlockType),
    UnwrapBlock(BlockType),
    /// Unwrap the list items in the selection out of their list.
    UnwrapList,
    /// Move the selected list item one level up.
    DecreaseItemDepth,
}

impl EditCommand {
    /// The command sequence that inserts an image block and leaves the caret
    /// in a fresh paragraph after it.
    pub fn insert_image(src: impl Into<String>) -> Vec<EditCommand> {
        Self::insert_void_block(BlockSpec::image(src))
    }

    /// Insert a void block followed by a default block, then refocus.
    pub fn insert_void_block(block: BlockSpec) -> Vec<EditCommand> {
        vec![
            EditCommand::InsertBlock(block),
            EditCommand::InsertBlock(BlockSpec::default_node()),
            EditCommand::MoveToStartOfNextText,
            EditCommand::Focus,
        ]
    }
}

/// What the document model reports about the current selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    /// Marks active at the selection.
    pub active_marks: Vec<MarkType>,
    /// Types of the blocks touched by the selection.
    pub blocks: Vec<BlockType>,
    /// Type of the parent of the first selected block.
    pub first_block_parent: Option<BlockType>,
    /// Whether the selection is inside a list.
    pub in_list: bool,
    /// Nesting depth of the current list item (0 outside lists).
    pub item_depth: usize,
}

impl SelectionState {
    pub fn has_mark(&self, mark: MarkType) -> bool {
        self.active_marks.contains(&mark)
    }

    pub fn has_block(&self, block: BlockType) -> bool {
        self.blocks.contains(&block)
    }
}

// =============================================================================
// SNAPSHOTS AND PERSISTENCE
// =============================================================================

/// Opaque serializable state of the whole document.
///
/// Persistence only serializes, measures and deserializes snapshots. The tree
/// inside belongs to the document model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentSnapshot(JsonValue);

impl DocumentSnapshot {
    pub fn new(value: JsonValue) -> Self {
        Self(value)
    }

    /// A document holding a single empty paragraph.
    pub fn empty_document() -> Self {
        Self(json!({
            "document": {
                "nodes": [
                    {
                        "object": "block",
                        "type": defaults::DEFAULT_NODE,
                        "nodes": [{ "object": "text" }]
                    }
                ]
            }
        }))
    }

    pub fn as_value(&self) -> &JsonValue {
        &self.0
    }

    pub fn into_value(self) -> JsonValue {
        self.0
    }

    /// Serialized form written to storage.
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.0)?)
    }

    /// Parse a stored record. A `null` record counts as corrupt.
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let value: JsonValue =
            serde_json::from_str(raw).map_err(|e| Error::CorruptRecord(e.to_string()))?;
        if value.is_null() {
            return Err(Error::CorruptRecord("record is null".to_string()));
        }
        Ok(Self(value))
    }
}

impl Default for DocumentSnapshot {
    fn default() -> Self {
        Self::empty_document()
    }
}

impl From<JsonValue> for DocumentSnapshot {
    fn from(value: JsonValue) -> Self {
        Self(value)
    }
}

/// Outcome of a save attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveResult {
    /// The slot now holds the snapshot.
    Saved { size_bytes: usize },
    /// Confirmation was declined; storage untouched.
    Cancelled,
    /// The snapshot was refused; storage untouched.
    Rejected {
        reason: String,
        size_bytes: usize,
        budget_bytes: usize,
    },
}

impl SaveResult {
    pub fn is_saved(&self) -> bool {
        matches!(self, Self::Saved { .. })
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Saved { .. } => "saved",
            Self::Cancelled => "cancelled",
            Self::Rejected { .. } => "rejected",
        }
    }

    /// A rejected save as [`Error::CapacityExceeded`], for callers that treat
    /// it as a failure.
    pub fn rejection(&self) -> Option<Error> {
        match self {
            Self::Rejected {
                size_bytes,
                budget_bytes,
                ..
            } => Some(Error::CapacityExceeded {
                size_bytes: *size_bytes,
                budget_bytes: *budget_bytes,
            }),
            _ => None,
        }
    }
}
