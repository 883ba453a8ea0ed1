//! Core types for TalkLog

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default value for a freshly added text block
pub const TEXT_PLACEHOLDER: &str = "Write something...";

/// Default value for a freshly added quote block
pub const QUOTE_PLACEHOLDER: &str = "Enter a quote...";

/// The kind of a content block
///
/// The set of kinds is closed; a block's kind is fixed at creation time.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum BlockKind {
    /// Prose paragraph
    Text,
    /// Image reference (URL or embedded data reference)
    Image,
    /// Pull quote
    Quote,
    /// Horizontal rule
    Divider,
}

impl BlockKind {
    /// Default payload for a newly created block of this kind
    pub fn default_value(&self) -> &'static str {
        match self {
            Self::Text => TEXT_PLACEHOLDER,
            Self::Quote => QUOTE_PLACEHOLDER,
            Self::Image | Self::Divider => "",
        }
    }
}

impl std::fmt::Display for BlockKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Image => write!(f, "image"),
            Self::Quote => write!(f, "quote"),
            Self::Divider => write!(f, "divider"),
        }
    }
}

/// A single unit of post content
///
/// The id is unique within a post, assigned at creation and never reused.
/// Block order within `Post::content` is the rendering and export order;
/// there is no separate position field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Block {
    pub id: String,
    pub kind: BlockKind,
    pub value: String,
}

impl Block {
    /// Create a block with an auto-generated id and the kind's default value
    pub fn new(kind: BlockKind) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            kind,
            value: kind.default_value().to_string(),
        }
    }

    /// Create a block with an explicit value
    pub fn with_value(kind: BlockKind, value: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            kind,
            value: value.into(),
        }
    }
}

/// The full editable document for one session
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Post {
    pub title: String,
    pub content: Vec<Block>,
    /// No duplicates (case-sensitive); insertion order preserved for display
    pub tags: Vec<String>,
}

impl Post {
    /// Create an empty post
    pub fn new() -> Self {
        Self::default()
    }
}
