//! Identifier and tag types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::PageError;

/// Identifier of a block, unique within its document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockId(pub String);

impl BlockId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for BlockId {
    fn from(s: &str) -> Self {
        BlockId(s.to_string())
    }
}

impl From<String> for BlockId {
    fn from(s: String) -> Self {
        BlockId(s)
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The variant tag of a block (`type` on the wire).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockKind {
    Card,
    Text,
    Button,
    Image,
    Spacer,
}

impl BlockKind {
    /// Every kind, in toolbar order.
    pub const ALL: [BlockKind; 5] = [
        BlockKind::Card,
        BlockKind::Text,
        BlockKind::Button,
        BlockKind::Image,
        BlockKind::Spacer,
    ];

    /// Wire tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            BlockKind::Card => "card",
            BlockKind::Text => "text",
            BlockKind::Button => "button",
            BlockKind::Image => "image",
            BlockKind::Spacer => "spacer",
        }
    }

    /// Human label used by toolbars ("Add card").
    pub fn label(&self) -> &'static str {
        match self {
            BlockKind::Card => "Card",
            BlockKind::Text => "Text",
            BlockKind::Button => "Button",
            BlockKind::Image => "Image",
            BlockKind::Spacer => "Spacer",
        }
    }
}

impl FromStr for BlockKind {
    type Err = PageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BlockKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| PageError::UnknownBlockType { tag: s.to_string() })
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
