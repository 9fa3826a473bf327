use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Closed set of content block categories.
///
/// The variant order here is the canonical order in which blocks are
/// serialized into prompt text, independent of the order the client sends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlockCategory {
    Education,
    Experience,
    Projects,
    Skills,
    Motivation,
    Expectations,
    Personal,
}

impl BlockCategory {
    /// All categories in canonical prompt order.
    pub const ALL: [BlockCategory; 7] = [
        BlockCategory::Education,
        BlockCategory::Experience,
        BlockCategory::Projects,
        BlockCategory::Skills,
        BlockCategory::Motivation,
        BlockCategory::Expectations,
        BlockCategory::Personal,
    ];

    /// Label used for section headings in prompt text.
    pub fn label(&self) -> &'static str {
        match self {
            BlockCategory::Education => "Education",
            BlockCategory::Experience => "Experience",
            BlockCategory::Projects => "Projects",
            BlockCategory::Skills => "Skills",
            BlockCategory::Motivation => "Motivation",
            BlockCategory::Expectations => "Expectations",
            BlockCategory::Personal => "Personal",
        }
    }
}

impl fmt::Display for BlockCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A reusable, categorized snippet of the user's narrative, optionally
/// included in a given letter via `is_enabled`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentBlock {
    pub id: Uuid,
    pub category: BlockCategory,
    pub content: String,
    pub is_enabled: bool,
}
