use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// One immutable snapshot of a generation call: the letter body in both
/// representations plus the target company/role denormalized at generation
/// time. The in-memory "current letter" the user edits and exports is this
/// same shape; it is only persisted on an explicit save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedLetter {
    pub id: Uuid,
    /// Full letter body; text quoted verbatim from a content block is
    /// wrapped in `<mark></mark>` for UI highlighting.
    pub markdown: String,
    /// Same content with the emphasis markers stripped.
    pub raw_text: String,
    pub target_company: String,
    pub target_role: String,
    pub created_at: DateTime<Utc>,
}

/// A persisted cover letter record. `target_info` and `blocks` are stored
/// as opaque JSON blobs; the service deserializes them only when it needs
/// to rebuild a prompt or render.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CoverLetterRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub target_info: Value,
    pub blocks: Value,
    pub latex: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A persisted generation snapshot belonging to one letter record.
/// History per letter is bounded; older rows are pruned on save.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct GenerationRow {
    pub id: Uuid,
    pub letter_id: Uuid,
    pub markdown: String,
    pub raw_text: String,
    pub target_company: String,
    pub target_role: String,
    pub created_at: DateTime<Utc>,
}
