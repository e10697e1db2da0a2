//! Note model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Note entity: a user-owned titled text record addressed by unique slug
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Note {
    pub id: i64,
    pub title: String,
    pub text: String,
    /// URL-safe unique identifier, derived from the title when not supplied
    pub slug: String,
    pub author_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a note
#[derive(Debug, Clone, Deserialize)]
pub struct CreateNoteInput {
    pub title: String,
    pub text: String,
    /// Optional explicit slug; empty or missing means "derive from title"
    pub slug: Option<String>,
}

/// Input for updating a note
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateNoteInput {
    pub title: String,
    pub text: String,
    /// Optional replacement slug; empty or missing keeps the current one
    pub slug: Option<String>,
}
