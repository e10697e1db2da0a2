//! Comment model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Comment entity: user-authored text attached to a news item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: i64,
    pub news_id: i64,
    pub author_id: i64,
    pub text: String,
    pub created: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Comment joined with its author's username, for display
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentWithAuthor {
    pub id: i64,
    pub news_id: i64,
    pub author_id: i64,
    pub author_name: String,
    pub text: String,
    pub created: DateTime<Utc>,
}
