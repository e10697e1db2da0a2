//! News model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// News entity: a published item shown on the home page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct News {
    pub id: i64,
    pub title: String,
    pub text: String,
    /// Publication timestamp; the home page sorts by this, newest first
    pub date: DateTime<Utc>,
}
