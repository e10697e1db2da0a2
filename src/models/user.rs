//! User model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User entity representing a registered account.
///
/// There are no roles: every permission in the system is ownership-based,
/// decided by comparing `id` against an object's `author_id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier
    pub id: i64,
    /// Username (unique)
    pub username: String,
    /// Email address (unique)
    pub email: String,
    /// Password hash (argon2, PHC string)
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new User with the given parameters.
    ///
    /// The password must already be hashed; use
    /// `services::password::hash_password()`.
    pub fn new(username: String, email: String, password_hash: String) -> Self {
        Self {
            id: 0, // set by the database
            username,
            email,
            password_hash,
            created_at: Utc::now(),
        }
    }

    /// Check whether this user owns an object authored by `author_id`
    pub fn owns(&self, author_id: i64) -> bool {
        self.id == author_id
    }
}
