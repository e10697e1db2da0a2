//! Session repository
//!
//! Database operations for login sessions.

use crate::models::Session;
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Row, SqlitePool};
use std::sync::Arc;

/// Session repository trait
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Create a new session
    async fn create(&self, session: &Session) -> Result<Session>;

    /// Get session by token
    async fn get_by_id(&self, id: &str) -> Result<Option<Session>>;

    /// Delete a session
    async fn delete(&self, id: &str) -> Result<()>;

    /// Delete all expired sessions, returning how many were removed
    async fn delete_expired(&self) -> Result<u64>;
}

/// SQLx-based session repository implementation
pub struct SqlxSessionRepository {
    pool: SqlitePool,
}

impl SqlxSessionRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a boxed repository for use with dependency injection
    pub fn boxed(pool: SqlitePool) -> Arc<dyn SessionRepository> {
        Arc::new(Self::new(pool))
    }
}

#[async_trait]
impl SessionRepository for SqlxSessionRepository {
    async fn create(&self, session: &Session) -> Result<Session> {
        let now = Utc::now();

        sqlx::query(
            r#"
            INSERT INTO sessions (id, user_id, expires_at, created_at)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&session.id)
        .bind(session.user_id)
        .bind(session.expires_at)
        .bind(now)
        .execute(&self.pool)
        .await
        .context("Failed to create session")?;

        Ok(Session {
            id: session.id.clone(),
            user_id: session.user_id,
            expires_at: session.expires_at,
            created_at: now,
        })
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<Session>> {
        let row = sqlx::query(
            "SELECT id, user_id, expires_at, created_at FROM sessions WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to get session")?;

        Ok(row.map(|row| Session {
            id: row.get("id"),
            user_id: row.get("user_id"),
            expires_at: row.get("expires_at"),
            created_at: row.get("created_at"),
        }))
    }

    async fn delete(&self, id: &str) -> Result<()> {
        sqlx::query("DELETE FROM sessions WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .context("Failed to delete session")?;

        Ok(())
    }

    async fn delete_expired(&self) -> Result<u64> {
        let result = sqlx::query("DELETE FROM sessions WHERE expires_at < ?")
            .bind(Utc::now())
            .execute(&self.pool)
            .await
            .context("Failed to delete expired sessions")?;

        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repositories::{SqlxUserRepository, UserRepository};
    use crate::db::{create_test_pool, migrations};
    use crate::models::User;
    use chrono::Duration;

    async fn setup() -> (SqlitePool, SqlxSessionRepository, i64) {
        let pool = create_test_pool().await.expect("Failed to create test pool");
        migrations::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");

        let user_repo = SqlxUserRepository::new(pool.clone());
        let user = user_repo
            .create(&User::new(
                "sessionuser".to_string(),
                "session@example.com".to_string(),
                "hash".to_string(),
            ))
            .await
            .expect("Failed to create user");

        let repo = SqlxSessionRepository::new(pool.clone());
        (pool, repo, user.id)
    }

    fn make_session(user_id: i64, hours: i64) -> Session {
        Session {
            id: uuid::Uuid::new_v4().to_string(),
            user_id,
            expires_at: Utc::now() + Duration::hours(hours),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_create_and_get_session() {
        let (_pool, repo, user_id) = setup().await;
        let session = make_session(user_id, 24);

        let created = repo.create(&session).await.expect("Failed to create session");
        let found = repo
            .get_by_id(&created.id)
            .await
            .expect("Failed to get session")
            .expect("Session not found");

        assert_eq!(found.id, session.id);
        assert_eq!(found.user_id, user_id);
    }

    #[tokio::test]
    async fn test_get_session_not_found() {
        let (_pool, repo, _user_id) = setup().await;

        let found = repo
            .get_by_id("no-such-token")
            .await
            .expect("Failed to get session");

        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_delete_session() {
        let (_pool, repo, user_id) = setup().await;
        let session = make_session(user_id, 24);
        repo.create(&session).await.expect("Failed to create session");

        repo.delete(&session.id).await.expect("Failed to delete session");

        let found = repo
            .get_by_id(&session.id)
            .await
            .expect("Failed to get session");
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_delete_expired_sessions() {
        let (_pool, repo, user_id) = setup().await;
        let expired = make_session(user_id, -1);
        let valid = make_session(user_id, 24);
        repo.create(&expired).await.expect("Failed to create session");
        repo.create(&valid).await.expect("Failed to create session");

        let removed = repo.delete_expired().await.expect("Failed to delete expired");

        assert_eq!(removed, 1);
        assert!(repo
            .get_by_id(&valid.id)
            .await
            .expect("Failed to get session")
            .is_some());
    }

    #[tokio::test]
    async fn test_sessions_removed_with_user() {
        let (pool, repo, user_id) = setup().await;
        let session = make_session(user_id, 24);
        repo.create(&session).await.expect("Failed to create session");

        sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(user_id)
            .execute(&pool)
            .await
            .expect("Failed to delete user");

        let found = repo
            .get_by_id(&session.id)
            .await
            .expect("Failed to get session");
        assert!(found.is_none());
    }
}
