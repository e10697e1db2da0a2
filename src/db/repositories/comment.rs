//! Comment repository
//!
//! Database operations for comments. Detail-page listings join the author's
//! username and come back oldest first.

use crate::models::{Comment, CommentWithAuthor};
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Row, SqlitePool};
use std::sync::Arc;

/// Comment repository trait
#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Create a comment
    async fn create(&self, comment: &Comment) -> Result<Comment>;

    /// Get comment by ID
    async fn get_by_id(&self, id: i64) -> Result<Option<Comment>>;

    /// List comments for a news item with author names, oldest first
    async fn list_by_news(&self, news_id: i64) -> Result<Vec<CommentWithAuthor>>;

    /// Update a comment's text
    async fn update(&self, comment: &Comment) -> Result<Comment>;

    /// Delete a comment
    async fn delete(&self, id: i64) -> Result<()>;

    /// Count comments for a news item
    async fn count_by_news(&self, news_id: i64) -> Result<i64>;
}

/// SQLx-based comment repository implementation
pub struct SqlxCommentRepository {
    pool: SqlitePool,
}

impl SqlxCommentRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a boxed repository for use with dependency injection
    pub fn boxed(pool: SqlitePool) -> Arc<dyn CommentRepository> {
        Arc::new(Self::new(pool))
    }
}

#[async_trait]
impl CommentRepository for SqlxCommentRepository {
    async fn create(&self, comment: &Comment) -> Result<Comment> {
        let now = Utc::now();

        let result = sqlx::query(
            r#"
            INSERT INTO comments (news_id, author_id, text, created, updated_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(comment.news_id)
        .bind(comment.author_id)
        .bind(&comment.text)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .context("Failed to create comment")?;

        Ok(Comment {
            id: result.last_insert_rowid(),
            news_id: comment.news_id,
            author_id: comment.author_id,
            text: comment.text.clone(),
            created: now,
            updated_at: now,
        })
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Comment>> {
        let row = sqlx::query(
            r#"
            SELECT id, news_id, author_id, text, created, updated_at
            FROM comments
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to get comment")?;

        Ok(row.map(|row| row_to_comment(&row)))
    }

    async fn list_by_news(&self, news_id: i64) -> Result<Vec<CommentWithAuthor>> {
        let rows = sqlx::query(
            r#"
            SELECT c.id, c.news_id, c.author_id, u.username as author_name, c.text, c.created
            FROM comments c
            JOIN users u ON u.id = c.author_id
            WHERE c.news_id = ?
            ORDER BY c.created
            "#,
        )
        .bind(news_id)
        .fetch_all(&self.pool)
        .await
        .context("Failed to list comments")?;

        Ok(rows
            .iter()
            .map(|row| CommentWithAuthor {
                id: row.get("id"),
                news_id: row.get("news_id"),
                author_id: row.get("author_id"),
                author_name: row.get("author_name"),
                text: row.get("text"),
                created: row.get("created"),
            })
            .collect())
    }

    async fn update(&self, comment: &Comment) -> Result<Comment> {
        let now = Utc::now();

        sqlx::query("UPDATE comments SET text = ?, updated_at = ? WHERE id = ?")
            .bind(&comment.text)
            .bind(now)
            .bind(comment.id)
            .execute(&self.pool)
            .await
            .context("Failed to update comment")?;

        self.get_by_id(comment.id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Comment not found after update"))
    }

    async fn delete(&self, id: i64) -> Result<()> {
        sqlx::query("DELETE FROM comments WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .context("Failed to delete comment")?;

        Ok(())
    }

    async fn count_by_news(&self, news_id: i64) -> Result<i64> {
        let row = sqlx::query("SELECT COUNT(*) as count FROM comments WHERE news_id = ?")
            .bind(news_id)
            .fetch_one(&self.pool)
            .await
            .context("Failed to count comments")?;

        Ok(row.get("count"))
    }
}

fn row_to_comment(row: &sqlx::sqlite::SqliteRow) -> Comment {
    Comment {
        id: row.get("id"),
        news_id: row.get("news_id"),
        author_id: row.get("author_id"),
        text: row.get("text"),
        created: row.get("created"),
        updated_at: row.get("updated_at"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repositories::{
        NewsRepository, SqlxNewsRepository, SqlxUserRepository, UserRepository,
    };
    use crate::db::{create_test_pool, migrations};
    use crate::models::{News, User};

    async fn setup() -> (SqlxCommentRepository, i64, i64) {
        let pool = create_test_pool().await.expect("Failed to create test pool");
        migrations::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");

        let user_repo = SqlxUserRepository::new(pool.clone());
        let user = user_repo
            .create(&User::new(
                "commenter".to_string(),
                "commenter@example.com".to_string(),
                "hash".to_string(),
            ))
            .await
            .expect("Failed to create user");

        let news_repo = SqlxNewsRepository::new(pool.clone());
        let news = news_repo
            .create(&News {
                id: 0,
                title: "Story".to_string(),
                text: "Body".to_string(),
                date: Utc::now(),
            })
            .await
            .expect("Failed to create news");

        (SqlxCommentRepository::new(pool), user.id, news.id)
    }

    fn make_comment(news_id: i64, author_id: i64, text: &str) -> Comment {
        Comment {
            id: 0,
            news_id,
            author_id,
            text: text.to_string(),
            created: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_create_and_get_comment() {
        let (repo, author_id, news_id) = setup().await;

        let created = repo
            .create(&make_comment(news_id, author_id, "Nice story"))
            .await
            .expect("Failed to create comment");
        assert!(created.id > 0);

        let found = repo
            .get_by_id(created.id)
            .await
            .expect("Failed to get comment")
            .expect("Comment not found");
        assert_eq!(found.text, "Nice story");
        assert_eq!(found.news_id, news_id);
    }

    #[tokio::test]
    async fn test_list_by_news_oldest_first() {
        let (repo, author_id, news_id) = setup().await;
        repo.create(&make_comment(news_id, author_id, "first"))
            .await
            .expect("create");
        repo.create(&make_comment(news_id, author_id, "second"))
            .await
            .expect("create");

        let comments = repo
            .list_by_news(news_id)
            .await
            .expect("Failed to list comments");

        assert_eq!(comments.len(), 2);
        assert!(comments[0].created <= comments[1].created);
        assert_eq!(comments[0].text, "first");
        assert_eq!(comments[0].author_name, "commenter");
    }

    #[tokio::test]
    async fn test_update_comment() {
        let (repo, author_id, news_id) = setup().await;
        let mut comment = repo
            .create(&make_comment(news_id, author_id, "typo"))
            .await
            .expect("create");

        comment.text = "fixed".to_string();
        let updated = repo.update(&comment).await.expect("Failed to update");

        assert_eq!(updated.text, "fixed");
        assert!(updated.updated_at >= comment.created);
    }

    #[tokio::test]
    async fn test_delete_comment() {
        let (repo, author_id, news_id) = setup().await;
        let comment = repo
            .create(&make_comment(news_id, author_id, "bye"))
            .await
            .expect("create");

        repo.delete(comment.id).await.expect("Failed to delete");

        assert!(repo
            .get_by_id(comment.id)
            .await
            .expect("Failed to get comment")
            .is_none());
    }

    #[tokio::test]
    async fn test_count_by_news() {
        let (repo, author_id, news_id) = setup().await;
        assert_eq!(repo.count_by_news(news_id).await.expect("count"), 0);

        repo.create(&make_comment(news_id, author_id, "one"))
            .await
            .expect("create");
        repo.create(&make_comment(news_id, author_id, "two"))
            .await
            .expect("create");

        assert_eq!(repo.count_by_news(news_id).await.expect("count"), 2);
    }
}
