//! Comment service
//!
//! Comments on news items. Text is screened against a configurable list of
//! banned words before it is stored, on both create and edit. Edit and
//! delete are restricted to the comment's author.

use crate::db::repositories::{CommentRepository, NewsRepository};
use crate::models::{Comment, CommentWithAuthor};
use anyhow::{Context, Result};
use chrono::Utc;
use std::sync::Arc;

/// Error types for comment service operations
#[derive(Debug, thiserror::Error)]
pub enum CommentServiceError {
    /// Comment or its news item not found (or not owned by the requester)
    #[error("Comment not found")]
    NotFound,

    /// Validation error (empty or banned text)
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Internal error
    #[error("Internal error: {0}")]
    InternalError(#[from] anyhow::Error),
}

/// Comment service
pub struct CommentService {
    comment_repo: Arc<dyn CommentRepository>,
    news_repo: Arc<dyn NewsRepository>,
    banned_words: Vec<String>,
}

impl CommentService {
    pub fn new(
        comment_repo: Arc<dyn CommentRepository>,
        news_repo: Arc<dyn NewsRepository>,
        banned_words: Vec<String>,
    ) -> Self {
        let banned_words = banned_words
            .into_iter()
            .map(|w| w.to_lowercase())
            .collect();
        Self {
            comment_repo,
            news_repo,
            banned_words,
        }
    }

    /// Create a comment on a news item
    pub async fn create(
        &self,
        news_id: i64,
        author_id: i64,
        text: &str,
    ) -> Result<Comment, CommentServiceError> {
        self.news_repo
            .get_by_id(news_id)
            .await
            .context("Failed to get news item")?
            .ok_or(CommentServiceError::NotFound)?;

        self.validate_text(text)?;

        let comment = Comment {
            id: 0,
            news_id,
            author_id,
            text: text.to_string(),
            created: Utc::now(),
            updated_at: Utc::now(),
        };

        let created = self
            .comment_repo
            .create(&comment)
            .await
            .context("Failed to create comment")?;

        tracing::info!(news_id, author_id, "Comment posted");

        Ok(created)
    }

    /// List a news item's comments with author names, oldest first
    pub async fn list_for_news(
        &self,
        news_id: i64,
    ) -> Result<Vec<CommentWithAuthor>, CommentServiceError> {
        let comments = self
            .comment_repo
            .list_by_news(news_id)
            .await
            .context("Failed to list comments")?;
        Ok(comments)
    }

    /// Get a comment by ID, visible only to its author
    pub async fn get_owned(
        &self,
        id: i64,
        user_id: i64,
    ) -> Result<Comment, CommentServiceError> {
        let comment = self
            .comment_repo
            .get_by_id(id)
            .await
            .context("Failed to get comment")?
            .ok_or(CommentServiceError::NotFound)?;

        if comment.author_id != user_id {
            return Err(CommentServiceError::NotFound);
        }

        Ok(comment)
    }

    /// Update a comment's text, restricted to its author
    pub async fn update(
        &self,
        id: i64,
        user_id: i64,
        text: &str,
    ) -> Result<Comment, CommentServiceError> {
        let mut comment = self.get_owned(id, user_id).await?;

        self.validate_text(text)?;

        comment.text = text.to_string();

        let updated = self
            .comment_repo
            .update(&comment)
            .await
            .context("Failed to update comment")?;

        Ok(updated)
    }

    /// Delete a comment, restricted to its author
    pub async fn delete(&self, id: i64, user_id: i64) -> Result<Comment, CommentServiceError> {
        let comment = self.get_owned(id, user_id).await?;

        self.comment_repo
            .delete(comment.id)
            .await
            .context("Failed to delete comment")?;

        Ok(comment)
    }

    fn validate_text(&self, text: &str) -> Result<(), CommentServiceError> {
        if text.trim().is_empty() {
            return Err(CommentServiceError::ValidationError(
                "Comment cannot be empty".to_string(),
            ));
        }

        let lowered = text.to_lowercase();
        for word in &self.banned_words {
            if lowered.contains(word.as_str()) {
                return Err(CommentServiceError::ValidationError(
                    "Don't use offensive language!".to_string(),
                ));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repositories::{
        NewsRepository, SqlxCommentRepository, SqlxNewsRepository, SqlxUserRepository,
        UserRepository,
    };
    use crate::db::{create_test_pool, migrations};
    use crate::models::{News, User};

    async fn setup() -> (CommentService, i64, i64, i64) {
        let pool = create_test_pool().await.expect("Failed to create test pool");
        migrations::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");

        let user_repo = SqlxUserRepository::new(pool.clone());
        let author = user_repo
            .create(&User::new(
                "author".to_string(),
                "author@example.com".to_string(),
                "hash".to_string(),
            ))
            .await
            .expect("Failed to create user");
        let other = user_repo
            .create(&User::new(
                "other".to_string(),
                "other@example.com".to_string(),
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

        let service = CommentService::new(
            SqlxCommentRepository::boxed(pool.clone()),
            SqlxNewsRepository::boxed(pool),
            vec!["spam".to_string(), "scam".to_string()],
        );

        (service, news.id, author.id, other.id)
    }

    #[tokio::test]
    async fn test_create_comment() {
        let (service, news_id, author_id, _) = setup().await;

        let comment = service
            .create(news_id, author_id, "Great story")
            .await
            .expect("Failed to create comment");

        assert!(comment.id > 0);
        assert_eq!(comment.text, "Great story");
    }

    #[tokio::test]
    async fn test_create_comment_missing_news() {
        let (service, _, author_id, _) = setup().await;

        let result = service.create(999, author_id, "Hello").await;

        assert!(matches!(result, Err(CommentServiceError::NotFound)));
    }

    #[tokio::test]
    async fn test_create_rejects_banned_words() {
        let (service, news_id, author_id, _) = setup().await;

        for text in ["pure spam here", "SCAM alert", "Spammy"] {
            let result = service.create(news_id, author_id, text).await;
            assert!(
                matches!(result, Err(CommentServiceError::ValidationError(_))),
                "expected rejection for {text:?}"
            );
        }

        let comments = service.list_for_news(news_id).await.expect("Failed to list");
        assert!(comments.is_empty(), "Rejected comments must not be stored");
    }

    #[tokio::test]
    async fn test_create_rejects_empty_text() {
        let (service, news_id, author_id, _) = setup().await;

        let result = service.create(news_id, author_id, "   ").await;

        assert!(matches!(result, Err(CommentServiceError::ValidationError(_))));
    }

    #[tokio::test]
    async fn test_update_own_comment() {
        let (service, news_id, author_id, _) = setup().await;
        let comment = service
            .create(news_id, author_id, "typo")
            .await
            .expect("Failed to create comment");

        let updated = service
            .update(comment.id, author_id, "fixed")
            .await
            .expect("Failed to update");

        assert_eq!(updated.text, "fixed");
    }

    #[tokio::test]
    async fn test_update_rejects_banned_words() {
        let (service, news_id, author_id, _) = setup().await;
        let comment = service
            .create(news_id, author_id, "fine")
            .await
            .expect("Failed to create comment");

        let result = service.update(comment.id, author_id, "now spam").await;

        assert!(matches!(result, Err(CommentServiceError::ValidationError(_))));
        let kept = service
            .get_owned(comment.id, author_id)
            .await
            .expect("Comment should survive");
        assert_eq!(kept.text, "fine");
    }

    #[tokio::test]
    async fn test_update_other_users_comment_not_found() {
        let (service, news_id, author_id, other_id) = setup().await;
        let comment = service
            .create(news_id, author_id, "mine")
            .await
            .expect("Failed to create comment");

        let result = service.update(comment.id, other_id, "hijacked").await;

        assert!(matches!(result, Err(CommentServiceError::NotFound)));
    }

    #[tokio::test]
    async fn test_delete_own_comment() {
        let (service, news_id, author_id, _) = setup().await;
        let comment = service
            .create(news_id, author_id, "bye")
            .await
            .expect("Failed to create comment");

        service
            .delete(comment.id, author_id)
            .await
            .expect("Failed to delete");

        let comments = service.list_for_news(news_id).await.expect("Failed to list");
        assert!(comments.is_empty());
    }

    #[tokio::test]
    async fn test_delete_other_users_comment_not_found() {
        let (service, news_id, author_id, other_id) = setup().await;
        let comment = service
            .create(news_id, author_id, "kept")
            .await
            .expect("Failed to create comment");

        let result = service.delete(comment.id, other_id).await;

        assert!(matches!(result, Err(CommentServiceError::NotFound)));
        assert_eq!(
            service
                .list_for_news(news_id)
                .await
                .expect("Failed to list")
                .len(),
            1
        );
    }
}
