//! News repository
//!
//! Database operations for news items. Listing is paginated and sorted by
//! publication date, newest first.

use crate::models::News;
use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::{Row, SqlitePool};
use std::sync::Arc;

/// News repository trait
#[async_trait]
pub trait NewsRepository: Send + Sync {
    /// Create a news item
    async fn create(&self, news: &News) -> Result<News>;

    /// Get news item by ID
    async fn get_by_id(&self, id: i64) -> Result<Option<News>>;

    /// List news items, newest first, with the total count
    async fn list(&self, page: i64, per_page: i64) -> Result<(Vec<News>, i64)>;
}

/// SQLx-based news repository implementation
pub struct SqlxNewsRepository {
    pool: SqlitePool,
}

impl SqlxNewsRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a boxed repository for use with dependency injection
    pub fn boxed(pool: SqlitePool) -> Arc<dyn NewsRepository> {
        Arc::new(Self::new(pool))
    }
}

#[async_trait]
impl NewsRepository for SqlxNewsRepository {
    async fn create(&self, news: &News) -> Result<News> {
        let result = sqlx::query(
            "INSERT INTO news (title, text, date) VALUES (?, ?, ?)",
        )
        .bind(&news.title)
        .bind(&news.text)
        .bind(news.date)
        .execute(&self.pool)
        .await
        .context("Failed to create news item")?;

        Ok(News {
            id: result.last_insert_rowid(),
            title: news.title.clone(),
            text: news.text.clone(),
            date: news.date,
        })
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<News>> {
        let row = sqlx::query("SELECT id, title, text, date FROM news WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to get news item")?;

        Ok(row.map(|row| row_to_news(&row)))
    }

    async fn list(&self, page: i64, per_page: i64) -> Result<(Vec<News>, i64)> {
        let offset = (page - 1) * per_page;

        let rows = sqlx::query(
            r#"
            SELECT id, title, text, date
            FROM news
            ORDER BY date DESC
            LIMIT ? OFFSET ?
            "#,
        )
        .bind(per_page)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .context("Failed to list news")?;

        let items = rows.iter().map(row_to_news).collect();

        let count_row = sqlx::query("SELECT COUNT(*) as count FROM news")
            .fetch_one(&self.pool)
            .await
            .context("Failed to count news")?;

        Ok((items, count_row.get("count")))
    }
}

fn row_to_news(row: &sqlx::sqlite::SqliteRow) -> News {
    News {
        id: row.get("id"),
        title: row.get("title"),
        text: row.get("text"),
        date: row.get("date"),
    }
}
