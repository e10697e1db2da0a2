//! News service
//!
//! Read-only access to the news feed. Items are published out of band,
//! so the service only lists and fetches.

use crate::db::repositories::NewsRepository;
use crate::models::News;
use anyhow::{Context, Result};
use std::sync::Arc;

/// Error types for news service operations
#[derive(Debug, thiserror::Error)]
pub enum NewsServiceError {
    /// News item not found
    #[error("News item not found")]
    NotFound,

    /// Internal error
    #[error("Internal error: {0}")]
    InternalError(#[from] anyhow::Error),
}

/// A page of news items
#[derive(Debug)]
pub struct NewsPage {
    pub items: Vec<News>,
    pub page: i64,
    pub total_pages: i64,
}

/// News service
pub struct NewsService {
    news_repo: Arc<dyn NewsRepository>,
    page_size: i64,
}

impl NewsService {
    pub fn new(news_repo: Arc<dyn NewsRepository>, page_size: i64) -> Self {
        Self {
            news_repo,
            page_size,
        }
    }

    /// List one page of the feed, newest first
    ///
    /// Pages are 1-based; out-of-range page numbers are clamped.
    pub async fn list(&self, page: i64) -> Result<NewsPage, NewsServiceError> {
        let page = page.max(1);

        let (items, total) = self
            .news_repo
            .list(page, self.page_size)
            .await
            .context("Failed to list news")?;

        let total_pages = if total == 0 {
            1
        } else {
            (total + self.page_size - 1) / self.page_size
        };

        Ok(NewsPage {
            items,
            page,
            total_pages,
        })
    }

    /// Get a single news item
    pub async fn get(&self, id: i64) -> Result<News, NewsServiceError> {
        self.news_repo
            .get_by_id(id)
            .await
            .context("Failed to get news item")?
            .ok_or(NewsServiceError::NotFound)
    }
}
