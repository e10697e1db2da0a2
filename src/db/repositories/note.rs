//! Note repository
//!
//! Database operations for notes. Slugs are globally unique, so slug
//! existence checks run across all authors while reads are always scoped
//! to one author in the service layer.

use crate::models::Note;
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Row, SqlitePool};
use std::sync::Arc;

/// Note repository trait
#[async_trait]
pub trait NoteRepository: Send + Sync {
    /// Create a new note
    async fn create(&self, note: &Note) -> Result<Note>;

    /// Get note by slug
    async fn get_by_slug(&self, slug: &str) -> Result<Option<Note>>;

    /// List all notes by one author, oldest first
    async fn list_by_author(&self, author_id: i64) -> Result<Vec<Note>>;

    /// Update a note
    async fn update(&self, note: &Note) -> Result<Note>;

    /// Delete a note
    async fn delete(&self, id: i64) -> Result<()>;

    /// Check whether any note uses this slug
    async fn exists_by_slug(&self, slug: &str) -> Result<bool>;

    /// Check whether any note other than `exclude_id` uses this slug
    async fn exists_by_slug_excluding(&self, slug: &str, exclude_id: i64) -> Result<bool>;
}

/// SQLx-based note repository implementation
pub struct SqlxNoteRepository {
    pool: SqlitePool,
}

impl SqlxNoteRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a boxed repository for use with dependency injection
    pub fn boxed(pool: SqlitePool) -> Arc<dyn NoteRepository> {
        Arc::new(Self::new(pool))
    }
}

#[async_trait]
impl NoteRepository for SqlxNoteRepository {
    async fn create(&self, note: &Note) -> Result<Note> {
        let now = Utc::now();

        let result = sqlx::query(
            r#"
            INSERT INTO notes (title, text, slug, author_id, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&note.title)
        .bind(&note.text)
        .bind(&note.slug)
        .bind(note.author_id)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .context("Failed to create note")?;

        Ok(Note {
            id: result.last_insert_rowid(),
            title: note.title.clone(),
            text: note.text.clone(),
            slug: note.slug.clone(),
            author_id: note.author_id,
            created_at: now,
            updated_at: now,
        })
    }

    async fn get_by_slug(&self, slug: &str) -> Result<Option<Note>> {
        let row = sqlx::query(
            r#"
            SELECT id, title, text, slug, author_id, created_at, updated_at
            FROM notes
            WHERE slug = ?
            "#,
        )
        .bind(slug)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to get note by slug")?;

        Ok(row.map(|row| row_to_note(&row)))
    }

    async fn list_by_author(&self, author_id: i64) -> Result<Vec<Note>> {
        let rows = sqlx::query(
            r#"
            SELECT id, title, text, slug, author_id, created_at, updated_at
            FROM notes
            WHERE author_id = ?
            ORDER BY id
            "#,
        )
        .bind(author_id)
        .fetch_all(&self.pool)
        .await
        .context("Failed to list notes")?;

        Ok(rows.iter().map(row_to_note).collect())
    }

    async fn update(&self, note: &Note) -> Result<Note> {
        let now = Utc::now();

        sqlx::query(
            r#"
            UPDATE notes
            SET title = ?, text = ?, slug = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&note.title)
        .bind(&note.text)
        .bind(&note.slug)
        .bind(now)
        .bind(note.id)
        .execute(&self.pool)
        .await
        .context("Failed to update note")?;

        self.get_by_slug(&note.slug)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Note not found after update"))
    }

    async fn delete(&self, id: i64) -> Result<()> {
        sqlx::query("DELETE FROM notes WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .context("Failed to delete note")?;

        Ok(())
    }

    async fn exists_by_slug(&self, slug: &str) -> Result<bool> {
        let row = sqlx::query("SELECT COUNT(*) as count FROM notes WHERE slug = ?")
            .bind(slug)
            .fetch_one(&self.pool)
            .await
            .context("Failed to check slug")?;

        let count: i64 = row.get("count");
        Ok(count > 0)
    }

    async fn exists_by_slug_excluding(&self, slug: &str, exclude_id: i64) -> Result<bool> {
        let row = sqlx::query("SELECT COUNT(*) as count FROM notes WHERE slug = ? AND id != ?")
            .bind(slug)
            .bind(exclude_id)
            .fetch_one(&self.pool)
            .await
            .context("Failed to check slug")?;

        let count: i64 = row.get("count");
        Ok(count > 0)
    }
}

fn row_to_note(row: &sqlx::sqlite::SqliteRow) -> Note {
    Note {
        id: row.get("id"),
        title: row.get("title"),
        text: row.get("text"),
        slug: row.get("slug"),
        author_id: row.get("author_id"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}
