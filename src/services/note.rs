//! Note service
//!
//! Personal notes addressed by slug. Every read and write is scoped to the
//! requesting user; a note belonging to someone else is indistinguishable
//! from one that does not exist.

use crate::db::repositories::NoteRepository;
use crate::models::{CreateNoteInput, Note, UpdateNoteInput};
use anyhow::{Context, Result};
use chrono::Utc;
use std::sync::Arc;

/// Maximum slug length in characters
const MAX_SLUG_LENGTH: usize = 100;

/// Error types for note service operations
#[derive(Debug, thiserror::Error)]
pub enum NoteServiceError {
    /// Note not found (or not owned by the requesting user)
    #[error("Note not found")]
    NotFound,

    /// Validation error (invalid input)
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Slug already in use
    #[error("Slug '{0}' is already in use")]
    DuplicateSlug(String),

    /// Internal error
    #[error("Internal error: {0}")]
    InternalError(#[from] anyhow::Error),
}

/// Note service
pub struct NoteService {
    note_repo: Arc<dyn NoteRepository>,
}

impl NoteService {
    pub fn new(note_repo: Arc<dyn NoteRepository>) -> Self {
        Self { note_repo }
    }

    /// Create a note for the given author
    ///
    /// When no slug is supplied one is derived from the title. A slug that
    /// is already taken, by any user, is rejected and nothing is stored.
    pub async fn create(
        &self,
        author_id: i64,
        input: CreateNoteInput,
    ) -> Result<Note, NoteServiceError> {
        if input.title.trim().is_empty() {
            return Err(NoteServiceError::ValidationError(
                "Title cannot be empty".to_string(),
            ));
        }

        let slug = match input.slug.as_deref().map(str::trim) {
            Some(slug) if !slug.is_empty() => slug.to_string(),
            _ => generate_slug(&input.title),
        };

        if slug.is_empty() {
            return Err(NoteServiceError::ValidationError(
                "A slug could not be derived from the title".to_string(),
            ));
        }

        if self
            .note_repo
            .exists_by_slug(&slug)
            .await
            .context("Failed to check slug")?
        {
            return Err(NoteServiceError::DuplicateSlug(slug));
        }

        let note = Note {
            id: 0,
            title: input.title,
            text: input.text,
            slug,
            author_id,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let created = self
            .note_repo
            .create(&note)
            .await
            .context("Failed to create note")?;

        tracing::info!(slug = %created.slug, author_id, "Note created");

        Ok(created)
    }

    /// List all notes owned by one user
    pub async fn list_for(&self, author_id: i64) -> Result<Vec<Note>, NoteServiceError> {
        let notes = self
            .note_repo
            .list_by_author(author_id)
            .await
            .context("Failed to list notes")?;
        Ok(notes)
    }

    /// Get a note by slug, visible only to its owner
    pub async fn get_owned(&self, slug: &str, user_id: i64) -> Result<Note, NoteServiceError> {
        let note = self
            .note_repo
            .get_by_slug(slug)
            .await
            .context("Failed to get note")?
            .ok_or(NoteServiceError::NotFound)?;

        if note.author_id != user_id {
            return Err(NoteServiceError::NotFound);
        }

        Ok(note)
    }

    /// Update a note, visible only to its owner
    ///
    /// An empty slug keeps the note's current slug; a new slug must not be
    /// used by any other note.
    pub async fn update(
        &self,
        slug: &str,
        user_id: i64,
        input: UpdateNoteInput,
    ) -> Result<Note, NoteServiceError> {
        let mut note = self.get_owned(slug, user_id).await?;

        if input.title.trim().is_empty() {
            return Err(NoteServiceError::ValidationError(
                "Title cannot be empty".to_string(),
            ));
        }

        let new_slug = match input.slug.as_deref().map(str::trim) {
            Some(new_slug) if !new_slug.is_empty() => new_slug.to_string(),
            _ => note.slug.clone(),
        };

        if self
            .note_repo
            .exists_by_slug_excluding(&new_slug, note.id)
            .await
            .context("Failed to check slug")?
        {
            return Err(NoteServiceError::DuplicateSlug(new_slug));
        }

        note.title = input.title;
        note.text = input.text;
        note.slug = new_slug;

        let updated = self
            .note_repo
            .update(&note)
            .await
            .context("Failed to update note")?;

        Ok(updated)
    }

    /// Delete a note, visible only to its owner
    pub async fn delete(&self, slug: &str, user_id: i64) -> Result<(), NoteServiceError> {
        let note = self.get_owned(slug, user_id).await?;

        self.note_repo
            .delete(note.id)
            .await
            .context("Failed to delete note")?;

        tracing::info!(slug = %note.slug, "Note deleted");

        Ok(())
    }
}

/// Generate a URL-friendly slug from a title
///
/// Lowercases, maps runs of spaces and ASCII punctuation to single hyphens,
/// keeps non-ASCII characters as-is, and trims to the maximum slug length.
pub fn generate_slug(title: &str) -> String {
    let slug: String = title
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || !c.is_ascii() {
                c
            } else {
                '-'
            }
        })
        .collect();

    let mut result = String::new();
    let mut prev_hyphen = false;

    for c in slug.chars() {
        if c == '-' {
            if !prev_hyphen && !result.is_empty() {
                result.push(c);
                prev_hyphen = true;
            }
        } else {
            result.push(c);
            prev_hyphen = false;
        }
    }

    let truncated: String = result.chars().take(MAX_SLUG_LENGTH).collect();
    truncated.trim_end_matches('-').to_string()
}
