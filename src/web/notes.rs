//! Notes pages
//!
//! The landing page is public; everything else sits behind the auth
//! middleware. A slug belonging to another user renders as 404.

use crate::models::{CreateNoteInput, UpdateNoteInput};
use crate::services::NoteServiceError;
use crate::web::middleware::{redirect_found, AppState, CurrentUser, PageError};
use crate::web::templates::render;
use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
    Extension, Form,
};
use serde::Deserialize;
use tera::Context;

#[derive(Debug, Deserialize)]
pub struct NoteForm {
    pub title: String,
    pub text: String,
    #[serde(default)]
    pub slug: String,
}

impl NoteForm {
    fn slug_option(&self) -> Option<String> {
        let slug = self.slug.trim();
        if slug.is_empty() {
            None
        } else {
            Some(slug.to_string())
        }
    }
}

fn note_error(err: NoteServiceError) -> PageError {
    match err {
        NoteServiceError::NotFound => PageError::NotFound,
        NoteServiceError::ValidationError(msg) | NoteServiceError::DuplicateSlug(msg) => {
            PageError::Internal(anyhow::anyhow!("Unhandled form error: {msg}"))
        }
        NoteServiceError::InternalError(e) => PageError::Internal(e),
    }
}

fn form_error_message(err: &NoteServiceError) -> Option<String> {
    match err {
        NoteServiceError::ValidationError(msg) => Some(msg.clone()),
        NoteServiceError::DuplicateSlug(slug) => {
            Some(format!("Slug '{slug}' is already in use"))
        }
        _ => None,
    }
}

/// GET /notes/home - public landing page
pub async fn home_page(
    State(state): State<AppState>,
    user: Option<Extension<CurrentUser>>,
) -> Result<Response, PageError> {
    let mut context = Context::new();
    if let Some(Extension(CurrentUser(user))) = user {
        context.insert("current_user", &user);
    }

    let html = render(&state.templates, "notes/home.html", &context)?;
    Ok(html.into_response())
}

/// GET /notes - the signed-in user's notes, nobody else's
pub async fn list_page(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<Response, PageError> {
    let notes = state
        .note_service
        .list_for(user.id)
        .await
        .map_err(note_error)?;

    let mut context = Context::new();
    context.insert("notes", &notes);
    context.insert("current_user", &user);

    let html = render(&state.templates, "notes/list.html", &context)?;
    Ok(html.into_response())
}

/// GET /notes/add
pub async fn add_page(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<Response, PageError> {
    let mut context = Context::new();
    context.insert("heading", "Add note");
    context.insert("action", "/notes/add");
    context.insert("current_user", &user);

    let html = render(&state.templates, "notes/form.html", &context)?;
    Ok(html.into_response())
}

/// POST /notes/add
pub async fn add(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Form(form): Form<NoteForm>,
) -> Result<Response, PageError> {
    let input = CreateNoteInput {
        title: form.title.clone(),
        text: form.text.clone(),
        slug: form.slug_option(),
    };

    match state.note_service.create(user.id, input).await {
        Ok(_) => Ok(redirect_found("/notes/done")),
        Err(err) => match form_error_message(&err) {
            Some(msg) => {
                let mut context = Context::new();
                context.insert("heading", "Add note");
                context.insert("action", "/notes/add");
                context.insert("current_user", &user);
                context.insert("error", &msg);
                context.insert("title", &form.title);
                context.insert("text", &form.text);
                context.insert("slug", &form.slug);

                let html = render(&state.templates, "notes/form.html", &context)?;
                Ok(html.into_response())
            }
            None => Err(note_error(err)),
        },
    }
}

/// GET /notes/done
pub async fn done_page(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<Response, PageError> {
    let mut context = Context::new();
    context.insert("current_user", &user);

    let html = render(&state.templates, "notes/done.html", &context)?;
    Ok(html.into_response())
}

/// GET /notes/{slug}
pub async fn detail_page(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<Response, PageError> {
    let note = state
        .note_service
        .get_owned(&slug, user.id)
        .await
        .map_err(note_error)?;

    let mut context = Context::new();
    context.insert("note", &note);
    context.insert("current_user", &user);

    let html = render(&state.templates, "notes/detail.html", &context)?;
    Ok(html.into_response())
}

/// GET /notes/{slug}/edit
pub async fn edit_page(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<Response, PageError> {
    let note = state
        .note_service
        .get_owned(&slug, user.id)
        .await
        .map_err(note_error)?;

    let mut context = Context::new();
    context.insert("heading", "Edit note");
    context.insert("action", &format!("/notes/{}/edit", note.slug));
    context.insert("current_user", &user);
    context.insert("title", &note.title);
    context.insert("text", &note.text);
    context.insert("slug", &note.slug);

    let html = render(&state.templates, "notes/form.html", &context)?;
    Ok(html.into_response())
}

/// POST /notes/{slug}/edit
pub async fn edit(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Form(form): Form<NoteForm>,
) -> Result<Response, PageError> {
    let input = UpdateNoteInput {
        title: form.title.clone(),
        text: form.text.clone(),
        slug: form.slug_option(),
    };

    match state.note_service.update(&slug, user.id, input).await {
        Ok(_) => Ok(redirect_found("/notes/done")),
        Err(err) => match form_error_message(&err) {
            Some(msg) => {
                let mut context = Context::new();
                context.insert("heading", "Edit note");
                context.insert("action", &format!("/notes/{slug}/edit"));
                context.insert("current_user", &user);
                context.insert("error", &msg);
                context.insert("title", &form.title);
                context.insert("text", &form.text);
                context.insert("slug", &form.slug);

                let html = render(&state.templates, "notes/form.html", &context)?;
                Ok(html.into_response())
            }
            None => Err(note_error(err)),
        },
    }
}

/// GET /notes/{slug}/delete
pub async fn delete_page(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<Response, PageError> {
    let note = state
        .note_service
        .get_owned(&slug, user.id)
        .await
        .map_err(note_error)?;

    let mut context = Context::new();
    context.insert("note", &note);
    context.insert("current_user", &user);

    let html = render(&state.templates, "notes/delete.html", &context)?;
    Ok(html.into_response())
}

/// POST /notes/{slug}/delete
pub async fn delete(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<Response, PageError> {
    state
        .note_service
        .delete(&slug, user.id)
        .await
        .map_err(note_error)?;

    Ok(redirect_found("/notes/done"))
}
