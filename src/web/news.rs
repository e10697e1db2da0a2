//! News pages
//!
//! The public feed, the detail page with its comment thread, and the
//! comment create/edit/delete handlers. Comment mutations live behind the
//! auth middleware; a comment that belongs to another user is reported as
//! not found rather than forbidden.

use crate::services::{CommentServiceError, NewsServiceError};
use crate::web::middleware::{redirect_found, AppState, CurrentUser, PageError};
use crate::web::templates::render;
use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
    Extension, Form,
};
use serde::Deserialize;
use tera::Context;

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    #[serde(default = "default_page")]
    pub page: i64,
}

fn default_page() -> i64 {
    1
}

#[derive(Debug, Deserialize)]
pub struct CommentForm {
    pub text: String,
}

fn news_error(err: NewsServiceError) -> PageError {
    match err {
        NewsServiceError::NotFound => PageError::NotFound,
        NewsServiceError::InternalError(e) => PageError::Internal(e),
    }
}

fn comment_error(err: CommentServiceError) -> PageError {
    match err {
        CommentServiceError::NotFound => PageError::NotFound,
        CommentServiceError::ValidationError(msg) => {
            PageError::Internal(anyhow::anyhow!("Unhandled validation error: {msg}"))
        }
        CommentServiceError::InternalError(e) => PageError::Internal(e),
    }
}

/// GET / - the paginated news feed
pub async fn home_page(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
    user: Option<Extension<CurrentUser>>,
) -> Result<Response, PageError> {
    let page = state.news_service.list(query.page).await.map_err(news_error)?;

    let mut context = Context::new();
    context.insert("news", &page.items);
    context.insert("page", &page.page);
    context.insert("total_pages", &page.total_pages);
    if let Some(Extension(CurrentUser(user))) = user {
        context.insert("current_user", &user);
    }

    let html = render(&state.templates, "news/home.html", &context)?;
    Ok(html.into_response())
}

/// GET /news/{id} - one item with its comment thread
pub async fn detail_page(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    user: Option<Extension<CurrentUser>>,
) -> Result<Response, PageError> {
    let item = state.news_service.get(id).await.map_err(news_error)?;
    let comments = state
        .comment_service
        .list_for_news(id)
        .await
        .map_err(comment_error)?;

    let mut context = Context::new();
    context.insert("item", &item);
    context.insert("comments", &comments);
    if let Some(Extension(CurrentUser(user))) = user {
        context.insert("current_user", &user);
    }

    let html = render(&state.templates, "news/detail.html", &context)?;
    Ok(html.into_response())
}

/// POST /news/{id}/comment
pub async fn create_comment(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Form(form): Form<CommentForm>,
) -> Result<Response, PageError> {
    match state.comment_service.create(id, user.id, &form.text).await {
        Ok(_) => Ok(redirect_found(&format!("/news/{id}"))),
        Err(CommentServiceError::ValidationError(msg)) => {
            // Re-render the detail page with the rejected text in the form
            let item = state.news_service.get(id).await.map_err(news_error)?;
            let comments = state
                .comment_service
                .list_for_news(id)
                .await
                .map_err(comment_error)?;

            let mut context = Context::new();
            context.insert("item", &item);
            context.insert("comments", &comments);
            context.insert("current_user", &user);
            context.insert("error", &msg);
            context.insert("text", &form.text);

            let html = render(&state.templates, "news/detail.html", &context)?;
            Ok(html.into_response())
        }
        Err(err) => Err(comment_error(err)),
    }
}

/// GET /news/comment/{id}/edit
pub async fn edit_comment_page(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<Response, PageError> {
    let comment = state
        .comment_service
        .get_owned(id, user.id)
        .await
        .map_err(comment_error)?;

    let mut context = Context::new();
    context.insert("comment", &comment);
    context.insert("current_user", &user);

    let html = render(&state.templates, "news/comment_edit.html", &context)?;
    Ok(html.into_response())
}

/// POST /news/comment/{id}/edit
pub async fn edit_comment(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Form(form): Form<CommentForm>,
) -> Result<Response, PageError> {
    match state.comment_service.update(id, user.id, &form.text).await {
        Ok(comment) => Ok(redirect_found(&format!("/news/{}", comment.news_id))),
        Err(CommentServiceError::ValidationError(msg)) => {
            let mut comment = state
                .comment_service
                .get_owned(id, user.id)
                .await
                .map_err(comment_error)?;
            comment.text = form.text;

            let mut context = Context::new();
            context.insert("comment", &comment);
            context.insert("current_user", &user);
            context.insert("error", &msg);

            let html = render(&state.templates, "news/comment_edit.html", &context)?;
            Ok(html.into_response())
        }
        Err(err) => Err(comment_error(err)),
    }
}

/// GET /news/comment/{id}/delete
pub async fn delete_comment_page(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<Response, PageError> {
    let comment = state
        .comment_service
        .get_owned(id, user.id)
        .await
        .map_err(comment_error)?;

    let mut context = Context::new();
    context.insert("comment", &comment);
    context.insert("current_user", &user);

    let html = render(&state.templates, "news/comment_delete.html", &context)?;
    Ok(html.into_response())
}

/// POST /news/comment/{id}/delete
pub async fn delete_comment(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<Response, PageError> {
    let comment = state
        .comment_service
        .delete(id, user.id)
        .await
        .map_err(comment_error)?;

    Ok(redirect_found(&format!("/news/{}", comment.news_id)))
}
