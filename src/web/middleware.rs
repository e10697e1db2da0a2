//! Session middleware and shared state
//!
//! The session token travels in a `session` cookie. `require_auth` turns an
//! anonymous request into a redirect to the login page carrying the original
//! URL in `next`; `optional_auth` just attaches the user when the cookie is
//! valid.

use crate::models::User;
use crate::services::{CommentService, NewsService, NoteService, UserService};
use axum::{
    extract::{Request, State},
    http::{header, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use sqlx::SqlitePool;
use std::sync::Arc;
use tera::Tera;

/// Application state containing shared services
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub user_service: Arc<UserService>,
    pub note_service: Arc<NoteService>,
    pub news_service: Arc<NewsService>,
    pub comment_service: Arc<CommentService>,
    pub templates: Arc<Tera>,
}

/// Authenticated user attached to request extensions
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

/// Error type for page handlers
#[derive(Debug, thiserror::Error)]
pub enum PageError {
    /// Page (or the object behind it) does not exist for this user
    #[error("Not found")]
    NotFound,

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        match self {
            PageError::NotFound => {
                (StatusCode::NOT_FOUND, "404 Not Found").into_response()
            }
            PageError::Internal(err) => {
                tracing::error!("Request failed: {err:#}");
                (StatusCode::INTERNAL_SERVER_ERROR, "500 Internal Server Error")
                    .into_response()
            }
        }
    }
}

/// Build a 302 redirect response
pub fn redirect_found(to: &str) -> Response {
    let location = HeaderValue::from_str(to)
        .unwrap_or_else(|_| HeaderValue::from_static("/"));
    ([(header::LOCATION, location)], StatusCode::FOUND).into_response()
}

/// Extract the session token from the cookie header
pub fn extract_session_token(headers: &axum::http::HeaderMap) -> Option<String> {
    let cookie_header = headers.get(header::COOKIE)?;
    let cookie_str = cookie_header.to_str().ok()?;

    for cookie in cookie_str.split(';') {
        let cookie = cookie.trim();
        if let Some(token) = cookie.strip_prefix("session=") {
            return Some(token.to_string());
        }
    }

    None
}

/// Where to send an anonymous request, preserving the original URL
pub fn login_redirect_target(request: &Request) -> String {
    let next = request
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or("/");
    format!("/auth/login?next={}", urlencoding::encode(next))
}

/// Authentication middleware for the protected route group
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    if let Some(token) = extract_session_token(request.headers()) {
        if let Ok(user) = state.user_service.validate_session(&token).await {
            request.extensions_mut().insert(CurrentUser(user));
            return next.run(request).await;
        }
    }

    redirect_found(&login_redirect_target(&request))
}

/// Optional authentication middleware for public pages
pub async fn optional_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    if let Some(token) = extract_session_token(request.headers()) {
        if let Ok(user) = state.user_service.validate_session(&token).await {
            request.extensions_mut().insert(CurrentUser(user));
        }
    }
    next.run(request).await
}
