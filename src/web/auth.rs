//! Auth pages
//!
//! Signup, login, and logout. A successful login sets the `session` cookie
//! and honours an optional `next` parameter, which is only followed when it
//! is a local path.

use crate::services::{LoginInput, RegisterInput, UserServiceError};
use crate::web::middleware::{extract_session_token, redirect_found, AppState, PageError};
use crate::web::templates::render;
use axum::{
    extract::{Query, State},
    http::{header, HeaderMap},
    response::{IntoResponse, Response},
    Form,
};
use serde::Deserialize;
use tera::Context;

/// Session cookie lifetime in seconds (7 days)
const SESSION_COOKIE_MAX_AGE: i64 = 7 * 24 * 60 * 60;

#[derive(Debug, Deserialize)]
pub struct SignupForm {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub next: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginQuery {
    #[serde(default)]
    pub next: String,
}

fn session_cookie(token: &str) -> String {
    format!(
        "session={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={SESSION_COOKIE_MAX_AGE}"
    )
}

fn clear_session_cookie() -> &'static str {
    "session=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0"
}

/// Only follow redirects to local paths, never to other hosts
fn safe_next(next: &str) -> Option<&str> {
    if next.starts_with('/') && !next.starts_with("//") {
        Some(next)
    } else {
        None
    }
}

pub async fn signup_page(State(state): State<AppState>) -> Result<Response, PageError> {
    let html = render(&state.templates, "auth/signup.html", &Context::new())?;
    Ok(html.into_response())
}

pub async fn signup(
    State(state): State<AppState>,
    Form(form): Form<SignupForm>,
) -> Result<Response, PageError> {
    let result = state
        .user_service
        .register(RegisterInput {
            username: form.username.clone(),
            email: form.email.clone(),
            password: form.password,
        })
        .await;

    match result {
        Ok(_) => Ok(redirect_found("/auth/login")),
        Err(UserServiceError::ValidationError(msg)) | Err(UserServiceError::UserExists(msg)) => {
            let mut context = Context::new();
            context.insert("error", &msg);
            context.insert("username", &form.username);
            context.insert("email", &form.email);
            let html = render(&state.templates, "auth/signup.html", &context)?;
            Ok(html.into_response())
        }
        Err(err) => Err(PageError::Internal(err.into())),
    }
}

pub async fn login_page(
    State(state): State<AppState>,
    Query(query): Query<LoginQuery>,
) -> Result<Response, PageError> {
    let mut context = Context::new();
    context.insert("next", &query.next);
    let html = render(&state.templates, "auth/login.html", &context)?;
    Ok(html.into_response())
}

pub async fn login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<Response, PageError> {
    let result = state
        .user_service
        .login(LoginInput {
            username_or_email: form.username.clone(),
            password: form.password,
        })
        .await;

    match result {
        Ok(session) => {
            let target = safe_next(&form.next).unwrap_or("/");
            let mut response = redirect_found(target);
            response.headers_mut().insert(
                header::SET_COOKIE,
                session_cookie(&session.id)
                    .parse()
                    .map_err(|e| anyhow::anyhow!("Invalid cookie value: {e}"))?,
            );
            Ok(response)
        }
        Err(UserServiceError::AuthenticationError(msg)) => {
            let mut context = Context::new();
            context.insert("error", &msg);
            context.insert("username", &form.username);
            context.insert("next", &form.next);
            let html = render(&state.templates, "auth/login.html", &context)?;
            Ok(html.into_response())
        }
        Err(err) => Err(PageError::Internal(err.into())),
    }
}

pub async fn logout_page(State(state): State<AppState>) -> Result<Response, PageError> {
    let html = render(&state.templates, "auth/logout.html", &Context::new())?;
    Ok(html.into_response())
}

pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, PageError> {
    if let Some(token) = extract_session_token(&headers) {
        if let Err(err) = state.user_service.logout(&token).await {
            tracing::warn!("Logout failed: {err}");
        }
    }

    let mut response = redirect_found("/");
    response.headers_mut().insert(
        header::SET_COOKIE,
        clear_session_cookie()
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid cookie value: {e}"))?,
    );
    Ok(response)
}
