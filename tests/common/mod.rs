//! Shared fixtures for integration tests
//!
//! Each test builds a fresh router on an in-memory database and drives it
//! with `tower::ServiceExt::oneshot`, passing the session cookie by hand.

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Request, Response, StatusCode},
    Router,
};
use chrono::{DateTime, Utc};
use http_body_util::BodyExt;
use sqlx::SqlitePool;
use std::sync::Arc;
use tower::ServiceExt;

use pressnote::{
    db::{
        create_test_pool, migrations,
        repositories::{
            SqlxCommentRepository, SqlxNewsRepository, SqlxNoteRepository,
            SqlxSessionRepository, SqlxUserRepository,
        },
    },
    services::{CommentService, NewsService, NoteService, UserService},
    web::{self, AppState},
};

pub const PASSWORD: &str = "test_password_1";

pub struct TestApp {
    pub router: Router,
    pub pool: SqlitePool,
}

/// Build a full application on a fresh in-memory database
pub async fn test_app() -> TestApp {
    let pool = create_test_pool().await.expect("Failed to create test pool");
    migrations::run_migrations(&pool)
        .await
        .expect("Failed to run migrations");

    let news_repo = SqlxNewsRepository::boxed(pool.clone());

    let state = AppState {
        pool: pool.clone(),
        user_service: Arc::new(UserService::new(
            SqlxUserRepository::boxed(pool.clone()),
            SqlxSessionRepository::boxed(pool.clone()),
        )),
        note_service: Arc::new(NoteService::new(SqlxNoteRepository::boxed(pool.clone()))),
        news_service: Arc::new(NewsService::new(news_repo.clone(), 10)),
        comment_service: Arc::new(CommentService::new(
            SqlxCommentRepository::boxed(pool.clone()),
            news_repo,
            vec!["spam".to_string(), "scam".to_string()],
        )),
        templates: Arc::new(web::templates::build_templates().expect("Failed to build templates")),
    };

    TestApp {
        router: web::build_router(state),
        pool,
    }
}

/// Issue a GET request, optionally with a session cookie
pub async fn get(app: &TestApp, path: &str, cookie: Option<&str>) -> Response<Body> {
    let mut builder = Request::builder().uri(path);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    let request = builder.body(Body::empty()).expect("Failed to build request");

    app.router
        .clone()
        .oneshot(request)
        .await
        .expect("Request failed")
}

/// Issue a form POST request, optionally with a session cookie
pub async fn post_form(
    app: &TestApp,
    path: &str,
    body: &str,
    cookie: Option<&str>,
) -> Response<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(path)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    let request = builder
        .body(Body::from(body.to_string()))
        .expect("Failed to build request");

    app.router
        .clone()
        .oneshot(request)
        .await
        .expect("Request failed")
}

/// Collect a response body into a string
pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("Failed to read body")
        .to_bytes();
    String::from_utf8(bytes.to_vec()).expect("Body was not UTF-8")
}

/// The Location header of a redirect response
pub fn location(response: &Response<Body>) -> String {
    response
        .headers()
        .get(header::LOCATION)
        .expect("Missing Location header")
        .to_str()
        .expect("Invalid Location header")
        .to_string()
}

/// Extract the `session=<token>` pair from a Set-Cookie header
pub fn session_cookie(response: &Response<Body>) -> String {
    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("Missing Set-Cookie header")
        .to_str()
        .expect("Invalid Set-Cookie header");

    set_cookie
        .split(';')
        .next()
        .expect("Empty Set-Cookie header")
        .to_string()
}

/// Register a user and log in, returning the session cookie
pub async fn signup_and_login(app: &TestApp, username: &str) -> String {
    let signup_body = format!(
        "username={username}&email={username}%40example.com&password={PASSWORD}"
    );
    let response = post_form(app, "/auth/signup", &signup_body, None).await;
    assert_eq!(response.status(), StatusCode::FOUND, "signup should succeed");

    let login_body = format!("username={username}&password={PASSWORD}");
    let response = post_form(app, "/auth/login", &login_body, None).await;
    assert_eq!(response.status(), StatusCode::FOUND, "login should succeed");

    session_cookie(&response)
}

/// Look up a user's id by name
pub async fn user_id(pool: &SqlitePool, username: &str) -> i64 {
    sqlx::query_scalar("SELECT id FROM users WHERE username = ?")
        .bind(username)
        .fetch_one(pool)
        .await
        .expect("User not found")
}

/// Insert a news item directly, returning its id
pub async fn seed_news(pool: &SqlitePool, title: &str, date: DateTime<Utc>) -> i64 {
    let result = sqlx::query("INSERT INTO news (title, text, date) VALUES (?, ?, ?)")
        .bind(title)
        .bind("News body text")
        .bind(date)
        .execute(pool)
        .await
        .expect("Failed to seed news");
    result.last_insert_rowid()
}

/// Insert a comment directly, returning its id
pub async fn seed_comment(
    pool: &SqlitePool,
    news_id: i64,
    author_id: i64,
    text: &str,
    created: DateTime<Utc>,
) -> i64 {
    let result = sqlx::query(
        "INSERT INTO comments (news_id, author_id, text, created, updated_at) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(news_id)
    .bind(author_id)
    .bind(text)
    .bind(created)
    .bind(created)
    .execute(pool)
    .await
    .expect("Failed to seed comment");
    result.last_insert_rowid()
}

/// Insert a note directly, returning its id
pub async fn seed_note(pool: &SqlitePool, author_id: i64, title: &str, slug: &str) -> i64 {
    let now = Utc::now();
    let result = sqlx::query(
        "INSERT INTO notes (title, text, slug, author_id, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(title)
    .bind("Note body")
    .bind(slug)
    .bind(author_id)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await
    .expect("Failed to seed note");
    result.last_insert_rowid()
}

pub async fn note_count(pool: &SqlitePool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM notes")
        .fetch_one(pool)
        .await
        .expect("Failed to count notes")
}

pub async fn comment_count(pool: &SqlitePool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM comments")
        .fetch_one(pool)
        .await
        .expect("Failed to count comments")
}
