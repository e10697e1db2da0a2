//! Page content
//!
//! What each page actually shows: feed size and ordering, comment ordering,
//! the comment form's visibility, and note list isolation between users.

mod common;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use common::*;

#[tokio::test]
async fn home_page_caps_news_count() {
    let app = test_app().await;
    for day in 0..15 {
        seed_news(
            &app.pool,
            &format!("News {day}"),
            Utc::now() - Duration::days(day),
        )
        .await;
    }

    let response = get(&app, "/", None).await;
    let body = body_text(response).await;

    let shown = body.matches("<li>").count();
    assert_eq!(shown, 10, "home page should show at most 10 items");
}

#[tokio::test]
async fn home_page_orders_newest_first() {
    let app = test_app().await;
    seed_news(&app.pool, "Oldest", Utc::now() - Duration::days(5)).await;
    seed_news(&app.pool, "Newest", Utc::now()).await;
    seed_news(&app.pool, "Middle", Utc::now() - Duration::days(2)).await;

    let response = get(&app, "/", None).await;
    let body = body_text(response).await;

    let newest = body.find("Newest").expect("Newest missing");
    let middle = body.find("Middle").expect("Middle missing");
    let oldest = body.find("Oldest").expect("Oldest missing");
    assert!(newest < middle && middle < oldest);
}

#[tokio::test]
async fn home_page_second_page_has_remainder() {
    let app = test_app().await;
    for day in 0..15 {
        seed_news(
            &app.pool,
            &format!("News {day}"),
            Utc::now() - Duration::days(day),
        )
        .await;
    }

    let response = get(&app, "/?page=2", None).await;
    let body = body_text(response).await;

    assert_eq!(body.matches("<li>").count(), 5);
}

#[tokio::test]
async fn detail_page_orders_comments_oldest_first() {
    let app = test_app().await;
    signup_and_login(&app, "talker").await;
    let author_id = user_id(&app.pool, "talker").await;
    let news_id = seed_news(&app.pool, "Story", Utc::now()).await;
    seed_comment(
        &app.pool,
        news_id,
        author_id,
        "Earliest comment",
        Utc::now() - Duration::hours(2),
    )
    .await;
    seed_comment(
        &app.pool,
        news_id,
        author_id,
        "Latest comment",
        Utc::now(),
    )
    .await;

    let response = get(&app, &format!("/news/{news_id}"), None).await;
    let body = body_text(response).await;

    let earliest = body.find("Earliest comment").expect("comment missing");
    let latest = body.find("Latest comment").expect("comment missing");
    assert!(earliest < latest);
}

#[tokio::test]
async fn anonymous_detail_page_has_no_comment_form() {
    let app = test_app().await;
    let news_id = seed_news(&app.pool, "Story", Utc::now()).await;

    let response = get(&app, &format!("/news/{news_id}"), None).await;
    let body = body_text(response).await;

    assert!(!body.contains("comment-form"));
    assert!(body.contains("/auth/login"), "should invite the reader to log in");
}

#[tokio::test]
async fn authenticated_detail_page_has_comment_form() {
    let app = test_app().await;
    let cookie = signup_and_login(&app, "talker").await;
    let news_id = seed_news(&app.pool, "Story", Utc::now()).await;

    let response = get(&app, &format!("/news/{news_id}"), Some(&cookie)).await;
    let body = body_text(response).await;

    assert!(body.contains("comment-form"));
    assert!(body.contains("name=\"text\""));
}

#[tokio::test]
async fn notes_list_shows_only_own_notes() {
    let app = test_app().await;
    let cookie = signup_and_login(&app, "author").await;
    let author_id = user_id(&app.pool, "author").await;
    seed_note(&app.pool, author_id, "My visible note", "mine").await;

    signup_and_login(&app, "stranger").await;
    let stranger_id = user_id(&app.pool, "stranger").await;
    seed_note(&app.pool, stranger_id, "Foreign note", "foreign").await;

    let response = get(&app, "/notes", Some(&cookie)).await;
    let body = body_text(response).await;

    assert!(body.contains("My visible note"));
    assert!(!body.contains("Foreign note"));
}

#[tokio::test]
async fn add_page_has_note_form_fields() {
    let app = test_app().await;
    let cookie = signup_and_login(&app, "writer").await;

    let response = get(&app, "/notes/add", Some(&cookie)).await;
    let body = body_text(response).await;

    for field in ["name=\"title\"", "name=\"text\"", "name=\"slug\""] {
        assert!(body.contains(field), "missing {field}");
    }
}

#[tokio::test]
async fn edit_page_is_prefilled_with_the_note() {
    let app = test_app().await;
    let cookie = signup_and_login(&app, "writer").await;
    let author_id = user_id(&app.pool, "writer").await;
    seed_note(&app.pool, author_id, "Editable title", "editable").await;

    let response = get(&app, "/notes/editable/edit", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;

    assert!(body.contains("Editable title"));
    assert!(body.contains("value=\"editable\""));
}

#[tokio::test]
async fn login_page_carries_next_target() {
    let app = test_app().await;

    let response = get(&app, "/auth/login?next=%2Fnotes%2Fadd", None).await;
    let body = body_text(response).await;

    // Slashes in attribute values come out HTML-escaped
    assert!(body.contains("name=\"next\" value=\"&#x2F;notes&#x2F;add\""));
}

#[tokio::test]
async fn nav_reflects_session_state() {
    let app = test_app().await;
    let cookie = signup_and_login(&app, "navuser").await;

    let body = body_text(get(&app, "/", None).await).await;
    assert!(body.contains("Log in"));
    assert!(!body.contains("Signed in as"));

    let body = body_text(get(&app, "/", Some(&cookie)).await).await;
    assert!(body.contains("Signed in as navuser"));
}
