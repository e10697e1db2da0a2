//! Web layer
//!
//! Server-rendered HTML routes. Three route groups:
//! - the public news feed with its comment pages
//! - the notes workspace, which requires a session
//! - signup, login, and logout
//!
//! Anonymous requests to protected pages are redirected to the login page
//! with a `next` parameter pointing back at the original URL.

pub mod auth;
pub mod middleware;
pub mod news;
pub mod notes;
pub mod templates;

use axum::{
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

pub use middleware::AppState;

/// Build the application router
pub fn build_router(state: AppState) -> Router {
    let public = Router::new()
        .route("/", get(news::home_page))
        .route("/news/{id}", get(news::detail_page))
        .route("/notes/home", get(notes::home_page))
        .layer(from_fn_with_state(state.clone(), middleware::optional_auth));

    let protected = Router::new()
        .route("/news/{id}/comment", post(news::create_comment))
        .route(
            "/news/comment/{id}/edit",
            get(news::edit_comment_page).post(news::edit_comment),
        )
        .route(
            "/news/comment/{id}/delete",
            get(news::delete_comment_page).post(news::delete_comment),
        )
        .route("/notes", get(notes::list_page))
        .route("/notes/add", get(notes::add_page).post(notes::add))
        .route("/notes/done", get(notes::done_page))
        .route("/notes/{slug}", get(notes::detail_page))
        .route(
            "/notes/{slug}/edit",
            get(notes::edit_page).post(notes::edit),
        )
        .route(
            "/notes/{slug}/delete",
            get(notes::delete_page).post(notes::delete),
        )
        .route_layer(from_fn_with_state(state.clone(), middleware::require_auth));

    let auth = Router::new()
        .route("/auth/signup", get(auth::signup_page).post(auth::signup))
        .route("/auth/login", get(auth::login_page).post(auth::login))
        .route("/auth/logout", get(auth::logout_page).post(auth::logout));

    Router::new()
        .merge(public)
        .merge(protected)
        .merge(auth)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
