//! Pressnote - a small notes and news board

use anyhow::Result;
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pressnote::{
    config::Config,
    db::{
        self,
        repositories::{
            SqlxCommentRepository, SqlxNewsRepository, SqlxNoteRepository,
            SqlxSessionRepository, SqlxUserRepository,
        },
    },
    services::{CommentService, NewsService, NoteService, UserService},
    web::{self, AppState},
};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pressnote=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Pressnote...");

    let config = Config::load(Path::new("config.yml"))?;
    tracing::info!("Configuration loaded");

    let pool = db::create_pool(&config.database).await?;
    tracing::info!("Database connected: {}", config.database.url);

    let applied = db::migrations::run_migrations(&pool).await?;
    tracing::info!("Database migrations completed ({applied} applied)");

    let user_repo = SqlxUserRepository::boxed(pool.clone());
    let session_repo = SqlxSessionRepository::boxed(pool.clone());
    let note_repo = SqlxNoteRepository::boxed(pool.clone());
    let news_repo = SqlxNewsRepository::boxed(pool.clone());
    let comment_repo = SqlxCommentRepository::boxed(pool.clone());

    let user_service = Arc::new(UserService::new(user_repo, session_repo));
    let note_service = Arc::new(NoteService::new(note_repo));
    let news_service = Arc::new(NewsService::new(
        news_repo.clone(),
        config.content.news_page_size,
    ));
    let comment_service = Arc::new(CommentService::new(
        comment_repo,
        news_repo,
        config.content.banned_words.clone(),
    ));

    user_service.cleanup_expired_sessions().await?;

    let templates = Arc::new(web::templates::build_templates()?);

    let state = AppState {
        pool,
        user_service,
        note_service,
        news_service,
        comment_service,
        templates,
    };

    let app = web::build_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, app).await?;

    Ok(())
}
