//! Database layer
//!
//! SQLite-backed storage for the Pressnote service:
//! - connection pool creation (file-based or in-memory)
//! - embedded versioned migrations
//! - repository traits and their sqlx implementations

pub mod migrations;
pub mod pool;
pub mod repositories;

pub use pool::{create_pool, create_test_pool};
