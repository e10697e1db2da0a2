//! Repository layer
//!
//! Data access behind traits so services can be tested against any backing
//! implementation. The sqlx implementations run plain SQL against SQLite.

pub mod comment;
pub mod news;
pub mod note;
pub mod session;
pub mod user;

pub use comment::{CommentRepository, SqlxCommentRepository};
pub use news::{NewsRepository, SqlxNewsRepository};
pub use note::{NoteRepository, SqlxNoteRepository};
pub use session::{SessionRepository, SqlxSessionRepository};
pub use user::{SqlxUserRepository, UserRepository};
