//! Service layer
//!
//! Business logic sitting between the web handlers and the repositories.

pub mod comment;
pub mod news;
pub mod note;
pub mod password;
pub mod user;

pub use comment::{CommentService, CommentServiceError};
pub use news::{NewsPage, NewsService, NewsServiceError};
pub use note::{NoteService, NoteServiceError};
pub use user::{LoginInput, RegisterInput, UserService, UserServiceError};
