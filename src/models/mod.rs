//! Data models
//!
//! Database entities and the create/update inputs that flow into the
//! services layer.

mod comment;
mod news;
mod note;
mod session;
mod user;

pub use comment::{Comment, CommentWithAuthor};
pub use news::News;
pub use note::{CreateNoteInput, Note, UpdateNoteInput};
pub use session::Session;
pub use user::User;
