pub mod article;
pub mod comment;

pub use article::Article;
pub use comment::{Comment, CommentAuthor};

/// Anything held by a [`Collection`](crate::state::Collection): addressable
/// by a stable identifier assigned by the backend.
pub trait Entity {
    fn id(&self) -> &str;
}
