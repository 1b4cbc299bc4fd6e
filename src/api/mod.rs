pub mod http;
pub mod types;

use async_trait::async_trait;

use crate::app::Result;
use crate::domain::{Article, Comment};
use types::{ArticlePage, CommentPage, CommentPatch};

/// Fields sent on a comment update. `like_request` toggles the caller's
/// like; `contents` rewrites the body.
#[derive(Debug, Default, Clone)]
pub struct CommentUpdate {
    pub contents: Option<String>,
    pub like_request: bool,
}

/// Boundary to the backend. Every response shape is narrowed into typed
/// structs before it reaches the engine; every call may fail, and no retry
/// happens at this layer.
#[async_trait]
pub trait ApiClient {
    /// `GET /articles {page, category}`
    async fn articles_page(&self, page: u32, category: &str) -> Result<ArticlePage>;

    /// `GET /articles {searchTitle, category}`
    async fn search_articles(&self, title: &str, category: &str) -> Result<Vec<Article>>;

    /// `GET /articles/favorite {page}`
    async fn favorites_page(&self, page: u32) -> Result<ArticlePage>;

    /// `PUT /articles/view/{id}`; returns the id of the viewed article.
    async fn record_view(&self, article_id: &str) -> Result<String>;

    /// `GET /comments {page, articleId}`
    async fn comments_page(&self, page: u32, article_id: &str) -> Result<CommentPage>;

    /// `POST /comments {articleId, contents}`
    async fn create_comment(&self, article_id: &str, contents: &str) -> Result<Comment>;

    /// `PUT /comments/{id} {contents?, likeRequest?}`
    async fn update_comment(&self, comment_id: &str, update: &CommentUpdate)
        -> Result<CommentPatch>;

    /// `DELETE /comments/{id}`; returns the deleted comment's id.
    async fn delete_comment(&self, comment_id: &str) -> Result<String>;

    /// `POST /ai {comment}`; returns the suggested reply text.
    async fn suggest_reply(&self, draft: &str) -> Result<String>;
}
