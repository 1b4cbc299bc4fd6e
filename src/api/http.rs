use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde_json::json;
use url::Url;

use crate::api::types::{
    ArticlePage, ArticlePageBody, CommentDoc, CommentPage, CommentPageBody, CommentPatch,
    CommentPatchBody, ErrorBody, SuggestionBody, ViewReceiptBody,
};
use crate::api::{ApiClient, CommentUpdate};
use crate::app::{Result, TidingsError};
use crate::domain::{Article, Comment};

pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

pub struct HttpApiClient {
    client: Client,
    base_url: Url,
}

impl HttpApiClient {
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .gzip(true)
            .brotli(true)
            .user_agent(concat!("tidings/", env!("CARGO_PKG_VERSION")))
            .build()?;

        // A trailing slash makes Url::join treat the last segment as a
        // directory rather than replacing it.
        let mut base = base_url.to_string();
        if !base.ends_with('/') {
            base.push('/');
        }

        Ok(Self {
            client,
            base_url: Url::parse(&base)?,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path)?)
    }

    /// Decode a response, surfacing the server's error message verbatim on
    /// non-success statuses when the body carries one.
    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json::<T>().await?);
        }

        let message = match response.json::<ErrorBody>().await {
            Ok(body) => body
                .message
                .or(body.error)
                .unwrap_or_else(|| status.to_string()),
            Err(_) => status.to_string(),
        };
        Err(TidingsError::Api(message))
    }
}

#[async_trait]
impl ApiClient for HttpApiClient {
    async fn articles_page(&self, page: u32, category: &str) -> Result<ArticlePage> {
        let response = self
            .client
            .get(self.endpoint("articles")?)
            .query(&[("page", page.to_string()), ("category", category.into())])
            .send()
            .await?;
        let body: ArticlePageBody = Self::decode(response).await?;
        Ok(body.into())
    }

    async fn search_articles(&self, title: &str, category: &str) -> Result<Vec<Article>> {
        let response = self
            .client
            .get(self.endpoint("articles")?)
            .query(&[("searchTitle", title), ("category", category)])
            .send()
            .await?;
        let body: ArticlePageBody = Self::decode(response).await?;
        Ok(body.articles.into_iter().map(Article::from).collect())
    }

    async fn favorites_page(&self, page: u32) -> Result<ArticlePage> {
        let response = self
            .client
            .get(self.endpoint("articles/favorite")?)
            .query(&[("page", page.to_string())])
            .send()
            .await?;
        let body: ArticlePageBody = Self::decode(response).await?;
        Ok(body.into())
    }

    async fn record_view(&self, article_id: &str) -> Result<String> {
        let response = self
            .client
            .put(self.endpoint(&format!("articles/view/{}", article_id))?)
            .send()
            .await?;
        let body: ViewReceiptBody = Self::decode(response).await?;
        Ok(body.article.id)
    }

    async fn comments_page(&self, page: u32, article_id: &str) -> Result<CommentPage> {
        let response = self
            .client
            .get(self.endpoint("comments")?)
            .query(&[("page", page.to_string()), ("articleId", article_id.into())])
            .send()
            .await?;
        let body: CommentPageBody = Self::decode(response).await?;
        Ok(body.into())
    }

    async fn create_comment(&self, article_id: &str, contents: &str) -> Result<Comment> {
        let response = self
            .client
            .post(self.endpoint("comments")?)
            .json(&json!({ "articleId": article_id, "contents": contents }))
            .send()
            .await?;
        let doc: CommentDoc = Self::decode(response).await?;
        Ok(doc.into())
    }

    async fn update_comment(
        &self,
        comment_id: &str,
        update: &CommentUpdate,
    ) -> Result<CommentPatch> {
        let mut body = serde_json::Map::new();
        if let Some(contents) = &update.contents {
            body.insert("contents".into(), json!(contents));
        }
        if update.like_request {
            body.insert("likeRequest".into(), json!(true));
        }

        let response = self
            .client
            .put(self.endpoint(&format!("comments/{}", comment_id))?)
            .json(&body)
            .send()
            .await?;
        let body: CommentPatchBody = Self::decode(response).await?;
        Ok(body.into())
    }

    async fn delete_comment(&self, comment_id: &str) -> Result<String> {
        let response = self
            .client
            .delete(self.endpoint(&format!("comments/{}", comment_id))?)
            .send()
            .await?;
        // The backend echoes the deleted comment's id as a bare JSON string.
        let id: String = Self::decode(response).await?;
        Ok(id)
    }

    async fn suggest_reply(&self, draft: &str) -> Result<String> {
        let response = self
            .client
            .post(self.endpoint("ai")?)
            .json(&json!({ "comment": draft }))
            .send()
            .await?;
        let body: SuggestionBody = Self::decode(response).await?;
        Ok(body.suggested_comment.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_relative_paths() {
        let client = HttpApiClient::new("http://localhost:5000/api/", DEFAULT_TIMEOUT_SECS).unwrap();
        let url = client.endpoint("articles/favorite").unwrap();
        assert_eq!(url.as_str(), "http://localhost:5000/api/articles/favorite");
    }

    #[test]
    fn test_rejects_invalid_base_url() {
        assert!(HttpApiClient::new("not a url", DEFAULT_TIMEOUT_SECS).is_err());
    }
}
