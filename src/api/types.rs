//! Wire shapes for every backend response, plus their narrowing into the
//! domain models. Field names follow the backend's conventions (`_id`,
//! `totalPageNum`, `commentList`), so everything here is serde-renamed and
//! nothing outside this module sees them.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::domain::{Article, Comment, CommentAuthor};

#[derive(Debug, Deserialize)]
pub struct ArticleDoc {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub contents: Option<String>,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub views: u64,
    /// Some endpoints send the denormalized count, others embed the raw
    /// comment array and leave deriving the count to the client.
    #[serde(rename = "totalCommentCount")]
    pub total_comment_count: Option<u32>,
    #[serde(default)]
    pub comments: Vec<serde_json::Value>,
    #[serde(rename = "createdAt")]
    pub created_at: Option<DateTime<Utc>>,
}

impl From<ArticleDoc> for Article {
    fn from(doc: ArticleDoc) -> Self {
        let total_comment_count = doc
            .total_comment_count
            .unwrap_or(doc.comments.len() as u32);
        Article {
            id: doc.id,
            title: doc.title,
            contents: doc.contents,
            category: doc.category,
            views: doc.views,
            total_comment_count,
            created_at: doc.created_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UserRef {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct LikeRef {
    #[serde(rename = "userId")]
    pub user_id: String,
}

#[derive(Debug, Deserialize)]
pub struct CommentDoc {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "articleId", default)]
    pub article_id: String,
    #[serde(rename = "userId")]
    pub author: Option<UserRef>,
    #[serde(default)]
    pub contents: String,
    #[serde(default)]
    pub likes: Vec<LikeRef>,
    #[serde(rename = "isEdited", default)]
    pub is_edited: bool,
    #[serde(rename = "createdAt")]
    pub created_at: Option<DateTime<Utc>>,
}

impl From<CommentDoc> for Comment {
    fn from(doc: CommentDoc) -> Self {
        Comment {
            id: doc.id,
            article_id: doc.article_id,
            author: doc
                .author
                .map(|u| CommentAuthor {
                    id: u.id,
                    name: u.name,
                })
                .unwrap_or_default(),
            contents: doc.contents,
            likes: doc.likes.into_iter().map(|l| l.user_id).collect(),
            is_edited: doc.is_edited,
            created_at: doc.created_at,
        }
    }
}

/// One page of articles: `{articles: [...], totalPageNum}`.
#[derive(Debug)]
pub struct ArticlePage {
    pub articles: Vec<Article>,
    pub total_pages: u32,
}

#[derive(Debug, Deserialize)]
pub struct ArticlePageBody {
    pub articles: Vec<ArticleDoc>,
    #[serde(rename = "totalPageNum", default = "one")]
    pub total_page_num: u32,
}

impl From<ArticlePageBody> for ArticlePage {
    fn from(body: ArticlePageBody) -> Self {
        ArticlePage {
            articles: body.articles.into_iter().map(Article::from).collect(),
            total_pages: body.total_page_num,
        }
    }
}

/// One page of comments: `{commentList: [...], totalPageNum}`.
#[derive(Debug)]
pub struct CommentPage {
    pub comments: Vec<Comment>,
    pub total_pages: u32,
}

#[derive(Debug, Deserialize)]
pub struct CommentPageBody {
    #[serde(rename = "commentList")]
    pub comment_list: Vec<CommentDoc>,
    #[serde(rename = "totalPageNum", default = "one")]
    pub total_page_num: u32,
}

impl From<CommentPageBody> for CommentPage {
    fn from(body: CommentPageBody) -> Self {
        CommentPage {
            comments: body.comment_list.into_iter().map(Comment::from).collect(),
            total_pages: body.total_page_num,
        }
    }
}

/// `PUT /articles/view/{id}` response: `{article: {_id}}`.
#[derive(Debug, Deserialize)]
pub struct ViewReceiptBody {
    pub article: ViewedArticleRef,
}

#[derive(Debug, Deserialize)]
pub struct ViewedArticleRef {
    #[serde(rename = "_id")]
    pub id: String,
}

/// `PUT /comments/{id}` response: `{findComment: {_id, contents, likes}}`.
#[derive(Debug, Deserialize)]
pub struct CommentPatchBody {
    #[serde(rename = "findComment")]
    pub find_comment: CommentPatchDoc,
}

#[derive(Debug, Deserialize)]
pub struct CommentPatchDoc {
    #[serde(rename = "_id")]
    pub id: String,
    pub contents: Option<String>,
    pub likes: Option<Vec<LikeRef>>,
}

/// Narrowed patch applied to the locally cached comment.
#[derive(Debug)]
pub struct CommentPatch {
    pub id: String,
    pub contents: Option<String>,
    pub likes: Option<Vec<String>>,
}

impl From<CommentPatchBody> for CommentPatch {
    fn from(body: CommentPatchBody) -> Self {
        CommentPatch {
            id: body.find_comment.id,
            contents: body.find_comment.contents,
            likes: body
                .find_comment
                .likes
                .map(|likes| likes.into_iter().map(|l| l.user_id).collect()),
        }
    }
}

/// `POST /ai` response: `{suggestedComment: {content}}`.
#[derive(Debug, Deserialize)]
pub struct SuggestionBody {
    #[serde(rename = "suggestedComment")]
    pub suggested_comment: SuggestedComment,
}

#[derive(Debug, Deserialize)]
pub struct SuggestedComment {
    pub content: String,
}

/// Error envelope some endpoints return: `{message: "..."}`.
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub message: Option<String>,
    pub error: Option<String>,
}

fn one() -> u32 {
    1
}
