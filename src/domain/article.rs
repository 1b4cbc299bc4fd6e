use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::Entity;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    pub id: String,
    pub title: String,
    pub contents: Option<String>,
    pub category: String,
    pub views: u64,
    /// Denormalized count of comments on this article. Kept in sync
    /// locally by the comment-count propagation step, not by refetching.
    pub total_comment_count: u32,
    pub created_at: Option<DateTime<Utc>>,
}

impl Article {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            contents: None,
            category: String::new(),
            views: 0,
            total_comment_count: 0,
            created_at: None,
        }
    }

    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            "(Untitled)"
        } else {
            &self.title
        }
    }

    pub fn display_contents(&self) -> &str {
        self.contents.as_deref().unwrap_or("")
    }
}

impl Entity for Article {
    fn id(&self) -> &str {
        &self.id
    }
}
