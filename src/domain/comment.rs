use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::Entity;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommentAuthor {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: String,
    pub article_id: String,
    pub author: CommentAuthor,
    pub contents: String,
    /// Distinct ids of users who liked this comment.
    pub likes: Vec<String>,
    pub is_edited: bool,
    pub created_at: Option<DateTime<Utc>>,
}

impl Comment {
    pub fn new(
        id: impl Into<String>,
        article_id: impl Into<String>,
        contents: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            article_id: article_id.into(),
            author: CommentAuthor::default(),
            contents: contents.into(),
            likes: Vec::new(),
            is_edited: false,
            created_at: None,
        }
    }

    pub fn liked_by(&self, user_id: &str) -> bool {
        self.likes.iter().any(|id| id == user_id)
    }

    pub fn total_likes(&self) -> usize {
        self.likes.len()
    }

    /// Apply the server's authoritative patch after an edit or like request.
    pub fn apply_patch(&mut self, contents: Option<String>, likes: Option<Vec<String>>) {
        if let Some(contents) = contents {
            if contents != self.contents {
                self.is_edited = true;
            }
            self.contents = contents;
        }
        if let Some(likes) = likes {
            self.likes = likes;
        }
    }
}

impl Entity for Comment {
    fn id(&self) -> &str {
        &self.id
    }
}
