use ratatui::widgets::ListState;

use crate::domain::Article;
use crate::feed::FeedState;
use crate::reveal::RevealSession;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivePane {
    Articles,
    Comments,
    Compose,
}

impl ActivePane {
    pub fn next(self) -> Self {
        match self {
            ActivePane::Articles => ActivePane::Comments,
            ActivePane::Comments => ActivePane::Compose,
            ActivePane::Compose => ActivePane::Articles,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            ActivePane::Articles => ActivePane::Compose,
            ActivePane::Comments => ActivePane::Articles,
            ActivePane::Compose => ActivePane::Comments,
        }
    }
}

pub struct TuiApp {
    pub feed: FeedState,
    pub active_pane: ActivePane,
    pub article_index: usize,
    pub comment_index: usize,
    /// The comment being written, or the consumed suggestion being edited.
    pub draft: String,
    /// Running typewriter presentation of the current suggestion, if any.
    /// Dropped (and thereby canceled) on supersession, acceptance, or
    /// dismissal.
    pub reveal: Option<RevealSession>,
    pub should_quit: bool,
    pub status_message: Option<String>,
    pub article_list_state: ListState,
    pub comment_list_state: ListState,
}

impl TuiApp {
    pub fn new(feed: FeedState) -> Self {
        let mut article_list_state = ListState::default();
        article_list_state.select(Some(0));
        let mut comment_list_state = ListState::default();
        comment_list_state.select(Some(0));

        Self {
            feed,
            active_pane: ActivePane::Articles,
            article_index: 0,
            comment_index: 0,
            draft: String::new(),
            reveal: None,
            should_quit: false,
            status_message: None,
            article_list_state,
            comment_list_state,
        }
    }

    /// The article list currently on screen: favorites or the category feed.
    pub fn visible_articles(&self) -> &[Article] {
        if self.feed.from_favorites {
            self.feed.favorites.items()
        } else {
            self.feed.articles.items()
        }
    }

    pub fn selected_article(&self) -> Option<&Article> {
        self.visible_articles().get(self.article_index)
    }

    pub fn selected_comment_id(&self) -> Option<String> {
        self.feed
            .comments
            .items()
            .get(self.comment_index)
            .map(|c| c.id.clone())
    }

    pub fn move_up(&mut self) {
        match self.active_pane {
            ActivePane::Articles => {
                if self.article_index > 0 {
                    self.article_index -= 1;
                    self.article_list_state.select(Some(self.article_index));
                }
            }
            ActivePane::Comments => {
                if self.comment_index > 0 {
                    self.comment_index -= 1;
                    self.comment_list_state.select(Some(self.comment_index));
                }
            }
            ActivePane::Compose => {}
        }
    }

    /// Move the selection down. Returns true when the selection was already
    /// on the last rendered item, which is the sentinel-visibility signal
    /// for infinite scroll.
    pub fn move_down(&mut self) -> bool {
        match self.active_pane {
            ActivePane::Articles => {
                let len = self.visible_articles().len();
                if len > 0 && self.article_index < len - 1 {
                    self.article_index += 1;
                    self.article_list_state.select(Some(self.article_index));
                }
                len > 0 && self.article_index == len - 1
            }
            ActivePane::Comments => {
                let len = self.feed.comments.len();
                if len > 0 && self.comment_index < len - 1 {
                    self.comment_index += 1;
                    self.comment_list_state.select(Some(self.comment_index));
                }
                len > 0 && self.comment_index == len - 1
            }
            ActivePane::Compose => false,
        }
    }

    pub fn clamp_selection(&mut self) {
        let articles = self.visible_articles().len();
        if self.article_index >= articles && articles > 0 {
            self.article_index = articles - 1;
        }
        self.article_list_state.select(Some(self.article_index));

        let comments = self.feed.comments.len();
        if self.comment_index >= comments && comments > 0 {
            self.comment_index = comments - 1;
        }
        self.comment_list_state.select(Some(self.comment_index));
    }

    /// Drop the current reveal session, canceling its timer task.
    pub fn cancel_reveal(&mut self) {
        self.reveal = None;
    }

    pub fn set_status(&mut self, message: String) {
        self.status_message = Some(message);
    }
}
