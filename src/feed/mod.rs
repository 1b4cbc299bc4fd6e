//! Orchestration of the three collections, the suggestion lifecycle, and
//! the scroll-triggered pagination.
//!
//! Everything here runs on the single cooperative async context: each await
//! is immediately followed by the synchronous application of its outcome, so
//! completions land in arrival order and no locking is needed. Failures are
//! never propagated as panics or dropped silently; every one lands in an
//! observable `error` field on the state it belongs to.

pub mod sync;

use crate::api::{ApiClient, CommentUpdate};
use crate::domain::{Article, Comment};
use crate::state::{Collection, FetchTrigger, Suggestion};

pub const DEFAULT_CATEGORY: &str = "business";

/// All client-side feed state, constructed explicitly and passed by
/// reference into the operations below. No ambient singletons.
pub struct FeedState {
    pub articles: Collection<Article>,
    pub favorites: Collection<Article>,
    pub comments: Collection<Comment>,
    pub suggestion: Suggestion,
    pub category: String,
    /// Article whose comment thread is currently open.
    pub selected_article: Option<String>,
    /// True while browsing the favorites view; routes counter deltas into
    /// the favorites cache as well.
    pub from_favorites: bool,
    pub article_trigger: FetchTrigger,
    pub favorites_trigger: FetchTrigger,
    pub comment_trigger: FetchTrigger,
}

impl FeedState {
    pub fn new() -> Self {
        Self {
            articles: Collection::new(),
            favorites: Collection::new(),
            comments: Collection::new(),
            suggestion: Suggestion::new(),
            category: DEFAULT_CATEGORY.to_string(),
            selected_article: None,
            from_favorites: false,
            article_trigger: FetchTrigger::new(),
            favorites_trigger: FetchTrigger::new(),
            comment_trigger: FetchTrigger::new(),
        }
    }
}

impl Default for FeedState {
    fn default() -> Self {
        Self::new()
    }
}

/// Fetch one page of articles for the current category and append it.
pub async fn fetch_article_page(api: &dyn ApiClient, state: &mut FeedState, page: u32) {
    state.articles.begin_fetch();
    match api.articles_page(page, &state.category).await {
        Ok(fetched) => {
            tracing::debug!(page, count = fetched.articles.len(), "applied article page");
            state
                .articles
                .apply_page(page, fetched.articles, fetched.total_pages);
        }
        Err(e) => {
            tracing::warn!(page, error = %e, "article page fetch failed");
            state.articles.fail(e.to_string());
        }
    }
}

/// Scroll-trigger entry point for the article list. Issues at most one
/// fetch per page no matter how often the visibility signal repeats.
pub async fn maybe_fetch_more_articles(
    api: &dyn ApiClient,
    state: &mut FeedState,
    sentinel_is_last: bool,
    visible: bool,
) {
    let Some(page) = state
        .article_trigger
        .request(&state.articles.cursor, sentinel_is_last, visible)
    else {
        return;
    };

    fetch_article_page(api, state, page).await;
    if state.articles.error.is_some() {
        state.article_trigger.abort();
    } else {
        state.article_trigger.settle(&state.articles.cursor);
    }
}

/// Title search within the current category; replaces the whole list.
pub async fn search_articles(api: &dyn ApiClient, state: &mut FeedState, title: &str) {
    state.articles.begin_fetch();
    match api.search_articles(title, &state.category).await {
        Ok(articles) => {
            state.articles.replace_all(articles, 1);
            state.article_trigger.reset();
        }
        Err(e) => state.articles.fail(e.to_string()),
    }
}

/// Explicit context change: discard accumulated articles and re-arm the
/// trigger before the first fetch of the new category.
pub fn switch_category(state: &mut FeedState, category: impl Into<String>) {
    state.category = category.into();
    state.articles.reset();
    state.article_trigger.reset();
}

/// Open an article's comment thread: reset the comment collection for the
/// new context, record the view, and load the first page of comments. The
/// view bump is optimistic-on-success; the favorites cache is refreshed
/// afterwards since the backend recomputes favorites ordering on views.
pub async fn select_article(api: &dyn ApiClient, state: &mut FeedState, article_id: &str) {
    state.selected_article = Some(article_id.to_string());
    state.comments.reset();
    state.comment_trigger.reset();
    state.suggestion.clear();

    match api.record_view(article_id).await {
        Ok(viewed_id) => {
            state.articles.mutate(&viewed_id, |a| a.views += 1);
            refresh_favorites(api, state).await;
        }
        Err(e) => {
            tracing::warn!(article_id, error = %e, "view record failed");
            state.articles.fail(e.to_string());
        }
    }

    fetch_comment_page(api, state, 1).await;
}

/// Fetch one page of comments for the selected article and append it.
pub async fn fetch_comment_page(api: &dyn ApiClient, state: &mut FeedState, page: u32) {
    let Some(article_id) = state.selected_article.clone() else {
        return;
    };

    state.comments.begin_fetch();
    match api.comments_page(page, &article_id).await {
        Ok(fetched) => {
            state
                .comments
                .apply_page(page, fetched.comments, fetched.total_pages);
        }
        Err(e) => state.comments.fail(e.to_string()),
    }
}

/// Scroll-trigger entry point for the comment thread.
pub async fn maybe_fetch_more_comments(
    api: &dyn ApiClient,
    state: &mut FeedState,
    sentinel_is_last: bool,
    visible: bool,
) {
    let Some(page) = state
        .comment_trigger
        .request(&state.comments.cursor, sentinel_is_last, visible)
    else {
        return;
    };

    fetch_comment_page(api, state, page).await;
    if state.comments.error.is_some() {
        state.comment_trigger.abort();
    } else {
        state.comment_trigger.settle(&state.comments.cursor);
    }
}

/// Replace the favorites cache with its first page.
pub async fn refresh_favorites(api: &dyn ApiClient, state: &mut FeedState) {
    state.favorites.begin_fetch();
    match api.favorites_page(1).await {
        Ok(fetched) => {
            state
                .favorites
                .replace_all(fetched.articles, fetched.total_pages);
            state.favorites_trigger.reset();
        }
        Err(e) => state.favorites.fail(e.to_string()),
    }
}

/// Append the next page of favorites.
pub async fn fetch_favorites_page(api: &dyn ApiClient, state: &mut FeedState, page: u32) {
    state.favorites.begin_fetch();
    match api.favorites_page(page).await {
        Ok(fetched) => {
            state
                .favorites
                .apply_page(page, fetched.articles, fetched.total_pages);
        }
        Err(e) => state.favorites.fail(e.to_string()),
    }
}

/// Scroll-trigger entry point for the favorites view.
pub async fn maybe_fetch_more_favorites(
    api: &dyn ApiClient,
    state: &mut FeedState,
    sentinel_is_last: bool,
    visible: bool,
) {
    let Some(page) = state
        .favorites_trigger
        .request(&state.favorites.cursor, sentinel_is_last, visible)
    else {
        return;
    };

    fetch_favorites_page(api, state, page).await;
    if state.favorites.error.is_some() {
        state.favorites_trigger.abort();
    } else {
        state.favorites_trigger.settle(&state.favorites.cursor);
    }
}

/// Post a new comment. On success the thread restarts from page one (the
/// new comment sorts to the top server-side) and the denormalized counters
/// are bumped; on failure nothing is counted and the error is surfaced.
pub async fn create_comment(api: &dyn ApiClient, state: &mut FeedState, contents: &str) {
    let Some(article_id) = state.selected_article.clone() else {
        return;
    };

    match api.create_comment(&article_id, contents).await {
        Ok(created) => {
            tracing::debug!(comment = %created.id, %article_id, "comment created");
            state.comments.reset();
            state.comment_trigger.reset();
            fetch_comment_page(api, state, 1).await;
            sync::propagate_comment_delta(
                &mut state.articles,
                &mut state.favorites,
                state.from_favorites,
                &article_id,
                1,
            );
        }
        Err(e) => {
            tracing::warn!(%article_id, error = %e, "comment create failed");
            state.comments.fail(e.to_string());
        }
    }
}

/// Delete a comment. On success it is dropped locally and the counters are
/// decremented (floored at zero); on failure the thread is untouched.
pub async fn delete_comment(api: &dyn ApiClient, state: &mut FeedState, comment_id: &str) {
    let Some(article_id) = state.selected_article.clone() else {
        return;
    };

    match api.delete_comment(comment_id).await {
        Ok(deleted_id) => {
            state.comments.remove(&deleted_id);
            sync::propagate_comment_delta(
                &mut state.articles,
                &mut state.favorites,
                state.from_favorites,
                &article_id,
                -1,
            );
        }
        Err(e) => {
            tracing::warn!(comment_id, error = %e, "comment delete failed");
            state.comments.fail(e.to_string());
        }
    }
}

/// Rewrite a comment's body; the server's authoritative copy is patched
/// back into the thread in place.
pub async fn edit_comment(
    api: &dyn ApiClient,
    state: &mut FeedState,
    comment_id: &str,
    contents: &str,
) {
    let update = CommentUpdate {
        contents: Some(contents.to_string()),
        like_request: false,
    };
    apply_comment_update(api, state, comment_id, update).await;
}

/// Toggle the caller's like on a comment.
pub async fn toggle_like(api: &dyn ApiClient, state: &mut FeedState, comment_id: &str) {
    let update = CommentUpdate {
        contents: None,
        like_request: true,
    };
    apply_comment_update(api, state, comment_id, update).await;
}

async fn apply_comment_update(
    api: &dyn ApiClient,
    state: &mut FeedState,
    comment_id: &str,
    update: CommentUpdate,
) {
    match api.update_comment(comment_id, &update).await {
        Ok(patch) => {
            state
                .comments
                .mutate(&patch.id, |c| c.apply_patch(patch.contents, patch.likes));
        }
        Err(e) => {
            tracing::warn!(comment_id, error = %e, "comment update failed");
            state.comments.fail(e.to_string());
        }
    }
}

/// Ask for a suggested reply to the current draft. No-op while a request
/// is pending or a suggestion is already waiting to be consumed.
pub async fn request_suggestion(api: &dyn ApiClient, state: &mut FeedState, draft: &str) {
    if !state.suggestion.begin() {
        tracing::debug!("suggestion request skipped, one already in flight or available");
        return;
    }

    match api.suggest_reply(draft).await {
        Ok(text) => state.suggestion.resolve(text),
        Err(e) => state.suggestion.fail(e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::api::types::{ArticlePage, CommentPage, CommentPatch};
    use crate::app::{Result, TidingsError};

    /// Canned backend for engine tests: deterministic pages plus per-method
    /// call counters and switchable failures.
    #[derive(Default)]
    struct MockApi {
        comments_calls: AtomicUsize,
        favorites_calls: AtomicUsize,
        suggest_calls: AtomicUsize,
        view_calls: AtomicUsize,
        fail_create: bool,
        fail_delete: bool,
        comment_total_pages: u32,
    }

    impl MockApi {
        fn new() -> Self {
            Self {
                comment_total_pages: 3,
                ..Self::default()
            }
        }

        fn article(id: &str, count: u32) -> Article {
            let mut article = Article::new(id, format!("article {}", id));
            article.total_comment_count = count;
            article
        }

        fn comment_page(&self, page: u32, article_id: &str) -> CommentPage {
            let comments = (0..10)
                .map(|i| Comment::new(format!("c{}-{}", page, i), article_id, "text"))
                .collect();
            CommentPage {
                comments,
                total_pages: self.comment_total_pages,
            }
        }
    }

    #[async_trait]
    impl ApiClient for MockApi {
        async fn articles_page(&self, page: u32, _category: &str) -> Result<ArticlePage> {
            let articles = (0..5)
                .map(|i| Self::article(&format!("a{}-{}", page, i), 0))
                .collect();
            Ok(ArticlePage {
                articles,
                total_pages: 3,
            })
        }

        async fn search_articles(&self, title: &str, _category: &str) -> Result<Vec<Article>> {
            Ok(vec![Self::article(&format!("s-{}", title), 0)])
        }

        async fn favorites_page(&self, page: u32) -> Result<ArticlePage> {
            self.favorites_calls.fetch_add(1, Ordering::SeqCst);
            Ok(ArticlePage {
                articles: vec![
                    Self::article("a1", 9),
                    Self::article(&format!("f{}", page), 0),
                ],
                total_pages: 2,
            })
        }

        async fn record_view(&self, article_id: &str) -> Result<String> {
            self.view_calls.fetch_add(1, Ordering::SeqCst);
            Ok(article_id.to_string())
        }

        async fn comments_page(&self, page: u32, article_id: &str) -> Result<CommentPage> {
            self.comments_calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.comment_page(page, article_id))
        }

        async fn create_comment(&self, article_id: &str, contents: &str) -> Result<Comment> {
            if self.fail_create {
                return Err(TidingsError::Api("create rejected".into()));
            }
            Ok(Comment::new("c-new", article_id, contents))
        }

        async fn update_comment(
            &self,
            comment_id: &str,
            update: &CommentUpdate,
        ) -> Result<CommentPatch> {
            Ok(CommentPatch {
                id: comment_id.to_string(),
                contents: update.contents.clone(),
                likes: update.like_request.then(|| vec!["u1".to_string()]),
            })
        }

        async fn delete_comment(&self, comment_id: &str) -> Result<String> {
            if self.fail_delete {
                return Err(TidingsError::Api("delete rejected".into()));
            }
            Ok(comment_id.to_string())
        }

        async fn suggest_reply(&self, _draft: &str) -> Result<String> {
            self.suggest_calls.fetch_add(1, Ordering::SeqCst);
            Ok("a suggested reply".to_string())
        }
    }

    fn state_with_article(id: &str, count: u32) -> FeedState {
        let mut state = FeedState::new();
        state
            .articles
            .apply_page(1, vec![MockApi::article(id, count)], 1);
        state.selected_article = Some(id.to_string());
        state
    }

    #[tokio::test]
    async fn test_comment_page_grows_list_and_cursor() {
        let api = MockApi::new();
        let mut state = state_with_article("a1", 3);

        fetch_comment_page(&api, &mut state, 1).await;
        assert_eq!(state.comments.len(), 10);
        fetch_comment_page(&api, &mut state, 2).await;

        assert_eq!(state.comments.len(), 20);
        assert_eq!(state.comments.cursor.page, 2);
        assert_eq!(state.comments.cursor.total_pages, 3);
        assert!(state.comments.cursor.has_more());
    }

    #[tokio::test]
    async fn test_create_comment_bumps_counter_and_restarts_thread() {
        let api = MockApi::new();
        let mut state = state_with_article("a1", 3);
        fetch_comment_page(&api, &mut state, 1).await;
        fetch_comment_page(&api, &mut state, 2).await;

        create_comment(&api, &mut state, "hello").await;

        assert_eq!(state.articles.get("a1").unwrap().total_comment_count, 4);
        // Thread restarted from page one.
        assert_eq!(state.comments.cursor.page, 1);
        assert_eq!(state.comments.len(), 10);
    }

    #[tokio::test]
    async fn test_create_failure_leaves_counters_alone() {
        let api = MockApi {
            fail_create: true,
            ..MockApi::new()
        };
        let mut state = state_with_article("a1", 3);
        fetch_comment_page(&api, &mut state, 1).await;
        let before = state.comments.len();

        create_comment(&api, &mut state, "hello").await;

        assert_eq!(state.articles.get("a1").unwrap().total_comment_count, 3);
        assert_eq!(state.comments.len(), before);
        assert_eq!(state.comments.error.as_deref(), Some("API error: create rejected"));
    }

    #[tokio::test]
    async fn test_delete_decrements_and_floors_at_zero() {
        let api = MockApi::new();
        let mut state = state_with_article("a1", 1);
        fetch_comment_page(&api, &mut state, 1).await;

        delete_comment(&api, &mut state, "c1-0").await;
        assert_eq!(state.articles.get("a1").unwrap().total_comment_count, 0);
        assert!(state.comments.get("c1-0").is_none());

        delete_comment(&api, &mut state, "c1-1").await;
        assert_eq!(state.articles.get("a1").unwrap().total_comment_count, 0);
    }

    #[tokio::test]
    async fn test_counter_scenario_three_four_three_two() {
        let api = MockApi::new();
        let mut state = state_with_article("a1", 3);
        fetch_comment_page(&api, &mut state, 1).await;

        create_comment(&api, &mut state, "hello").await;
        assert_eq!(state.articles.get("a1").unwrap().total_comment_count, 4);

        delete_comment(&api, &mut state, "c1-0").await;
        assert_eq!(state.articles.get("a1").unwrap().total_comment_count, 3);

        delete_comment(&api, &mut state, "c1-1").await;
        assert_eq!(state.articles.get("a1").unwrap().total_comment_count, 2);
    }

    #[tokio::test]
    async fn test_favorites_counter_only_from_favorites_view() {
        let api = MockApi::new();
        let mut state = state_with_article("a1", 3);
        state
            .favorites
            .apply_page(1, vec![MockApi::article("a1", 3)], 1);
        fetch_comment_page(&api, &mut state, 1).await;

        create_comment(&api, &mut state, "from articles view").await;
        assert_eq!(state.favorites.get("a1").unwrap().total_comment_count, 3);

        state.from_favorites = true;
        create_comment(&api, &mut state, "from favorites view").await;
        assert_eq!(state.favorites.get("a1").unwrap().total_comment_count, 4);
        assert_eq!(state.articles.get("a1").unwrap().total_comment_count, 5);
    }

    #[tokio::test]
    async fn test_suggestion_request_guard_prevents_duplicates() {
        let api = MockApi::new();
        let mut state = FeedState::new();

        // Simulated in-flight request: the guard must refuse a second one.
        assert!(state.suggestion.begin());
        request_suggestion(&api, &mut state, "draft").await;
        assert_eq!(api.suggest_calls.load(Ordering::SeqCst), 0);
        assert!(state.suggestion.is_pending());

        // Once resolved, a consume clears the way for a fresh request.
        state.suggestion.resolve("done".into());
        request_suggestion(&api, &mut state, "draft").await;
        assert_eq!(api.suggest_calls.load(Ordering::SeqCst), 0);

        state.suggestion.consume();
        request_suggestion(&api, &mut state, "draft").await;
        assert_eq!(api.suggest_calls.load(Ordering::SeqCst), 1);
        assert_eq!(state.suggestion.text(), "a suggested reply");
    }

    #[tokio::test]
    async fn test_scroll_trigger_fetches_each_page_once() {
        let api = MockApi::new();
        let mut state = state_with_article("a1", 0);

        maybe_fetch_more_comments(&api, &mut state, true, true).await;
        assert_eq!(api.comments_calls.load(Ordering::SeqCst), 1);
        assert_eq!(state.comments.cursor.page, 1);

        // Repeated visibility for the already-applied page: the cursor has
        // advanced, so the next page is requested exactly once more.
        maybe_fetch_more_comments(&api, &mut state, true, true).await;
        maybe_fetch_more_comments(&api, &mut state, true, false).await;
        maybe_fetch_more_comments(&api, &mut state, false, true).await;
        assert_eq!(api.comments_calls.load(Ordering::SeqCst), 2);
        assert_eq!(state.comments.cursor.page, 2);
    }

    #[tokio::test]
    async fn test_scroll_trigger_stops_at_last_page() {
        let api = MockApi {
            comment_total_pages: 1,
            ..MockApi::new()
        };
        let mut state = state_with_article("a1", 0);
        fetch_comment_page(&api, &mut state, 1).await;
        assert_eq!(api.comments_calls.load(Ordering::SeqCst), 1);

        for _ in 0..5 {
            maybe_fetch_more_comments(&api, &mut state, true, true).await;
        }
        assert_eq!(api.comments_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_select_article_resets_thread_and_records_view() {
        let api = MockApi::new();
        let mut state = state_with_article("a1", 3);
        fetch_comment_page(&api, &mut state, 1).await;
        fetch_comment_page(&api, &mut state, 2).await;

        select_article(&api, &mut state, "a1").await;

        assert_eq!(api.view_calls.load(Ordering::SeqCst), 1);
        assert_eq!(state.articles.get("a1").unwrap().views, 1);
        assert_eq!(state.comments.cursor.page, 1);
        assert_eq!(state.comments.len(), 10);
        // Favorites refreshed from the backend alongside the view bump.
        assert_eq!(state.favorites.get("a1").unwrap().total_comment_count, 9);
    }

    #[tokio::test]
    async fn test_edit_and_like_patch_in_place() {
        let api = MockApi::new();
        let mut state = state_with_article("a1", 3);
        fetch_comment_page(&api, &mut state, 1).await;

        edit_comment(&api, &mut state, "c1-0", "better wording").await;
        let edited = state.comments.get("c1-0").unwrap();
        assert_eq!(edited.contents, "better wording");
        assert!(edited.is_edited);

        toggle_like(&api, &mut state, "c1-1").await;
        let liked = state.comments.get("c1-1").unwrap();
        assert!(liked.liked_by("u1"));
        assert!(!liked.is_edited);
    }

    #[tokio::test]
    async fn test_favorites_paginate_without_duplicates() {
        let api = MockApi::new();
        let mut state = FeedState::new();

        refresh_favorites(&api, &mut state).await;
        assert_eq!(state.favorites.len(), 2);
        assert!(state.favorites.cursor.has_more());

        // The repeated "a1" from the overlapping page is dropped on append.
        fetch_favorites_page(&api, &mut state, 2).await;
        assert_eq!(state.favorites.len(), 3);
        assert_eq!(state.favorites.cursor.page, 2);
        assert!(!state.favorites.cursor.has_more());
    }

    #[tokio::test]
    async fn test_favorites_scroll_trigger_loads_next_page_once() {
        let api = MockApi::new();
        let mut state = FeedState::new();
        state.from_favorites = true;

        refresh_favorites(&api, &mut state).await;
        assert_eq!(api.favorites_calls.load(Ordering::SeqCst), 1);

        // Reaching the end of the rendered favorites list must pull page
        // two exactly once, however often the signal repeats.
        for _ in 0..5 {
            maybe_fetch_more_favorites(&api, &mut state, true, true).await;
        }
        assert_eq!(api.favorites_calls.load(Ordering::SeqCst), 2);
        assert_eq!(state.favorites.len(), 3);
        assert_eq!(state.favorites.cursor.page, 2);
        assert!(!state.favorites.cursor.has_more());
    }

    #[tokio::test]
    async fn test_refresh_rearms_favorites_trigger() {
        let api = MockApi::new();
        let mut state = FeedState::new();

        refresh_favorites(&api, &mut state).await;
        maybe_fetch_more_favorites(&api, &mut state, true, true).await;
        assert_eq!(state.favorites.cursor.page, 2);

        // A refresh drops back to page one; the trigger must not hold a
        // stale latch for the page it already fetched.
        refresh_favorites(&api, &mut state).await;
        assert_eq!(state.favorites.cursor.page, 1);
        maybe_fetch_more_favorites(&api, &mut state, true, true).await;
        assert_eq!(state.favorites.cursor.page, 2);
        assert_eq!(api.favorites_calls.load(Ordering::SeqCst), 4);
    }

    #[tokio::test]
    async fn test_switch_category_resets_articles() {
        let api = MockApi::new();
        let mut state = FeedState::new();
        fetch_article_page(&api, &mut state, 1).await;
        assert_eq!(state.articles.len(), 5);

        switch_category(&mut state, "sports");
        assert!(state.articles.is_empty());
        assert_eq!(state.category, "sports");
        assert_eq!(state.articles.cursor.page, 0);
    }

    #[tokio::test]
    async fn test_search_replaces_list() {
        let api = MockApi::new();
        let mut state = FeedState::new();
        fetch_article_page(&api, &mut state, 1).await;
        fetch_article_page(&api, &mut state, 2).await;

        search_articles(&api, &mut state, "rates").await;
        assert_eq!(state.articles.len(), 1);
        assert_eq!(state.articles.cursor.page, 1);
    }
}
