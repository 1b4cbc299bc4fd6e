//! Propagation of comment-count deltas into the article caches.
//!
//! The articles list and the favorites list each hold their own denormalized
//! copy of `total_comment_count` for the same logical article. They are two
//! independent projections of the same fact, so a delta is applied to each
//! cache separately; there is no shared reference to unify. The favorites
//! copy is only touched when the comment operation originated from the
//! favorites view, matching the accepted staleness window of that cache.

use crate::domain::Article;
use crate::state::Collection;

/// Apply a comment-count delta for `article_id` after a *successful*
/// comment create (+1) or delete (-1). Counts saturate at zero. Articles
/// absent from a cache are skipped; the caches are not transactional.
pub fn propagate_comment_delta(
    articles: &mut Collection<Article>,
    favorites: &mut Collection<Article>,
    from_favorites: bool,
    article_id: &str,
    delta: i32,
) {
    apply_delta(articles, article_id, delta);
    if from_favorites {
        apply_delta(favorites, article_id, delta);
    }
}

fn apply_delta(cache: &mut Collection<Article>, article_id: &str, delta: i32) {
    let hit = cache.mutate(article_id, |article| {
        article.total_comment_count = article.total_comment_count.saturating_add_signed(delta);
    });
    if !hit {
        tracing::debug!(article_id, delta, "comment delta for uncached article");
    }
}
