use crate::app::{AppContext, Result, TidingsError};
use crate::feed::{self, FeedState};

fn new_state(ctx: &AppContext, category: Option<String>) -> FeedState {
    let mut state = FeedState::new();
    state.category = category.unwrap_or_else(|| ctx.config.ui.category.clone());
    state
}

pub async fn list_articles(ctx: &AppContext, category: Option<String>, page: u32) -> Result<()> {
    let mut state = new_state(ctx, category);
    feed::fetch_article_page(ctx.api.as_ref(), &mut state, page).await;

    if let Some(err) = state.articles.error.take() {
        return Err(TidingsError::Other(err));
    }

    if state.articles.is_empty() {
        println!("No articles in category '{}'", state.category);
        return Ok(());
    }

    println!(
        "{} (page {}/{})",
        state.category, state.articles.cursor.page, state.articles.cursor.total_pages
    );
    for article in state.articles.items() {
        println!(
            "{}  {} ({} comments, {} views)",
            article.id,
            article.display_title(),
            article.total_comment_count,
            article.views
        );
    }

    Ok(())
}

pub async fn search_articles(ctx: &AppContext, title: &str, category: Option<String>) -> Result<()> {
    let mut state = new_state(ctx, category);
    feed::search_articles(ctx.api.as_ref(), &mut state, title).await;

    if let Some(err) = state.articles.error.take() {
        return Err(TidingsError::Other(err));
    }

    if state.articles.is_empty() {
        println!("No articles matching '{}'", title);
        return Ok(());
    }

    for article in state.articles.items() {
        println!("{}  {}", article.id, article.display_title());
    }

    Ok(())
}

pub async fn list_comments(ctx: &AppContext, article_id: &str, page: u32) -> Result<()> {
    let mut state = new_state(ctx, None);
    state.selected_article = Some(article_id.to_string());
    feed::fetch_comment_page(ctx.api.as_ref(), &mut state, page).await;

    if let Some(err) = state.comments.error.take() {
        return Err(TidingsError::Other(err));
    }

    if state.comments.is_empty() {
        println!("No comments");
        return Ok(());
    }

    println!(
        "page {}/{}",
        state.comments.cursor.page, state.comments.cursor.total_pages
    );
    for comment in state.comments.items() {
        let edited = if comment.is_edited { " (edited)" } else { "" };
        println!(
            "{} [{} likes]{}\n  {}",
            comment.author.name,
            comment.total_likes(),
            edited,
            comment.contents
        );
    }

    Ok(())
}

pub async fn suggest_reply(ctx: &AppContext, draft: &str) -> Result<()> {
    let mut state = new_state(ctx, None);
    feed::request_suggestion(ctx.api.as_ref(), &mut state, draft).await;

    if let Some(err) = state.suggestion.error.take() {
        return Err(TidingsError::Other(err));
    }

    println!("{}", state.suggestion.text());
    Ok(())
}
