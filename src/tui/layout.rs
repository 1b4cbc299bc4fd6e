use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::tui::app::{ActivePane, TuiApp};

pub fn render(frame: &mut Frame, app: &mut TuiApp) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(40), // Articles
            Constraint::Min(8),         // Comments
            Constraint::Length(6),      // Compose
            Constraint::Length(1),      // Status bar
        ])
        .split(frame.area());

    render_articles_pane(frame, app, chunks[0]);
    render_comments_pane(frame, app, chunks[1]);
    render_compose_pane(frame, app, chunks[2]);
    render_status_bar(frame, app, chunks[3]);
}

fn border_style(active: bool) -> Style {
    if active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

fn render_articles_pane(frame: &mut Frame, app: &mut TuiApp, area: Rect) {
    let is_active = app.active_pane == ActivePane::Articles;
    let (title, loading) = if app.feed.from_favorites {
        ("Favorites", app.feed.favorites.loading)
    } else {
        ("Articles", app.feed.articles.loading)
    };

    let items: Vec<ListItem> = app
        .visible_articles()
        .iter()
        .map(|article| {
            let line = Line::from(vec![
                Span::raw(article.display_title().to_string()),
                Span::styled(
                    format!(
                        "  {} comments, {} views",
                        article.total_comment_count, article.views
                    ),
                    Style::default().fg(Color::DarkGray),
                ),
            ]);
            ListItem::new(line)
        })
        .collect();

    let header = if loading {
        format!("{} (loading...)", title)
    } else {
        let cursor = if app.feed.from_favorites {
            app.feed.favorites.cursor
        } else {
            app.feed.articles.cursor
        };
        format!("{} [{}/{}]", title, cursor.page, cursor.total_pages)
    };

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style(is_active))
                .title(header),
        )
        .highlight_style(
            Style::default()
                .bg(Color::Cyan)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        );

    frame.render_stateful_widget(list, area, &mut app.article_list_state);
}

fn render_comments_pane(frame: &mut Frame, app: &mut TuiApp, area: Rect) {
    let is_active = app.active_pane == ActivePane::Comments;

    let items: Vec<ListItem> = app
        .feed
        .comments
        .items()
        .iter()
        .map(|comment| {
            let edited = if comment.is_edited { " (edited)" } else { "" };
            let line = Line::from(vec![
                Span::styled(
                    format!("{}: ", comment.author.name),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw(comment.contents.clone()),
                Span::styled(
                    format!("  [{} likes]{}", comment.total_likes(), edited),
                    Style::default().fg(Color::DarkGray),
                ),
            ]);
            ListItem::new(line)
        })
        .collect();

    let header = match &app.feed.comments.error {
        Some(err) => format!("Comments - error: {}", err),
        None if app.feed.comments.loading => "Comments (loading...)".to_string(),
        None => format!(
            "Comments [{}/{}]",
            app.feed.comments.cursor.page, app.feed.comments.cursor.total_pages
        ),
    };

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style(is_active))
                .title(header),
        )
        .highlight_style(Style::default().bg(Color::DarkGray));

    frame.render_stateful_widget(list, area, &mut app.comment_list_state);
}

fn render_compose_pane(frame: &mut Frame, app: &TuiApp, area: Rect) {
    let is_active = app.active_pane == ActivePane::Compose;

    let mut lines = vec![Line::from(app.draft.as_str())];
    if let Some(reveal) = &app.reveal {
        lines.push(Line::from(Span::styled(
            reveal.visible(),
            Style::default().fg(Color::Magenta),
        )));
    } else if app.feed.suggestion.is_pending() {
        lines.push(Line::from(Span::styled(
            "thinking about a reply...",
            Style::default().fg(Color::DarkGray),
        )));
    }
    if let Some(err) = &app.feed.suggestion.error {
        lines.push(Line::from(Span::styled(
            format!("suggestion failed: {}", err),
            Style::default().fg(Color::Red),
        )));
    }

    let title = if app.feed.suggestion.is_available() {
        "Compose - Ctrl+y to use the suggestion"
    } else {
        "Compose - Ctrl+s for a suggested reply"
    };

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style(is_active))
            .title(title),
    );

    frame.render_widget(paragraph, area);
}

fn render_status_bar(frame: &mut Frame, app: &TuiApp, area: Rect) {
    let text = match &app.status_message {
        Some(message) => message.clone(),
        None => {
            "q quit | j/k move | Enter open | f favorites | i compose | l like | d delete | R refresh"
                .to_string()
        }
    };

    let paragraph = Paragraph::new(text).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(paragraph, area);
}
