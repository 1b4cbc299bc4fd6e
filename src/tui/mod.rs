pub mod app;
pub mod event;
pub mod layout;

use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;

use crossterm::{
    event::{KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::app::{AppContext, Result};
use crate::feed::{self, FeedState};
use crate::reveal::RevealSession;

use self::app::{ActivePane, TuiApp};
use self::event::{Action, AppEvent, EventHandler};

type Tui = Terminal<CrosstermBackend<Stdout>>;

pub async fn run(ctx: Arc<AppContext>) -> Result<()> {
    let mut terminal = setup_terminal()?;
    let result = run_app(&mut terminal, ctx).await;
    restore_terminal(&mut terminal)?;
    result
}

fn setup_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

async fn run_app(terminal: &mut Tui, ctx: Arc<AppContext>) -> Result<()> {
    let mut feed_state = FeedState::new();
    feed_state.category = ctx.config.ui.category.clone();
    feed::fetch_article_page(ctx.api.as_ref(), &mut feed_state, 1).await;
    feed::refresh_favorites(ctx.api.as_ref(), &mut feed_state).await;

    let mut tui_app = TuiApp::new(feed_state);
    let event_handler = EventHandler::new(Duration::from_millis(100));
    let reveal_tick = Duration::from_millis(ctx.config.ui.reveal_interval_ms);

    loop {
        terminal.draw(|frame| layout::render(frame, &mut tui_app))?;

        match event_handler.next()? {
            AppEvent::Key(key) => {
                if tui_app.active_pane == ActivePane::Compose {
                    handle_compose_key(&ctx, &mut tui_app, key, reveal_tick).await;
                } else {
                    handle_browse_action(&ctx, &mut tui_app, Action::from(key)).await;
                }
                tui_app.clamp_selection();
            }
            AppEvent::Tick => {
                // Reveal progress is produced by its own timer task; ticks
                // only exist so the next draw picks it up.
            }
        }

        if tui_app.should_quit {
            break;
        }
    }

    Ok(())
}

async fn handle_browse_action(ctx: &Arc<AppContext>, tui_app: &mut TuiApp, action: Action) {
    let api = ctx.api.as_ref();
    match action {
        Action::Quit => {
            tui_app.should_quit = true;
        }
        Action::MoveUp => {
            tui_app.move_up();
        }
        Action::MoveDown => {
            let at_end = tui_app.move_down();
            // Reaching the last rendered row is the sentinel-visibility
            // signal; the trigger de-duplicates repeated firings.
            match tui_app.active_pane {
                ActivePane::Articles if tui_app.feed.from_favorites => {
                    feed::maybe_fetch_more_favorites(api, &mut tui_app.feed, at_end, at_end).await;
                }
                ActivePane::Articles => {
                    feed::maybe_fetch_more_articles(api, &mut tui_app.feed, at_end, at_end).await;
                }
                ActivePane::Comments => {
                    feed::maybe_fetch_more_comments(api, &mut tui_app.feed, at_end, at_end).await;
                }
                ActivePane::Compose => {}
            }
        }
        Action::NextPane => {
            tui_app.active_pane = tui_app.active_pane.next();
        }
        Action::PrevPane => {
            tui_app.active_pane = tui_app.active_pane.prev();
        }
        Action::Select => {
            if tui_app.active_pane == ActivePane::Articles {
                if let Some(article) = tui_app.selected_article() {
                    let article_id = article.id.clone();
                    feed::select_article(api, &mut tui_app.feed, &article_id).await;
                    tui_app.comment_index = 0;
                    tui_app.active_pane = ActivePane::Comments;
                }
            }
        }
        Action::Refresh => {
            let category = tui_app.feed.category.clone();
            feed::switch_category(&mut tui_app.feed, category);
            feed::fetch_article_page(api, &mut tui_app.feed, 1).await;
            tui_app.article_index = 0;
            tui_app.set_status("Refreshed".to_string());
        }
        Action::ToggleFavorites => {
            tui_app.feed.from_favorites = !tui_app.feed.from_favorites;
            if tui_app.feed.from_favorites {
                feed::refresh_favorites(api, &mut tui_app.feed).await;
            }
            tui_app.article_index = 0;
        }
        Action::LikeComment => {
            if tui_app.active_pane == ActivePane::Comments {
                if let Some(comment_id) = tui_app.selected_comment_id() {
                    feed::toggle_like(api, &mut tui_app.feed, &comment_id).await;
                }
            }
        }
        Action::DeleteComment => {
            if tui_app.active_pane == ActivePane::Comments {
                if let Some(comment_id) = tui_app.selected_comment_id() {
                    feed::delete_comment(api, &mut tui_app.feed, &comment_id).await;
                    tui_app.set_status("Comment deleted".to_string());
                }
            }
        }
        Action::Compose => {
            if tui_app.feed.selected_article.is_some() {
                tui_app.active_pane = ActivePane::Compose;
            } else {
                tui_app.set_status("Open an article before commenting".to_string());
            }
        }
        Action::None => {}
    }
}

async fn handle_compose_key(
    ctx: &Arc<AppContext>,
    tui_app: &mut TuiApp,
    key: KeyEvent,
    reveal_tick: Duration,
) {
    let api = ctx.api.as_ref();
    match key.code {
        KeyCode::Esc => {
            // Dismiss: empty draft means any suggestion is stale too.
            tui_app.draft.clear();
            tui_app.feed.suggestion.clear();
            tui_app.cancel_reveal();
            tui_app.active_pane = ActivePane::Comments;
        }
        KeyCode::Enter => {
            let contents = tui_app.draft.trim().to_string();
            if contents.is_empty() {
                return;
            }
            feed::create_comment(api, &mut tui_app.feed, &contents).await;
            tui_app.draft.clear();
            tui_app.feed.suggestion.clear();
            tui_app.cancel_reveal();
            tui_app.comment_index = 0;
            if tui_app.feed.comments.error.is_none() {
                tui_app.set_status("Comment posted".to_string());
            }
        }
        KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            if tui_app.draft.trim().is_empty() {
                return;
            }
            let had_suggestion = tui_app.feed.suggestion.is_available();
            feed::request_suggestion(api, &mut tui_app.feed, &tui_app.draft.clone()).await;
            if !had_suggestion && tui_app.feed.suggestion.is_available() {
                // New suggestion text: restart the reveal against it.
                tui_app.reveal = Some(RevealSession::start(
                    tui_app.feed.suggestion.text().to_string(),
                    reveal_tick,
                ));
            }
        }
        KeyCode::Char('y') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            if tui_app.feed.suggestion.is_available() {
                tui_app.draft = tui_app.feed.suggestion.consume();
                tui_app.cancel_reveal();
            }
        }
        KeyCode::Backspace => {
            tui_app.draft.pop();
            if tui_app.draft.is_empty() {
                // Matches the empty-input reset: a cleared draft discards
                // the pending suggestion state as well.
                tui_app.feed.suggestion.clear();
                tui_app.cancel_reveal();
            }
        }
        KeyCode::Char(c) => {
            tui_app.draft.push(c);
        }
        _ => {}
    }
}
