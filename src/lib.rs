//! # Tidings
//!
//! A terminal-first client for an article-feed service with nested
//! commenting, optimistic comment counters, infinite-scroll pagination,
//! and an assistant-suggested-reply feature.
//!
//! ## Architecture
//!
//! ```text
//! ApiClient → FeedState (collections + triggers + suggestion) → UI
//! ```
//!
//! - [`api`]: typed boundary to the backend; every wire shape is narrowed
//!   into domain models before it enters the engine
//! - [`state`]: the leaf state machines (pagination cursor, collection
//!   store, suggestion lifecycle, scroll-fetch trigger)
//! - [`feed`]: orchestration of the three collections and the cross-cache
//!   comment-count propagation
//! - [`reveal`]: cancelable typewriter presentation of a suggested reply
//! - [`tui`]: terminal user interface built with ratatui
//!
//! ## Quick start
//!
//! ```bash
//! # Browse a category
//! tidings articles --category business
//!
//! # Search by title
//! tidings search "interest rates"
//!
//! # Read a comment thread
//! tidings comments 64f1c0ffee
//!
//! # Launch the TUI
//! tidings tui
//! ```

/// Application context and error handling.
///
/// [`AppContext`](app::AppContext) wires the configured API client into
/// everything else; [`TidingsError`](app::TidingsError) is the crate-wide
/// error type.
pub mod app;

/// Typed boundary to the backend.
///
/// - [`ApiClient`](api::ApiClient): async trait over every endpoint
/// - [`HttpApiClient`](api::http::HttpApiClient): reqwest implementation
/// - [`types`](api::types): serde schemas for each response shape
pub mod api;

/// Command-line interface using clap.
pub mod cli;

/// Configuration management.
///
/// Loads from `~/.config/tidings/config.toml`: backend base URL, request
/// timeout, reveal tick interval, startup category.
pub mod config;

/// Core domain models: [`Article`](domain::Article) with its denormalized
/// comment count, and [`Comment`](domain::Comment) with likes and edit
/// state.
pub mod domain;

/// Orchestration of the feed: [`FeedState`](feed::FeedState), the async
/// operations that drive it, and the comment-count propagation across the
/// article caches.
pub mod feed;

/// Character-by-character reveal of a suggested reply.
///
/// - [`Reveal`](reveal::Reveal): pure prefix state machine
/// - [`RevealSession`](reveal::RevealSession): cancelable timer task
pub mod reveal;

/// Leaf state machines shared by the collections:
/// [`PageCursor`](state::PageCursor), [`Collection`](state::Collection),
/// [`Suggestion`](state::Suggestion), [`FetchTrigger`](state::FetchTrigger).
pub mod state;

/// Terminal user interface.
///
/// Three-pane layout (articles, comments, compose) plus a status bar.
/// Keybindings: j/k navigate, Tab cycles panes, Enter opens an article,
/// f toggles favorites, i composes, l likes, d deletes, R refreshes,
/// q quits.
pub mod tui;
