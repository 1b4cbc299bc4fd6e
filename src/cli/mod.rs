pub mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "tidings", about = "Terminal client for the tidings article feed", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List one page of articles in a category
    Articles {
        /// Category to browse (defaults to the configured one)
        #[arg(long)]
        category: Option<String>,
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Search articles by title within a category
    Search {
        title: String,
        #[arg(long)]
        category: Option<String>,
    },
    /// List one page of an article's comment thread
    Comments {
        article_id: String,
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Ask for a suggested reply to a draft comment
    Suggest { draft: String },
    /// Launch the TUI
    Tui,
}
