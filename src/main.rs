use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use tidings::app::{AppContext, TidingsError};
use tidings::cli::{commands, Cli, Commands};
use tidings::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = Config::load().map_err(|e| TidingsError::Config(e.to_string()))?;
    let ctx = AppContext::new(config)?;

    match cli.command {
        Commands::Articles { category, page } => {
            commands::list_articles(&ctx, category, page).await?;
        }
        Commands::Search { title, category } => {
            commands::search_articles(&ctx, &title, category).await?;
        }
        Commands::Comments { article_id, page } => {
            commands::list_comments(&ctx, &article_id, page).await?;
        }
        Commands::Suggest { draft } => {
            commands::suggest_reply(&ctx, &draft).await?;
        }
        Commands::Tui => {
            tidings::tui::run(Arc::new(ctx)).await?;
        }
    }

    Ok(())
}
