//! chat-search - CLI for searching chat export files

mod cli;
mod commands;
mod output;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Command};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let store = commands::load_index(&cli).await?;

    match &cli.command {
        Command::Search {
            query,
            mode,
            dedup,
            content_only,
            thinking_only,
            limit,
            highlight,
        } => {
            let args = commands::search::SearchArgs {
                query,
                mode: (*mode).into(),
                dedup: *dedup,
                content_only: *content_only,
                thinking_only: *thinking_only,
                limit: *limit,
                highlight: *highlight,
            };
            commands::search::run(&cli, &store, &args)
        }

        Command::Stats => commands::stats::run(&cli, &store),

        Command::Path { message_id } => commands::path::run(&cli, &store, message_id),
    }
}
