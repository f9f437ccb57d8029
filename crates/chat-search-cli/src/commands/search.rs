//! Search command - query messages or conversation titles

use anyhow::Result;
use chat_search_core::highlight_search_text;
use chat_search_index::{IndexStore, SearchMode, SearchOptions, SearchOutcome};
use colored::Colorize;

use crate::cli::{Cli, OutputFormat};
use crate::output::{colors, human, json, minimal};

pub struct SearchArgs<'a> {
    pub query: &'a str,
    pub mode: SearchMode,
    pub dedup: bool,
    pub content_only: bool,
    pub thinking_only: bool,
    pub limit: Option<usize>,
    pub highlight: bool,
}

impl SearchArgs<'_> {
    fn options(&self) -> SearchOptions {
        SearchOptions {
            content_only: self.content_only,
            thinking_only: self.thinking_only,
            remove_duplicates: self.dedup,
            limit: self.limit,
        }
    }
}

pub fn run(cli: &Cli, store: &IndexStore, args: &SearchArgs<'_>) -> Result<()> {
    let outcome = execute(store, args);

    match cli.format {
        OutputFormat::Human => {
            if outcome.results.is_empty() {
                println!("No results found for: {}", args.query.cyan());
                return Ok(());
            }

            println!(
                "{}",
                colors::header(&format!(
                    "Search results for '{}' ({} in {} files, {} conversations)",
                    args.query,
                    colors::format_count(outcome.stats.total),
                    colors::format_count(outcome.stats.files),
                    colors::format_count(outcome.stats.conversations)
                ))
            );
            println!();

            for result in &outcome.results {
                println!("{}", human::format_result(result));
            }
        }

        OutputFormat::Json => {
            println!("{}", json::format_outcome(&outcome, cli.pretty)?);
        }

        OutputFormat::Minimal => {
            for result in &outcome.results {
                println!("{}", minimal::format_result(result));
            }
        }
    }

    Ok(())
}

/// Run the query and apply preview highlighting
fn execute(store: &IndexStore, args: &SearchArgs<'_>) -> SearchOutcome {
    let mut outcome = store.search(args.query, &args.options(), args.mode);
    if args.highlight {
        let query = args.query.trim();
        for result in &mut outcome.results {
            result.preview = highlight_search_text(&result.preview, query);
        }
    }
    outcome
}
