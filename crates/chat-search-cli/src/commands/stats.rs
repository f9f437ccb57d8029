//! Stats command - summarize the index

use anyhow::Result;
use chat_search_index::IndexStore;

use crate::cli::{Cli, OutputFormat};
use crate::output::{colors, human, json};

pub fn run(cli: &Cli, store: &IndexStore) -> Result<()> {
    let stats = store.stats();

    match cli.format {
        OutputFormat::Human => {
            println!("{}", colors::header("Index Statistics"));
            println!();
            println!(
                "  {}: {}",
                colors::label("Directory"),
                colors::value(&cli.dir.display().to_string())
            );
            println!("{}", human::format_stats(&stats, store.last_rebuild()));
        }

        OutputFormat::Json => {
            println!(
                "{}",
                json::format_stats(&stats, store.last_rebuild(), cli.pretty)?
            );
        }

        OutputFormat::Minimal => {
            println!("{}", stats.total_messages);
        }
    }

    Ok(())
}
