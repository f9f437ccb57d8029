//! Path command - show the branch path leading to a message

use anyhow::{bail, Result};
use chat_search_index::IndexStore;

use crate::cli::{Cli, OutputFormat};
use crate::output::{colors, human, json};

pub fn run(cli: &Cli, store: &IndexStore, message_id: &str) -> Result<()> {
    let (Some(record), Some(path)) = (store.get(message_id), store.message_path(message_id)) else {
        bail!("Message not found: {}", message_id);
    };

    match cli.format {
        OutputFormat::Human => {
            println!("{}", colors::header("Branch Path"));
            println!();
            println!("{}", human::format_path(&path, record));
        }

        OutputFormat::Json => {
            println!("{}", json::format_path(message_id, &path, cli.pretty)?);
        }

        OutputFormat::Minimal => {
            for uuid in &path {
                println!("{}", uuid);
            }
        }
    }

    Ok(())
}
