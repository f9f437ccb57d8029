//! CLI argument definitions

use chat_search_index::SearchMode;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Search across chat export files
#[derive(Parser, Debug)]
#[command(name = "chat-search")]
#[command(author = "Claude Code SDK")]
#[command(version)]
#[command(about = "Search across chat export files")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Directory containing export JSON files
    #[arg(long, global = true, env = "CHAT_SEARCH_DIR", default_value = ".")]
    pub dir: PathBuf,

    /// JSON file mapping conversation ids to display names
    #[arg(long, global = true, env = "CHAT_SEARCH_NAMES")]
    pub names: Option<PathBuf>,

    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "human")]
    pub format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format for commands
#[derive(Debug, Clone, Copy, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable output with colors
    #[default]
    Human,
    /// JSON output
    Json,
    /// Minimal text output (ids and previews only)
    Minimal,
}

/// What a search query is matched against
#[derive(Debug, Clone, Copy, ValueEnum, Default)]
pub enum SearchModeArg {
    /// Message content
    #[default]
    All,
    /// Conversation titles
    Titles,
    /// Message content
    Content,
}

impl From<SearchModeArg> for SearchMode {
    fn from(mode: SearchModeArg) -> Self {
        match mode {
            SearchModeArg::All => SearchMode::All,
            SearchModeArg::Titles => SearchMode::Titles,
            SearchModeArg::Content => SearchMode::Content,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Search messages or conversation titles
    Search {
        /// Search query (case-insensitive substring)
        query: String,

        /// Match against message content or conversation titles
        #[arg(short, long, default_value = "all")]
        mode: SearchModeArg,

        /// Fold results with identical content
        #[arg(long)]
        dedup: bool,

        /// Also match against message content without thinking or tools
        #[arg(long)]
        content_only: bool,

        /// Also match messages that carry thinking
        #[arg(long)]
        thinking_only: bool,

        /// Limit results
        #[arg(short = 'n', long)]
        limit: Option<usize>,

        /// Mark matches in previews
        #[arg(long)]
        highlight: bool,
    },

    /// Show index statistics
    Stats,

    /// Show the branch path leading to a message
    Path {
        /// Message id as printed by `search`
        message_id: String,
    },
}
