//! chat-search-index - In-memory search index over chat export files
//!
//! `IndexStore::rebuild` reads every export file, normalizes both payload
//! shapes into `MessageRecord`s, and replaces the store's contents. Queries
//! (`search`, `message_path`, `stats`) only borrow the store, so they can
//! never overlap a rebuild.

pub mod discovery;
pub mod error;
pub mod ingest;
pub mod path;
pub mod record;
pub mod search;
pub mod source;
pub mod store;

pub use discovery::{export_sources, find_export_files};
pub use error::IngestError;
pub use ingest::{ingest_payload, IngestContext, UNTITLED_CONVERSATION};
pub use path::MAX_PATH_STEPS;
pub use record::{MessageRecord, NameOverrides};
pub use search::{
    content_fingerprint, generate_preview, remove_duplicates, score_relevance, DuplicateRef,
    SearchMode, SearchOptions, SearchOutcome, SearchResult, SearchStats, DEFAULT_PREVIEW_LENGTH,
};
pub use source::{FsSourceFile, MemorySourceFile, SourceFile};
pub use store::{IndexStats, IndexStore, RebuildSummary};
