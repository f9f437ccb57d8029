//! Error types for index ingestion

use chat_search_core::CoreError;
use thiserror::Error;

/// Per-file ingestion errors
///
/// These never escape a rebuild: the failing file is logged and skipped.
#[derive(Error, Debug)]
pub enum IngestError {
    #[error("Failed to read {file}: {source}")]
    Read {
        file: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {file}: {source}")]
    Parse {
        file: String,
        #[source]
        source: CoreError,
    },
}
