//! The in-memory message index
//!
//! `IndexStore` owns an insertion-ordered map from message id to record.
//! Every rebuild clears it and ingests all files again, so the store never
//! mixes records from two rebuilds.

use chat_search_core::{ChatPayload, IdGenerator, JsonPayloadParser, PayloadParser, StableIdGenerator};
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::time::{Duration, Instant};

use crate::error::IngestError;
use crate::ingest::{ingest_payload, IngestContext};
use crate::record::{MessageRecord, NameOverrides};
use crate::source::SourceFile;

/// Advisory diagnostics from a rebuild
#[derive(Debug, Clone)]
pub struct RebuildSummary {
    pub messages: usize,
    pub files_indexed: usize,
    pub files_skipped: usize,
    pub elapsed: Duration,
    pub built_at: DateTime<Utc>,
}

/// Aggregate counts over the whole index
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexStats {
    pub total_messages: usize,
    pub total_files: usize,
    pub total_conversations: usize,
    pub blank_messages: usize,
    pub messages_with_thinking: usize,
    pub messages_with_artifacts: usize,
}

/// In-memory message index
pub struct IndexStore {
    pub(crate) entries: IndexMap<String, MessageRecord>,
    /// message uuid -> parent uuid, first record in index order wins
    pub(crate) parents: HashMap<String, String>,
    ids: Box<dyn IdGenerator>,
    parser: Box<dyn PayloadParser>,
    last_rebuild: Option<RebuildSummary>,
}

impl Default for IndexStore {
    fn default() -> Self {
        Self::new()
    }
}

impl IndexStore {
    /// Create an empty store with the default id generator and JSON parser
    pub fn new() -> Self {
        Self::with_collaborators(StableIdGenerator, JsonPayloadParser)
    }

    /// Create an empty store with custom id generation and payload parsing
    pub fn with_collaborators(
        ids: impl IdGenerator + 'static,
        parser: impl PayloadParser + 'static,
    ) -> Self {
        Self {
            entries: IndexMap::new(),
            parents: HashMap::new(),
            ids: Box::new(ids),
            parser: Box::new(parser),
            last_rebuild: None,
        }
    }

    /// Clear the index and rebuild it from `files`
    ///
    /// Files are read one after another in list order. The file at
    /// `current_file_index` is not read when `current_payload` is given;
    /// that payload is indexed in its place. A file that cannot be read or
    /// parsed is logged and skipped.
    pub async fn rebuild<S: SourceFile>(
        &mut self,
        files: &[S],
        current_payload: Option<&ChatPayload>,
        current_file_index: Option<usize>,
        overrides: &NameOverrides,
    ) -> RebuildSummary {
        let started = Instant::now();
        self.clear();

        let mut files_indexed = 0;
        let mut files_skipped = 0;

        for (file_index, file) in files.iter().enumerate() {
            let preloaded = current_payload.filter(|_| current_file_index == Some(file_index));

            let loaded;
            let payload = match preloaded {
                Some(payload) => payload,
                None => match self.load_payload(file).await {
                    Ok(payload) => {
                        loaded = payload;
                        &loaded
                    }
                    Err(e) => {
                        tracing::warn!(file = file.name(), error = %e, "Skipping export file");
                        files_skipped += 1;
                        continue;
                    }
                },
            };

            let added = self.insert_payload(payload, file.name(), file_index, overrides);
            tracing::debug!(file = file.name(), messages = added, "Indexed export file");
            files_indexed += 1;
        }

        self.rebuild_parent_index();

        let summary = RebuildSummary {
            messages: self.entries.len(),
            files_indexed,
            files_skipped,
            elapsed: started.elapsed(),
            built_at: Utc::now(),
        };
        tracing::info!(
            messages = summary.messages,
            files = files.len(),
            skipped = summary.files_skipped,
            elapsed_ms = summary.elapsed.as_millis() as u64,
            "Index build complete"
        );

        self.last_rebuild = Some(summary.clone());
        summary
    }

    async fn load_payload<S: SourceFile>(&self, file: &S) -> Result<ChatPayload, IngestError> {
        let text = file.read_text().await.map_err(|source| IngestError::Read {
            file: file.name().to_string(),
            source,
        })?;
        self.parser
            .parse(&text, file.name())
            .map_err(|source| IngestError::Parse {
                file: file.name().to_string(),
                source,
            })
    }

    fn insert_payload(
        &mut self,
        payload: &ChatPayload,
        file_name: &str,
        file_index: usize,
        overrides: &NameOverrides,
    ) -> usize {
        let ctx = IngestContext {
            file_name,
            file_index,
            overrides,
            ids: self.ids.as_ref(),
        };
        let records = ingest_payload(payload, &ctx);
        let added = records.len();
        self.entries.extend(records);
        added
    }

    fn rebuild_parent_index(&mut self) {
        self.parents.clear();
        for record in self.entries.values() {
            if let Some(parent) = &record.parent_uuid {
                self.parents
                    .entry(record.message_uuid.clone())
                    .or_insert_with(|| parent.clone());
            }
        }
    }

    /// Remove every entry
    pub fn clear(&mut self) {
        self.entries.clear();
        self.parents.clear();
    }

    /// Aggregate counts over the index
    pub fn stats(&self) -> IndexStats {
        let mut files = HashSet::new();
        let mut conversations = HashSet::new();
        let mut stats = IndexStats {
            total_messages: self.entries.len(),
            ..Default::default()
        };

        for record in self.entries.values() {
            files.insert(record.file_id.as_str());
            if !record.conversation_id.is_empty() {
                conversations.insert(record.conversation_id.as_str());
            }
            if record.is_blank() {
                stats.blank_messages += 1;
            }
            if record.has_thinking {
                stats.messages_with_thinking += 1;
            }
            if record.has_artifacts {
                stats.messages_with_artifacts += 1;
            }
        }

        stats.total_files = files.len();
        stats.total_conversations = conversations.len();
        stats
    }

    /// Look up a record by message id
    pub fn get(&self, message_id: &str) -> Option<&MessageRecord> {
        self.entries.get(message_id)
    }

    /// Records in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &MessageRecord)> {
        self.entries.iter().map(|(id, record)| (id.as_str(), record))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Diagnostics from the most recent rebuild
    pub fn last_rebuild(&self) -> Option<&RebuildSummary> {
        self.last_rebuild.as_ref()
    }

    pub(crate) fn parent_of(&self, uuid: &str) -> Option<&str> {
        self.parents.get(uuid).map(String::as_str)
    }
}
