//! Stable synthetic identifiers for files and conversations

use uuid::Uuid;

/// Maps provenance to stable synthetic ids
///
/// The same inputs must always yield the same id, so index keys stay
/// identical across rebuilds.
pub trait IdGenerator: Send + Sync {
    /// Id for a conversation inside a multi-conversation file
    fn conversation_id(&self, file_index: usize, raw_id: &str, file_name: &str) -> String;

    /// Id for a whole file
    fn file_id(&self, file_index: usize, file_name: &str) -> String;
}

/// Name-based (v5) UUIDs derived from file position, file name and raw id
#[derive(Debug, Clone, Copy, Default)]
pub struct StableIdGenerator;

impl StableIdGenerator {
    fn derive(name: &str) -> String {
        Uuid::new_v5(&Uuid::NAMESPACE_OID, name.as_bytes()).to_string()
    }
}

impl IdGenerator for StableIdGenerator {
    fn conversation_id(&self, file_index: usize, raw_id: &str, file_name: &str) -> String {
        Self::derive(&format!("conversation:{}:{}:{}", file_index, file_name, raw_id))
    }

    fn file_id(&self, file_index: usize, file_name: &str) -> String {
        Self::derive(&format!("file:{}:{}", file_index, file_name))
    }
}
