//! Branch-path reconstruction

use chat_search_core::ROOT_PARENT_UUID;
use std::collections::VecDeque;

use crate::store::IndexStore;

/// Upper bound on ancestors walked, so cyclic parent links terminate
pub const MAX_PATH_STEPS: usize = 100;

impl IndexStore {
    /// Ancestor chain of a message, root first and the message itself last
    ///
    /// Returns `None` when `message_id` is not in the index. The walk stops at
    /// the root sentinel, at a message without a known parent, or after
    /// `MAX_PATH_STEPS` entries.
    pub fn message_path(&self, message_id: &str) -> Option<Vec<String>> {
        let record = self.get(message_id)?;

        let mut path = VecDeque::new();
        let mut current = record.message_uuid.as_str();

        while !current.is_empty() && current != ROOT_PARENT_UUID && path.len() < MAX_PATH_STEPS {
            path.push_front(current.to_string());
            match self.parent_of(current) {
                Some(parent) => current = parent,
                None => break,
            }
        }

        Some(path.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::NameOverrides;
    use crate::source::MemorySourceFile;
    use chat_search_core::{IdGenerator, StableIdGenerator};
    use serde_json::{json, Value};

    async fn store_with_history(history: Value) -> (IndexStore, String) {
        let files = vec![MemorySourceFile::new(
            "thread.json",
            json!({ "chat_history": history }).to_string(),
        )];
        let mut store = IndexStore::new();
        store.rebuild(&files, None, None, &NameOverrides::new()).await;
        (store, StableIdGenerator.file_id(0, "thread.json"))
    }

    #[tokio::test]
    async fn test_unknown_message_has_no_path() {
        let (store, _) = store_with_history(json!([{"uuid": "a"}])).await;
        assert_eq!(store.message_path("nope"), None);
    }

    #[tokio::test]
    async fn test_root_message_path() {
        let (store, file_uuid) = store_with_history(json!([
            {"uuid": "a", "parent_message_uuid": ROOT_PARENT_UUID, "content": "first"}
        ]))
        .await;

        assert_eq!(
            store.message_path(&format!("{}_a", file_uuid)),
            Some(vec!["a".to_string()])
        );
    }

    #[tokio::test]
    async fn test_chain_is_root_first() {
        let (store, file_uuid) = store_with_history(json!([
            {"uuid": "a", "parent_message_uuid": ROOT_PARENT_UUID},
            {"uuid": "b", "parent_message_uuid": "a"},
            {"uuid": "b2", "parent_message_uuid": "a"},
            {"uuid": "c", "parent_message_uuid": "b"}
        ]))
        .await;

        assert_eq!(
            store.message_path(&format!("{}_c", file_uuid)),
            Some(vec!["a".to_string(), "b".to_string(), "c".to_string()])
        );
        assert_eq!(
            store.message_path(&format!("{}_b2", file_uuid)),
            Some(vec!["a".to_string(), "b2".to_string()])
        );
    }

    #[tokio::test]
    async fn test_missing_parent_ends_walk() {
        let (store, file_uuid) = store_with_history(json!([
            {"uuid": "b", "parent_message_uuid": "gone"}
        ]))
        .await;

        assert_eq!(
            store.message_path(&format!("{}_b", file_uuid)),
            Some(vec!["gone".to_string(), "b".to_string()])
        );
    }

    #[tokio::test]
    async fn test_cycle_is_capped() {
        let (store, file_uuid) = store_with_history(json!([
            {"uuid": "x", "parent_message_uuid": "y"},
            {"uuid": "y", "parent_message_uuid": "x"}
        ]))
        .await;

        let path = store.message_path(&format!("{}_x", file_uuid)).unwrap();
        assert_eq!(path.len(), MAX_PATH_STEPS);
        assert_eq!(path.last().map(String::as_str), Some("x"));
    }

    #[tokio::test]
    async fn test_blank_parent_treated_as_absent() {
        let (store, file_uuid) = store_with_history(json!([
            {"uuid": "a", "parent_message_uuid": ""}
        ]))
        .await;

        assert_eq!(
            store.message_path(&format!("{}_a", file_uuid)),
            Some(vec!["a".to_string()])
        );
    }
}
