//! Index entry types

use chat_search_core::{is_blank, Sender};
use serde::ser::{Serialize, SerializeStruct, Serializer};
use std::collections::HashMap;

/// User-supplied display names keyed by raw or synthetic conversation id
pub type NameOverrides = HashMap<String, String>;

/// One indexed message with its provenance
///
/// Serializes with camelCase keys plus the derived `isBlank`.
#[derive(Debug, Clone, PartialEq)]
pub struct MessageRecord {
    /// Source file name (provenance key)
    pub file_id: String,
    pub file_name: String,
    /// Position of the file in the rebuild's file list
    pub file_index: usize,
    /// Synthetic file id, set for single-conversation files
    pub file_uuid: Option<String>,
    /// Raw conversation id from the payload
    pub conversation_id: String,
    /// Synthetic conversation id
    pub conversation_uuid: String,
    /// Display name, with user overrides applied
    pub conversation_name: String,
    /// Title as stored in the payload
    pub original_name: Option<String>,
    /// Position within the conversation
    pub message_index: usize,
    pub message_uuid: String,
    pub parent_uuid: Option<String>,
    /// Flattened text content
    pub content: String,
    pub sender: Option<Sender>,
    pub timestamp: Option<String>,
    pub stop_reason: Option<String>,
    pub has_branch: bool,
    pub input_mode: Option<String>,
    /// Lower-cased text queries are matched against
    pub searchable_text: String,
    pub has_thinking: bool,
    pub has_artifacts: bool,
    pub has_attachments: bool,
    pub has_tools: bool,
}

impl MessageRecord {
    /// Whether the content is empty or whitespace only
    pub fn is_blank(&self) -> bool {
        is_blank(&self.content)
    }

    /// Conversation grouping key, falling back to the file
    pub fn group_key(&self) -> &str {
        if self.conversation_id.is_empty() {
            &self.file_id
        } else {
            &self.conversation_id
        }
    }
}

impl Serialize for MessageRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("MessageRecord", 23)?;
        state.serialize_field("fileId", &self.file_id)?;
        state.serialize_field("fileName", &self.file_name)?;
        state.serialize_field("fileIndex", &self.file_index)?;
        match &self.file_uuid {
            Some(file_uuid) => state.serialize_field("fileUuid", file_uuid)?,
            None => state.skip_field("fileUuid")?,
        }
        state.serialize_field("conversationId", &self.conversation_id)?;
        state.serialize_field("conversationUuid", &self.conversation_uuid)?;
        state.serialize_field("conversationName", &self.conversation_name)?;
        state.serialize_field("originalName", &self.original_name)?;
        state.serialize_field("messageIndex", &self.message_index)?;
        state.serialize_field("messageUuid", &self.message_uuid)?;
        state.serialize_field("parentUuid", &self.parent_uuid)?;
        state.serialize_field("content", &self.content)?;
        state.serialize_field("isBlank", &self.is_blank())?;
        state.serialize_field("sender", &self.sender)?;
        state.serialize_field("timestamp", &self.timestamp)?;
        state.serialize_field("stopReason", &self.stop_reason)?;
        state.serialize_field("hasBranch", &self.has_branch)?;
        state.serialize_field("inputMode", &self.input_mode)?;
        state.serialize_field("searchableText", &self.searchable_text)?;
        state.serialize_field("hasThinking", &self.has_thinking)?;
        state.serialize_field("hasArtifacts", &self.has_artifacts)?;
        state.serialize_field("hasAttachments", &self.has_attachments)?;
        state.serialize_field("hasTools", &self.has_tools)?;
        state.end()
    }
}
