//! Normalize parsed export payloads into index records
//!
//! Full exports carry many conversations sharing one flat message list;
//! simple exports carry a single conversation. Both produce the same
//! `MessageRecord` shape, keyed so that a rebuild from the same inputs
//! yields the same keys.

use chat_search_core::{
    extract_searchable_text, flatten_content, strip_extension, ChatMessage, ChatPayload,
    ConversationMeta, IdGenerator, MetaInfo, PayloadShape,
};

use crate::record::{MessageRecord, NameOverrides};

/// Display name used when a conversation has no title
pub const UNTITLED_CONVERSATION: &str = "Untitled conversation";

/// Where a payload came from
pub struct IngestContext<'a> {
    pub file_name: &'a str,
    pub file_index: usize,
    pub overrides: &'a NameOverrides,
    pub ids: &'a dyn IdGenerator,
}

/// Conversation-level fields shared by every message of a conversation
struct ConversationScope {
    file_uuid: Option<String>,
    conversation_id: String,
    conversation_uuid: String,
    display_name: String,
    original_name: Option<String>,
}

/// Produce keyed records for every message in a payload
pub fn ingest_payload(payload: &ChatPayload, ctx: &IngestContext<'_>) -> Vec<(String, MessageRecord)> {
    match payload.shape() {
        PayloadShape::FullExport {
            conversations,
            messages,
        } => ingest_full_export(conversations, messages, ctx),
        PayloadShape::Simple { messages, meta } => ingest_simple(messages, meta, ctx),
        PayloadShape::Unrecognized => {
            tracing::debug!(file = ctx.file_name, "Payload has no chat history, nothing to index");
            Vec::new()
        }
    }
}

fn ingest_full_export(
    conversations: &[ConversationMeta],
    messages: &[ChatMessage],
    ctx: &IngestContext<'_>,
) -> Vec<(String, MessageRecord)> {
    let mut records = Vec::new();

    for conv in conversations {
        let conversation_uuid = ctx
            .ids
            .conversation_id(ctx.file_index, &conv.uuid, ctx.file_name);
        let stored_name = conv.name.as_deref().filter(|s| !s.is_empty());
        let display_name = resolve_display_name(ctx.overrides, &conv.uuid, &conversation_uuid)
            .or(stored_name)
            .unwrap_or(UNTITLED_CONVERSATION)
            .to_string();

        let scope = ConversationScope {
            file_uuid: None,
            conversation_id: conv.uuid.clone(),
            conversation_uuid,
            display_name,
            original_name: conv.name.clone(),
        };

        let members = messages.iter().filter(|msg| {
            !msg.is_conversation_header
                && msg.conversation_uuid.as_deref() == Some(conv.uuid.as_str())
        });

        for (position, msg) in members.enumerate() {
            let record = build_record(msg, position, &scope, ctx);
            let key = format!("{}_{}", scope.conversation_uuid, record.message_uuid);
            records.push((key, record));
        }
    }

    records
}

fn ingest_simple(
    messages: &[ChatMessage],
    meta: Option<&MetaInfo>,
    ctx: &IngestContext<'_>,
) -> Vec<(String, MessageRecord)> {
    let file_uuid = ctx.ids.file_id(ctx.file_index, ctx.file_name);

    let conversation_id = meta
        .and_then(|m| m.uuid.as_deref())
        .filter(|s| !s.is_empty())
        .unwrap_or(file_uuid.as_str())
        .to_string();
    let original_title = meta
        .and_then(|m| m.title.as_deref())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| strip_extension(ctx.file_name))
        .to_string();
    let display_name = resolve_display_name(ctx.overrides, &conversation_id, &file_uuid)
        .unwrap_or(original_title.as_str())
        .to_string();

    let scope = ConversationScope {
        file_uuid: Some(file_uuid.clone()),
        conversation_id,
        conversation_uuid: file_uuid.clone(),
        display_name,
        original_name: Some(original_title),
    };

    messages
        .iter()
        .enumerate()
        .map(|(position, msg)| {
            let key = match msg.uuid() {
                Some(uuid) => format!("{}_{}", file_uuid, uuid),
                None => format!("{}_{}", file_uuid, position),
            };
            (key, build_record(msg, position, &scope, ctx))
        })
        .collect()
}

/// Override lookup: raw id first, then synthetic id
fn resolve_display_name<'a>(
    overrides: &'a NameOverrides,
    raw_id: &str,
    synthetic_id: &str,
) -> Option<&'a str> {
    [raw_id, synthetic_id]
        .iter()
        .filter_map(|id| overrides.get(*id))
        .map(String::as_str)
        .find(|name| !name.is_empty())
}

fn build_record(
    msg: &ChatMessage,
    position: usize,
    scope: &ConversationScope,
    ctx: &IngestContext<'_>,
) -> MessageRecord {
    let message_uuid = msg
        .uuid()
        .map(str::to_string)
        .unwrap_or_else(|| format!("msg_{}", position));

    MessageRecord {
        file_id: ctx.file_name.to_string(),
        file_name: ctx.file_name.to_string(),
        file_index: ctx.file_index,
        file_uuid: scope.file_uuid.clone(),
        conversation_id: scope.conversation_id.clone(),
        conversation_uuid: scope.conversation_uuid.clone(),
        conversation_name: scope.display_name.clone(),
        original_name: scope.original_name.clone(),
        message_index: position,
        message_uuid,
        parent_uuid: msg.parent_uuid().map(str::to_string),
        content: flatten_content(msg),
        sender: msg.known_sender(),
        timestamp: msg.created_at.clone(),
        stop_reason: msg.stop_reason.clone(),
        has_branch: msg.has_branch,
        input_mode: msg.input_mode.clone(),
        searchable_text: extract_searchable_text(msg),
        has_thinking: msg.has_thinking(),
        has_artifacts: msg.has_artifacts(),
        has_attachments: msg.has_attachments(),
        has_tools: msg.has_tools(),
    }
}
