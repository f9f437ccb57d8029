//! Core type definitions for chat export payloads
//!
//! Every field is deserialized leniently: a value of the wrong JSON type
//! becomes the field's default instead of failing the whole payload.

use serde::de::{DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Format discriminator carried by full-export payloads
pub const FULL_EXPORT_FORMAT: &str = "claude_full_export";

/// Parent uuid that marks the root of a conversation tree
pub const ROOT_PARENT_UUID: &str = "00000000-0000-4000-8000-000000000000";

/// Deserialize a field, falling back to its default on a type mismatch
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).unwrap_or_default())
}

/// Deserialize a list, dropping elements that do not fit `T`
fn lenient_list<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(items) => Some(
            items
                .into_iter()
                .filter_map(|item| T::deserialize(item).ok())
                .collect(),
        ),
        _ => None,
    })
}

/// Deserialize a list, keeping its length: elements that do not fit `T`
/// become `T::default()`
fn lenient_items<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(items) => Some(
            items
                .into_iter()
                .map(|item| T::deserialize(item).unwrap_or_default())
                .collect(),
        ),
        _ => None,
    })
}

/// JavaScript-style truthiness for loosely typed JSON values
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0 && !f.is_nan()).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Who sent a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    Human,
    Assistant,
    #[serde(other)]
    Unknown,
}

impl std::fmt::Display for Sender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Sender::Human => write!(f, "human"),
            Sender::Assistant => write!(f, "assistant"),
            Sender::Unknown => write!(f, "unknown"),
        }
    }
}

/// One typed segment of structured message content
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContentSegment {
    #[serde(rename = "type", default, deserialize_with = "lenient")]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub text: Option<String>,
}

/// Message content can be a string or a list of typed segments
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    Segments(Vec<ContentSegment>),
    Other(Value),
}

impl MessageContent {
    /// Flatten to plain text, keeping only `text` segments joined by newlines.
    ///
    /// Returns `None` when the content carries nothing usable (an empty string
    /// or an unrecognized shape), so callers can fall back to other fields.
    pub fn as_text(&self) -> Option<String> {
        match self {
            MessageContent::Text(s) if !s.is_empty() => Some(s.clone()),
            MessageContent::Text(_) => None,
            MessageContent::Segments(segments) => Some(
                segments
                    .iter()
                    .filter(|seg| seg.kind.as_deref() == Some("text"))
                    .map(|seg| seg.text.as_deref().unwrap_or(""))
                    .collect::<Vec<_>>()
                    .join("\n"),
            ),
            MessageContent::Other(_) => None,
        }
    }
}

/// Extended thinking attached to an assistant message
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Thinking {
    Text(String),
    Block {
        #[serde(default, deserialize_with = "lenient")]
        thinking: Option<String>,
    },
    Other(Value),
}

impl Thinking {
    /// Whether the field counts as present
    pub fn is_present(&self) -> bool {
        match self {
            Thinking::Text(s) => !s.is_empty(),
            Thinking::Block { .. } => true,
            Thinking::Other(v) => is_truthy(v),
        }
    }

    /// The thinking text, if any
    pub fn text(&self) -> Option<&str> {
        let text = match self {
            Thinking::Text(s) => Some(s.as_str()),
            Thinking::Block { thinking } => thinking.as_deref(),
            Thinking::Other(_) => None,
        };
        text.filter(|s| !s.is_empty())
    }
}

/// Artifact produced inside a message
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Artifact {
    #[serde(default, deserialize_with = "lenient")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub content: Option<String>,
}

/// Tool invocation recorded on a message
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToolCall {
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(default)]
    pub input: Option<Value>,
}

/// A single message from a parsed export
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatMessage {
    #[serde(default, deserialize_with = "lenient")]
    pub uuid: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub sender: Option<Sender>,
    #[serde(default, deserialize_with = "lenient")]
    pub content: Option<MessageContent>,
    #[serde(default, deserialize_with = "lenient")]
    pub text: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub display_text: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub created_at: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub thinking: Option<Thinking>,
    #[serde(default, deserialize_with = "lenient_items")]
    pub artifacts: Option<Vec<Artifact>>,
    #[serde(default, deserialize_with = "lenient_items")]
    pub tools: Option<Vec<ToolCall>>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub attachments: Option<Vec<Value>>,
    #[serde(default, deserialize_with = "lenient")]
    pub parent_message_uuid: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub stop_reason: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub input_mode: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub has_branch: bool,
    #[serde(default, deserialize_with = "lenient")]
    pub conversation_uuid: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub is_conversation_header: bool,
}

impl ChatMessage {
    /// Uuid with empty strings treated as missing
    pub fn uuid(&self) -> Option<&str> {
        self.uuid.as_deref().filter(|s| !s.is_empty())
    }

    /// Parent uuid with empty strings treated as missing
    pub fn parent_uuid(&self) -> Option<&str> {
        self.parent_message_uuid.as_deref().filter(|s| !s.is_empty())
    }

    pub fn has_thinking(&self) -> bool {
        self.thinking.as_ref().is_some_and(Thinking::is_present)
    }

    pub fn has_artifacts(&self) -> bool {
        self.artifacts.as_ref().is_some_and(|a| !a.is_empty())
    }

    pub fn has_attachments(&self) -> bool {
        self.attachments.as_ref().is_some_and(|a| !a.is_empty())
    }

    pub fn has_tools(&self) -> bool {
        self.tools.as_ref().is_some_and(|t| !t.is_empty())
    }

    /// Sender, with unrecognized values dropped
    pub fn known_sender(&self) -> Option<Sender> {
        self.sender.filter(|s| *s != Sender::Unknown)
    }
}

/// Conversation header in a full export
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConversationMeta {
    #[serde(default, deserialize_with = "lenient")]
    pub uuid: String,
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
}

/// Legacy container for the conversation list
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PayloadViews {
    #[serde(default, alias = "conversationList", deserialize_with = "lenient_list")]
    pub conversation_list: Option<Vec<ConversationMeta>>,
}

/// Top-level metadata of a single-conversation export
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MetaInfo {
    #[serde(default, deserialize_with = "lenient")]
    pub uuid: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub title: Option<String>,
}

/// A parsed export file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatPayload {
    #[serde(default, deserialize_with = "lenient")]
    pub format: Option<String>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub conversations: Option<Vec<ConversationMeta>>,
    #[serde(default, deserialize_with = "lenient")]
    pub views: Option<PayloadViews>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub chat_history: Option<Vec<ChatMessage>>,
    #[serde(default, deserialize_with = "lenient")]
    pub meta_info: Option<MetaInfo>,
}

/// The two payload shapes the indexer understands
#[derive(Debug, Clone, Copy)]
pub enum PayloadShape<'a> {
    /// Many conversations sharing one flat message list
    FullExport {
        conversations: &'a [ConversationMeta],
        messages: &'a [ChatMessage],
    },
    /// One conversation with optional top-level metadata
    Simple {
        messages: &'a [ChatMessage],
        meta: Option<&'a MetaInfo>,
    },
    Unrecognized,
}

impl ChatPayload {
    pub fn is_full_export(&self) -> bool {
        self.format.as_deref() == Some(FULL_EXPORT_FORMAT)
    }

    /// Conversation list, preferring the top-level field over `views`
    pub fn conversation_list(&self) -> &[ConversationMeta] {
        match &self.conversations {
            Some(list) if !list.is_empty() => list,
            _ => self
                .views
                .as_ref()
                .and_then(|v| v.conversation_list.as_deref())
                .unwrap_or(&[]),
        }
    }

    /// Classify the payload by its format discriminator
    pub fn shape(&self) -> PayloadShape<'_> {
        if self.is_full_export() {
            PayloadShape::FullExport {
                conversations: self.conversation_list(),
                messages: self.chat_history.as_deref().unwrap_or(&[]),
            }
        } else if let Some(messages) = &self.chat_history {
            PayloadShape::Simple {
                messages,
                meta: self.meta_info.as_ref(),
            }
        } else {
            PayloadShape::Unrecognized
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn message(value: Value) -> ChatMessage {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_segment_content_keeps_only_text() {
        let msg = message(json!({
            "content": [
                {"type": "text", "text": "first"},
                {"type": "tool_use", "name": "search"},
                {"type": "text", "text": "second"}
            ]
        }));
        let text = msg.content.unwrap().as_text();
        assert_eq!(text.as_deref(), Some("first\nsecond"));
    }

    #[test]
    fn test_wrong_field_types_fall_back_to_defaults() {
        let msg = message(json!({
            "uuid": 42,
            "has_branch": "yes",
            "sender": "human",
            "artifacts": "not a list"
        }));
        assert!(msg.uuid.is_none());
        assert!(!msg.has_branch);
        assert_eq!(msg.sender, Some(Sender::Human));
        assert!(!msg.has_artifacts());
    }

    #[test]
    fn test_non_object_artifacts_and_tools_still_count() {
        let msg = message(json!({
            "artifacts": ["x"],
            "tools": [7, {"name": "search"}]
        }));
        assert!(msg.has_artifacts());
        assert!(msg.has_tools());

        let tools = msg.tools.unwrap();
        assert_eq!(tools.len(), 2);
        assert!(tools[0].name.is_none());
        assert_eq!(tools[1].name.as_deref(), Some("search"));
    }

    #[test]
    fn test_unknown_sender() {
        let msg = message(json!({"sender": "system"}));
        assert_eq!(msg.sender, Some(Sender::Unknown));
        assert_eq!(msg.known_sender(), None);
    }

    #[test]
    fn test_thinking_shapes() {
        let text = message(json!({"thinking": "pondering"}));
        assert!(text.has_thinking());
        assert_eq!(text.thinking.unwrap().text(), Some("pondering"));

        let block = message(json!({"thinking": {"thinking": "deeper"}}));
        assert!(block.has_thinking());
        assert_eq!(block.thinking.unwrap().text(), Some("deeper"));

        let empty = message(json!({"thinking": ""}));
        assert!(!empty.has_thinking());

        let odd = message(json!({"thinking": [1, 2]}));
        assert!(odd.has_thinking());
        assert_eq!(odd.thinking.unwrap().text(), None);
    }

    #[test]
    fn test_empty_parent_is_missing() {
        let msg = message(json!({"parent_message_uuid": ""}));
        assert_eq!(msg.parent_uuid(), None);
    }

    #[test]
    fn test_payload_shapes() {
        let full: ChatPayload = serde_json::from_value(json!({
            "format": "claude_full_export",
            "views": {"conversation_list": [{"uuid": "c1", "name": "One"}]},
            "chat_history": []
        }))
        .unwrap();
        match full.shape() {
            PayloadShape::FullExport { conversations, .. } => {
                assert_eq!(conversations.len(), 1);
                assert_eq!(conversations[0].uuid, "c1");
            }
            other => panic!("unexpected shape {:?}", other),
        }

        let camel: ChatPayload = serde_json::from_value(json!({
            "format": "claude_full_export",
            "views": {"conversationList": [{"uuid": "c2"}]},
            "chat_history": []
        }))
        .unwrap();
        assert_eq!(camel.conversation_list().len(), 1);
        assert_eq!(camel.conversation_list()[0].uuid, "c2");

        let simple: ChatPayload =
            serde_json::from_value(json!({"chat_history": [{"uuid": "a"}]})).unwrap();
        assert!(matches!(simple.shape(), PayloadShape::Simple { messages, meta: None } if messages.len() == 1));

        let neither: ChatPayload = serde_json::from_value(json!({"title": "x"})).unwrap();
        assert!(matches!(neither.shape(), PayloadShape::Unrecognized));
    }

    #[test]
    fn test_truthiness() {
        assert!(!is_truthy(&json!(null)));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!("")));
        assert!(is_truthy(&json!({})));
        assert!(is_truthy(&json!([])));
        assert!(is_truthy(&json!(3)));
    }
}
