//! Payload parsing for chat export files

use crate::error::CoreError;
use crate::types::ChatPayload;
use serde_json::Value;

/// Turns the text of an export file into a payload
pub trait PayloadParser: Send + Sync {
    fn parse(&self, text: &str, file_name: &str) -> Result<ChatPayload, CoreError>;
}

/// Parses files that already hold the normalized payload as JSON
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonPayloadParser;

impl PayloadParser for JsonPayloadParser {
    fn parse(&self, text: &str, _file_name: &str) -> Result<ChatPayload, CoreError> {
        parse_payload(text)
    }
}

/// Parse a JSON payload
///
/// Fails only when the text is not JSON or its top level is not an object;
/// individual fields of the wrong type fall back to defaults.
pub fn parse_payload(text: &str) -> Result<ChatPayload, CoreError> {
    let value: Value = serde_json::from_str(text)?;
    if value.is_object() {
        return Ok(serde_json::from_value(value)?);
    }
    let kind = match value {
        Value::Object(_) => "object",
        Value::Array(_) => "array",
        Value::String(_) => "string",
        Value::Number(_) => "number",
        Value::Bool(_) => "boolean",
        Value::Null => "null",
    };
    Err(CoreError::NotAnObject(kind))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PayloadShape;

    #[test]
    fn test_parse_simple_payload() {
        let raw = r#"{"meta_info":{"uuid":"conv-1","title":"Chat"},"chat_history":[{"uuid":"a","sender":"human","content":"Hello"}]}"#;
        let payload = parse_payload(raw).unwrap();
        match payload.shape() {
            PayloadShape::Simple { messages, meta } => {
                assert_eq!(messages.len(), 1);
                assert_eq!(meta.and_then(|m| m.title.as_deref()), Some("Chat"));
            }
            other => panic!("unexpected shape {:?}", other),
        }
    }

    #[test]
    fn test_parse_rejects_malformed_json() {
        assert!(parse_payload("{not json").is_err());
        assert!(matches!(
            parse_payload("[1, 2, 3]"),
            Err(CoreError::NotAnObject("array"))
        ));
    }

    #[test]
    fn test_json_parser_ignores_file_name() {
        let payload = JsonPayloadParser.parse(r#"{"chat_history":[]}"#, "x.json").unwrap();
        assert!(payload.chat_history.is_some());
    }
}
