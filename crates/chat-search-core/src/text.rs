//! Extract display and searchable text from chat messages

use crate::types::{is_truthy, ChatMessage};

/// Flatten a message's content to plain text
///
/// Segment lists keep only their `text` segments. Empty or unrecognized
/// content falls back to `text`, then `display_text`, then an empty string.
pub fn flatten_content(msg: &ChatMessage) -> String {
    msg.content
        .as_ref()
        .and_then(|c| c.as_text())
        .or_else(|| msg.text.clone().filter(|s| !s.is_empty()))
        .or_else(|| msg.display_text.clone().filter(|s| !s.is_empty()))
        .unwrap_or_default()
}

/// Whether flattened content is empty or whitespace only
pub fn is_blank(content: &str) -> bool {
    content.trim().is_empty()
}

/// Build the lower-cased text a message is matched against
///
/// Joins, one part per line:
/// - flattened content
/// - thinking text
/// - artifact titles and contents
/// - tool names and JSON-serialized tool inputs
pub fn extract_searchable_text(msg: &ChatMessage) -> String {
    let mut parts: Vec<String> = Vec::new();

    let content = flatten_content(msg);
    if !content.is_empty() {
        parts.push(content);
    }

    if let Some(thinking) = msg.thinking.as_ref().and_then(|t| t.text()) {
        parts.push(thinking.to_string());
    }

    for artifact in msg.artifacts.iter().flatten() {
        if let Some(title) = artifact.title.as_deref().filter(|s| !s.is_empty()) {
            parts.push(title.to_string());
        }
        if let Some(body) = artifact.content.as_deref().filter(|s| !s.is_empty()) {
            parts.push(body.to_string());
        }
    }

    for tool in msg.tools.iter().flatten() {
        if let Some(name) = tool.name.as_deref().filter(|s| !s.is_empty()) {
            parts.push(name.to_string());
        }
        if let Some(input) = tool.input.as_ref().filter(|v| is_truthy(v)) {
            if let Ok(serialized) = serde_json::to_string(input) {
                parts.push(serialized);
            }
        }
    }

    parts.join("\n").to_lowercase()
}

/// Strip the final extension from a file name ("chat.json" -> "chat")
pub fn strip_extension(file_name: &str) -> &str {
    match file_name.rfind('.') {
        Some(pos) if pos > 0 => &file_name[..pos],
        _ => file_name,
    }
}

/// Lower-case, collapse whitespace runs to one space, and trim
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// First `max_chars` characters of `text`
pub fn take_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((pos, _)) => &text[..pos],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn message(value: Value) -> ChatMessage {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_flatten_string_content() {
        let msg = message(json!({"content": "Hello world"}));
        assert_eq!(flatten_content(&msg), "Hello world");
    }

    #[test]
    fn test_flatten_falls_back_to_text_fields() {
        let msg = message(json!({"content": "", "text": "", "display_text": "shown"}));
        assert_eq!(flatten_content(&msg), "shown");

        let msg = message(json!({"text": "plain"}));
        assert_eq!(flatten_content(&msg), "plain");

        let msg = message(json!({}));
        assert_eq!(flatten_content(&msg), "");
    }

    #[test]
    fn test_empty_segment_list_does_not_fall_back() {
        let msg = message(json!({"content": [], "text": "ignored"}));
        assert_eq!(flatten_content(&msg), "");
    }

    #[test]
    fn test_is_blank() {
        assert!(is_blank(""));
        assert!(is_blank("  \n\t"));
        assert!(!is_blank(" x "));
    }

    #[test]
    fn test_searchable_text_combines_all_parts() {
        let msg = message(json!({
            "content": [{"type": "text", "text": "Main BODY"}],
            "thinking": {"thinking": "Deep Thought"},
            "artifacts": [{"title": "Plan", "content": "Step One"}, {"title": ""}],
            "tools": [{"name": "Search", "input": {"q": "Rust"}}, {"name": "noop", "input": ""}]
        }));
        assert_eq!(
            extract_searchable_text(&msg),
            "main body\ndeep thought\nplan\nstep one\nsearch\n{\"q\":\"rust\"}\nnoop"
        );
    }

    #[test]
    fn test_searchable_text_empty_message() {
        assert_eq!(extract_searchable_text(&message(json!({}))), "");
    }

    #[test]
    fn test_strip_extension() {
        assert_eq!(strip_extension("chat.json"), "chat");
        assert_eq!(strip_extension("archive.tar.json"), "archive.tar");
        assert_eq!(strip_extension("noext"), "noext");
        assert_eq!(strip_extension(".hidden"), ".hidden");
    }

    #[test]
    fn test_normalize_whitespace() {
        assert_eq!(normalize_whitespace("  Hello \n\n  World\t"), "hello world");
    }

    #[test]
    fn test_take_chars_respects_char_boundaries() {
        assert_eq!(take_chars("héllo", 2), "hé");
        assert_eq!(take_chars("hi", 10), "hi");
    }
}
