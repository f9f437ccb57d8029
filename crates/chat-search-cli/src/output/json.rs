//! JSON output formatting

use anyhow::Result;
use chat_search_index::{IndexStats, RebuildSummary, SearchOutcome};
use serde::Serialize;

fn to_json<T: Serialize>(value: &T, pretty: bool) -> Result<String> {
    let out = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(out)
}

/// Output search results and stats as one JSON document
pub fn format_outcome(outcome: &SearchOutcome, pretty: bool) -> Result<String> {
    to_json(outcome, pretty)
}

/// Output index statistics as JSON
pub fn format_stats(stats: &IndexStats, rebuild: Option<&RebuildSummary>, pretty: bool) -> Result<String> {
    let mut output = serde_json::to_value(stats)?;
    if let (Some(summary), Some(obj)) = (rebuild, output.as_object_mut()) {
        obj.insert("filesSkipped".to_string(), summary.files_skipped.into());
        obj.insert(
            "elapsedMs".to_string(),
            (summary.elapsed.as_millis() as u64).into(),
        );
        obj.insert("builtAt".to_string(), summary.built_at.to_rfc3339().into());
    }
    to_json(&output, pretty)
}

/// Output a branch path as JSON
pub fn format_path(message_id: &str, path: &[String], pretty: bool) -> Result<String> {
    let output = serde_json::json!({
        "messageId": message_id,
        "path": path,
    });
    to_json(&output, pretty)
}
