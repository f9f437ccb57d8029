//! Minimal text output formatting

use chat_search_index::SearchResult;

/// Format a search result as `message_id<TAB>preview`
pub fn format_result(result: &SearchResult) -> String {
    let preview = result.preview.split_whitespace().collect::<Vec<_>>().join(" ");
    format!("{}\t{}", result.message_id, preview)
}
