//! Human-readable output formatting

use super::colors::*;
use chat_search_index::{IndexStats, MessageRecord, RebuildSummary, SearchResult};

/// Format a search result: header line plus indented preview
pub fn format_result(result: &SearchResult) -> String {
    let record = &result.record;
    let mut parts = vec![colored_score(result.score)];

    parts.push(colored_conversation(&record.conversation_name));
    if result.is_conversation_result {
        let count = result.message_count.unwrap_or_default();
        parts.push(label(&format!("({} messages)", format_count(count))));
    } else {
        parts.push(format!("[{}]", colored_sender(record.sender)));
        parts.push(label(&format!("#{}", record.message_index)));
    }
    parts.push(colored_id(&result.message_id));

    let mut lines = vec![parts.join(" ")];
    if !result.is_conversation_result {
        lines.push(format!("       {}", render_marks(&single_line(&result.preview))));
    }
    for dup in &result.duplicates {
        lines.push(format!(
            "       {} {} #{}",
            label("also in"),
            colored_conversation(&dup.conversation_name),
            dup.message_index
        ));
    }

    lines.join("\n")
}

/// Format index statistics
pub fn format_stats(stats: &IndexStats, rebuild: Option<&RebuildSummary>) -> String {
    let rows = [
        ("Messages", stats.total_messages),
        ("Files", stats.total_files),
        ("Conversations", stats.total_conversations),
        ("Blank messages", stats.blank_messages),
        ("With thinking", stats.messages_with_thinking),
        ("With artifacts", stats.messages_with_artifacts),
    ];

    let mut lines: Vec<String> = rows
        .iter()
        .map(|(name, count)| format!("  {}: {}", label(name), value(&format_count(*count))))
        .collect();

    if let Some(summary) = rebuild {
        lines.push(String::new());
        lines.push(format!(
            "  {}: {} ms",
            label("Build time"),
            value(&summary.elapsed.as_millis().to_string())
        ));
        if summary.files_skipped > 0 {
            lines.push(format!(
                "  {}",
                warning(&format!("{} file(s) could not be indexed", summary.files_skipped))
            ));
        }
    }

    lines.join("\n")
}

/// Format a branch path, root first
pub fn format_path(path: &[String], record: &MessageRecord) -> String {
    let mut lines = vec![format!(
        "{} {}",
        colored_conversation(&record.conversation_name),
        label(&format!("({})", record.file_name))
    )];

    let last = path.len().saturating_sub(1);
    for (depth, uuid) in path.iter().enumerate() {
        let marker = if depth == last { "*" } else { "|" };
        lines.push(format!("  {:>3} {} {}", depth, marker, value(uuid)));
    }

    lines.join("\n")
}

fn single_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
