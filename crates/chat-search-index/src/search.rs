//! Query engine: substring matching, relevance scoring, previews, and
//! duplicate folding over an `IndexStore`

use chat_search_core::{normalize_whitespace, take_chars, LiteralMatcher};
use indexmap::IndexMap;
use serde::Serialize;
use std::collections::{HashMap, HashSet};

use crate::record::MessageRecord;
use crate::store::IndexStore;

/// Default preview length when the query does not occur in the text
pub const DEFAULT_PREVIEW_LENGTH: usize = 200;

/// Characters of context kept on each side of a match in a preview
pub const PREVIEW_CONTEXT_CHARS: usize = 80;

/// Length of the normalized-content prefix used to detect duplicates
pub const FINGERPRINT_LENGTH: usize = 100;

/// What a query is matched against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchMode {
    /// Message content (same as `Content`)
    #[default]
    All,
    /// Conversation display names, one result per conversation
    Titles,
    /// Message content
    Content,
}

/// Search options
#[derive(Debug, Clone, Default)]
pub struct SearchOptions {
    /// Also match against flattened content alone
    pub content_only: bool,
    /// Also match messages that carry thinking
    pub thinking_only: bool,
    /// Fold results with the same normalized content (content modes only)
    pub remove_duplicates: bool,
    /// Keep at most this many results after sorting
    pub limit: Option<usize>,
}

impl SearchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn content_only(mut self) -> Self {
        self.content_only = true;
        self
    }

    pub fn thinking_only(mut self) -> Self {
        self.thinking_only = true;
        self
    }

    pub fn remove_duplicates(mut self) -> Self {
        self.remove_duplicates = true;
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// A result folded into another because its content matched
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DuplicateRef {
    pub file_id: String,
    pub conversation_name: String,
    pub message_index: usize,
}

/// One search hit: a copy of the stored record plus per-search fields
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub message_id: String,
    #[serde(flatten)]
    pub record: MessageRecord,
    pub score: f64,
    pub preview: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub duplicates: Vec<DuplicateRef>,
    /// Messages in the conversation (titles mode)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_count: Option<usize>,
    pub is_conversation_result: bool,
}

/// Counts over a result set
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SearchStats {
    pub total: usize,
    pub files: usize,
    pub conversations: usize,
}

/// Ranked results plus aggregate counts
#[derive(Debug, Clone, Default, Serialize)]
pub struct SearchOutcome {
    pub results: Vec<SearchResult>,
    pub stats: SearchStats,
}

/// Ids seen among matches, before duplicate folding
#[derive(Default)]
struct MatchSets<'a> {
    files: HashSet<&'a str>,
    conversations: HashSet<&'a str>,
}

impl IndexStore {
    /// Search the index
    ///
    /// The query is trimmed and lower-cased; an empty query returns an empty
    /// outcome without scanning. Results are sorted by descending score,
    /// ties keeping index order.
    pub fn search(&self, query: &str, options: &SearchOptions, mode: SearchMode) -> SearchOutcome {
        let query = query.trim().to_lowercase();
        let Some(matcher) = LiteralMatcher::new(&query) else {
            return SearchOutcome::default();
        };

        let mut seen = MatchSets::default();
        let mut results = match mode {
            SearchMode::Titles => self.search_titles(&query, &matcher, &mut seen),
            SearchMode::All | SearchMode::Content => {
                let found = self.search_content(&query, &matcher, options, &mut seen);
                if options.remove_duplicates {
                    remove_duplicates(found)
                } else {
                    found
                }
            }
        };

        results.sort_by(|a, b| b.score.total_cmp(&a.score));

        let stats = SearchStats {
            total: results.len(),
            files: seen.files.len(),
            conversations: seen.conversations.len(),
        };
        if let Some(limit) = options.limit {
            results.truncate(limit);
        }

        SearchOutcome { results, stats }
    }

    fn search_titles<'a>(
        &'a self,
        query: &str,
        matcher: &LiteralMatcher,
        seen: &mut MatchSets<'a>,
    ) -> Vec<SearchResult> {
        struct TitleGroup<'r> {
            first: &'r MessageRecord,
            message_count: usize,
        }

        let mut groups: IndexMap<&str, TitleGroup<'_>> = IndexMap::new();
        for record in self.entries.values() {
            groups
                .entry(record.group_key())
                .or_insert(TitleGroup {
                    first: record,
                    message_count: 0,
                })
                .message_count += 1;
        }

        let mut results = Vec::new();
        for (key, group) in groups {
            let display_name = if group.first.conversation_name.is_empty() {
                group.first.file_name.as_str()
            } else {
                group.first.conversation_name.as_str()
            };
            let title = display_name.to_lowercase();
            if !title.contains(query) {
                continue;
            }

            let mut record = group.first.clone();
            record.conversation_name = display_name.to_string();

            results.push(SearchResult {
                message_id: format!("title_{}", key),
                record,
                score: score_with(matcher, query, &title),
                preview: display_name.to_string(),
                duplicates: Vec::new(),
                message_count: Some(group.message_count),
                is_conversation_result: true,
            });
            seen.files.insert(group.first.file_id.as_str());
            seen.conversations.insert(key);
        }

        results
    }

    fn search_content<'a>(
        &'a self,
        query: &str,
        matcher: &LiteralMatcher,
        options: &SearchOptions,
        seen: &mut MatchSets<'a>,
    ) -> Vec<SearchResult> {
        let mut results = Vec::new();

        for (message_id, record) in &self.entries {
            if !matches_query(record, query, options) {
                continue;
            }

            results.push(SearchResult {
                message_id: message_id.clone(),
                record: record.clone(),
                score: score_with(matcher, query, &record.searchable_text),
                preview: preview_with(Some(matcher), &record.searchable_text, DEFAULT_PREVIEW_LENGTH),
                duplicates: Vec::new(),
                message_count: None,
                is_conversation_result: false,
            });
            seen.files.insert(record.file_id.as_str());
            if !record.conversation_id.is_empty() {
                seen.conversations.insert(record.conversation_id.as_str());
            }
        }

        results
    }
}

fn matches_query(record: &MessageRecord, query: &str, options: &SearchOptions) -> bool {
    if record.searchable_text.contains(query) {
        return true;
    }
    if options.content_only && record.content.to_lowercase().contains(query) {
        return true;
    }
    options.thinking_only && record.has_thinking && record.searchable_text.contains(query)
}

/// Relevance of `text` for `query`, both lower-cased
///
/// - +100 for an exact match of the whole text
/// - +10 per non-overlapping occurrence
/// - +max(0, 50 - offset/10) for the character offset of the first occurrence
pub fn score_relevance(query: &str, text: &str) -> f64 {
    match LiteralMatcher::new(query) {
        Some(matcher) => score_with(&matcher, query, text),
        None if text == query => 100.0,
        None => 0.0,
    }
}

/// `score_relevance` with a matcher already built for `query`
fn score_with(matcher: &LiteralMatcher, query: &str, text: &str) -> f64 {
    let mut score = 0.0;

    if text == query {
        score += 100.0;
    }

    score += 10.0 * matcher.count(text) as f64;
    if let Some(first) = matcher.find_char_offset(text) {
        score += (50.0 - first as f64 / 10.0).max(0.0);
    }

    score
}

/// Excerpt of `text` around the first case-insensitive occurrence of `query`
///
/// Without an occurrence, the first `max_len` characters are returned. Clamped
/// edges are marked with `...`.
pub fn generate_preview(text: &str, query: &str, max_len: usize) -> String {
    preview_with(LiteralMatcher::new(query).as_ref(), text, max_len)
}

fn preview_with(matcher: Option<&LiteralMatcher>, text: &str, max_len: usize) -> String {
    if text.is_empty() {
        return String::new();
    }

    let found = matcher.and_then(|m| m.find(text));
    let Some(range) = found else {
        let head = take_chars(text, max_len);
        return if head.len() < text.len() {
            format!("{}...", head)
        } else {
            head.to_string()
        };
    };

    let start = text[..range.start]
        .char_indices()
        .rev()
        .nth(PREVIEW_CONTEXT_CHARS - 1)
        .map(|(pos, _)| pos)
        .unwrap_or(0);
    let end = text[range.end..]
        .char_indices()
        .nth(PREVIEW_CONTEXT_CHARS)
        .map(|(pos, _)| range.end + pos)
        .unwrap_or(text.len());

    let mut preview = String::with_capacity(end - start + 6);
    if start > 0 {
        preview.push_str("...");
    }
    preview.push_str(&text[start..end]);
    if end < text.len() {
        preview.push_str("...");
    }
    preview
}

/// Duplicate-detection key: normalized content truncated to 100 characters
pub fn content_fingerprint(content: &str) -> String {
    if content.is_empty() {
        return "empty".to_string();
    }
    take_chars(&normalize_whitespace(content), FINGERPRINT_LENGTH).to_string()
}

/// Keep the first result per content fingerprint
///
/// Later results with the same fingerprint are dropped and recorded in the
/// survivor's `duplicates`.
pub fn remove_duplicates(results: Vec<SearchResult>) -> Vec<SearchResult> {
    let mut survivors: HashMap<String, usize> = HashMap::new();
    let mut unique: Vec<SearchResult> = Vec::new();

    for result in results {
        let fingerprint = content_fingerprint(&result.record.content);
        match survivors.get(&fingerprint) {
            Some(&idx) => unique[idx].duplicates.push(DuplicateRef {
                file_id: result.record.file_id,
                conversation_name: result.record.conversation_name,
                message_index: result.record.message_index,
            }),
            None => {
                survivors.insert(fingerprint, unique.len());
                unique.push(result);
            }
        }
    }

    unique
}
