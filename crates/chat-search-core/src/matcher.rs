//! Case-insensitive literal matching and highlighting

use regex::{Regex, RegexBuilder};
use std::ops::Range;

/// A query compiled to a case-insensitive literal pattern
///
/// Regex metacharacters in the query are escaped, so `a.b` only matches the
/// text `a.b`.
#[derive(Debug, Clone)]
pub struct LiteralMatcher {
    regex: Regex,
}

impl LiteralMatcher {
    /// Compile a query; `None` for an empty query
    pub fn new(query: &str) -> Option<Self> {
        if query.is_empty() {
            return None;
        }
        RegexBuilder::new(&regex::escape(query))
            .case_insensitive(true)
            .build()
            .ok()
            .map(|regex| Self { regex })
    }

    /// Number of non-overlapping matches
    pub fn count(&self, text: &str) -> usize {
        self.regex.find_iter(text).count()
    }

    /// Byte range of the first match
    pub fn find(&self, text: &str) -> Option<Range<usize>> {
        self.regex.find(text).map(|m| m.range())
    }

    /// Character offset of the first match
    pub fn find_char_offset(&self, text: &str) -> Option<usize> {
        self.find(text).map(|range| text[..range.start].chars().count())
    }

    /// Wrap every match in `<mark>` tags, keeping the original casing
    pub fn highlight(&self, text: &str) -> String {
        self.regex.replace_all(text, "<mark>$0</mark>").into_owned()
    }
}

/// Wrap every case-insensitive occurrence of `query` in `<mark>` tags
///
/// Returns `text` unchanged when either argument is empty.
pub fn highlight_search_text(text: &str, query: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    match LiteralMatcher::new(query) {
        Some(matcher) => matcher.highlight(text),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_query_has_no_matcher() {
        assert!(LiteralMatcher::new("").is_none());
    }

    #[test]
    fn test_count_is_case_insensitive_and_non_overlapping() {
        let m = LiteralMatcher::new("aa").unwrap();
        assert_eq!(m.count("AAAA aa"), 3);
    }

    #[test]
    fn test_metacharacters_are_literal() {
        let m = LiteralMatcher::new("a.b").unwrap();
        assert_eq!(m.count("a.b axb"), 1);

        let m = LiteralMatcher::new("(x)*").unwrap();
        assert_eq!(m.count("(x)* and (x)"), 1);
    }

    #[test]
    fn test_char_offset_counts_characters() {
        let m = LiteralMatcher::new("world").unwrap();
        assert_eq!(m.find_char_offset("héllo world"), Some(6));
        assert_eq!(m.find_char_offset("nothing"), None);
    }

    #[test]
    fn test_highlight_preserves_case() {
        assert_eq!(
            highlight_search_text("Hello hello HELLO", "hello"),
            "<mark>Hello</mark> <mark>hello</mark> <mark>HELLO</mark>"
        );
    }

    #[test]
    fn test_highlight_escapes_query() {
        assert_eq!(highlight_search_text("cost: $5 (est.)", "$5 (est.)"), "cost: <mark>$5 (est.)</mark>");
    }

    #[test]
    fn test_highlight_empty_inputs_unchanged() {
        assert_eq!(highlight_search_text("text", ""), "text");
        assert_eq!(highlight_search_text("", "q"), "");
    }
}
