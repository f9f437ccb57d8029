//! ANSI color helpers for terminal output

use chat_search_core::Sender;
use colored::Colorize;

const MARK_OPEN: &str = "<mark>";
const MARK_CLOSE: &str = "</mark>";

/// Get colored sender indicator
pub fn colored_sender(sender: Option<Sender>) -> String {
    match sender {
        Some(Sender::Human) => "human".cyan().to_string(),
        Some(Sender::Assistant) => "assistant".green().to_string(),
        Some(Sender::Unknown) | None => "unknown".white().dimmed().to_string(),
    }
}

/// Get colored conversation name
pub fn colored_conversation(name: &str) -> String {
    name.cyan().bold().to_string()
}

/// Get colored relevance score
pub fn colored_score(score: f64) -> String {
    format!("{:>6.1}", score).yellow().to_string()
}

/// Get colored message id
pub fn colored_id(id: &str) -> String {
    id.white().dimmed().to_string()
}

/// Get colored header
pub fn header(text: &str) -> String {
    text.bold().underline().to_string()
}

/// Get colored label
pub fn label(text: &str) -> String {
    text.white().dimmed().to_string()
}

/// Get colored value
pub fn value(text: &str) -> String {
    text.white().to_string()
}

/// Get colored warning message
pub fn warning(text: &str) -> String {
    format!("{} {}", "⚠".yellow(), text)
}

/// Replace `<mark>` spans with terminal highlighting
pub fn render_marks(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(open) = rest.find(MARK_OPEN) {
        out.push_str(&rest[..open]);
        let marked = &rest[open + MARK_OPEN.len()..];
        match marked.find(MARK_CLOSE) {
            Some(close) => {
                out.push_str(&marked[..close].black().on_yellow().to_string());
                rest = &marked[close + MARK_CLOSE.len()..];
            }
            None => {
                out.push_str(&rest[open..]);
                rest = "";
            }
        }
    }

    out.push_str(rest);
    out
}

/// Format count with comma separators
pub fn format_count(n: usize) -> String {
    let s = n.to_string();
    let chars: Vec<char> = s.chars().collect();
    let mut result = String::new();

    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(*c);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1000), "1,000");
        assert_eq!(format_count(1234567), "1,234,567");
    }

    #[test]
    fn test_render_marks_without_colors() {
        colored::control::set_override(false);
        assert_eq!(render_marks("say <mark>Hello</mark> twice <mark>hello</mark>"), "say Hello twice hello");
        assert_eq!(render_marks("no marks"), "no marks");
        assert_eq!(render_marks("broken <mark>tag"), "broken <mark>tag");
        colored::control::unset_override();
    }
}
