//! Utility functions.
//!
//! Text extraction and formatting helpers used across the bot.

use teloxide::types::Message;

/// Extract the human-readable text of a message.
///
/// Considers both `text` and `caption` (for photos/videos/documents).
/// If both are present they are joined with a space.
pub fn extract_message_text(msg: &Message) -> String {
    let text = msg.text().unwrap_or("");
    let caption = msg.caption().unwrap_or("");

    if text.is_empty() {
        caption.trim().to_string()
    } else if caption.is_empty() {
        text.trim().to_string()
    } else {
        format!("{} {}", text.trim(), caption.trim())
    }
}

/// Escape special characters for Telegram HTML parse mode.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Truncate a string to at most `max` characters, appending an ellipsis
/// if anything was cut. Counts chars, not bytes, so multi-byte text is safe.
pub fn truncate_chars(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max).collect();
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_escape() {
        assert_eq!(html_escape("<b>&</b>"), "&lt;b&gt;&amp;&lt;/b&gt;");
        assert_eq!(html_escape("plain"), "plain");
    }

    #[test]
    fn test_truncate_chars_short_input_untouched() {
        assert_eq!(truncate_chars("hello", 10), "hello");
        assert_eq!(truncate_chars("hello", 5), "hello");
    }

    #[test]
    fn test_truncate_chars_cuts_and_marks() {
        assert_eq!(truncate_chars("hello world", 5), "hello…");
    }

    #[test]
    fn test_truncate_chars_multibyte() {
        // Cyrillic chars are 2 bytes each; a byte slice here would panic
        assert_eq!(truncate_chars("привет мир", 6), "привет…");
    }
}
