//! Text escaping for XML element content.

/// Escape text for embedding in XML element content.
///
/// Covers the five special characters. The apostrophe is written as `&#039;`.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + s.len() / 8);
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_plain_text_unchanged() {
        assert_eq!(escape("ABC-123 widget"), "ABC-123 widget");
        assert_eq!(escape(""), "");
    }

    #[test]
    fn test_escape_special_characters() {
        assert_eq!(
            escape(r#"<a href="x">Tom & Jerry's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#039;s&lt;/a&gt;"
        );
    }

    #[test]
    fn test_escape_twice_escapes_entities() {
        let once = escape("A&B");
        assert_eq!(once, "A&amp;B");
        assert_eq!(escape(&once), "A&amp;amp;B");
    }

    #[test]
    fn test_escape_keeps_unicode() {
        assert_eq!(escape("Zoë – Ålesund"), "Zoë – Ålesund");
    }
}
