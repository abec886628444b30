//! Text helpers for share-image generation and embed payloads.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;

/// Base64-encode a string's UTF-8 bytes.
pub fn btoa(input: &str) -> String {
    BASE64.encode(input.as_bytes())
}

/// Greedy word wrap: each line takes words for as long as appending the
/// next one keeps the line within `max_char_length` characters. The
/// joining space is not counted toward the limit.
pub fn split_lines(input: &str, max_char_length: usize) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    for word in input.split(' ') {
        match lines.last_mut() {
            Some(last) if last.chars().count() + word.chars().count() <= max_char_length => {
                last.push(' ');
                last.push_str(word);
            }
            _ => lines.push(word.to_string()),
        }
    }
    lines
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_btoa() {
        assert_eq!(btoa("hello world"), "aGVsbG8gd29ybGQ=");
        assert_eq!(btoa(""), "");
    }

    #[test]
    fn test_split_lines_wraps_greedily() {
        assert_eq!(
            split_lines("the quick brown fox", 10),
            vec!["the quick", "brown fox"]
        );
    }

    #[test]
    fn test_split_lines_single_line() {
        assert_eq!(split_lines("short title", 40), vec!["short title"]);
    }

    #[test]
    fn test_split_lines_overlong_word_gets_own_line() {
        assert_eq!(
            split_lines("a supercalifragilistic b", 5),
            vec!["a", "supercalifragilistic", "b"]
        );
    }

    #[test]
    fn test_split_lines_empty_input() {
        assert_eq!(split_lines("", 10), vec![""]);
    }

    #[test]
    fn test_split_lines_counts_chars_not_bytes() {
        // "café au" is 7 chars but 8 bytes; "de" still fits a 9-char line
        assert_eq!(split_lines("café au de", 9), vec!["café au de"]);
    }
}
