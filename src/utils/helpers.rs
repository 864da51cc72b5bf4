//! Helper functions and utilities
//!
//! This module contains common helper functions used throughout the application.

/// Validate email format
pub fn is_valid_email(email: &str) -> bool {
    email.contains('@') && email.contains('.') && email.len() > 5
}

/// Normalize whitespace in text
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Escape SQL LIKE wildcards so a keyword matches literally
///
/// The returned string is meant to be wrapped in `%...%` and used with
/// `ESCAPE '\'`.
pub fn escape_like_pattern(keyword: &str) -> String {
    keyword
        .replace('\\', r"\\")
        .replace('%', r"\%")
        .replace('_', r"\_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid_email() {
        assert!(is_valid_email("alice@example.com"));
        assert!(!is_valid_email("alice"));
        assert!(!is_valid_email("a@b."));
    }

    #[test]
    fn test_normalize_whitespace() {
        assert_eq!(normalize_whitespace("  hello   world "), "hello world");
        assert_eq!(normalize_whitespace(""), "");
    }

    #[test]
    fn test_escape_like_pattern() {
        assert_eq!(escape_like_pattern("100%"), r"100\%");
        assert_eq!(escape_like_pattern("a_b"), r"a\_b");
        assert_eq!(escape_like_pattern(r"c:\tmp"), r"c:\\tmp");
        assert_eq!(escape_like_pattern("plain"), "plain");
    }
}
