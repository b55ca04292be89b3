//! Text normalization helpers shared by the renderer and the extractors

use regex::Regex;
use std::sync::LazyLock;

use super::constants::OPAQUE_ID_MIN_LEN;

static NEWLINE_RUN_4: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\n{4,}").expect("BUG: hardcoded regex '\\n{4,}' is invalid")
});

static NEWLINE_RUN_2: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\n{2,}").expect("BUG: hardcoded regex '\\n{2,}' is invalid")
});

static CAMEL_BOUNDARY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([a-z])([A-Z])").expect("BUG: hardcoded camel-case regex is invalid")
});

/// Safely truncate a string to a maximum number of CHARACTERS (not bytes).
///
/// Never splits a multi-byte character.
#[inline]
#[must_use]
pub fn safe_truncate_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        None => s,
        Some((byte_idx, _)) => &s[..byte_idx],
    }
}

/// Collapse every whitespace run (including newlines) to a single space.
///
/// Leading and trailing whitespace collapses too but is not trimmed, so
/// inline flow between sibling nodes keeps its word boundaries.
#[must_use]
pub fn collapse_whitespace(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !in_space {
                out.push(' ');
                in_space = true;
            }
        } else {
            out.push(ch);
            in_space = false;
        }
    }
    out
}

/// Collapse then trim; the common shape for labels and titles.
#[must_use]
pub fn squash(s: &str) -> String {
    collapse_whitespace(s).trim().to_string()
}

/// Replace every run of four or more newlines with `replacement`.
#[must_use]
pub fn collapse_newline_runs(s: &str, replacement: &str) -> String {
    NEWLINE_RUN_4.replace_all(s, replacement).into_owned()
}

/// Replace every run of two or more newlines with `replacement`.
#[must_use]
pub fn collapse_paragraph_breaks(s: &str, replacement: &str) -> String {
    NEWLINE_RUN_2.replace_all(s, replacement).into_owned()
}

/// True for long lowercase-hex strings that are internal IDs, not content.
#[must_use]
pub fn is_opaque_identifier(s: &str) -> bool {
    s.len() >= OPAQUE_ID_MIN_LEN && s.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}

/// `firstName` -> `first Name`
#[must_use]
pub fn split_camel_case(s: &str) -> String {
    CAMEL_BOUNDARY.replace_all(s, "$1 $2").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_mixed_whitespace() {
        assert_eq!(collapse_whitespace("a \n\t b"), "a b");
        assert_eq!(collapse_whitespace("\n\nx\n"), " x ");
        assert_eq!(squash("  hello\n world  "), "hello world");
    }

    #[test]
    fn opaque_identifiers() {
        assert!(is_opaque_identifier("0123456789abcdef0123"));
        assert!(!is_opaque_identifier("0123456789abcdef012"));
        assert!(!is_opaque_identifier("0123456789ABCDEF0123"));
        assert!(!is_opaque_identifier("john@example.com"));
    }

    #[test]
    fn newline_runs() {
        assert_eq!(collapse_newline_runs("a\n\n\n\n\nb", "\n\n"), "a\n\nb");
        assert_eq!(collapse_newline_runs("a\n\n\nb", "\n\n"), "a\n\n\nb");
        assert_eq!(collapse_paragraph_breaks("a\n\nb\nc", "\n"), "a\nb\nc");
    }

    #[test]
    fn camel_case_split() {
        assert_eq!(split_camel_case("legalNameFirst"), "legal Name First");
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        assert_eq!(safe_truncate_chars("Hello, World!", 5), "Hello");
        assert_eq!(safe_truncate_chars("🎉🎊🎈", 2), "🎉🎊");
        assert_eq!(safe_truncate_chars("Hi", 100), "Hi");
    }
}
