//! Slug and title derivation for headings and file names

use regex::Regex;
use std::sync::LazyLock;

static DISALLOWED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9 -]").expect("valid regex"));
static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Strip leading `#` markers and surrounding whitespace from a heading line.
///
/// Lines without a marker are returned trimmed, so the function is safe to
/// call on arbitrary text.
pub fn strip_heading_marker(line: &str) -> &str {
    line.trim_start_matches('#').trim()
}

/// Derive a filesystem-safe slug from a heading line or plain text.
///
/// The marker (if any) is stripped, the text is lowercased, characters other
/// than lowercase letters, digits, spaces and hyphens are removed, whitespace
/// runs become single hyphens, and leading/trailing hyphens are trimmed.
///
/// Examples:
///   "### Part I" -> "part-i"
///   "Book One" -> "book-one"
pub fn slugify(text: &str) -> String {
    let lowered = strip_heading_marker(text).to_lowercase();
    let kept = DISALLOWED.replace_all(&lowered, "");
    let hyphenated = WHITESPACE_RUN.replace_all(&kept, "-");
    hyphenated.trim_matches('-').to_string()
}

/// Convert a file stem into a human-readable title.
///
/// Hyphens and underscores become spaces and each word is capitalized:
/// "my-great-book" -> "My Great Book".
pub fn title_from_stem(stem: &str) -> String {
    stem.replace(['-', '_'], " ")
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                None => String::new(),
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_heading_marker() {
        assert_eq!(strip_heading_marker("### Part I"), "Part I");
        assert_eq!(strip_heading_marker("## Chapter A"), "Chapter A");
        assert_eq!(strip_heading_marker("# Book One"), "Book One");
        assert_eq!(strip_heading_marker("no marker"), "no marker");
        assert_eq!(strip_heading_marker("###   spaced   "), "spaced");
    }

    #[test]
    fn test_strip_marker_stops_at_first_non_hash() {
        // Only the contiguous leading run of hashes is a marker.
        assert_eq!(strip_heading_marker("# #1 Hit Songs"), "#1 Hit Songs");
    }

    #[test]
    fn test_slugify_headings() {
        assert_eq!(slugify("### Part I"), "part-i");
        assert_eq!(slugify("## Chapter A"), "chapter-a");
        assert_eq!(slugify("# Book One"), "book-one");
    }

    #[test]
    fn test_slugify_removes_punctuation() {
        assert_eq!(slugify("### Hello, World!"), "hello-world");
        assert_eq!(slugify("### It's Time"), "its-time");
        assert_eq!(slugify("### (Parenthetical)"), "parenthetical");
    }

    #[test]
    fn test_slugify_collapses_whitespace() {
        assert_eq!(slugify("### A   Wide    Gap"), "a-wide-gap");
        assert_eq!(slugify("### \tTabbed\tText"), "tabbedtext");
    }

    #[test]
    fn test_slugify_keeps_existing_hyphens() {
        // Hyphens survive removal, so "part - i" keeps a hyphen per gap.
        assert_eq!(slugify("### part - i"), "part---i");
        assert_eq!(slugify("### well-known"), "well-known");
    }

    #[test]
    fn test_slugify_trims_edge_hyphens() {
        assert_eq!(slugify("### -edgy-"), "edgy");
        assert_eq!(slugify("### ..."), "");
    }

    #[test]
    fn test_slugify_is_deterministic() {
        let first = slugify("### Some Heading 42");
        let second = slugify("### Some Heading 42");
        assert_eq!(first, second);
        assert!(first
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'));
    }

    #[test]
    fn test_title_from_stem() {
        assert_eq!(title_from_stem("my-great-book"), "My Great Book");
        assert_eq!(title_from_stem("draft_v2"), "Draft V2");
        assert_eq!(title_from_stem("single"), "Single");
        assert_eq!(title_from_stem(""), "");
    }
}
