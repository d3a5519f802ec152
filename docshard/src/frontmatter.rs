//! Leading YAML metadata block extraction

/// Delimiter that opens a metadata block, and the usual closer.
pub const BLOCK_DELIMITER: &str = "---";

/// Alternate closing delimiter accepted by YAML frontmatter.
const BLOCK_TERMINATOR: &str = "...";

/// Split off a leading metadata block from a normalized document.
///
/// A block is present only when the very first line is exactly `---`. The
/// block runs until a closing `---` or `...` line. The returned pair is the
/// metadata lines (delimiters excluded) and the index of the first body line.
///
/// Without an opening delimiter the metadata is empty and the body starts at
/// line zero. A block that never closes swallows the rest of the document:
/// everything after the opener is metadata and the body is empty.
pub fn extract_frontmatter(lines: &[String]) -> (Vec<String>, usize) {
    if lines.first().map(String::as_str) != Some(BLOCK_DELIMITER) {
        return (Vec::new(), 0);
    }

    let mut metadata = Vec::new();
    for (index, line) in lines.iter().enumerate().skip(1) {
        if line == BLOCK_DELIMITER || line == BLOCK_TERMINATOR {
            return (metadata, index + 1);
        }
        metadata.push(line.clone());
    }

    (metadata, lines.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(lines: &[&str]) -> Vec<String> {
        lines.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_no_block_when_first_line_is_not_delimiter() {
        let lines = doc(&["# Book One", "---", "body"]);
        let (metadata, body_start) = extract_frontmatter(&lines);
        assert!(metadata.is_empty());
        assert_eq!(body_start, 0);
    }

    #[test]
    fn test_extracts_block_closed_by_dashes() {
        let lines = doc(&["---", "author: someone", "tags: [a, b]", "---", "# Book One"]);
        let (metadata, body_start) = extract_frontmatter(&lines);
        assert_eq!(metadata, vec!["author: someone", "tags: [a, b]"]);
        assert_eq!(body_start, 4);
        assert_eq!(lines[body_start], "# Book One");
    }

    #[test]
    fn test_extracts_block_closed_by_dots() {
        let lines = doc(&["---", "author: someone", "...", "body"]);
        let (metadata, body_start) = extract_frontmatter(&lines);
        assert_eq!(metadata, vec!["author: someone"]);
        assert_eq!(body_start, 3);
    }

    #[test]
    fn test_empty_block() {
        let lines = doc(&["---", "---", "body"]);
        let (metadata, body_start) = extract_frontmatter(&lines);
        assert!(metadata.is_empty());
        assert_eq!(body_start, 2);
    }

    #[test]
    fn test_unclosed_block_consumes_document() {
        let lines = doc(&["---", "author: someone", "# Book One"]);
        let (metadata, body_start) = extract_frontmatter(&lines);
        assert_eq!(metadata, vec!["author: someone", "# Book One"]);
        assert_eq!(body_start, lines.len());
    }

    #[test]
    fn test_empty_document() {
        let (metadata, body_start) = extract_frontmatter(&[]);
        assert!(metadata.is_empty());
        assert_eq!(body_start, 0);
    }

    #[test]
    fn test_indented_delimiter_is_not_a_block() {
        let lines = doc(&[" ---", "author: someone", "---"]);
        let (metadata, body_start) = extract_frontmatter(&lines);
        assert!(metadata.is_empty());
        assert_eq!(body_start, 0);
    }
}
