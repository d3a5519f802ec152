//! Typographic character normalization for converted text

/// Map a single smart-punctuation character to its ASCII equivalent.
fn ascii_quote(c: char) -> char {
    match c {
        '\u{2018}' | '\u{2019}' => '\'',
        '\u{201C}' | '\u{201D}' => '"',
        other => other,
    }
}

/// Replace curly single and double quotes with their straight ASCII forms.
/// All other characters pass through unchanged.
pub fn normalize_line(line: &str) -> String {
    line.chars().map(ascii_quote).collect()
}

/// Normalize every line in a converted document. The output has exactly one
/// line per input line, in the same order.
pub fn normalize_lines(lines: Vec<String>) -> Vec<String> {
    lines.into_iter().map(|line| normalize_line(&line)).collect()
}
