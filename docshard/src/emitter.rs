//! Output document assembly and writing
//!
//! Each part becomes one Markdown file with:
//! - A YAML metadata block (carried-over custom lines, then title, book,
//!   chapter, part, previous and next)
//! - The part heading rendered as H1
//! - The part's body lines, unchanged

use serde::Deserialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::frontmatter::BLOCK_DELIMITER;
use crate::sequencer::FileInfo;

/// Line separator used when joining an output document.
const LINE_SEPARATOR: &str = if cfg!(windows) { "\r\n" } else { "\n" };

/// How `previous` and `next` wikilinks refer to their target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkStyle {
    /// Link by bare file name, e.g. `[[001-part-i.md|Part I]]`
    #[default]
    Simple,
    /// Link by tree-relative path, e.g.
    /// `[[001-book-one/001-chapter-a/001-part-i.md|Part I]]`
    Full,
}

/// One output file that could not be written.
#[derive(Error, Debug)]
#[error("Failed to write {path}: {source}", path = .path.display())]
pub struct WriteFailure {
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

/// Outcome of writing one document's planned files.
#[derive(Debug, Default)]
pub struct EmitReport {
    /// Paths written successfully, in plan order.
    pub written: Vec<PathBuf>,
    /// Files that failed to write. A failure never aborts the remaining
    /// files.
    pub failures: Vec<WriteFailure>,
}

/// Render a wikilink to a file in the same output tree.
fn wikilink(target: &FileInfo, style: LinkStyle) -> String {
    let reference = match style {
        LinkStyle::Simple => target.file_name.as_str(),
        LinkStyle::Full => target.relative_path.as_str(),
    };
    format!("[[{}|{}]]", reference, target.part_name)
}

/// Render a neighbor link, or the empty string at either end of the
/// sequence.
fn neighbor_link(neighbor: Option<&FileInfo>, style: LinkStyle) -> String {
    neighbor
        .map(|info| wikilink(info, style))
        .unwrap_or_default()
}

/// Quote a metadata value for the YAML block, escaping embedded double
/// quotes.
fn yaml_quote(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\\\""))
}

/// Assemble the full text of one output file.
///
/// `previous` and `next` are the neighboring files in document order across
/// the whole document, not per chapter. The final text ends with a line
/// separator, and any `\'` sequences the converter produced are replaced
/// with plain apostrophes.
pub fn assemble_document(
    info: &FileInfo,
    title: &str,
    custom_metadata: &[String],
    previous: Option<&FileInfo>,
    next: Option<&FileInfo>,
    style: LinkStyle,
) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push(BLOCK_DELIMITER.to_string());
    lines.extend(custom_metadata.iter().cloned());
    lines.push(format!("title: {}", yaml_quote(title)));
    lines.push(format!("book: {}", yaml_quote(&info.book_name)));
    lines.push(format!("chapter: {}", yaml_quote(&info.chapter_name)));
    lines.push(format!("part: {}", yaml_quote(&info.part_name)));
    lines.push(format!(
        "previous: {}",
        yaml_quote(&neighbor_link(previous, style))
    ));
    lines.push(format!("next: {}", yaml_quote(&neighbor_link(next, style))));
    lines.push(BLOCK_DELIMITER.to_string());

    // The heading line is re-rendered as H1; body lines follow unchanged.
    lines.push(format!("# {}", info.part_name));
    lines.extend(info.content_lines.iter().skip(1).cloned());

    let mut text = lines.join(LINE_SEPARATOR);
    text.push_str(LINE_SEPARATOR);
    text.replace("\\'", "'")
}

/// Assemble and write every planned file under `output_root`.
///
/// Parent folders are created as needed. Write failures are collected and
/// reported; they do not stop the remaining files.
pub fn emit_documents(
    infos: &[FileInfo],
    title: &str,
    custom_metadata: &[String],
    style: LinkStyle,
    output_root: &Path,
) -> EmitReport {
    let mut report = EmitReport::default();

    for (index, info) in infos.iter().enumerate() {
        let previous = index.checked_sub(1).and_then(|i| infos.get(i));
        let next = infos.get(index + 1);
        let text = assemble_document(info, title, custom_metadata, previous, next, style);

        let path = output_root.join(&info.relative_path);
        match write_document(&path, &text) {
            Ok(()) => {
                log::info!("Wrote {}", path.display());
                report.written.push(path);
            }
            Err(source) => report.failures.push(WriteFailure { path, source }),
        }
    }

    report
}

/// Write one file, creating its parent folders first.
fn write_document(path: &Path, text: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, text)
}
