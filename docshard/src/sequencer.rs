//! Sequence numbering and output naming for segmented parts
//!
//! Parts arrive in document order and receive zero-padded book, chapter and
//! part numbers. The numbers drive the folder and file names of the output
//! tree, so the same input always produces the same paths.

use crate::segmenter::Part;
use crate::slug::{slugify, strip_heading_marker};

/// Naming record for one output file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileInfo {
    /// Bare file name, e.g. `001-part-i.md`.
    pub file_name: String,
    /// Path relative to the document's output root, always `/`-separated,
    /// e.g. `001-book-one/001-chapter-a/001-part-i.md`.
    pub relative_path: String,
    /// Book heading text the part appeared under, marker stripped.
    pub book_name: String,
    /// Chapter heading text the part appeared under, marker stripped.
    pub chapter_name: String,
    /// Part heading text, marker stripped.
    pub part_name: String,
    /// Heading line plus body lines, unchanged from segmentation.
    pub content_lines: Vec<String>,
}

/// Counter state threaded through a document's parts.
///
/// A part whose book heading differs from the previous part's starts a new
/// book: the book counter advances and the chapter and part counters restart
/// at one. A part with a new non-empty chapter heading under the same book
/// advances the chapter counter and restarts the part counter. Any other
/// part just advances the part counter.
#[derive(Debug)]
pub struct Sequencer {
    padding: usize,
    book_counter: u64,
    chapter_counter: u64,
    part_counter: u64,
    last_book_heading: String,
    last_chapter_heading: String,
}

impl Sequencer {
    pub fn new(padding: usize) -> Self {
        Self {
            padding,
            book_counter: 0,
            chapter_counter: 0,
            part_counter: 0,
            last_book_heading: String::new(),
            last_chapter_heading: String::new(),
        }
    }

    /// Number a document's parts and derive their output names.
    ///
    /// The result has exactly one `FileInfo` per input part, in the same
    /// order.
    pub fn number_parts(padding: usize, parts: Vec<Part>) -> Vec<FileInfo> {
        let mut sequencer = Self::new(padding);
        let infos: Vec<FileInfo> = parts.into_iter().map(|p| sequencer.assign(p)).collect();

        #[cfg(debug_assertions)]
        {
            use itertools::Itertools;
            let mut paths: Vec<&str> = infos.iter().map(|i| i.relative_path.as_str()).collect();
            paths.sort_unstable();
            // Distinct paths are guaranteed by the counter rules: the part
            // counter advances on every part that keeps its folder pair.
            debug_assert!(
                paths.iter().tuple_windows().all(|(a, b)| a != b),
                "duplicate relative path in planned output tree"
            );
        }

        infos
    }

    /// Advance the counters for one part and build its naming record.
    pub fn assign(&mut self, part: Part) -> FileInfo {
        self.advance(&part);

        let book_folder = format!(
            "{}-{}",
            self.pad(self.book_counter),
            slugify(&part.book_heading)
        );
        let chapter_folder = if part.chapter_heading.trim().is_empty() {
            // Parts with no chapter heading share a synthetic chapter folder
            // numbered after the book they sit in.
            format!(
                "{}-chapter-{}",
                self.pad(self.chapter_counter),
                self.pad(self.book_counter)
            )
        } else {
            format!(
                "{}-{}",
                self.pad(self.chapter_counter),
                slugify(&part.chapter_heading)
            )
        };

        let heading_line = part.content_lines.first().map(String::as_str).unwrap_or("");
        let part_name = strip_heading_marker(heading_line).to_string();
        let file_name = format!("{}-{}.md", self.pad(self.part_counter), slugify(heading_line));
        let relative_path = format!("{book_folder}/{chapter_folder}/{file_name}");

        FileInfo {
            file_name,
            relative_path,
            book_name: part.book_heading,
            chapter_name: part.chapter_heading,
            part_name,
            content_lines: part.content_lines,
        }
    }

    fn advance(&mut self, part: &Part) {
        if part.book_heading != self.last_book_heading {
            self.book_counter += 1;
            self.chapter_counter = 1;
            self.part_counter = 1;
            self.last_book_heading = part.book_heading.clone();
            self.last_chapter_heading = part.chapter_heading.clone();
        } else if !part.chapter_heading.is_empty()
            && part.chapter_heading != self.last_chapter_heading
        {
            self.chapter_counter += 1;
            self.part_counter = 1;
            self.last_chapter_heading = part.chapter_heading.clone();
        } else {
            self.part_counter += 1;
        }
    }

    /// Zero-pad a counter to the configured width. Values wider than the
    /// width keep all their digits.
    fn pad(&self, value: u64) -> String {
        format!("{:0width$}", value, width = self.padding)
    }
}
