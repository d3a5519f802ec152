//! Single-pass segmentation of a document body into parts
//!
//! The body is scanned once, line by line. Third-level headings start a new
//! part; first- and second-level headings update the book and chapter context
//! that later parts are tagged with.

use crate::slug::strip_heading_marker;

/// Marker that opens a new part.
pub const PART_MARKER: &str = "### ";
/// Marker that updates the current chapter context.
pub const CHAPTER_MARKER: &str = "## ";
/// Marker that updates the current book context.
pub const BOOK_MARKER: &str = "# ";

/// One part of the document: its heading line, its body lines, and the book
/// and chapter context it appeared under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Part {
    /// Book heading text (marker stripped), empty before any book heading.
    pub book_heading: String,
    /// Chapter heading text (marker stripped), empty before any chapter
    /// heading and reset whenever a new book begins.
    pub chapter_heading: String,
    /// The raw part heading line followed by every body line up to the next
    /// part heading. Intervening book and chapter heading lines are context
    /// updates and are not included, but body lines after them still belong
    /// to the open part.
    pub content_lines: Vec<String>,
}

/// Line-at-a-time segmentation state.
///
/// Book and chapter context are captured into a part at the moment its
/// heading line is seen. Headings encountered later never retag an earlier
/// part, so a book heading between two parts applies only to parts after it.
///
/// Body lines that appear before the first part heading (including prose
/// directly under a book or chapter heading) have no part to belong to and
/// are dropped.
#[derive(Debug, Default)]
pub struct Segmenter {
    current_book: String,
    current_chapter: String,
    active: Option<Part>,
    parts: Vec<Part>,
}

impl Segmenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Segment a full body in one call.
    pub fn segment<I, S>(lines: I) -> Vec<Part>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut segmenter = Self::new();
        for line in lines {
            segmenter.step(line.as_ref());
        }
        segmenter.finish()
    }

    /// Feed one line to the state machine.
    ///
    /// Markers are matched most-specific first so that `### ` lines are
    /// parts, not books. Deeper headings (`#### ` and below) carry no
    /// structural meaning and are kept as body text.
    pub fn step(&mut self, line: &str) {
        if line.starts_with(PART_MARKER) {
            self.finalize_active();
            self.active = Some(Part {
                book_heading: self.current_book.clone(),
                chapter_heading: self.current_chapter.clone(),
                content_lines: vec![line.to_string()],
            });
        } else if line.starts_with(CHAPTER_MARKER) {
            self.current_chapter = strip_heading_marker(line).to_string();
        } else if line.starts_with(BOOK_MARKER) {
            self.current_book = strip_heading_marker(line).to_string();
            self.current_chapter.clear();
        } else if let Some(part) = self.active.as_mut() {
            part.content_lines.push(line.to_string());
        }
    }

    /// Finish the scan, flushing the part still being accumulated.
    pub fn finish(mut self) -> Vec<Part> {
        self.finalize_active();
        self.parts
    }

    fn finalize_active(&mut self) {
        if let Some(part) = self.active.take() {
            self.parts.push(part);
        }
    }
}
