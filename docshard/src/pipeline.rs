//! Document splitting pipeline
//!
//! One document flows through five stages: convert to Markdown, normalize
//! smart punctuation, split off frontmatter, segment the body into parts,
//! then number and name the parts. Planning is pure; writing happens only
//! in `process_document`, so `inspect` can share everything up to that
//! point.

use itertools::Itertools;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

use crate::converter::{ConvertError, Converter};
use crate::emitter::{self, LinkStyle, WriteFailure};
use crate::frontmatter::extract_frontmatter;
use crate::normalize::normalize_lines;
use crate::segmenter::Segmenter;
use crate::sequencer::{FileInfo, Sequencer};
use crate::slug::{slugify, title_from_stem};

/// Default zero-padding width for sequence numbers.
pub const DEFAULT_PADDING: usize = 3;

/// File extensions picked up when an input path is a directory.
const SOURCE_EXTENSIONS: [&str; 2] = ["docx", "md"];

/// Knobs shared by every document in a run.
#[derive(Debug, Clone, Copy)]
pub struct SplitOptions {
    /// Zero-padding width for book, chapter and part numbers.
    pub padding: usize,
    /// How navigation links refer to their targets.
    pub link_style: LinkStyle,
}

impl Default for SplitOptions {
    fn default() -> Self {
        Self {
            padding: DEFAULT_PADDING,
            link_style: LinkStyle::default(),
        }
    }
}

impl SplitOptions {
    /// Reject option values no run should start with.
    pub fn validate(&self) -> Result<(), OptionsError> {
        if self.padding == 0 {
            return Err(OptionsError::InvalidPadding(self.padding));
        }
        Ok(())
    }
}

/// Option values that abort a run before any document is touched
#[derive(Error, Debug)]
pub enum OptionsError {
    #[error("Padding width must be at least 1, got {0}")]
    InvalidPadding(usize),
}

/// Reasons one document is skipped while the batch continues
#[derive(Error, Debug)]
pub enum SplitError {
    #[error("Conversion failed for {path}: {source}", path = .0.display(), source = .1)]
    Conversion(PathBuf, #[source] ConvertError),

    #[error("No part headings (###) found in {path}", path = .0.display())]
    NoParts(PathBuf),
}

/// Everything known about one document before any file is written.
#[derive(Debug)]
pub struct DocumentPlan {
    /// The source document the plan was built from.
    pub source: PathBuf,
    /// Human-readable title derived from the source file stem.
    pub title: String,
    /// Slug of the source file stem; the document's folder under the output
    /// directory.
    pub root_folder: String,
    /// Frontmatter lines carried over into every output file.
    pub custom_metadata: Vec<String>,
    /// Planned output files in document order.
    pub files: Vec<FileInfo>,
}

/// Outcome of fully processing one document.
#[derive(Debug)]
pub struct DocumentReport {
    pub source: PathBuf,
    pub title: String,
    /// Folder the document's tree was written under.
    pub output_root: PathBuf,
    /// Files written successfully.
    pub written: Vec<PathBuf>,
    /// Files that could not be written.
    pub failures: Vec<WriteFailure>,
}

/// Outcome of a whole run.
#[derive(Debug, Default)]
pub struct BatchSummary {
    /// Documents that produced an output tree (possibly with per-file
    /// failures).
    pub processed: Vec<DocumentReport>,
    /// Documents skipped before any file was written, with the reason.
    pub skipped: Vec<(PathBuf, SplitError)>,
}

/// Build the output plan for one source document without writing anything.
///
/// # Parameters
/// * `converter` - Conversion backend for the source format
/// * `source` - Path to the source document
/// * `options` - Validated run options
///
/// # Returns
/// * `Ok(DocumentPlan)` - The planned output tree
/// * `Err(SplitError)` - The document cannot be split and should be skipped
pub fn plan_document(
    converter: &dyn Converter,
    source: &Path,
    options: &SplitOptions,
) -> Result<DocumentPlan, SplitError> {
    let text = converter
        .convert(source)
        .map_err(|e| SplitError::Conversion(source.to_path_buf(), e))?;

    let lines: Vec<String> = text.lines().map(str::to_string).collect();
    let lines = normalize_lines(lines);
    let (custom_metadata, body_start) = extract_frontmatter(&lines);

    let parts = Segmenter::segment(&lines[body_start..]);
    if parts.is_empty() {
        return Err(SplitError::NoParts(source.to_path_buf()));
    }

    log::info!("Planned {} parts for {}", parts.len(), source.display());

    let files = Sequencer::number_parts(options.padding, parts);
    let stem = source
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("document");

    Ok(DocumentPlan {
        source: source.to_path_buf(),
        title: title_from_stem(stem),
        root_folder: slugify(stem),
        custom_metadata,
        files,
    })
}

/// Split one document and write its output tree under `output_dir`.
pub fn process_document(
    converter: &dyn Converter,
    source: &Path,
    options: &SplitOptions,
    output_dir: &Path,
) -> Result<DocumentReport, SplitError> {
    let plan = plan_document(converter, source, options)?;
    let output_root = output_dir.join(&plan.root_folder);

    let report = emitter::emit_documents(
        &plan.files,
        &plan.title,
        &plan.custom_metadata,
        options.link_style,
        &output_root,
    );

    Ok(DocumentReport {
        source: plan.source,
        title: plan.title,
        output_root,
        written: report.written,
        failures: report.failures,
    })
}

/// Expand input paths into the list of source documents to process.
///
/// Files are taken as given. Directories are walked recursively for
/// supported extensions, sorted for a stable processing order.
pub fn discover_sources(inputs: &[PathBuf]) -> Vec<PathBuf> {
    let mut sources = Vec::new();

    for input in inputs {
        if input.is_dir() {
            let found = WalkDir::new(input)
                .follow_links(false)
                .into_iter()
                .filter_map(|entry| entry.ok())
                .filter(|entry| entry.path().is_file())
                .filter(|entry| {
                    entry
                        .path()
                        .extension()
                        .and_then(|s| s.to_str())
                        .is_some_and(|ext| SOURCE_EXTENSIONS.contains(&ext))
                })
                .map(|entry| entry.path().to_path_buf())
                .sorted();
            sources.extend(found);
        } else {
            sources.push(input.clone());
        }
    }

    sources
}

/// Split every discovered document, one at a time, in order.
///
/// Option validation is the only failure that aborts the run. A document
/// that cannot be split is recorded as skipped and the batch moves on.
pub fn run_batch(
    converter: &dyn Converter,
    inputs: &[PathBuf],
    options: &SplitOptions,
    output_dir: &Path,
) -> Result<BatchSummary, OptionsError> {
    options.validate()?;

    let sources = discover_sources(inputs);
    log::info!("Discovered {} source document(s)", sources.len());

    let mut summary = BatchSummary::default();
    for source in sources {
        match process_document(converter, &source, options, output_dir) {
            Ok(report) => summary.processed.push(report),
            Err(error) => {
                log::warn!("Skipping {}: {}", source.display(), error);
                summary.skipped.push((source, error));
            }
        }
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::fs;

    /// In-memory converter keyed by file stem.
    struct FakeConverter {
        texts: HashMap<String, String>,
    }

    impl FakeConverter {
        fn new() -> Self {
            Self {
                texts: HashMap::new(),
            }
        }

        fn with(mut self, stem: &str, text: &str) -> Self {
            self.texts.insert(stem.to_string(), text.to_string());
            self
        }
    }

    impl Converter for FakeConverter {
        fn convert(&self, source: &Path) -> Result<String, ConvertError> {
            let stem = source
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or_default();
            self.texts.get(stem).cloned().ok_or_else(|| {
                ConvertError::UnreadableSource(
                    source.to_path_buf(),
                    std::io::Error::other("no fake text registered"),
                )
            })
        }
    }

    const TWO_BOOK_DOC: &str = "\
---
author: someone
---
# Book One
## Chapter A
### Part I
It\u{2019}s the first part.
### Part II
Second part body.
# Book Two
### Part III
Third part body.
";

    fn options() -> SplitOptions {
        SplitOptions::default()
    }

    #[test]
    fn test_plan_produces_expected_paths() {
        let converter = FakeConverter::new().with("my-book", TWO_BOOK_DOC);
        let plan = plan_document(&converter, Path::new("my-book.docx"), &options()).unwrap();

        let paths: Vec<&str> = plan.files.iter().map(|f| f.relative_path.as_str()).collect();
        assert_eq!(
            paths,
            vec![
                "001-book-one/001-chapter-a/001-part-i.md",
                "001-book-one/001-chapter-a/002-part-ii.md",
                "002-book-two/001-chapter-002/001-part-iii.md",
            ]
        );
        assert_eq!(plan.title, "My Book");
        assert_eq!(plan.root_folder, "my-book");
        assert_eq!(plan.custom_metadata, vec!["author: someone"]);
    }

    #[test]
    fn test_plan_normalizes_smart_punctuation() {
        let converter = FakeConverter::new().with("doc", TWO_BOOK_DOC);
        let plan = plan_document(&converter, Path::new("doc.docx"), &options()).unwrap();
        assert_eq!(plan.files[0].content_lines[1], "It's the first part.");
    }

    #[test]
    fn test_document_without_parts_is_rejected() {
        // Book and chapter headings alone are not enough; only part headings
        // produce output.
        let converter =
            FakeConverter::new().with("flat", "# Book One\n## Chapter A\njust prose\n");
        let result = plan_document(&converter, Path::new("flat.docx"), &options());
        assert!(matches!(result, Err(SplitError::NoParts(_))));
    }

    #[test]
    fn test_conversion_failure_is_reported() {
        let converter = FakeConverter::new();
        let result = plan_document(&converter, Path::new("missing.docx"), &options());
        assert!(matches!(result, Err(SplitError::Conversion(_, _))));
    }

    #[test]
    fn test_frontmatter_headings_do_not_segment() {
        // Heading-like lines inside an unclosed metadata block are metadata,
        // so the document has no parts.
        let converter = FakeConverter::new().with("meta", "---\n### Part I\nbody\n");
        let result = plan_document(&converter, Path::new("meta.docx"), &options());
        assert!(matches!(result, Err(SplitError::NoParts(_))));
    }

    #[test]
    fn test_process_writes_the_planned_tree() {
        let dir = tempfile::tempdir().unwrap();
        let converter = FakeConverter::new().with("my-book", TWO_BOOK_DOC);
        let report =
            process_document(&converter, Path::new("my-book.docx"), &options(), dir.path())
                .unwrap();

        assert_eq!(report.written.len(), 3);
        assert!(report.failures.is_empty());
        assert_eq!(report.output_root, dir.path().join("my-book"));
        assert!(dir
            .path()
            .join("my-book/001-book-one/001-chapter-a/001-part-i.md")
            .is_file());
        assert!(dir
            .path()
            .join("my-book/002-book-two/001-chapter-002/001-part-iii.md")
            .is_file());
    }

    #[test]
    fn test_process_is_deterministic() {
        let dir_a = tempfile::tempdir().unwrap();
        let dir_b = tempfile::tempdir().unwrap();
        let converter = FakeConverter::new().with("my-book", TWO_BOOK_DOC);

        let report_a =
            process_document(&converter, Path::new("my-book.docx"), &options(), dir_a.path())
                .unwrap();
        let report_b =
            process_document(&converter, Path::new("my-book.docx"), &options(), dir_b.path())
                .unwrap();

        let relative = |report: &DocumentReport, root: &Path| -> Vec<PathBuf> {
            report
                .written
                .iter()
                .map(|p| p.strip_prefix(root).unwrap().to_path_buf())
                .collect()
        };
        let paths = relative(&report_a, dir_a.path());
        assert_eq!(paths, relative(&report_b, dir_b.path()));

        for path in paths {
            let a = fs::read_to_string(dir_a.path().join(&path)).unwrap();
            let b = fs::read_to_string(dir_b.path().join(&path)).unwrap();
            assert_eq!(a, b, "{} differs between runs", path.display());
        }
    }

    #[test]
    fn test_skipped_document_leaves_no_output() {
        let dir = tempfile::tempdir().unwrap();
        let converter = FakeConverter::new().with("flat", "just prose, no headings\n");
        let result = process_document(&converter, Path::new("flat.docx"), &options(), dir.path());

        assert!(result.is_err());
        assert!(!dir.path().join("flat").exists());
    }

    #[test]
    fn test_run_batch_continues_past_skipped_documents() {
        let dir = tempfile::tempdir().unwrap();
        let converter = FakeConverter::new()
            .with("good", TWO_BOOK_DOC)
            .with("flat", "no parts here\n");

        let inputs = vec![PathBuf::from("flat.docx"), PathBuf::from("good.docx")];
        let summary = run_batch(&converter, &inputs, &options(), dir.path()).unwrap();

        assert_eq!(summary.processed.len(), 1);
        assert_eq!(summary.skipped.len(), 1);
        assert_eq!(summary.skipped[0].0, PathBuf::from("flat.docx"));
        assert!(dir.path().join("good").is_dir());
    }

    #[test]
    fn test_run_batch_rejects_zero_padding_up_front() {
        let dir = tempfile::tempdir().unwrap();
        let converter = FakeConverter::new().with("good", TWO_BOOK_DOC);
        let bad = SplitOptions {
            padding: 0,
            ..SplitOptions::default()
        };

        let result = run_batch(&converter, &[PathBuf::from("good.docx")], &bad, dir.path());
        assert!(matches!(result, Err(OptionsError::InvalidPadding(0))));
        assert!(!dir.path().join("good").exists());
    }

    #[test]
    fn test_discover_walks_directories_in_sorted_order() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("b.docx"), b"x").unwrap();
        fs::write(dir.path().join("a.md"), b"x").unwrap();
        fs::write(dir.path().join("notes.txt"), b"x").unwrap();
        fs::write(dir.path().join("nested/c.docx"), b"x").unwrap();

        let sources = discover_sources(&[dir.path().to_path_buf()]);
        let names: Vec<String> = sources
            .iter()
            .map(|p| {
                p.strip_prefix(dir.path())
                    .unwrap()
                    .to_string_lossy()
                    .replace('\\', "/")
            })
            .collect();
        assert_eq!(names, vec!["a.md", "b.docx", "nested/c.docx"]);
    }

    #[test]
    fn test_discover_passes_files_through() {
        let inputs = vec![PathBuf::from("direct.docx"), PathBuf::from("also.odt")];
        let sources = discover_sources(&inputs);
        assert_eq!(sources, inputs);
    }
}
