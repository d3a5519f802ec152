//! Source document to Markdown conversion
//!
//! Word-processing sources are handed to an external pandoc-compatible
//! program; Markdown sources are read directly. The rest of the pipeline
//! only ever sees converted Markdown text.

use std::path::{Path, PathBuf};
use std::process::Command;
use thiserror::Error;

/// Errors that can occur while converting one source document
#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("Failed to run {program}: {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} failed with {status}: {stderr}")]
    ConverterFailed {
        program: String,
        status: std::process::ExitStatus,
        stderr: String,
    },

    #[error("Converter produced no output at {path}", path = .0.display())]
    MissingOutput(PathBuf),

    #[error("Failed to read converter output {path}: {source}", path = .0.display(), source = .1)]
    UnreadableOutput(PathBuf, #[source] std::io::Error),

    #[error("Failed to read {path}: {source}", path = .0.display(), source = .1)]
    UnreadableSource(PathBuf, #[source] std::io::Error),
}

/// Converts one source document into Markdown text.
///
/// The pipeline takes the converter as a parameter, so tests can substitute
/// an in-memory implementation and never spawn a real process.
pub trait Converter {
    fn convert(&self, source: &Path) -> Result<String, ConvertError>;
}

/// Converter backed by an external pandoc-compatible executable.
///
/// Sources that are already Markdown are read as-is without spawning the
/// program.
pub struct PandocConverter {
    program: String,
}

impl PandocConverter {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Scratch path the external program writes its Markdown to.
    fn scratch_path(&self, source: &Path) -> PathBuf {
        let stem = source
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("document");
        std::env::temp_dir().join(format!("docshard-{}-{}.md", std::process::id(), stem))
    }
}

impl Converter for PandocConverter {
    fn convert(&self, source: &Path) -> Result<String, ConvertError> {
        if source.extension().and_then(|s| s.to_str()) == Some("md") {
            return std::fs::read_to_string(source)
                .map_err(|e| ConvertError::UnreadableSource(source.to_path_buf(), e));
        }

        let scratch = self.scratch_path(source);
        log::debug!(
            "Converting {} with {} via {}",
            source.display(),
            self.program,
            scratch.display()
        );

        let output = Command::new(&self.program)
            .arg("--to=markdown")
            .arg("--wrap=none")
            .arg("--output")
            .arg(&scratch)
            .arg(source)
            .output()
            .map_err(|e| ConvertError::Launch {
                program: self.program.clone(),
                source: e,
            })?;

        if !output.status.success() {
            return Err(ConvertError::ConverterFailed {
                program: self.program.clone(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        if !scratch.exists() {
            return Err(ConvertError::MissingOutput(scratch));
        }

        let text = std::fs::read_to_string(&scratch)
            .map_err(|e| ConvertError::UnreadableOutput(scratch.clone(), e))?;

        if let Err(e) = std::fs::remove_file(&scratch) {
            log::warn!("Could not remove scratch file {}: {}", scratch.display(), e);
        }

        Ok(text)
    }
}
