//! Run configuration from docshard.toml
//!
//! Every field is optional. Command-line flags win over file values, and
//! file values win over built-in defaults.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::emitter::LinkStyle;

/// Name of the configuration file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "docshard.toml";

/// Defaults read from docshard.toml
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileConfig {
    /// Zero-padding width for sequence numbers
    pub padding: Option<usize>,

    /// Navigation link style (`simple` or `full`)
    pub link_style: Option<LinkStyle>,

    /// Directory the per-document output trees are created under
    pub output_dir: Option<PathBuf>,

    /// Converter program used for non-Markdown sources
    pub pandoc_program: Option<String>,
}

/// Errors that can occur when loading run configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[source] std::io::Error),

    #[error("TOML parse error: {0}")]
    Parse(#[source] toml::de::Error),
}

impl FileConfig {
    /// Load configuration from a docshard.toml file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(&path).map_err(ConfigError::Io)?;
        let config: FileConfig = toml::from_str(&content).map_err(ConfigError::Parse)?;
        Ok(config)
    }

    /// Load a configuration file that may not exist. A missing file yields
    /// the empty configuration; a malformed file is still an error.
    pub fn load_optional<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        if !path.as_ref().exists() {
            return Ok(Self::default());
        }
        Self::load(path)
    }
}
