//! Command-line interface definitions for docshard

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::emitter::LinkStyle;

/// CLI structure for the docshard application
#[derive(Parser)]
#[command(name = "docshard")]
#[command(version)]
#[command(
    about = "Split word-processing documents into linked Markdown part trees",
    long_about = None
)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands for docshard
#[derive(Subcommand)]
pub enum Commands {
    /// Convert documents and write one Markdown file per part heading
    Split {
        /// Source documents, or directories to scan for .docx/.md files
        #[arg(value_name = "PATH", required = true)]
        inputs: Vec<PathBuf>,

        /// Directory the per-document output trees are created under
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Zero-padding width for sequence numbers
        #[arg(short, long)]
        padding: Option<usize>,

        /// Navigation link style (simple file names or full relative paths)
        #[arg(short, long, value_enum)]
        links: Option<LinkStyle>,

        /// Converter program used for non-Markdown sources
        #[arg(long)]
        pandoc: Option<String>,

        /// Configuration file (defaults to docshard.toml in the working directory)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Show the planned output tree for documents without writing files
    Inspect {
        /// Source documents, or directories to scan for .docx/.md files
        #[arg(value_name = "PATH", required = true)]
        inputs: Vec<PathBuf>,

        /// Zero-padding width for sequence numbers
        #[arg(short, long)]
        padding: Option<usize>,

        /// Converter program used for non-Markdown sources
        #[arg(long)]
        pandoc: Option<String>,

        /// Configuration file (defaults to docshard.toml in the working directory)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },
}
