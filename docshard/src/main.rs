//! docshard - document splitting tool
//!
//! A CLI tool that converts heading-structured word-processing documents
//! into trees of linked Markdown files, one file per part heading.

#![deny(unsafe_code)]
#![cfg_attr(all(not(debug_assertions), not(test)), deny(clippy::all))]
#![cfg_attr(all(not(debug_assertions), not(test)), deny(clippy::pedantic))]
#![cfg_attr(all(not(debug_assertions), not(test)), deny(missing_docs))]
// Allow some pedantic lints that are too strict for this project
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

mod cli;
mod config;
mod converter;
mod emitter;
mod frontmatter;
mod normalize;
mod pipeline;
mod segmenter;
mod sequencer;
mod slug;

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use cli::{Cli, Commands};
use converter::PandocConverter;
use emitter::LinkStyle;

/// Main entry point for the docshard CLI application
fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {:?}", e);
        std::process::exit(1);
    }
}

/// Run the CLI application
fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Split {
            inputs,
            output,
            padding,
            links,
            pandoc,
            config,
            verbose,
        } => {
            handle_split_command(inputs, output, padding, links, pandoc, config, verbose)?;
        }

        Commands::Inspect {
            inputs,
            padding,
            pandoc,
            config,
            verbose,
        } => {
            handle_inspect_command(inputs, padding, pandoc, config, verbose)?;
        }
    }

    Ok(())
}

/// Effective run settings after merging CLI flags, the configuration file
/// and built-in defaults, in that order of precedence.
struct RunSettings {
    options: pipeline::SplitOptions,
    output_dir: PathBuf,
    program: String,
}

/// Merge command-line values with docshard.toml and the defaults.
fn resolve_settings(
    config: Option<PathBuf>,
    padding: Option<usize>,
    links: Option<LinkStyle>,
    output: Option<PathBuf>,
    pandoc: Option<String>,
) -> Result<RunSettings> {
    let file = match config {
        Some(path) => config::FileConfig::load(&path)
            .with_context(|| format!("Failed to load configuration {}", path.display()))?,
        None => config::FileConfig::load_optional(config::CONFIG_FILE_NAME)
            .context("Failed to load docshard.toml")?,
    };

    let options = pipeline::SplitOptions {
        padding: padding.or(file.padding).unwrap_or(pipeline::DEFAULT_PADDING),
        link_style: links.or(file.link_style).unwrap_or_default(),
    };

    Ok(RunSettings {
        options,
        output_dir: output
            .or(file.output_dir)
            .unwrap_or_else(|| PathBuf::from(".")),
        program: pandoc
            .or(file.pandoc_program)
            .unwrap_or_else(|| "pandoc".to_string()),
    })
}

/// Initialize logging for verbose runs
fn init_logging() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();
}

/// Handle the split command
fn handle_split_command(
    inputs: Vec<PathBuf>,
    output: Option<PathBuf>,
    padding: Option<usize>,
    links: Option<LinkStyle>,
    pandoc: Option<String>,
    config: Option<PathBuf>,
    verbose: bool,
) -> Result<()> {
    if verbose {
        init_logging();
    }

    let settings = resolve_settings(config, padding, links, output, pandoc)?;

    println!("Splitting documents...");
    println!("Output directory: {}", settings.output_dir.display());

    let converter = PandocConverter::new(settings.program);
    let summary = pipeline::run_batch(
        &converter,
        &inputs,
        &settings.options,
        &settings.output_dir,
    )?;

    for report in &summary.processed {
        println!(
            "✓ {}: wrote {} file(s) under {}",
            report.title,
            report.written.len(),
            report.output_root.display()
        );
        for failure in &report.failures {
            println!("  ⚠ {}", failure);
        }
    }

    for (source, error) in &summary.skipped {
        println!("⚠ Skipped {}: {}", source.display(), error);
    }

    println!(
        "\n✓ Completed: {} document(s) split, {} skipped",
        summary.processed.len(),
        summary.skipped.len()
    );

    Ok(())
}

/// Handle the inspect command
fn handle_inspect_command(
    inputs: Vec<PathBuf>,
    padding: Option<usize>,
    pandoc: Option<String>,
    config: Option<PathBuf>,
    verbose: bool,
) -> Result<()> {
    if verbose {
        init_logging();
    }

    let settings = resolve_settings(config, padding, None, None, pandoc)?;
    settings.options.validate()?;

    let converter = PandocConverter::new(settings.program);
    let sources = pipeline::discover_sources(&inputs);
    println!("Inspecting {} document(s)...", sources.len());

    let mut skipped = 0usize;
    for source in sources {
        match pipeline::plan_document(&converter, &source, &settings.options) {
            Ok(plan) => {
                println!(
                    "\n{}: {} part(s) under {}/",
                    plan.title,
                    plan.files.len(),
                    plan.root_folder
                );
                for file in &plan.files {
                    println!("  {}", file.relative_path);
                }
            }
            Err(error) => {
                println!("\n⚠ Skipped {}: {}", source.display(), error);
                skipped += 1;
            }
        }
    }

    println!("\n✓ Inspection complete, {} document(s) skipped", skipped);

    Ok(())
}
