//! Command-line argument definitions for the mindmap CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control the input and output directories, the
//! output shape, configuration file selection, and logging verbosity.

use clap::{Parser, ValueEnum};

/// Output shape written for every converted map.
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Format {
    /// Text-keyed archival shape
    #[default]
    Archive,
    /// Identifier-keyed force-graph shape
    Graph,
}

/// Command-line arguments for the mindmap converter
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Directory searched recursively for `.json` map exports
    #[arg(help = "Path to the input directory")]
    pub input: String,

    /// Directory the converted maps are written to
    #[arg(help = "Path to the output directory")]
    pub output: String,

    /// Output shape
    #[arg(short, long, value_enum, default_value_t = Format::Archive)]
    pub format: Format,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Seed for the pinning decisions of the graph shape
    #[arg(long)]
    pub seed: Option<u64>,

    /// Replace node identifiers with their display text before converting
    #[arg(long)]
    pub rewrite_ids: bool,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
