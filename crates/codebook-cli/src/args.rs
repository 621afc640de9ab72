//! Command-line argument definitions for the codebook CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control the workspace location, protocol and
//! variant selection, configuration file selection, and logging verbosity.

use clap::Parser;

/// Command-line arguments for the codebook generator
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Directory holding the protocol's net dumps and settings file
    #[arg(help = "Path to the protocol workspace directory")]
    pub workspace: String,

    /// Protocol table prefix, e.g. `LPROCcolonbiopt_`
    #[arg(short, long)]
    pub protocol: String,

    /// Output directory for the codebooks and the conflict report
    #[arg(short, long)]
    pub output: Option<String>,

    /// Codebook type (PALGA, PALGAWEB, NKI, DEBUG, "PALGA & NKI")
    #[arg(short = 't', long)]
    pub codebook_type: Option<String>,

    /// Put option lists on separate sheets instead of inline
    #[arg(long)]
    pub separate_sheets: bool,

    /// Caption overwrite file prepared by the curator
    #[arg(long)]
    pub overwrite_file: Option<String>,

    /// Generate from these nets only (comma separated, without extension)
    #[arg(long, value_delimiter = ',')]
    pub nets: Option<Vec<String>>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
