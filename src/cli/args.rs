//! CLI argument definitions
//!
//! Clap derive struct for `ts-doc-gen` command-line parsing. Flag names
//! follow the camelCase spelling existing build scripts already pass
//! (`--sourceDir`, `--fileExtension`), with kebab-case aliases.

use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};

use crate::generator::DEFAULT_EXECUTABLES;
use crate::observability::LogFormat;

// ============================================================================
// Root CLI
// ============================================================================

/// Generate a single markdown reference document from TypeScript sources.
///
/// Runs TypeDoc with the markdown theme, merges the per-symbol pages into
/// `<output>/reference.<ext>` and rewrites cross-page links into in-page
/// anchors.
#[derive(Parser, Debug)]
#[command(name = "ts-doc-gen", author, version, about)]
#[command(after_help = "Example:\n  ts-doc-gen --src 'src' --out 'docs'    Full usage example")]
pub struct Cli {
    /// Folder where the source TS files are located.
    #[arg(
        short = 's',
        long = "sourceDir",
        visible_aliases = ["src", "source-dir"],
        value_name = "DIR"
    )]
    pub source_dir: PathBuf,

    /// Folder where to put the output doc files.
    #[arg(short = 'o', long, visible_alias = "out", value_name = "DIR")]
    pub output: PathBuf,

    /// A custom tsconfig to use with TypeDoc.
    #[arg(long, value_name = "PATH")]
    pub tsconfig: Option<PathBuf>,

    /// The file extension you want the reference markdown written to.
    #[arg(
        long = "fileExtension",
        visible_alias = "file-extension",
        default_value = "md",
        value_name = "EXT"
    )]
    pub file_extension: String,

    /// Generator executables, tried in order until one succeeds.
    #[arg(
        long = "generator",
        value_name = "PATH",
        env = "TS_DOC_GEN_GENERATOR",
        value_delimiter = ',',
        default_values = DEFAULT_EXECUTABLES
    )]
    pub generators: Vec<PathBuf>,

    /// Run summary format written to stdout.
    #[arg(short, long, default_value = "human")]
    pub format: OutputFormat,

    /// Log line format written to stderr.
    #[arg(long, default_value = "human", env = "TS_DOC_GEN_LOG_FORMAT")]
    pub log_format: LogFormat,

    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all non-error output.
    #[arg(short, long)]
    pub quiet: bool,

    /// Color output control.
    #[arg(long, default_value = "auto", env = "TS_DOC_GEN_COLOR")]
    pub color: ColorChoice,
}

// ============================================================================
// CLI-Local Enums
// ============================================================================

/// Color output choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ColorChoice {
    /// Auto-detect terminal support.
    #[default]
    Auto,
    /// Always use color.
    Always,
    /// Never use color.
    Never,
}

/// Output format for the run summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output.
    #[default]
    Human,
    /// JSON output.
    Json,
}

// ============================================================================
// Tests
// ============================================================================
