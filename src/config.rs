//! Resolved run configuration.
//!
//! The library consumes [`PipelineOptions`] rather than parsed CLI
//! arguments so the pipeline can be driven without clap.

use std::path::PathBuf;

use crate::cli::args::Cli;
use crate::generator::DEFAULT_EXECUTABLES;

/// Everything a pipeline run needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineOptions {
    /// Directory holding the TypeScript sources.
    pub source_dir: PathBuf,
    /// Directory the generator writes into; reset at the start of a run.
    pub output_dir: PathBuf,
    /// Optional tsconfig handed to the generator.
    pub tsconfig: Option<PathBuf>,
    /// Extension of the reference file, without the dot.
    pub file_extension: String,
    /// Generator executables in fallback order.
    pub generators: Vec<PathBuf>,
}

impl PipelineOptions {
    /// Options with the default extension and generator list.
    #[must_use]
    pub fn new(source_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            source_dir: source_dir.into(),
            output_dir: output_dir.into(),
            tsconfig: None,
            file_extension: "md".to_string(),
            generators: DEFAULT_EXECUTABLES.iter().map(PathBuf::from).collect(),
        }
    }
}

impl From<&Cli> for PipelineOptions {
    fn from(cli: &Cli) -> Self {
        Self {
            source_dir: cli.source_dir.clone(),
            output_dir: cli.output.clone(),
            tsconfig: cli.tsconfig.clone(),
            file_extension: cli.file_extension.clone(),
            generators: cli.generators.clone(),
        }
    }
}
