//! End-to-end reference generation.
//!
//! Steps run strictly one after another: reset the output directory, run
//! the generator, merge its pages, rewrite the merged text and write it
//! back. Any failure stops the run where it happened.

use std::path::PathBuf;

use serde::Serialize;
use tracing::info;

use crate::config::PipelineOptions;
use crate::error::{DocGenError, Result};
use crate::generator::{Invocation, typedoc_args};
use crate::output::reset_output_dir;
use crate::reference::{self, MergeReport};

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// Path of the written reference file.
    pub reference: PathBuf,
    /// Generator executable that succeeded.
    pub generator: PathBuf,
    /// Merge counters.
    #[serde(flatten)]
    pub merge: MergeReport,
}

/// Runs the full pipeline for `options`.
///
/// # Errors
///
/// Returns the first error raised by any step. Generator failures are
/// only reported after every configured executable has been tried.
pub async fn run(options: &PipelineOptions) -> Result<RunSummary> {
    reset_output_dir(&options.output_dir).await?;

    let invocation = Invocation::new(
        options.generators.clone(),
        typedoc_args(
            &options.source_dir,
            &options.output_dir,
            options.tsconfig.as_deref(),
        ),
    );
    let generator = invocation.run().await?;
    info!(generator = %generator.display(), "generator finished");

    let reference_file = reference::reference_path(&options.output_dir, &options.file_extension);
    let merge = reference::merge(&options.output_dir, &reference_file).await?;

    let raw = tokio::fs::read(&reference_file)
        .await
        .map_err(|e| DocGenError::fs("reading reference file", &reference_file, e))?;
    let docs = reference::rewrite(&String::from_utf8_lossy(&raw));
    tokio::fs::write(&reference_file, docs)
        .await
        .map_err(|e| DocGenError::fs("writing reference file", &reference_file, e))?;
    info!(reference = %reference_file.display(), "reference written");

    Ok(RunSummary {
        reference: reference_file,
        generator,
        merge,
    })
}
