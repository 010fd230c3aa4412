//! Top-level command handler
//!
//! Turns parsed arguments into pipeline options, runs the pipeline and
//! prints the run summary.

use crate::cli::args::{Cli, OutputFormat};
use crate::config::PipelineOptions;
use crate::error::DocGenError;
use crate::pipeline::{self, RunSummary};

/// Execute a parsed CLI invocation.
///
/// # Errors
///
/// Returns an error if any pipeline step fails or the summary cannot be
/// serialized.
pub async fn run(cli: &Cli) -> Result<(), DocGenError> {
    let options = PipelineOptions::from(cli);
    let summary = pipeline::run(&options).await?;
    print_summary(&summary, cli.format, cli.quiet)
}

fn print_summary(
    summary: &RunSummary,
    format: OutputFormat,
    quiet: bool,
) -> Result<(), DocGenError> {
    match format {
        OutputFormat::Human => {
            if !quiet {
                println!("TS doc generation complete!");
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string(summary)?);
        }
    }
    Ok(())
}
