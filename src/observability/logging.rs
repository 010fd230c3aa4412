//! Tracing subscriber setup.
//!
//! Logs always go to stderr so that stdout carries only the completion
//! message or the JSON run summary.

use std::io::IsTerminal;

use tracing_subscriber::EnvFilter;

use crate::cli::args::ColorChoice;

/// Environment variable holding a filter that replaces the `-v` level.
pub const LOG_LEVEL_ENV: &str = "TS_DOC_GEN_LOG_LEVEL";

/// Rendering of log lines on stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum LogFormat {
    /// Plain text, colored on a terminal.
    #[default]
    Human,
    /// One JSON object per line.
    Json,
}

/// Level for `-v` repeated `verbosity` times. Warnings show by default so
/// generator fallbacks are visible.
#[must_use]
pub const fn level_for(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Builds the filter from an optional override, falling back to the
/// verbosity level when the override is blank or does not parse.
fn build_filter(verbosity: u8, env_override: Option<&str>) -> EnvFilter {
    env_override
        .map(str::trim)
        .filter(|directives| !directives.is_empty())
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(level_for(verbosity)))
}

fn use_ansi(color: ColorChoice) -> bool {
    match color {
        ColorChoice::Auto => {
            std::io::stderr().is_terminal() && std::env::var_os("NO_COLOR").is_none()
        }
        ColorChoice::Always => true,
        ColorChoice::Never => false,
    }
}

/// Installs the global subscriber. A second call is ignored.
pub fn init_logging(format: LogFormat, verbosity: u8, color: ColorChoice) {
    let env_override = std::env::var(LOG_LEVEL_ENV).ok();
    let builder = tracing_subscriber::fmt()
        .with_env_filter(build_filter(verbosity, env_override.as_deref()))
        .with_target(verbosity >= 2)
        .with_writer(std::io::stderr);

    let _ = match format {
        LogFormat::Human => builder.with_ansi(use_ansi(color)).try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
}
