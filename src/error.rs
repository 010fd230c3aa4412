//! Error types for `ts-doc-gen`
//!
//! Every failure is fatal for the run. The only recovery the tool performs
//! is the generator fallback, which is handled inside the generator module
//! before an error ever reaches this type.

use std::path::PathBuf;
use thiserror::Error;

// ============================================================================
// Exit Codes
// ============================================================================

/// Exit codes for `ts-doc-gen`.
///
/// Argument errors are reported by clap, which exits with its own usage
/// status before any of these apply.
pub struct ExitCode;

impl ExitCode {
    /// Reference document written.
    pub const SUCCESS: i32 = 0;

    /// Any failure: generator exhausted, filesystem error, bad layout.
    pub const ERROR: i32 = 1;
}

// ============================================================================
// Top-Level Error
// ============================================================================

/// Top-level error type for `ts-doc-gen` operations.
#[derive(Debug, Error)]
pub enum DocGenError {
    /// Every configured generator executable failed.
    #[error(transparent)]
    Generator(#[from] GeneratorError),

    /// Filesystem operation failed on a specific path.
    #[error("{action} {}: {source}", .path.display())]
    Fs {
        /// What was being attempted (e.g. "removing directory").
        action: &'static str,
        /// Path the operation targeted.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A directory still had entries when the merge tried to remove it.
    ///
    /// Happens when the generator nests directories or writes files that
    /// are not markdown; the merge only empties directories of markdown.
    #[error("directory not empty after merge: {}", .path.display())]
    DirectoryNotEmpty {
        /// Directory that could not be removed.
        path: PathBuf,
    },

    /// The generator produced no mergeable markdown.
    #[error("no markdown files to merge under {}", .output.display())]
    NothingMerged {
        /// Output directory that was scanned.
        output: PathBuf,
    },

    /// The output path cannot be turned into a glob pattern.
    #[error("output path is not valid UTF-8: {}", .path.display())]
    NonUtf8Path {
        /// The offending path.
        path: PathBuf,
    },

    /// Invalid glob pattern built from the output directory.
    #[error("glob pattern error: {0}")]
    Pattern(#[from] glob::PatternError),

    /// Directory traversal failed while enumerating generated files.
    #[error("glob traversal error: {0}")]
    Glob(#[from] glob::GlobError),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl DocGenError {
    /// Wraps an I/O error with the action and path it relates to.
    #[must_use]
    pub fn fs(action: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Fs {
            action,
            path: path.into(),
            source,
        }
    }

    /// Returns the process exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        ExitCode::ERROR
    }
}

// ============================================================================
// Generator Errors
// ============================================================================

/// A single failed generator attempt.
#[derive(Debug, Error)]
pub enum AttemptError {
    /// The executable could not be started.
    #[error("failed to spawn {}: {source}", .program.display())]
    Spawn {
        /// Executable path that was tried.
        program: PathBuf,
        /// Spawn error.
        #[source]
        source: std::io::Error,
    },

    /// The executable ran and exited unsuccessfully.
    #[error("{} exited with {}: {stderr}", .program.display(), .code.map_or_else(|| "signal".to_string(), |c| format!("status {c}")))]
    NonZeroExit {
        /// Executable path that was tried.
        program: PathBuf,
        /// Exit code, `None` when killed by a signal.
        code: Option<i32>,
        /// Captured standard error, trimmed.
        stderr: String,
    },
}

/// Generator invocation errors.
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// No executable was configured.
    #[error("no generator executable configured")]
    NoExecutables,

    /// Every executable was tried and each one failed.
    #[error("typedoc command failed: {}", format_attempts(.0))]
    Exhausted(Vec<AttemptError>),
}

fn format_attempts(attempts: &[AttemptError]) -> String {
    attempts
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

// ============================================================================
// Result Type Alias
// ============================================================================

/// Result type alias for `ts-doc-gen` operations.
pub type Result<T> = std::result::Result<T, DocGenError>;

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(ExitCode::SUCCESS, 0);
        assert_eq!(ExitCode::ERROR, 1);
    }

    #[test]
    fn test_generator_error_exit_code() {
        let err: DocGenError = GeneratorError::NoExecutables.into();
        assert_eq!(err.exit_code(), ExitCode::ERROR);
    }

    #[test]
    fn test_merge_errors_exit_code() {
        let not_empty = DocGenError::DirectoryNotEmpty {
            path: PathBuf::from("docs/classes"),
        };
        let nothing = DocGenError::NothingMerged {
            output: PathBuf::from("docs"),
        };
        assert_eq!(not_empty.exit_code(), ExitCode::ERROR);
        assert_eq!(nothing.exit_code(), ExitCode::ERROR);
    }

    #[test]
    fn test_fs_error_display_includes_path() {
        let err = DocGenError::fs(
            "removing directory",
            "docs/classes",
            std::io::Error::other("busy"),
        );
        let msg = err.to_string();
        assert!(msg.contains("removing directory"));
        assert!(msg.contains("docs/classes"));
        assert!(msg.contains("busy"));
    }

    #[test]
    fn test_exhausted_lists_every_attempt() {
        let err = GeneratorError::Exhausted(vec![
            AttemptError::Spawn {
                program: PathBuf::from("./node_modules/typedoc/bin/typedoc"),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
            },
            AttemptError::NonZeroExit {
                program: PathBuf::from("./node_modules/.bin/typedoc"),
                code: Some(2),
                stderr: "boom".to_string(),
            },
        ]);
        let msg = err.to_string();
        assert!(msg.starts_with("typedoc command failed"));
        assert!(msg.contains("node_modules/typedoc/bin/typedoc"));
        assert!(msg.contains("exited with status 2: boom"));
    }

    #[test]
    fn test_signal_exit_display() {
        let err = AttemptError::NonZeroExit {
            program: PathBuf::from("typedoc"),
            code: None,
            stderr: String::new(),
        };
        assert!(err.to_string().contains("exited with signal"));
    }
}
