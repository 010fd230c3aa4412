//! Output directory preparation.

use std::io::ErrorKind;
use std::path::Path;

use tracing::debug;

use crate::error::{DocGenError, Result};

/// Recursively removes `dir` and everything in it.
///
/// A missing directory is not an error, so repeated runs start from the
/// same empty state.
///
/// # Errors
///
/// Returns `DocGenError::Fs` if the directory exists but cannot be removed.
pub async fn reset_output_dir(dir: &Path) -> Result<()> {
    match tokio::fs::remove_dir_all(dir).await {
        Ok(()) => {
            debug!(path = %dir.display(), "removed previous output");
            Ok(())
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(DocGenError::fs("removing output directory", dir, e)),
    }
}

/// Removes a single file, treating absence as success.
///
/// # Errors
///
/// Returns `DocGenError::Fs` for any failure other than `NotFound`.
pub async fn remove_file_if_exists(path: &Path) -> Result<()> {
    match tokio::fs::remove_file(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(DocGenError::fs("removing file", path, e)),
    }
}
