//! Merging generated pages into the reference file.
//!
//! Paths are enumerated with a recursive glob and partitioned so that every
//! markdown path comes before every other path. The partition is a stable
//! sort on a boolean key: paths of the same kind stay in traversal order,
//! which is the order the generator's own index assumes. Directories come
//! last so they are already empty when they are removed.

use std::ffi::OsStr;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use glob::MatchOptions;
use serde::Serialize;
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, trace};

use crate::error::{DocGenError, Result};
use crate::output::remove_file_if_exists;

/// Written after every merged page.
pub const SEPARATOR: &str = "\n\n<hr />\n\n";

/// Page that stays on disk and is never merged.
pub const KEPT_PAGE: &str = "README.md";

/// Pages that are never merged. All but [`KEPT_PAGE`] are deleted.
pub const UNMERGED_PAGES: [&str; 3] = [KEPT_PAGE, "SUMMARY.md", "globals.md"];

/// Counts collected while merging.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MergeReport {
    /// Pages appended to the reference file.
    pub merged: usize,
    /// Markdown pages left out of the reference file.
    pub skipped: usize,
    /// Pages deleted from the output directory.
    pub removed_files: usize,
    /// Directories removed from the output directory.
    pub removed_dirs: usize,
}

/// Whether `path` is treated as a generated page.
///
/// Only the part below `root` is inspected, so an output directory whose
/// own name contains `.md` does not turn every entry into a page.
#[must_use]
pub fn is_page(root: &Path, path: &Path) -> bool {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .contains(".md")
}

/// Stable partition: pages first, everything else after.
pub fn pages_first(root: &Path, paths: &mut [PathBuf]) {
    paths.sort_by_key(|path| !is_page(root, path));
}

/// Lists every non-hidden path below `root`, excluding `root` itself.
///
/// # Errors
///
/// Returns an error if `root` is not valid UTF-8 or a directory cannot be
/// read during traversal.
pub fn collect_paths(root: &Path) -> Result<Vec<PathBuf>> {
    let base = root.to_str().ok_or_else(|| DocGenError::NonUtf8Path {
        path: root.to_path_buf(),
    })?;
    let base = base
        .strip_suffix('/')
        .filter(|trimmed| !trimmed.is_empty())
        .unwrap_or(base);
    let pattern = format!("{}/**/*", glob::Pattern::escape(base));

    let options = MatchOptions {
        require_literal_leading_dot: true,
        ..MatchOptions::new()
    };

    glob::glob_with(&pattern, options)?
        .map(|entry| entry.map_err(DocGenError::from))
        .collect()
}

fn is_unmerged(path: &Path) -> bool {
    path.file_name()
        .and_then(OsStr::to_str)
        .is_some_and(|name| UNMERGED_PAGES.contains(&name))
}

fn is_kept(path: &Path) -> bool {
    path.file_name() == Some(OsStr::new(KEPT_PAGE))
}

async fn open_reference(reference: &Path) -> Result<File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(reference)
        .await
        .map_err(|e| DocGenError::fs("opening reference file", reference, e))
}

async fn append_page(file: &mut File, reference: &Path, page: &Path) -> Result<()> {
    let content = tokio::fs::read(page)
        .await
        .map_err(|e| DocGenError::fs("reading page", page, e))?;

    file.write_all(&content)
        .await
        .map_err(|e| DocGenError::fs("appending to reference file", reference, e))?;
    file.write_all(SEPARATOR.as_bytes())
        .await
        .map_err(|e| DocGenError::fs("appending to reference file", reference, e))
}

async fn remove_dir(dir: &Path) -> Result<()> {
    tokio::fs::remove_dir(dir).await.map_err(|e| {
        if e.kind() == ErrorKind::DirectoryNotEmpty {
            DocGenError::DirectoryNotEmpty {
                path: dir.to_path_buf(),
            }
        } else {
            DocGenError::fs("removing directory", dir, e)
        }
    })
}

/// Folds every generated page under `root` into `reference`.
///
/// Any existing `reference` is deleted first. Merged and skipped pages are
/// deleted, except [`KEPT_PAGE`]; directories are removed once emptied.
///
/// # Errors
///
/// Returns `DocGenError::NothingMerged` if no page was appended,
/// `DocGenError::DirectoryNotEmpty` if a directory still holds entries
/// when its turn comes, and I/O or traversal errors otherwise. The output
/// directory is left as it was at the point of failure.
pub async fn merge(root: &Path, reference: &Path) -> Result<MergeReport> {
    remove_file_if_exists(reference).await?;

    let mut paths = collect_paths(root)?;
    pages_first(root, &mut paths);
    debug!(count = paths.len(), "collected generated paths");

    let mut report = MergeReport::default();
    let mut target: Option<File> = None;

    for path in &paths {
        if !is_page(root, path) {
            remove_dir(path).await?;
            trace!(path = %path.display(), "removed directory");
            report.removed_dirs += 1;
            continue;
        }

        if is_unmerged(path) {
            trace!(path = %path.display(), "skipping page");
            report.skipped += 1;
        } else {
            // Opened on the first page so an empty run leaves no file behind.
            let file = match target.take() {
                Some(file) => file,
                None => open_reference(reference).await?,
            };
            append_page(target.insert(file), reference, path).await?;
            debug!(path = %path.display(), "merged page");
            report.merged += 1;
        }

        if !is_kept(path) {
            tokio::fs::remove_file(path)
                .await
                .map_err(|e| DocGenError::fs("removing page", path.as_path(), e))?;
            report.removed_files += 1;
        }
    }

    let Some(mut file) = target else {
        return Err(DocGenError::NothingMerged {
            output: root.to_path_buf(),
        });
    };
    file.flush()
        .await
        .map_err(|e| DocGenError::fs("flushing reference file", reference, e))?;

    info!(
        merged = report.merged,
        skipped = report.skipped,
        removed_dirs = report.removed_dirs,
        reference = %reference.display(),
        "merged generated pages"
    );
    Ok(report)
}
