//! Reference document assembly.
//!
//! The generator writes one markdown page per symbol. This module folds
//! those pages into a single reference file and rewrites it so that every
//! cross-page link points at an anchor inside the same document.

pub mod headings;
pub mod merge;
pub mod normalize;

use std::path::{Path, PathBuf};

pub use headings::demote_object_literal_headings;
pub use merge::{MergeReport, merge};
pub use normalize::normalize;

/// Returns `<output>/reference.<extension>`.
#[must_use]
pub fn reference_path(output: &Path, extension: &str) -> PathBuf {
    output.join(format!("reference.{extension}"))
}

/// Applies every text rewrite to a merged reference document.
///
/// Link and heading normalization runs first, object-literal demotion last.
#[must_use]
pub fn rewrite(docs: &str) -> String {
    demote_object_literal_headings(&normalize(docs))
}
