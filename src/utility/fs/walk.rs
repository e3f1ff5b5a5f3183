// acbuild: Aliucord Build Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::error::{FsError, Result};
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Result of a walk.
#[derive(Debug)]
pub struct WalkResult {
    files: Vec<PathBuf>,
    error_count: usize,
}

impl WalkResult {
    /// Regular files in traversal order (sorted by name at every level).
    #[must_use]
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    /// Number of entries that could not be read during traversal.
    #[must_use]
    pub const fn error_count(&self) -> usize {
        self.error_count
    }
}

/// Visits every file: hidden entries included, ignore files not consulted.
/// Compiled class trees are packed whole.
fn build_walker(root: &Path) -> WalkBuilder {
    let mut builder = WalkBuilder::new(root);

    builder.standard_filters(false);
    builder.hidden(false);
    builder.follow_links(false);

    // deterministic entry order in archives
    builder.sort_by_file_name(|a, b| a.cmp(b));

    builder
}

/// Collects every regular file under `root`, sorted and sequential.
///
/// Unreadable entries are logged at `warn`, counted and skipped.
///
/// # Errors
///
/// Returns `FsError::NotFound` if `root` is not a directory.
pub fn walk_files<P: AsRef<Path>>(root: P) -> Result<WalkResult> {
    let root = root.as_ref();

    if !root.is_dir() {
        return Err(FsError::NotFound(root.display().to_string()).into());
    }

    let mut files = Vec::new();
    let mut error_count = 0;

    for entry in build_walker(root).build() {
        match entry {
            Ok(entry) => {
                if entry.file_type().is_some_and(|ft| ft.is_file()) {
                    files.push(entry.into_path());
                }
            }
            Err(e) => {
                warn!(error = %e, "walk error");
                error_count += 1;
            }
        }
    }

    Ok(WalkResult { files, error_count })
}
