// acbuild: Aliucord Build Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Zip packing of compiled class trees and plugin archives.
//!
//! ```text
//! PackerTool
//! Builder: classes_dir/archive
//! pack_classes(): walk_files(classes_dir) sorted
//!                 entry name = path relative to classes_dir, '/' separated
//!                 unreadable file --> warn, PackReport::skipped
//! plugin:         PluginArchive (classes.dex + ac-plugin [+ linked resources])
//! ```

pub mod plugin;

use std::fs::File;
use std::io::Write;
use std::path::{Component, Path, PathBuf};

use anyhow::Context;
use tracing::{debug, info, warn};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use super::{BoxFuture, Tool, ToolContext};
use crate::error::{ArchiveError, FsError, Result};
use crate::utility::fs::walk::walk_files;

/// Outcome of packing a class tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackReport {
    entries: usize,
    skipped: Vec<PathBuf>,
    walk_errors: usize,
}

impl PackReport {
    /// Number of entries written.
    #[must_use]
    pub const fn entries(&self) -> usize {
        self.entries
    }

    /// Files that were found but could not be read.
    #[must_use]
    pub fn skipped(&self) -> &[PathBuf] {
        &self.skipped
    }

    /// Directory entries the walk itself failed on.
    #[must_use]
    pub const fn walk_errors(&self) -> usize {
        self.walk_errors
    }

    /// True when nothing was left out of the archive.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty() && self.walk_errors == 0
    }
}

pub(crate) fn zip_error(path: &Path, source: zip::result::ZipError) -> ArchiveError {
    ArchiveError::Zip {
        path: path.display().to_string(),
        source,
    }
}

pub(crate) fn deflated() -> SimpleFileOptions {
    SimpleFileOptions::default().compression_method(CompressionMethod::Deflated)
}

/// Archive entry name of `path` relative to `root`, always `/`-separated.
///
/// # Errors
///
/// Returns `ArchiveError::OutsideRoot` if `path` is not below `root`.
pub fn entry_name(root: &Path, path: &Path) -> std::result::Result<String, ArchiveError> {
    let outside = || ArchiveError::OutsideRoot {
        path: path.display().to_string(),
        root: root.display().to_string(),
    };

    let relative = path.strip_prefix(root).map_err(|_| outside())?;
    let parts = relative
        .components()
        .map(|c| match c {
            Component::Normal(part) => Ok(part.to_string_lossy()),
            _ => Err(outside()),
        })
        .collect::<std::result::Result<Vec<_>, _>>()?;

    if parts.is_empty() {
        return Err(outside());
    }
    Ok(parts.join("/"))
}

/// Writes every regular file under `classes_dir` into a new zip at `archive`.
///
/// Entries are written in sorted order with their contents unchanged. A file
/// that cannot be read is logged, recorded in the report and left out.
///
/// # Errors
///
/// - `ArchiveError::MissingClasses` if `classes_dir` is not a directory.
/// - `ArchiveError::OutsideRoot` if the walk yields a path outside the root.
/// - `FsError` / `ArchiveError::Zip` if the archive cannot be written.
pub fn pack_classes(classes_dir: &Path, archive: &Path) -> Result<PackReport> {
    if !classes_dir.is_dir() {
        return Err(ArchiveError::MissingClasses(classes_dir.display().to_string()).into());
    }

    let walk = walk_files(classes_dir)?;
    let mut report = PackReport {
        walk_errors: walk.error_count(),
        ..PackReport::default()
    };

    let file = File::create(archive).map_err(|e| FsError::io(archive, e))?;
    let mut writer = ZipWriter::new(file);
    let options = deflated();

    for path in walk.files() {
        let name = entry_name(classes_dir, path)?;

        let bytes = match std::fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "skipping unreadable file");
                report.skipped.push(path.clone());
                continue;
            }
        };

        writer
            .start_file(name.as_str(), options)
            .map_err(|e| zip_error(archive, e))?;
        writer
            .write_all(&bytes)
            .map_err(|e| FsError::io(archive, e))?;
        report.entries += 1;
    }

    writer.finish().map_err(|e| zip_error(archive, e))?;
    debug!(archive = %archive.display(), entries = report.entries, "class archive written");
    Ok(report)
}

/// Class-tree packing tool.
#[derive(Debug, Clone, Default)]
pub struct PackerTool {
    classes_dir: Option<PathBuf>,
    archive: Option<PathBuf>,
}

impl PackerTool {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            classes_dir: None,
            archive: None,
        }
    }

    #[must_use]
    pub fn classes_dir(mut self, path: impl AsRef<Path>) -> Self {
        self.classes_dir = Some(path.as_ref().to_path_buf());
        self
    }

    #[must_use]
    pub fn archive(mut self, path: impl AsRef<Path>) -> Self {
        self.archive = Some(path.as_ref().to_path_buf());
        self
    }

    fn classes_dir_required(&self) -> Result<&Path> {
        self.classes_dir
            .as_deref()
            .context("PackerTool: classes_dir is required")
    }

    fn archive_required(&self) -> Result<&Path> {
        self.archive
            .as_deref()
            .context("PackerTool: archive path is required")
    }

    /// Packs on the blocking pool and returns the report.
    ///
    /// # Errors
    ///
    /// See [`pack_classes`].
    pub async fn pack(&self) -> Result<PackReport> {
        let classes_dir = self.classes_dir_required()?.to_path_buf();
        let archive = self.archive_required()?.to_path_buf();

        tokio::task::spawn_blocking(move || pack_classes(&classes_dir, &archive))
            .await
            .context("packing task panicked")?
    }
}

impl Tool for PackerTool {
    fn name(&self) -> &'static str {
        "packer"
    }

    fn run<'a>(&'a self, _ctx: &'a ToolContext) -> BoxFuture<'a, Result<()>> {
        Box::pin(async move {
            let report = self.pack().await?;
            let archive = self.archive_required()?;

            if !report.is_complete() {
                warn!(
                    archive = %archive.display(),
                    skipped = report.skipped().len(),
                    walk_errors = report.walk_errors(),
                    "class archive is incomplete"
                );
            }
            info!(
                archive = %archive.display(),
                entries = report.entries(),
                "classes packed"
            );
            Ok(())
        })
    }
}
