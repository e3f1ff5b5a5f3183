// acbuild: Aliucord Build Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Common task helper functions.
//!
//! | Function | Purpose |
//! |----------|---------|
//! | [`output_file_name`] | Artifact name from default or `--output`, suffix enforced |
//! | [`ensure_dir`] | Create a directory if it doesn't exist |
//! | [`has_entries`] | Directory exists and is non-empty |
//! | [`move_file`] | Rename, replacing the destination |
//! | [`remove_file_if_exists`] | Delete an intermediate file |

use std::path::Path;

use tokio::fs;
use tracing::debug;

use crate::error::{FsError, Result};

/// Artifact file name: the override if given, else `default_stem`, with
/// `.ext` appended unless already present.
#[must_use]
pub fn output_file_name(override_name: Option<&str>, default_stem: &str, ext: &str) -> String {
    let suffix = format!(".{ext}");
    let name = override_name
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .unwrap_or(default_stem);

    if name.ends_with(&suffix) {
        name.to_string()
    } else {
        format!("{name}{suffix}")
    }
}

/// Creates a directory and its parents if they don't exist.
///
/// # Errors
///
/// Returns `FsError::IoError` if the directory cannot be created.
pub async fn ensure_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path)
        .await
        .map_err(|e| FsError::io(path, e))?;
    Ok(())
}

/// Returns true if `dir` is a directory with at least one entry.
pub async fn has_entries(dir: &Path) -> bool {
    match fs::read_dir(dir).await {
        Ok(mut entries) => matches!(entries.next_entry().await, Ok(Some(_))),
        Err(_) => false,
    }
}

/// Moves `from` to `to`, replacing `to`.
///
/// # Errors
///
/// Returns `FsError::IoError` naming the source if the rename fails.
pub async fn move_file(from: &Path, to: &Path) -> Result<()> {
    debug!(from = %from.display(), to = %to.display(), "moving file");
    fs::rename(from, to)
        .await
        .map_err(|e| FsError::io(from, e))?;
    Ok(())
}

/// Removes a file; a file that is already gone is not an error.
///
/// # Errors
///
/// Returns `FsError::IoError` for any other failure.
pub async fn remove_file_if_exists(path: &Path) -> Result<()> {
    match fs::remove_file(path).await {
        Ok(()) => {
            debug!(path = %path.display(), "removed");
            Ok(())
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(FsError::io(path, e).into()),
    }
}
