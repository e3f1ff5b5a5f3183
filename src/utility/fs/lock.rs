// acbuild: Aliucord Build Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Advisory lock on an output directory.
//!
//! Two builds writing into the same directory would clobber each other's
//! intermediate `classes.dex`. Each run holds an exclusive lock until the
//! guard is dropped. The lock file sits next to the directory
//! (`out/.plugins.acbuild.lock` for `out/plugins`) so nothing extra ends up
//! among the built artifacts.

use std::ffi::OsString;
use std::fs::{File, OpenOptions, TryLockError};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{FsError, Result};

pub const LOCK_FILE_SUFFIX: &str = ".acbuild.lock";

/// Held lock; released on drop.
#[derive(Debug)]
pub struct OutputLock {
    file: File,
}

/// Lock file guarding `dir`.
///
/// A directory without a parent (a filesystem root) keeps its lock inside.
#[must_use]
pub fn lock_path(dir: &Path) -> PathBuf {
    match (dir.parent(), dir.file_name()) {
        (Some(parent), Some(name)) => {
            let mut file_name = OsString::from(".");
            file_name.push(name);
            file_name.push(LOCK_FILE_SUFFIX);
            parent.join(file_name)
        }
        _ => dir.join(LOCK_FILE_SUFFIX),
    }
}

impl OutputLock {
    /// Creates `dir` if needed and takes the lock without blocking.
    ///
    /// # Errors
    ///
    /// - `FsError::Locked` if another process holds the lock.
    /// - `FsError::IoError` if the directory or lock file cannot be created.
    pub fn acquire(dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(dir).map_err(|e| FsError::io(dir, e))?;

        let path = lock_path(dir);
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&path)
            .map_err(|e| FsError::io(&path, e))?;

        match file.try_lock() {
            Ok(()) => {}
            Err(TryLockError::WouldBlock) => {
                return Err(FsError::Locked(dir.display().to_string()).into());
            }
            Err(TryLockError::Error(e)) => return Err(FsError::io(&path, e).into()),
        }

        debug!(path = %path.display(), "output lock acquired");
        Ok(Self { file })
    }
}

impl Drop for OutputLock {
    fn drop(&mut self) {
        let _ = self.file.unlock();
    }
}
