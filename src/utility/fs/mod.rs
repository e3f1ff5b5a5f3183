// acbuild: Aliucord Build Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Filesystem utilities.
//!
//! ```text
//! walk:  walk_files()   sorted sequential ignore::Walk, nothing filtered
//! lock:  OutputLock     advisory exclusive lock per output directory,
//!                       lock file kept beside the directory
//! ```

pub mod lock;
pub mod walk;

#[cfg(test)]
mod tests;
