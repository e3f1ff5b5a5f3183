// acbuild: Aliucord Build Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Tool abstractions for task execution.
//!
//! ```text
//! Task --> ToolContext --> ProcessBuilder --> Tools
//!   gradle, d8, aapt2 (external)
//!   packer (in-process zip writer)
//! ToolContext: Arc<Config> + resolved d8/aapt2 paths
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::Config;
use crate::core::process::builder::ProcessBuilder;
use crate::error::Result;

pub mod aapt2;
pub mod d8;
pub mod gradle;
pub mod packer;

use futures_util::future::BoxFuture;

/// Context provided to tools during execution.
#[derive(Debug, Clone)]
pub struct ToolContext {
    config: Arc<Config>,
    d8: PathBuf,
    aapt2: PathBuf,
}

impl ToolContext {
    /// Creates a new `ToolContext`, resolving the configured tool locations.
    #[must_use]
    pub fn new(config: Arc<Config>) -> Self {
        let d8 = resolve_executable(&config.tools.d8);
        let aapt2 = resolve_executable(&config.tools.aapt2);
        Self { config, d8, aapt2 }
    }

    #[must_use]
    pub const fn config(&self) -> &Arc<Config> {
        &self.config
    }

    /// Resolved dexer executable.
    #[must_use]
    pub fn d8(&self) -> &Path {
        &self.d8
    }

    /// Resolved resource compiler/linker executable.
    #[must_use]
    pub fn aapt2(&self) -> &Path {
        &self.aapt2
    }
}

/// Resolves a configured tool location to something spawnable from any
/// working directory.
///
/// Bare names go through the `PATH` lookup (which also finds `d8.bat` on
/// Windows); relative paths are made absolute. A bare name that is not on
/// `PATH` is returned unchanged so the spawn error names it.
#[must_use]
pub fn resolve_executable(program: &Path) -> PathBuf {
    let is_bare = program.components().count() == 1 && !program.is_absolute();
    if is_bare {
        return program
            .to_str()
            .and_then(ProcessBuilder::find)
            .unwrap_or_else(|| program.to_path_buf());
    }
    std::path::absolute(program).unwrap_or_else(|_| program.to_path_buf())
}

/// Trait for tools that a build task drives.
///
/// Each tool encapsulates one external operation (gradle task, d8 run, aapt2
/// compile or link) or one archive operation.
pub trait Tool: Send + Sync {
    /// Returns the name of this tool (e.g., "gradle", "d8", "aapt2").
    fn name(&self) -> &str;

    /// Executes the tool's operation.
    fn run<'a>(&'a self, ctx: &'a ToolContext) -> BoxFuture<'a, Result<()>>;
}

#[cfg(test)]
pub(crate) mod test_utils;
