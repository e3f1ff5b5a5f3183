// acbuild: Aliucord Build Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! `d8` dexer invocation.
//!
//! ```text
//! D8Tool
//! Builder: input/output_dir
//! cwd = output_dir
//! d8 <input.zip>  -->  output_dir/classes.dex
//! ```

use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::info;

use super::{BoxFuture, Tool, ToolContext};
use crate::core::process::builder::ProcessBuilder;
use crate::error::{BuildError, Result};

/// File name d8 writes into its working directory.
pub const DEX_FILE_NAME: &str = "classes.dex";

/// Dexer tool: converts a class archive into `classes.dex`.
#[derive(Debug, Clone, Default)]
pub struct D8Tool {
    input: Option<PathBuf>,
    output_dir: Option<PathBuf>,
}

impl D8Tool {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            input: None,
            output_dir: None,
        }
    }

    /// Class archive passed as the sole positional argument.
    #[must_use]
    pub fn input(mut self, path: impl AsRef<Path>) -> Self {
        self.input = Some(path.as_ref().to_path_buf());
        self
    }

    /// Working directory; `classes.dex` lands here.
    #[must_use]
    pub fn output_dir(mut self, path: impl AsRef<Path>) -> Self {
        self.output_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Where the dex is expected after a successful run.
    ///
    /// # Errors
    ///
    /// Returns an error if no output directory was set.
    pub fn dex_path(&self) -> Result<PathBuf> {
        Ok(self.output_dir_required()?.join(DEX_FILE_NAME))
    }

    fn input_required(&self) -> Result<&Path> {
        self.input.as_deref().context("D8Tool: input is required")
    }

    fn output_dir_required(&self) -> Result<&Path> {
        self.output_dir
            .as_deref()
            .context("D8Tool: output_dir is required")
    }
}

impl Tool for D8Tool {
    fn name(&self) -> &'static str {
        "d8"
    }

    fn run<'a>(&'a self, ctx: &'a ToolContext) -> BoxFuture<'a, Result<()>> {
        Box::pin(async move {
            let input = self.input_required()?;
            let output_dir = self.output_dir_required()?;

            info!(input = %input.display(), "dexing");
            ProcessBuilder::new(ctx.d8())
                .arg(input)
                .cwd(output_dir)
                .name("d8")
                .run()
                .await
                .context("d8 failed")?;

            let dex = self.dex_path()?;
            if !dex.is_file() {
                return Err(BuildError::MissingDexOutput(dex.display().to_string()).into());
            }
            Ok(())
        })
    }
}
