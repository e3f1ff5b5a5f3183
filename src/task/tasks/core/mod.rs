// acbuild: Aliucord Build Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Aliucord core build.
//!
//! ```text
//! CoreTask
//! gradlew :Aliucord:compileDebugJavaWithJavac   (cwd aliucord)
//! pack Aliucord/build/intermediates/javac/debug/classes → aliucord.zip
//! d8 aliucord.zip                                (cwd outputs)
//! outputs/classes.dex → outputs/<name>.dex
//! ```

use std::path::PathBuf;

use anyhow::Context;
use futures_util::future::BoxFuture;
use tracing::info;

use super::javac_debug_dir;
use crate::config::Config;
use crate::error::Result;
use crate::task::helpers::{ensure_dir, move_file, output_file_name};
use crate::task::tools::Tool;
use crate::task::tools::d8::D8Tool;
use crate::task::tools::gradle::{COMPILE_TASK, GradleTool};
use crate::task::tools::packer::PackerTool;
use crate::task::{TaskContext, Taskable};

/// Gradle module holding the core sources.
pub const CORE_MODULE: &str = "Aliucord";

const DEFAULT_DEX_STEM: &str = "Aliucord";
const CLASS_ARCHIVE: &str = "aliucord.zip";

/// Builds the core dex.
#[derive(Debug, Clone)]
pub struct CoreTask {
    name: String,
}

impl Default for CoreTask {
    fn default() -> Self {
        Self::new()
    }
}

impl CoreTask {
    #[must_use]
    pub fn new() -> Self {
        Self {
            name: CORE_MODULE.to_string(),
        }
    }

    /// `:Aliucord:compileDebugJavaWithJavac`
    #[must_use]
    pub fn gradle_task() -> String {
        format!(":{CORE_MODULE}:{COMPILE_TASK}")
    }

    /// Gradle's javac output directory for the core module.
    #[must_use]
    pub fn javac_dir(config: &Config) -> PathBuf {
        javac_debug_dir(&config.aliucord.join(CORE_MODULE))
    }

    async fn run(&self, ctx: &TaskContext) -> Result<PathBuf> {
        let config = ctx.config();
        let tools = ctx.tool_context();

        GradleTool::new()
            .project_dir(&config.aliucord)
            .task(Self::gradle_task())
            .run(tools)
            .await?;

        let javac = Self::javac_dir(config);
        let archive = javac.join(CLASS_ARCHIVE);
        PackerTool::new()
            .classes_dir(javac.join("classes"))
            .archive(&archive)
            .run(tools)
            .await?;

        ensure_dir(&config.outputs).await?;
        let d8 = D8Tool::new().input(&archive).output_dir(&config.outputs);
        d8.run(tools).await?;

        let out = config
            .outputs
            .join(output_file_name(ctx.output_name(), DEFAULT_DEX_STEM, "dex"));
        move_file(&d8.dex_path()?, &out)
            .await
            .context("failed to place the core dex")?;

        info!(path = %out.display(), "core dex written");
        Ok(out)
    }
}

impl Taskable for CoreTask {
    fn name(&self) -> &str {
        &self.name
    }

    fn build<'a>(&'a self, ctx: &'a TaskContext) -> BoxFuture<'a, Result<PathBuf>> {
        Box::pin(self.run(ctx))
    }
}
