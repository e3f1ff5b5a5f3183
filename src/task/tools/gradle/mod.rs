// acbuild: Aliucord Build Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Gradle wrapper invocation.
//!
//! ```text
//! GradleTool
//! Builder: project_dir/task
//! Windows: <dir>\gradlew.bat <task>
//! Others:  <dir>/gradlew <task>
//! run():    output streamed to the terminal
//! output(): stdout captured (project listing)
//! ```
//!
//! The wrapper is spawned directly with an argument vector. On Windows the
//! standard library applies batch-file quoting to the arguments.

use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::{debug, info};

use super::{BoxFuture, Tool, ToolContext};
use crate::core::process::builder::ProcessBuilder;
use crate::error::{BuildError, Result};

/// Gradle task that compiles a module's Java sources.
pub const COMPILE_TASK: &str = "compileDebugJavaWithJavac";

/// Gradle task that lists the projects of a build.
pub const PROJECTS_TASK: &str = "projects";

#[cfg(windows)]
const WRAPPER_NAME: &str = "gradlew.bat";
#[cfg(not(windows))]
const WRAPPER_NAME: &str = "gradlew";

/// Gradle wrapper tool.
#[derive(Debug, Clone, Default)]
pub struct GradleTool {
    project_dir: Option<PathBuf>,
    task: Option<String>,
}

impl GradleTool {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            project_dir: None,
            task: None,
        }
    }

    /// Directory holding the wrapper script; also the working directory.
    #[must_use]
    pub fn project_dir(mut self, path: impl AsRef<Path>) -> Self {
        self.project_dir = Some(path.as_ref().to_path_buf());
        self
    }

    #[must_use]
    pub fn task(mut self, task: impl Into<String>) -> Self {
        self.task = Some(task.into());
        self
    }

    /// Path of the platform's wrapper script inside `dir`.
    #[must_use]
    pub fn wrapper_path(dir: &Path) -> PathBuf {
        dir.join(WRAPPER_NAME)
    }

    fn project_dir_required(&self) -> Result<&Path> {
        self.project_dir
            .as_deref()
            .context("GradleTool: project_dir is required")
    }

    fn task_required(&self) -> Result<&str> {
        self.task
            .as_deref()
            .context("GradleTool: task is required")
    }

    fn process(&self) -> Result<ProcessBuilder> {
        let dir = self.project_dir_required()?;
        let task = self.task_required()?;

        let wrapper = Self::wrapper_path(dir);
        if !wrapper.is_file() {
            return Err(BuildError::MissingWrapper(wrapper.display().to_string()).into());
        }

        Ok(ProcessBuilder::new(wrapper)
            .arg(task)
            .cwd(dir)
            .name("gradle"))
    }

    /// Runs the task and returns its captured stdout.
    ///
    /// # Errors
    ///
    /// Returns an error if the wrapper is missing or the task fails.
    pub async fn output(&self) -> Result<String> {
        let builder = self.process()?.capture_stdout();
        debug!(task = ?self.task, "running gradle with captured output");

        let output = builder
            .run()
            .await
            .with_context(|| format!("gradle task '{}' failed", self.task.as_deref().unwrap_or("")))?;
        Ok(output.stdout().to_string())
    }
}

impl Tool for GradleTool {
    fn name(&self) -> &'static str {
        "gradle"
    }

    fn run<'a>(&'a self, _ctx: &'a ToolContext) -> BoxFuture<'a, Result<()>> {
        Box::pin(async move {
            let builder = self.process()?.inherit_stdio();
            let task = self.task_required()?;

            info!(task = %task, "running gradle");
            builder
                .run()
                .await
                .with_context(|| format!("gradle task '{task}' failed"))?;
            Ok(())
        })
    }
}
