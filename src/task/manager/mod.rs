// acbuild: Aliucord Build Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Task manager for orchestrating task execution.
//!
//! ```text
//! TaskManager::new(config)
//!   .with_output_name()  .add()
//!   .run_all(on_event).await
//!       tasks run one after another
//!       Started / Built events per task
//!       first failure aborts the rest
//! ```

use std::path::Path;
use std::sync::Arc;

use crate::error::Result;
use anyhow::Context;

use crate::config::Config;

use super::{Task, TaskContext, Taskable};

/// Progress reported by [`TaskManager::run_all`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskEvent<'a> {
    /// A task is about to run. `index` is 1-based.
    Started {
        name: &'a str,
        index: usize,
        total: usize,
    },
    /// A task finished and produced `artifact`.
    Built { name: &'a str, artifact: &'a Path },
}

/// Manager for orchestrating task execution.
///
/// Tasks are executed sequentially in the order they were added.
pub struct TaskManager {
    tasks: Vec<Task>,
    config: Arc<Config>,
    output_name: Option<String>,
}

impl TaskManager {
    #[must_use]
    pub const fn new(config: Arc<Config>) -> Self {
        Self {
            tasks: Vec::new(),
            config,
            output_name: None,
        }
    }

    /// Sets the `--output` override handed to every task.
    #[must_use]
    pub fn with_output_name(mut self, name: Option<String>) -> Self {
        self.output_name = name;
        self
    }

    /// Adds a task to be executed.
    pub fn add(&mut self, task: impl Into<Task>) {
        self.tasks.push(task.into());
    }

    #[must_use]
    pub const fn task_count(&self) -> usize {
        self.tasks.len()
    }

    #[must_use]
    pub fn task_names(&self) -> Vec<&str> {
        self.tasks.iter().map(Taskable::name).collect()
    }

    fn create_context(&self) -> TaskContext {
        TaskContext::new(Arc::clone(&self.config)).with_output_name(self.output_name.clone())
    }

    /// Runs all tasks sequentially.
    ///
    /// `on_event` sees a [`TaskEvent::Started`] before and a
    /// [`TaskEvent::Built`] after each task. Returns the number of tasks
    /// that ran.
    ///
    /// # Errors
    ///
    /// Returns the first task error; later tasks do not run.
    pub async fn run_all<F>(&self, mut on_event: F) -> Result<usize>
    where
        F: FnMut(TaskEvent<'_>),
    {
        if self.tasks.is_empty() {
            tracing::debug!("no tasks to run");
            return Ok(0);
        }

        tracing::debug!(task_count = self.tasks.len(), "starting task execution");

        let ctx = self.create_context();

        let total = self.tasks.len();
        for (i, task) in self.tasks.iter().enumerate() {
            tracing::info!(task = %task.name(), index = i + 1, total, "building");
            on_event(TaskEvent::Started {
                name: task.name(),
                index: i + 1,
                total,
            });

            let artifact = task
                .run(&ctx)
                .await
                .with_context(|| format!("failed to build {}", task.name()))?;

            on_event(TaskEvent::Built {
                name: task.name(),
                artifact: &artifact,
            });
        }

        Ok(total)
    }
}
