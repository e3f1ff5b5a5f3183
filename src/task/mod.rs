// acbuild: Aliucord Build Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Task execution system.
//!
//! # Architecture
//!
//! ```text
//! BuildTarget (from --plugin)
//!      |
//!      v
//! TaskManager  sequential, stops at first failure
//!      |
//!      v
//!   Task enum ----> TaskContext (config, tools, output name)
//!   /      \
//!  v        v
//! Core    Plugin
//!   \      /
//!    v    v
//!    Tools
//! gradle --> packer --> d8 [--> aapt2 --> plugin archive]
//! ```
//!
//! # Key Types
//!
//! | Type | Purpose |
//! |------|---------|
//! | [`TaskManager`](manager::TaskManager) | Runs tasks in order |
//! | [`Task`] | Enum dispatching to concrete task implementations |
//! | [`Taskable`] | Trait defining the common task interface |
//! | [`TaskContext`] | Execution context with config and resolved tools |
//! | [`BuildTarget`] | What the command line asked for |
//!
//! The [`Task`] enum implements `Taskable` via the `impl_taskable_for_task!`
//! macro, which generates a match arm per variant delegating to the inner
//! type.

pub mod discovery;
pub mod helpers;
pub mod manager;
pub mod tasks;
pub mod tools;

use futures_util::future::BoxFuture;
use std::path::PathBuf;
use std::sync::Arc;

use crate::config::Config;
use crate::error::Result;
use crate::task::tools::ToolContext;

use tasks::core::CoreTask;
use tasks::plugin::PluginTask;

/// Sentinel `--plugin` value selecting every plugin.
pub const ALL_PLUGINS: &str = "*";

/// What a single invocation builds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildTarget {
    /// The Aliucord core dex.
    Core,
    /// One plugin archive.
    Plugin(String),
    /// Every plugin listed by the project, reserved names excluded.
    AllPlugins,
}

impl BuildTarget {
    /// Resolves the `--plugin` flag. Absent or blank selects the core.
    #[must_use]
    pub fn from_flag(plugin: Option<&str>) -> Self {
        match plugin.map(str::trim) {
            None | Some("") => Self::Core,
            Some(ALL_PLUGINS) => Self::AllPlugins,
            Some(name) => Self::Plugin(name.to_string()),
        }
    }
}

/// Trait for task implementations.
///
/// `build` resolves to the path of the artifact it produced.
pub trait Taskable {
    /// Returns the task name.
    fn name(&self) -> &str;

    /// Runs the whole pipeline for this target.
    fn build<'a>(&'a self, ctx: &'a TaskContext) -> BoxFuture<'a, Result<PathBuf>>;
}

/// Context provided to tasks during execution.
#[derive(Debug, Clone)]
pub struct TaskContext {
    tools: ToolContext,
    /// `--output` override for the artifact file name.
    output_name: Option<String>,
}

impl TaskContext {
    #[must_use]
    pub fn new(config: Arc<Config>) -> Self {
        Self {
            tools: ToolContext::new(config),
            output_name: None,
        }
    }

    #[must_use]
    pub fn with_output_name(mut self, name: Option<String>) -> Self {
        self.output_name = name.filter(|n| !n.trim().is_empty());
        self
    }

    #[must_use]
    pub const fn config(&self) -> &Arc<Config> {
        self.tools.config()
    }

    #[must_use]
    pub fn output_name(&self) -> Option<&str> {
        self.output_name.as_deref()
    }

    #[must_use]
    pub const fn tool_context(&self) -> &ToolContext {
        &self.tools
    }
}

/// A build task.
#[derive(Debug, Clone)]
pub enum Task {
    /// Aliucord core build.
    Core(CoreTask),
    /// Single plugin build.
    Plugin(PluginTask),
}

impl Task {
    /// Runs the task and returns the artifact path.
    ///
    /// # Errors
    ///
    /// Returns the first error of any pipeline step.
    pub async fn run(&self, ctx: &TaskContext) -> Result<PathBuf> {
        tracing::debug!(task = %Taskable::name(self), "starting task");
        Taskable::build(self, ctx).await
    }
}

impl From<CoreTask> for Task {
    fn from(task: CoreTask) -> Self {
        Self::Core(task)
    }
}

impl From<PluginTask> for Task {
    fn from(task: PluginTask) -> Self {
        Self::Plugin(task)
    }
}

/// Macro to implement Taskable for Task enum by delegating to inner types.
macro_rules! impl_taskable_for_task {
    ($($variant:ident),+ $(,)?) => {
        impl Taskable for Task {
            fn name(&self) -> &str {
                match self {
                    $(Task::$variant(t) => Taskable::name(t),)+
                }
            }

            fn build<'a>(&'a self, ctx: &'a TaskContext) -> BoxFuture<'a, Result<PathBuf>> {
                match self {
                    $(Task::$variant(t) => Taskable::build(t, ctx),)+
                }
            }
        }
    };
}

impl_taskable_for_task!(Core, Plugin);
