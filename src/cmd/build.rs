// acbuild: Aliucord Build Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Build command implementation.
//!
//! ```text
//! run_build_command
//!   check d8 --version, aapt2 version
//!   BuildTarget from -p
//!   lock outputs (core) or outputs_plugins (plugins)
//!   Core       → CoreTask
//!   Plugin(n)  → PluginTask(n)
//!   AllPlugins → discover_plugins → PluginTask per name, in order
//!   TaskManager::run_all, status lines on stdout
//! ```

use std::sync::Arc;

use console::style;
use tracing::{debug, warn};

use crate::cli::build::BuildArgs;
use crate::config::Config;
use crate::core::process::builder::ProcessBuilder;
use crate::error::{BuildError, Result};
use crate::task::BuildTarget;
use crate::task::discovery::{PluginSource, discover_plugins};
use crate::task::manager::{TaskEvent, TaskManager};
use crate::task::tasks::core::CoreTask;
use crate::task::tasks::plugin::PluginTask;
use crate::task::tools::ToolContext;
use crate::utility::fs::lock::OutputLock;

const BUILD_TOOLS_HINT: &str = "Please add the Android build-tools (Android/Sdk/build-tools/VERSION) to your PATH and try again";

/// Main handler for the build command.
///
/// # Errors
///
/// Returns an error if a tool check fails, the arguments conflict, the
/// output directory is locked, plugin discovery fails, or any task fails.
pub async fn run_build_command(args: &BuildArgs, config: Arc<Config>) -> Result<()> {
    for line in config.format_options() {
        debug!("{line}");
    }

    let target = args.target();
    check_arguments(&target, args)?;

    check_tools(&ToolContext::new(Arc::clone(&config))).await?;

    let output_dir = match target {
        BuildTarget::Core => &config.outputs,
        BuildTarget::Plugin(_) | BuildTarget::AllPlugins => &config.outputs_plugins,
    };
    let _lock = OutputLock::acquire(output_dir)?;

    let mut manager =
        TaskManager::new(Arc::clone(&config)).with_output_name(args.output.clone());
    match &target {
        BuildTarget::Core => manager.add(CoreTask::new()),
        BuildTarget::Plugin(name) => manager.add(PluginTask::new(name)),
        BuildTarget::AllPlugins => {
            let source = if args.gradle_projects {
                PluginSource::Gradle
            } else {
                PluginSource::Settings
            };
            for name in discover_plugins(&config, source).await? {
                manager.add(PluginTask::new(name));
            }
        }
    }

    if manager.task_count() == 0 {
        warn!("no plugins found");
        return Ok(());
    }
    debug!(tasks = ?manager.task_names(), "resolved tasks");

    manager
        .run_all(|event| match event {
            TaskEvent::Started { name, index, .. } => {
                if target == BuildTarget::AllPlugins {
                    if index > 1 {
                        println!();
                    }
                    println!("{}", style(format!("Building plugin: {name}")).blue().bold());
                }
            }
            TaskEvent::Built { name, .. } => {
                println!("{}", style(success_message(&target, name)).green().bold());
            }
        })
        .await?;

    Ok(())
}

/// Rejects option combinations that cannot produce a sensible result.
///
/// # Errors
///
/// Returns `BuildError::InvalidArguments` when `--output` is combined with
/// `--plugin '*'`.
pub fn check_arguments(target: &BuildTarget, args: &BuildArgs) -> Result<()> {
    let has_output = args.output.as_deref().is_some_and(|o| !o.trim().is_empty());
    if *target == BuildTarget::AllPlugins && has_output {
        return Err(BuildError::InvalidArguments(
            "--output cannot be used with --plugin '*', every plugin would be written to the same file"
                .to_string(),
        )
        .into());
    }
    Ok(())
}

/// Runs each external tool once with a harmless argument.
///
/// # Errors
///
/// Returns `BuildError::ToolMissing` for the first tool that cannot be run.
pub async fn check_tools(tools: &ToolContext) -> Result<()> {
    check_tool("d8", ProcessBuilder::new(tools.d8()).arg("--version")).await?;
    check_tool("aapt2", ProcessBuilder::new(tools.aapt2()).arg("version")).await?;
    Ok(())
}

async fn check_tool(tool: &str, process: ProcessBuilder) -> Result<()> {
    match process.quiet().name(tool).run().await {
        Ok(_) => {
            debug!(tool, "tool ok");
            Ok(())
        }
        Err(e) => {
            debug!(tool, error = %format!("{e:#}"), "tool check failed");
            Err(BuildError::ToolMissing {
                tool: tool.to_string(),
                hint: BUILD_TOOLS_HINT.to_string(),
            }
            .into())
        }
    }
}

/// Confirmation line printed after a task succeeds.
#[must_use]
pub fn success_message(target: &BuildTarget, name: &str) -> String {
    match target {
        BuildTarget::Core => "Successfully built Aliucord".to_string(),
        BuildTarget::Plugin(_) | BuildTarget::AllPlugins => {
            format!("Successfully built plugin: {name}")
        }
    }
}

