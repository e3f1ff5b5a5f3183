// acbuild: Aliucord Build Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Plugin discovery for `--plugin '*'`.
//!
//! ```text
//! PluginSource::Settings  settings.gradle(.kts) include lines
//! PluginSource::Gradle    ./gradlew projects, "Project ':Name'" lines
//!            |
//!            v
//!   reserved names dropped (Aliucord, DiscordStubs), order kept
//! ```

use std::path::{Path, PathBuf};

use anyhow::Context;
use regex::Regex;
use tracing::debug;

use crate::config::Config;
use crate::error::{FsError, Result};
use crate::task::tools::gradle::{GradleTool, PROJECTS_TASK};

/// Projects that live in the plugins build but are not plugins.
pub const RESERVED_PROJECTS: [&str; 2] = ["Aliucord", "DiscordStubs"];

const SETTINGS_FILES: [&str; 2] = ["settings.gradle", "settings.gradle.kts"];

/// Where plugin names come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PluginSource {
    /// Parse the settings manifest directly.
    #[default]
    Settings,
    /// Ask Gradle for its project list.
    Gradle,
}

#[must_use]
pub fn is_reserved(name: &str) -> bool {
    RESERVED_PROJECTS.contains(&name)
}

fn push_unique(names: &mut Vec<String>, name: &str) {
    if !name.is_empty() && !names.iter().any(|n| n == name) {
        names.push(name.to_string());
    }
}

/// Extracts project names from `include` statements of a settings file.
///
/// Handles Groovy (`include ':A', ':B'`) and Kotlin (`include(":A")`)
/// forms. Blank lines, `//` comments and `rootProject.name` are skipped.
/// Nested paths keep their inner separators (`:group:A` becomes `group:A`).
#[must_use]
pub fn parse_settings(content: &str) -> Vec<String> {
    let mut names = Vec::new();

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with("//") || line.contains("rootProject.name") {
            continue;
        }
        let Some(rest) = line.strip_prefix("include") else {
            continue;
        };
        // includeBuild, includeFlat, ...
        if !rest.starts_with(|c: char| c.is_whitespace() || c == '(') {
            continue;
        }
        let rest = rest.split("//").next().unwrap_or_default();

        for item in rest.split(',') {
            let item = item
                .trim()
                .trim_start_matches('(')
                .trim_end_matches(')')
                .trim()
                .trim_matches(['\'', '"'])
                .trim_start_matches(':');
            push_unique(&mut names, item);
        }
    }

    names
}

/// Extracts top-level project names from `gradlew projects` output.
///
/// # Errors
///
/// Returns an error if the pattern fails to compile.
pub fn parse_gradle_projects(output: &str) -> Result<Vec<String>> {
    let regex = Regex::new(r"Project '([^']+)'")
        .with_context(|| "failed to compile gradle projects regex")?;

    let mut names = Vec::new();
    for captures in regex.captures_iter(output) {
        let Some(path) = captures.get(1) else {
            continue;
        };
        let Some(name) = path.as_str().strip_prefix(':') else {
            continue;
        };
        // nested projects (":group:child") are not plugins
        if !name.contains(':') {
            push_unique(&mut names, name);
        }
    }
    Ok(names)
}

/// Drops reserved project names, keeping order.
#[must_use]
pub fn without_reserved(names: Vec<String>) -> Vec<String> {
    names.into_iter().filter(|n| !is_reserved(n)).collect()
}

/// Finds the settings manifest in `plugins_dir`.
///
/// # Errors
///
/// Returns `FsError::NotFound` if neither `settings.gradle` nor
/// `settings.gradle.kts` exists.
pub fn settings_path(plugins_dir: &Path) -> Result<PathBuf> {
    SETTINGS_FILES
        .iter()
        .map(|name| plugins_dir.join(name))
        .find(|path| path.is_file())
        .ok_or_else(|| {
            FsError::NotFound(plugins_dir.join(SETTINGS_FILES[0]).display().to_string()).into()
        })
}

/// Lists the plugins to build, in project order, reserved names excluded.
///
/// # Errors
///
/// Returns an error if the manifest cannot be read or Gradle fails.
pub async fn discover_plugins(config: &Config, source: PluginSource) -> Result<Vec<String>> {
    let names = match source {
        PluginSource::Settings => {
            let path = settings_path(&config.plugins)?;
            let content = tokio::fs::read_to_string(&path)
                .await
                .map_err(|e| FsError::io(&path, e))?;
            parse_settings(&content)
        }
        PluginSource::Gradle => {
            let output = GradleTool::new()
                .project_dir(&config.plugins)
                .task(PROJECTS_TASK)
                .output()
                .await?;
            parse_gradle_projects(&output)?
        }
    };

    let plugins = without_reserved(names);
    debug!(?source, plugins = ?plugins, "discovered plugins");
    Ok(plugins)
}
