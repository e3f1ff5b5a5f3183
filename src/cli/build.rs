// acbuild: Aliucord Build Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Target selection.
//!
//! ```text
//! (none)          → core dex
//! -p NAME         → one plugin
//! -p '*'          → every plugin in settings.gradle
//! -o NAME         → artifact file name, suffix added when missing
//! ```

use clap::Args;

use crate::task::BuildTarget;

/// What to build and where the artifact goes.
#[derive(Debug, Clone, Default, Args)]
pub struct BuildArgs {
    /// Plugin to build, or '*' for all plugins. Builds Aliucord when omitted.
    #[arg(short = 'p', long = "plugin", value_name = "NAME")]
    pub plugin: Option<String>,

    /// Output file name.
    #[arg(short = 'o', long = "output", value_name = "NAME")]
    pub output: Option<String>,

    /// List plugins with `gradlew projects` instead of reading settings.gradle.
    #[arg(long = "gradle-projects")]
    pub gradle_projects: bool,
}

impl BuildArgs {
    #[must_use]
    pub fn target(&self) -> BuildTarget {
        BuildTarget::from_flag(self.plugin.as_deref())
    }
}
