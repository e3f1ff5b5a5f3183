// acbuild: Aliucord Build Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Concrete task implementations.
//!
//! ```text
//! task::tasks
//! CoreTask:   :Aliucord:compileDebugJavaWithJavac → aliucord.zip → d8 → Aliucord.dex
//! PluginTask: <Name>:compileDebugJavaWithJavac → classes.zip → d8
//!             → [aapt2 compile/link] → <Name>.zip
//! ```

pub mod core;
pub mod plugin;

use std::path::{Path, PathBuf};

/// Where Gradle leaves a module's compiled debug classes.
pub(crate) fn javac_debug_dir(module_dir: &Path) -> PathBuf {
    module_dir
        .join("build")
        .join("intermediates")
        .join("javac")
        .join("debug")
}
