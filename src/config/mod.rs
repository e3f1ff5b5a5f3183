// acbuild: Aliucord Build Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration management for acbuild.
//!
//! # Configuration Sources
//!
//! ```text
//! Priority (low → high)
//! 1. defaults (android_sdk_version = "29", tools = d8/aapt2)
//! 2. config.json (or --config FILE)
//! 3. ACBUILD_* env vars
//! ```
//!
//! # File Format
//!
//! ```json
//! {
//!   "aliucord": "../Aliucord",
//!   "plugins": "../plugins",
//!   "androidSDK": "/opt/android-sdk",
//!   "androidSDKVersion": "29",
//!   "outputs": "../outputs",
//!   "outputsPlugins": "../outputs/plugins"
//! }
//! ```
//!
//! # Environment Variable Mapping
//!
//! ```text
//! ACBUILD_OUTPUTS=/tmp/out          → outputs
//! ACBUILD_ANDROID_SDK_VERSION=30    → android_sdk_version
//! ACBUILD_OUTPUTS_PLUGINS=/tmp/op   → outputs_plugins
//! ACBUILD_TOOLS__D8=/opt/bt/d8      → tools.d8
//! ```
//!
//! Keys match case-insensitively and ignore underscores, so `androidSDK`,
//! `AndroidSDK`, `android_sdk` and `ANDROID_SDK` are the same key.

pub mod loader;


use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};

use loader::ConfigLoader;

/// SDK platform used when the config leaves the version blank.
pub const DEFAULT_SDK_VERSION: &str = "29";

/// Complete application configuration.
///
/// Loaded once at startup and shared read-only as `Arc<Config>`. Field names
/// below are the folded key spellings the loader produces.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Config {
    /// Root of the Aliucord core project.
    pub aliucord: PathBuf,
    /// Root of the plugins project.
    pub plugins: PathBuf,
    /// Android SDK root.
    #[serde(rename = "androidsdk")]
    pub android_sdk: PathBuf,
    /// Android platform version used to link resources.
    #[serde(rename = "androidsdkversion", default)]
    pub android_sdk_version: String,
    /// Output directory for the core dex.
    pub outputs: PathBuf,
    /// Output directory for plugin archives.
    #[serde(rename = "outputsplugins")]
    pub outputs_plugins: PathBuf,
    /// External tool locations.
    #[serde(default)]
    pub tools: ToolsConfig,
}

/// Locations of the Android build-tools.
///
/// Bare names are resolved through `PATH` when the tools are checked.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ToolsConfig {
    pub d8: PathBuf,
    pub aapt2: PathBuf,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            d8: PathBuf::from("d8"),
            aapt2: PathBuf::from("aapt2"),
        }
    }
}

impl Config {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use acbuild::config::Config;
    ///
    /// let config = Config::builder()
    ///     .add_json_file("config.json")
    ///     .with_env_prefix("ACBUILD")
    ///     .build()?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    #[must_use]
    pub fn builder() -> ConfigLoader {
        ConfigLoader::new()
    }

    /// Loads configuration from a single JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid JSON, or is
    /// missing a required key.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::builder().add_json_file(path).build()
    }

    /// Loads configuration from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid JSON or is missing a
    /// required key.
    pub fn parse(content: &str) -> Result<Self> {
        Self::builder().add_json_str(content).build()
    }

    /// Applies defaults and makes every path absolute.
    ///
    /// Relative paths are resolved against the current directory, the same
    /// base the config file path itself is resolved against.
    ///
    /// # Errors
    ///
    /// Returns an error if a path is empty or the current directory cannot be
    /// determined.
    pub fn resolve(&mut self) -> Result<()> {
        if self.android_sdk_version.trim().is_empty() {
            self.android_sdk_version = DEFAULT_SDK_VERSION.to_string();
        } else {
            self.android_sdk_version = self.android_sdk_version.trim().to_string();
        }

        for (key, path) in [
            ("aliucord", &mut self.aliucord),
            ("plugins", &mut self.plugins),
            ("android_sdk", &mut self.android_sdk),
            ("outputs", &mut self.outputs),
            ("outputs_plugins", &mut self.outputs_plugins),
        ] {
            *path = absolutize(key, path)?;
        }
        Ok(())
    }

    /// Path of the platform `android.jar` that resources are linked against.
    #[must_use]
    pub fn android_jar(&self) -> PathBuf {
        self.android_sdk
            .join("platforms")
            .join(format!("android-{}", self.android_sdk_version))
            .join("android.jar")
    }

    /// Directory of a plugin sub-project.
    #[must_use]
    pub fn plugin_dir(&self, name: &str) -> PathBuf {
        self.plugins.join(name)
    }

    /// Formats the resolved configuration for `--log-level 4` output.
    #[must_use]
    pub fn format_options(&self) -> Vec<String> {
        let options = [
            ("aliucord", self.aliucord.display().to_string()),
            ("plugins", self.plugins.display().to_string()),
            ("android_sdk", self.android_sdk.display().to_string()),
            ("android_sdk_version", self.android_sdk_version.clone()),
            ("outputs", self.outputs.display().to_string()),
            ("outputs_plugins", self.outputs_plugins.display().to_string()),
            ("tools.d8", self.tools.d8.display().to_string()),
            ("tools.aapt2", self.tools.aapt2.display().to_string()),
        ];

        let width = options.iter().map(|(k, _)| k.len()).max().unwrap_or(0);
        options
            .into_iter()
            .map(|(key, value)| format!("{key:<width$} = {value}"))
            .collect()
    }
}

fn absolutize(key: &str, path: &Path) -> Result<PathBuf> {
    if path.as_os_str().is_empty() {
        return Err(ConfigError::MissingKey {
            key: key.to_string(),
        }
        .into());
    }
    std::path::absolute(path).map_err(|e| {
        ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        }
        .into()
    })
}
