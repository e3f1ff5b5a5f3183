// acbuild: Aliucord Build Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration loading from a JSON file and the environment.
//!
//! # Loader Pipeline
//!
//! ```text
//! ConfigLoader::new()
//!   .add_json_file(path)
//!   .add_json_str()
//!   .with_env_prefix("ACBUILD")
//!        |
//!        v
//!    build()
//!      collect each source
//!      fold keys (lowercase, drop '_')   outputsPlugins == OUTPUTS_PLUGINS
//!      merge in order, later wins
//!        |
//!        v
//!    Config (resolved)
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use config::{Map, Source, Value, ValueKind};

use super::Config;
use crate::error::{ConfigError, Result};

type BoxedSource = Box<dyn Source + Send + Sync>;

/// Builder for loading configuration from multiple sources.
pub struct ConfigLoader {
    sources: Vec<(String, BoxedSource)>,
    env_prefix: Option<String>,
}

impl ConfigLoader {
    #[must_use]
    pub fn new() -> Self {
        Self {
            sources: Vec::new(),
            env_prefix: None,
        }
    }

    /// Adds a required JSON configuration file.
    ///
    /// The file is read when `build()` is called; a missing file or invalid
    /// JSON makes `build()` fail.
    #[must_use]
    pub fn add_json_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        use config::{File, FileFormat};
        let p = path.as_ref();
        self.sources.push((
            p.display().to_string(),
            Box::new(File::from(p).format(FileFormat::Json).required(true)),
        ));
        self
    }

    #[must_use]
    pub fn add_json_str(mut self, content: &str) -> Self {
        use config::{File, FileFormat};
        self.sources.push((
            "<string>".to_string(),
            Box::new(File::from_str(content, FileFormat::Json)),
        ));
        self
    }

    /// Layers `PREFIX_*` environment variables over the file sources.
    ///
    /// Nested keys use a double underscore (`ACBUILD_TOOLS__D8`).
    #[must_use]
    pub fn with_env_prefix(mut self, prefix: &str) -> Self {
        self.env_prefix = Some(prefix.to_string());
        self
    }

    /// Builds and resolves the configuration.
    ///
    /// Key spelling does not matter: `outputsPlugins`, `OutputsPlugins` and
    /// `outputs_plugins` name the same field, so an environment variable
    /// overrides a camelCase file key instead of colliding with it.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::LoadError` if a file is missing, has invalid
    /// JSON, or lacks a required key, and propagates errors from
    /// [`Config::resolve`].
    pub fn build(mut self) -> Result<Config> {
        let origin = self.describe_sources();
        if let Some(prefix) = &self.env_prefix {
            self.sources.push((
                "the environment".to_string(),
                Box::new(
                    config::Environment::with_prefix(prefix)
                        .prefix_separator("_")
                        .separator("__"),
                ),
            ));
        }

        let load_error = |e: config::ConfigError| ConfigError::LoadError {
            path: origin.clone(),
            message: e.to_string(),
        };

        let mut merged = BTreeMap::new();
        for (_, source) in &self.sources {
            let table = source.collect().map_err(load_error)?;
            flatten_folded("", table, &mut merged);
        }

        let mut config: Config = Value::new(None, ValueKind::Table(unflatten(merged)))
            .try_deserialize()
            .map_err(load_error)?;
        config.resolve()?;
        Ok(config)
    }

    fn describe_sources(&self) -> String {
        if self.sources.is_empty() {
            return "<none>".to_string();
        }
        self.sources
            .iter()
            .map(|(name, _)| name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Canonical spelling of a single key segment.
pub(super) fn fold_key(key: &str) -> String {
    key.chars()
        .filter(|c| *c != '_')
        .flat_map(char::to_lowercase)
        .collect()
}

/// Flattens a source table into dotted, folded paths.
///
/// Environment keys already arrive dotted (`tools.d8`), file keys arrive as
/// nested tables; both end up as the same path.
fn flatten_folded(prefix: &str, table: Map<String, Value>, out: &mut BTreeMap<String, Value>) {
    for (key, value) in table {
        let folded = key.split('.').map(fold_key).collect::<Vec<_>>().join(".");
        let path = if prefix.is_empty() {
            folded
        } else {
            format!("{prefix}.{folded}")
        };
        match value.kind {
            ValueKind::Table(inner) => flatten_folded(&path, inner, out),
            kind => {
                out.insert(path, Value::new(None, kind));
            }
        }
    }
}

fn unflatten(flat: BTreeMap<String, Value>) -> Map<String, Value> {
    let mut root = Map::new();
    for (path, value) in flat {
        let segments: Vec<&str> = path.split('.').collect();
        insert_path(&mut root, &segments, value);
    }
    root
}

fn insert_path(table: &mut Map<String, Value>, segments: &[&str], value: Value) {
    match segments {
        [] => {}
        [last] => {
            table.insert((*last).to_string(), value);
        }
        [first, rest @ ..] => {
            let entry = table
                .entry((*first).to_string())
                .or_insert_with(|| Value::new(None, ValueKind::Table(Map::new())));
            if !matches!(entry.kind, ValueKind::Table(_)) {
                entry.kind = ValueKind::Table(Map::new());
            }
            if let ValueKind::Table(inner) = &mut entry.kind {
                insert_path(inner, rest, value);
            }
        }
    }
}
