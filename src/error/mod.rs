// acbuild: Aliucord Build Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//! anyhow::Error  (Result<T>)
//!   root cause, one of:
//!   Config   LoadError, MissingKey, InvalidValue
//!   Process  SpawnFailed, NonZeroExit
//!   Fs       NotFound, Locked, IoError
//!   Archive  Zip, OutsideRoot, MissingClasses
//!   Build    ToolMissing, PluginNotFound, MissingWrapper, MissingDexOutput,
//!            InvalidArguments
//! ```
//!
//! Components return `anyhow::Result` with one of these as the root cause;
//! only `main` decides the exit code. Callers that care about the kind
//! downcast, e.g. `err.downcast_ref::<FsError>()`.

use thiserror::Error;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

// --- Config Errors ---

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read or parse the configuration sources.
    #[error("failed to load config '{path}': {message}")]
    LoadError { path: String, message: String },

    /// Missing required configuration key.
    #[error("missing required config key '{key}'")]
    MissingKey { key: String },

    /// Invalid configuration value.
    #[error("invalid value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

// --- Process Errors ---

/// Process execution errors.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// Failed to spawn process.
    #[error("failed to spawn process '{command}': {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Process exited with non-zero status.
    #[error("process '{command}' exited with code {code}")]
    NonZeroExit { command: String, code: i32 },
}

// --- Filesystem Errors ---

/// Filesystem operation errors.
#[derive(Debug, Error)]
pub enum FsError {
    /// Path not found.
    #[error("path not found: {0}")]
    NotFound(String),

    /// Another process holds the output directory lock.
    #[error("output directory is locked by another build: {0}")]
    Locked(String),

    /// General I/O error.
    #[error("I/O error on '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl FsError {
    /// Wraps an I/O error with the path it happened on.
    pub fn io(path: impl AsRef<std::path::Path>, source: std::io::Error) -> Self {
        Self::IoError {
            path: path.as_ref().display().to_string(),
            source,
        }
    }
}

// --- Archive Errors ---

/// Zip archive errors.
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// Error from the zip library.
    #[error("zip error on '{path}': {source}")]
    Zip {
        path: String,
        #[source]
        source: zip::result::ZipError,
    },

    /// A walked file does not live under the classes root.
    #[error("'{path}' is not under classes root '{root}'")]
    OutsideRoot { path: String, root: String },

    /// The compiled classes directory is missing.
    #[error("compiled classes not found: {0}")]
    MissingClasses(String),
}

// --- Build Errors ---

/// Build pipeline errors.
#[derive(Debug, Error)]
pub enum BuildError {
    /// A required external tool could not be invoked.
    #[error("{tool} not found. {hint}")]
    ToolMissing { tool: String, hint: String },

    /// The named plugin has no project directory.
    #[error("plugin '{name}' not found at {path}")]
    PluginNotFound { name: String, path: String },

    /// The project has no Gradle wrapper script.
    #[error("gradle wrapper not found: {0}")]
    MissingWrapper(String),

    /// The dexer succeeded but left no output behind.
    #[error("d8 produced no output at {0}")]
    MissingDexOutput(String),

    /// Conflicting command-line options.
    #[error("invalid arguments: {0}")]
    InvalidArguments(String),
}
