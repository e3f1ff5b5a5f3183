// acbuild: Aliucord Build Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Options that are not about what to build.
//!
//! ```text
//! --config FILE     ← JSON config (default config.json)
//! --log-level N     ← Console verbosity (0-6)
//! --log-file FILE   ← Also log to FILE
//! ```

use clap::Args;
use std::path::PathBuf;

/// Default configuration file, relative to the current directory.
pub const DEFAULT_CONFIG: &str = "config.json";

/// Global options.
#[derive(Debug, Clone, Args)]
pub struct GlobalOptions {
    /// Path to the JSON configuration file.
    #[arg(long = "config", value_name = "FILE", default_value = DEFAULT_CONFIG)]
    pub config: PathBuf,

    /// Console log level (0=silent, 1=errors, 2=warnings, 3=info, 4=debug, 5=trace, 6=dump).
    #[arg(short = 'l', long = "log-level", value_name = "LEVEL", value_parser = clap::value_parser!(u8).range(0..=6)
    )]
    pub log_level: Option<u8>,

    /// Path to log file. The file records everything down to trace level.
    #[arg(long = "log-file", value_name = "FILE")]
    pub log_file: Option<PathBuf>,
}

impl Default for GlobalOptions {
    fn default() -> Self {
        Self {
            config: PathBuf::from(DEFAULT_CONFIG),
            log_level: None,
            log_file: None,
        }
    }
}
