// acbuild: Aliucord Build Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module for acbuild using clap derive.
//!
//! # Usage
//!
//! ```text
//! acbuild [--config FILE] [-p NAME|'*'] [-o NAME] [--gradle-projects]
//!         [-l LEVEL] [--log-file FILE]
//! ```
//!
//! Single-dash long flags (`-config`, `-plugin`, `-output`) are rewritten to
//! their double-dash form by [`normalize_args`] before clap sees them.

pub mod build;
pub mod global;


use std::ffi::OsString;

use crate::cli::build::BuildArgs;
use crate::cli::global::GlobalOptions;
use clap::Parser;

/// Long flags also accepted with a single dash.
pub const SINGLE_DASH_FLAGS: &[&str] = &["config", "plugin", "output"];

/// Aliucord Build Tool
///
/// Builds the Aliucord core dex or plugin archives.
#[derive(Debug, Parser)]
#[command(
    name = "acbuild",
    author,
    version,
    about = "Aliucord Build Tool",
    long_about = "acbuild Copyright (C) 2026 Romeo Ahmed\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  Builds Aliucord.dex when run without arguments. Use\n\
                  `acbuild -p <plugin>` to build one plugin archive, or\n\
                  `acbuild -p '*'` to build every plugin in settings.gradle.",
    after_help = "CONFIG FILE:\n\n\
                  config.json holds the paths acbuild works with: aliucord,\n\
                  plugins, androidSDK, androidSDKVersion, outputs and\n\
                  outputsPlugins. Keys ignore case and underscores, so\n\
                  outputsPlugins and outputs_plugins are the same key. Any\n\
                  key can be overridden with an ACBUILD_ environment\n\
                  variable, e.g. ACBUILD_OUTPUTS_PLUGINS=/tmp/out."
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOptions,

    #[command(flatten)]
    pub build: BuildArgs,
}

/// Rewrites `-config`, `-plugin` and `-output` (and their `=value` forms)
/// to double-dash flags. Nothing after a bare `--` is touched.
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut passthrough = false;
    args.into_iter()
        .map(Into::into)
        .map(|arg| {
            if passthrough {
                return arg;
            }
            if arg == "--" {
                passthrough = true;
                return arg;
            }
            normalize_arg(arg)
        })
        .collect()
}

fn normalize_arg(arg: OsString) -> OsString {
    let Some(s) = arg.to_str() else {
        return arg;
    };
    let Some(rest) = s.strip_prefix('-') else {
        return arg;
    };
    if rest.starts_with('-') {
        return arg;
    }

    let name = rest.split_once('=').map_or(rest, |(name, _)| name);
    if SINGLE_DASH_FLAGS.contains(&name) {
        OsString::from(format!("-{s}"))
    } else {
        arg
    }
}

/// Parses the process arguments after normalization.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse_from(normalize_args(std::env::args_os()))
}

/// Tries to parse command-line arguments, returning an error on failure.
///
/// # Errors
///
/// Returns a `clap::Error` if the arguments are invalid or if help/version
/// information was requested.
pub fn try_parse_from<I, T>(iter: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    Cli::try_parse_from(normalize_args(iter))
}
