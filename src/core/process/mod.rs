// acbuild: Aliucord Build Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Async process spawning.
//!
//! ```text
//! ProcessBuilder::new("d8")
//!   .arg() .cwd() .capture_stdout() .quiet()
//!   .run()
//!       --> tokio::process::Command
//!           inherit or pipe stdout/stderr
//!       --> ProcessOutput { exit_code, stdout }
//! ```

pub mod builder;
mod io;
mod runner;
#[cfg(test)]
mod tests;
