// acbuild: Aliucord Build Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command implementations.
//!
//! ```text
//! Cli --> cmd::build::run_build_command
//!           check tools, resolve target, lock output, run tasks
//! ```

pub mod build;
