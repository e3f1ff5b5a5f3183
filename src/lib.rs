// acbuild: Aliucord Build Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Library root.
//!
//! # Crate Architecture
//!
//! ```text
//!                        main.rs
//!                           |
//!                +----------+----------+
//!                v                     v
//!             cli (clap)          cmd::build
//!                |         check tools, lock, dispatch
//!                +----------+----------+
//!                           v
//!              ,---------------------------,
//!              |          config           |
//!              |   JSON + ACBUILD_* env    |
//!              '-------------+-------------'
//!                            |
//!                            v
//!                     task::manager
//!                            |
//!          +-----------------+-----------------+
//!          v                 v                 v
//!       tasks            discovery           tools
//!    core/plugin      settings.gradle   gradle/d8/aapt2
//!                                           packer
//!
//!   +-----------------------------------------+
//!   |  core       process runner              |
//!   +-----------------------------------------+
//!   |  foundation   error, logging, utility   |
//!   +-----------------------------------------+
//! ```

pub mod cli;
pub mod cmd;
pub mod config;
pub mod core;
pub mod error;
pub mod logging;
pub mod task;
pub mod utility;
