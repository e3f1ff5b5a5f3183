// acbuild: Aliucord Build Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point.
//!
//! ```text
//! cli::parse() --> Logging --> Config --> cmd::build
//! ```

use std::process::ExitCode;
use std::sync::Arc;

use acbuild::cli::{self, Cli};
use acbuild::cli::global::GlobalOptions;
use acbuild::cmd::build::run_build_command;
use acbuild::config::Config;
use acbuild::logging::{LogConfig, LogLevel, init_logging};
use console::style;

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

/// Prefix for configuration environment overrides.
const ENV_PREFIX: &str = "ACBUILD";

#[tokio::main]
async fn main() -> ExitCode {
    let cli = cli::parse();

    let log_config = build_log_config(&cli.global);
    let _log_guard = match init_logging(&log_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            return ExitCode::FAILURE;
        }
    };

    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(error = ?e, "build failed");
            eprintln!("{}", style(format!("Error: {e:#}")).red().bold());
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: &Cli) -> acbuild::error::Result<()> {
    let config = Config::builder()
        .add_json_file(&cli.global.config)
        .with_env_prefix(ENV_PREFIX)
        .build()?;
    run_build_command(&cli.build, Arc::new(config)).await
}

fn build_log_config(global: &GlobalOptions) -> LogConfig {
    let console_level = global
        .log_level
        .and_then(LogLevel::from_u8)
        .unwrap_or(LogLevel::INFO);

    LogConfig::builder()
        .with_console_level(console_level)
        .maybe_with_log_file(global.log_file.as_ref().map(|p| p.display().to_string()))
        .build()
}
