// acbuild: Aliucord Build Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Output streaming and capture for piped processes.
//!
//! ```text
//! run_child()
//!   stdout/stderr reader tasks (only for piped streams)
//!   wait
//!   join readers --> ProcessOutput { exit_code, stdout }
//! ```

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Child;
use tokio::task::JoinHandle;
use tracing::{trace, warn};

use super::builder::{ProcessBuilder, ProcessOutput, StreamFlags};
use crate::error::Result;

fn wants_reader(flags: StreamFlags) -> bool {
    flags.intersects(StreamFlags::FORWARD_TO_LOG | StreamFlags::KEEP_IN_STRING)
}

fn spawn_reader<R>(
    stream: Option<R>,
    flags: StreamFlags,
    process_name: &str,
    stream_name: &'static str,
) -> Option<JoinHandle<String>>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    if !wants_reader(flags) {
        return None;
    }
    let process_name = process_name.to_string();
    stream.map(|stream| {
        tokio::spawn(async move { read_stream(stream, flags, &process_name, stream_name).await })
    })
}

async fn join_reader(handle: Option<JoinHandle<String>>) -> String {
    match handle {
        Some(handle) => handle.await.unwrap_or_else(|e| {
            warn!(error = %e, "output reader task failed");
            String::new()
        }),
        None => String::new(),
    }
}

impl ProcessBuilder {
    /// Streams the child's piped output and waits for it to exit.
    pub(super) async fn run_child(&self, name: &str, child: &mut Child) -> Result<ProcessOutput> {
        let stdout_handle = spawn_reader(child.stdout.take(), self.stdout_stream(), name, "stdout");
        let stderr_handle = spawn_reader(child.stderr.take(), self.stderr_stream(), name, "stderr");

        let status = child
            .wait()
            .await
            .with_context(|| format!("failed waiting for process {name}"))?;

        let stdout = join_reader(stdout_handle).await;
        // stderr is only ever forwarded to the log, never returned
        let _ = join_reader(stderr_handle).await;

        Ok(ProcessOutput::new(status.code().unwrap_or(-1), stdout))
    }
}

async fn read_stream<R>(
    reader: R,
    flags: StreamFlags,
    process_name: &str,
    stream_name: &str,
) -> String
where
    R: AsyncRead + Unpin,
{
    let mut lines = BufReader::new(reader).lines();
    let mut kept = String::new();

    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                if flags.contains(StreamFlags::FORWARD_TO_LOG) {
                    trace!(process = %process_name, stream = %stream_name, line = %line, "output");
                }
                if flags.contains(StreamFlags::KEEP_IN_STRING) {
                    if !kept.is_empty() {
                        kept.push('\n');
                    }
                    kept.push_str(&line);
                }
            }
            Ok(None) => break,
            Err(e) => {
                warn!(
                    process = %process_name,
                    stream = %stream_name,
                    error = %e,
                    "error reading stream"
                );
                break;
            }
        }
    }

    kept
}
