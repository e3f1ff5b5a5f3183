// acbuild: Aliucord Build Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::builder::ProcessBuilder;
use crate::error::ProcessError;

#[cfg(unix)]
#[tokio::test]
async fn test_process_echo_capture() {
    let output = ProcessBuilder::new("echo")
        .arg("hello")
        .capture_stdout()
        .run()
        .await
        .expect("echo should succeed");

    assert!(output.success());
    insta::assert_snapshot!(output.stdout(), @"hello");
}

#[cfg(unix)]
#[tokio::test]
async fn test_process_multiline_capture_joined() {
    let output = ProcessBuilder::new("sh")
        .args(["-c", "printf 'a\\nb\\n'"])
        .capture_stdout()
        .run()
        .await
        .expect("sh should succeed");

    assert_eq!(output.stdout(), "a\nb");
}

#[cfg(unix)]
#[tokio::test]
async fn test_process_nonzero_exit_is_error() {
    let err = ProcessBuilder::new("sh")
        .args(["-c", "exit 42"])
        .name("failing")
        .quiet()
        .run()
        .await
        .expect_err("exit 42 should fail");

    let root = err
        .downcast_ref::<ProcessError>()
        .expect("root cause should be a ProcessError");
    insta::assert_snapshot!(root.to_string(), @"process 'failing' exited with code 42");
}

#[tokio::test]
async fn test_process_spawn_failure() {
    let err = ProcessBuilder::new("nonexistent_program_12345")
        .quiet()
        .run()
        .await
        .expect_err("spawn should fail");

    assert!(matches!(
        err.downcast_ref::<ProcessError>(),
        Some(ProcessError::SpawnFailed { .. })
    ));
}

#[cfg(unix)]
#[tokio::test]
async fn test_process_cwd_honored() {
    let dir = tempfile::tempdir().expect("tempdir");
    let output = ProcessBuilder::new("pwd")
        .cwd(dir.path())
        .capture_stdout()
        .run()
        .await
        .expect("pwd should succeed");

    let reported = std::fs::canonicalize(output.stdout()).expect("canonical pwd");
    let expected = std::fs::canonicalize(dir.path()).expect("canonical tempdir");
    assert_eq!(reported, expected);
}

#[cfg(unix)]
#[tokio::test]
async fn test_process_quiet_stdout_is_empty() {
    let output = ProcessBuilder::new("echo")
        .arg("hidden")
        .quiet()
        .run()
        .await
        .expect("echo should succeed");

    assert_eq!(output.stdout(), "");
}

#[test]
fn test_command_line_quotes_spaces() {
    let builder = ProcessBuilder::new("d8")
        .arg("--output")
        .arg("my dir/out");
    insta::assert_snapshot!(builder.command_line(), @r#"d8 --output "my dir/out""#);
}

#[test]
fn test_display_name() {
    assert_eq!(ProcessBuilder::new("/opt/sdk/d8").display_name(), "d8");
    assert_eq!(
        ProcessBuilder::new("/opt/sdk/d8").name("dex").display_name(),
        "dex"
    );
}

#[test]
fn test_executable_lookup_not_found() {
    let program = "nonexistent_program_12345";

    assert!(ProcessBuilder::find(program).is_none());
}

#[cfg(unix)]
#[test]
fn test_executable_lookup_found() {
    let path = ProcessBuilder::find("sh").expect("sh should be on PATH");
    assert!(path.exists());
    // second lookup is served from the cache
    assert_eq!(ProcessBuilder::find("sh"), Some(path));
}
