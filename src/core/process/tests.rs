// cactus-rs: Multi-Checkout Git Tooling for Maven Trees
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::builder::{ProcessBuilder, ProcessFlags};
use crate::error::ProcessError;
use crate::test_utils::temp_dir;

#[tokio::test]
async fn test_process_echo() {
    let output = ProcessBuilder::new("echo")
        .arg("hello")
        .flag(ProcessFlags::KEEP_OUTPUT)
        .run()
        .await
        .expect("echo should succeed");

    assert!(output.success());
    insta::assert_snapshot!(output.stdout(), @"hello");
}

#[tokio::test]
async fn test_process_output_not_kept_by_default() {
    let output = ProcessBuilder::new("echo").arg("hello").run().await.unwrap();
    assert_eq!(output.stdout(), "");
}

#[tokio::test]
async fn test_process_allowed_failure() {
    let output = ProcessBuilder::raw("exit 42")
        .flag(ProcessFlags::ALLOW_FAILURE)
        .run()
        .await
        .expect("process should complete");

    assert_eq!(output.exit_code(), 42);
    assert!(!output.success());
}

#[tokio::test]
async fn test_process_non_zero_exit_is_error() {
    let err = ProcessBuilder::raw("exit 3").run().await.unwrap_err();
    match err.downcast_ref::<ProcessError>() {
        Some(ProcessError::NonZeroExit { code, .. }) => assert_eq!(*code, 3),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_process_env_and_cwd() {
    let temp = temp_dir();
    std::fs::write(temp.path().join("marker.txt"), "").unwrap();

    let output = ProcessBuilder::raw("echo $CACTUS_TEST_VAR; ls")
        .env("CACTUS_TEST_VAR", "test_value")
        .cwd(temp.path())
        .flag(ProcessFlags::KEEP_OUTPUT)
        .run()
        .await
        .unwrap();

    insta::assert_snapshot!(output.stdout(), @r"
    test_value
    marker.txt
    ");
}

#[tokio::test]
async fn test_process_stderr_kept_separately() {
    let output = ProcessBuilder::raw("echo out; echo err 1>&2")
        .flag(ProcessFlags::KEEP_OUTPUT)
        .run()
        .await
        .unwrap();
    assert_eq!(output.stdout(), "out");
    assert_eq!(output.stderr(), "err");
}

#[tokio::test]
async fn test_process_spawn_failure() {
    let err = ProcessBuilder::new("/nonexistent/cactus-tool")
        .run()
        .await
        .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ProcessError>(),
        Some(ProcessError::SpawnFailed { .. })
    ));
}

#[test]
fn test_executable_lookup_found() {
    let builder = ProcessBuilder::which("sh").expect("sh should be on PATH");
    assert!(builder.program().exists());
    assert_eq!(ProcessBuilder::find("sh").as_ref(), Some(builder.program()));
}

#[test]
fn test_executable_lookup_not_found() {
    let program = "nonexistent_program_12345";
    let err = ProcessBuilder::which(program).unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"executable not found: 'nonexistent_program_12345' (not in PATH)");
    assert!(ProcessBuilder::find(program).is_none());
}

#[test]
fn test_command_line_quotes_spaces() {
    let builder = ProcessBuilder::new("/usr/bin/lexakai")
        .arg("-output-folder=/tmp/out")
        .arg("/path with space");
    assert_eq!(
        builder.command_line(),
        "/usr/bin/lexakai -output-folder=/tmp/out \"/path with space\""
    );
}
