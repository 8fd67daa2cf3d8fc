//! Integration tests against real subprocesses, driven through /bin/sh.

#![cfg(unix)]

use malt_core::config::RunnerConfig;
use malt_core::error::RunnerError;
use malt_core::runner::{spawn_command, BrewInvocation, CommandStream, OutputStream};

fn sh(script: &str) -> BrewInvocation {
    BrewInvocation::new("/bin/sh", ["-c", script])
}

#[tokio::test]
async fn delivers_every_line_once_in_per_stream_order() {
    let (mut handle, _cancel) = spawn_command(
        sh(r#"printf 'a\nb\nc\n'; printf 'x\ny\n' >&2"#),
        &RunnerConfig::default(),
    )
    .unwrap();

    let mut stdout = Vec::new();
    let mut stderr = Vec::new();
    while let Some(line) = handle.next_line().await {
        match line.stream {
            OutputStream::Stdout => stdout.push(line.text),
            OutputStream::Stderr => stderr.push(line.text),
        }
    }

    assert_eq!(stdout, vec!["a", "b", "c"]);
    assert_eq!(stderr, vec!["x", "y"]);

    let outcome = handle.wait().await.unwrap();
    assert_eq!(outcome.exit_code, 0);
    assert!(outcome.success());
    assert_eq!(outcome.stdout_tail, vec!["a", "b", "c"]);
    assert_eq!(outcome.stderr_tail, vec!["x", "y"]);
}

#[tokio::test]
async fn delivers_trailing_partial_line() {
    let (mut handle, _cancel) =
        spawn_command(sh(r#"printf 'no newline'"#), &RunnerConfig::default()).unwrap();

    let line = handle.next_line().await.expect("expected one line");
    assert_eq!(line.text, "no newline");
    assert!(handle.next_line().await.is_none());

    handle.wait().await.unwrap();
}

#[tokio::test]
async fn reports_nonzero_exit_code_after_stream_exhaustion() {
    let (mut handle, _cancel) =
        spawn_command(sh("echo out; exit 3"), &RunnerConfig::default()).unwrap();

    while handle.next_line().await.is_some() {}
    let outcome = handle.wait().await.unwrap();
    assert_eq!(outcome.exit_code, 3);
    assert!(!outcome.success());
}

#[tokio::test]
async fn spawn_failure_is_immediate_and_fatal() {
    let err = spawn_command(
        BrewInvocation::new("/nonexistent/definitely-not-brew", ["upgrade"]),
        &RunnerConfig::default(),
    )
    .err()
    .expect("spawn must fail");

    assert!(matches!(err, RunnerError::Spawn(_)));
}

#[tokio::test]
async fn cancel_kills_the_child_and_ends_the_stream() {
    // exec so the kill signal reaches the process holding the pipes.
    let (mut handle, cancel) = spawn_command(
        sh("echo started; exec sleep 30"),
        &RunnerConfig::default(),
    )
    .unwrap();

    // First line proves the child is up before we cancel it.
    let first = handle.next_line().await.unwrap();
    assert_eq!(first.text, "started");

    cancel.cancel("user asked to stop").await;

    // The stream must drain to EOF instead of blocking on the sleep.
    while handle.next_line().await.is_some() {}

    let outcome = handle.wait().await.unwrap();
    assert_eq!(outcome.cancelled.as_deref(), Some("user asked to stop"));
    assert!(!outcome.success());
}

#[tokio::test]
async fn tail_capture_is_bounded() {
    let cfg = RunnerConfig {
        capture_lines: 2,
        ..RunnerConfig::default()
    };
    let (mut handle, _cancel) =
        spawn_command(sh(r#"printf '1\n2\n3\n4\n'"#), &cfg).unwrap();

    while handle.next_line().await.is_some() {}
    let outcome = handle.wait().await.unwrap();
    assert_eq!(outcome.stdout_tail, vec!["3", "4"]);
}
