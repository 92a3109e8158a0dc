//! Binary-level tests: exit codes, printed output and a real startup.

use std::io::{BufRead, BufReader};
use std::process::{Command, Stdio};
use std::time::Duration;

use assert_cmd::prelude::*;

mod common;

fn pixano() -> Command {
    let mut cmd = Command::cargo_bin("pixano").unwrap();
    cmd.env_remove("PORT")
        .env_remove("PIXANO_CONFIG")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_version_prints_package_version() {
    let output = pixano().arg("--version").output().unwrap();
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim(),
        env!("CARGO_PKG_VERSION")
    );
}

#[test]
fn test_help_wins_over_other_arguments() {
    let output = pixano()
        .args(["-d", "--help", "one", "two"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Usage"));
    assert!(stdout.contains("--version"));
}

#[test]
fn test_two_workspaces_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let a = dir.path().join("a");
    let b = dir.path().join("b");

    let output = pixano().arg(&a).arg(&b).output().unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("at maximum"));
    // Rejected before anything touched the filesystem.
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn test_unknown_flag_rejected() {
    let output = pixano().arg("--verbose").output().unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(!output.stderr.is_empty());
}

#[test]
fn test_missing_workspace_prints_usage() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing");

    let output = pixano().arg(&missing).output().unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("valid path for workspace"));
    assert!(String::from_utf8_lossy(&output.stdout).contains("Usage"));
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn test_bad_port_env_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let output = pixano().arg(dir.path()).env("PORT", "abc").output().unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("PORT"));
}

#[tokio::test]
async fn test_serves_and_reports_local_url() {
    let workspace = tempfile::tempdir().unwrap();
    let port = common::free_port();

    let mut child = pixano()
        .arg(workspace.path())
        .env("PORT", port.to_string())
        .current_dir(workspace.path())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .unwrap();

    let stdout = child.stdout.take().unwrap();
    let expected = format!("http://localhost:{}", port);
    let found = {
        let expected = expected.clone();
        tokio::task::spawn_blocking(move || {
            BufReader::new(stdout)
                .lines()
                .map_while(Result::ok)
                .any(|line| line.contains(&expected))
        })
    };

    let found = tokio::time::timeout(Duration::from_secs(20), found).await;
    let status = match found {
        Ok(Ok(true)) => common::client()
            .get(format!("http://127.0.0.1:{}/api/v1/status", port))
            .send()
            .await
            .map(|res| res.status().as_u16())
            .ok(),
        _ => None,
    };

    let _ = child.kill();
    let _ = child.wait();

    assert!(matches!(found, Ok(Ok(true))), "readiness report missing {}", expected);
    assert_eq!(status, Some(200));
}
