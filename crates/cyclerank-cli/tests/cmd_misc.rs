//! Integration tests for `cyclerank demo`, `version`, help and timeouts.
#![allow(clippy::expect_used)]

use std::path::PathBuf;
use std::process::Command;

fn cyclerank_bin() -> PathBuf {
    let mut path = std::env::current_exe().expect("current exe");
    path.pop();
    if path.ends_with("deps") {
        path.pop();
    }
    path.push("cyclerank");
    path
}

fn fixture(name: &str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("../../tests/fixtures");
    path.push(name);
    path
}

#[test]
fn demo_prints_example_scores() {
    let out = Command::new(cyclerank_bin())
        .args(["demo", "--no-color"])
        .output()
        .expect("run cyclerank demo");
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("1  4.083333"), "stdout: {stdout}");
    assert!(stdout.contains("5  1.500000"), "stdout: {stdout}");
}

#[test]
fn demo_matches_fixture() {
    let demo = Command::new(cyclerank_bin())
        .args(["demo", "-f", "json"])
        .output()
        .expect("run cyclerank demo");
    let path = fixture("k4-pendant.json");
    let ratio = Command::new(cyclerank_bin())
        .args(["ratio", path.to_str().expect("path"), "-f", "json"])
        .output()
        .expect("run cyclerank ratio");
    assert!(demo.status.success() && ratio.status.success());
    assert_eq!(demo.stdout, ratio.stdout);
}

#[test]
fn version_prints_semver() {
    let out = Command::new(cyclerank_bin())
        .arg("version")
        .output()
        .expect("run cyclerank version");
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert_eq!(stdout.trim().split('.').count(), 3, "stdout: {stdout}");
}

#[test]
fn help_lists_subcommands() {
    let out = Command::new(cyclerank_bin())
        .arg("--help")
        .output()
        .expect("run cyclerank --help");
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    for name in ["ratio", "cycles", "inspect", "report", "demo"] {
        assert!(stdout.contains(name), "help should mention {name}");
    }
}

#[test]
fn quiet_and_verbose_conflict() {
    let out = Command::new(cyclerank_bin())
        .args(["-q", "-v", "demo"])
        .output()
        .expect("run cyclerank");
    assert_eq!(out.status.code(), Some(2));
}

#[test]
fn verbose_logs_to_stderr_only() {
    let path = fixture("square.json");
    let out = Command::new(cyclerank_bin())
        .args(["ratio", path.to_str().expect("path"), "-f", "json", "-v"])
        .env_remove("RUST_LOG")
        .output()
        .expect("run cyclerank");
    assert!(out.status.success());
    serde_json::from_slice::<serde_json::Value>(&out.stdout).expect("stdout stays JSON");
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("cycle search finished"), "stderr: {stderr}");
}

#[test]
fn generous_timeout_completes() {
    let path = fixture("bridged-triangles.json");
    let out = Command::new(cyclerank_bin())
        .args(["ratio", path.to_str().expect("path"), "--timeout-ms", "60000"])
        .output()
        .expect("run cyclerank");
    assert!(out.status.success());
}
