//! Integration tests for `cyclerank inspect`.
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

fn inspect_json(name: &str) -> serde_json::Value {
    let path = fixture(name);
    let out = Command::new(cyclerank_bin())
        .args(["inspect", path.to_str().expect("path"), "--format", "json"])
        .output()
        .expect("run cyclerank inspect");
    assert!(out.status.success(), "exit code: {:?}", out.status.code());
    serde_json::from_slice(&out.stdout).expect("stdout should be JSON")
}

#[test]
fn inspect_tree_json() {
    let doc = inspect_json("tree.json");
    assert_eq!(doc["node_count"], 5);
    assert_eq!(doc["edge_count"], 3);
    assert_eq!(doc["isolated_count"], 1);
    assert_eq!(doc["acyclic_count"], 5);
    assert_eq!(doc["num_smallest_cycles"], 0);
    assert_eq!(doc["core_counts"]["0"], 1);
    assert_eq!(doc["core_counts"]["1"], 4);
}

#[test]
fn inspect_k4_pendant_json() {
    let doc = inspect_json("k4-pendant.json");
    assert_eq!(doc["node_count"], 5);
    assert_eq!(doc["edge_count"], 8);
    assert_eq!(doc["girth_counts"]["3"], 5);
    assert_eq!(doc["length_histogram"]["3"], 5);
    assert_eq!(doc["stats"]["triangles"], 5);
    assert_eq!(doc["stats"]["probed_edges"], 0);
}

#[test]
fn inspect_square_reports_probes() {
    let doc = inspect_json("square.json");
    assert_eq!(doc["stats"]["unresolved_after_triangles"], 4);
    assert_eq!(doc["stats"]["probed_edges"], 4);
    assert_eq!(doc["girth_counts"]["4"], 4);
}

#[test]
fn inspect_human_mode() {
    let path = fixture("two-triangles.json");
    let out = Command::new(cyclerank_bin())
        .args(["inspect", path.to_str().expect("path"), "--no-color"])
        .output()
        .expect("run cyclerank inspect");
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("nodes:       6"), "stdout: {stdout}");
    assert!(stdout.contains("length 3: 2"), "stdout: {stdout}");
}
