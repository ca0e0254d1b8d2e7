//! Integration tests for the `infragraph` binary: layout, cycles, impact,
//! and direction subcommands end to end.
#![allow(clippy::expect_used)]

use std::io::Write as _;
use std::path::PathBuf;
use std::process::Command;

/// Path to the compiled `infragraph` binary.
fn infragraph_bin() -> PathBuf {
    let mut path = std::env::current_exe().expect("current exe");
    path.pop();
    if path.ends_with("deps") {
        path.pop();
    }
    path.push("infragraph");
    path
}

/// Writes a graph document to a temp file and returns its handle.
fn graph_file(json: &str) -> tempfile::NamedTempFile {
    let mut f = tempfile::NamedTempFile::new().expect("tempfile");
    f.write_all(json.as_bytes()).expect("write fixture");
    f
}

/// An acyclic three-tier deployment: the cluster depends on the vpc, api
/// and web on the cluster. Edge direction reads "target depends on source".
const DEPLOYMENT: &str = r#"{
  "nodes": [
    {"id": "vpc", "name": "main VPC", "kind": "terraform_resource"},
    {"id": "cluster", "name": "EKS cluster", "kind": "terraform_module"},
    {"id": "api", "name": "api service", "kind": "helm_release"},
    {"id": "web", "name": "web frontend", "kind": "helm_release"}
  ],
  "edges": [
    {"id": "e-vc", "kind": "depends_on", "source": "vpc", "target": "cluster"},
    {"id": "e-ca", "kind": "depends_on", "source": "cluster", "target": "api"},
    {"id": "e-cw", "kind": "depends_on", "source": "cluster", "target": "web"}
  ]
}"#;

const CYCLIC: &str = r#"{
  "nodes": [
    {"id": "a", "name": "a", "kind": "terraform_resource"},
    {"id": "b", "name": "b", "kind": "terraform_resource"}
  ],
  "edges": [
    {"id": "e-ab", "kind": "depends_on", "source": "a", "target": "b"},
    {"id": "e-ba", "kind": "depends_on", "source": "b", "target": "a"}
  ]
}"#;

// ---------------------------------------------------------------------------
// layout
// ---------------------------------------------------------------------------

#[test]
fn layout_places_every_node_and_exits_0() {
    let f = graph_file(DEPLOYMENT);
    let out = Command::new(infragraph_bin())
        .args(["layout", f.path().to_str().expect("path")])
        .output()
        .expect("run infragraph layout");

    assert!(out.status.success(), "exit code: {:?}", out.status.code());
    let stdout = String::from_utf8_lossy(&out.stdout);
    for id in ["vpc", "cluster", "api", "web"] {
        assert!(stdout.contains(id), "{id} should be placed: {stdout}");
    }
    assert!(stdout.contains("size "), "size line expected: {stdout}");
}

#[test]
fn layout_json_mode_emits_structured_output() {
    let f = graph_file(DEPLOYMENT);
    let out = Command::new(infragraph_bin())
        .args([
            "layout",
            f.path().to_str().expect("path"),
            "--format",
            "json",
        ])
        .output()
        .expect("run infragraph layout");

    assert!(out.status.success());
    let value: serde_json::Value =
        serde_json::from_slice(&out.stdout).expect("stdout must be JSON");
    assert_eq!(value["nodes"].as_array().expect("nodes").len(), 4);
    assert_eq!(value["edges"].as_array().expect("edges").len(), 3);
    assert!(value["width"].as_f64().expect("width") >= 0.0);
}

#[test]
fn layout_rejects_malformed_input_with_exit_2() {
    let f = graph_file("{not json");
    let out = Command::new(infragraph_bin())
        .args(["layout", f.path().to_str().expect("path")])
        .output()
        .expect("run infragraph layout");
    assert_eq!(out.status.code(), Some(2));
}

#[test]
fn layout_missing_file_exits_2() {
    let out = Command::new(infragraph_bin())
        .args(["layout", "/nonexistent/graph.json"])
        .output()
        .expect("run infragraph layout");
    assert_eq!(out.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("not found"), "stderr: {stderr}");
}

// ---------------------------------------------------------------------------
// cycles
// ---------------------------------------------------------------------------

#[test]
fn cycles_clean_graph_exits_0() {
    let f = graph_file(DEPLOYMENT);
    let out = Command::new(infragraph_bin())
        .args(["cycles", f.path().to_str().expect("path")])
        .output()
        .expect("run infragraph cycles");
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("no cycles"), "stdout: {stdout}");
}

#[test]
fn cycles_cyclic_graph_exits_1_and_prints_members() {
    let f = graph_file(CYCLIC);
    let out = Command::new(infragraph_bin())
        .args(["cycles", f.path().to_str().expect("path")])
        .output()
        .expect("run infragraph cycles");

    assert_eq!(out.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains('a') && stdout.contains('b'), "stdout: {stdout}");
}

#[test]
fn cycles_json_mode_reports_count() {
    let f = graph_file(CYCLIC);
    let out = Command::new(infragraph_bin())
        .args([
            "cycles",
            f.path().to_str().expect("path"),
            "--format",
            "json",
        ])
        .output()
        .expect("run infragraph cycles");

    assert_eq!(out.status.code(), Some(1));
    let value: serde_json::Value =
        serde_json::from_slice(&out.stdout).expect("stdout must be JSON");
    assert_eq!(value["count"], 1);
}

// ---------------------------------------------------------------------------
// impact
// ---------------------------------------------------------------------------

#[test]
fn impact_of_vpc_reports_all_dependents() {
    let f = graph_file(DEPLOYMENT);
    let out = Command::new(infragraph_bin())
        .args([
            "impact",
            f.path().to_str().expect("path"),
            "vpc",
            "--format",
            "json",
        ])
        .output()
        .expect("run infragraph impact");

    assert!(out.status.success());
    let value: serde_json::Value =
        serde_json::from_slice(&out.stdout).expect("stdout must be JSON");
    let result = &value["result"];
    assert_eq!(result["direct_dependent_count"], 1);
    assert_eq!(result["transitive_dependent_count"], 2);
    assert_eq!(result["severity"], "critical");
}

#[test]
fn impact_depth_cap_limits_reach() {
    let f = graph_file(DEPLOYMENT);
    let out = Command::new(infragraph_bin())
        .args([
            "impact",
            f.path().to_str().expect("path"),
            "vpc",
            "--depth",
            "1",
            "--format",
            "json",
        ])
        .output()
        .expect("run infragraph impact");

    assert!(out.status.success());
    let value: serde_json::Value =
        serde_json::from_slice(&out.stdout).expect("stdout must be JSON");
    assert_eq!(value["result"]["transitive_dependent_count"], 0);
}

#[test]
fn impact_unknown_node_exits_1() {
    let f = graph_file(DEPLOYMENT);
    let out = Command::new(infragraph_bin())
        .args(["impact", f.path().to_str().expect("path"), "ghost"])
        .output()
        .expect("run infragraph impact");

    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("ghost"), "stderr: {stderr}");
}

// ---------------------------------------------------------------------------
// direction
// ---------------------------------------------------------------------------

/// One vpc fanning out into two releases favors the vertical default.
#[test]
fn direction_fan_out_suggests_top_to_bottom() {
    let f = graph_file(DEPLOYMENT);
    let out = Command::new(infragraph_bin())
        .args(["direction", f.path().to_str().expect("path")])
        .output()
        .expect("run infragraph direction");

    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert_eq!(stdout.trim(), "top_to_bottom");
}

// ---------------------------------------------------------------------------
// version
// ---------------------------------------------------------------------------

#[test]
fn version_prints_semver() {
    let out = Command::new(infragraph_bin())
        .args(["version"])
        .output()
        .expect("run infragraph version");
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert_eq!(stdout.trim().split('.').count(), 3);
}
