//! E2E failure paths: cycles, dangling references, unreadable manifests and
//! broken config.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::path::Path;
use tempfile::TempDir;

const CYCLIC_MANIFEST: &str = r#"{
  "projects": [
    {"path": "A/A.csproj", "project_references": ["../B/B.csproj"]},
    {"path": "B/B.csproj", "project_references": ["../A/A.csproj"]},
    {"path": "C/C.csproj"}
  ]
}"#;

const DANGLING_MANIFEST: &str = r#"{
  "projects": [
    {"path": "Web/Web.csproj", "project_references": ["../Legacy/Legacy.csproj", "../Core/Core.csproj"]},
    {"path": "Core/Core.csproj"}
  ]
}"#;

fn slng_cmd(dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("slng"));
    cmd.current_dir(dir);
    cmd.env("SLNGRAPH_LOG", "error");
    cmd.env_remove("SLNGRAPH_FORMAT");
    cmd.env("XDG_CONFIG_HOME", dir.join(".user-config"));
    cmd
}

fn project_with(manifest: &str) -> TempDir {
    let dir = TempDir::new().expect("temp dir");
    std::fs::write(dir.path().join("slngraph.json"), manifest).expect("write manifest");
    dir
}

#[test]
fn order_fails_closed_on_cycle() {
    let dir = project_with(CYCLIC_MANIFEST);
    slng_cmd(dir.path())
        .args(["order", "--format", "text"])
        .assert()
        .failure()
        .stdout("")
        .stderr(predicate::str::contains("error[E2002]"))
        .stderr(predicate::str::contains("A → B → A"));
}

/// Run a failing command in json mode and parse stderr as exactly one JSON
/// document.
fn json_failure(dir: &Path, args: &[&str]) -> Value {
    let output = slng_cmd(dir)
        .args(args)
        .arg("--json")
        .env("RUST_BACKTRACE", "1")
        .output()
        .expect("slng should not crash");
    assert!(!output.status.success(), "{args:?} should fail");
    assert!(output.stdout.is_empty(), "{args:?} wrote to stdout");
    serde_json::from_slice(&output.stderr).unwrap_or_else(|err| {
        panic!(
            "stderr is not a single JSON document ({err}):\n{}",
            String::from_utf8_lossy(&output.stderr)
        )
    })
}

#[test]
fn groups_cycle_error_is_json_on_stderr() {
    let dir = project_with(CYCLIC_MANIFEST);
    let json = json_failure(dir.path(), &["groups"]);
    assert_eq!(json["error"]["error_code"], "E2002");
    assert_eq!(json["error"]["cycles"][0][0], "A");
}

#[test]
fn every_json_failure_is_a_single_document() {
    let cyclic = project_with(CYCLIC_MANIFEST);
    assert_eq!(
        json_failure(cyclic.path(), &["order"])["error"]["error_code"],
        "E2002"
    );

    let dangling = project_with(DANGLING_MANIFEST);
    assert_eq!(
        json_failure(dangling.path(), &["deps", "Nope"])["error"]["error_code"],
        "E2001"
    );

    let empty = TempDir::new().expect("temp dir");
    assert_eq!(
        json_failure(empty.path(), &["order"])["error"]["error_code"],
        "E1002"
    );

    let config = dangling.path().join("broken.toml");
    std::fs::write(&config, "[check\n").expect("write config");
    let config_arg = config.to_str().expect("utf-8 temp path");
    assert_eq!(
        json_failure(dangling.path(), &["order", "--config", config_arg])["error"]["error_code"],
        "E1001"
    );
}

#[test]
fn strict_check_json_failure_keeps_report_on_stdout() {
    let dir = project_with(DANGLING_MANIFEST);
    let output = slng_cmd(dir.path())
        .args(["check", "--strict", "--json"])
        .env("RUST_BACKTRACE", "1")
        .output()
        .expect("slng should not crash");
    assert!(!output.status.success());

    let report: Value = serde_json::from_slice(&output.stdout).expect("report on stdout");
    assert_eq!(report["ok"], false);
    let error: Value = serde_json::from_slice(&output.stderr).expect("one JSON error");
    assert_eq!(error["error"]["error_code"], "E2003");
}

#[test]
fn cycles_reports_without_failing() {
    let dir = project_with(CYCLIC_MANIFEST);
    let output = slng_cmd(dir.path())
        .args(["cycles", "--json"])
        .output()
        .expect("slng should not crash");
    assert!(output.status.success());

    let json: Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(json["has_cycle"], true);
    assert_eq!(json["cycles"].as_array().expect("cycles").len(), 1);
    assert_eq!(json["cycles"][0], serde_json::json!(["A", "B", "A"]));
}

#[test]
fn check_fails_on_cycle() {
    let dir = project_with(CYCLIC_MANIFEST);
    slng_cmd(dir.path())
        .args(["check", "--format", "text"])
        .assert()
        .failure()
        .stdout(predicate::str::starts_with("failed\n"))
        .stdout(predicate::str::contains("cycle\tA B A"));
}

#[test]
fn dangling_references_warn_by_default() {
    let dir = project_with(DANGLING_MANIFEST);
    slng_cmd(dir.path())
        .args(["check", "--format", "text"])
        .assert()
        .success()
        .stdout(predicate::str::contains("dangling\tWeb\tLegacy"));

    slng_cmd(dir.path())
        .args(["order", "--format", "text"])
        .assert()
        .success()
        .stdout("Core\nWeb\n");
}

#[test]
fn strict_check_fails_on_dangling() {
    let dir = project_with(DANGLING_MANIFEST);
    slng_cmd(dir.path())
        .args(["check", "--strict", "--format", "text"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error[E2003]"));
}

#[test]
fn project_config_enables_fail_on_dangling() {
    let dir = project_with(DANGLING_MANIFEST);
    std::fs::create_dir_all(dir.path().join(".slngraph")).expect("mkdir");
    std::fs::write(
        dir.path().join(".slngraph/config.toml"),
        "[check]\nfail_on_dangling = true\n",
    )
    .expect("write config");

    slng_cmd(dir.path())
        .args(["check", "--format", "text"])
        .assert()
        .failure();
}

#[test]
fn missing_manifest_is_a_read_error() {
    let dir = TempDir::new().expect("temp dir");
    slng_cmd(dir.path())
        .args(["order", "--format", "text"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error[E1002]"));
}

#[test]
fn malformed_manifest_is_a_parse_error() {
    let dir = project_with("{\"projects\": [");
    slng_cmd(dir.path())
        .args(["order", "--format", "text"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error[E1003]"));
}

#[test]
fn broken_config_is_reported() {
    let dir = project_with(DANGLING_MANIFEST);
    let config = dir.path().join("custom.toml");
    std::fs::write(&config, "[check\n").expect("write config");

    slng_cmd(dir.path())
        .args(["order", "--format", "text", "--config"])
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("error[E1001]"));
}

#[test]
fn completions_need_no_manifest() {
    let dir = TempDir::new().expect("temp dir");
    slng_cmd(dir.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("slng"));
}
