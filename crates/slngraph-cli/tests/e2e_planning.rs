//! E2E planning tests: `slng order`, `slng groups`, `slng deps`,
//! `slng dependents` and `slng packages` against manifests on disk.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::path::Path;
use tempfile::TempDir;

const SHOP_MANIFEST: &str = r#"{
  "projects": [
    {"path": "src/Shop.Web/Shop.Web.csproj", "type": "executable", "framework": "net8.0",
     "project_references": ["../Shop.Application/Shop.Application.csproj",
                            "../Shop.Infrastructure/Shop.Infrastructure.csproj"],
     "package_references": [{"name": "Serilog", "version": "3.1.1"}]},
    {"path": "src/Shop.Application/Shop.Application.csproj", "type": "library", "framework": "net8.0",
     "project_references": ["../Shop.Domain/Shop.Domain.csproj"],
     "package_references": [{"name": "MediatR", "version": "12.2.0"}]},
    {"path": "src/Shop.Infrastructure/Shop.Infrastructure.csproj", "type": "library",
     "project_references": ["../Shop.Application/Shop.Application.csproj"],
     "package_references": [{"name": "Serilog", "version": "3.1.1"}]},
    {"path": "src/Shop.Domain/Shop.Domain.csproj", "type": "library"}
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

fn write_manifest(dir: &Path, name: &str, content: &str) {
    std::fs::write(dir.join(name), content).expect("write manifest");
}

fn shop_dir() -> TempDir {
    let dir = TempDir::new().expect("temp dir");
    write_manifest(dir.path(), "slngraph.json", SHOP_MANIFEST);
    dir
}

fn run_json(dir: &Path, args: &[&str]) -> Value {
    let output = slng_cmd(dir)
        .args(args)
        .arg("--json")
        .output()
        .expect("slng should not crash");
    assert!(
        output.status.success(),
        "{args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("valid JSON")
}

fn strings(value: &Value) -> Vec<String> {
    value
        .as_array()
        .expect("array")
        .iter()
        .map(|v| v.as_str().expect("string").to_string())
        .collect()
}

#[test]
fn order_lists_dependencies_first() {
    let dir = shop_dir();
    let json = run_json(dir.path(), &["order"]);
    assert_eq!(
        strings(&json["order"]),
        [
            "Shop.Domain",
            "Shop.Application",
            "Shop.Infrastructure",
            "Shop.Web"
        ]
    );
}

#[test]
fn order_text_is_one_id_per_line() {
    let dir = shop_dir();
    slng_cmd(dir.path())
        .args(["order", "--format", "text"])
        .assert()
        .success()
        .stdout("Shop.Domain\nShop.Application\nShop.Infrastructure\nShop.Web\n");
}

#[test]
fn groups_are_sequential_batches() {
    let dir = shop_dir();
    let json = run_json(dir.path(), &["groups"]);
    let groups: Vec<Vec<String>> = json["groups"]
        .as_array()
        .expect("groups array")
        .iter()
        .map(strings)
        .collect();
    assert_eq!(
        groups,
        vec![
            vec!["Shop.Domain".to_string()],
            vec!["Shop.Application".to_string()],
            vec!["Shop.Infrastructure".to_string()],
            vec!["Shop.Web".to_string()],
        ]
    );
}

#[test]
fn independent_projects_share_a_batch() {
    let dir = TempDir::new().expect("temp dir");
    write_manifest(
        dir.path(),
        "slngraph.toml",
        r#"
[[projects]]
path = "A/A.csproj"
project_references = ["../C/C.csproj"]

[[projects]]
path = "B/B.csproj"
project_references = ["../C/C.csproj"]

[[projects]]
path = "C/C.csproj"
"#,
    );

    slng_cmd(dir.path())
        .args(["groups", "--manifest", "slngraph.toml", "--format", "text"])
        .assert()
        .success()
        .stdout("C\nA B\n");
}

#[test]
fn deps_direct_and_transitive() {
    let dir = shop_dir();
    let direct = run_json(dir.path(), &["deps", "Shop.Web"]);
    assert_eq!(direct["relation"], "dependencies");
    assert_eq!(
        strings(&direct["projects"]),
        ["Shop.Application", "Shop.Infrastructure"]
    );

    let all = run_json(dir.path(), &["deps", "Shop.Web", "--transitive"]);
    let mut projects = strings(&all["projects"]);
    projects.sort();
    assert_eq!(
        projects,
        ["Shop.Application", "Shop.Domain", "Shop.Infrastructure"]
    );
}

#[test]
fn dependents_are_sorted() {
    let dir = shop_dir();
    let json = run_json(dir.path(), &["dependents", "Shop.Application"]);
    assert_eq!(
        strings(&json["projects"]),
        ["Shop.Infrastructure", "Shop.Web"]
    );
}

#[test]
fn deps_unknown_project_fails_with_code() {
    let dir = shop_dir();
    slng_cmd(dir.path())
        .args(["deps", "Nope", "--format", "text"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error[E2001]"));
}

#[test]
fn packages_count_dependents() {
    let dir = shop_dir();
    let json = run_json(dir.path(), &["packages"]);
    let packages = json["packages"].as_array().expect("packages array");
    assert_eq!(packages.len(), 2);

    let serilog = packages
        .iter()
        .find(|p| p["name"] == "Serilog")
        .expect("Serilog listed");
    assert_eq!(serilog["usage_count"], 2);
    assert_eq!(
        strings(&serilog["dependents"]),
        ["Shop.Web", "Shop.Infrastructure"]
    );

    let shared = run_json(dir.path(), &["packages", "--min-usage", "2"]);
    assert_eq!(shared["packages"].as_array().expect("array").len(), 1);
}

#[test]
fn env_format_applies_without_flag() {
    let dir = shop_dir();
    let output = slng_cmd(dir.path())
        .env("SLNGRAPH_FORMAT", "json")
        .arg("order")
        .output()
        .expect("slng should not crash");
    assert!(output.status.success());
    let json: Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert!(json["order"].is_array());
}

#[test]
fn empty_manifest_yields_empty_order() {
    let dir = TempDir::new().expect("temp dir");
    write_manifest(dir.path(), "slngraph.json", r#"{"projects": []}"#);
    let json = run_json(dir.path(), &["order"]);
    assert_eq!(json["order"], Value::Array(vec![]));
}

#[test]
fn dot_renders_graphviz() {
    let dir = shop_dir();
    slng_cmd(dir.path())
        .arg("dot")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("digraph {"))
        .stdout(predicate::str::contains("label = \"Shop.Domain\""));
}
