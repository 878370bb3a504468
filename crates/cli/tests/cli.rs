//! Integration tests for the `clientgen` binary.
//!
//! Each test writes a code model into a temp dir and runs the built binary
//! over it.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

const GROUPED_MODEL: &str = r#"{
  "schemas": [
    { "name": "Pagination", "type": "object", "properties": [0, 1] },
    { "name": "int32", "type": "scalar", "scalar": "integer" }
  ],
  "properties": [
    { "name": "top", "serializedName": "top", "schema": 1 },
    { "name": "skip", "serializedName": "skip", "schema": 1 }
  ],
  "parameters": [
    { "name": "pagination", "serializedName": "pagination", "schema": 0 },
    { "name": "top", "serializedName": "top", "schema": 1, "groupedBy": 0,
      "protocol": { "http": { "in": "query" } } },
    { "name": "skip", "serializedName": "skip", "schema": 1, "groupedBy": 0,
      "protocol": { "http": { "in": "query" } } }
  ],
  "operations": [
    { "name": "listItems", "requests": [{
        "parameters": [1, 2],
        "protocol": { "http": { "method": "get", "path": "/items" } } }] }
  ]
}"#;

fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("Failed to write fixture");
    path
}

fn clientgen(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_clientgen"))
        .args(args)
        .env("RUST_LOG", "off")
        .output()
        .expect("Failed to run clientgen")
}

#[test]
fn test_json_plan() {
    let dir = TempDir::new().unwrap();
    let model = write_file(dir.path(), "model.json", GROUPED_MODEL);

    let output = clientgen(&[model.to_str().unwrap()]);
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let plan: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let methods = plan.as_array().unwrap();
    assert_eq!(methods.len(), 1);
    assert_eq!(methods[0]["name"], "listItems");
    assert_eq!(methods[0]["parameters"][0]["name"], "pagination");

    let outs: Vec<_> = methods[0]["transformations"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["outParameter"]["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(outs, ["top", "skip"]);
}

#[test]
fn test_text_plan_with_config() {
    let dir = TempDir::new().unwrap();
    let model = write_file(dir.path(), "model.json", GROUPED_MODEL);
    let config = write_file(dir.path(), "clientgen.toml", "protocol-methods = true\n");

    let output = clientgen(&[
        model.to_str().unwrap(),
        "--config",
        config.to_str().unwrap(),
        "--format",
        "text",
    ]);
    assert!(output.status.success());

    let text = String::from_utf8(output.stdout).unwrap();
    assert!(
        text.contains("listItems(pagination?: Pagination)  // GET /items (application/json)"),
        "{text}"
    );
    assert!(text.contains("    top <- pagination.top"), "{text}");
    assert!(
        text.contains("listItems(top?: number, skip?: number)  // protocol GET /items"),
        "{text}"
    );
}

#[test]
fn test_operation_filter() {
    let dir = TempDir::new().unwrap();
    let model = write_file(dir.path(), "model.json", GROUPED_MODEL);

    let output = clientgen(&[model.to_str().unwrap(), "--operation", "getItem"]);
    assert!(output.status.success());
    let plan: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(plan.as_array().unwrap().len(), 0);
}

#[test]
fn test_grouping_lookup_failure_exits_nonzero() {
    let dir = TempDir::new().unwrap();
    let broken = GROUPED_MODEL.replace(
        r#"{ "name": "skip", "serializedName": "skip", "schema": 1, "groupedBy""#,
        r#"{ "name": "offset", "serializedName": "offset", "schema": 1, "groupedBy""#,
    );
    let model = write_file(dir.path(), "model.json", &broken);

    let output = clientgen(&[model.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.starts_with("Error: "), "{stderr}");
    assert!(stderr.contains("'offset'"), "{stderr}");
    assert!(stderr.contains("'listItems'"), "{stderr}");
    assert!(output.stdout.is_empty());
}

#[test]
fn test_missing_model_exits_nonzero() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("absent.json");

    let output = clientgen(&[missing.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to read code model"), "{stderr}");
}
