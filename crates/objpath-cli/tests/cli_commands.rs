//! # CLI Integration Tests
//!
//! Runs the built `objpath` binary against fixture files in a temporary
//! directory and checks stdout and exit codes.

use std::path::Path;
use std::process::{Command, Output};

fn objpath(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_objpath"))
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .expect("failed to run objpath binary")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn fixture() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("doc.json"),
        r#"{"a": 1, "b": 2, "array": [10, 20]}"#,
    )
    .unwrap();
    std::fs::write(
        dir.path().join("rules.yaml"),
        "a:\n  test: entry\n  type: number\narray:\n  test: array\n  type: number\n",
    )
    .unwrap();
    dir
}

// ---------------------------------------------------------------------------
// Reads
// ---------------------------------------------------------------------------

#[test]
fn paths_lists_accessors() {
    let dir = fixture();
    let output = objpath(dir.path(), &["paths", "doc.json"]);
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output), "a\nb\narray.0\narray.1\n");
}

#[test]
fn get_missing_path_exits_one() {
    let dir = fixture();
    let output = objpath(dir.path(), &["get", "doc.json", "array.5"]);
    assert_eq!(output.status.code(), Some(1));

    let output = objpath(dir.path(), &["get", "doc.json", "array.1"]);
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output).trim(), "20");
}

// ---------------------------------------------------------------------------
// Writes
// ---------------------------------------------------------------------------

#[test]
fn set_then_get_round_trip() {
    let dir = fixture();
    let output = objpath(
        dir.path(),
        &["set", "doc.json", "array.1", "99", "--output", "out.json"],
    );
    assert_eq!(output.status.code(), Some(0));

    let output = objpath(dir.path(), &["get", "out.json", "array.1"]);
    assert_eq!(stdout(&output).trim(), "99");
}

#[test]
fn set_with_op_and_compact_output() {
    let dir = fixture();
    let output = objpath(dir.path(), &["--compact", "set", "doc.json", "b", "10", "--op", "add"]);
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output), "{\"a\":1,\"b\":12,\"array\":[10,20]}\n");
}

#[test]
fn set_rejects_bad_index_and_unknown_op() {
    let dir = fixture();
    let output = objpath(dir.path(), &["set", "doc.json", "array.-1", "1"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).is_empty());

    let output = objpath(dir.path(), &["set", "doc.json", "a", "1", "--op", "pow"]);
    assert_eq!(output.status.code(), Some(2));
}

// ---------------------------------------------------------------------------
// Validation and configuration
// ---------------------------------------------------------------------------

#[test]
fn validate_pass_and_fail() {
    let dir = fixture();
    let output = objpath(dir.path(), &["validate", "doc.json", "--rules", "rules.yaml"]);
    assert_eq!(output.status.code(), Some(0));

    std::fs::write(dir.path().join("bad.json"), r#"{"a": "one", "array": [1]}"#).unwrap();
    let output = objpath(
        dir.path(),
        &["validate", "bad.json", "--rules", "rules.yaml", "--name", "cfg"],
    );
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("'cfg.a' is not a 'number'."));
}

#[test]
fn config_file_supplies_rules_and_name() {
    let dir = fixture();
    std::fs::write(
        dir.path().join("objpath.yaml"),
        "data_name: svc\nrules: rules.yaml\n",
    )
    .unwrap();
    std::fs::write(dir.path().join("bad.json"), r#"{"a": 1, "array": ["x"]}"#).unwrap();

    let output = objpath(dir.path(), &["validate", "bad.json", "--all"]);
    assert_eq!(output.status.code(), Some(1));
    let text = stdout(&output);
    assert!(text.starts_with("2 rule(s) checked, 1 failed"), "{text}");
    assert!(text.contains("'svc.array[0]': 'x' is not a 'number'."));
}

#[test]
fn missing_file_is_operational_error() {
    let dir = fixture();
    let output = objpath(dir.path(), &["paths", "nope.json"]);
    assert_eq!(output.status.code(), Some(2));
}
