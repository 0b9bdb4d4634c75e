use std::{fs, path::PathBuf};

use assert_cmd::Command;
use perfgate::bench_utils::document;
use serde_json::Value;
use tempfile::TempDir;

fn write(dir: &TempDir, name: &str, doc: &Value) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, doc.to_string()).expect("write fixture");
    path
}

fn perfgate() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_perfgate"));
    cmd.env_remove("PERFGATE_LOG");
    cmd
}

fn stdout_of(assert: &assert_cmd::assert::Assert) -> String {
    String::from_utf8_lossy(&assert.get_output().stdout).into_owned()
}

fn stderr_of(assert: &assert_cmd::assert::Assert) -> String {
    String::from_utf8_lossy(&assert.get_output().stderr).into_owned()
}

#[test]
fn test_cli_passes_on_improvement() {
    let dir = tempfile::tempdir().expect("tempdir");
    let baseline = write(&dir, "baseline.json", &document(&[("A", 100.0)]));
    let current = write(&dir, "current.json", &document(&[("A", 95.0)]));
    let assert = perfgate().arg(&current).arg(&baseline).assert().code(0);
    let stdout = stdout_of(&assert);
    assert!(stdout.contains("Performance Improvements (1 benchmarks)"));
    assert!(stdout.contains("PASS: No significant regressions detected"));
}

#[test]
fn test_cli_fails_on_critical_regression() {
    let dir = tempfile::tempdir().expect("tempdir");
    let baseline = write(&dir, "baseline.json", &document(&[("A", 100.0)]));
    let current = write(&dir, "current.json", &document(&[("A", 125.0)]));
    let assert = perfgate().arg(&current).arg(&baseline).assert().code(1);
    assert!(stdout_of(&assert).contains("FAIL: Critical regressions detected"));
}

#[test]
fn test_cli_warning_still_exits_zero() {
    let dir = tempfile::tempdir().expect("tempdir");
    let baseline = write(&dir, "baseline.json", &document(&[("A", 100.0)]));
    let current = write(&dir, "current.json", &document(&[("A", 118.0)]));
    perfgate().arg(&current).arg(&baseline).assert().code(0);
}

#[test]
fn test_cli_usage_on_wrong_argument_count() {
    let assert = perfgate().assert().code(2);
    assert!(stderr_of(&assert).contains("Usage: perfgate"));
    assert!(stdout_of(&assert).is_empty());

    perfgate().arg("only_one.json").assert().code(2);
    perfgate().args(["a.json", "b.json", "c.json"]).assert().code(2);
}

#[test]
fn test_cli_missing_file_exits_two() {
    let dir = tempfile::tempdir().expect("tempdir");
    let current = write(&dir, "current.json", &document(&[("A", 1.0)]));
    let assert = perfgate()
        .arg(&current)
        .arg(dir.path().join("missing.json"))
        .assert()
        .code(2);
    assert!(stderr_of(&assert).contains("missing.json"));
}

#[test]
fn test_cli_malformed_document_exits_two() {
    let dir = tempfile::tempdir().expect("tempdir");
    let baseline = write(&dir, "baseline.json", &document(&[("A", 1.0)]));
    let current = dir.path().join("current.json");
    fs::write(&current, "{ truncated").expect("write fixture");
    let assert = perfgate().arg(&current).arg(&baseline).assert().code(2);
    assert!(stderr_of(&assert).contains("invalid document"));
}

#[test]
fn test_cli_no_common_benchmarks_exits_two() {
    let dir = tempfile::tempdir().expect("tempdir");
    let baseline = write(&dir, "baseline.json", &document(&[("A", 1.0)]));
    let current = write(&dir, "current.json", &document(&[("B", 1.0)]));
    let assert = perfgate().arg(&current).arg(&baseline).assert().code(2);
    assert!(stderr_of(&assert).contains("no common benchmarks"));
}
