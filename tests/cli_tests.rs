//! CLI integration tests.

use std::fs;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn crossedge() -> Command {
    let mut cmd = cargo_bin_cmd!("crossedge");
    cmd.env("NO_COLOR", "1");
    cmd
}

#[test]
fn test_help() {
    crossedge()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("crossedge"))
        .stdout(predicate::str::contains("run"))
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn test_version() {
    crossedge()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("crossedge"));
}

#[test]
fn test_config_init_then_validate() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");

    crossedge()
        .args(["config", "init"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Created configuration file"));
    assert!(fs::read_to_string(&path).unwrap().contains("[matching]"));

    crossedge()
        .args(["config", "validate", "--config"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Config file is valid"));
}

#[test]
fn test_config_init_refuses_existing_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "# keep me\n").unwrap();

    crossedge()
        .args(["config", "init"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));
    assert_eq!(fs::read_to_string(&path).unwrap(), "# keep me\n");
}

#[test]
fn test_config_validate_reports_invalid_value() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "[matching]\nconcurrency = 0\n").unwrap();

    crossedge()
        .args(["config", "validate", "--config"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("matching.concurrency"));
}

#[test]
fn test_config_show_lists_sections() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "[polymarket]\nenabled = false\n").unwrap();

    crossedge()
        .args(["config", "show", "--config"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Platforms"))
        .stdout(predicate::str::contains("disabled"))
        .stdout(predicate::str::contains("Thresholds"));
}

#[test]
fn test_run_with_both_platforms_disabled_is_not_available() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(
        &path,
        "[kalshi]\nenabled = false\n\n[polymarket]\nenabled = false\n",
    )
    .unwrap();

    crossedge()
        .args(["run", "--json", "--config"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"status\": \"not_available\""));
}

#[test]
fn test_run_rejects_out_of_range_override() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "").unwrap();

    crossedge()
        .args(["run", "--min-confidence", "2.0", "--config"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("matching.min_confidence"));
}

#[test]
fn test_run_with_missing_config_fails() {
    crossedge()
        .args(["run", "--config", "/nonexistent/crossedge.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read config file"));
}

#[test]
fn test_color_never_flag() {
    crossedge()
        .args(["--color", "never", "--help"])
        .assert()
        .success();
}
