use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn test_help_lists_commands() {
    cargo_bin_cmd!("cwala")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("whoami"))
        .stdout(predicate::str::contains("logout"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn test_config_help_lists_subcommands() {
    cargo_bin_cmd!("cwala")
        .args(["config", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("path"))
        .stdout(predicate::str::contains("init"));
}

#[test]
fn test_version_flag() {
    cargo_bin_cmd!("cwala")
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("1.2"));
}

/// The default mode is the dashboard, which refuses to start without a
/// terminal attached.
#[test]
fn test_dashboard_requires_terminal() {
    let dir = tempdir().unwrap();

    cargo_bin_cmd!("cwala")
        .env("CWALA_HOME", dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("requires a terminal"));
}
