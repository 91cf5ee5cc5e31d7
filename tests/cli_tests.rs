//! CLI integration tests using the REAL querypack binary

mod common;

use common::querypack_cmd;
use predicates::prelude::*;

#[test]
fn test_help_output() {
    querypack_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("package"))
        .stdout(predicate::str::contains("show"))
        .stdout(predicate::str::contains("completions"));
}

#[test]
fn test_package_help_lists_overrides() {
    querypack_cmd()
        .args(["package", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--preview"))
        .stdout(predicate::str::contains("--rel-path"))
        .stdout(predicate::str::contains("--conflict-resolution"));
}

#[test]
fn test_version_output() {
    querypack_cmd()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("querypack"))
        .stdout(predicate::str::contains("Build info"));
}

#[test]
fn test_completions_bash() {
    querypack_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("querypack"));
}

#[test]
fn test_completions_unknown_shell() {
    querypack_cmd()
        .args(["completions", "tcsh"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown shell 'tcsh'"));
}

#[test]
fn test_unknown_command_fails() {
    querypack_cmd().arg("install").assert().failure();
}
