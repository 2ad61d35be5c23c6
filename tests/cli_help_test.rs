//! CLI help output integration tests

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

#[test]
fn test_root_help() {
    Command::cargo_bin("gfl")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Gift list tracker"));
}

#[test]
fn test_list_help() {
    Command::cargo_bin("gfl")
        .unwrap()
        .args(["list", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Create an empty gift list"))
        .stdout(predicate::str::contains("Delete a list and all of its gifts"));
}

#[test]
fn test_gift_help() {
    Command::cargo_bin("gfl")
        .unwrap()
        .args(["gift", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Record a new price for a gift"))
        .stdout(predicate::str::contains("Toggle the purchased flag"));
}

#[test]
fn test_budget_help() {
    Command::cargo_bin("gfl")
        .unwrap()
        .args(["budget", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("List id"));
}
