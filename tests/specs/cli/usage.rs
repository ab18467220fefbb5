//! CLI usage specs
//!
//! Verify argument handling before any schedule is read.

use crate::prelude::*;
use predicates::str::contains;

#[test]
fn no_arguments_prints_usage_and_fails() {
    tempod()
        .assert()
        .failure()
        .code(2)
        .stderr(contains("usage: tempod"));
}

#[test]
fn check_without_a_path_is_a_usage_error() {
    tempod()
        .arg("--check")
        .assert()
        .failure()
        .code(2)
        .stderr(contains("usage: tempod"));
}

#[test]
fn extra_arguments_are_a_usage_error() {
    tempod()
        .args(["a.toml", "b.toml"])
        .assert()
        .failure()
        .code(2)
        .stderr(contains("usage: tempod"));
}
