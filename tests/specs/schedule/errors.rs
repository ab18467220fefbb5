//! Schedule error specs
//!
//! Verify configuration errors are fatal at load time with a clear message.

use crate::prelude::*;
use predicates::str::contains;

#[test]
fn missing_schedule_file_fails() {
    let sandbox = Sandbox::new();
    let missing = sandbox.path().join("nope.toml");

    tempod()
        .arg("--check")
        .arg(missing)
        .assert()
        .failure()
        .code(1)
        .stderr(contains("failed to read"));
}

#[test]
fn invalid_toml_fails_to_parse() {
    let sandbox = Sandbox::new();
    let schedule = sandbox.schedule("not toml [");

    tempod()
        .arg("--check")
        .arg(schedule)
        .assert()
        .failure()
        .code(1)
        .stderr(contains("failed to parse"));
}

#[test]
fn unknown_timezone_is_fatal_at_load_time() {
    let sandbox = Sandbox::new();
    let schedule = sandbox.schedule("tz = \"Mars/Olympus_Mons\"\n");

    tempod()
        .arg("--check")
        .arg(schedule)
        .assert()
        .failure()
        .code(1)
        .stderr(contains("failed to parse"));
}

#[test]
fn job_without_a_period_is_rejected() {
    let sandbox = Sandbox::new();
    let schedule = sandbox.schedule(
        r#"
[[job]]
name = "heartbeat"
command = "true"
"#,
    );

    tempod()
        .arg("--check")
        .arg(schedule)
        .assert()
        .failure()
        .code(1)
        .stderr(contains("every"));
}

#[test]
fn job_with_an_empty_name_is_rejected() {
    let sandbox = Sandbox::new();
    let schedule = sandbox.schedule(
        r#"
[[job]]
name = ""
every = "1s"
command = "true"
"#,
    );

    tempod()
        .arg("--check")
        .arg(schedule)
        .assert()
        .failure()
        .code(1)
        .stderr(contains("empty name"));
}

#[test]
fn job_with_an_empty_command_is_rejected() {
    let sandbox = Sandbox::new();
    let schedule = sandbox.schedule(
        r#"
[[job]]
name = "heartbeat"
every = "1s"
command = ""
"#,
    );

    tempod()
        .arg("--check")
        .arg(schedule)
        .assert()
        .failure()
        .code(1)
        .stderr(contains("empty command"));
}
