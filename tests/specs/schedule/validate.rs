//! Schedule validation specs
//!
//! Verify `tempod --check` accepts well-formed schedules.

use crate::prelude::*;
use predicates::str::contains;

#[test]
fn minimal_schedule_passes_check() {
    let sandbox = Sandbox::new();
    let schedule = sandbox.schedule(MINIMAL_SCHEDULE);

    tempod()
        .arg("--check")
        .arg(schedule)
        .assert()
        .success()
        .stdout(contains("schedule OK: 1 jobs"));
}

#[test]
fn check_reports_the_tick_interval() {
    let sandbox = Sandbox::new();
    let schedule = sandbox.schedule("sleep_timeout = \"250ms\"\n");

    tempod()
        .arg("--check")
        .arg(schedule)
        .assert()
        .success()
        .stdout(contains("tick every 250ms"));
}

#[test]
fn per_job_options_are_accepted() {
    let sandbox = Sandbox::new();
    let schedule = sandbox.schedule(
        r#"
tz = "America/Los_Angeles"
thread = true
max_threads = 2

[[job]]
name = "nightly-report"
every = "1day"
command = "echo report"
thread = false
skip_first_run = true
tz = "UTC"
"#,
    );

    tempod()
        .arg("--check")
        .arg(schedule)
        .assert()
        .success()
        .stdout(contains("schedule OK: 1 jobs"));
}

#[test]
fn empty_schedule_is_valid() {
    let sandbox = Sandbox::new();
    let schedule = sandbox.schedule("");

    tempod()
        .arg("--check")
        .arg(schedule)
        .assert()
        .success()
        .stdout(contains("schedule OK: 0 jobs"));
}
