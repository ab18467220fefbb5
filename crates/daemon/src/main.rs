// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tempo Daemon (tempod)
//!
//! Background process that loads a TOML schedule and drives the poll loop,
//! evaluating every registered job once per tick.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod schedule;

use std::path::PathBuf;

use tempo_core::{Clock, SystemClock};
use tokio::signal::unix::{signal, SignalKind};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::schedule::Schedule;

const USAGE: &str = "usage: tempod [--check] <schedule.toml>";

struct Args {
    check_only: bool,
    path: PathBuf,
}

fn parse_args(args: &[String]) -> Option<Args> {
    match args {
        [path] if path != "--check" => Some(Args {
            check_only: false,
            path: PathBuf::from(path),
        }),
        [flag, path] if flag == "--check" => Some(Args {
            check_only: true,
            path: PathBuf::from(path),
        }),
        _ => None,
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let raw: Vec<String> = std::env::args().skip(1).collect();
    let Some(args) = parse_args(&raw) else {
        eprintln!("{USAGE}");
        std::process::exit(2);
    };

    // Load the schedule; any configuration error is fatal here, never
    // inside the poll loop.
    let schedule = match Schedule::load(&args.path) {
        Ok(schedule) => schedule,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };
    let mut manager = match schedule.build_manager() {
        Ok(manager) => manager,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    if args.check_only {
        let config = manager.config();
        println!(
            "schedule OK: {} jobs, tick every {}",
            manager.events().count(),
            humantime::format_duration(config.sleep_timeout)
        );
        return Ok(());
    }

    // Set up logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!(
        schedule = %args.path.display(),
        jobs = manager.events().count(),
        "starting tempod"
    );

    // Set up signal handlers
    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigint = signal(SignalKind::interrupt())?;

    let clock = SystemClock;
    let tick = manager.config().sleep_timeout;

    // Main poll loop
    loop {
        tokio::select! {
            _ = tokio::time::sleep(tick) => {
                for firing in manager.tick(clock.now()) {
                    debug!(job = %firing.job, at = %firing.at, outcome = ?firing.outcome, "job fired");
                }
            }
            _ = sigterm.recv() => {
                info!("received SIGTERM, shutting down");
                break;
            }
            _ = sigint.recv() => {
                info!("received SIGINT, shutting down");
                break;
            }
        }
    }

    // Drain in-flight worker threads before exiting
    manager.shutdown();
    info!("tempod stopped");
    Ok(())
}
