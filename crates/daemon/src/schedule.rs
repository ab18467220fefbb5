// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! TOML schedule files and the manager they build
//!
//! A schedule file carries the process-wide configuration at the top level
//! and one `[[job]]` table per recurring job. Timezone names are validated
//! during deserialization, so a bad zone is a load-time error, never a
//! per-tick one.

use chrono_tz::Tz;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Duration;
use tempo_core::{EventOptions, Manager, ManagerConfig, RegisterError};
use thiserror::Error;

/// Errors loading or validating a schedule file
#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("job #{index} has an empty name")]
    EmptyName { index: usize },
    #[error("job {name:?} has an empty command")]
    EmptyCommand { name: String },
    #[error("job {name:?}: {source}")]
    Register {
        name: String,
        source: RegisterError,
    },
}

/// One `[[job]]` table
#[derive(Debug, Clone, Deserialize)]
pub struct JobSpec {
    pub name: String,
    #[serde(with = "humantime_serde")]
    pub every: Duration,
    pub command: String,
    #[serde(default)]
    pub thread: Option<bool>,
    #[serde(default)]
    pub skip_first_run: bool,
    #[serde(default)]
    pub tz: Option<Tz>,
}

/// A parsed schedule file
#[derive(Debug, Deserialize)]
pub struct Schedule {
    #[serde(flatten)]
    pub config: ManagerConfig,
    #[serde(default, rename = "job")]
    pub jobs: Vec<JobSpec>,
}

impl Schedule {
    /// Load and validate a schedule file
    pub fn load(path: &Path) -> Result<Self, ScheduleError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ScheduleError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let schedule: Schedule =
            toml::from_str(&contents).map_err(|source| ScheduleError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        schedule.validate()?;
        Ok(schedule)
    }

    fn validate(&self) -> Result<(), ScheduleError> {
        for (index, job) in self.jobs.iter().enumerate() {
            if job.name.trim().is_empty() {
                return Err(ScheduleError::EmptyName { index });
            }
            if job.command.trim().is_empty() {
                return Err(ScheduleError::EmptyCommand {
                    name: job.name.clone(),
                });
            }
        }
        Ok(())
    }

    /// Build a manager whose handlers run each job's command via `sh -c`
    pub fn build_manager(&self) -> Result<Manager, ScheduleError> {
        let mut manager = Manager::new(self.config);
        for job in &self.jobs {
            let options = EventOptions {
                thread: job.thread,
                skip_first_run: job.skip_first_run,
                tz: job.tz,
            };
            let command = job.command.clone();
            manager
                .every(job.every, job.name.as_str(), options, move |_now| {
                    let status = Command::new("sh").arg("-c").arg(&command).status()?;
                    if status.success() {
                        Ok(())
                    } else {
                        Err(format!("command exited with {status}").into())
                    }
                })
                .map_err(|source| ScheduleError::Register {
                    name: job.name.clone(),
                    source,
                })?;
        }
        Ok(manager)
    }
}

#[cfg(test)]
#[path = "schedule_tests.rs"]
mod tests;
