// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Execution of due firings: inline or on a dedicated worker thread
//!
//! Threaded firings each get their own named thread; the dispatcher caps
//! how many may be live at once and skips the run when the cap is reached.
//! There is no pool and threads are never reused.

use crate::event::JobId;
use crate::manager::{ErrorHook, Job, JobError};
use chrono::{DateTime, Utc};
use std::thread::JoinHandle;
use tracing::error;

/// How a due firing was executed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Handler ran on the caller, inside the poll loop
    Inline,
    /// Handler was handed to a dedicated worker thread
    Threaded,
    /// Worker-thread capacity was exhausted; the run was dropped
    Skipped,
}

/// Executes firings on behalf of a manager
pub struct Dispatcher {
    max_threads: usize,
    handles: Vec<JoinHandle<()>>,
}

impl Dispatcher {
    pub fn new(max_threads: usize) -> Self {
        Self {
            max_threads,
            handles: Vec::new(),
        }
    }

    /// Run the handler on the caller; failures are logged and hooked
    pub fn run_inline(
        &self,
        job: &JobId,
        handler: &Job,
        now: DateTime<Utc>,
        hook: Option<&ErrorHook>,
    ) -> DispatchOutcome {
        if let Err(err) = handler(now) {
            report_failure(job, &err, hook);
        }
        DispatchOutcome::Inline
    }

    /// Run the handler on a dedicated thread, unless the cap is reached
    pub fn spawn(
        &mut self,
        job: JobId,
        handler: Job,
        now: DateTime<Utc>,
        hook: Option<ErrorHook>,
    ) -> DispatchOutcome {
        self.handles.retain(|handle| !handle.is_finished());
        if self.handles.len() >= self.max_threads {
            error!(job = %job, max_threads = self.max_threads, "threads exhausted, skipping run");
            return DispatchOutcome::Skipped;
        }

        let builder = std::thread::Builder::new().name(format!("tempo-{job}"));
        let spawned_job = job.clone();
        match builder.spawn(move || {
            if let Err(err) = handler(now) {
                report_failure(&spawned_job, &err, hook.as_ref());
            }
        }) {
            Ok(handle) => {
                self.handles.push(handle);
                DispatchOutcome::Threaded
            }
            Err(err) => {
                error!(job = %job, error = %err, "failed to spawn worker thread, skipping run");
                DispatchOutcome::Skipped
            }
        }
    }

    /// Number of worker threads still running
    pub fn live_threads(&mut self) -> usize {
        self.handles.retain(|handle| !handle.is_finished());
        self.handles.len()
    }

    /// Join all in-flight worker threads (graceful shutdown)
    pub fn join_all(&mut self) {
        for handle in self.handles.drain(..) {
            if handle.join().is_err() {
                error!("worker thread panicked");
            }
        }
    }
}

fn report_failure(job: &JobId, err: &JobError, hook: Option<&ErrorHook>) {
    error!(job = %job, error = %err, "job handler failed");
    if let Some(hook) = hook {
        hook(job, err);
    }
}

#[cfg(test)]
#[path = "dispatch_tests.rs"]
mod tests;
