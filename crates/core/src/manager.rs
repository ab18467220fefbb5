// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job registration and the per-tick poll entry point
//!
//! A `Manager` owns the process-wide configuration, the registered events
//! with their handlers, and the dispatcher. `tick` takes `&mut self`, so
//! evaluations for one event can never overlap.

use crate::config::{ConfigProvider, ManagerConfig};
use crate::dispatch::{DispatchOutcome, Dispatcher};
use crate::event::{DueStrategy, Event, EventOptions, JobId, RegisterError};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Error produced by a job handler
pub type JobError = Box<dyn std::error::Error + Send + Sync>;

/// A job's handler, invoked with the firing timestamp
pub type Job = Arc<dyn Fn(DateTime<Utc>) -> Result<(), JobError> + Send + Sync>;

/// Callback invoked whenever a handler fails
pub type ErrorHook = Arc<dyn Fn(&JobId, &JobError) + Send + Sync>;

/// Record of one accepted firing, for observability
#[derive(Debug, Clone)]
pub struct Firing {
    pub job: JobId,
    pub at: DateTime<Utc>,
    pub outcome: DispatchOutcome,
}

struct Entry {
    event: Event,
    handler: Job,
}

/// Owns registered jobs and drives one poll tick at a time
pub struct Manager {
    config: Arc<ManagerConfig>,
    entries: Vec<Entry>,
    dispatcher: Dispatcher,
    error_hook: Option<ErrorHook>,
}

impl Manager {
    pub fn new(config: ManagerConfig) -> Self {
        let dispatcher = Dispatcher::new(config.max_threads);
        Self {
            config: Arc::new(config),
            entries: Vec::new(),
            dispatcher,
            error_hook: None,
        }
    }

    pub fn config(&self) -> ManagerConfig {
        *self.config
    }

    /// Register a job firing every `period`
    pub fn every(
        &mut self,
        period: Duration,
        job: impl Into<JobId>,
        options: EventOptions,
        handler: impl Fn(DateTime<Utc>) -> Result<(), JobError> + Send + Sync + 'static,
    ) -> Result<(), RegisterError> {
        self.register(DueStrategy::Every(period), job.into(), options, Arc::new(handler))
    }

    /// Register a job firing whenever `predicate` says so
    pub fn when(
        &mut self,
        predicate: impl Fn(DateTime<Utc>) -> bool + Send + Sync + 'static,
        job: impl Into<JobId>,
        options: EventOptions,
        handler: impl Fn(DateTime<Utc>) -> Result<(), JobError> + Send + Sync + 'static,
    ) -> Result<(), RegisterError> {
        self.register(
            DueStrategy::When(Box::new(predicate)),
            job.into(),
            options,
            Arc::new(handler),
        )
    }

    fn register(
        &mut self,
        strategy: DueStrategy,
        job: JobId,
        options: EventOptions,
        handler: Job,
    ) -> Result<(), RegisterError> {
        let provider: Arc<dyn ConfigProvider> = Arc::clone(&self.config) as _;
        let event = Event::new(provider, strategy, job, options)?;
        info!(job = %event.job(), "registered job");
        self.entries.push(Entry { event, handler });
        Ok(())
    }

    /// Install a callback for handler failures
    pub fn on_error(&mut self, hook: impl Fn(&JobId, &JobError) + Send + Sync + 'static) {
        self.error_hook = Some(Arc::new(hook));
    }

    /// Evaluate every event once against `now` and dispatch the due ones
    ///
    /// Events are evaluated in registration order; each returned `Firing`
    /// names a due event and how its handler was executed.
    pub fn tick(&mut self, now: DateTime<Utc>) -> Vec<Firing> {
        let mut firings = Vec::new();
        for entry in &mut self.entries {
            if !entry.event.is_due(now) {
                continue;
            }
            let job = entry.event.job().clone();
            let outcome = if entry.event.runs_on_thread() {
                self.dispatcher.spawn(
                    job.clone(),
                    Arc::clone(&entry.handler),
                    now,
                    self.error_hook.clone(),
                )
            } else {
                self.dispatcher
                    .run_inline(&job, &entry.handler, now, self.error_hook.as_ref())
            };
            debug!(job = %job, ?outcome, "job fired");
            firings.push(Firing { job, at: now, outcome });
        }
        firings
    }

    /// Registered events, in registration order
    pub fn events(&self) -> impl Iterator<Item = &Event> {
        self.entries.iter().map(|entry| &entry.event)
    }

    /// Join in-flight worker threads
    pub fn shutdown(&mut self) {
        self.dispatcher.join_all();
        info!("manager shut down");
    }
}

#[cfg(test)]
#[path = "manager_tests.rs"]
mod tests;
