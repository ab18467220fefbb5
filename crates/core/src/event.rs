// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Event state machine for due-ness decisions
//!
//! An `Event` is one registered recurring job's scheduling state. It answers
//! two questions: is the job due as of `now`, and should it run on a worker
//! thread. Elapsed time is measured on localized wall-clock representations,
//! so a period straddling a DST transition is judged by local elapsed time
//! rather than absolute elapsed time.

use crate::config::ConfigProvider;
use chrono::{DateTime, TimeDelta, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Unique identifier for a registered job
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JobId(pub String);

impl JobId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for JobId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for JobId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Custom due-check predicate, fully responsible for its own bookkeeping
pub type Predicate = Box<dyn Fn(DateTime<Utc>) -> bool + Send + Sync>;

/// How an event decides it is due
///
/// Resolved once at construction; either a fixed period or a caller-supplied
/// predicate. The two arms make "neither period nor predicate"
/// unrepresentable.
pub enum DueStrategy {
    /// Due when the local elapsed time since the last firing reaches the period
    Every(std::time::Duration),
    /// Due whenever the predicate says so
    When(Predicate),
}

impl fmt::Debug for DueStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DueStrategy::Every(period) => f.debug_tuple("Every").field(period).finish(),
            DueStrategy::When(_) => f.debug_tuple("When").field(&"<predicate>").finish(),
        }
    }
}

/// Per-event options, each overriding or inheriting the manager default
#[derive(Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EventOptions {
    /// Per-event execution-mode override; `None` inherits the manager default
    pub thread: Option<bool>,
    /// Suppress the very first firing, establishing a baseline instead
    pub skip_first_run: bool,
    /// Per-event timezone override; `None` inherits the manager's
    pub tz: Option<Tz>,
}

impl EventOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_thread(mut self, thread: bool) -> Self {
        self.thread = Some(thread);
        self
    }

    pub fn skip_first_run(mut self) -> Self {
        self.skip_first_run = true;
        self
    }

    pub fn with_tz(mut self, tz: Tz) -> Self {
        self.tz = Some(tz);
        self
    }
}

impl fmt::Debug for EventOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventOptions")
            .field("thread", &self.thread)
            .field("skip_first_run", &self.skip_first_run)
            .field("tz", &self.tz)
            .finish()
    }
}

/// Errors surfaced when registering an event
#[derive(Debug, Error)]
pub enum RegisterError {
    #[error("period out of range: {0:?}")]
    PeriodOutOfRange(std::time::Duration),
}

/// Validated due-check strategy held by an event
enum Strategy {
    Every(TimeDelta),
    When(Predicate),
}

/// One registered recurring job's scheduling state
///
/// Holds the decision state only; the job's handler lives with the manager.
/// `last_run` means "last accepted firing or skip-first baseline" and is
/// mutated exclusively inside `is_due`. `is_due` takes `&mut self`, so
/// serialized evaluation per event is a compile-time property;
/// `runs_on_thread` is reentrant and side-effect-free.
pub struct Event {
    job: JobId,
    strategy: Strategy,
    options: EventOptions,
    provider: Arc<dyn ConfigProvider>,
    last_run: Option<DateTime<Utc>>,
    evaluated: bool,
}

impl Event {
    /// Create an event; the period must be representable as a `TimeDelta`
    pub fn new(
        provider: Arc<dyn ConfigProvider>,
        strategy: DueStrategy,
        job: JobId,
        options: EventOptions,
    ) -> Result<Self, RegisterError> {
        let strategy = match strategy {
            DueStrategy::Every(period) => Strategy::Every(
                TimeDelta::from_std(period).map_err(|_| RegisterError::PeriodOutOfRange(period))?,
            ),
            DueStrategy::When(predicate) => Strategy::When(predicate),
        };
        Ok(Self {
            job,
            strategy,
            options,
            provider,
            last_run: None,
            evaluated: false,
        })
    }

    pub fn job(&self) -> &JobId {
        &self.job
    }

    /// Timestamp of the last accepted firing (or skip-first baseline)
    pub fn last_run(&self) -> Option<DateTime<Utc>> {
        self.last_run
    }

    /// Resolve the execution mode: event override, else manager default
    ///
    /// An explicit event-level value wins in both directions, including
    /// `false` over a manager default of `true`.
    pub fn runs_on_thread(&self) -> bool {
        match self.options.thread {
            Some(thread) => thread,
            None => self.provider.configuration().thread,
        }
    }

    /// Decide whether the job is due as of `now`, recording the firing
    ///
    /// The first-evaluation marker is consumed on every call regardless of
    /// outcome, so `skip_first_run` suppresses exactly the first call. When
    /// due, the absolute `now` is stored as `last_run`; a not-due call
    /// leaves `last_run` untouched.
    pub fn is_due(&mut self, now: DateTime<Utc>) -> bool {
        let first = !self.evaluated;
        self.evaluated = true;

        if first && self.options.skip_first_run {
            self.last_run = Some(now);
            return false;
        }

        match &self.strategy {
            Strategy::When(predicate) => predicate(now),
            Strategy::Every(period) => {
                let Some(last) = self.last_run else {
                    // Never fired: infinitely overdue.
                    self.last_run = Some(now);
                    return true;
                };
                let tz = self.effective_tz();
                // Subtract the localized wall-clock representations, not the
                // absolute instants. Across a DST boundary the local delta
                // differs from the absolute delta by the offset shift, and
                // due-ness follows local elapsed time.
                let elapsed = now.with_timezone(&tz).naive_local() - last.with_timezone(&tz).naive_local();
                if elapsed >= *period {
                    self.last_run = Some(now);
                    true
                } else {
                    false
                }
            }
        }
    }

    fn effective_tz(&self) -> Tz {
        self.options
            .tz
            .or(self.provider.configuration().tz)
            .unwrap_or(Tz::UTC)
    }
}

impl fmt::Debug for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Event")
            .field("job", &self.job)
            .field("options", &self.options)
            .field("last_run", &self.last_run)
            .field("evaluated", &self.evaluated)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
