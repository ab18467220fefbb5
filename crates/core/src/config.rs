// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Process-wide scheduler configuration
//!
//! A `ManagerConfig` is a cheap `Copy` snapshot. Events read it through the
//! `ConfigProvider` capability once per decision; nothing in the core ever
//! mutates it.

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Process-wide defaults for a scheduler
///
/// Missing keys always mean defaults, never errors. An unknown timezone
/// name is rejected when the config is deserialized, so every `Tz` held
/// here is valid by construction.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct ManagerConfig {
    /// Default execution mode: run handlers on a dedicated thread
    pub thread: bool,
    /// Timezone for local-time elapsed computation (`None` means UTC)
    pub tz: Option<Tz>,
    /// Poll-loop tick interval
    #[serde(with = "humantime_serde")]
    pub sleep_timeout: Duration,
    /// Cap on concurrently live worker threads (a cap, not a pool)
    pub max_threads: usize,
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            thread: false,
            tz: None,
            sleep_timeout: Duration::from_secs(1),
            max_threads: 10,
        }
    }
}

impl ManagerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_thread(mut self, thread: bool) -> Self {
        self.thread = thread;
        self
    }

    pub fn with_tz(mut self, tz: Tz) -> Self {
        self.tz = Some(tz);
        self
    }

    pub fn with_sleep_timeout(mut self, timeout: Duration) -> Self {
        self.sleep_timeout = timeout;
        self
    }

    pub fn with_max_threads(mut self, max: usize) -> Self {
        self.max_threads = max;
        self
    }
}

/// Read-only access to the owning manager's configuration
///
/// Events hold an `Arc<dyn ConfigProvider>` resolved at construction and
/// take one snapshot per decision.
pub trait ConfigProvider: Send + Sync {
    fn configuration(&self) -> ManagerConfig;
}

impl ConfigProvider for ManagerConfig {
    fn configuration(&self) -> ManagerConfig {
        *self
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
