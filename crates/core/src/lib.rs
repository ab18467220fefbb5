// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! tempo-core: decision core of the tempo periodic task scheduler
//!
//! This crate provides:
//! - Timezone-aware due-ness decisions for recurring jobs (DST-correct)
//! - Execution-mode resolution (inline vs. dedicated worker thread)
//! - A `Manager` that registers jobs and drives one poll tick at a time
//! - A `Dispatcher` that runs due jobs inline or on capped worker threads
//!
//! The library is synchronous; the `tempod` daemon supplies the ticker.

pub mod clock;
pub mod config;

pub mod dispatch;
pub mod event;
pub mod manager;

// Re-exports
pub use clock::{Clock, FakeClock, SystemClock};
pub use config::{ConfigProvider, ManagerConfig};
pub use dispatch::{DispatchOutcome, Dispatcher};
pub use event::{DueStrategy, Event, EventOptions, JobId, RegisterError};
pub use manager::{Firing, Job, JobError, Manager};
