#![forbid(unsafe_code)]

//! Deterministic test harness for uimonkey.
//!
//! [`TestScene`] implements [`Scene`](uimonkey_core::Scene) over an in-memory
//! node arena with scripted reactions and timed mutations, and
//! [`capture_logs`] records `tracing` output for assertions. Pair a
//! `TestScene` with [`Driver::manual`](uimonkey_core::Driver::manual) to get
//! fully reproducible runs.

pub mod capture;
pub mod fixtures;
pub mod scene;

pub use capture::{CapturedEvent, CapturedLogs, capture_logs};
pub use fixtures::{DemoIds, demo_canvas, single_button};
pub use scene::{NodeSpec, Reaction, RecordedEvent, ScheduledAction, TestScene};
