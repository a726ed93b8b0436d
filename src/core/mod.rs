//! # Core Module
//!
//! Configuration and shared constants.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false

pub mod config;

pub use config::Config;

/// One minute in milliseconds.
pub const MINUTE_MS: i64 = 60_000;

/// A prompt that received no answer within this window is considered stale.
pub const PROMPT_MAX_AGE_MS: i64 = 60 * MINUTE_MS;

/// Period of the due-reminder scan.
pub const SCAN_PERIOD_SECS: u64 = 60;

/// Period of the staleness sweep.
pub const SWEEP_PERIOD_SECS: u64 = 24 * 60 * 60;
