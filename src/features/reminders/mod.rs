//! # Reminders Feature
//!
//! Periodic delivery of due reminders and purging of stale prompts.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false

pub mod scheduler;

pub use scheduler::ReminderScheduler;
