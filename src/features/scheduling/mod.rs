//! # Scheduling Feature
//!
//! Delay resolution: fixed delay choices and custom hour/minute arithmetic,
//! plus the option lists for the custom-time picker.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false

pub mod delay;
pub mod options;

pub use delay::{custom_delay_ms, DelayChoice};
pub use options::{hour_options, minute_options};
