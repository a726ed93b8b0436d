//! # Prompts Feature
//!
//! In-memory bookkeeping for outstanding prompts: the per-user index of sent
//! prompts awaiting an answer, the tagged custom-time state machine, and the
//! widget sets attached to outbound prompts.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false

pub mod store;
pub mod widgets;

pub use store::{PendingPrompt, PromptState, PromptStore};
pub use widgets::{delay_buttons, time_pickers, HOUR_SELECT_ID, MINUTE_SELECT_ID, SPECIFY_TIME_ID};
