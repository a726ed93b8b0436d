// Core layer - configuration and shared constants
pub mod core;

// Features layer - all feature modules
pub mod features;

// Infrastructure
pub mod database;
pub mod locale;
pub mod platform;

// Application layer
pub mod router;

// Re-export the items the bot binary wires together
pub use core::Config;
pub use database::{Database, ScheduledReminder};
pub use features::prompts::PromptStore;
pub use features::reminders::ReminderScheduler;
pub use locale::{Lang, Phrase};
pub use platform::{ActionEvent, ChatApi, InboundMessage, MessageRef, SelectOption, Widget};
pub use router::EventRouter;
