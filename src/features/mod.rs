// Features layer - all feature modules
pub mod prompts;
pub mod reminders;
pub mod scheduling;
