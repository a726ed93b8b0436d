//! Periodic timers driving reminder delivery and prompt cleanup.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use log::{error, info, warn};

use crate::core::{PROMPT_MAX_AGE_MS, SCAN_PERIOD_SECS, SWEEP_PERIOD_SECS};
use crate::database::Database;
use crate::features::prompts::PromptStore;
use crate::locale::Phrase;
use crate::platform::ChatApi;

/// Owns the two periodic timers: the due-reminder scan (every minute) and
/// the staleness sweep over unanswered prompts (daily).
pub struct ReminderScheduler {
    database: Database,
    api: Arc<dyn ChatApi>,
    prompts: PromptStore,
}

impl ReminderScheduler {
    pub fn new(database: Database, api: Arc<dyn ChatApi>, prompts: PromptStore) -> Self {
        ReminderScheduler {
            database,
            api,
            prompts,
        }
    }

    /// Run both timers until the process exits. Ticks are handled one at a
    /// time; neither loop overlaps itself.
    pub async fn run(self) {
        info!(
            "Reminder scheduler started (scan every {SCAN_PERIOD_SECS}s, sweep every {SWEEP_PERIOD_SECS}s)"
        );
        let mut scan = tokio::time::interval(Duration::from_secs(SCAN_PERIOD_SECS));
        let mut sweep = tokio::time::interval(Duration::from_secs(SWEEP_PERIOD_SECS));

        loop {
            tokio::select! {
                _ = scan.tick() => self.scan_due(Utc::now().timestamp_millis()).await,
                _ = sweep.tick() => self.sweep_stale(Utc::now().timestamp_millis()).await,
            }
        }
    }

    /// Deliver every reminder due at or before `now_ms`, deleting each row
    /// after a successful send. A failed send leaves the row for the next
    /// scan, so delivery is at-least-once.
    async fn scan_due(&self, now_ms: i64) {
        let due = match self.database.due_reminders(now_ms).await {
            Ok(due) => due,
            Err(e) => {
                error!("Due-reminder scan failed: {e}");
                return;
            }
        };

        for reminder in due {
            let text = Phrase::Remind.text(reminder.lang);
            match self
                .api
                .send_text(reminder.user_id, text, &[], Some(reminder.message))
                .await
            {
                Ok(_) => {
                    info!(
                        "Delivered reminder to user {} (message {})",
                        reminder.user_id, reminder.message
                    );
                    if let Err(e) = self.database.delete_reminder(&reminder.message).await {
                        error!("Failed to delete delivered reminder {}: {e}", reminder.message);
                    }
                }
                Err(e) => {
                    error!(
                        "Failed to deliver reminder to user {} (message {}): {e}",
                        reminder.user_id, reminder.message
                    );
                }
            }
        }
    }

    /// Purge prompts older than the staleness window and flip their
    /// messages to the "no longer actual" text.
    async fn sweep_stale(&self, now_ms: i64) {
        let purged = self.prompts.purge_older_than(now_ms - PROMPT_MAX_AGE_MS);
        if purged.is_empty() {
            return;
        }
        info!("Staleness sweep purged {} prompt(s)", purged.len());

        for prompt in purged {
            let text = Phrase::NoLongerActual.text(prompt.lang);
            if let Err(e) = self.api.edit_text(prompt.prompt, text).await {
                warn!("editText failed for stale prompt {}: {e}", prompt.prompt);
            }
        }
    }
}
