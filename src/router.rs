//! # Event Router
//!
//! Dispatches inbound text messages and widget actions. Text messages get a
//! prompt with delay options; actions resolve against the pending-prompt
//! index and, once a delay is final, turn into a durable scheduled reminder.
//!
//! - **Version**: 1.2.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false

use std::sync::Arc;

use anyhow::Result;
use chrono::{Local, Utc};
use log::{debug, info, warn};

use crate::database::{Database, ScheduledReminder};
use crate::features::prompts::{
    delay_buttons, time_pickers, PendingPrompt, PromptStore, HOUR_SELECT_ID, MINUTE_SELECT_ID,
    SPECIFY_TIME_ID,
};
use crate::features::prompts::store::PickOutcome;
use crate::features::scheduling::{custom_delay_ms, DelayChoice};
use crate::locale::{Lang, Phrase};
use crate::platform::{ActionEvent, ChatApi, InboundMessage, MessageRef};

/// What an inbound action means, after id/value validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PromptAction {
    Delay(DelayChoice),
    SpecifyTime,
    Hour(u8),
    Minute(u8),
    Unknown,
}

impl PromptAction {
    fn classify(event: &ActionEvent) -> PromptAction {
        if let Some(choice) = DelayChoice::from_action_id(&event.widget_id) {
            return PromptAction::Delay(choice);
        }
        let value = |max: u8| {
            event
                .value
                .as_deref()
                .and_then(|v| v.parse::<u8>().ok())
                .filter(|n| *n <= max)
        };
        match event.widget_id.as_str() {
            SPECIFY_TIME_ID => PromptAction::SpecifyTime,
            HOUR_SELECT_ID => value(23).map_or(PromptAction::Unknown, PromptAction::Hour),
            MINUTE_SELECT_ID => value(59).map_or(PromptAction::Unknown, PromptAction::Minute),
            _ => PromptAction::Unknown,
        }
    }
}

pub struct EventRouter {
    api: Arc<dyn ChatApi>,
    prompts: PromptStore,
    database: Database,
}

impl EventRouter {
    pub fn new(api: Arc<dyn ChatApi>, prompts: PromptStore, database: Database) -> Self {
        EventRouter {
            api,
            prompts,
            database,
        }
    }

    /// Handle an inbound private text message.
    pub async fn on_message(&self, msg: &InboundMessage) -> Result<()> {
        let lang = self.resolve_lang(msg.user_id).await;

        if msg.text == "/start" {
            self.api
                .send_text(msg.user_id, Phrase::Welcome.text(lang), &[], None)
                .await?;
            return Ok(());
        }

        let prompt = self
            .api
            .send_text(
                msg.user_id,
                Phrase::WhenToRemind.text(lang),
                &delay_buttons(lang),
                Some(msg.message),
            )
            .await?;

        self.prompts.insert(PendingPrompt::new(
            msg.user_id,
            prompt,
            msg.message,
            lang,
            Utc::now().timestamp_millis(),
        ));
        debug!(
            "Prompted user {} for message {} (prompt {prompt})",
            msg.user_id, msg.message
        );
        Ok(())
    }

    /// Handle a button click or select choice on a previously sent prompt.
    pub async fn on_action(&self, event: &ActionEvent) -> Result<()> {
        match PromptAction::classify(event) {
            PromptAction::Delay(choice) => {
                match self.prompts.take(event.user_id, event.prompt) {
                    Some(prompt) => self.finalize(prompt, choice.delay_ms()).await,
                    None => self.mark_not_actual(event).await,
                }
            }
            PromptAction::SpecifyTime => self.escalate_to_picker(event).await,
            PromptAction::Hour(hour) => {
                let outcome = self.prompts.record_hour(event.user_id, event.prompt, hour);
                self.apply_pick(event, outcome).await
            }
            PromptAction::Minute(minute) => {
                let outcome = self.prompts.record_minute(event.user_id, event.prompt, minute);
                self.apply_pick(event, outcome).await
            }
            PromptAction::Unknown => {
                warn!(
                    "Ignoring unrecognized action '{}' (value {:?}) from user {}",
                    event.widget_id, event.value, event.user_id
                );
                Ok(())
            }
        }
    }

    /// Replace the delay buttons with the hour/minute picker: send the
    /// picker as a new message and move the pending mapping onto it.
    async fn escalate_to_picker(&self, event: &ActionEvent) -> Result<()> {
        let Some(prompt) = self.prompts.get(event.user_id, event.prompt) else {
            return self.mark_not_actual(event).await;
        };

        let picker = self
            .api
            .send_text(
                event.user_id,
                Phrase::ChooseTime.text(prompt.lang),
                &time_pickers(prompt.lang),
                Some(prompt.original),
            )
            .await?;
        self.prompts.retarget(event.user_id, event.prompt, picker);
        self.edit_best_effort(event.prompt, Phrase::ChooseTime.text(prompt.lang))
            .await;
        Ok(())
    }

    async fn apply_pick(&self, event: &ActionEvent, outcome: PickOutcome) -> Result<()> {
        match outcome {
            PickOutcome::Stale => self.mark_not_actual(event).await,
            // Wait for the other half.
            PickOutcome::Partial => Ok(()),
            PickOutcome::Complete {
                prompt,
                hour,
                minute,
            } => match custom_delay_ms(&Local::now(), hour, minute) {
                Some(delay_ms) => self.finalize(prompt, delay_ms).await,
                None => {
                    info!(
                        "Rejected past time-of-day {hour:02}:{minute:02} for user {}",
                        event.user_id
                    );
                    self.edit_best_effort(prompt.prompt, Phrase::TryAgain.text(prompt.lang))
                        .await;
                    Ok(())
                }
            },
        }
    }

    /// Store the reminder row and flip the prompt to its terminal
    /// confirmation text.
    async fn finalize(&self, prompt: PendingPrompt, delay_ms: i64) -> Result<()> {
        let due_at_ms = Utc::now().timestamp_millis() + delay_ms;
        let reminder = ScheduledReminder {
            user_id: prompt.user_id,
            message: prompt.original,
            due_at_ms,
            lang: prompt.lang,
        };
        self.database.add_reminder(&reminder).await?;
        info!(
            "Scheduled reminder for user {} (message {}, due in {}s)",
            prompt.user_id,
            prompt.original,
            delay_ms / 1000
        );
        self.edit_best_effort(prompt.prompt, Phrase::Scheduled.text(prompt.lang))
            .await;
        Ok(())
    }

    /// The acted-on prompt is gone; tell the user and drop the event.
    async fn mark_not_actual(&self, event: &ActionEvent) -> Result<()> {
        debug!(
            "Stale action '{}' on prompt {} from user {}",
            event.widget_id, event.prompt, event.user_id
        );
        let lang = self.resolve_lang(event.user_id).await;
        self.edit_best_effort(event.prompt, Phrase::NoLongerActual.text(lang))
            .await;
        Ok(())
    }

    async fn resolve_lang(&self, user_id: u64) -> Lang {
        match self.api.preferred_languages(user_id).await {
            Ok(tags) => Lang::resolve(&tags),
            Err(e) => {
                debug!("Language lookup failed for user {user_id}: {e}");
                Lang::default()
            }
        }
    }

    async fn edit_best_effort(&self, message: MessageRef, text: &str) {
        if let Err(e) = self.api.edit_text(message, text).await {
            warn!("editText failed for {message}: {e}");
        }
    }
}
