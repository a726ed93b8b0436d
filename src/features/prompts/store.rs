//! Pending-prompt index.
//!
//! Uses DashMap for thread-safe concurrent access, keyed by
//! (user id, prompt message id). Entries only live until the user answers
//! or the staleness sweep purges them.

use std::sync::Arc;

use dashmap::DashMap;

use crate::locale::Lang;
use crate::platform::MessageRef;

/// Where a prompt stands in the delay-selection flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptState {
    /// Fixed-delay buttons are showing.
    AwaitingDelayChoice,
    /// Custom picker is showing, neither half chosen yet.
    AwaitingHourAndMinute,
    /// Minute chosen, hour still missing.
    AwaitingHour { minute: u8 },
    /// Hour chosen, minute still missing.
    AwaitingMinute { hour: u8 },
}

/// A prompt sent to a user that has not been answered yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingPrompt {
    pub user_id: u64,
    /// The prompt message carrying the widgets.
    pub prompt: MessageRef,
    /// The user's message the reminder will quote.
    pub original: MessageRef,
    pub lang: Lang,
    pub created_at_ms: i64,
    pub state: PromptState,
}

impl PendingPrompt {
    pub fn new(
        user_id: u64,
        prompt: MessageRef,
        original: MessageRef,
        lang: Lang,
        created_at_ms: i64,
    ) -> Self {
        PendingPrompt {
            user_id,
            prompt,
            original,
            lang,
            created_at_ms,
            state: PromptState::AwaitingDelayChoice,
        }
    }

    /// Merge a picked hour; returns the complete pair once both are known.
    fn record_hour(&mut self, hour: u8) -> Option<(u8, u8)> {
        match self.state {
            PromptState::AwaitingHour { minute } => Some((hour, minute)),
            _ => {
                self.state = PromptState::AwaitingMinute { hour };
                None
            }
        }
    }

    /// Merge a picked minute; returns the complete pair once both are known.
    fn record_minute(&mut self, minute: u8) -> Option<(u8, u8)> {
        match self.state {
            PromptState::AwaitingMinute { hour } => Some((hour, minute)),
            _ => {
                self.state = PromptState::AwaitingHour { minute };
                None
            }
        }
    }
}

type PromptKey = (u64, MessageRef);

/// Cloneable handle over the shared pending-prompt table.
#[derive(Clone, Default)]
pub struct PromptStore {
    entries: Arc<DashMap<PromptKey, PendingPrompt>>,
}

/// Outcome of merging a partial custom-time pick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickOutcome {
    /// No pending prompt for that message.
    Stale,
    /// One half recorded, the other still missing.
    Partial,
    /// Both halves known; the entry has been removed and is returned.
    Complete {
        prompt: PendingPrompt,
        hour: u8,
        minute: u8,
    },
}

impl PromptStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a prompt, replacing any previous entry for the same message.
    pub fn insert(&self, prompt: PendingPrompt) {
        self.entries.insert((prompt.user_id, prompt.prompt), prompt);
    }

    pub fn get(&self, user_id: u64, prompt: MessageRef) -> Option<PendingPrompt> {
        self.entries.get(&(user_id, prompt)).map(|e| e.clone())
    }

    /// Remove and return the prompt, consuming it.
    pub fn take(&self, user_id: u64, prompt: MessageRef) -> Option<PendingPrompt> {
        self.entries.remove(&(user_id, prompt)).map(|(_, p)| p)
    }

    /// Re-key a prompt onto a newly sent message (the custom-time picker)
    /// and reset its state to await both halves. Returns false when the
    /// original entry no longer exists.
    pub fn retarget(&self, user_id: u64, from: MessageRef, to: MessageRef) -> bool {
        match self.entries.remove(&(user_id, from)) {
            Some((_, mut prompt)) => {
                prompt.prompt = to;
                prompt.state = PromptState::AwaitingHourAndMinute;
                self.entries.insert((user_id, to), prompt);
                true
            }
            None => false,
        }
    }

    /// Merge a picked hour into the prompt's state.
    pub fn record_hour(&self, user_id: u64, prompt: MessageRef, hour: u8) -> PickOutcome {
        self.record_pick(user_id, prompt, |p| p.record_hour(hour))
    }

    /// Merge a picked minute into the prompt's state.
    pub fn record_minute(&self, user_id: u64, prompt: MessageRef, minute: u8) -> PickOutcome {
        self.record_pick(user_id, prompt, |p| p.record_minute(minute))
    }

    fn record_pick(
        &self,
        user_id: u64,
        prompt: MessageRef,
        merge: impl FnOnce(&mut PendingPrompt) -> Option<(u8, u8)>,
    ) -> PickOutcome {
        let key = (user_id, prompt);
        let completed = match self.entries.get_mut(&key) {
            Some(mut entry) => merge(&mut entry),
            None => return PickOutcome::Stale,
        };
        match completed {
            Some((hour, minute)) => match self.entries.remove(&key) {
                Some((_, prompt)) => PickOutcome::Complete {
                    prompt,
                    hour,
                    minute,
                },
                None => PickOutcome::Stale,
            },
            None => PickOutcome::Partial,
        }
    }

    /// Remove and return every prompt created at or before `cutoff_ms`.
    pub fn purge_older_than(&self, cutoff_ms: i64) -> Vec<PendingPrompt> {
        let stale: Vec<PromptKey> = self
            .entries
            .iter()
            .filter(|e| e.created_at_ms <= cutoff_ms)
            .map(|e| *e.key())
            .collect();

        stale
            .into_iter()
            .filter_map(|key| self.entries.remove(&key).map(|(_, p)| p))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prompt(user_id: u64, prompt_id: u64, created_at_ms: i64) -> PendingPrompt {
        PendingPrompt::new(
            user_id,
            MessageRef::new(1, prompt_id),
            MessageRef::new(1, 100 + prompt_id),
            Lang::En,
            created_at_ms,
        )
    }

    #[test]
    fn test_take_consumes_entry() {
        let store = PromptStore::new();
        store.insert(prompt(1, 10, 0));

        assert!(store.take(1, MessageRef::new(1, 10)).is_some());
        assert!(store.take(1, MessageRef::new(1, 10)).is_none());
    }

    #[test]
    fn test_entries_are_per_user() {
        let store = PromptStore::new();
        store.insert(prompt(1, 10, 0));

        assert!(store.get(2, MessageRef::new(1, 10)).is_none());
        assert!(store.get(1, MessageRef::new(1, 10)).is_some());
    }

    #[test]
    fn test_retarget_moves_entry_and_resets_state() {
        let store = PromptStore::new();
        store.insert(prompt(1, 10, 0));

        let picker = MessageRef::new(1, 11);
        assert!(store.retarget(1, MessageRef::new(1, 10), picker));
        assert!(store.get(1, MessageRef::new(1, 10)).is_none());

        let moved = store.get(1, picker).unwrap();
        assert_eq!(moved.prompt, picker);
        assert_eq!(moved.state, PromptState::AwaitingHourAndMinute);
        // original message reference is preserved across the move
        assert_eq!(moved.original, MessageRef::new(1, 110));
    }

    #[test]
    fn test_retarget_of_missing_entry_fails() {
        let store = PromptStore::new();
        assert!(!store.retarget(1, MessageRef::new(1, 10), MessageRef::new(1, 11)));
    }

    #[test]
    fn test_hour_then_minute_completes() {
        let store = PromptStore::new();
        let mut p = prompt(1, 10, 0);
        p.state = PromptState::AwaitingHourAndMinute;
        store.insert(p);
        let mid = MessageRef::new(1, 10);

        assert_eq!(store.record_hour(1, mid, 14), PickOutcome::Partial);
        match store.record_minute(1, mid, 30) {
            PickOutcome::Complete { prompt, hour, minute } => {
                assert_eq!((hour, minute), (14, 30));
                assert_eq!(prompt.original, MessageRef::new(1, 110));
            }
            other => panic!("expected completion, got {other:?}"),
        }
        // completion consumed the entry
        assert_eq!(store.record_minute(1, mid, 30), PickOutcome::Stale);
    }

    #[test]
    fn test_minute_then_hour_completes() {
        let store = PromptStore::new();
        let mut p = prompt(1, 10, 0);
        p.state = PromptState::AwaitingHourAndMinute;
        store.insert(p);
        let mid = MessageRef::new(1, 10);

        assert_eq!(store.record_minute(1, mid, 45), PickOutcome::Partial);
        assert!(matches!(
            store.record_hour(1, mid, 9),
            PickOutcome::Complete { hour: 9, minute: 45, .. }
        ));
    }

    #[test]
    fn test_repicking_the_same_half_stays_partial() {
        let store = PromptStore::new();
        let mut p = prompt(1, 10, 0);
        p.state = PromptState::AwaitingHourAndMinute;
        store.insert(p);
        let mid = MessageRef::new(1, 10);

        assert_eq!(store.record_hour(1, mid, 14), PickOutcome::Partial);
        assert_eq!(store.record_hour(1, mid, 15), PickOutcome::Partial);
        assert!(matches!(
            store.record_minute(1, mid, 0),
            PickOutcome::Complete { hour: 15, minute: 0, .. }
        ));
    }

    #[test]
    fn test_purge_older_than_removes_only_stale() {
        let store = PromptStore::new();
        store.insert(prompt(1, 10, 1_000));
        store.insert(prompt(1, 11, 2_000));
        store.insert(prompt(2, 12, 500));

        let purged = store.purge_older_than(1_000);
        assert_eq!(purged.len(), 2);
        assert_eq!(store.len(), 1);
        assert!(store.get(1, MessageRef::new(1, 11)).is_some());
    }
}
