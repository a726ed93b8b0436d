//! # Database Layer
//!
//! SQLite persistence for scheduled reminders. A single `messages` table
//! holds one row per outstanding reminder, keyed by the two decimal-string
//! halves of the original message reference.
//!
//! The connection is wrapped in an async mutex so the handle can be cloned
//! into the router and the scheduler; statements never cross an await point
//! while the lock is held.
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false

use std::sync::Arc;

use anyhow::{Context, Result};
use sqlite::{Connection, State};
use tokio::sync::Mutex;

use crate::locale::Lang;
use crate::platform::MessageRef;

/// A reminder that survived finalization and awaits delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledReminder {
    pub user_id: u64,
    /// Reference to the original message to quote on delivery.
    pub message: MessageRef,
    /// Absolute due time, Unix millis.
    pub due_at_ms: i64,
    pub lang: Lang,
}

#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    /// Open (or create) the reminder database at the given path.
    pub async fn new(path: &str) -> Result<Self> {
        let connection = sqlite::open(path)
            .with_context(|| format!("failed to open database at {path}"))?;

        connection.execute(
            "CREATE TABLE IF NOT EXISTS messages (
                uid       TEXT NOT NULL,
                msb       TEXT NOT NULL,
                lsb       TEXT NOT NULL,
                timestamp INTEGER NOT NULL,
                lang      TEXT NOT NULL,
                PRIMARY KEY (msb, lsb)
            )",
        )?;

        Ok(Database {
            conn: Arc::new(Mutex::new(connection)),
        })
    }

    /// Open a throwaway in-memory database.
    pub async fn in_memory() -> Result<Self> {
        Self::new(":memory:").await
    }

    /// Insert a scheduled reminder. Re-finalizing the same original message
    /// replaces the previous row.
    pub async fn add_reminder(&self, reminder: &ScheduledReminder) -> Result<()> {
        let conn = self.conn.lock().await;
        let mut statement = conn.prepare(
            "INSERT OR REPLACE INTO messages (uid, msb, lsb, timestamp, lang)
             VALUES (?, ?, ?, ?, ?)",
        )?;
        statement.bind((1, reminder.user_id.to_string().as_str()))?;
        statement.bind((2, reminder.message.msb.to_string().as_str()))?;
        statement.bind((3, reminder.message.lsb.to_string().as_str()))?;
        statement.bind((4, reminder.due_at_ms))?;
        statement.bind((5, reminder.lang.code()))?;
        statement.next()?;
        Ok(())
    }

    /// All reminders with a due timestamp at or before `now_ms`.
    pub async fn due_reminders(&self, now_ms: i64) -> Result<Vec<ScheduledReminder>> {
        let conn = self.conn.lock().await;
        let mut statement = conn.prepare(
            "SELECT uid, msb, lsb, timestamp, lang FROM messages
             WHERE timestamp <= ? ORDER BY timestamp",
        )?;
        statement.bind((1, now_ms))?;

        let mut due = Vec::new();
        while let State::Row = statement.next()? {
            let uid: String = statement.read(0)?;
            let msb: String = statement.read(1)?;
            let lsb: String = statement.read(2)?;
            let timestamp: i64 = statement.read(3)?;
            let lang: String = statement.read(4)?;

            due.push(ScheduledReminder {
                user_id: uid.parse().context("malformed uid column")?,
                message: MessageRef::new(
                    msb.parse().context("malformed msb column")?,
                    lsb.parse().context("malformed lsb column")?,
                ),
                due_at_ms: timestamp,
                lang: Lang::from_code(&lang).unwrap_or_default(),
            });
        }
        Ok(due)
    }

    /// Delete the reminder row for the given original message, if present.
    pub async fn delete_reminder(&self, message: &MessageRef) -> Result<bool> {
        let conn = self.conn.lock().await;
        let mut statement = conn.prepare("DELETE FROM messages WHERE msb = ? AND lsb = ?")?;
        statement.bind((1, message.msb.to_string().as_str()))?;
        statement.bind((2, message.lsb.to_string().as_str()))?;
        statement.next()?;

        let mut changes = conn.prepare("SELECT changes()")?;
        changes.next()?;
        let deleted: i64 = changes.read(0)?;
        Ok(deleted > 0)
    }

    /// Number of outstanding reminder rows.
    pub async fn reminder_count(&self) -> Result<i64> {
        let conn = self.conn.lock().await;
        let mut statement = conn.prepare("SELECT COUNT(*) FROM messages")?;
        statement.next()?;
        Ok(statement.read(0)?)
    }
}
