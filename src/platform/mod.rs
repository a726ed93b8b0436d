//! # Platform Layer
//!
//! Platform-neutral event and message types plus the [`ChatApi`] trait the
//! router and scheduler talk through. The Discord binding lives in the bot
//! binary; tests use a mock implementation.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false

use std::fmt;

use anyhow::Result;
use async_trait::async_trait;

/// A 128-bit message reference carried as two unsigned 64-bit halves.
///
/// The Discord adapter packs the channel id into `msb` and the message id
/// into `lsb`; together they are enough to edit a message or reply to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MessageRef {
    pub msb: u64,
    pub lsb: u64,
}

impl MessageRef {
    pub fn new(msb: u64, lsb: u64) -> Self {
        MessageRef { msb, lsb }
    }
}

impl fmt::Display for MessageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.msb, self.lsb)
    }
}

/// An inbound private text message.
#[derive(Debug, Clone)]
pub struct InboundMessage {
    pub user_id: u64,
    pub message: MessageRef,
    pub text: String,
}

/// An inbound interactive action: a button click or a select choice made on
/// a previously sent prompt.
#[derive(Debug, Clone)]
pub struct ActionEvent {
    pub user_id: u64,
    /// The prompt message the widget belongs to.
    pub prompt: MessageRef,
    /// Identifier of the clicked button or select widget.
    pub widget_id: String,
    /// Chosen option value, present for selects only.
    pub value: Option<String>,
}

/// One option of a select widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub label: String,
    pub value: String,
}

/// An interactive widget attached to an outbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Widget {
    Button {
        id: String,
        label: String,
    },
    Select {
        id: String,
        label: String,
        options: Vec<SelectOption>,
    },
}

impl Widget {
    pub fn id(&self) -> &str {
        match self {
            Widget::Button { id, .. } | Widget::Select { id, .. } => id,
        }
    }
}

/// Outbound surface of the messaging platform.
///
/// Mirrors the three calls the bot needs: send a text (optionally with
/// widgets and a reply-to reference), edit the text of an existing message,
/// and look up a user's preferred languages.
#[async_trait]
pub trait ChatApi: Send + Sync {
    /// Send a text message to a user; returns the sent message's reference.
    async fn send_text(
        &self,
        user_id: u64,
        text: &str,
        widgets: &[Widget],
        reply_to: Option<MessageRef>,
    ) -> Result<MessageRef>;

    /// Replace the text of an existing message.
    async fn edit_text(&self, message: MessageRef, text: &str) -> Result<()>;

    /// The user's preferred-language tags, most preferred first. May be
    /// empty when the platform has not reported anything yet.
    async fn preferred_languages(&self, user_id: u64) -> Result<Vec<String>>;
}
