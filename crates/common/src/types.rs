//! Core message and output types for the command engine.

use serde::{Deserialize, Serialize};

/// Where an incoming message arrived from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Origin {
    /// Direct message to the bot.
    Private,
    /// A shared channel the bot is joined to.
    Public { channel_id: String },
}

/// Where an outbound line is delivered.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Destination {
    /// Direct message to a user.
    User { user_id: String },
    /// Post to a shared channel.
    Channel { channel_id: String },
}

/// One received transport event. Consumed synchronously, never retained.
#[derive(Debug, Clone)]
pub struct IncomingMessage {
    pub sender_id: String,
    pub text: String,
    pub origin: Origin,
}

/// Event identity attached to a bundle by dedup-gated handlers.
///
/// `key` is the storage key for the (channel, topic) pair and `event_id`
/// is the opaque scheduling id the announcement is compared on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Announcement {
    pub key: String,
    pub event_id: String,
}

/// A handler's raw output: two ordered line streams, public and private.
///
/// Insertion order is display order. Empty bundles are valid (silent
/// commands). Handlers append to either or both streams; the router
/// decides final delivery.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputBundle {
    pub public_lines: Vec<String>,
    pub private_lines: Vec<String>,
    /// Set by dedup-gated handlers once they know which event they served.
    pub announcement: Option<Announcement>,
}

impl OutputBundle {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bundle with a single public line.
    #[must_use]
    pub fn public(line: impl Into<String>) -> Self {
        Self {
            public_lines: vec![line.into()],
            ..Self::default()
        }
    }

    /// Bundle with a single private line.
    #[must_use]
    pub fn private(line: impl Into<String>) -> Self {
        Self {
            private_lines: vec![line.into()],
            ..Self::default()
        }
    }

    pub fn push_public(&mut self, line: impl Into<String>) {
        self.public_lines.push(line.into());
    }

    pub fn push_private(&mut self, line: impl Into<String>) {
        self.private_lines.push(line.into());
    }

    #[must_use]
    pub fn with_announcement(mut self, key: impl Into<String>, event_id: impl Into<String>) -> Self {
        self.announcement = Some(Announcement {
            key: key.into(),
            event_id: event_id.into(),
        });
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.public_lines.is_empty() && self.private_lines.is_empty()
    }
}

/// Result of routing one incoming message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// No registered pattern matched. Not an error: most chat traffic is
    /// not a command.
    NoMatch,
    /// A handler ran and produced a bundle.
    Handled {
        command: String,
        bundle: OutputBundle,
    },
}
