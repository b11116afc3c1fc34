//! Inbox model types.

use postbox_api::MessageResponse;
use serde::{Deserialize, Serialize};

/// Server-assigned message id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId(String);

impl MessageId {
    /// Wraps an id without checking it.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Parses an id returned by the create call. Empty ids are not usable.
    #[must_use]
    pub fn parse(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            None
        } else {
            Some(Self(raw))
        }
    }

    /// Returns the id as sent to the server.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for MessageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for MessageId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Summary of a message in a user's inbox.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Message id.
    pub message_id: MessageId,
    /// Receiving user's id.
    pub receiver_id: String,
    /// Sender display name.
    pub sender_name: String,
    /// Subject line.
    pub subject: String,
}

impl From<MessageResponse> for Message {
    fn from(row: MessageResponse) -> Self {
        Self {
            message_id: MessageId::new(row.message_id),
            receiver_id: row.receiver_id,
            sender_name: row.sender_name,
            subject: row.subject,
        }
    }
}
