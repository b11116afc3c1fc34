//! Request and response records, named as the server names them.

use serde::{Deserialize, Serialize};

/// Registration payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// User name.
    pub name: String,
    /// Password.
    pub password: String,
}

impl User {
    /// Creates a registration payload.
    #[must_use]
    pub fn new(name: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            password: password.into(),
        }
    }
}

/// Payload that creates a message. The server assigns its id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageRequest {
    /// Subject line.
    pub subject: String,
    /// Body text.
    pub body: String,
    /// Sender's user id.
    pub sender: String,
}

impl MessageRequest {
    /// Creates a message payload.
    #[must_use]
    pub fn new(
        subject: impl Into<String>,
        body: impl Into<String>,
        sender: impl Into<String>,
    ) -> Self {
        Self {
            subject: subject.into(),
            body: body.into(),
            sender: sender.into(),
        }
    }
}

/// Payload that delivers an existing message to one recipient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipientRequest {
    /// Message id returned by the create call.
    pub message: String,
    /// Recipient's user id.
    pub recipient: String,
}

impl RecipientRequest {
    /// Creates a delivery payload.
    #[must_use]
    pub fn new(message: impl Into<String>, recipient: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            recipient: recipient.into(),
        }
    }
}

/// One row of a user's inbox listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Message id.
    #[serde(rename = "message")]
    pub message_id: String,
    /// Receiving user's id.
    #[serde(rename = "receiver")]
    pub receiver_id: String,
    /// Sender display name.
    #[serde(rename = "sender")]
    pub sender_name: String,
    /// Subject line.
    pub subject: String,
}

/// Full content of a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageDetail {
    /// Subject line.
    pub subject: String,
    /// Body text.
    pub body: String,
    /// Send timestamp, as formatted by the server.
    pub sent: String,
    /// Sender.
    pub sender: String,
    /// Message id.
    pub idmessage: String,
}
