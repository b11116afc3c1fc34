//! Caller-owned inbox store.

use super::model::Message;
use crate::account::SessionId;

/// The message listing of one user.
///
/// Mutated only through `&mut`, by the listing and deletion operations or by
/// the caller directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inbox {
    owner: SessionId,
    messages: Vec<Message>,
}

impl Inbox {
    /// Creates an empty inbox for a user.
    #[must_use]
    pub const fn new(owner: SessionId) -> Self {
        Self {
            owner,
            messages: Vec::new(),
        }
    }

    /// Creates an inbox holding an existing listing.
    #[must_use]
    pub const fn with_messages(owner: SessionId, messages: Vec<Message>) -> Self {
        Self { owner, messages }
    }

    /// Returns the user this inbox belongs to.
    #[must_use]
    pub const fn owner(&self) -> &SessionId {
        &self.owner
    }

    /// Returns the messages in server order.
    #[must_use]
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Iterates over the messages in server order.
    pub fn iter(&self) -> std::slice::Iter<'_, Message> {
        self.messages.iter()
    }

    /// Number of messages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Returns true if there are no messages.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Finds a message by id.
    #[must_use]
    pub fn get(&self, message_id: &str) -> Option<&Message> {
        self.messages
            .iter()
            .find(|m| m.message_id.as_str() == message_id)
    }

    /// Replaces the listing.
    pub fn replace(&mut self, messages: Vec<Message>) {
        self.messages = messages;
    }

    /// Removes a message. Returns true if it was present.
    pub fn remove(&mut self, message_id: &str) -> bool {
        let before = self.messages.len();
        self.messages.retain(|m| m.message_id.as_str() != message_id);
        self.messages.len() != before
    }
}

impl<'a> IntoIterator for &'a Inbox {
    type Item = &'a Message;
    type IntoIter = std::slice::Iter<'a, Message>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
