//! Mail service for listing, reading and deleting messages.

use postbox_api::{MailApi, MessageDetail, Transport};
use tracing::{debug, info, warn};

use crate::account::SessionId;
use crate::inbox::{Inbox, Message};

/// Errors that can occur during mail operations.
#[derive(Debug, thiserror::Error)]
pub enum MailServiceError {
    /// Listing failed.
    #[error("Failed to load messages: {0}")]
    List(#[source] postbox_api::Error),

    /// Detail lookup failed.
    #[error("Failed to load message details.")]
    LoadFailed(#[source] postbox_api::Error),

    /// Deletion failed.
    #[error("Failed to delete the message.")]
    DeleteFailed(#[source] postbox_api::Error),
}

/// Fetch the messages addressed to a user, in server order.
///
/// # Errors
///
/// Returns an error if the request fails or the listing is malformed.
pub async fn list_messages<T: Transport>(
    api: &MailApi<T>,
    user_id: &SessionId,
) -> Result<Vec<Message>, MailServiceError> {
    let rows = api.list_messages(user_id.as_str()).await.map_err(|e| {
        warn!(user_id = %user_id, error = %e, "Failed to list messages");
        MailServiceError::List(e)
    })?;

    debug!(user_id = %user_id, count = rows.len(), "Listed messages");
    Ok(rows.into_iter().map(Message::from).collect())
}

/// Reload an inbox from the server.
///
/// Returns the new message count. On error the inbox is left unchanged.
///
/// # Errors
///
/// Returns an error if the listing fails.
pub async fn refresh_inbox<T: Transport>(
    api: &MailApi<T>,
    inbox: &mut Inbox,
) -> Result<usize, MailServiceError> {
    let messages = list_messages(api, inbox.owner()).await?;
    inbox.replace(messages);
    Ok(inbox.len())
}

/// Fetch the full content of a message.
///
/// # Errors
///
/// Returns [`MailServiceError::LoadFailed`] for any transport, status or
/// decoding failure.
pub async fn fetch_detail<T: Transport>(
    api: &MailApi<T>,
    message_id: &str,
) -> Result<MessageDetail, MailServiceError> {
    api.message_detail(message_id).await.map_err(|e| {
        warn!(message_id, error = %e, "Failed to load message details");
        MailServiceError::LoadFailed(e)
    })
}

/// Delete a message for one user on the server.
///
/// Other recipients of the same message keep their copy.
///
/// # Errors
///
/// Returns [`MailServiceError::DeleteFailed`] if the request fails.
pub async fn delete_message<T: Transport>(
    api: &MailApi<T>,
    user_id: &SessionId,
    message_id: &str,
) -> Result<(), MailServiceError> {
    api.delete_message(user_id.as_str(), message_id)
        .await
        .map_err(|e| {
            warn!(user_id = %user_id, message_id, error = %e, "Failed to delete message");
            MailServiceError::DeleteFailed(e)
        })?;

    info!(user_id = %user_id, message_id, "Deleted message");
    Ok(())
}

/// Delete a message for the inbox owner and drop it from the inbox.
///
/// The inbox is only changed if the server accepted the deletion.
///
/// # Errors
///
/// Returns [`MailServiceError::DeleteFailed`] if the request fails.
pub async fn delete_from_inbox<T: Transport>(
    api: &MailApi<T>,
    inbox: &mut Inbox,
    message_id: &str,
) -> Result<(), MailServiceError> {
    delete_message(api, inbox.owner(), message_id).await?;
    inbox.remove(message_id);
    Ok(())
}
