//! Message send workflow.
//!
//! Sending is one create call followed by one delivery call per recipient.
//! Deliveries are attempted in order and independently: a failed recipient
//! neither stops the loop nor undoes earlier deliveries.

use postbox_api::{MailApi, MessageRequest, RecipientRequest, Transport};
use tracing::{info, warn};

use crate::account::SessionId;
use crate::inbox::MessageId;

/// Token a delivery status must contain, ignoring ASCII case.
const SUCCESS_TOKEN: &str = "success";

/// Returns true if a delivery status reports success.
///
/// The server answers deliveries with free text; any text containing
/// "success" in any letter case counts.
#[must_use]
pub fn is_delivery_success(status: &str) -> bool {
    status.to_ascii_lowercase().contains(SUCCESS_TOKEN)
}

/// Split a comma-separated recipient field into trimmed ids.
///
/// Blank entries are dropped, so `""` yields no recipients.
#[must_use]
pub fn parse_recipients(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .map(ToString::to_string)
        .collect()
}

/// Errors that can end a send attempt.
#[derive(Debug, thiserror::Error)]
pub enum SendError {
    /// The server rejected message creation.
    #[error("failed to create message")]
    CreateRejected {
        /// HTTP status of the create call.
        status: u16,
    },

    /// The server accepted creation but returned no id.
    #[error("failed to create message")]
    EmptyMessageId,

    /// The create call did not complete.
    #[error("an error occurred: {0}")]
    Transport(#[source] postbox_api::Error),

    /// The message exists but some deliveries failed.
    #[error("failed to send to some recipients")]
    PartialDelivery(SendReport),
}

impl SendError {
    /// Returns the created message id, if creation succeeded.
    #[must_use]
    pub const fn message_id(&self) -> Option<&MessageId> {
        match self {
            Self::PartialDelivery(report) => Some(&report.message_id),
            _ => None,
        }
    }

    /// Returns the per-recipient report, if creation succeeded.
    #[must_use]
    pub const fn report(&self) -> Option<&SendReport> {
        match self {
            Self::PartialDelivery(report) => Some(report),
            _ => None,
        }
    }
}

/// Result of one delivery call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryOutcome {
    /// The server reported success.
    Delivered(String),
    /// The server answered without reporting success.
    Refused(String),
    /// The call failed or returned an unsuccessful status.
    Failed(String),
}

/// Outcome for one recipient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    /// Recipient id.
    pub recipient: String,
    /// What happened.
    pub outcome: DeliveryOutcome,
}

impl Delivery {
    /// Returns true if the message reached this recipient.
    #[must_use]
    pub const fn is_delivered(&self) -> bool {
        matches!(self.outcome, DeliveryOutcome::Delivered(_))
    }
}

/// Created message id plus one entry per recipient, in request order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendReport {
    /// Id assigned by the create call.
    pub message_id: MessageId,
    /// Per-recipient outcomes.
    pub deliveries: Vec<Delivery>,
}

impl SendReport {
    /// Returns true if every recipient was reached. Vacuously true with no
    /// recipients.
    #[must_use]
    pub fn all_delivered(&self) -> bool {
        self.deliveries.iter().all(Delivery::is_delivered)
    }

    /// Recipients that were reached.
    pub fn delivered(&self) -> impl Iterator<Item = &Delivery> {
        self.deliveries.iter().filter(|d| d.is_delivered())
    }

    /// Recipients that were not reached.
    pub fn failed(&self) -> impl Iterator<Item = &Delivery> {
        self.deliveries.iter().filter(|d| !d.is_delivered())
    }
}

/// A message to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMessage {
    /// Sender's user id.
    pub sender: SessionId,
    /// Recipient user ids.
    pub recipients: Vec<String>,
    /// Subject line.
    pub subject: String,
    /// Body text.
    pub body: String,
}

impl OutgoingMessage {
    /// Creates a new outgoing message with no recipients.
    #[must_use]
    pub fn new(sender: SessionId, subject: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            sender,
            recipients: Vec::new(),
            subject: subject.into(),
            body: body.into(),
        }
    }

    /// Adds a recipient.
    #[must_use]
    pub fn to(mut self, recipient: impl Into<String>) -> Self {
        self.recipients.push(recipient.into());
        self
    }

    /// Adds several recipients.
    #[must_use]
    pub fn to_all<I, S>(mut self, recipients: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.recipients
            .extend(recipients.into_iter().map(Into::into));
        self
    }
}

/// Create a message and deliver it to every recipient.
///
/// With no recipients the message is created and the send succeeds with an
/// empty report.
///
/// # Errors
///
/// Returns [`SendError::CreateRejected`], [`SendError::EmptyMessageId`] or
/// [`SendError::Transport`] if the message could not be created; no delivery
/// is attempted then. Returns [`SendError::PartialDelivery`] if at least one
/// delivery failed.
pub async fn send_message<T: Transport>(
    api: &MailApi<T>,
    message: &OutgoingMessage,
) -> Result<SendReport, SendError> {
    let request = MessageRequest::new(
        message.subject.as_str(),
        message.body.as_str(),
        message.sender.as_str(),
    );

    let raw_id = match api.create_message(&request).await {
        Ok(raw_id) => raw_id,
        Err(postbox_api::Error::Status { status, .. }) => {
            warn!(status, sender = %message.sender, "Message creation rejected");
            return Err(SendError::CreateRejected { status });
        }
        Err(e) => {
            warn!(error = %e, sender = %message.sender, "Message creation failed");
            return Err(SendError::Transport(e));
        }
    };

    let Some(message_id) = MessageId::parse(raw_id) else {
        warn!(sender = %message.sender, "Message created without an id");
        return Err(SendError::EmptyMessageId);
    };
    info!(
        message_id = %message_id,
        recipients = message.recipients.len(),
        "Created message"
    );

    let mut deliveries = Vec::with_capacity(message.recipients.len());
    for recipient in &message.recipients {
        let outcome = deliver(api, &message_id, recipient).await;
        deliveries.push(Delivery {
            recipient: recipient.clone(),
            outcome,
        });
    }

    let report = SendReport {
        message_id,
        deliveries,
    };

    if report.all_delivered() {
        Ok(report)
    } else {
        Err(SendError::PartialDelivery(report))
    }
}

/// Deliver to a single recipient. Never fails; faults become an outcome.
async fn deliver<T: Transport>(
    api: &MailApi<T>,
    message_id: &MessageId,
    recipient: &str,
) -> DeliveryOutcome {
    let request = RecipientRequest::new(message_id.as_str(), recipient);

    match api.send_recipient(&request).await {
        Ok(status) if is_delivery_success(&status) => {
            info!(recipient, "Successfully sent");
            DeliveryOutcome::Delivered(status)
        }
        Ok(status) => {
            warn!(recipient, status = %status, "Failed to send");
            DeliveryOutcome::Refused(status)
        }
        Err(e) => {
            warn!(recipient, error = %e, "Failed to send");
            DeliveryOutcome::Failed(e.to_string())
        }
    }
}
