//! # postbox-core
//!
//! Core services for the `Postbox` mail client.
//!
//! This crate provides:
//! - Account registration and login, with empty server ids turned into
//!   explicit failures
//! - A caller-owned [`Inbox`] store and the listing operations that fill it
//! - The message-send workflow: create once, deliver to every recipient,
//!   report partial failures
//! - Message detail lookup and per-user deletion
//! - Client configuration (TOML file, environment, defaults)
//!
//! Every operation is an `async fn` over a [`postbox_api::MailApi`] and
//! returns a `Result` whose error displays a human-readable reason.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod account;
pub mod config;
mod error;
pub mod inbox;
pub mod service;

pub use account::{Session, SessionId};
pub use config::ClientConfig;
pub use error::{Error, Result};
pub use inbox::{Inbox, Message, MessageId};
pub use postbox_api::{MailApi, MessageDetail};
pub use service::{
    AccountError, Delivery, DeliveryOutcome, MailServiceError, OutgoingMessage, SendError,
    SendReport, delete_from_inbox, delete_message, fetch_detail, is_delivery_success,
    list_messages, login, login_and_fetch_inbox, parse_recipients, refresh_inbox, register,
    send_message,
};
