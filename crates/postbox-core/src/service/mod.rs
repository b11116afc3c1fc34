//! Core services for mail operations.
//!
//! This module provides the service layer between a front end and the
//! `postbox-api` client. Each operation performs its network calls and maps
//! every fault into its own error type.

pub mod account;
pub mod mail;
pub mod send;

pub use account::{AccountError, login, login_and_fetch_inbox, register};
pub use mail::{
    MailServiceError, delete_from_inbox, delete_message, fetch_detail, list_messages,
    refresh_inbox,
};
pub use send::{
    Delivery, DeliveryOutcome, OutgoingMessage, SendError, SendReport, is_delivery_success,
    parse_recipients, send_message,
};
