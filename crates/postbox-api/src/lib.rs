//! # postbox-api
//!
//! Typed client for the Postbox mail directory HTTP API.
//!
//! ## Features
//!
//! - **Transport seam**: the [`Transport`] trait issues one request and returns
//!   the raw status and body; [`HttpTransport`] is the `reqwest` implementation
//! - **Typed endpoints**: [`MailApi`] exposes one async method per endpoint
//!   (register, login, list, create, deliver, detail, delete)
//! - **Wire types**: `serde` records matching the server's JSON field names
//!
//! ## Quick Start
//!
//! ```ignore
//! use postbox_api::{MailApi, MessageRequest, RecipientRequest};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), postbox_api::Error> {
//!     let api = MailApi::connect("https://cmsc106.net/mail/", Duration::from_secs(30))?;
//!
//!     let user_id = api.login("alice", "secret").await?;
//!     for message in api.list_messages(&user_id).await? {
//!         println!("{}: {}", message.sender_name, message.subject);
//!     }
//!
//!     let message_id = api
//!         .create_message(&MessageRequest::new("Hi", "Test", &user_id))
//!         .await?;
//!     let status = api
//!         .send_recipient(&RecipientRequest::new(&message_id, "bob"))
//!         .await?;
//!     println!("delivery: {status}");
//!     Ok(())
//! }
//! ```
//!
//! ## Errors
//!
//! Transport faults (connect, timeout, malformed JSON) and unsuccessful HTTP
//! statuses are distinct [`Error`] variants. Nothing is retried.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod client;
mod error;
pub mod transport;
pub mod types;

pub use client::MailApi;
pub use error::{Error, Result};
pub use transport::{ApiRequest, HttpTransport, RawResponse, Transport};
pub use types::{MessageDetail, MessageRequest, MessageResponse, RecipientRequest, User};

/// Re-exported so callers and test transports can build responses.
pub use reqwest::{Method, StatusCode};
