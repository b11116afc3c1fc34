//! Inbox listing.
//!
//! Provides message summaries and the caller-owned store that holds them.

mod model;
mod store;

pub use model::{Message, MessageId};
pub use store::Inbox;
