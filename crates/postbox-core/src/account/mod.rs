//! Account identity.
//!
//! The server identifies a logged-in user by a bare id string. It is both
//! the session handle and the user id for every later call.

mod model;

pub use model::{Session, SessionId};
