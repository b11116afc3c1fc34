//! Registration and login.

use postbox_api::{MailApi, Transport, User};
use tracing::{info, warn};

use super::mail::{MailServiceError, list_messages};
use crate::account::{Session, SessionId};
use crate::inbox::Inbox;

/// Errors that can occur during account operations.
#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    /// The server answered login with an empty id.
    #[error("Username or password is incorrect.")]
    InvalidCredentials,

    /// Login request failed.
    #[error("Username or password is wrong")]
    LoginFailed(#[source] postbox_api::Error),

    /// The server answered registration with an empty id.
    #[error("Registration refused: the name may already be taken")]
    RegistrationRefused,

    /// Registration request failed.
    #[error("Registration failed: {0}")]
    RegistrationFailed(#[source] postbox_api::Error),

    /// Logged in, but the inbox could not be loaded.
    #[error("{0}")]
    Inbox(#[from] MailServiceError),
}

/// Register a new user.
///
/// # Errors
///
/// Returns [`AccountError::RegistrationRefused`] if the server returns an
/// empty id, or [`AccountError::RegistrationFailed`] if the request fails.
pub async fn register<T: Transport>(
    api: &MailApi<T>,
    name: &str,
    password: &str,
) -> Result<Session, AccountError> {
    let raw = api
        .register(&User::new(name, password))
        .await
        .map_err(|e| {
            warn!(name, error = %e, "Registration request failed");
            AccountError::RegistrationFailed(e)
        })?;

    let id = SessionId::parse(raw).ok_or_else(|| {
        warn!(name, "Registration refused");
        AccountError::RegistrationRefused
    })?;

    info!(name, user_id = %id, "Registered user");
    Ok(Session::new(id, name))
}

/// Log in with a name and password.
///
/// # Errors
///
/// Returns [`AccountError::InvalidCredentials`] if the server returns an
/// empty id, or [`AccountError::LoginFailed`] if the request fails.
pub async fn login<T: Transport>(
    api: &MailApi<T>,
    name: &str,
    password: &str,
) -> Result<Session, AccountError> {
    let raw = api.login(name, password).await.map_err(|e| {
        warn!(name, error = %e, "Login request failed");
        AccountError::LoginFailed(e)
    })?;

    let id = SessionId::parse(raw).ok_or_else(|| {
        warn!(name, "Login rejected");
        AccountError::InvalidCredentials
    })?;

    info!(name, user_id = %id, "Logged in");
    Ok(Session::new(id, name))
}

/// Log in and load the user's inbox, as one action.
///
/// # Errors
///
/// Returns the login error, or [`AccountError::Inbox`] if the listing fails
/// after a successful login.
pub async fn login_and_fetch_inbox<T: Transport>(
    api: &MailApi<T>,
    name: &str,
    password: &str,
) -> Result<(Session, Inbox), AccountError> {
    let session = login(api, name, password).await?;
    let messages = list_messages(api, &session.id).await?;
    let inbox = Inbox::with_messages(session.id.clone(), messages);
    Ok((session, inbox))
}
