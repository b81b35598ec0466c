//! Holder for the current session between login and logout.

use super::{AuthGateway, Credentials, Session};
use crate::agreement::ports::GatewayError;
use std::sync::{Arc, RwLock};
use thiserror::Error;

/// Errors returned by [`SessionContext`].
#[derive(Debug, Clone, Error)]
pub enum SessionError {
    /// No actor is logged in.
    #[error("no authenticated session")]
    NotAuthenticated,

    /// Login was refused or failed.
    #[error(transparent)]
    Login(#[from] GatewayError),

    /// The session holder is unusable.
    #[error("session context unavailable: {0}")]
    Unavailable(String),
}

/// Shared, explicit session holder.
///
/// Cloning yields another handle to the same session slot. Controllers do
/// not hold the context; they take a [`Session`] snapshot at construction.
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    current: Arc<RwLock<Option<Session>>>,
}

impl SessionContext {
    /// Creates an empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs `session`, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Unavailable`] when the lock is poisoned.
    pub fn begin(&self, session: Session) -> Result<(), SessionError> {
        let mut slot = self
            .current
            .write()
            .map_err(|err| SessionError::Unavailable(err.to_string()))?;
        tracing::info!(actor_id = %session.actor_id(), role = %session.role(), "session started");
        *slot = Some(session);
        Ok(())
    }

    /// Logs in through `auth` and installs the resulting session.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Login`] when the gateway refuses the
    /// credentials, or [`SessionError::Unavailable`] when the lock is
    /// poisoned.
    pub async fn login<A>(&self, auth: &A, credentials: &Credentials) -> Result<Session, SessionError>
    where
        A: AuthGateway + ?Sized,
    {
        let session = auth.login(credentials).await.inspect_err(|err| {
            tracing::warn!(email = credentials.email(), error = %err, "login failed");
        })?;
        self.begin(session.clone())?;
        Ok(session)
    }

    /// Clears the current session.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Unavailable`] when the lock is poisoned.
    pub fn logout(&self) -> Result<(), SessionError> {
        let mut slot = self
            .current
            .write()
            .map_err(|err| SessionError::Unavailable(err.to_string()))?;
        if let Some(previous) = slot.take() {
            tracing::info!(actor_id = %previous.actor_id(), "session ended");
        }
        Ok(())
    }

    /// Returns a snapshot of the current session.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NotAuthenticated`] when nobody is logged in.
    pub fn current(&self) -> Result<Session, SessionError> {
        let slot = self
            .current
            .read()
            .map_err(|err| SessionError::Unavailable(err.to_string()))?;
        slot.clone().ok_or(SessionError::NotAuthenticated)
    }

    /// Returns `true` when a session is installed.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.current.read().is_ok_and(|slot| slot.is_some())
    }
}
