//! Remote gateway port for the agreement resource.

use crate::agreement::domain::{
    ActorRole, Agreement, AgreementDomainError, AgreementId, AgreementPage, MutationRequest,
    PageRequest,
};
use crate::session::Session;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for gateway operations.
pub type GatewayResult<T> = Result<T, GatewayError>;

/// Rendered agreement document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgreementDocument {
    /// Suggested file name.
    pub file_name: String,
    /// Media type reported by the backend.
    pub content_type: String,
    /// Document bytes.
    pub bytes: Vec<u8>,
}

impl AgreementDocument {
    /// File name used when the backend does not suggest one.
    #[must_use]
    pub fn default_file_name(id: AgreementId) -> String {
        format!("convention-stage-{id}.pdf")
    }
}

/// Request/response contract for one actor's view of the agreement
/// resource.
///
/// Implementations perform no caching. Every failure is surfaced to the
/// caller as a distinct [`GatewayError`] variant.
#[async_trait]
pub trait AgreementGateway: Send + Sync {
    /// Lists agreements waiting on the session's role.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::NoPendingQueue`] for roles without a queue,
    /// or transport and status errors.
    async fn fetch_pending(
        &self,
        session: &Session,
        page: PageRequest,
    ) -> GatewayResult<AgreementPage>;

    /// Lists agreements belonging to the session's actor.
    ///
    /// # Errors
    ///
    /// Returns transport and status errors.
    async fn fetch_for_actor(
        &self,
        session: &Session,
        page: PageRequest,
    ) -> GatewayResult<AgreementPage>;

    /// Lists every agreement. Administrators only.
    ///
    /// # Errors
    ///
    /// Returns transport and status errors.
    async fn fetch_all(&self, session: &Session, page: PageRequest)
    -> GatewayResult<AgreementPage>;

    /// Fetches a single agreement.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::NotFound`] for a stale identifier, or
    /// transport and status errors.
    async fn fetch_by_id(&self, session: &Session, id: AgreementId) -> GatewayResult<Agreement>;

    /// Applies a mutation and returns the backend's updated record.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Authorization`] when the actor may not act,
    /// [`GatewayError::NotFound`] for a stale identifier,
    /// [`GatewayError::Validation`] for a refused payload, or transport
    /// errors.
    async fn mutate(
        &self,
        session: &Session,
        id: AgreementId,
        request: &MutationRequest,
    ) -> GatewayResult<Agreement>;

    /// Fetches the rendered agreement document.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::NotFound`] when the document is missing, or
    /// transport and status errors.
    async fn fetch_pdf(&self, session: &Session, id: AgreementId)
    -> GatewayResult<AgreementDocument>;
}

/// Errors returned by gateway implementations.
#[derive(Debug, Clone, Error)]
pub enum GatewayError {
    /// No response was received.
    #[error("network failure: {0}")]
    Network(Arc<dyn std::error::Error + Send + Sync>),

    /// The actor is not permitted to perform the request.
    #[error("not authorised (status {status}): {message}")]
    Authorization {
        /// HTTP status code.
        status: u16,
        /// Backend message.
        message: String,
    },

    /// The requested resource does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// The request payload was refused.
    #[error("validation failed: {0}")]
    Validation(String),

    /// The backend answered with another non-success status.
    #[error("backend error (status {status}): {message}")]
    Server {
        /// HTTP status code.
        status: u16,
        /// Backend message.
        message: String,
    },

    /// The response body could not be decoded.
    #[error("malformed response: {0}")]
    Decode(Arc<dyn std::error::Error + Send + Sync>),

    /// The role has no pending queue.
    #[error("role {0} has no pending agreement queue")]
    NoPendingQueue(ActorRole),
}

impl GatewayError {
    /// Wraps a transport error.
    pub fn network(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Network(Arc::new(err))
    }

    /// Wraps a decoding error.
    pub fn decode(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Decode(Arc::new(err))
    }

    /// Maps a non-success HTTP status to an error variant.
    #[must_use]
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let text = message.into();
        match status {
            401 | 403 => Self::Authorization {
                status,
                message: text,
            },
            404 => Self::NotFound(text),
            400 | 422 => Self::Validation(text),
            _ => Self::Server {
                status,
                message: text,
            },
        }
    }

    /// Returns `true` for failures a silent retry of an idempotent fetch may
    /// cure.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        match self {
            Self::Network(_) => true,
            Self::Server { status, .. } => *status >= 500,
            Self::Authorization { .. }
            | Self::NotFound(_)
            | Self::Validation(_)
            | Self::Decode(_)
            | Self::NoPendingQueue(_) => false,
        }
    }
}

impl From<AgreementDomainError> for GatewayError {
    fn from(err: AgreementDomainError) -> Self {
        Self::Validation(err.to_string())
    }
}
