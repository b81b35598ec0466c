//! Authentication port.

use super::{Credentials, Session};
use crate::agreement::ports::GatewayResult;
use async_trait::async_trait;

/// Exchanges credentials for a [`Session`].
#[async_trait]
pub trait AuthGateway: Send + Sync {
    /// Logs in with `credentials`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::agreement::ports::GatewayError::Authorization`] for
    /// rejected credentials and the other gateway errors for transport
    /// failures.
    async fn login(&self, credentials: &Credentials) -> GatewayResult<Session>;
}
