//! Session value types.

use crate::agreement::domain::{ActorId, ActorRole};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Authenticated actor for the lifetime of one login.
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    token: String,
    actor_id: ActorId,
    email: String,
    role: ActorRole,
}

impl Session {
    /// Creates a session.
    #[must_use]
    pub fn new(
        token: impl Into<String>,
        actor_id: ActorId,
        email: impl Into<String>,
        role: ActorRole,
    ) -> Self {
        Self {
            token: token.into(),
            actor_id,
            email: email.into(),
            role,
        }
    }

    /// Returns the bearer token.
    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Returns the actor identifier.
    #[must_use]
    pub const fn actor_id(&self) -> ActorId {
        self.actor_id
    }

    /// Returns the actor's email.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Returns the actor's role.
    #[must_use]
    pub const fn role(&self) -> ActorRole {
        self.role
    }
}

// The token never appears in logs.
impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("token", &"<redacted>")
            .field("actor_id", &self.actor_id)
            .field("email", &self.email)
            .field("role", &self.role)
            .finish()
    }
}

/// Login request body.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    email: String,
    password: String,
}

impl Credentials {
    /// Creates login credentials.
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Returns the login email.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Body returned by the login endpoint.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    /// Bearer token.
    pub token: String,
    /// Backend user identifier.
    pub user_id: u64,
    /// User email.
    pub email: String,
    /// User role.
    pub role: ActorRole,
}

impl From<LoginResponse> for Session {
    fn from(response: LoginResponse) -> Self {
        Self::new(
            response.token,
            ActorId::new(response.user_id),
            response.email,
            response.role,
        )
    }
}
