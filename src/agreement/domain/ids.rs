//! Identifier types for the agreement domain.

use super::AgreementDomainError;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Server-assigned agreement identifier.
///
/// Identifiers are positive integers; zero is rejected at construction and
/// when decoding wire payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct AgreementId(u64);

impl AgreementId {
    /// Creates a validated agreement identifier.
    ///
    /// # Errors
    ///
    /// Returns [`AgreementDomainError::InvalidAgreementId`] when the value is
    /// zero.
    pub const fn new(value: u64) -> Result<Self, AgreementDomainError> {
        if value == 0 {
            return Err(AgreementDomainError::InvalidAgreementId(value));
        }
        Ok(Self(value))
    }

    /// Returns the underlying numeric value.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl<'de> Deserialize<'de> for AgreementId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = u64::deserialize(deserializer)?;
        Self::new(raw).map_err(serde::de::Error::custom)
    }
}

impl TryFrom<u64> for AgreementId {
    type Error = AgreementDomainError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for AgreementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of the authenticated user acting on agreements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActorId(u64);

impl ActorId {
    /// Wraps a backend user identifier.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the underlying numeric value.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
