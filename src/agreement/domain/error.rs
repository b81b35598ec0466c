//! Error types for agreement domain validation and parsing.

use super::AgreementId;
use thiserror::Error;

/// Errors returned while constructing agreement domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AgreementDomainError {
    /// The agreement identifier is not a positive integer.
    #[error("invalid agreement id {0}, expected a positive integer")]
    InvalidAgreementId(u64),

    /// A rejection was requested without a reason.
    #[error("rejecting agreement {0} requires a non-blank reason")]
    MissingRejectionReason(AgreementId),

    /// The page size is zero.
    #[error("page size must be positive")]
    InvalidPageSize,
}

/// Error returned while parsing actor roles.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown actor role: {0}")]
pub struct ParseActorRoleError(pub String);

/// Error returned while parsing agreement action names.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown agreement action: {0}")]
pub struct ParseAgreementActionError(pub String);
