//! User-level commands issued against a listed agreement.

use crate::agreement::domain::{
    AgreementAction, AgreementDomainError, AgreementId, MutationRequest,
};

/// What the actor asked to do, before payload validation.
///
/// Reasons are kept as raw input; [`AgreementCommand::to_request`] decides
/// whether they are acceptable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AgreementCommand {
    /// Student signature.
    Sign,
    /// Company signature.
    SignCompany,
    /// Faculty decision.
    Validate {
        /// `true` to validate, `false` to reject.
        validated: bool,
        /// Rejection reason as typed.
        reason: Option<String>,
    },
    /// Administrator approval.
    Approve,
    /// Administrator rejection.
    Reject {
        /// Rejection reason as typed.
        reason: Option<String>,
    },
}

impl AgreementCommand {
    /// Faculty validation.
    #[must_use]
    pub const fn validate() -> Self {
        Self::Validate {
            validated: true,
            reason: None,
        }
    }

    /// Faculty rejection with `reason`.
    #[must_use]
    pub fn faculty_reject(reason: impl Into<String>) -> Self {
        Self::Validate {
            validated: false,
            reason: Some(reason.into()),
        }
    }

    /// Administrator rejection with `reason`.
    #[must_use]
    pub fn reject(reason: impl Into<String>) -> Self {
        Self::Reject {
            reason: Some(reason.into()),
        }
    }

    /// Returns the gated action the command maps to.
    #[must_use]
    pub const fn action(&self) -> AgreementAction {
        match self {
            Self::Sign => AgreementAction::Sign,
            Self::SignCompany => AgreementAction::SignCompany,
            Self::Validate { .. } => AgreementAction::Validate,
            Self::Approve => AgreementAction::Approve,
            Self::Reject { .. } => AgreementAction::Reject,
        }
    }

    /// Builds the validated mutation for agreement `id`.
    ///
    /// # Errors
    ///
    /// Returns [`AgreementDomainError::MissingRejectionReason`] for a
    /// rejection without a usable reason.
    pub fn to_request(&self, id: AgreementId) -> Result<MutationRequest, AgreementDomainError> {
        match self {
            Self::Sign => Ok(MutationRequest::sign()),
            Self::SignCompany => Ok(MutationRequest::sign_company()),
            Self::Validate { validated, reason } => {
                MutationRequest::validate(id, *validated, reason.as_deref())
            }
            Self::Approve => Ok(MutationRequest::approve()),
            Self::Reject { reason } => MutationRequest::reject(id, reason.as_deref()),
        }
    }

    pub(super) const fn success_message(&self) -> &'static str {
        match self {
            Self::Sign => "Agreement signed",
            Self::SignCompany => "Agreement signed for the company",
            Self::Validate {
                validated: true, ..
            } => "Agreement validated",
            Self::Approve => "Agreement approved",
            Self::Validate {
                validated: false, ..
            }
            | Self::Reject { .. } => "Agreement rejected",
        }
    }

    pub(super) const fn is_rejection(&self) -> bool {
        matches!(
            self,
            Self::Validate {
                validated: false,
                ..
            } | Self::Reject { .. }
        )
    }
}
