//! Mutating actions and their request payloads.

use super::{AgreementDomainError, AgreementId, ParseAgreementActionError};
use serde::Serialize;
use std::fmt;

/// A mutating action a party can take on an agreement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AgreementAction {
    /// Student signature.
    Sign,
    /// Company signature.
    SignCompany,
    /// Faculty validation (or faculty rejection).
    Validate,
    /// Administrator approval.
    Approve,
    /// Administrator rejection.
    Reject,
}

impl AgreementAction {
    /// Every action, in pipeline order.
    pub const ALL: [Self; 5] = [
        Self::Sign,
        Self::SignCompany,
        Self::Validate,
        Self::Approve,
        Self::Reject,
    ];

    /// Returns the action name used in resource paths and logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sign => "sign",
            Self::SignCompany => "sign-company",
            Self::Validate => "validate",
            Self::Approve => "approve",
            Self::Reject => "reject",
        }
    }

    /// Returns the resource sub-path the backend exposes for the action.
    ///
    /// Administrator rejection shares the approval endpoint.
    #[must_use]
    pub const fn endpoint_segment(self) -> &'static str {
        match self {
            Self::Sign => "sign",
            Self::SignCompany => "sign-company",
            Self::Validate => "validate",
            Self::Approve | Self::Reject => "approve",
        }
    }

    const fn bit(self) -> u8 {
        match self {
            Self::Sign => 1,
            Self::SignCompany => 1 << 1,
            Self::Validate => 1 << 2,
            Self::Approve => 1 << 3,
            Self::Reject => 1 << 4,
        }
    }
}

impl fmt::Display for AgreementAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for AgreementAction {
    type Error = ParseAgreementActionError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|action| action.as_str() == normalized)
            .ok_or_else(|| ParseAgreementActionError(value.to_owned()))
    }
}

/// A small set of [`AgreementAction`] values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ActionSet(u8);

impl ActionSet {
    /// The empty set.
    pub const EMPTY: Self = Self(0);

    /// Creates a set containing a single action.
    #[must_use]
    pub const fn only(action: AgreementAction) -> Self {
        Self(action.bit())
    }

    /// Returns a copy of the set with `action` added.
    #[must_use]
    pub const fn with(self, action: AgreementAction) -> Self {
        Self(self.0 | action.bit())
    }

    /// Returns `true` when `action` is in the set.
    #[must_use]
    pub const fn contains(self, action: AgreementAction) -> bool {
        self.0 & action.bit() != 0
    }

    /// Returns `true` when no action is permitted.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns the number of actions in the set.
    #[must_use]
    pub const fn len(self) -> u32 {
        self.0.count_ones()
    }

    /// Iterates the contained actions in pipeline order.
    pub fn iter(self) -> impl Iterator<Item = AgreementAction> {
        AgreementAction::ALL
            .into_iter()
            .filter(move |action| self.contains(*action))
    }
}

impl FromIterator<AgreementAction> for ActionSet {
    fn from_iter<I: IntoIterator<Item = AgreementAction>>(iter: I) -> Self {
        iter.into_iter().fold(Self::EMPTY, Self::with)
    }
}

/// JSON body sent with a mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum MutationPayload {
    /// Signatures carry an empty object.
    Empty {},
    /// Faculty decision.
    #[serde(rename_all = "camelCase")]
    Validation {
        /// `true` to validate, `false` to reject.
        validated: bool,
        /// Mandatory when rejecting.
        #[serde(skip_serializing_if = "Option::is_none")]
        rejection_reason: Option<String>,
    },
    /// Administrator decision.
    #[serde(rename_all = "camelCase")]
    Approval {
        /// `true` to approve, `false` to reject.
        approved: bool,
        /// Mandatory when rejecting.
        #[serde(skip_serializing_if = "Option::is_none")]
        rejection_reason: Option<String>,
    },
}

/// A validated mutation ready to be sent to the gateway.
///
/// Constructors refuse to build a rejection without a non-blank reason, so a
/// malformed rejection never reaches the network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationRequest {
    action: AgreementAction,
    payload: MutationPayload,
}

impl MutationRequest {
    /// Student signature.
    #[must_use]
    pub const fn sign() -> Self {
        Self {
            action: AgreementAction::Sign,
            payload: MutationPayload::Empty {},
        }
    }

    /// Company signature.
    #[must_use]
    pub const fn sign_company() -> Self {
        Self {
            action: AgreementAction::SignCompany,
            payload: MutationPayload::Empty {},
        }
    }

    /// Faculty decision on `id`.
    ///
    /// # Errors
    ///
    /// Returns [`AgreementDomainError::MissingRejectionReason`] when
    /// `validated` is `false` and `reason` is absent or blank.
    pub fn validate(
        id: AgreementId,
        validated: bool,
        reason: Option<&str>,
    ) -> Result<Self, AgreementDomainError> {
        let rejection_reason = if validated {
            None
        } else {
            Some(required_reason(id, reason)?)
        };
        Ok(Self {
            action: AgreementAction::Validate,
            payload: MutationPayload::Validation {
                validated,
                rejection_reason,
            },
        })
    }

    /// Administrator approval.
    #[must_use]
    pub const fn approve() -> Self {
        Self {
            action: AgreementAction::Approve,
            payload: MutationPayload::Approval {
                approved: true,
                rejection_reason: None,
            },
        }
    }

    /// Administrator rejection of `id`.
    ///
    /// # Errors
    ///
    /// Returns [`AgreementDomainError::MissingRejectionReason`] when `reason`
    /// is absent or blank.
    pub fn reject(id: AgreementId, reason: Option<&str>) -> Result<Self, AgreementDomainError> {
        Ok(Self {
            action: AgreementAction::Reject,
            payload: MutationPayload::Approval {
                approved: false,
                rejection_reason: Some(required_reason(id, reason)?),
            },
        })
    }

    /// Returns the action this request performs.
    #[must_use]
    pub const fn action(&self) -> AgreementAction {
        self.action
    }

    /// Returns the body to send.
    #[must_use]
    pub const fn payload(&self) -> &MutationPayload {
        &self.payload
    }

    /// Returns `true` for a negative decision.
    #[must_use]
    pub const fn is_rejection(&self) -> bool {
        matches!(
            self.payload,
            MutationPayload::Validation {
                validated: false,
                ..
            } | MutationPayload::Approval {
                approved: false,
                ..
            }
        )
    }
}

fn required_reason(id: AgreementId, reason: Option<&str>) -> Result<String, AgreementDomainError> {
    reason
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_owned)
        .ok_or(AgreementDomainError::MissingRejectionReason(id))
}
