//! Agreement status as reported by the backend.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Server-authoritative agreement status.
///
/// The backend enumeration may evolve independently of the client, so
/// unrecognised values decode into [`AgreementStatus::Unknown`] instead of
/// failing the whole payload.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AgreementStatus {
    /// Legacy client-side draft state.
    Draft,
    /// Legacy client-side generic pending state.
    Pending,
    /// Waiting for the student's faculty to validate.
    PendingFacultyValidation,
    /// Validated by faculty, waiting for an administrator.
    PendingAdminApproval,
    /// Approved by an administrator.
    Approved,
    /// Fully ratified. Terminal.
    Signed,
    /// Legacy state for an internship under way.
    Active,
    /// Legacy state for a finished internship.
    Completed,
    /// Terminated by a negative decision at some stage. Terminal.
    Rejected,
    /// A value this client does not recognise.
    Unknown(String),
}

impl AgreementStatus {
    /// Returns the wire representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Draft => "DRAFT",
            Self::Pending => "PENDING",
            Self::PendingFacultyValidation => "PENDING_FACULTY_VALIDATION",
            Self::PendingAdminApproval => "PENDING_ADMIN_APPROVAL",
            Self::Approved => "APPROVED",
            Self::Signed => "SIGNED",
            Self::Active => "ACTIVE",
            Self::Completed => "COMPLETED",
            Self::Rejected => "REJECTED",
            Self::Unknown(raw) => raw,
        }
    }

    /// Returns `true` for statuses after which no party may act.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Signed | Self::Rejected)
    }

    /// Returns `true` when the value was not recognised.
    #[must_use]
    pub const fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown(_))
    }

    /// Returns `true` when being in this status means faculty validation is
    /// already behind the agreement.
    #[must_use]
    pub const fn implies_faculty_complete(&self) -> bool {
        matches!(
            self,
            Self::PendingAdminApproval
                | Self::Approved
                | Self::Signed
                | Self::Active
                | Self::Completed
        )
    }

    /// Returns `true` when being in this status means administrator approval
    /// is already behind the agreement.
    #[must_use]
    pub const fn implies_admin_complete(&self) -> bool {
        matches!(
            self,
            Self::Approved | Self::Signed | Self::Active | Self::Completed
        )
    }
}

impl From<&str> for AgreementStatus {
    fn from(value: &str) -> Self {
        let normalized = value.trim().to_ascii_uppercase();
        match normalized.as_str() {
            "DRAFT" => Self::Draft,
            "PENDING" => Self::Pending,
            "PENDING_FACULTY_VALIDATION" => Self::PendingFacultyValidation,
            "PENDING_ADMIN_APPROVAL" => Self::PendingAdminApproval,
            "APPROVED" => Self::Approved,
            "SIGNED" => Self::Signed,
            "ACTIVE" => Self::Active,
            "COMPLETED" => Self::Completed,
            "REJECTED" => Self::Rejected,
            _ => Self::Unknown(value.to_owned()),
        }
    }
}

impl fmt::Display for AgreementStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for AgreementStatus {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for AgreementStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.map_or_else(
            || Self::Unknown(String::new()),
            |value| Self::from(value.as_str()),
        ))
    }
}
