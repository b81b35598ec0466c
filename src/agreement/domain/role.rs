//! Actor roles recognised by the backend.

use super::ParseActorRoleError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Role of the authenticated actor, which determines permitted actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActorRole {
    /// A student applying for and signing internship agreements.
    Student,
    /// A company contact counter-signing agreements.
    Company,
    /// A faculty member validating agreements for their students.
    Faculty,
    /// An administrator giving final approval.
    Admin,
}

impl ActorRole {
    /// Returns the canonical wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Student => "STUDENT",
            Self::Company => "COMPANY",
            Self::Faculty => "FACULTY",
            Self::Admin => "ADMIN",
        }
    }
}

impl fmt::Display for ActorRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ActorRole {
    type Error = ParseActorRoleError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_uppercase();
        match normalized.trim_start_matches("ROLE_") {
            "STUDENT" => Ok(Self::Student),
            "COMPANY" => Ok(Self::Company),
            "FACULTY" => Ok(Self::Faculty),
            "ADMIN" => Ok(Self::Admin),
            _ => Err(ParseActorRoleError(value.to_owned())),
        }
    }
}
