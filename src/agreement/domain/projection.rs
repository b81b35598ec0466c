//! Display-ready projection of an agreement.

use super::{Agreement, AgreementStatus};

const NEUTRAL_CLASS: &str = "bg-gray-100 text-gray-800";

/// Completion of each party's stage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct PartyChecks {
    /// The student has signed.
    pub student: bool,
    /// The company has signed.
    pub company: bool,
    /// Faculty validation is behind the agreement.
    pub faculty: bool,
    /// Administrator approval is behind the agreement.
    pub admin: bool,
}

/// Derived, display-ready representation of an agreement.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AgreementProjection {
    /// Human-readable status label.
    pub label: &'static str,
    /// Style class for the status badge.
    pub color_class: &'static str,
    /// Per-party completion checks.
    pub party_checks: PartyChecks,
}

/// Projects an agreement into its display form.
///
/// This is the single source of truth for party checks. Student and company
/// checks come from their flags. The admin check is the flag or any status
/// that lies after approval. The faculty check is the flag, any status after
/// faculty validation, or a completed admin check, so `admin` always implies
/// `faculty` even on records whose flags lag behind their status.
#[must_use]
pub fn project(agreement: &Agreement) -> AgreementProjection {
    let status = agreement.status();
    let admin = agreement.approved_by_admin() || status.implies_admin_complete();
    let faculty = agreement.signed_by_faculty() || status.implies_faculty_complete() || admin;
    let (label, color_class) = badge(status);

    AgreementProjection {
        label,
        color_class,
        party_checks: PartyChecks {
            student: agreement.signed_by_student(),
            company: agreement.signed_by_company(),
            faculty,
            admin,
        },
    }
}

const fn badge(status: &AgreementStatus) -> (&'static str, &'static str) {
    match status {
        AgreementStatus::Draft => ("Draft", NEUTRAL_CLASS),
        AgreementStatus::Pending => ("Pending", "bg-yellow-100 text-yellow-800"),
        AgreementStatus::PendingFacultyValidation => {
            ("Awaiting faculty validation", "bg-yellow-100 text-yellow-800")
        }
        AgreementStatus::PendingAdminApproval => {
            ("Awaiting admin approval", "bg-orange-100 text-orange-800")
        }
        AgreementStatus::Approved => ("Approved", "bg-blue-100 text-blue-800"),
        AgreementStatus::Signed => ("Signed", "bg-green-100 text-green-800"),
        AgreementStatus::Active => ("Active", "bg-blue-100 text-blue-800"),
        AgreementStatus::Completed => ("Completed", "bg-purple-100 text-purple-800"),
        AgreementStatus::Rejected => ("Rejected", "bg-red-100 text-red-800"),
        AgreementStatus::Unknown(_) => ("Unknown", NEUTRAL_CLASS),
    }
}
