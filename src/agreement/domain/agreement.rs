//! Client-side copy of an internship agreement.

use super::{
    ActorId, ActorRole, AgreementId, AgreementStatus,
    wire::{null_as_default, timestamp},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

fn unknown_status() -> AgreementStatus {
    AgreementStatus::Unknown(String::new())
}

/// One internship placement pending multi-party ratification.
///
/// This is a read-mostly, eventually stale copy of the backend record. It is
/// decoded from the camelCase JSON the backend emits; missing or `null`
/// flags read as `false` and missing display strings read as empty.
///
/// The party identifiers are optional; a record without them is owned by
/// nobody, so no student or company can act on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Agreement {
    id: AgreementId,
    #[serde(default = "unknown_status")]
    status: AgreementStatus,

    #[serde(default)]
    application_id: Option<u64>,
    #[serde(default)]
    offer_id: Option<u64>,
    #[serde(default)]
    student_id: Option<ActorId>,
    #[serde(default)]
    company_id: Option<ActorId>,

    #[serde(default, deserialize_with = "null_as_default")]
    offer_title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    student_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    company_name: String,

    #[serde(default, deserialize_with = "null_as_default")]
    signed_by_student: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    signed_by_company: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    signed_by_faculty: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    approved_by_admin: bool,

    #[serde(default, with = "timestamp")]
    student_signature_date: Option<DateTime<Utc>>,
    #[serde(default, with = "timestamp")]
    company_signature_date: Option<DateTime<Utc>>,
    #[serde(default, with = "timestamp")]
    faculty_signature_date: Option<DateTime<Utc>>,
    #[serde(default, with = "timestamp")]
    faculty_validation_date: Option<DateTime<Utc>>,
    #[serde(default, with = "timestamp")]
    admin_approval_date: Option<DateTime<Utc>>,

    #[serde(default)]
    faculty_rejection_reason: Option<String>,
    #[serde(default)]
    admin_rejection_reason: Option<String>,
    #[serde(default)]
    faculty_validator_id: Option<ActorId>,
    #[serde(default)]
    faculty_validator_name: Option<String>,
    #[serde(default)]
    admin_approver_id: Option<ActorId>,
    #[serde(default)]
    admin_approver_name: Option<String>,
    #[serde(default)]
    agreement_pdf_path: Option<String>,

    #[serde(default, with = "timestamp")]
    created_at: Option<DateTime<Utc>>,
    #[serde(default, with = "timestamp")]
    updated_at: Option<DateTime<Utc>>,
}

impl Agreement {
    /// Creates an agreement with no signatures recorded.
    #[must_use]
    pub fn new(
        id: AgreementId,
        status: AgreementStatus,
        offer_title: impl Into<String>,
        student_name: impl Into<String>,
        company_name: impl Into<String>,
    ) -> Self {
        Self {
            id,
            status,
            application_id: None,
            offer_id: None,
            student_id: None,
            company_id: None,
            offer_title: offer_title.into(),
            student_name: student_name.into(),
            company_name: company_name.into(),
            signed_by_student: false,
            signed_by_company: false,
            signed_by_faculty: false,
            approved_by_admin: false,
            student_signature_date: None,
            company_signature_date: None,
            faculty_signature_date: None,
            faculty_validation_date: None,
            admin_approval_date: None,
            faculty_rejection_reason: None,
            admin_rejection_reason: None,
            faculty_validator_id: None,
            faculty_validator_name: None,
            admin_approver_id: None,
            admin_approver_name: None,
            agreement_pdf_path: None,
            created_at: None,
            updated_at: None,
        }
    }

    /// Returns the agreement identifier.
    #[must_use]
    pub const fn id(&self) -> AgreementId {
        self.id
    }

    /// Returns the backend status.
    #[must_use]
    pub const fn status(&self) -> &AgreementStatus {
        &self.status
    }

    /// Returns the application this agreement was drawn up for, if known.
    #[must_use]
    pub const fn application_id(&self) -> Option<u64> {
        self.application_id
    }

    /// Returns the internship offer identifier, if known.
    #[must_use]
    pub const fn offer_id(&self) -> Option<u64> {
        self.offer_id
    }

    /// Returns the owning student, if known.
    #[must_use]
    pub const fn student_id(&self) -> Option<ActorId> {
        self.student_id
    }

    /// Returns the owning company contact, if known.
    #[must_use]
    pub const fn company_id(&self) -> Option<ActorId> {
        self.company_id
    }

    /// Returns the offer title.
    #[must_use]
    pub fn offer_title(&self) -> &str {
        &self.offer_title
    }

    /// Returns the student's display name.
    #[must_use]
    pub fn student_name(&self) -> &str {
        &self.student_name
    }

    /// Returns the company's display name.
    #[must_use]
    pub fn company_name(&self) -> &str {
        &self.company_name
    }

    /// Returns whether the student has signed.
    #[must_use]
    pub const fn signed_by_student(&self) -> bool {
        self.signed_by_student
    }

    /// Returns whether the company has signed.
    #[must_use]
    pub const fn signed_by_company(&self) -> bool {
        self.signed_by_company
    }

    /// Returns whether the faculty flag is set.
    #[must_use]
    pub const fn signed_by_faculty(&self) -> bool {
        self.signed_by_faculty
    }

    /// Returns whether the admin approval flag is set.
    #[must_use]
    pub const fn approved_by_admin(&self) -> bool {
        self.approved_by_admin
    }

    /// Returns when the student signed, if known.
    #[must_use]
    pub const fn student_signature_date(&self) -> Option<DateTime<Utc>> {
        self.student_signature_date
    }

    /// Returns when the company signed, if known.
    #[must_use]
    pub const fn company_signature_date(&self) -> Option<DateTime<Utc>> {
        self.company_signature_date
    }

    /// Returns when the faculty signed, if known.
    #[must_use]
    pub const fn faculty_signature_date(&self) -> Option<DateTime<Utc>> {
        self.faculty_signature_date
    }

    /// Returns when faculty validated or rejected, if known.
    #[must_use]
    pub const fn faculty_validation_date(&self) -> Option<DateTime<Utc>> {
        self.faculty_validation_date
    }

    /// Returns when an administrator approved or rejected, if known.
    #[must_use]
    pub const fn admin_approval_date(&self) -> Option<DateTime<Utc>> {
        self.admin_approval_date
    }

    /// Returns the faculty rejection reason, if any.
    #[must_use]
    pub fn faculty_rejection_reason(&self) -> Option<&str> {
        self.faculty_rejection_reason.as_deref()
    }

    /// Returns the administrator rejection reason, if any.
    #[must_use]
    pub fn admin_rejection_reason(&self) -> Option<&str> {
        self.admin_rejection_reason.as_deref()
    }

    /// Returns the faculty member who decided on the agreement, if any.
    #[must_use]
    pub const fn faculty_validator_id(&self) -> Option<ActorId> {
        self.faculty_validator_id
    }

    /// Returns the validating faculty member's name, if any.
    #[must_use]
    pub fn faculty_validator_name(&self) -> Option<&str> {
        self.faculty_validator_name.as_deref()
    }

    /// Returns the administrator who decided on the agreement, if any.
    #[must_use]
    pub const fn admin_approver_id(&self) -> Option<ActorId> {
        self.admin_approver_id
    }

    /// Returns the approving administrator's name, if any.
    #[must_use]
    pub fn admin_approver_name(&self) -> Option<&str> {
        self.admin_approver_name.as_deref()
    }

    /// Returns the server-side document path, if any.
    #[must_use]
    pub fn agreement_pdf_path(&self) -> Option<&str> {
        self.agreement_pdf_path.as_deref()
    }

    /// Returns the creation timestamp, if known.
    #[must_use]
    pub const fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    /// Returns the latest update timestamp, if known.
    #[must_use]
    pub const fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    /// Sets the owning student and company contact.
    #[must_use]
    pub const fn with_parties(mut self, student: ActorId, company: ActorId) -> Self {
        self.student_id = Some(student);
        self.company_id = Some(company);
        self
    }

    /// Returns whether `actor` owns this agreement in the given role.
    ///
    /// Faculty and administrators act by stage rather than ownership, so
    /// they own nothing here.
    #[must_use]
    pub fn is_owned_by(&self, role: ActorRole, actor: ActorId) -> bool {
        let owner = match role {
            ActorRole::Student => self.student_id,
            ActorRole::Company => self.company_id,
            ActorRole::Faculty | ActorRole::Admin => None,
        };
        owner == Some(actor)
    }

    /// Records the student signature.
    #[must_use]
    pub const fn with_student_signature(mut self, at: DateTime<Utc>) -> Self {
        self.signed_by_student = true;
        self.student_signature_date = Some(at);
        self
    }

    /// Records the company signature.
    #[must_use]
    pub const fn with_company_signature(mut self, at: DateTime<Utc>) -> Self {
        self.signed_by_company = true;
        self.company_signature_date = Some(at);
        self
    }

    /// Records the faculty signature.
    #[must_use]
    pub const fn with_faculty_signature(mut self, at: DateTime<Utc>) -> Self {
        self.signed_by_faculty = true;
        self.faculty_signature_date = Some(at);
        self
    }

    /// Records the administrator approval flag.
    #[must_use]
    pub const fn with_admin_approval(mut self, at: DateTime<Utc>) -> Self {
        self.approved_by_admin = true;
        self.admin_approval_date = Some(at);
        self
    }

    /// Sets the creation timestamp.
    #[must_use]
    pub const fn with_created_at(mut self, at: DateTime<Utc>) -> Self {
        self.created_at = Some(at);
        self.updated_at = Some(at);
        self
    }

    /// Applies a faculty decision the way the backend does.
    pub(crate) fn record_faculty_decision(
        &mut self,
        validator: ActorId,
        validated: bool,
        reason: Option<&str>,
        at: DateTime<Utc>,
    ) {
        self.faculty_validation_date = Some(at);
        self.faculty_validator_id = Some(validator);
        if validated {
            self.status = AgreementStatus::PendingAdminApproval;
            self.faculty_rejection_reason = None;
        } else {
            self.status = AgreementStatus::Rejected;
            self.faculty_rejection_reason = reason.map(str::to_owned);
        }
        self.updated_at = Some(at);
    }

    /// Applies an administrator decision the way the backend does.
    pub(crate) fn record_admin_decision(
        &mut self,
        approver: ActorId,
        approved: bool,
        reason: Option<&str>,
        at: DateTime<Utc>,
    ) {
        self.admin_approval_date = Some(at);
        self.admin_approver_id = Some(approver);
        if approved {
            self.status = AgreementStatus::Approved;
            self.approved_by_admin = true;
            self.admin_rejection_reason = None;
        } else {
            self.status = AgreementStatus::Rejected;
            self.admin_rejection_reason = reason.map(str::to_owned);
        }
        self.updated_at = Some(at);
    }

    /// Sets the student flag once; returns `false` if it was already set.
    pub(crate) const fn record_student_signature(&mut self, at: DateTime<Utc>) -> bool {
        if self.signed_by_student {
            return false;
        }
        self.signed_by_student = true;
        self.student_signature_date = Some(at);
        self.updated_at = Some(at);
        true
    }

    /// Sets the company flag once; returns `false` if it was already set.
    pub(crate) const fn record_company_signature(&mut self, at: DateTime<Utc>) -> bool {
        if self.signed_by_company {
            return false;
        }
        self.signed_by_company = true;
        self.company_signature_date = Some(at);
        self.updated_at = Some(at);
        true
    }

    /// Marks the agreement fully ratified once every party is on record.
    pub(crate) fn settle_if_ratified(&mut self) {
        let faculty_done = self.signed_by_faculty || self.status.implies_faculty_complete();
        if self.signed_by_student
            && self.signed_by_company
            && faculty_done
            && self.approved_by_admin
            && !self.status.is_terminal()
        {
            self.status = AgreementStatus::Signed;
        }
    }
}
