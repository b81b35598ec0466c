//! Decoding and value-type tests for the agreement domain.

use crate::agreement::domain::{
    ActorId, ActorRole, Agreement, AgreementAction, AgreementDomainError, AgreementId, AgreementPage,
    AgreementStatus, ListEnvelope, MutationPayload, MutationRequest, PageRequest, SortOrder,
};
use chrono::{TimeZone, Utc};
use rstest::rstest;
use serde_json::json;

fn id(value: u64) -> AgreementId {
    AgreementId::new(value).expect("valid agreement id")
}

#[rstest]
#[case("PENDING_FACULTY_VALIDATION", AgreementStatus::PendingFacultyValidation)]
#[case("pending_admin_approval", AgreementStatus::PendingAdminApproval)]
#[case("SIGNED", AgreementStatus::Signed)]
#[case("COMPLETED", AgreementStatus::Completed)]
#[case("REJECTED", AgreementStatus::Rejected)]
fn status_parses_known_values(#[case] raw: &str, #[case] expected: AgreementStatus) {
    assert_eq!(AgreementStatus::from(raw), expected);
}

#[rstest]
fn unknown_status_keeps_raw_value() {
    let status = AgreementStatus::from("ARCHIVED");
    assert!(status.is_unknown());
    assert_eq!(status.as_str(), "ARCHIVED");
    assert!(!status.is_terminal());
}

#[rstest]
fn zero_agreement_id_is_rejected() {
    assert_eq!(
        AgreementId::new(0),
        Err(AgreementDomainError::InvalidAgreementId(0))
    );
    assert!(serde_json::from_value::<AgreementId>(json!(0)).is_err());
}

#[rstest]
#[case("STUDENT", ActorRole::Student)]
#[case("ROLE_COMPANY", ActorRole::Company)]
#[case("faculty", ActorRole::Faculty)]
#[case(" Admin ", ActorRole::Admin)]
fn role_parses_backend_spellings(#[case] raw: &str, #[case] expected: ActorRole) {
    assert_eq!(ActorRole::try_from(raw), Ok(expected));
}

#[rstest]
fn unknown_role_is_an_error() {
    assert!(ActorRole::try_from("VISITOR").is_err());
}

#[rstest]
fn agreement_decodes_with_null_flags_and_naive_timestamps() {
    let agreement: Agreement = serde_json::from_value(json!({
        "id": 4,
        "status": "PENDING_ADMIN_APPROVAL",
        "offerTitle": "Backend intern",
        "studentName": null,
        "companyName": "Acme",
        "signedByStudent": true,
        "signedByCompany": null,
        "facultyValidationDate": "2025-03-02T10:15:30",
        "createdAt": "2025-03-01T08:00:00Z"
    }))
    .expect("agreement should decode");

    assert_eq!(agreement.id(), id(4));
    assert_eq!(agreement.status(), &AgreementStatus::PendingAdminApproval);
    assert_eq!(agreement.student_name(), "");
    assert!(agreement.signed_by_student());
    assert!(!agreement.signed_by_company());
    assert!(!agreement.approved_by_admin());
    assert_eq!(
        agreement.faculty_validation_date(),
        Utc.with_ymd_and_hms(2025, 3, 2, 10, 15, 30).single()
    );
    assert_eq!(
        agreement.created_at(),
        Utc.with_ymd_and_hms(2025, 3, 1, 8, 0, 0).single()
    );
}

#[rstest]
fn agreement_decodes_party_identifiers() {
    let agreement: Agreement = serde_json::from_value(json!({
        "id": 12,
        "status": "APPROVED",
        "applicationId": 31,
        "studentId": 7,
        "offerId": 18,
        "companyId": 40,
        "facultyValidatorId": 3,
        "adminApproverId": null
    }))
    .expect("agreement should decode");

    assert_eq!(agreement.application_id(), Some(31));
    assert_eq!(agreement.offer_id(), Some(18));
    assert_eq!(agreement.student_id(), Some(ActorId::new(7)));
    assert_eq!(agreement.company_id(), Some(ActorId::new(40)));
    assert_eq!(agreement.faculty_validator_id(), Some(ActorId::new(3)));
    assert_eq!(agreement.admin_approver_id(), None);
    assert!(agreement.is_owned_by(ActorRole::Student, ActorId::new(7)));
    assert!(agreement.is_owned_by(ActorRole::Company, ActorId::new(40)));
    assert!(!agreement.is_owned_by(ActorRole::Student, ActorId::new(40)));
    assert!(!agreement.is_owned_by(ActorRole::Faculty, ActorId::new(3)));
}

#[rstest]
fn agreement_without_status_decodes_as_unknown() {
    let agreement: Agreement =
        serde_json::from_value(json!({"id": 9, "status": null})).expect("agreement should decode");
    assert!(agreement.status().is_unknown());
}

#[rstest]
fn bare_array_and_envelope_decode_to_the_same_page() {
    let rows = json!([
        {"id": 1, "status": "PENDING_FACULTY_VALIDATION"},
        {"id": 2, "status": "SIGNED"}
    ]);
    let bare: ListEnvelope = serde_json::from_value(rows.clone()).expect("bare list");
    let paged: ListEnvelope =
        serde_json::from_value(json!({"content": rows, "totalElements": 2})).expect("envelope");

    assert_eq!(AgreementPage::from(bare), AgreementPage::from(paged));
}

#[rstest]
fn envelope_without_total_counts_its_content() {
    let paged: ListEnvelope =
        serde_json::from_value(json!({"content": [{"id": 3}]})).expect("envelope");
    let page = AgreementPage::from(paged);
    assert_eq!(page.total_elements(), 1);
    assert_eq!(page.agreements().len(), 1);
}

#[rstest]
fn page_request_refuses_zero_size() {
    assert_eq!(
        PageRequest::new(0, 0, SortOrder::NewestFirst),
        Err(AgreementDomainError::InvalidPageSize)
    );
    assert_eq!(PageRequest::oldest_first(0).size(), PageRequest::DEFAULT_SIZE);
    assert_eq!(SortOrder::OldestFirst.as_query(), "createdAt,asc");
}

#[rstest]
#[case(None)]
#[case(Some(""))]
#[case(Some("   "))]
fn rejection_requires_a_reason(#[case] reason: Option<&str>) {
    assert_eq!(
        MutationRequest::validate(id(1), false, reason),
        Err(AgreementDomainError::MissingRejectionReason(id(1)))
    );
    assert_eq!(
        MutationRequest::reject(id(1), reason),
        Err(AgreementDomainError::MissingRejectionReason(id(1)))
    );
}

#[rstest]
fn rejection_payload_carries_trimmed_reason() {
    let request = MutationRequest::validate(id(1), false, Some("  missing insurance "))
        .expect("reason supplied");
    assert!(request.is_rejection());
    assert_eq!(
        serde_json::to_value(request.payload()).expect("payload serialises"),
        json!({"validated": false, "rejectionReason": "missing insurance"})
    );
}

#[rstest]
fn approval_and_signature_payloads_serialise_as_expected() {
    assert_eq!(
        serde_json::to_value(MutationRequest::approve().payload()).expect("payload serialises"),
        json!({"approved": true})
    );
    assert_eq!(
        serde_json::to_value(MutationRequest::sign().payload()).expect("payload serialises"),
        json!({})
    );
    assert_eq!(
        MutationRequest::sign_company().payload(),
        &MutationPayload::Empty {}
    );
}

#[rstest]
fn reject_shares_the_approval_endpoint() {
    assert_eq!(AgreementAction::Reject.endpoint_segment(), "approve");
    assert_eq!(AgreementAction::SignCompany.endpoint_segment(), "sign-company");
    assert_eq!(
        AgreementAction::try_from("SIGN_COMPANY"),
        Ok(AgreementAction::SignCompany)
    );
}
