//! Role-scoped action gate.

use super::{ActionSet, ActorRole, Agreement, AgreementAction, AgreementStatus};

/// Returns the mutating actions `role` may take on `agreement`.
///
/// Terminal and unrecognised statuses permit nothing for any role. The
/// backend remains the enforcer; this only decides what the client offers.
#[must_use]
pub fn allowed_actions(agreement: &Agreement, role: ActorRole) -> ActionSet {
    let status = agreement.status();
    if status.is_terminal() || status.is_unknown() {
        return ActionSet::EMPTY;
    }

    match role {
        ActorRole::Student if !agreement.signed_by_student() => {
            ActionSet::only(AgreementAction::Sign)
        }
        ActorRole::Company if agreement.signed_by_student() && !agreement.signed_by_company() => {
            ActionSet::only(AgreementAction::SignCompany)
        }
        ActorRole::Faculty if *status == AgreementStatus::PendingFacultyValidation => {
            ActionSet::only(AgreementAction::Validate)
        }
        ActorRole::Admin if *status == AgreementStatus::PendingAdminApproval => {
            ActionSet::only(AgreementAction::Approve).with(AgreementAction::Reject)
        }
        ActorRole::Student | ActorRole::Company | ActorRole::Faculty | ActorRole::Admin => {
            ActionSet::EMPTY
        }
    }
}
