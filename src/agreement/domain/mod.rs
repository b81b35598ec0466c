//! Domain model for the agreement lifecycle.
//!
//! The agreement record, its status enumeration, actor roles, the mutation
//! vocabulary, and the two pure functions the views rely on: the status
//! projector ([`project`]) and the role-scoped action gate
//! ([`allowed_actions`]). Nothing here performs I/O.

mod action;
mod agreement;
mod error;
mod gate;
mod ids;
mod page;
mod projection;
mod role;
mod status;
mod wire;

pub use action::{ActionSet, AgreementAction, MutationPayload, MutationRequest};
pub use agreement::Agreement;
pub use error::{AgreementDomainError, ParseActorRoleError, ParseAgreementActionError};
pub use gate::allowed_actions;
pub use ids::{ActorId, AgreementId};
pub use page::{AgreementPage, ListEnvelope, PageRequest, SortOrder};
pub use projection::{AgreementProjection, PartyChecks, project};
pub use role::ActorRole;
pub use status::AgreementStatus;
