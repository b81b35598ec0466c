//! In-memory stand-in for the agreement backend.

use async_trait::async_trait;
use mockable::{Clock, DefaultClock};
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::sync::{Arc, RwLock};

use crate::agreement::{
    domain::{
        ActorRole, Agreement, AgreementAction, AgreementId, AgreementPage, AgreementStatus,
        MutationPayload, MutationRequest, PageRequest, SortOrder,
    },
    ports::{AgreementDocument, AgreementGateway, GatewayError, GatewayResult},
};
use crate::session::Session;

/// Gateway call categories used for failure scripting and call counting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GatewayOperation {
    /// Any list or single-record read.
    Fetch,
    /// Any mutation.
    Mutate,
    /// Document download.
    Pdf,
}

/// Thread-safe in-memory agreement backend.
///
/// Mutations follow the backend's rules: each party may act once, faculty
/// acts only on agreements pending faculty validation, administrators only
/// on agreements pending admin approval, and a role acting outside its
/// stage is refused. Students and companies see and sign only the
/// agreements they own. Failures can be scripted per operation.
pub struct InMemoryAgreementGateway<C = DefaultClock>
where
    C: Clock + Send + Sync,
{
    state: Arc<RwLock<InMemoryGatewayState>>,
    clock: Arc<C>,
}

#[derive(Debug, Default)]
struct InMemoryGatewayState {
    agreements: BTreeMap<AgreementId, Agreement>,
    documents: HashMap<AgreementId, Vec<u8>>,
    scripted_failures: HashMap<GatewayOperation, VecDeque<GatewayError>>,
    calls: HashMap<GatewayOperation, usize>,
}

impl<C> Clone for InMemoryAgreementGateway<C>
where
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl InMemoryAgreementGateway<DefaultClock> {
    /// Creates an empty backend using the system clock.
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(Arc::new(DefaultClock))
    }
}

impl Default for InMemoryAgreementGateway<DefaultClock> {
    fn default() -> Self {
        Self::new()
    }
}

fn lock_error(err: impl ToString) -> GatewayError {
    GatewayError::network(std::io::Error::other(err.to_string()))
}

impl<C> InMemoryAgreementGateway<C>
where
    C: Clock + Send + Sync,
{
    /// Creates an empty backend using `clock` for mutation timestamps.
    #[must_use]
    pub fn with_clock(clock: Arc<C>) -> Self {
        Self {
            state: Arc::new(RwLock::new(InMemoryGatewayState::default())),
            clock,
        }
    }

    /// Inserts or replaces an agreement.
    ///
    /// # Errors
    ///
    /// Returns a gateway error when lock acquisition fails.
    pub fn insert(&self, agreement: Agreement) -> GatewayResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.agreements.insert(agreement.id(), agreement);
        Ok(())
    }

    /// Attaches a rendered document to an agreement.
    ///
    /// # Errors
    ///
    /// Returns a gateway error when lock acquisition fails.
    pub fn attach_document(&self, id: AgreementId, bytes: Vec<u8>) -> GatewayResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.documents.insert(id, bytes);
        Ok(())
    }

    /// Makes the next call of `operation` fail with `error`.
    ///
    /// Failures queue up; each call consumes one.
    ///
    /// # Errors
    ///
    /// Returns a gateway error when lock acquisition fails.
    pub fn fail_next(&self, operation: GatewayOperation, error: GatewayError) -> GatewayResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        state
            .scripted_failures
            .entry(operation)
            .or_default()
            .push_back(error);
        Ok(())
    }

    /// Returns how many calls of `operation` were received, failed or not.
    #[must_use]
    pub fn call_count(&self, operation: GatewayOperation) -> usize {
        self.state
            .read()
            .map(|state| state.calls.get(&operation).copied().unwrap_or_default())
            .unwrap_or_default()
    }

    /// Returns the stored copy of an agreement.
    #[must_use]
    pub fn get(&self, id: AgreementId) -> Option<Agreement> {
        self.state
            .read()
            .ok()
            .and_then(|state| state.agreements.get(&id).cloned())
    }

    fn begin_call(&self, operation: GatewayOperation) -> GatewayResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        *state.calls.entry(operation).or_default() += 1;
        let scripted = state
            .scripted_failures
            .get_mut(&operation)
            .and_then(VecDeque::pop_front);
        scripted.map_or(Ok(()), Err)
    }

    fn list(
        &self,
        page: PageRequest,
        keep: impl Fn(&Agreement) -> bool,
    ) -> GatewayResult<AgreementPage> {
        self.begin_call(GatewayOperation::Fetch)?;
        let state = self.state.read().map_err(lock_error)?;
        let mut matching: Vec<Agreement> = state
            .agreements
            .values()
            .filter(|agreement| keep(agreement))
            .cloned()
            .collect();
        matching.sort_by_key(|agreement| (agreement.created_at(), agreement.id()));
        if page.sort() == SortOrder::NewestFirst {
            matching.reverse();
        }

        let total = matching.len() as u64;
        let size = usize::try_from(page.size()).unwrap_or(usize::MAX);
        let skip = usize::try_from(page.page())
            .unwrap_or(usize::MAX)
            .saturating_mul(size);
        let content = matching.into_iter().skip(skip).take(size).collect();
        Ok(AgreementPage::new(content, total))
    }

    fn apply(
        &self,
        session: &Session,
        agreement: &mut Agreement,
        request: &MutationRequest,
    ) -> GatewayResult<()> {
        let role = session.role();
        let actor = session.actor_id();
        let now = self.clock.utc();
        match (request.action(), request.payload()) {
            (AgreementAction::Sign, _) => {
                require_role(role, ActorRole::Student)?;
                require_owner(session, agreement)?;
                if !agreement.record_student_signature(now) {
                    return Err(GatewayError::Validation(
                        "agreement already signed by student".to_owned(),
                    ));
                }
            }
            (AgreementAction::SignCompany, _) => {
                require_role(role, ActorRole::Company)?;
                require_owner(session, agreement)?;
                if !agreement.signed_by_student() {
                    return Err(GatewayError::Validation(
                        "student must sign before the company".to_owned(),
                    ));
                }
                if !agreement.record_company_signature(now) {
                    return Err(GatewayError::Validation(
                        "agreement already signed by company".to_owned(),
                    ));
                }
            }
            (
                AgreementAction::Validate,
                MutationPayload::Validation {
                    validated,
                    rejection_reason,
                },
            ) => {
                require_role(role, ActorRole::Faculty)?;
                require_status(agreement, &AgreementStatus::PendingFacultyValidation)?;
                agreement.record_faculty_decision(
                    actor,
                    *validated,
                    rejection_reason.as_deref(),
                    now,
                );
            }
            (
                AgreementAction::Approve | AgreementAction::Reject,
                MutationPayload::Approval {
                    approved,
                    rejection_reason,
                },
            ) => {
                require_role(role, ActorRole::Admin)?;
                require_status(agreement, &AgreementStatus::PendingAdminApproval)?;
                agreement.record_admin_decision(
                    actor,
                    *approved,
                    rejection_reason.as_deref(),
                    now,
                );
            }
            (action, _) => {
                return Err(GatewayError::Validation(format!(
                    "payload does not match action {action}"
                )));
            }
        }
        agreement.settle_if_ratified();
        Ok(())
    }
}

fn require_role(actual: ActorRole, expected: ActorRole) -> GatewayResult<()> {
    if actual == expected {
        return Ok(());
    }
    Err(GatewayError::Authorization {
        status: 403,
        message: format!("role {actual} cannot perform this action"),
    })
}

fn require_owner(session: &Session, agreement: &Agreement) -> GatewayResult<()> {
    let role = session.role();
    if matches!(role, ActorRole::Faculty | ActorRole::Admin)
        || agreement.is_owned_by(role, session.actor_id())
    {
        return Ok(());
    }
    Err(GatewayError::Authorization {
        status: 403,
        message: format!(
            "agreement {} does not belong to {role} {}",
            agreement.id(),
            session.actor_id()
        ),
    })
}

fn require_status(agreement: &Agreement, expected: &AgreementStatus) -> GatewayResult<()> {
    if agreement.status() == expected {
        return Ok(());
    }
    Err(GatewayError::Validation(format!(
        "agreement {} is {}, expected {expected}",
        agreement.id(),
        agreement.status()
    )))
}

fn not_found(id: AgreementId) -> GatewayError {
    GatewayError::NotFound(format!("agreement {id}"))
}

#[async_trait]
impl<C> AgreementGateway for InMemoryAgreementGateway<C>
where
    C: Clock + Send + Sync,
{
    async fn fetch_pending(
        &self,
        session: &Session,
        page: PageRequest,
    ) -> GatewayResult<AgreementPage> {
        let waiting_on = match session.role() {
            ActorRole::Faculty => AgreementStatus::PendingFacultyValidation,
            ActorRole::Admin => AgreementStatus::PendingAdminApproval,
            role @ (ActorRole::Student | ActorRole::Company) => {
                return Err(GatewayError::NoPendingQueue(role));
            }
        };
        self.list(page, |agreement| *agreement.status() == waiting_on)
    }

    async fn fetch_for_actor(
        &self,
        session: &Session,
        page: PageRequest,
    ) -> GatewayResult<AgreementPage> {
        self.list(page, |agreement| require_owner(session, agreement).is_ok())
    }

    async fn fetch_all(
        &self,
        session: &Session,
        page: PageRequest,
    ) -> GatewayResult<AgreementPage> {
        require_role(session.role(), ActorRole::Admin)?;
        self.list(page, |_| true)
    }

    async fn fetch_by_id(&self, session: &Session, id: AgreementId) -> GatewayResult<Agreement> {
        self.begin_call(GatewayOperation::Fetch)?;
        let agreement = self.get(id).ok_or_else(|| not_found(id))?;
        require_owner(session, &agreement)?;
        Ok(agreement)
    }

    async fn mutate(
        &self,
        session: &Session,
        id: AgreementId,
        request: &MutationRequest,
    ) -> GatewayResult<Agreement> {
        self.begin_call(GatewayOperation::Mutate)?;
        let mut state = self.state.write().map_err(lock_error)?;
        let stored = state.agreements.get_mut(&id).ok_or_else(|| not_found(id))?;
        let mut updated = stored.clone();
        self.apply(session, &mut updated, request)?;
        *stored = updated.clone();
        Ok(updated)
    }

    async fn fetch_pdf(
        &self,
        session: &Session,
        id: AgreementId,
    ) -> GatewayResult<AgreementDocument> {
        self.begin_call(GatewayOperation::Pdf)?;
        let state = self.state.read().map_err(lock_error)?;
        let agreement = state.agreements.get(&id).ok_or_else(|| not_found(id))?;
        require_owner(session, agreement)?;
        let bytes = state
            .documents
            .get(&id)
            .cloned()
            .ok_or_else(|| GatewayError::NotFound(format!("document for agreement {id}")))?;
        Ok(AgreementDocument {
            file_name: AgreementDocument::default_file_name(id),
            content_type: "application/pdf".to_owned(),
            bytes,
        })
    }
}
