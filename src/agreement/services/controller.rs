//! Lifecycle view controller.
//!
//! One controller backs one mounted list view. It owns the fetched
//! agreements, the view state and the failure bookkeeping; it never caches
//! beyond the last successful fetch and never persists anything across
//! instances.

use super::AgreementCommand;
use crate::agreement::domain::{
    ActionSet, Agreement, AgreementAction, AgreementDomainError, AgreementId, AgreementPage,
    AgreementProjection, PageRequest, allowed_actions, project,
};
use crate::agreement::ports::{
    AgreementDocument, AgreementGateway, GatewayError, GatewayResult, Notice, Notifier,
};
use crate::config::{ClientConfig, MAX_FETCH_RETRIES};
use crate::session::Session;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};
use thiserror::Error;

/// Which listing a view shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListScope {
    /// Agreements belonging to the session's actor, newest first.
    Actor,
    /// The role's work queue, oldest first.
    Pending,
    /// Every agreement, newest first. Administrators only.
    All,
}

/// View lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewState {
    /// Nothing fetched yet.
    Idle,
    /// A list fetch is in flight.
    Loading,
    /// The list reflects the last successful fetch.
    Loaded,
    /// A mutation is in flight.
    Mutating,
    /// The last fetch or mutation failed; the list is the last good one.
    Failed,
}

/// Failure classification used for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// No response was received.
    Network,
    /// The actor was refused.
    Authorization,
    /// The agreement no longer exists.
    NotFound,
    /// The request was refused as invalid.
    Validation,
    /// Anything else.
    Unexpected,
}

impl FailureKind {
    /// Returns a short user-facing explanation.
    #[must_use]
    pub const fn user_message(self) -> &'static str {
        match self {
            Self::Network => "the server could not be reached",
            Self::Authorization => "you are not allowed to do this",
            Self::NotFound => "the agreement no longer exists",
            Self::Validation => "the request was refused",
            Self::Unexpected => "an unexpected error occurred",
        }
    }
}

impl From<&GatewayError> for FailureKind {
    fn from(err: &GatewayError) -> Self {
        match err {
            GatewayError::Network(_) => Self::Network,
            GatewayError::Authorization { .. } | GatewayError::NoPendingQueue(_) => {
                Self::Authorization
            }
            GatewayError::NotFound(_) => Self::NotFound,
            GatewayError::Validation(_) => Self::Validation,
            GatewayError::Server { .. } | GatewayError::Decode(_) => Self::Unexpected,
        }
    }
}

/// Errors returned by controller operations.
#[derive(Debug, Clone, Error)]
pub enum ControllerError {
    /// The command payload was refused locally.
    #[error(transparent)]
    Domain(#[from] AgreementDomainError),

    /// The gateway call failed.
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    /// The action is not offered to this actor for this agreement.
    #[error("action {action} is not permitted on agreement {id}")]
    ActionNotPermitted {
        /// Agreement the action targeted.
        id: AgreementId,
        /// Refused action.
        action: AgreementAction,
    },

    /// The agreement is not in the current list.
    #[error("agreement {0} is not in the current list")]
    UnknownAgreement(AgreementId),

    /// The view state lock was poisoned.
    #[error("view state is unavailable")]
    StateUnavailable,
}

/// Result type for controller operations.
pub type ControllerResult<T> = Result<T, ControllerError>;

/// Tunables for list fetches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerSettings {
    page_size: u32,
    fetch_retries: u8,
}

impl ControllerSettings {
    /// Creates settings; retries are capped at one and a zero page size
    /// falls back to [`PageRequest::DEFAULT_SIZE`].
    #[must_use]
    pub fn new(page_size: u32, fetch_retries: u8) -> Self {
        Self {
            page_size: if page_size == 0 {
                PageRequest::DEFAULT_SIZE
            } else {
                page_size
            },
            fetch_retries: fetch_retries.min(MAX_FETCH_RETRIES),
        }
    }

    /// Settings taken from client configuration.
    #[must_use]
    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.page_size, config.fetch_retries)
    }

    /// Returns the page size.
    #[must_use]
    pub const fn page_size(self) -> u32 {
        self.page_size
    }

    /// Returns the silent retry bound for fetches.
    #[must_use]
    pub const fn fetch_retries(self) -> u8 {
        self.fetch_retries
    }
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self::new(PageRequest::DEFAULT_SIZE, MAX_FETCH_RETRIES)
    }
}

/// Point-in-time copy of the view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewSnapshot {
    /// Lifecycle state.
    pub state: ViewState,
    /// Agreements from the last successful fetch, in backend order.
    pub agreements: Vec<Agreement>,
    /// Total reported by the backend.
    pub total_elements: u64,
    /// Classification of the last failure, cleared by a successful fetch.
    pub last_failure: Option<FailureKind>,
}

/// Render-ready row: the projection plus the actions offered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgreementRow {
    /// Agreement identifier.
    pub id: AgreementId,
    /// Badge and party checks.
    pub projection: AgreementProjection,
    /// Actions the session's role may take.
    pub actions: ActionSet,
}

struct ViewModel {
    state: ViewState,
    agreements: Vec<Agreement>,
    total_elements: u64,
    last_failure: Option<FailureKind>,
    applied_ticket: u64,
}

/// Drives one agreement list view.
///
/// Every fetch takes a ticket; a response is applied only if no newer
/// ticket has been applied first, so overlapping fetches settle on the most
/// recently issued one that completes. The state lock is never held across
/// an `.await`.
pub struct LifecycleViewController<G, N>
where
    G: AgreementGateway + ?Sized,
    N: Notifier + ?Sized,
{
    gateway: Arc<G>,
    notifier: Arc<N>,
    session: Session,
    scope: ListScope,
    settings: ControllerSettings,
    view: RwLock<ViewModel>,
    tickets: AtomicU64,
}

impl<G, N> LifecycleViewController<G, N>
where
    G: AgreementGateway + ?Sized,
    N: Notifier + ?Sized,
{
    /// Creates an idle controller for `session`.
    #[must_use]
    pub fn new(
        gateway: Arc<G>,
        notifier: Arc<N>,
        session: Session,
        scope: ListScope,
        settings: ControllerSettings,
    ) -> Self {
        Self {
            gateway,
            notifier,
            session,
            scope,
            settings,
            view: RwLock::new(ViewModel {
                state: ViewState::Idle,
                agreements: Vec::new(),
                total_elements: 0,
                last_failure: None,
                applied_ticket: 0,
            }),
            tickets: AtomicU64::new(0),
        }
    }

    /// Returns the session the controller acts for.
    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// Returns the listing scope.
    #[must_use]
    pub const fn scope(&self) -> ListScope {
        self.scope
    }

    /// Fetches the list and replaces the local copy.
    ///
    /// On failure the previous list is kept, the failure kind is recorded
    /// and an error notice is raised.
    ///
    /// # Errors
    ///
    /// Returns [`ControllerError::Gateway`] when the fetch fails after the
    /// permitted retry, or [`ControllerError::StateUnavailable`].
    pub async fn load(&self) -> ControllerResult<()> {
        let ticket = self.tickets.fetch_add(1, Ordering::SeqCst) + 1;
        self.write_view(|view| view.state = ViewState::Loading)?;
        tracing::debug!(ticket, scope = ?self.scope, role = %self.session.role(), "fetching agreements");

        let outcome = self.fetch_with_retry().await;
        match outcome {
            Ok(page) => self.apply_page(ticket, page),
            Err(err) => self.apply_fetch_failure(ticket, err),
        }
    }

    /// Alias of [`LifecycleViewController::load`] for an already mounted
    /// view.
    ///
    /// # Errors
    ///
    /// See [`LifecycleViewController::load`].
    pub async fn refresh(&self) -> ControllerResult<()> {
        self.load().await
    }

    /// Performs `command` on agreement `id` and refetches the list.
    ///
    /// The action gate is checked against the local copy first and the
    /// payload is validated before anything is sent. A successful mutation
    /// is always followed by a full list fetch; the returned agreement is
    /// the backend's answer to the mutation itself.
    ///
    /// # Errors
    ///
    /// Returns [`ControllerError::UnknownAgreement`] or
    /// [`ControllerError::ActionNotPermitted`] without contacting the
    /// backend, [`ControllerError::Domain`] for a rejection without reason,
    /// and [`ControllerError::Gateway`] when the mutation fails.
    pub async fn perform(
        &self,
        id: AgreementId,
        command: &AgreementCommand,
    ) -> ControllerResult<Agreement> {
        let action = command.action();
        let role = self.session.role();
        let local = self.find(id)?;
        if !allowed_actions(&local, role).contains(action) {
            tracing::warn!(agreement_id = %id, %role, %action, "action refused by gate");
            return Err(ControllerError::ActionNotPermitted { id, action });
        }

        let request = match command.to_request(id) {
            Ok(request) => request,
            Err(err) => {
                self.notifier.notify(Notice::error(err.to_string()));
                return Err(err.into());
            }
        };

        self.write_view(|view| view.state = ViewState::Mutating)?;
        tracing::info!(agreement_id = %id, %role, %action, state = ?ViewState::Mutating, "performing action");
        let updated = match self.gateway.mutate(&self.session, id, &request).await {
            Ok(updated) => updated,
            Err(err) => {
                let kind = FailureKind::from(&err);
                tracing::warn!(agreement_id = %id, %action, error = %err, ?kind, "action failed");
                self.write_view(|view| {
                    view.state = ViewState::Failed;
                    view.last_failure = Some(kind);
                })?;
                self.notifier
                    .notify(Notice::error(failure_text(action.as_str(), &err)));
                return Err(err.into());
            }
        };

        let notice = if command.is_rejection() {
            Notice::info(command.success_message())
        } else {
            Notice::success(command.success_message())
        };
        self.notifier.notify(notice);

        // The mutation stands even when the follow-up fetch fails; that
        // failure is already recorded and notified.
        if let Err(err) = self.refresh().await {
            tracing::debug!(agreement_id = %id, error = %err, "refetch after action failed");
        }
        Ok(updated)
    }

    /// Fetches the rendered document for agreement `id`.
    ///
    /// # Errors
    ///
    /// Returns [`ControllerError::Gateway`] when the download fails; an
    /// error notice is raised as well.
    pub async fn download_pdf(&self, id: AgreementId) -> ControllerResult<AgreementDocument> {
        match self.gateway.fetch_pdf(&self.session, id).await {
            Ok(document) => Ok(document),
            Err(err) => {
                tracing::warn!(agreement_id = %id, error = %err, "document download failed");
                self.notifier
                    .notify(Notice::error(failure_text("download", &err)));
                Err(err.into())
            }
        }
    }

    /// Returns a copy of the whole view.
    ///
    /// # Errors
    ///
    /// Returns [`ControllerError::StateUnavailable`] when the state lock is
    /// poisoned.
    pub fn snapshot(&self) -> ControllerResult<ViewSnapshot> {
        self.read_view(|view| ViewSnapshot {
            state: view.state,
            agreements: view.agreements.clone(),
            total_elements: view.total_elements,
            last_failure: view.last_failure,
        })
    }

    /// Returns the agreements from the last successful fetch.
    ///
    /// # Errors
    ///
    /// Returns [`ControllerError::StateUnavailable`] when the state lock is
    /// poisoned.
    pub fn agreements(&self) -> ControllerResult<Vec<Agreement>> {
        self.read_view(|view| view.agreements.clone())
    }

    /// Returns the lifecycle state.
    ///
    /// # Errors
    ///
    /// Returns [`ControllerError::StateUnavailable`] when the state lock is
    /// poisoned.
    pub fn state(&self) -> ControllerResult<ViewState> {
        self.read_view(|view| view.state)
    }

    /// Returns one render row per listed agreement.
    ///
    /// # Errors
    ///
    /// Returns [`ControllerError::StateUnavailable`] when the state lock is
    /// poisoned.
    pub fn projections(&self) -> ControllerResult<Vec<AgreementRow>> {
        let role = self.session.role();
        self.read_view(|view| {
            view.agreements
                .iter()
                .map(|agreement| AgreementRow {
                    id: agreement.id(),
                    projection: project(agreement),
                    actions: allowed_actions(agreement, role),
                })
                .collect()
        })
    }

    /// Tears the view down. Nothing outlives the controller.
    pub fn unmount(self) {
        tracing::debug!(scope = ?self.scope, "agreement view unmounted");
    }

    async fn fetch_with_retry(&self) -> GatewayResult<AgreementPage> {
        let mut attempt: u8 = 0;
        loop {
            match self.fetch_once().await {
                Err(err) if err.is_transient() && attempt < self.settings.fetch_retries => {
                    attempt += 1;
                    tracing::warn!(attempt, error = %err, "retrying agreement fetch");
                }
                outcome => return outcome,
            }
        }
    }

    async fn fetch_once(&self) -> GatewayResult<AgreementPage> {
        let size = self.settings.page_size;
        match self.scope {
            ListScope::Actor => {
                self.gateway
                    .fetch_for_actor(&self.session, PageRequest::newest_first(size))
                    .await
            }
            ListScope::Pending => {
                self.gateway
                    .fetch_pending(&self.session, PageRequest::oldest_first(size))
                    .await
            }
            ListScope::All => {
                self.gateway
                    .fetch_all(&self.session, PageRequest::newest_first(size))
                    .await
            }
        }
    }

    fn apply_page(&self, ticket: u64, page: AgreementPage) -> ControllerResult<()> {
        let total_elements = page.total_elements();
        let agreements = page.into_agreements();
        let applied = self.write_view(|view| {
            if ticket < view.applied_ticket {
                return false;
            }
            view.applied_ticket = ticket;
            view.state = ViewState::Loaded;
            view.agreements = agreements;
            view.total_elements = total_elements;
            view.last_failure = None;
            true
        })?;
        if applied {
            tracing::debug!(ticket, total_elements, "agreement list applied");
        } else {
            tracing::debug!(ticket, "stale agreement list discarded");
        }
        Ok(())
    }

    fn apply_fetch_failure(&self, ticket: u64, err: GatewayError) -> ControllerResult<()> {
        let kind = FailureKind::from(&err);
        let applied = self.write_view(|view| {
            if ticket < view.applied_ticket {
                return false;
            }
            view.applied_ticket = ticket;
            view.state = ViewState::Failed;
            view.last_failure = Some(kind);
            true
        })?;
        if !applied {
            tracing::debug!(ticket, error = %err, "stale fetch failure discarded");
            return Ok(());
        }
        tracing::warn!(ticket, error = %err, ?kind, "agreement fetch failed");
        self.notifier
            .notify(Notice::error(failure_text("load agreements", &err)));
        Err(err.into())
    }

    fn find(&self, id: AgreementId) -> ControllerResult<Agreement> {
        self.read_view(|view| {
            view.agreements
                .iter()
                .find(|agreement| agreement.id() == id)
                .cloned()
        })?
        .ok_or(ControllerError::UnknownAgreement(id))
    }

    fn read_view<T>(&self, read: impl FnOnce(&ViewModel) -> T) -> ControllerResult<T> {
        let guard = self
            .view
            .read()
            .map_err(|_| ControllerError::StateUnavailable)?;
        Ok(read(&guard))
    }

    fn write_view<T>(&self, write: impl FnOnce(&mut ViewModel) -> T) -> ControllerResult<T> {
        let mut guard = self
            .view
            .write()
            .map_err(|_| ControllerError::StateUnavailable)?;
        Ok(write(&mut guard))
    }
}

fn failure_text(operation: &str, err: &GatewayError) -> String {
    match err {
        GatewayError::Validation(message) => format!("Could not {operation}: {message}"),
        other => format!(
            "Could not {operation}: {}",
            FailureKind::from(other).user_message()
        ),
    }
}
