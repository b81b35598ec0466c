//! Shared world state for agreement lifecycle BDD scenarios.

use std::sync::Arc;

use rstest::fixture;
use stagedesk::agreement::{
    adapters::memory::{InMemoryAgreementGateway, RecordingNotifier},
    domain::{ActorId, ActorRole},
    services::{ControllerError, ControllerSettings, LifecycleViewController, ListScope},
};
use stagedesk::session::Session;

/// Student owning the scenario agreements.
pub const STUDENT: ActorId = ActorId::new(1);

/// Company contact owning the scenario agreements.
pub const COMPANY: ActorId = ActorId::new(2);

/// Controller type used by the BDD world.
pub type TestController = LifecycleViewController<InMemoryAgreementGateway, RecordingNotifier>;

/// Scenario world for agreement lifecycle behaviour tests.
pub struct LifecycleWorld {
    pub backend: Arc<InMemoryAgreementGateway>,
    pub notifier: Arc<RecordingNotifier>,
    pub controller: Option<TestController>,
    pub last_action: Option<Result<(), ControllerError>>,
}

impl LifecycleWorld {
    /// Creates a world with an empty backend and no mounted view.
    #[must_use]
    pub fn new() -> Self {
        Self {
            backend: Arc::new(InMemoryAgreementGateway::new()),
            notifier: Arc::new(RecordingNotifier::new()),
            controller: None,
            last_action: None,
        }
    }

    /// Replaces the mounted view with one for `role` over `scope`.
    pub fn mount(&mut self, role: ActorRole, scope: ListScope) {
        if let Some(previous) = self.controller.take() {
            previous.unmount();
        }
        let actor = match role {
            ActorRole::Company => COMPANY,
            ActorRole::Student | ActorRole::Faculty | ActorRole::Admin => STUDENT,
        };
        self.controller = Some(LifecycleViewController::new(
            Arc::clone(&self.backend),
            Arc::clone(&self.notifier),
            Session::new(
                format!("token-{role}"),
                actor,
                format!("{}@univ.example", role.as_str().to_ascii_lowercase()),
                role,
            ),
            scope,
            ControllerSettings::default(),
        ));
    }

    /// Returns the mounted view.
    ///
    /// # Errors
    ///
    /// Returns an error when no view has been mounted.
    pub fn controller(&self) -> Result<&TestController, eyre::Report> {
        self.controller
            .as_ref()
            .ok_or_else(|| eyre::eyre!("no view mounted in scenario world"))
    }
}

impl Default for LifecycleWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> LifecycleWorld {
    LifecycleWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}

/// Parses a role name from a step.
///
/// # Errors
///
/// Returns an error for an unrecognised role.
pub fn parse_role(raw: &str) -> Result<ActorRole, eyre::Report> {
    ActorRole::try_from(raw).map_err(|err| eyre::eyre!("{err}"))
}
