//! Shared test helpers for in-memory integration tests.

use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};
use rstest::fixture;
use stagedesk::agreement::{
    adapters::memory::{InMemoryAgreementGateway, RecordingNotifier},
    domain::{ActorId, ActorRole, Agreement, AgreementId, AgreementStatus},
    services::{ControllerSettings, LifecycleViewController, ListScope},
};
use stagedesk::session::Session;

/// Controller type used across in-memory tests.
pub type MemoryController = LifecycleViewController<InMemoryAgreementGateway, RecordingNotifier>;

/// Student owning every seeded agreement.
pub const STUDENT: ActorId = ActorId::new(42);

/// Company contact owning every seeded agreement.
pub const COMPANY: ActorId = ActorId::new(43);

/// Shared backend and notifier behind the views of one test.
pub struct Backend {
    pub gateway: Arc<InMemoryAgreementGateway>,
    pub notifier: Arc<RecordingNotifier>,
}

impl Backend {
    /// Mounts a view for `role` over `scope`.
    #[must_use]
    pub fn view(&self, role: ActorRole, scope: ListScope) -> MemoryController {
        LifecycleViewController::new(
            Arc::clone(&self.gateway),
            Arc::clone(&self.notifier),
            session(role),
            scope,
            ControllerSettings::default(),
        )
    }

    /// Mounts a view for an arbitrary `session`.
    #[must_use]
    pub fn view_for(&self, session: Session, scope: ListScope) -> MemoryController {
        LifecycleViewController::new(
            Arc::clone(&self.gateway),
            Arc::clone(&self.notifier),
            session,
            scope,
            ControllerSettings::default(),
        )
    }
}

/// Builds a session for `role`; students and companies own the seeded
/// agreements.
#[must_use]
pub fn session(role: ActorRole) -> Session {
    let actor = match role {
        ActorRole::Student => STUDENT,
        ActorRole::Company => COMPANY,
        ActorRole::Faculty | ActorRole::Admin => ActorId::new(7),
    };
    Session::new(
        format!("token-{role}"),
        actor,
        format!("{}@univ.example", role.as_str().to_ascii_lowercase()),
        role,
    )
}

/// Parses an agreement id known to be valid.
///
/// # Panics
///
/// Panics when `value` is zero.
#[must_use]
pub fn agreement_id(value: u64) -> AgreementId {
    AgreementId::new(value).expect("non-zero agreement id")
}

/// Fixed creation time for seeded agreements.
#[fixture]
pub fn created() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 9, 1, 8, 30, 0)
        .single()
        .expect("valid timestamp")
}

/// Provides a backend seeded with two fresh agreements, ids 1 and 2.
#[fixture]
pub fn backend(created: DateTime<Utc>) -> Backend {
    let gateway = InMemoryAgreementGateway::new();
    for (offset, (id, title)) in (0_i64..).zip([(1, "Compiler backend"), (2, "Mobile payments")]) {
        gateway
            .insert(
                Agreement::new(
                    agreement_id(id),
                    AgreementStatus::PendingFacultyValidation,
                    title,
                    "Sami Keller",
                    "Quartz Software",
                )
                .with_parties(STUDENT, COMPANY)
                .with_created_at(created + Duration::minutes(offset)),
            )
            .expect("seed agreement");
    }
    Backend {
        gateway: Arc::new(gateway),
        notifier: Arc::new(RecordingNotifier::new()),
    }
}
