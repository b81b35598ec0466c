//! In-memory adapters for lifecycle tests and local flows.

mod gateway;
mod notifier;

pub use gateway::{GatewayOperation, InMemoryAgreementGateway};
pub use notifier::RecordingNotifier;
