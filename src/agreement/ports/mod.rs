//! Port contracts for the agreement lifecycle.
//!
//! Ports define infrastructure-agnostic interfaces used by the lifecycle
//! view controller.

pub mod gateway;
pub mod notifier;

pub use gateway::{AgreementDocument, AgreementGateway, GatewayError, GatewayResult};
pub use notifier::{Notice, NoticeId, NoticeLevel, Notifier};
