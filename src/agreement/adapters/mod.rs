//! Adapter implementations for agreement lifecycle ports.

pub mod http;
pub mod log;
pub mod memory;

pub use http::HttpAgreementGateway;
pub use log::TracingNotifier;
