//! HTTP adapter for the agreement backend.

mod client;
mod disposition;

pub use client::HttpAgreementGateway;
