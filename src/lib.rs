//! Stagedesk: internship agreement lifecycle client.
//!
//! The backend owns the four-party approval pipeline of an internship
//! agreement (student signature, company signature, faculty validation,
//! administrator approval). This crate talks to it over HTTP, derives what
//! each view should show, and decides which actions each role is offered.
//!
//! # Architecture
//!
//! Stagedesk follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (HTTP, in-memory, logging)
//!
//! # Modules
//!
//! - [`agreement`]: Agreement model, status projector, action gate, gateway
//!   and the lifecycle view controller
//! - [`session`]: Authenticated actor context
//! - [`config`]: Client configuration
//! - [`telemetry`]: Tracing subscriber setup

pub mod agreement;
pub mod config;
pub mod session;
pub mod telemetry;
