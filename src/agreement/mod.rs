//! Internship agreement lifecycle tracking.
//!
//! The backend owns the approval pipeline (student signature, company
//! signature, faculty validation, admin approval). This module keeps a
//! read-mostly client-side projection of it: it fetches agreements, derives
//! display state and permitted actions, issues mutations and refetches after
//! each one. The module follows hexagonal architecture:
//!
//! - Domain types, the status projector and the action gate in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - The lifecycle view controller in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
