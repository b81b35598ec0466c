//! Explicit session context.
//!
//! The authenticated actor (bearer token, user id, role) is carried in a
//! [`Session`] value handed to gateways and controllers, instead of being
//! read from ambient storage. [`SessionContext`] owns the current session
//! between login and logout.

mod auth;
mod context;
mod model;

pub use auth::AuthGateway;
pub use context::{SessionContext, SessionError};
pub use model::{Credentials, LoginResponse, Session};
