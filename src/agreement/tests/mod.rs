//! Unit tests for the agreement module.
//!
//! Tests are organised by concern: wire decoding and value types, the status
//! projector, the action gate, the in-memory backend, and the lifecycle view
//! controller.

mod domain_tests;
