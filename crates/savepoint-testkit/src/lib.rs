//! # Savepoint Testkit
//!
//! Shared test fixtures and proptest generators for Savepoint documents.
//! Fixtures are fully deterministic (fixed ids and timestamps) so they can
//! anchor determinism and golden-style assertions.

pub mod fixtures;
pub mod generators;

pub use fixtures::{chat_savepoint, deterministic_savepoint, TestFixture};
