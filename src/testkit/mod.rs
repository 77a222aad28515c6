//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`db`] - Throwaway SQLite files with the schema applied.
//! - [`domain`] - Entity builders and the canonical seed data set.

pub mod db;
pub mod domain;

pub use db::TempDatabase;
pub use domain::{seed, seed_today};
