//! SQLite persistence adapters.
//!
//! Provides the SQLite-backed entity store and the read-side report reader
//! using Diesel ORM.

pub mod database;
pub mod report;
pub mod store;

pub use report::SqliteReportReader;
pub use store::SqliteStore;
