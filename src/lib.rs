//! Foodbridge - surplus-food donation tracking over SQLite.
//!
//! Providers list food they can give away, receivers claim it. This crate
//! stores both sides, answers a fixed catalog of aggregate questions and
//! ranks listings by how likely they are to go to waste.
//!
//! # Architecture
//!
//! The crate follows a ports-and-adapters layout:
//!
//! - [`domain`] - Entities, snapshots and the pure heuristics
//!   - `risk` - waste-risk score: normalized quantity over days to expiry
//!   - `forecast` - monthly trend and a moving-average forecast
//! - [`port`] - Store and report traits the application depends on
//! - [`application`] - Dashboard, predefined query catalog and insights
//! - [`adapter`] - SQLite (Diesel) implementations and the `clap` CLI
//! - [`infrastructure`] - TOML configuration and tracing setup
//! - [`error`] - Error types for the crate
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! use foodbridge::adapter::outbound::sqlite::database::connection::{self, ConnectionOptions};
//! use foodbridge::adapter::outbound::sqlite::SqliteReportReader;
//! use foodbridge::application::catalog;
//!
//! fn main() -> foodbridge::error::Result<()> {
//!     let pool = connection::open(Path::new("foodbridge.db"), ConnectionOptions::default())?;
//!     let reports = SqliteReportReader::new(pool);
//!     let (query, result) = catalog::run(&reports, "claim-status")?;
//!     println!("{}: {} rows", query.title, result.len());
//!     Ok(())
//! }
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
