//! Storage-agnostic domain logic.
//!
//! - [`entity`] - the four persisted entities and their write payloads
//! - [`snapshot`] - joined read snapshots consumed by the analytics
//! - [`risk`] - waste-risk scoring
//! - [`forecast`] - monthly trend and naive forecast
//! - [`insight`] - exploratory aggregates (KPIs, top foods, near expiry)
//! - [`result_set`] - tabular results with named columns

pub mod entity;
pub mod error;
pub mod forecast;
pub mod insight;
pub mod result_set;
pub mod risk;
pub mod snapshot;
