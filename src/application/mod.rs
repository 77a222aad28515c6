//! Application services (use cases).
//!
//! These services orchestrate domain logic over the read-side port to
//! produce the reports the CLI renders.

pub mod catalog;
pub mod dashboard;
pub mod insights;
