//! Domain validation errors.
//!
//! These are returned when input that reaches the domain layer violates a
//! rule the storage layer would otherwise reject with a less helpful message.
//!
//! # Examples
//!
//! ```
//! use foodbridge::domain::entity::ClaimStatus;
//! use foodbridge::domain::error::DomainError;
//!
//! let result: Result<ClaimStatus, _> = "Shipped".parse();
//! assert!(matches!(result, Err(DomainError::InvalidStatus { .. })));
//! ```

use thiserror::Error;

/// Errors that occur when domain invariants are violated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Claim status outside `Pending`, `Completed`, `Cancelled`.
    #[error("invalid claim status '{value}' (expected Pending, Completed or Cancelled)")]
    InvalidStatus {
        /// The rejected value.
        value: String,
    },

    /// An update that would not change any field.
    #[error("no fields to update for {entity} {id}")]
    EmptyUpdate {
        /// Entity kind, e.g. `provider`.
        entity: &'static str,
        /// Primary key of the targeted row.
        id: i32,
    },

    /// Generic invalid input, such as an unknown table name.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}
