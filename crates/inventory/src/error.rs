use thiserror::Error;

use warehouse_core::{DomainError, Sku};

use crate::location::Location;

/// Failure of a single index operation.
///
/// Every variant is returned before the index is touched; a failed call leaves
/// the index exactly as it was.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum IndexError {
    #[error("invalid quantity {quantity}: must be a positive integer")]
    InvalidQuantity { quantity: i64 },

    #[error("no placement of {sku} at {location}")]
    NoSuchPlacement { sku: Sku, location: Location },

    #[error("insufficient quantity of {sku} at {location} (requested={requested}, available={available})")]
    InsufficientQuantity {
        sku: Sku,
        location: Location,
        requested: i64,
        available: i64,
    },

    #[error("quantity of {sku} at {location} would overflow")]
    QuantityOverflow { sku: Sku, location: Location },

    #[error("invalid tolerance {tolerance}: must be a non-negative distance")]
    InvalidTolerance { tolerance: f64 },

    #[error("non-monotonic sequence number (last={last}, found={found})")]
    NonMonotonicSequence { last: u64, found: u64 },

    #[error(transparent)]
    Domain(#[from] DomainError),
}
