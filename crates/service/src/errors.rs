use thiserror::Error;

use crate::car::domain::CarId;

/// Closed set of outcomes a storage-contract call can fail with.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CarError {
    #[error("car model not found")]
    NotFound(CarId),
    #[error("'price' field is invalid")]
    BadPrice,
    #[error("'mileage' field is invalid")]
    BadMileage,
    #[error("storage error: {0}")]
    Storage(String),
    #[error("deadline exceeded before the storage call completed")]
    DeadlineExceeded,
    #[error("storage call cancelled")]
    Cancelled,
}

impl CarError {
    pub fn storage(err: impl std::fmt::Display) -> Self {
        Self::Storage(err.to_string())
    }
}
