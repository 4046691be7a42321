//! Error types for the stockpile storage layer

use crate::domain::Item;
use thiserror::Error;

/// Errors surfaced by storages, slots, managers and groups
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backing holder could not be validated.
    ///
    /// Raised by `validate()` whenever the holder cannot be resolved
    /// (broken container, unloaded world, wrong block kind) or is no
    /// longer eligible (disconnected actor). Surfaces unchanged to
    /// every query/update caller.
    #[error("holder is no longer valid: {reason}")]
    HolderInvalid { reason: String },

    /// Slot index or bulk-contents size outside the valid range.
    #[error("index {index} out of bounds for size {size}")]
    IndexOutOfBounds { index: isize, size: usize },

    /// Some items could not be delivered or removed.
    ///
    /// Carries exactly the unprocessed remainder; callers can re-drive
    /// the operation with just these items.
    #[error("{} item stack(s) could not be transferred", leftover.len())]
    PartialTransfer { leftover: Vec<Item> },

    /// Generic backend failure not classifiable above.
    #[error("provider error: {message}")]
    Provider { message: String },
}

impl StorageError {
    /// Shorthand for a `HolderInvalid` with a formatted reason.
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::HolderInvalid { reason: reason.into() }
    }

    /// Shorthand for a `Provider` failure with a formatted message.
    pub fn provider(message: impl Into<String>) -> Self {
        Self::Provider { message: message.into() }
    }
}
