//! Error types for rejected collection operations.
//!
//! Uses `thiserror` for ergonomic error definition.

use std::fmt;

use thiserror::Error;

/// The error type for fallible collection operations.
///
/// Absent keys are not errors: lookups report them through [`Option`] and
/// removing a missing key is a no-op. The only failure mode is an insert-only
/// operation colliding with a key that is already present, in which case the
/// map is left exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// An insert-only operation found the key already present.
    #[error("duplicate key: {key}")]
    DuplicateKey {
        /// Debug rendering of the rejected key.
        key: String,
    },
}

impl Error {
    /// Creates a duplicate key error from the rejected key.
    #[must_use]
    pub fn duplicate_key(key: &impl fmt::Debug) -> Self {
        Self::DuplicateKey {
            key: format!("{key:?}"),
        }
    }
}
