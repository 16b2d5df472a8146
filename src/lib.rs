//! Thread-safe insertion-ordered maps and set algebra.
//!
//! This crate provides:
//! - [`OrderedMap`] - A keyed map that preserves insertion order and is safe
//!   to read and write from many threads at once
//! - [`Set`] - A set of unique elements with union, intersection, and
//!   difference
//! - [`Error`] - The error type for rejected insertions

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod ordered;
pub mod set;

pub use error::Error;
pub use ordered::OrderedMap;
pub use set::Set;

/// Result alias for fallible collection operations.
pub type Result<T> = std::result::Result<T, Error>;
