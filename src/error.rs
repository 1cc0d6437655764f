//! Error types for reach combination and catalog loading.

use thiserror::Error;

/// Errors produced by the reach engine.
///
/// The combinators themselves only fail on malformed input; degenerate
/// samples (empty populations, zero occurrences) are valid and never error.
#[derive(Error, Debug)]
pub enum ReachError {
    /// Two vectors with different byte lengths were combined.
    #[error("reach vector length mismatch: {left} bytes vs {right} bytes")]
    LengthMismatch { left: usize, right: usize },

    /// A bit string contained something other than `0`, `1` or a separator.
    #[error("invalid character {found:?} at position {position} in bit string")]
    InvalidBitString { position: usize, found: char },

    /// A bit string did not describe whole bytes.
    #[error("bit string has {bits} bits, expected a multiple of 8")]
    UnalignedBitString { bits: usize },

    /// A catalog atom does not match the catalog's sample size.
    #[error("vector {key}={value} has {found} bytes, catalog expects {expected}")]
    CatalogLengthMismatch {
        key: String,
        value: String,
        expected: usize,
        found: usize,
    },

    #[cfg(feature = "serde")]
    #[error("malformed reach document: {0}")]
    Json(#[from] serde_json::Error),

    #[cfg(feature = "serde")]
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T, E = ReachError> = core::result::Result<T, E>;
