//! Error types for attribute box ingest.
//!
//! Resolution itself is total and never fails: missing or malformed
//! fields degrade to defaults (`0`, `None`, `false`, `"Missing"`).
//! Errors only arise at the ingest boundary, where the upstream
//! parser's JSON tree is turned into an [`AttributeBox`], or when a
//! raw slot number is out of range.
//!
//! [`AttributeBox`]: crate::AttributeBox

use thiserror::Error;

/// Errors that can occur while building resolution inputs.
///
/// # Examples
///
/// ```rust
/// use wikibox::{BoxError, VariantSlot};
///
/// let err = VariantSlot::try_from(9).unwrap_err();
/// assert!(matches!(err, BoxError::InvalidSlot(9)));
/// ```
#[derive(Debug, Error)]
pub enum BoxError {
    /// The upstream JSON tree does not decode into a flat
    /// key→field-value map.
    #[error("malformed attribute box: {0}")]
    Malformed(#[from] serde_json::Error),

    /// A variant slot number outside 1..=8.
    #[error("variant slot out of range: {0} (expected 1..=8)")]
    InvalidSlot(u8),
}
