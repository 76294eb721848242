//! Cross-cutting error types for LitScout.
//!
//! Domain-specific errors (e.g., `DatabaseError`, `PubMedError`) are defined in
//! their respective crates. The binary converges them through `anyhow`.

use thiserror::Error;

/// Errors that can be raised while constructing core domain values.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A reference tag string did not match the `S00001` shape.
    #[error("Invalid reference tag: {0}")]
    InvalidRefTag(String),

    /// Data failed validation (format, constraints).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
