//! Language-model error types.

use thiserror::Error;

/// Errors from a model call.
///
/// Generators never surface these to the pipeline; they are folded into
/// [`lit_core::generation::Generation::Failed`] after being logged.
#[derive(Debug, Error)]
pub enum LlmError {
    /// HTTP transport error, including timeouts.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The model server returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the server.
        status: u16,
        /// Error message or response body.
        message: String,
    },

    /// The response body did not have the expected shape.
    #[error("parse error: {0}")]
    Parse(String),
}
