//! Shared HTTP response check for the model client.

use crate::error::LlmError;

/// Return the response unchanged on success, [`LlmError::Api`] otherwise.
///
/// Ollama reports unknown models and load failures as non-2xx JSON bodies;
/// the body is kept as the message.
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, LlmError> {
    if !resp.status().is_success() {
        return Err(LlmError::Api {
            status: resp.status().as_u16(),
            message: resp.text().await.unwrap_or_default(),
        });
    }
    Ok(resp)
}
