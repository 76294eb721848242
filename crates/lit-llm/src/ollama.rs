//! Ollama `/api/generate` client.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use lit_config::LlmConfig;

use crate::TextModel;
use crate::error::LlmError;
use crate::http::check_response;
use crate::prompts::SYSTEM_INSTRUCTION;

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    system: &'a str,
    stream: bool,
}

#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
}

/// Text model served by a local Ollama instance.
#[derive(Clone)]
pub struct OllamaClient {
    base_url: String,
    model: String,
    http: reqwest::Client,
}

impl OllamaClient {
    /// Build a client from the `[llm]` config section.
    ///
    /// # Errors
    ///
    /// Returns `LlmError::Http` if the underlying `reqwest::Client` fails to build.
    pub fn new(config: &LlmConfig) -> Result<Self, LlmError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("litscout/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            http,
        })
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    fn generate_url(&self) -> String {
        format!("{}/api/generate", self.base_url)
    }
}

impl TextModel for OllamaClient {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        let request = GenerateRequest {
            model: &self.model,
            prompt,
            system: SYSTEM_INSTRUCTION,
            stream: false,
        };
        tracing::debug!(model = %self.model, chars = prompt.len(), "sending prompt");

        let resp = check_response(
            self.http
                .post(self.generate_url())
                .json(&request)
                .send()
                .await?,
        )
        .await?;

        let body = resp.text().await?;
        parse_generate_response(&body)
    }
}

/// Pull the generated text out of a non-streaming `/api/generate` body.
fn parse_generate_response(body: &str) -> Result<String, LlmError> {
    let parsed: GenerateResponse =
        serde_json::from_str(body).map_err(|e| LlmError::Parse(e.to_string()))?;
    Ok(parsed.response.trim().to_string())
}
