//! # lit-llm
//!
//! Research purpose and search strategy generation for LitScout.
//!
//! The pipeline talks to a language model only through [`TextModel`]. The
//! production implementation is [`OllamaClient`]; tests substitute scripted
//! models. Generators turn model errors into
//! [`Generation::Failed`](lit_core::generation::Generation) so a flaky model
//! never aborts a run.

mod error;
pub mod generate;
mod http;
pub mod ollama;
pub mod prompts;

use std::future::Future;

pub use error::LlmError;
pub use generate::{generate_research_purpose, generate_search_strategy};
pub use ollama::OllamaClient;

/// A text-completion collaborator: prompt in, text out.
pub trait TextModel: Send + Sync {
    /// Complete `prompt` and return the model's text.
    fn complete(&self, prompt: &str) -> impl Future<Output = Result<String, LlmError>> + Send;
}
