//! Research purpose and search strategy generators.
//!
//! Both return the model's raw text wrapped in a [`Generation`]. Fence
//! extraction is left to the caller so it can log a missing fence with the
//! stage it happened in.

use tracing::{debug, error};

use lit_core::generation::Generation;

use crate::{TextModel, prompts};

/// Stage label for the research purpose step.
pub const PURPOSE_STAGE: &str = "purpose";
/// Stage label for the search strategy step.
pub const STRATEGY_STAGE: &str = "strategy";

/// Ask the model for a one-sentence research purpose for `query`.
///
/// A failed call is logged and returned as [`Generation::Failed`]; it never
/// propagates.
pub async fn generate_research_purpose<M: TextModel>(model: &M, query: &str) -> Generation {
    run_stage(model, PURPOSE_STAGE, &prompts::research_purpose(query)).await
}

/// Ask the model for a boolean search strategy from `query` and `purpose`.
///
/// `purpose` may be empty when the previous stage produced nothing.
pub async fn generate_search_strategy<M: TextModel>(
    model: &M,
    query: &str,
    purpose: &str,
) -> Generation {
    run_stage(model, STRATEGY_STAGE, &prompts::search_strategy(query, purpose)).await
}

async fn run_stage<M: TextModel>(model: &M, stage: &str, prompt: &str) -> Generation {
    match model.complete(prompt).await {
        Ok(text) => {
            let generation = Generation::from_text(text);
            debug!(stage, outcome = generation.kind(), "model answered");
            generation
        }
        Err(err) => {
            error!(stage, error = %err, "model call failed");
            Generation::failed(err.to_string())
        }
    }
}
