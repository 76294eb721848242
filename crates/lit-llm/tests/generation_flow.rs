//! Purpose then strategy, chained the way a run chains them.

use lit_core::extract::extract_fenced;
use lit_core::generation::Generation;
use lit_llm::{LlmError, TextModel, generate_research_purpose, generate_search_strategy};
use pretty_assertions::assert_eq;

/// Answers purpose prompts and strategy prompts differently.
struct ByPrompt;

impl TextModel for ByPrompt {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        if prompt.starts_with("User Query:") {
            Ok("Here is the query:\n```\n(nsaid OR nsaids) AND (knee) AND (osteoarthritis)\n```".into())
        } else {
            Ok("```To evaluate NSAIDs in knee osteoarthritis.```".into())
        }
    }
}

struct Offline;

impl TextModel for Offline {
    async fn complete(&self, _prompt: &str) -> Result<String, LlmError> {
        Err(LlmError::Parse("connection refused".into()))
    }
}

#[tokio::test]
async fn fenced_purpose_feeds_strategy() {
    let query = "efficacy of NSAIDs in knee osteoarthritis";
    let purpose = generate_research_purpose(&ByPrompt, query).await;
    let purpose = extract_fenced(purpose.text()).as_str().to_string();
    assert_eq!(purpose, "To evaluate NSAIDs in knee osteoarthritis.");

    let strategy = generate_search_strategy(&ByPrompt, query, &purpose).await;
    assert_eq!(
        extract_fenced(strategy.text()).as_str(),
        "(nsaid OR nsaids) AND (knee) AND (osteoarthritis)"
    );
}

#[tokio::test]
async fn offline_model_yields_empty_text_for_both_stages() {
    let purpose = generate_research_purpose(&Offline, "q").await;
    let strategy = generate_search_strategy(&Offline, "q", purpose.text()).await;
    assert!(matches!(purpose, Generation::Failed { .. }));
    assert!(matches!(strategy, Generation::Failed { .. }));
    assert_eq!(strategy.text(), "");
}
