//! Prompt templates for the two generation stages.
//!
//! Both prompts ask for the answer inside a triple-backtick block so the
//! caller can discard any surrounding chatter.

/// System instruction sent with every request.
pub const SYSTEM_INSTRUCTION: &str = "Never use information from previous conversations.";

/// Lead-in token a research purpose is expected to start with.
pub const PURPOSE_LEAD_IN: &str = "To";

/// Prompt asking for a one-sentence research purpose.
#[must_use]
pub fn research_purpose(query: &str) -> String {
    format!(
        "Given the following user query:\n\n\
         \"{query}\"\n\n\
         Generate a concise journal article research purpose in a single sentence that starts \
         with '{PURPOSE_LEAD_IN}' then clearly states the objective of a study. \
         Use the following criteria:\n\
         - The research purpose must start with '{PURPOSE_LEAD_IN}'.\n\
         - The research purpose must be a single sentence.\n\
         - For example, 'To investigate the efficacy of X compared to Y in treating Z.'\n\
         - If the query includes specific conditions (e.g., study designs, treatments, or patient \
         populations), incorporate them appropriately.\n\
         - Only rewrite the research purpose if absolutely necessary.\n\
         - Enclose the research purpose in triple backticks. Do not include extra text."
    )
}

/// Prompt asking for a boolean search strategy built from `query` and `purpose`.
#[must_use]
pub fn search_strategy(query: &str, purpose: &str) -> String {
    format!(
        "User Query: \"{query}\"\n\n\
         Research Purpose: \"{purpose}\"\n\n\
         Create a simple boolean search query to capture the most studies based on the criteria \
         below:\n\
         - Ensure the search is not restrictive and captures all relevant studies.\n\
         - Never use compound words. Split compound words and use 'AND' and 'OR' to join each \
         simple word.\n\
         - Never unnecessarily capitalize words.\n\
         - Use parentheses to group synonyms and related terms, which should be separated by 'OR'.\n\
         - Use 'AND' to combine different groups of terms.\n\
         - Only specify population, intervention, and outcome terms.\n\
         - Avoid specifying date ranges.\n\
         - Output ONLY the boolean search query in triple backticks. Do not include extra text."
    )
}
