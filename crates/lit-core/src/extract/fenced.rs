//! Triple-backtick payload extraction from model output.
//!
//! Prompts ask the model to wrap its answer in a fenced block so that any
//! chatter around it can be discarded. Models do not always comply, so a
//! missing fence degrades to the raw (trimmed) text instead of failing.

const FENCE: &str = "```";

/// Result of looking for a fenced block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FencedBlock<'a> {
    /// Trimmed content of the first fenced block.
    Fenced(&'a str),
    /// No fence pair was found; the trimmed input.
    Raw(&'a str),
}

impl<'a> FencedBlock<'a> {
    #[must_use]
    pub const fn as_str(self) -> &'a str {
        match self {
            Self::Fenced(s) | Self::Raw(s) => s,
        }
    }

    #[must_use]
    pub const fn is_fenced(self) -> bool {
        matches!(self, Self::Fenced(_))
    }
}

/// Return the trimmed content between the first pair of triple-backtick fences.
///
/// Only the first pair is used. Without a complete pair the whole input comes
/// back trimmed, as [`FencedBlock::Raw`].
#[must_use]
pub fn extract_fenced(text: &str) -> FencedBlock<'_> {
    let Some(open) = text.find(FENCE) else {
        return FencedBlock::Raw(text.trim());
    };
    let body_start = open + FENCE.len();
    match text[body_start..].find(FENCE) {
        Some(len) => FencedBlock::Fenced(text[body_start..body_start + len].trim()),
        None => FencedBlock::Raw(text.trim()),
    }
}
