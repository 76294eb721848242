//! Outcome of a language-model generation step.

use serde::{Deserialize, Serialize};

/// What a model call produced.
///
/// Downstream stages only ever consume [`Generation::text`], which is empty
/// for both `Empty` and `Failed`; the variant is kept so a run report can tell
/// "the model answered with nothing" apart from "the model call failed".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Generation {
    /// The model returned non-blank text.
    Produced { text: String },
    /// The model answered, but with blank text.
    Empty,
    /// The call failed; `reason` carries the collaborator's error message.
    Failed { reason: String },
}

impl Generation {
    /// Classify raw model text: blank text becomes `Empty`.
    #[must_use]
    pub fn from_text(text: impl Into<String>) -> Self {
        let text = text.into();
        if text.trim().is_empty() {
            Self::Empty
        } else {
            Self::Produced { text }
        }
    }

    #[must_use]
    pub fn failed(reason: impl Into<String>) -> Self {
        Self::Failed {
            reason: reason.into(),
        }
    }

    /// The produced text, or `""` when nothing usable came back.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Produced { text } => text,
            Self::Empty | Self::Failed { .. } => "",
        }
    }

    #[must_use]
    pub const fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    /// Short label for logs and reports.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Produced { .. } => "produced",
            Self::Empty => "empty",
            Self::Failed { .. } => "failed",
        }
    }
}
