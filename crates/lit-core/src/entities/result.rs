use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{RefTag, RunId};

/// How a batch of results is attached to storage.
///
/// `Run` is the normal mode: every row carries a foreign key to its run and
/// tags continue the run's sequence. `Detached` stores rows with no run and
/// restarts tags at `S00001` for every batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "run_id", rename_all = "snake_case")]
pub enum ResultLink {
    Run(RunId),
    Detached,
}

impl ResultLink {
    #[must_use]
    pub const fn run_id(self) -> Option<RunId> {
        match self {
            Self::Run(id) => Some(id),
            Self::Detached => None,
        }
    }
}

/// A stored search result. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub id: i64,
    pub run_id: Option<RunId>,
    pub ref_id: RefTag,
    pub pmid: String,
    pub title: String,
    pub authors: String,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    pub doi: String,
    pub link: String,
    pub year: i32,
    pub created_at: DateTime<Utc>,
}
