use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::RunId;
use crate::range::DateRange;

/// Everything needed to open a run, before the store assigns its ID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRun {
    pub range: DateRange,
    pub research_purpose: String,
    pub search_strategy: String,
}

/// One pipeline execution as persisted. Immutable once written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunMetadata {
    pub id: RunId,
    pub min_year: i32,
    pub max_year: i32,
    pub research_purpose: String,
    pub search_strategy: String,
    pub created_at: DateTime<Utc>,
}

impl RunMetadata {
    #[must_use]
    pub const fn range(&self) -> DateRange {
        DateRange::new(self.min_year, self.max_year)
    }
}
