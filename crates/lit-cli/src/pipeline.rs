//! Run pipeline: query → date range → purpose → strategy → search → store → export.
//!
//! One `Pipeline::run` call is one run. Stages execute strictly in order and
//! never go back:
//! 1. Resolve the publication window (explicit bounds, extraction, or fallback)
//! 2. Generate a research purpose and unwrap its fenced block
//! 3. Generate a search strategy from the query and purpose
//! 4. Search PubMed with the strategy and window
//! 5. Persist the run and its results in one transaction
//! 6. Optionally export the committed run to a workbook
//!
//! Model and search failures are logged and degrade to empty values. Only a
//! persistence failure ends the run with an error.

use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, error, info, warn};

use lit_core::entities::NewRun;
use lit_core::extract::{FencedBlock, extract_date_range, extract_fenced};
use lit_core::generation::Generation;
use lit_core::ids::RunId;
use lit_core::range::{DateFallback, DateRange};
use lit_db::ResultStore;
use lit_db::error::DatabaseError;
use lit_llm::generate::{PURPOSE_STAGE, STRATEGY_STAGE};
use lit_llm::{TextModel, generate_research_purpose, generate_search_strategy};
use lit_pubmed::LiteratureSearch;

use crate::progress::Progress;

/// Pipeline position. Each state has exactly one legal successor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineState {
    ReadingQuery,
    RangeResolved,
    PurposeGenerated,
    StrategyGenerated,
    SearchExecuted,
    Persisted,
    Exported,
    Done,
}

impl PipelineState {
    /// The successor of this state, or `None` once the run is over.
    ///
    /// `export` selects the branch out of `Persisted`.
    #[must_use]
    pub const fn next(self, export: bool) -> Option<Self> {
        match self {
            Self::ReadingQuery => Some(Self::RangeResolved),
            Self::RangeResolved => Some(Self::PurposeGenerated),
            Self::PurposeGenerated => Some(Self::StrategyGenerated),
            Self::StrategyGenerated => Some(Self::SearchExecuted),
            Self::SearchExecuted => Some(Self::Persisted),
            Self::Persisted if export => Some(Self::Exported),
            Self::Persisted => Some(Self::Done),
            Self::Exported | Self::Done => None,
        }
    }

    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Exported | Self::Done)
    }
}

/// Where the publication window came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum RangeSource {
    /// `--min-year` and/or `--max-year`.
    Explicit,
    /// A year expression found in the query.
    Extracted { expression: String },
    /// The configured fallback policy.
    Fallback,
}

/// The window a run searches and the query text carried forward.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRange {
    pub range: DateRange,
    pub query: String,
    pub source: RangeSource,
}

/// Pick the publication window for a run.
///
/// Explicit bounds bypass extraction and leave the query untouched:
/// - both bounds → that window, swapped if reversed
/// - only `min_year` → `(min_year, current_year)`
/// - only `max_year` → `(fallback min, max_year)`, swapped if needed
///
/// Without explicit bounds a year expression is extracted from the query and
/// removed from it; failing that, the fallback policy decides.
#[must_use]
pub fn resolve_range(
    query: &str,
    min_year: Option<i32>,
    max_year: Option<i32>,
    fallback: DateFallback,
    current_year: i32,
) -> ResolvedRange {
    let explicit = match (min_year, max_year) {
        (Some(min), Some(max)) => Some(DateRange::new(min, max)),
        (Some(min), None) => Some(DateRange::new(min, current_year)),
        (None, Some(max)) => Some(DateRange::new(
            fallback.resolve(current_year).min_year(),
            max,
        )),
        (None, None) => None,
    };
    if let Some(range) = explicit {
        return ResolvedRange {
            range,
            query: query.trim().to_string(),
            source: RangeSource::Explicit,
        };
    }

    if let Some(found) = extract_date_range(query, current_year) {
        info!(
            min_year = found.range.min_year(),
            max_year = found.range.max_year(),
            expression = %found.expression,
            "extracted date range from query"
        );
        return ResolvedRange {
            range: found.range,
            query: found.residual,
            source: RangeSource::Extracted {
                expression: found.expression,
            },
        };
    }

    let range = fallback.resolve(current_year);
    warn!(
        min_year = range.min_year(),
        max_year = range.max_year(),
        "no date range found in the query, using fallback"
    );
    ResolvedRange {
        range,
        query: query.trim().to_string(),
        source: RangeSource::Fallback,
    }
}

/// Where to write the workbook when a run asks for export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportTarget {
    pub output_dir: PathBuf,
    pub file_name: String,
}

/// Inputs of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineRequest {
    pub query: String,
    pub min_year: Option<i32>,
    pub max_year: Option<i32>,
    pub export: Option<ExportTarget>,
}

/// How the export stage ended. Neither outcome changes the run's success.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ExportOutcome {
    Written { path: PathBuf },
    Failed { reason: String },
}

/// Summary of a completed run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub run_id: RunId,
    pub min_year: i32,
    pub max_year: i32,
    pub range_source: RangeSource,
    pub query: String,
    pub research_purpose: String,
    pub purpose_outcome: &'static str,
    pub search_strategy: String,
    pub strategy_outcome: &'static str,
    pub result_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub export: Option<ExportOutcome>,
    pub states: Vec<PipelineState>,
}

/// The only failure that ends a run early.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("failed to store run: {0}")]
    Persistence(#[from] DatabaseError),
}

/// Visited states, advanced only along [`PipelineState::next`].
struct StateTrail {
    export: bool,
    visited: Vec<PipelineState>,
}

impl StateTrail {
    fn new(export: bool) -> Self {
        Self {
            export,
            visited: vec![PipelineState::ReadingQuery],
        }
    }

    fn current(&self) -> PipelineState {
        self.visited
            .last()
            .copied()
            .unwrap_or(PipelineState::ReadingQuery)
    }

    fn advance(&mut self) {
        if let Some(next) = self.current().next(self.export) {
            debug!(state = ?next, "pipeline state");
            self.visited.push(next);
        }
    }
}

pub struct Pipeline<M, S> {
    model: M,
    search: S,
    store: ResultStore,
    fallback: DateFallback,
    current_year: i32,
}

impl<M: TextModel, S: LiteratureSearch> Pipeline<M, S> {
    pub const fn new(
        model: M,
        search: S,
        store: ResultStore,
        fallback: DateFallback,
        current_year: i32,
    ) -> Self {
        Self {
            model,
            search,
            store,
            fallback,
            current_year,
        }
    }

    #[cfg(test)]
    pub const fn store(&self) -> &ResultStore {
        &self.store
    }

    /// Execute one run end to end.
    ///
    /// # Errors
    ///
    /// Returns `PipelineError::Persistence` if the run could not be stored.
    /// Nothing of the run is kept in that case.
    pub async fn run(&self, request: PipelineRequest) -> Result<RunReport, PipelineError> {
        let mut trail = StateTrail::new(request.export.is_some());

        let resolved = resolve_range(
            &request.query,
            request.min_year,
            request.max_year,
            self.fallback,
            self.current_year,
        );
        trail.advance();

        let progress = Progress::spinner("Generating research purpose...");
        let purpose_generation = generate_research_purpose(&self.model, &resolved.query).await;
        let research_purpose = unwrap_fenced(PURPOSE_STAGE, &purpose_generation);
        progress.finish_clear();
        info!(stage = PURPOSE_STAGE, purpose = %research_purpose, "research purpose ready");
        trail.advance();

        let progress = Progress::spinner("Generating search strategy...");
        let strategy_generation =
            generate_search_strategy(&self.model, &resolved.query, &research_purpose).await;
        let search_strategy = unwrap_fenced(STRATEGY_STAGE, &strategy_generation);
        progress.finish_clear();
        info!(stage = STRATEGY_STAGE, strategy = %search_strategy, "search strategy ready");
        trail.advance();

        let progress = Progress::spinner("Searching PubMed...");
        let range = resolved.range;
        let (articles, search_error) = match self
            .search
            .search(&search_strategy, range.min_year(), range.max_year())
            .await
        {
            Ok(articles) => {
                progress.finish_clear();
                info!(results = articles.len(), "search complete");
                (articles, None)
            }
            Err(err) => {
                progress.finish_err("PubMed search failed");
                let message = err.to_string();
                let kept = err.into_fetched();
                error!(
                    stage = "search",
                    error = %message,
                    kept = kept.len(),
                    "search failed, storing run with the results fetched so far"
                );
                (kept, Some(message))
            }
        };
        trail.advance();

        let persisted = self
            .store
            .persist_run(
                NewRun {
                    range,
                    research_purpose,
                    search_strategy,
                },
                &articles,
            )
            .await?;
        trail.advance();

        let export = match &request.export {
            Some(target) => Some(self.export(persisted.run.id, target).await),
            None => None,
        };
        trail.advance();
        debug_assert!(trail.current().is_terminal());

        Ok(RunReport {
            run_id: persisted.run.id,
            min_year: persisted.run.min_year,
            max_year: persisted.run.max_year,
            range_source: resolved.source,
            query: resolved.query,
            research_purpose: persisted.run.research_purpose,
            purpose_outcome: purpose_generation.kind(),
            search_strategy: persisted.run.search_strategy,
            strategy_outcome: strategy_generation.kind(),
            result_count: persisted.results.len(),
            search_error,
            export,
            states: trail.visited,
        })
    }

    /// Write the committed run, read back from storage, to a workbook.
    async fn export(&self, run_id: RunId, target: &ExportTarget) -> ExportOutcome {
        let written = async {
            let run = self.store.get_run(run_id).await?;
            let results = self.store.list_results(run_id).await?;
            let path = lit_export::export_run(&target.output_dir, &target.file_name, &run, &results)?;
            Ok::<_, anyhow::Error>(path)
        }
        .await;

        match written {
            Ok(path) => ExportOutcome::Written { path },
            Err(err) => {
                error!(stage = "export", error = %err, file = %target.file_name, "export failed");
                ExportOutcome::Failed {
                    reason: format!("{err:#}"),
                }
            }
        }
    }
}

/// Unwrap the fenced payload of a generation, warning when there is no fence.
fn unwrap_fenced(stage: &str, generation: &Generation) -> String {
    let text = generation.text();
    if text.is_empty() {
        return String::new();
    }
    match extract_fenced(text) {
        FencedBlock::Fenced(payload) => payload.to_string(),
        FencedBlock::Raw(raw) => {
            warn!(stage, output = %raw, "no fenced block in model output, using raw text");
            raw.to_string()
        }
    }
}
