//! Result store: transactional run persistence and read-back queries.
//!
//! `ResultStore` wraps `LitDb` (raw database access). Writes go through a
//! [`StoreSession`]; [`ResultStore::persist_run`] is the full unit of work the
//! pipeline uses:
//! 1. Begin transaction
//! 2. Insert the run row
//! 3. Insert its results, tagged `S00001..`
//! 4. Commit, or roll back on the first error

use chrono::Utc;
use serde::Serialize;
use tracing::{error, info, warn};

use lit_core::entities::{
    NO_ABSTRACT, NO_AUTHORS, NO_DOI, NO_LINK, NO_YEAR, NewRun, RawArticle, ResultLink,
    RunMetadata, SearchResult,
};
use lit_core::errors::CoreError;
use lit_core::ids::{RefTag, RunId};

use crate::LitDb;
use crate::error::DatabaseError;
use crate::helpers::{get_text_or, parse_datetime, to_i32};
use crate::session::StoreSession;

/// A committed run and the results written with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PersistedRun {
    pub run: RunMetadata,
    pub results: Vec<SearchResult>,
}

pub struct ResultStore {
    db: LitDb,
}

const RUN_COLUMNS: &str =
    "id, min_year, max_year, research_purpose, search_strategy, created_at";

const RESULT_COLUMNS: &str =
    "id, run_id, ref_id, pmid, title, authors, abstract, doi, link, year, created_at";

fn row_to_run(row: &libsql::Row) -> Result<RunMetadata, DatabaseError> {
    Ok(RunMetadata {
        id: RunId(row.get::<i64>(0)?),
        min_year: to_i32(row.get::<i64>(1)?, "min_year")?,
        max_year: to_i32(row.get::<i64>(2)?, "max_year")?,
        research_purpose: row.get::<String>(3)?,
        search_strategy: row.get::<String>(4)?,
        created_at: parse_datetime(&row.get::<String>(5)?)?,
    })
}

fn row_to_result(row: &libsql::Row) -> Result<SearchResult, DatabaseError> {
    let ref_id: RefTag = row
        .get::<String>(2)?
        .parse()
        .map_err(|e: CoreError| DatabaseError::InvalidState(e.to_string()))?;
    Ok(SearchResult {
        id: row.get::<i64>(0)?,
        run_id: row.get::<Option<i64>>(1)?.map(RunId),
        ref_id,
        pmid: row.get::<String>(3)?,
        title: row.get::<String>(4)?,
        authors: get_text_or(row, 5, NO_AUTHORS)?,
        abstract_text: get_text_or(row, 6, NO_ABSTRACT)?,
        doi: get_text_or(row, 7, NO_DOI)?,
        link: get_text_or(row, 8, NO_LINK)?,
        year: to_i32(
            row.get::<Option<i64>>(9)?.unwrap_or(i64::from(NO_YEAR)),
            "year",
        )?,
        created_at: parse_datetime(&row.get::<String>(10)?)?,
    })
}

impl ResultStore {
    /// Open (or create) a store at `path`; `":memory:"` for tests.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or migrated.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        let db = LitDb::open_local(path).await?;
        Ok(Self { db })
    }

    /// Create from an existing `LitDb`.
    #[must_use]
    pub const fn from_db(db: LitDb) -> Self {
        Self { db }
    }

    /// Access the underlying database handle.
    #[must_use]
    pub const fn db(&self) -> &LitDb {
        &self.db
    }

    /// Open a transaction for one run.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the transaction cannot be started.
    pub async fn session(&self) -> Result<StoreSession, DatabaseError> {
        let tx = self.db.conn().transaction().await?;
        Ok(StoreSession::new(tx, Utc::now()))
    }

    /// Write a run and all of its results atomically.
    ///
    /// On any failure the session is rolled back and the original error is
    /// returned. A failed rollback is logged and does not replace it.
    ///
    /// # Errors
    ///
    /// Returns the first `DatabaseError` raised while writing.
    pub async fn persist_run(
        &self,
        run: NewRun,
        articles: &[RawArticle],
    ) -> Result<PersistedRun, DatabaseError> {
        let session = self.session().await?;
        let created_at = session.created_at();

        let written = async {
            let id = session.begin_run(&run).await?;
            let results = session.record_results(ResultLink::Run(id), articles).await?;
            Ok::<_, DatabaseError>((id, results))
        }
        .await;

        match written {
            Ok((id, results)) => {
                session.commit().await?;
                info!(run_id = %id, results = results.len(), "run persisted");
                Ok(PersistedRun {
                    run: RunMetadata {
                        id,
                        min_year: run.range.min_year(),
                        max_year: run.range.max_year(),
                        research_purpose: run.research_purpose,
                        search_strategy: run.search_strategy,
                        created_at,
                    },
                    results,
                })
            }
            Err(err) => {
                error!(error = %err, "persisting run failed, rolling back");
                if let Err(rollback_err) = session.rollback().await {
                    warn!(error = %rollback_err, "rollback failed");
                }
                Err(err)
            }
        }
    }

    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` if no run has this ID.
    pub async fn get_run(&self, id: RunId) -> Result<RunMetadata, DatabaseError> {
        let mut rows = self
            .db
            .conn()
            .query(
                &format!("SELECT {RUN_COLUMNS} FROM run_metadata WHERE id = ?1"),
                [id.get()],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_run(&row)
    }

    /// Results of a run in tag order.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query or row parsing fails.
    pub async fn list_results(&self, id: RunId) -> Result<Vec<SearchResult>, DatabaseError> {
        let mut rows = self
            .db
            .conn()
            .query(
                &format!(
                    "SELECT {RESULT_COLUMNS} FROM search_results WHERE run_id = ?1 ORDER BY seq, id"
                ),
                [id.get()],
            )
            .await?;
        let mut results = Vec::new();
        while let Some(row) = rows.next().await? {
            results.push(row_to_result(&row)?);
        }
        Ok(results)
    }

    /// Most recent runs first.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query or row parsing fails.
    pub async fn list_runs(&self, limit: u32) -> Result<Vec<RunMetadata>, DatabaseError> {
        let mut rows = self
            .db
            .conn()
            .query(
                &format!("SELECT {RUN_COLUMNS} FROM run_metadata ORDER BY id DESC LIMIT ?1"),
                [i64::from(limit)],
            )
            .await?;
        let mut runs = Vec::new();
        while let Some(row) = rows.next().await? {
            runs.push(row_to_run(&row)?);
        }
        Ok(runs)
    }

    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn count_runs(&self) -> Result<u64, DatabaseError> {
        let mut rows = self
            .db
            .conn()
            .query("SELECT COUNT(*) FROM run_metadata", ())
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        u64::try_from(row.get::<i64>(0)?)
            .map_err(|_| DatabaseError::InvalidState("negative run count".to_string()))
    }
}
