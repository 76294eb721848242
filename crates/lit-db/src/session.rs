//! One unit of work against the result store.
//!
//! A [`StoreSession`] owns an open transaction. Nothing it writes is visible
//! to other connections until [`StoreSession::commit`]; dropping the session
//! without committing rolls everything back.

use chrono::{DateTime, Utc};
use tracing::debug;

use lit_core::entities::{NewRun, RawArticle, ResultLink, SearchResult};
use lit_core::ids::{RefTag, RunId};

use crate::error::DatabaseError;

pub struct StoreSession {
    tx: libsql::Transaction,
    created_at: DateTime<Utc>,
}

impl StoreSession {
    pub(crate) const fn new(tx: libsql::Transaction, created_at: DateTime<Utc>) -> Self {
        Self { tx, created_at }
    }

    /// Timestamp stamped on every row written through this session.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Insert the run row and return its store-assigned ID.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the insert fails.
    pub async fn begin_run(&self, run: &NewRun) -> Result<RunId, DatabaseError> {
        self.tx
            .execute(
                "INSERT INTO run_metadata (min_year, max_year, research_purpose, search_strategy, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                libsql::params![
                    i64::from(run.range.min_year()),
                    i64::from(run.range.max_year()),
                    run.research_purpose.as_str(),
                    run.search_strategy.as_str(),
                    self.created_at.to_rfc3339()
                ],
            )
            .await?;
        let id = RunId(self.tx.last_insert_rowid());
        debug!(run_id = %id, range = %run.range, "run row inserted");
        Ok(id)
    }

    /// Normalize and insert a batch of articles, assigning reference tags.
    ///
    /// Linked batches continue the run's existing tag sequence. Detached
    /// batches always start at `S00001`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` on the first row that fails to insert. Rows
    /// already written in this session are discarded with it unless the
    /// caller commits anyway.
    pub async fn record_results(
        &self,
        link: ResultLink,
        articles: &[RawArticle],
    ) -> Result<Vec<SearchResult>, DatabaseError> {
        let start = self.next_tag(link).await?;
        let run_id = link.run_id();
        let stamp = self.created_at.to_rfc3339();
        let mut stored = Vec::with_capacity(articles.len());

        for (tag, article) in RefTag::sequence(start, articles.len()).zip(articles) {
            let row = article.normalize();
            self.tx
                .execute(
                    "INSERT INTO search_results (run_id, seq, ref_id, pmid, title, authors, abstract, doi, link, year, created_at)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
                    libsql::params![
                        run_id.map(RunId::get),
                        i64::from(tag.seq()),
                        tag.to_string(),
                        row.pmid.as_str(),
                        row.title.as_str(),
                        row.authors.as_str(),
                        row.abstract_text.as_str(),
                        row.doi.as_str(),
                        row.link.as_str(),
                        i64::from(row.year),
                        stamp.as_str()
                    ],
                )
                .await?;

            stored.push(SearchResult {
                id: self.tx.last_insert_rowid(),
                run_id,
                ref_id: tag,
                pmid: row.pmid,
                title: row.title,
                authors: row.authors,
                abstract_text: row.abstract_text,
                doi: row.doi,
                link: row.link,
                year: row.year,
                created_at: self.created_at,
            });
        }

        debug!(count = stored.len(), ?link, "results recorded");
        Ok(stored)
    }

    /// Make everything written in this session durable.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the commit fails; nothing is kept in that case.
    pub async fn commit(self) -> Result<(), DatabaseError> {
        self.tx.commit().await?;
        Ok(())
    }

    /// Discard everything written in this session.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the rollback statement itself fails.
    pub async fn rollback(self) -> Result<(), DatabaseError> {
        self.tx.rollback().await?;
        Ok(())
    }

    async fn next_tag(&self, link: ResultLink) -> Result<RefTag, DatabaseError> {
        let Some(run_id) = link.run_id() else {
            return Ok(RefTag::first());
        };
        let mut rows = self
            .tx
            .query(
                "SELECT COALESCE(MAX(seq), 0) FROM search_results WHERE run_id = ?1",
                [run_id.get()],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        let last = u32::try_from(row.get::<i64>(0)?).map_err(|_| {
            DatabaseError::InvalidState(format!("run {run_id} has an out-of-range sequence"))
        })?;
        RefTag::new(last + 1).map_err(|e| DatabaseError::InvalidState(e.to_string()))
    }
}
