//! # lit-db
//!
//! libSQL result store for LitScout.
//!
//! Holds one `run_metadata` row per pipeline run and the `search_results`
//! rows linked to it. A run and its results are written in a single
//! transaction through [`session::StoreSession`]; [`store::ResultStore`] wraps
//! that unit of work and the read-back queries used for export.

pub mod error;
pub mod helpers;
mod migrations;
pub mod session;
pub mod store;

use error::DatabaseError;
use libsql::Builder;

pub use session::StoreSession;
pub use store::{PersistedRun, ResultStore};

/// Raw database handle: a libSQL database and its single connection.
pub struct LitDb {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
}

impl LitDb {
    /// Open a local database at the given path, or `":memory:"`.
    ///
    /// Runs migrations automatically on first open.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;

        // Enable foreign keys (must be per-connection in SQLite)
        conn.execute("PRAGMA foreign_keys = ON", ())
            .await
            .map_err(|e| DatabaseError::Migration(format!("PRAGMA foreign_keys: {e}")))?;

        let lit_db = Self { db, conn };
        lit_db.run_migrations().await?;
        Ok(lit_db)
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }
}
