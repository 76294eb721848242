//! # lit-export
//!
//! Writes a persisted run to an `.xlsx` workbook with two sheets:
//! "Search Results" (one row per result, in tag order) and "Metadata" (the
//! run's window, purpose, strategy, and the export timestamp).
//!
//! Export reads committed data only; a failure here never affects the run.

mod error;
pub mod path;
pub mod workbook;

use std::path::{Path, PathBuf};

use chrono::Local;
use tracing::info;

use lit_core::entities::{RunMetadata, SearchResult};

pub use error::ExportError;
pub use path::resolve_export_path;

/// Validate `name`, create `output_dir` if needed, and write the workbook.
///
/// Returns the path written.
///
/// # Errors
///
/// Returns `ExportError` if the name is invalid, the directory cannot be
/// created, or the workbook cannot be saved.
pub fn export_run(
    output_dir: &Path,
    name: &str,
    run: &RunMetadata,
    results: &[SearchResult],
) -> Result<PathBuf, ExportError> {
    let path = resolve_export_path(output_dir, name)?;
    std::fs::create_dir_all(output_dir).map_err(|source| ExportError::Io {
        path: output_dir.to_path_buf(),
        source,
    })?;

    let export_date = Local::now().format(workbook::EXPORT_DATE_FORMAT).to_string();
    workbook::write_workbook(&path, run, results, &export_date)?;
    info!(path = %path.display(), run_id = %run.id, rows = results.len(), "run exported");
    Ok(path)
}
