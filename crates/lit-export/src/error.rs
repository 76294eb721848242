//! Export error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from writing a run to a spreadsheet.
///
/// None of these undo a run: the data is already committed when export starts.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The requested file name was rejected before touching the filesystem.
    #[error("invalid export filename {name:?}: {reason}")]
    InvalidFilename { name: String, reason: &'static str },

    /// The output directory could not be created.
    #[error("cannot create {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The workbook could not be built or saved.
    #[error("xlsx error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
}
