//! Export file name validation.

use std::path::{Path, PathBuf};

use crate::error::ExportError;

/// Extension every export carries.
pub const XLSX_EXTENSION: &str = ".xlsx";

/// Validate a bare file name and place it under `output_dir`.
///
/// The name must be non-empty and must not contain `/` or `\`; exports never
/// escape the output directory. `.xlsx` is appended unless the name already
/// carries it, compared case-insensitively.
///
/// # Errors
///
/// Returns `ExportError::InvalidFilename` for an empty name or one containing
/// a path separator.
pub fn resolve_export_path(output_dir: &Path, name: &str) -> Result<PathBuf, ExportError> {
    if name.trim().is_empty() {
        return Err(ExportError::InvalidFilename {
            name: name.to_string(),
            reason: "filename cannot be empty",
        });
    }
    if name.contains(['/', '\\']) {
        return Err(ExportError::InvalidFilename {
            name: name.to_string(),
            reason: "filename must not contain slashes",
        });
    }
    let has_extension = Path::new(name)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(XLSX_EXTENSION.trim_start_matches('.')));
    let file_name = if has_extension {
        name.to_string()
    } else {
        format!("{name}{XLSX_EXTENSION}")
    };
    Ok(output_dir.join(file_name))
}
