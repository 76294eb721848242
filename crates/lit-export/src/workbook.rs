//! Two-sheet workbook writer.

use std::path::Path;

use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};

use lit_core::entities::{RunMetadata, SearchResult};

use crate::error::ExportError;

pub const RESULTS_SHEET: &str = "Search Results";
pub const METADATA_SHEET: &str = "Metadata";

pub const RESULT_HEADERS: [&str; 7] = [
    "RefID", "PMID", "Title", "Authors", "Abstract", "DOI", "Link",
];
pub const METADATA_HEADERS: [&str; 5] = [
    "min_year",
    "max_year",
    "research_purpose",
    "mesh_strategy",
    "export_date",
];

/// Format of the `export_date` cell.
pub const EXPORT_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Excel rejects cells longer than this.
const MAX_CELL_CHARS: usize = 32_767;

/// Write `run` and its `results` to `path`, stamping `export_date`.
///
/// # Errors
///
/// Returns `ExportError::Xlsx` if a cell cannot be written or the file
/// cannot be saved.
pub fn write_workbook(
    path: &Path,
    run: &RunMetadata,
    results: &[SearchResult],
    export_date: &str,
) -> Result<(), ExportError> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();

    {
        let sheet = workbook.add_worksheet();
        sheet.set_name(RESULTS_SHEET)?;
        write_headers(sheet, &RESULT_HEADERS, &header)?;
        for (row, result) in (1u32..).zip(results) {
            let ref_id = result.ref_id.to_string();
            let cells = [
                ref_id.as_str(),
                result.pmid.as_str(),
                result.title.as_str(),
                result.authors.as_str(),
                result.abstract_text.as_str(),
                result.doi.as_str(),
                result.link.as_str(),
            ];
            for (col, value) in (0u16..).zip(cells) {
                sheet.write_string(row, col, clip(value))?;
            }
        }
    }

    {
        let sheet = workbook.add_worksheet();
        sheet.set_name(METADATA_SHEET)?;
        write_headers(sheet, &METADATA_HEADERS, &header)?;
        sheet.write_number(1, 0, f64::from(run.min_year))?;
        sheet.write_number(1, 1, f64::from(run.max_year))?;
        sheet.write_string(1, 2, clip(&run.research_purpose))?;
        sheet.write_string(1, 3, clip(&run.search_strategy))?;
        sheet.write_string(1, 4, export_date)?;
    }

    workbook.save(path)?;
    Ok(())
}

fn write_headers(sheet: &mut Worksheet, headers: &[&str], format: &Format) -> Result<(), XlsxError> {
    for (col, name) in (0u16..).zip(headers) {
        sheet.write_string_with_format(0, col, *name, format)?;
    }
    Ok(())
}

/// Cut `value` to the longest prefix Excel accepts, on a char boundary.
fn clip(value: &str) -> &str {
    match value.char_indices().nth(MAX_CELL_CHARS) {
        Some((idx, _)) => &value[..idx],
        None => value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clip_leaves_short_text_alone() {
        assert_eq!(clip("abstract"), "abstract");
    }

    #[test]
    fn clip_cuts_to_cell_limit() {
        let long = "é".repeat(MAX_CELL_CHARS + 10);
        assert_eq!(clip(&long).chars().count(), MAX_CELL_CHARS);
    }
}
