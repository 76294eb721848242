//! Row-to-entity parsing helpers.
//!
//! These isolate column parsing and handle the dual datetime format issue
//! (`SQLite`'s `datetime('now')` vs Rust's `to_rfc3339()`).

use chrono::{DateTime, Utc};

use crate::error::DatabaseError;

/// Parse a required TEXT column as `DateTime<Utc>`.
///
/// Handles both RFC 3339 (`"2026-02-09T14:30:00+00:00"`) and `SQLite`'s default
/// format (`"2026-02-09 14:30:00"`).
///
/// # Errors
///
/// Returns `DatabaseError::Query` if the string cannot be parsed as either format.
pub fn parse_datetime(s: &str) -> Result<DateTime<Utc>, DatabaseError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .map(|naive| naive.and_utc())
        .map_err(|e| DatabaseError::Query(format!("Failed to parse datetime '{s}': {e}")))
}

/// Read a nullable TEXT column, substituting `fallback` for NULL or empty.
///
/// `row.get::<String>(idx)` on a NULL column returns an error, not `""`,
/// so nullable columns go through `Option<String>`.
///
/// # Errors
///
/// Returns `DatabaseError` if the column read fails.
pub fn get_text_or(row: &libsql::Row, idx: i32, fallback: &str) -> Result<String, DatabaseError> {
    match row.get::<Option<String>>(idx)? {
        Some(s) if !s.is_empty() => Ok(s),
        _ => Ok(fallback.to_string()),
    }
}

/// Convert a stored INTEGER into an `i32` column value.
///
/// # Errors
///
/// Returns `DatabaseError::InvalidState` if the value does not fit.
pub fn to_i32(value: i64, column: &str) -> Result<i32, DatabaseError> {
    i32::try_from(value)
        .map_err(|_| DatabaseError::InvalidState(format!("{column} out of range: {value}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_both_datetime_formats() {
        let rfc = parse_datetime("2026-02-09T14:30:00+00:00").unwrap();
        let sqlite = parse_datetime("2026-02-09 14:30:00").unwrap();
        assert_eq!(rfc, sqlite);
    }

    #[test]
    fn rejects_garbage_datetime() {
        assert!(parse_datetime("yesterday").is_err());
    }

    #[test]
    fn to_i32_guards_range() {
        assert_eq!(to_i32(2026, "year").unwrap(), 2026);
        assert!(to_i32(i64::MAX, "year").is_err());
    }
}
