//! Publication-year ranges and the fallback policy used when a query names none.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Inclusive publication-year window. `min_year <= max_year` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawRange")]
pub struct DateRange {
    min_year: i32,
    max_year: i32,
}

#[derive(Deserialize)]
struct RawRange {
    min_year: i32,
    max_year: i32,
}

impl From<RawRange> for DateRange {
    fn from(raw: RawRange) -> Self {
        Self::new(raw.min_year, raw.max_year)
    }
}

impl DateRange {
    /// Build a range from two bounds given in any order. Reversed bounds are swapped.
    #[must_use]
    pub const fn new(a: i32, b: i32) -> Self {
        if a <= b {
            Self {
                min_year: a,
                max_year: b,
            }
        } else {
            Self {
                min_year: b,
                max_year: a,
            }
        }
    }

    /// A single-year range.
    #[must_use]
    pub const fn year(year: i32) -> Self {
        Self {
            min_year: year,
            max_year: year,
        }
    }

    #[must_use]
    pub const fn min_year(self) -> i32 {
        self.min_year
    }

    #[must_use]
    pub const fn max_year(self) -> i32 {
        self.max_year
    }

    /// Whether `year` falls inside the window.
    #[must_use]
    pub const fn contains(self, year: i32) -> bool {
        self.min_year <= year && year <= self.max_year
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.min_year, self.max_year)
    }
}

/// Policy used when neither the CLI nor the query supplies a range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum DateFallback {
    /// A fixed historical window.
    Fixed { min_year: i32, max_year: i32 },
    /// The last `years` years, ending at the current calendar year.
    Rolling { years: u32 },
}

impl Default for DateFallback {
    fn default() -> Self {
        Self::Rolling { years: 10 }
    }
}

impl DateFallback {
    /// Resolve the policy against the current calendar year.
    #[must_use]
    pub fn resolve(self, current_year: i32) -> DateRange {
        match self {
            Self::Fixed { min_year, max_year } => DateRange::new(min_year, max_year),
            Self::Rolling { years } => {
                let span = i32::try_from(years).unwrap_or(i32::MAX);
                DateRange::new(current_year.saturating_sub(span), current_year)
            }
        }
    }

    /// Check the policy for values that cannot describe a sensible window.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` for a reversed fixed window or a
    /// zero-length rolling window.
    pub fn validate(self) -> Result<(), CoreError> {
        match self {
            Self::Fixed { min_year, max_year } if min_year > max_year => {
                Err(CoreError::Validation(format!(
                    "fixed date fallback has min_year {min_year} after max_year {max_year}"
                )))
            }
            Self::Rolling { years: 0 } => Err(CoreError::Validation(
                "rolling date fallback needs at least one year".to_string(),
            )),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reversed_bounds_are_swapped() {
        let range = DateRange::new(2023, 2018);
        assert_eq!(range.min_year(), 2018);
        assert_eq!(range.max_year(), 2023);
    }

    #[test]
    fn deserializing_reversed_bounds_keeps_invariant() {
        let range: DateRange =
            serde_json::from_str(r#"{"min_year": 2024, "max_year": 2001}"#).unwrap();
        assert_eq!(range, DateRange::new(2001, 2024));
    }

    #[test]
    fn rolling_window_ends_at_current_year() {
        let range = DateFallback::Rolling { years: 5 }.resolve(2026);
        assert_eq!(range, DateRange::new(2021, 2026));
    }

    #[test]
    fn fixed_window_is_ordered_even_when_misconfigured() {
        let range = DateFallback::Fixed {
            min_year: 2020,
            max_year: 2000,
        }
        .resolve(2026);
        assert!(range.min_year() <= range.max_year());
    }

    #[test]
    fn validate_rejects_bad_policies() {
        assert!(
            DateFallback::Fixed {
                min_year: 2020,
                max_year: 2000
            }
            .validate()
            .is_err()
        );
        assert!(DateFallback::Rolling { years: 0 }.validate().is_err());
        assert!(DateFallback::default().validate().is_ok());
    }

    #[test]
    fn fallback_deserializes_from_tagged_map() {
        let fixed: DateFallback =
            serde_json::from_str(r#"{"policy": "fixed", "min_year": 1990, "max_year": 2000}"#)
                .unwrap();
        assert_eq!(
            fixed,
            DateFallback::Fixed {
                min_year: 1990,
                max_year: 2000
            }
        );
        let rolling: DateFallback =
            serde_json::from_str(r#"{"policy": "rolling", "years": 3}"#).unwrap();
        assert_eq!(rolling, DateFallback::Rolling { years: 3 });
    }
}
