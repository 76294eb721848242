//! Year and year-range expressions embedded in a free-text query.
//!
//! Patterns are tried most-specific first; the first one that matches wins and
//! is cut out of the query. Years are four digits between 1800 and 2199.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::range::DateRange;

/// A range found in a query, plus the query with that expression removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedRange {
    pub range: DateRange,
    /// The query text with the matched expression cut out and whitespace tidied.
    pub residual: String,
    /// The expression exactly as it appeared in the query.
    pub expression: String,
}

const YEAR: &str = r"(1[89]\d{2}|2[01]\d{2})";

/// Lower bound given to expressions that only name an end year.
pub const EARLIEST_YEAR: i32 = 1800;

/// Optional lead-in before a bare year or year range.
const LEAD_IN: &str = r"(?:\bpublished\s+(?:(?:in|during)\s+)?|\b(?:in|during)\s+)?";

#[derive(Clone, Copy)]
enum Shape {
    /// Two explicit bounds.
    Bounded,
    /// A full lower year and a two-digit upper year, as in `2020-21`.
    ShortBounded,
    /// The last N years up to the current one.
    Relative,
    /// An end year with no start.
    UpTo,
    /// An open-ended lower bound up to the current year.
    Since,
    /// A single year.
    Single,
}

static PATTERNS: LazyLock<Vec<(Shape, Regex)>> = LazyLock::new(|| {
    let table = [
        (
            Shape::Bounded,
            format!(r"(?i)\b(?:published\s+)?between\s+(?:the\s+years?\s+)?{YEAR}\s+and\s+{YEAR}\b"),
        ),
        (
            Shape::Bounded,
            format!(
                r"(?i)\b(?:published\s+)?from\s+{YEAR}\s*(?:to|until|till|through|thru|[-–—])\s*{YEAR}\b"
            ),
        ),
        (
            Shape::Bounded,
            format!(
                r"(?i){LEAD_IN}\b{YEAR}\s*(?:[-–—]|\b(?:to|until|till|through|thru|and)\b)\s*{YEAR}\b"
            ),
        ),
        (
            Shape::ShortBounded,
            format!(r"(?i){LEAD_IN}\b{YEAR}[-–—/](\d{{2}})\b"),
        ),
        (
            Shape::Relative,
            r"(?i)\b(?:(?:published\s+)?(?:in|over|within|during|from)\s+)?(?:the\s+)?(?:last|past)\s+(\d{1,3})\s+years?\b"
                .to_string(),
        ),
        (
            Shape::UpTo,
            format!(
                r"(?i)\b(?:published\s+)?(before|prior\s+to|until|till|up\s+to|through|no\s+later\s+than)\s+{YEAR}\b"
            ),
        ),
        (
            Shape::Since,
            format!(
                r"(?i)\b(?:published\s+)?(?:since|after|from|starting(?:\s+(?:in|from))?)\s+{YEAR}\b"
            ),
        ),
        (Shape::Single, format!(r"(?i){LEAD_IN}\b{YEAR}\b")),
    ];
    table
        .into_iter()
        .map(|(shape, pattern)| {
            let regex = Regex::new(&pattern)
                .unwrap_or_else(|e| panic!("date pattern {pattern:?} must compile: {e}"));
            (shape, regex)
        })
        .collect()
});

static SPACE_BEFORE_PUNCT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+([,;:.?!])").expect("static regex"));

static REPEATED_SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([,;:])(?:\s*[,;:])+").expect("static regex"));

/// Find the first year or year-range expression in `text`.
///
/// `current_year` closes open-ended expressions such as "since 2015" or
/// "in the last 5 years". Returns `None` when the text names no year; choosing
/// a default is left to the caller.
#[must_use]
pub fn extract_date_range(text: &str, current_year: i32) -> Option<ExtractedRange> {
    PATTERNS.iter().find_map(|(shape, regex)| {
        let caps = regex.captures(text)?;
        let range = range_for(*shape, &caps, current_year)?;
        let whole = caps.get(0)?;
        Some(ExtractedRange {
            range,
            residual: remove_span(text, whole.start(), whole.end()),
            expression: whole.as_str().trim().to_string(),
        })
    })
}

fn range_for(shape: Shape, caps: &Captures<'_>, current_year: i32) -> Option<DateRange> {
    let number = |idx: usize| caps.get(idx)?.as_str().parse::<i32>().ok();
    match shape {
        Shape::Bounded => Some(DateRange::new(number(1)?, number(2)?)),
        Shape::ShortBounded => {
            let low = number(1)?;
            Some(DateRange::new(low, expand_short_year(low, number(2)?)))
        }
        Shape::Relative => {
            let years = number(1)?;
            Some(DateRange::new(current_year - years, current_year))
        }
        Shape::UpTo => {
            let end = number(2)?;
            let keyword = caps.get(1)?.as_str().to_ascii_lowercase();
            // "before 2015" and "prior to 2015" exclude the year itself.
            let exclusive = keyword.starts_with("before") || keyword.starts_with("prior");
            let end = if exclusive { end - 1 } else { end };
            Some(DateRange::new(EARLIEST_YEAR, end.max(EARLIEST_YEAR)))
        }
        Shape::Since => Some(DateRange::new(number(1)?, current_year)),
        Shape::Single => Some(DateRange::year(number(1)?)),
    }
}

/// `2020-21` ends in 2021, `1998-02` in 2002: the short year takes the lower
/// bound's century, or the next one when that would run backwards.
const fn expand_short_year(low: i32, short: i32) -> i32 {
    let candidate = low - low % 100 + short;
    if candidate < low { candidate + 100 } else { candidate }
}

fn remove_span(text: &str, start: usize, end: usize) -> String {
    let joined = format!("{} {}", &text[..start], &text[end..]);
    let collapsed = joined.split_whitespace().collect::<Vec<_>>().join(" ");
    let tidied = SPACE_BEFORE_PUNCT.replace_all(&collapsed, "$1");
    let tidied = REPEATED_SEPARATORS.replace_all(&tidied, "$1");
    tidied
        .trim_matches(|c: char| c.is_whitespace() || matches!(c, ',' | ';' | ':'))
        .to_string()
}
