//! Article records at the ingestion boundary.
//!
//! Search collaborators hand over loosely shaped records: any field may be
//! missing, keys may use the capitalised names of spreadsheet columns, and
//! values may be numbers where text is expected. [`RawArticle`] accepts all of
//! that; [`NormalizedArticle`] is the fixed shape the store persists, with
//! sentinel values substituted for anything missing.

use serde::{Deserialize, Deserializer, Serialize};

/// Sentinel for a missing PubMed identifier.
pub const NO_PMID: &str = "N/A";
/// Sentinel for a missing title.
pub const NO_TITLE: &str = "No Title";
/// Sentinel for a missing author list.
pub const NO_AUTHORS: &str = "No Authors";
/// Sentinel for a missing abstract.
pub const NO_ABSTRACT: &str = "No Abstract";
/// Sentinel for a missing DOI.
pub const NO_DOI: &str = "N/A";
/// Sentinel for a missing link.
pub const NO_LINK: &str = "N/A";
/// Sentinel for a missing publication year.
pub const NO_YEAR: i32 = 0;

/// A search hit as produced by the literature collaborator. Nothing is required.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawArticle {
    #[serde(
        default,
        alias = "PMID",
        alias = "external_id",
        deserialize_with = "loose_text"
    )]
    pub pmid: Option<String>,
    #[serde(default, alias = "Title", deserialize_with = "loose_text")]
    pub title: Option<String>,
    #[serde(default, alias = "Authors", deserialize_with = "loose_text")]
    pub authors: Option<String>,
    #[serde(
        default,
        rename = "abstract",
        alias = "Abstract",
        deserialize_with = "loose_text"
    )]
    pub abstract_text: Option<String>,
    #[serde(default, alias = "DOI", deserialize_with = "loose_text")]
    pub doi: Option<String>,
    #[serde(default, alias = "Link", alias = "url", deserialize_with = "loose_text")]
    pub link: Option<String>,
    #[serde(default, alias = "Year", deserialize_with = "loose_year")]
    pub year: Option<i32>,
}

/// An article in the fixed persisted shape, sentinels already applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedArticle {
    pub pmid: String,
    pub title: String,
    pub authors: String,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    pub doi: String,
    pub link: String,
    pub year: i32,
}

impl RawArticle {
    /// Convenience constructor used by collaborators and tests.
    #[must_use]
    pub fn titled(title: &str) -> Self {
        Self {
            title: Some(title.to_string()),
            ..Self::default()
        }
    }

    /// Map onto the fixed shape. Missing or blank fields become sentinels.
    #[must_use]
    pub fn normalize(&self) -> NormalizedArticle {
        NormalizedArticle {
            pmid: or_sentinel(self.pmid.as_deref(), NO_PMID),
            title: or_sentinel(self.title.as_deref(), NO_TITLE),
            authors: or_sentinel(self.authors.as_deref(), NO_AUTHORS),
            abstract_text: or_sentinel(self.abstract_text.as_deref(), NO_ABSTRACT),
            doi: or_sentinel(self.doi.as_deref(), NO_DOI),
            link: or_sentinel(self.link.as_deref(), NO_LINK),
            year: self.year.unwrap_or(NO_YEAR),
        }
    }
}

fn or_sentinel(value: Option<&str>, sentinel: &str) -> String {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => sentinel.to_string(),
    }
}

/// Any JSON-ish scalar or list a loosely typed record may carry.
#[derive(Deserialize)]
#[serde(untagged)]
enum Loose {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    List(Vec<Loose>),
    Other(serde::de::IgnoredAny),
}

impl Loose {
    fn into_text(self) -> Option<String> {
        match self {
            Self::Null | Self::Other(_) => None,
            Self::Bool(b) => Some(b.to_string()),
            Self::Int(i) => Some(i.to_string()),
            Self::Float(f) => Some(f.to_string()),
            Self::Text(s) => Some(s),
            Self::List(items) => {
                let parts: Vec<String> = items
                    .into_iter()
                    .filter_map(Self::into_text)
                    .filter(|s| !s.trim().is_empty())
                    .collect();
                if parts.is_empty() {
                    None
                } else {
                    Some(parts.join(", "))
                }
            }
        }
    }

    fn into_year(self) -> Option<i32> {
        match self {
            Self::Int(i) => i32::try_from(i).ok(),
            Self::Text(s) => {
                let digits: String = s
                    .trim()
                    .chars()
                    .take_while(char::is_ascii_digit)
                    .collect();
                digits.parse().ok()
            }
            _ => None,
        }
    }
}

fn loose_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Loose>::deserialize(deserializer)?.and_then(Loose::into_text))
}

fn loose_year<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Loose>::deserialize(deserializer)?.and_then(Loose::into_year))
}
