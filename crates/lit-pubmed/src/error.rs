//! E-utilities error types.

use thiserror::Error;

use lit_core::entities::RawArticle;

/// Errors that can occur while searching PubMed.
#[derive(Debug, Error)]
pub enum PubMedError {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// E-utilities returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by NCBI.
        status: u16,
        /// Error message or response body.
        message: String,
    },

    /// esearch answered 200 but rejected the search term.
    #[error("query rejected: {0}")]
    Query(String),

    /// Failed to parse an esearch or efetch response.
    #[error("parse error: {0}")]
    Parse(String),

    /// NCBI returned a 429 Too Many Requests response.
    #[error("rate limited, retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds to wait before retrying.
        retry_after_secs: u64,
    },

    /// An efetch batch failed after earlier batches came back.
    #[error("search stopped after {} articles: {source}", .fetched.len())]
    Incomplete {
        /// Articles from the batches that succeeded, in order.
        fetched: Vec<RawArticle>,
        #[source]
        source: Box<PubMedError>,
    },
}

impl PubMedError {
    /// Wrap `source` with the articles already fetched. Without any, `source`
    /// is returned as is.
    #[must_use]
    pub fn incomplete(fetched: Vec<RawArticle>, source: Self) -> Self {
        if fetched.is_empty() {
            source
        } else {
            Self::Incomplete {
                fetched,
                source: Box::new(source),
            }
        }
    }

    /// Articles that survived the failure; empty for every other variant.
    #[must_use]
    pub fn into_fetched(self) -> Vec<RawArticle> {
        match self {
            Self::Incomplete { fetched, .. } => fetched,
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn nothing_fetched_keeps_the_original_error() {
        let err = PubMedError::incomplete(Vec::new(), PubMedError::Parse("bad xml".into()));
        assert!(matches!(err, PubMedError::Parse(_)));
        assert!(err.into_fetched().is_empty());
    }

    #[test]
    fn earlier_batches_survive_a_later_failure() {
        let fetched = vec![RawArticle::titled("a"), RawArticle::titled("b")];
        let err = PubMedError::incomplete(
            fetched.clone(),
            PubMedError::RateLimited {
                retry_after_secs: 2,
            },
        );
        assert_eq!(
            err.to_string(),
            "search stopped after 2 articles: rate limited, retry after 2s"
        );
        assert_eq!(err.into_fetched(), fetched);
    }
}
