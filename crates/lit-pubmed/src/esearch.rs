//! esearch: search term and date window in, PMIDs out.

use serde::Deserialize;

use crate::error::PubMedError;

#[derive(Deserialize)]
struct EsearchResponse {
    esearchresult: EsearchResult,
}

#[derive(Deserialize)]
struct EsearchResult {
    #[serde(default)]
    count: Option<String>,
    #[serde(default)]
    idlist: Vec<String>,
    #[serde(default, rename = "ERROR")]
    error: Option<String>,
}

/// PMIDs matched by a search, plus the total hit count NCBI reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHits {
    pub total: u64,
    pub pmids: Vec<String>,
}

/// Parse an esearch `retmode=json` body.
///
/// # Errors
///
/// Returns `PubMedError::Parse` for malformed JSON and `PubMedError::Query`
/// when NCBI reports an error and matched nothing.
pub fn parse_esearch(body: &str) -> Result<SearchHits, PubMedError> {
    let parsed: EsearchResponse = serde_json::from_str(body)
        .map_err(|e| PubMedError::Parse(format!("esearch JSON: {e}")))?;
    let result = parsed.esearchresult;

    if let Some(error) = result.error {
        if result.idlist.is_empty() {
            return Err(PubMedError::Query(error));
        }
        tracing::warn!(%error, "esearch reported an error alongside results");
    }

    let total = result
        .count
        .as_deref()
        .and_then(|c| c.parse::<u64>().ok())
        .unwrap_or(result.idlist.len() as u64);
    Ok(SearchHits {
        total,
        pmids: result.idlist,
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const FIXTURE: &str = r#"{
        "header": {"type": "esearch", "version": "0.3"},
        "esearchresult": {
            "count": "1342",
            "retmax": "3",
            "retstart": "0",
            "idlist": ["38012345", "37999001", "37850422"],
            "translationset": [],
            "querytranslation": "knee[All Fields] AND osteoarthritis[All Fields]"
        }
    }"#;

    #[test]
    fn parses_id_list_and_count() {
        let hits = parse_esearch(FIXTURE).unwrap();
        assert_eq!(hits.total, 1342);
        assert_eq!(hits.pmids, vec!["38012345", "37999001", "37850422"]);
    }

    #[test]
    fn no_hits_is_empty_not_error() {
        let hits = parse_esearch(r#"{"esearchresult": {"count": "0", "idlist": []}}"#).unwrap();
        assert_eq!(hits.total, 0);
        assert!(hits.pmids.is_empty());
    }

    #[test]
    fn reported_error_without_ids_is_query_error() {
        let err = parse_esearch(
            r#"{"esearchresult": {"ERROR": "Invalid query syntax", "idlist": []}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, PubMedError::Query(ref m) if m == "Invalid query syntax"));
    }

    #[test]
    fn garbage_is_parse_error() {
        assert!(matches!(
            parse_esearch("<html>busy</html>"),
            Err(PubMedError::Parse(_))
        ));
    }
}
