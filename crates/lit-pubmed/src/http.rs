//! Status handling shared by esearch and efetch requests.

use crate::error::PubMedError;

/// Seconds to back off when NCBI rate-limits without a `Retry-After` header.
const DEFAULT_RETRY_AFTER_SECS: u64 = 1;

/// Pass a successful response through; map 429 to [`PubMedError::RateLimited`]
/// and any other failure status to [`PubMedError::Api`] carrying the body.
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, PubMedError> {
    if resp.status() == 429 {
        let retry_after = parse_retry_after(&resp);
        return Err(PubMedError::RateLimited {
            retry_after_secs: retry_after,
        });
    }
    if !resp.status().is_success() {
        return Err(PubMedError::Api {
            status: resp.status().as_u16(),
            message: resp.text().await.unwrap_or_default(),
        });
    }
    Ok(resp)
}

fn parse_retry_after(resp: &reqwest::Response) -> u64 {
    resp.headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(DEFAULT_RETRY_AFTER_SECS)
}
