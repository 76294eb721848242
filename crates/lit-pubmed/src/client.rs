//! NCBI E-utilities client.

use std::time::Duration;

use tracing::{debug, info, warn};

use lit_config::PubMedConfig;
use lit_core::entities::RawArticle;

use crate::LiteratureSearch;
use crate::efetch::parse_articles;
use crate::error::PubMedError;
use crate::esearch::parse_esearch;
use crate::http::check_response;

/// Pause between requests without an API key (NCBI allows 3 per second).
const DELAY_WITHOUT_KEY: Duration = Duration::from_millis(350);
/// Pause between requests with an API key (10 per second).
const DELAY_WITH_KEY: Duration = Duration::from_millis(110);

/// PubMed search over esearch + efetch.
pub struct PubMedClient {
    http: reqwest::Client,
    config: PubMedConfig,
    delay: Duration,
}

impl PubMedClient {
    /// Build a client from the `[pubmed]` config section.
    ///
    /// # Errors
    ///
    /// Returns `PubMedError::Http` if the underlying `reqwest::Client` fails to build.
    pub fn new(config: &PubMedConfig) -> Result<Self, PubMedError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("litscout/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        let delay = if config.has_api_key() {
            DELAY_WITH_KEY
        } else {
            DELAY_WITHOUT_KEY
        };
        let mut config = config.clone();
        config.base_url = config.base_url.trim_end_matches('/').to_string();
        Ok(Self {
            http,
            config,
            delay,
        })
    }

    /// Pause inserted before every request after the first.
    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// `tool`, `email` and `api_key` parameters, each only when set.
    fn identity_params(&self) -> String {
        let mut params = String::new();
        for (key, value) in [
            ("tool", &self.config.tool),
            ("email", &self.config.email),
            ("api_key", &self.config.api_key),
        ] {
            if !value.is_empty() {
                params.push_str(&format!("&{key}={}", urlencoding::encode(value)));
            }
        }
        params
    }

    fn esearch_url(&self, term: &str, min_year: i32, max_year: i32) -> String {
        format!(
            "{}/esearch.fcgi?db=pubmed&retmode=json&term={}&datetype=pdat&mindate={min_year}&maxdate={max_year}&retmax={}{}",
            self.config.base_url,
            urlencoding::encode(term),
            self.config.max_results,
            self.identity_params()
        )
    }

    fn efetch_url(&self, pmids: &[String]) -> String {
        format!(
            "{}/efetch.fcgi?db=pubmed&retmode=xml&rettype=abstract&id={}{}",
            self.config.base_url,
            pmids.join(","),
            self.identity_params()
        )
    }

    async fn get_text(&self, url: &str) -> Result<String, PubMedError> {
        let resp = check_response(self.http.get(url).send().await?).await?;
        Ok(resp.text().await?)
    }

    async fn fetch_batch(&self, pmids: &[String]) -> Result<Vec<RawArticle>, PubMedError> {
        let xml = self.get_text(&self.efetch_url(pmids)).await?;
        parse_articles(&xml)
    }

    fn batch_size(&self) -> usize {
        usize::try_from(self.config.batch_size).unwrap_or(usize::MAX).max(1)
    }
}

impl LiteratureSearch for PubMedClient {
    async fn search(
        &self,
        strategy: &str,
        min_year: i32,
        max_year: i32,
    ) -> Result<Vec<RawArticle>, PubMedError> {
        let term = strategy.trim();
        if term.is_empty() {
            warn!("empty search strategy, skipping PubMed");
            return Ok(Vec::new());
        }

        let body = self
            .get_text(&self.esearch_url(term, min_year, max_year))
            .await?;
        let hits = parse_esearch(&body)?;
        info!(
            total = hits.total,
            fetching = hits.pmids.len(),
            min_year,
            max_year,
            "esearch complete"
        );

        let mut articles = Vec::with_capacity(hits.pmids.len());
        for batch in hits.pmids.chunks(self.batch_size()) {
            tokio::time::sleep(self.delay).await;
            let parsed = match self.fetch_batch(batch).await {
                Ok(parsed) => parsed,
                Err(err) => {
                    warn!(kept = articles.len(), error = %err, "efetch batch failed");
                    return Err(PubMedError::incomplete(articles, err));
                }
            };
            debug!(requested = batch.len(), parsed = parsed.len(), "efetch batch");
            articles.extend(parsed);
        }
        Ok(articles)
    }
}
