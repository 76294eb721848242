//! NCBI E-utilities configuration.

use serde::{Deserialize, Serialize};

fn default_base_url() -> String {
    "https://eutils.ncbi.nlm.nih.gov/entrez/eutils".to_string()
}

fn default_tool() -> String {
    "litscout".to_string()
}

const fn default_max_results() -> u32 {
    500
}

const fn default_batch_size() -> u32 {
    200
}

const fn default_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PubMedConfig {
    /// E-utilities base URL (without trailing slash).
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// NCBI API key. Raises the rate limit from 3 to 10 requests per second.
    #[serde(default)]
    pub api_key: String,

    /// Tool name reported to NCBI.
    #[serde(default = "default_tool")]
    pub tool: String,

    /// Contact email reported to NCBI.
    #[serde(default)]
    pub email: String,

    /// Upper bound on PMIDs requested from esearch.
    #[serde(default = "default_max_results")]
    pub max_results: u32,

    /// PMIDs per efetch request.
    #[serde(default = "default_batch_size")]
    pub batch_size: u32,

    /// Per-request timeout, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for PubMedConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: String::new(),
            tool: default_tool(),
            email: String::new(),
            max_results: default_max_results(),
            batch_size: default_batch_size(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl PubMedConfig {
    /// Whether an API key is set.
    #[must_use]
    pub fn has_api_key(&self) -> bool {
        !self.api_key.is_empty()
    }
}
