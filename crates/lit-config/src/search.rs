//! Query-refinement settings.

use lit_core::range::DateFallback;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SearchConfig {
    /// Window used when neither the CLI nor the query names a year range.
    #[serde(default)]
    pub date_fallback: DateFallback,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_fallback_is_rolling_decade() {
        let config = SearchConfig::default();
        assert_eq!(config.date_fallback, DateFallback::Rolling { years: 10 });
    }
}
