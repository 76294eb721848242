//! # lit-config
//!
//! Layered configuration loading for LitScout using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`LITSCOUT_*` prefix, `__` as separator)
//! 2. Project-level `.litscout/config.toml`
//! 3. User-level `~/.config/litscout/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `LITSCOUT_LLM__MODEL` -> `llm.model`,
//! `LITSCOUT_SEARCH__DATE_FALLBACK__POLICY` -> `search.date_fallback.policy`, etc.
//! The `__` (double underscore) separates nested config sections.
//!
//! # Usage
//!
//! ```no_run
//! use lit_config::LitConfig;
//!
//! let config = LitConfig::load_with_dotenv().expect("config");
//! println!("model: {}", config.llm.model);
//! ```

mod database;
mod error;
mod export;
mod llm;
mod pubmed;
mod search;

pub use database::DatabaseConfig;
pub use error::ConfigError;
pub use export::ExportConfig;
pub use llm::LlmConfig;
pub use pubmed::PubMedConfig;
pub use search::SearchConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct LitConfig {
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub pubmed: PubMedConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

impl LitConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`LitConfig::load_with_dotenv`] if you need
    /// `.env` file loading. The loaded values are validated before returning.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a source cannot be parsed or a value is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with `.env` file support from the current directory.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a source cannot be parsed or a value is invalid.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// This is public so tests can inspect the figment directly or add
    /// additional providers on top.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".litscout/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed("LITSCOUT_").split("__"))
    }

    /// Reject values that would make a run misbehave rather than fail loudly.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.search
            .date_fallback
            .validate()
            .map_err(|e| ConfigError::InvalidValue {
                field: "search.date_fallback".to_string(),
                reason: e.to_string(),
            })?;
        if self.pubmed.batch_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "pubmed.batch_size".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        if self.export.output_dir.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "export.output_dir".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("litscout").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lit_core::range::DateFallback;

    #[test]
    fn default_config_loads() {
        let config = LitConfig::default();
        assert_eq!(config.database.path, "search.db");
        assert_eq!(config.llm.model, "phi3.5");
        assert_eq!(config.export.output_dir, "data");
        assert!(!config.pubmed.has_api_key());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn figment_builds_without_files() {
        let figment = LitConfig::figment();
        let config: LitConfig = figment.extract().expect("should extract defaults");
        assert_eq!(config.pubmed.batch_size, 200);
        assert_eq!(config.search.date_fallback, DateFallback::Rolling { years: 10 });
    }

    #[test]
    fn zero_batch_size_is_rejected() {
        let mut config = LitConfig::default();
        config.pubmed.batch_size = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("pubmed.batch_size"));
    }
}
