//! Integration tests for TOML configuration loading.
//!
//! Uses figment::Jail for safe, sandboxed env var manipulation.

use figment::{
    Figment, Jail,
    providers::{Format, Serialized, Toml},
};
use lit_config::LitConfig;
use lit_core::range::DateFallback;
use pretty_assertions::assert_eq;

#[test]
fn loads_fixed_fallback_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[search.date_fallback]
policy = "fixed"
min_year = 2000
max_year = 2020
"#,
        )?;

        let config: LitConfig = Figment::from(Serialized::defaults(LitConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(
            config.search.date_fallback,
            DateFallback::Fixed {
                min_year: 2000,
                max_year: 2020
            }
        );
        Ok(())
    });
}

#[test]
fn loads_llm_and_pubmed_sections() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[llm]
base_url = "http://gpu-box:11434"
model = "llama3.1"

[pubmed]
api_key = "ncbi-key"
email = "lab@example.org"
max_results = 50
"#,
        )?;

        let config: LitConfig = Figment::from(Serialized::defaults(LitConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.llm.base_url, "http://gpu-box:11434");
        assert_eq!(config.llm.model, "llama3.1");
        assert_eq!(config.llm.timeout_secs, 120);
        assert!(config.pubmed.has_api_key());
        assert_eq!(config.pubmed.email, "lab@example.org");
        assert_eq!(config.pubmed.max_results, 50);
        assert_eq!(config.pubmed.batch_size, 200);
        Ok(())
    });
}

#[test]
fn project_config_is_picked_up_by_load() {
    Jail::expect_with(|jail| {
        jail.create_dir(".litscout")?;
        jail.create_file(
            ".litscout/config.toml",
            r#"
[database]
path = "runs.db"

[export]
output_dir = "reports"
"#,
        )?;

        let config = LitConfig::load().expect("config loads");
        assert_eq!(config.database.path, "runs.db");
        assert_eq!(config.export.output_dir, "reports");
        assert_eq!(config.export.default_filename, "output.xlsx");
        Ok(())
    });
}

#[test]
fn load_rejects_reversed_fixed_window() {
    Jail::expect_with(|jail| {
        jail.create_dir(".litscout")?;
        jail.create_file(
            ".litscout/config.toml",
            r#"
[search.date_fallback]
policy = "fixed"
min_year = 2024
max_year = 1999
"#,
        )?;

        let err = LitConfig::load().expect_err("reversed window must be rejected");
        assert!(err.to_string().contains("search.date_fallback"));
        Ok(())
    });
}
