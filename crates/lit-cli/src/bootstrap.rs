use std::path::PathBuf;

use anyhow::Context;
use chrono::Datelike;

use lit_config::LitConfig;

use crate::pipeline::ExportTarget;

/// Load layered config (with `.env`) and apply command-line overrides.
pub fn load_config(db_override: Option<&str>) -> anyhow::Result<LitConfig> {
    let mut config = LitConfig::load_with_dotenv().context("failed to load configuration")?;
    if let Some(path) = db_override {
        tracing::debug!(path, "database path overridden from command line");
        config.database.path = path.to_string();
    }
    Ok(config)
}

/// Export destination for `--export`, defaulting the name from config.
pub fn export_target(config: &LitConfig, file_name: Option<&str>) -> ExportTarget {
    ExportTarget {
        output_dir: PathBuf::from(&config.export.output_dir),
        file_name: file_name
            .map_or_else(|| config.export.default_filename.clone(), str::to_string),
    }
}

/// Calendar year that closes open-ended and rolling windows.
pub fn current_year() -> i32 {
    chrono::Local::now().year()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn export_target_defaults_from_config() {
        let config = LitConfig::default();
        let target = export_target(&config, None);
        assert_eq!(target.output_dir, PathBuf::from("data"));
        assert_eq!(target.file_name, "output.xlsx");
    }

    #[test]
    fn export_target_prefers_flag() {
        let target = export_target(&LitConfig::default(), Some("knee"));
        assert_eq!(target.file_name, "knee");
    }
}
