//! Spreadsheet export defaults.

use serde::{Deserialize, Serialize};

fn default_output_dir() -> String {
    "data".to_string()
}

fn default_filename() -> String {
    "output.xlsx".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ExportConfig {
    /// Directory every export is written under. Created on demand.
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// File name used when `--output` is not given.
    #[serde(default = "default_filename")]
    pub default_filename: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            default_filename: default_filename(),
        }
    }
}
