use clap::Parser;

pub mod global;

pub use global::{GlobalFlags, OutputFormat};

/// Top-level CLI parser for the `litscout` binary.
#[derive(Debug, Parser)]
#[command(
    name = "litscout",
    version,
    about = "Turn a research question into a stored PubMed search"
)]
pub struct Cli {
    /// Free-text research question; prompted for when omitted
    pub query: Option<String>,

    /// Earliest publication year (skips extraction from the query)
    #[arg(long, value_name = "YEAR")]
    pub min_year: Option<i32>,

    /// Latest publication year (skips extraction from the query)
    #[arg(long, value_name = "YEAR")]
    pub max_year: Option<i32>,

    /// Export the stored run to an .xlsx workbook
    #[arg(long)]
    pub export: bool,

    /// Workbook file name, written under the export directory
    #[arg(short, long, value_name = "NAME", requires = "export")]
    pub output: Option<String>,

    /// Database path (overrides `database.path`)
    #[arg(long, value_name = "PATH")]
    pub db: Option<String>,

    /// Summary output format: json, raw
    #[arg(short, long, default_value = "json")]
    pub format: OutputFormat,

    /// Quiet mode (errors only, no spinners)
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Extract ergonomic global flags struct for the run.
    #[must_use]
    pub const fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            quiet: self.quiet,
            verbose: self.verbose,
        }
    }
}
