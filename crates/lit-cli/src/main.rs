use anyhow::Context;
use clap::Parser;

use lit_db::ResultStore;
use lit_llm::OllamaClient;
use lit_pubmed::PubMedClient;

mod bootstrap;
mod cli;
mod output;
mod pipeline;
mod progress;
mod prompt;
mod ui;

use pipeline::{Pipeline, PipelineRequest};

/// Exit status after Ctrl-C, as a shell reports SIGINT.
const EXIT_INTERRUPTED: i32 = 130;

#[tokio::main]
async fn main() {
    let cli = cli::Cli::parse();
    let flags = cli.global_flags();
    if let Err(error) = init_tracing(&flags) {
        eprintln!("litscout error: {error:#}");
        std::process::exit(1);
    }

    // The run future is dropped before the interrupt arm runs, which rolls
    // back any open store session.
    let outcome = tokio::select! {
        result = run(cli, flags) => Some(result),
        () = interrupted() => None,
    };

    match outcome {
        Some(Ok(())) => {}
        Some(Err(error)) if !prompt::is_interrupted(&error) => {
            eprintln!("litscout error: {error:#}");
            std::process::exit(1);
        }
        Some(Err(_)) | None => {
            eprintln!("Process interrupted by user.");
            std::process::exit(EXIT_INTERRUPTED);
        }
    }
}

/// Resolves on Ctrl-C. Never resolves if the handler cannot be installed.
async fn interrupted() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::warn!(%error, "cannot listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}

async fn run(cli: cli::Cli, flags: cli::GlobalFlags) -> anyhow::Result<()> {
    ui::init(&flags);

    let config = bootstrap::load_config(cli.db.as_deref())?;

    let query = match cli.query {
        Some(query) if query.trim().is_empty() => anyhow::bail!("query cannot be empty"),
        Some(query) => query,
        None => prompt::read_query().await?,
    };

    let store = ResultStore::open_local(&config.database.path)
        .await
        .with_context(|| format!("failed to open database at {}", config.database.path))?;
    let model = OllamaClient::new(&config.llm).context("failed to build model client")?;
    let search = PubMedClient::new(&config.pubmed).context("failed to build PubMed client")?;

    let export = cli
        .export
        .then(|| bootstrap::export_target(&config, cli.output.as_deref()));
    let pipeline = Pipeline::new(
        model,
        search,
        store,
        config.search.date_fallback,
        bootstrap::current_year(),
    );

    let report = pipeline
        .run(PipelineRequest {
            query,
            min_year: cli.min_year,
            max_year: cli.max_year,
            export,
        })
        .await?;

    output::output(&report, flags.format)
}

fn init_tracing(flags: &cli::GlobalFlags) -> anyhow::Result<()> {
    let level = if flags.quiet {
        "error"
    } else if flags.verbose {
        "debug"
    } else {
        "info"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("LITSCOUT_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
