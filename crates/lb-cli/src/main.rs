use anyhow::Context;
use clap::Parser;
use lb_config::LintboardConfig;
use lb_dashboard::IssuesService;
use lb_parsers::ToolRegistry;

mod cli;
mod commands;
mod output;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("lbd error: {error:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    let mut config = LintboardConfig::load_with_dotenv().context("failed to load configuration")?;
    if let Some(path) = cli.db {
        config.database.path = path;
    }
    if config.database.is_in_memory() {
        tracing::warn!("using an in-memory database; uploads are discarded on exit");
    }

    let service = IssuesService::from_config(&config, ToolRegistry::with_defaults())
        .await
        .with_context(|| format!("failed to open database {}", config.database.path))?;

    commands::dispatch(cli.command, &service, &config, cli.format).await
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("LINTBOARD_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
