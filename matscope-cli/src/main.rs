mod args;
mod commands;

use anyhow::Result;
use clap::Parser;
use matscope_core::config::MatscopeConfig;
use tracing_subscriber::EnvFilter;

use args::{Args, Command};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize tracing; RUST_LOG overrides the -v level
    let level = match args.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut config = match &args.config {
        Some(path) => MatscopeConfig::from_file(path)?,
        None => MatscopeConfig::load_default(),
    };
    config.expand_env_vars();

    let source = commands::data_source(&config, args.data.clone());

    match args.command {
        Command::Generate {
            filters,
            kind,
            format,
            output,
        } => {
            commands::generate(&config, source, &filters, kind.as_deref(), &format, output)
                .await
        }
        Command::Preview { filters, kind, out } => {
            commands::preview(&config, source, &filters, kind.as_deref(), out).await
        }
        Command::Ask { query } => commands::ask(source, &query).await,
    }
}
