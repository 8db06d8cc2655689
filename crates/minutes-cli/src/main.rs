//! Minutes CLI - Command-line interface for meeting minutes extraction.

use anyhow::Context;
use clap::Parser;
use minutes_cli::commands;
use minutes_cli::{Cli, Command, Config, Formatter};
use minutes_extractor::Extractor;
use minutes_llm::OllamaProvider;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Diagnostics go to stderr, quiet unless RUST_LOG asks for more
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;

    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);
    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(format, color_enabled);

    let provider = OllamaProvider::new(&cli.ollama_endpoint, &cli.ollama_model)
        .with_timeout(config.extractor.llm_timeout());
    let extractor = Extractor::new(provider, config.extractor.clone());

    let result = match cli.command {
        Command::Extract(args) => commands::execute_extract(args, &extractor, &formatter).await,
        Command::Render(args) => commands::execute_render(args, &extractor, &formatter).await,
    };

    if let Err(e) = result {
        eprintln!("{}", formatter.error(&e.to_string()));
        std::process::exit(1);
    }

    Ok(())
}
