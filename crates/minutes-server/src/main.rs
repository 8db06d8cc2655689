//! Minutes Server binary
//!
//! Starts the HTTP server for meeting minutes extraction.

use minutes_server::{config::ServerConfig, start_server, ServerError};
use std::env;
use std::process;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn run() -> Result<(), ServerError> {
    let args: Vec<String> = env::args().collect();

    let config = if args.len() > 2 && args[1] == "--config" {
        ServerConfig::from_file(&args[2])?
    } else if args.len() > 1 && args[1] == "--help" {
        print_help();
        process::exit(0);
    } else {
        eprintln!("No config file specified, using local defaults");
        eprintln!("Usage: minutes-server --config <path-to-config.toml>");
        eprintln!();
        ServerConfig::default()
    };

    start_server(config).await?;

    Ok(())
}

fn print_help() {
    println!("Minutes Server - meeting minutes extraction over HTTP");
    println!();
    println!("USAGE:");
    println!("    minutes-server --config <path-to-config.toml>");
    println!();
    println!("OPTIONS:");
    println!("    --config <file>    Load configuration from TOML file");
    println!("    --help             Print this help message");
    println!();
    println!("ENDPOINTS:");
    println!("    POST /extract      {{\"text\": \"...\"}} -> extracted record");
    println!("    POST /generate     {{\"text\": \"...\"}} -> Markdown minutes document");
    println!("    GET  /health       liveness check");
    println!();
    println!("CONFIGURATION:");
    println!("    bind_address, bind_port, ollama_endpoint, ollama_model,");
    println!("    output_dir, cors_origins and an [extractor] table.");
    println!("    Log level comes from RUST_LOG (default: info).");
    println!();
}
