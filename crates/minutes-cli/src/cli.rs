//! CLI command definitions and argument parsing.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Minutes CLI - Turn free-text meeting descriptions into structured minutes.
#[derive(Debug, Parser)]
#[command(name = "minutes")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Ollama API endpoint
    #[arg(
        long,
        global = true,
        env = "MINUTES_OLLAMA_ENDPOINT",
        default_value = "http://localhost:11434"
    )]
    pub ollama_endpoint: String,

    /// Model used for the secondary pass
    #[arg(long, global = true, env = "MINUTES_OLLAMA_MODEL", default_value = "llama3")]
    pub ollama_model: String,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Labeled lines, one field per line
    Labeled,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract a meeting record and print it
    Extract(ExtractArgs),

    /// Extract a meeting record and write a minutes document
    Render(RenderArgs),
}

/// Where the meeting text comes from.
#[derive(Debug, Args)]
pub struct InputArgs {
    /// Meeting text given inline
    pub text: Option<String>,

    /// Read the meeting text from a file
    #[arg(long, conflicts_with = "text")]
    pub file: Option<PathBuf>,

    /// Read the meeting text from stdin
    #[arg(long, conflicts_with_all = ["text", "file"])]
    pub stdin: bool,

    /// Skip the generative model entirely
    #[arg(long)]
    pub offline: bool,
}

/// Arguments for the extract command.
#[derive(Debug, Parser)]
pub struct ExtractArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Also print the pipeline trace
    #[arg(long)]
    pub trace: bool,
}

/// Arguments for the render command.
#[derive(Debug, Parser)]
pub struct RenderArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Document path (defaults to meeting_<timestamp>.md in the current directory)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Labeled => crate::config::OutputFormat::Labeled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_command() {
        let cli = Cli::parse_from(["minutes", "extract", "一是预算审核", "--offline"]);
        match cli.command {
            Command::Extract(args) => {
                assert_eq!(args.input.text.as_deref(), Some("一是预算审核"));
                assert!(args.input.offline);
                assert!(!args.trace);
            }
            _ => panic!("Expected Extract command"),
        }
    }

    #[test]
    fn test_render_command_with_file() {
        let cli = Cli::parse_from([
            "minutes",
            "render",
            "--file",
            "notes.txt",
            "--output",
            "out/minutes.md",
            "--format",
            "json",
        ]);
        assert!(matches!(cli.format, Some(CliFormat::Json)));
        match cli.command {
            Command::Render(args) => {
                assert_eq!(args.input.file, Some(PathBuf::from("notes.txt")));
                assert_eq!(args.output, Some(PathBuf::from("out/minutes.md")));
            }
            _ => panic!("Expected Render command"),
        }
    }

    #[test]
    fn test_inputs_conflict() {
        let result = Cli::try_parse_from(["minutes", "extract", "文本", "--stdin"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_model_defaults() {
        let cli = Cli::parse_from(["minutes", "extract", "文本"]);
        // Defaults apply unless the environment overrides them
        assert!(!cli.ollama_endpoint.is_empty());
        assert!(!cli.ollama_model.is_empty());
    }
}
