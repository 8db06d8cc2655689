//! Minutes CLI library.
//!
//! Argument parsing, configuration loading, the `extract` and `render`
//! commands and terminal output formatting for the `minutes` binary.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;

pub use cli::{Cli, Command};
pub use config::Config;
pub use error::{CliError, Result};
pub use output::Formatter;
