//! Command implementations.

pub mod extract;
pub mod render;

pub use self::extract::execute_extract;
pub use self::render::execute_render;

use crate::cli::InputArgs;
use crate::error::{CliError, Result};
use std::fs;
use std::io::{self, Read};

/// Read the meeting text named by the input flags.
pub fn read_input(input: &InputArgs) -> Result<String> {
    if input.stdin {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    } else if let Some(path) = &input.file {
        Ok(fs::read_to_string(path)?)
    } else if let Some(text) = &input.text {
        Ok(text.clone())
    } else {
        Err(CliError::InvalidInput(
            "Must specify meeting text, --file or --stdin".to_string(),
        ))
    }
}
