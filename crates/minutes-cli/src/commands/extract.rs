//! Extract command implementation.

use super::read_input;
use crate::cli::ExtractArgs;
use crate::error::Result;
use crate::output::Formatter;
use minutes_domain::traits::LlmProvider;
use minutes_extractor::{Extractor, StageEvent};
use std::fmt::Display;

/// Execute the extract command.
pub async fn execute_extract<L>(
    args: ExtractArgs,
    extractor: &Extractor<L>,
    formatter: &Formatter,
) -> Result<()>
where
    L: LlmProvider + Send + Sync + 'static,
    L::Error: Display,
{
    let (output, events) = run_extract(&args, extractor, formatter).await?;
    println!("{}", output);

    // Trace goes to stderr so JSON output stays parseable
    if args.trace {
        eprintln!("{}", formatter.format_events(&events));
    }

    Ok(())
}

async fn run_extract<L>(
    args: &ExtractArgs,
    extractor: &Extractor<L>,
    formatter: &Formatter,
) -> Result<(String, Vec<StageEvent>)>
where
    L: LlmProvider + Send + Sync + 'static,
    L::Error: Display,
{
    let text = read_input(&args.input)?;

    if args.input.offline {
        let outcome = extractor.extract_direct(&text)?;
        let output = formatter.format_record(&outcome.record)?;
        return Ok((output, outcome.events));
    }

    let report = extractor.extract(&text).await?;
    let output = formatter.format_report(&report)?;
    Ok((output, report.events))
}
