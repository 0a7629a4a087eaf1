//! Sample command - run the bundled suite

use crate::sample;
use anyhow::{anyhow, Result};
use tally_config::Config;
use tally_runtime::{ConsoleReporter, ExecutionMode};

/// Arguments for the sample command
#[derive(Debug, Default)]
pub struct SampleArgs {
    /// Report mode; falls back to the configuration
    pub mode: Option<ExecutionMode>,
    /// Disable colored output
    pub no_color: bool,
    /// Register the deliberately failing case
    pub include_failing: bool,
}

/// Flags win over configuration
fn resolve_mode(args: &SampleArgs, config: &Config) -> Result<ExecutionMode> {
    match args.mode {
        Some(mode) => Ok(mode),
        None => config
            .mode()
            .parse::<ExecutionMode>()
            .map_err(|e| anyhow!("invalid report mode in configuration: {e}")),
    }
}

/// Run the sample suite. Returns whether every assertion passed.
pub fn run(args: SampleArgs, config: &Config) -> Result<bool> {
    let mode = resolve_mode(&args, config)?;
    let no_color = args.no_color || !config.color();

    if no_color {
        colored::control::set_override(false);
    }

    tracing::debug!(%mode, no_color, include_failing = args.include_failing, "running sample suite");

    // Suite errors carry non-Send sources, so they are flattened to text here.
    let suite = sample::build(mode, args.include_failing).map_err(|e| anyhow!("{e}"))?;
    let mut suite = suite.with_console_reporter(ConsoleReporter::stdout().with_no_color(no_color));
    let report = suite.run().map_err(|e| anyhow!("{e}"))?;

    if no_color {
        colored::control::unset_override();
    }

    Ok(!report.has_failures())
}
