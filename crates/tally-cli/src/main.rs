use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tally_runtime::ExecutionMode;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, reload, EnvFilter, Registry};

mod commands;
mod sample;

/// Tally assertion-based test runner.
///
/// Runs suites of test cases, records each assertion's outcome and reports
/// the results as console text or as a JSON tree for visual front ends.
///
/// EXAMPLES:
///     tally sample                     Run the bundled sample suite
///     tally sample --mode graphical    Report as a JSON tree
///     tally config                     Show the effective configuration
///
/// ENVIRONMENT VARIABLES:
///     TALLY_MODE        Report mode: console or graphical
///     TALLY_VERBOSE     Set to '1' for debug logging
///     TALLY_NO_COLOR    Set to '1' to disable colored output
///     NO_COLOR          Set to disable colored output
///     RUST_LOG          Log filter (overrides --verbose)
#[derive(Parser)]
#[command(name = "tally")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the bundled sample suite
    ///
    /// Exercises every assertion and lifecycle hook, then reports through
    /// the selected mode. Exits with code 1 if any assertion failed.
    ///
    /// EXAMPLES:
    ///     tally sample                       Console report
    ///     tally sample --mode graphical      JSON tree report
    ///     tally sample --include-failing     Add a case with deliberate failures
    #[command(visible_alias = "s")]
    Sample {
        /// Report mode (console or graphical); overrides tally.toml
        #[arg(long, short = 'm')]
        mode: Option<ExecutionMode>,
        /// Debug logging on stderr
        #[arg(long, short = 'v')]
        verbose: bool,
        /// Disable colored output
        #[arg(long)]
        no_color: bool,
        /// Register a case that fails on purpose
        #[arg(long)]
        include_failing: bool,
        /// Directory to search for tally.toml
        #[arg(long, default_value = ".")]
        dir: PathBuf,
    },

    /// Print the effective configuration as JSON
    ///
    /// EXAMPLES:
    ///     tally config
    ///     tally config --dir path/to/project
    Config {
        /// Directory to search for tally.toml
        #[arg(long, default_value = ".")]
        dir: PathBuf,
    },
}

type FilterHandle = reload::Handle<EnvFilter, Registry>;

/// Structured logging on stderr, installed before configuration loads.
///
/// Returns a handle for raising the level once `tally.toml` is known, or
/// `None` when `RUST_LOG` picked the filter (it always wins).
fn init_logging(verbose: bool) -> Option<FilterHandle> {
    let (filter, from_env) = match EnvFilter::try_from_default_env() {
        Ok(filter) => (filter, true),
        Err(_) => (EnvFilter::new(if verbose { "debug" } else { "warn" }), false),
    };
    let (filter, handle) = reload::Layer::new(filter);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .try_init()
        .ok()?;

    (!from_env).then_some(handle)
}

/// Apply `verbose` from configuration to an already installed subscriber
fn raise_to_debug(handle: Option<&FilterHandle>, verbose: bool) {
    if let (Some(handle), true) = (handle, verbose) {
        let _ = handle.modify(|filter| *filter = EnvFilter::new("debug"));
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Sample {
            mode,
            verbose,
            no_color,
            include_failing,
            dir,
        } => {
            let logging = init_logging(verbose);
            let config = commands::load_config(&dir)?;
            raise_to_debug(logging.as_ref(), config.verbose());

            let args = commands::sample::SampleArgs {
                mode,
                no_color,
                include_failing,
            };
            let passed = commands::sample::run(args, &config)?;

            // Exit with code 1 if any assertion failed
            if !passed {
                std::process::exit(1);
            }
        }
        Commands::Config { dir } => {
            let logging = init_logging(false);
            let config = commands::load_config(&dir)?;
            raise_to_debug(logging.as_ref(), config.verbose());
            commands::config::run(&config)?;
        }
    }

    Ok(())
}
