//! Cache simulator CLI.
//!
//! This binary provides the entry point for trace replay. It performs:
//! 1. **Single run:** Replay a trace against one cache given as five positional values.
//! 2. **Sweep:** Replay a trace against every configuration listed in a JSON file.
//!
//! Reports go to stdout; logs go to stderr.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::{ArgAction, Args, CommandFactory, Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use cachesim_core::config::{ReplacementPolicy, WritePolicy};
use cachesim_core::report::{self, Report};
use cachesim_core::sim::SweepConfig;
use cachesim_core::{CacheConfig, SimError, Simulator};

#[derive(Parser, Debug)]
#[command(
    name = "cachesim",
    author,
    version,
    about = "Trace-driven set-associative cache simulator",
    long_about = "Replay a trace of R/W records against a single-level cache and report hits, misses and memory traffic.\n\nBlocks are fixed at 64 bytes.\n\nExamples:\n  cachesim 32768 4 0 1 traces/gcc.trace\n  cachesim 1024 2 fifo wt traces/small.trace --no-dump\n  cachesim sweep --config sweeps/assoc.json traces/gcc.trace",
    subcommand_negates_reqs = true
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    run: RunArgs,

    /// Report format.
    #[arg(long, value_enum, default_value_t = Format::Text, global = true)]
    format: Format,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace). `RUST_LOG` takes precedence.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
}

/// Positional values of a single run.
#[derive(Args, Debug)]
struct RunArgs {
    /// Total cache size in bytes.
    #[arg(required = true)]
    cache_size: Option<usize>,

    /// Number of blocks per set.
    #[arg(required = true)]
    associativity: Option<usize>,

    /// Replacement policy: 0 = LRU, 1 = FIFO.
    #[arg(required = true)]
    replacement: Option<ReplacementPolicy>,

    /// Write policy: 0 = write-through, 1 = write-back.
    #[arg(required = true)]
    write_policy: Option<WritePolicy>,

    /// Trace file of `R <hex>` / `W <hex>` records.
    #[arg(required = true)]
    trace: Option<PathBuf>,

    /// Omit the per-set dump from the report.
    #[arg(long)]
    no_dump: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Replay one trace against every configuration in a JSON sweep file.
    Sweep {
        /// Sweep description: `{ "configs": [ { "size_bytes": .., "ways": .. }, .. ] }`.
        #[arg(short, long)]
        config: PathBuf,

        /// Trace file of `R <hex>` / `W <hex>` records.
        trace: PathBuf,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Format {
    /// Human-readable text.
    Text,
    /// Pretty-printed JSON.
    Json,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Some(Commands::Sweep { config, trace }) => cmd_sweep(&config, &trace, cli.format),
        None => cmd_run(cli.run, cli.format),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("[!] FATAL: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Installs the stderr log subscriber.
///
/// `RUST_LOG` wins when set; otherwise the level follows the `-v` count.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Builds the cache configuration from the positional values.
///
/// Exits with a usage error if any value is missing; clap only enforces them
/// when no subcommand is given.
fn run_config(args: &RunArgs) -> (CacheConfig, PathBuf) {
    match (
        args.cache_size,
        args.associativity,
        args.replacement,
        args.write_policy,
        args.trace.as_ref(),
    ) {
        (Some(size), Some(ways), Some(policy), Some(write_policy), Some(trace)) => (
            CacheConfig::new(size, ways, policy, write_policy),
            trace.clone(),
        ),
        _ => Cli::command()
            .error(
                ErrorKind::MissingRequiredArgument,
                "expected <CACHE_SIZE> <ASSOCIATIVITY> <REPLACEMENT> <WRITE_POLICY> <TRACE>",
            )
            .exit(),
    }
}

/// Replays a trace against one cache and prints the report.
fn cmd_run(args: RunArgs, format: Format) -> Result<(), SimError> {
    let (config, trace) = run_config(&args);
    let mut sim = Simulator::new(config)?;
    let _ = sim.replay_file(&trace)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match format {
        Format::Text => report::write_text_report(&sim, !args.no_dump, &mut out)?,
        Format::Json => writeln!(out, "{}", Report::new(&sim, !args.no_dump).to_json()?)?,
    }
    out.flush()?;
    Ok(())
}

/// Replays a trace against every configuration of a sweep file.
fn cmd_sweep(config: &Path, trace: &Path, format: Format) -> Result<(), SimError> {
    let sweep = SweepConfig::load(config)?;
    let results = sweep.run(trace)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match format {
        Format::Text => report::write_sweep(&results, &mut out)?,
        Format::Json => writeln!(out, "{}", report::sweep_to_json(&results)?)?,
    }
    out.flush()?;
    Ok(())
}
