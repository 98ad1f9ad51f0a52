//! Cache simulator CLI.
//!
//! This binary replays a memory reference trace through every cache in a description file. It performs:
//! 1. **Configuration:** Loads and validates the JSON cache list before reading any reference.
//! 2. **Simulation:** Streams the trace through all caches in declaration order.
//! 3. **Reporting:** Prints per-cache statistics as a table, or as JSON with `--json`.

use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cachesim_core::Simulator;
use cachesim_core::common::SimError;
use cachesim_core::sim::loader;
use cachesim_core::stats::SimReport;

#[derive(Parser, Debug)]
#[command(
    name = "cachesim",
    author,
    version,
    about = "Trace-driven set-associative cache simulator",
    long_about = "Replay a valgrind-lackey style trace through one or more caches.\n\nExamples:\n  cachesim --config caches.json trace.txt\n  cachesim --config caches.json --json trace.txt\n  cachesim --config caches.json --debug trace.txt 2> debug.log"
)]
struct Cli {
    /// JSON cache description file (a list of caches, or `{ "caches": [...] }`).
    #[arg(short, long)]
    config: PathBuf,

    /// Trace file to replay.
    trace: PathBuf,

    /// Emit a debug event for every cache decision (to stderr).
    #[arg(short, long)]
    debug: bool,

    /// Print the report as JSON instead of a table.
    #[arg(long)]
    json: bool,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    match run(&cli) {
        Ok(report) => {
            if cli.json {
                match serde_json::to_string_pretty(&report) {
                    Ok(text) => println!("{text}"),
                    Err(e) => {
                        eprintln!("\n[!] FATAL: cannot encode report: {e}");
                        process::exit(1);
                    }
                }
            } else {
                report.print();
            }
        }
        Err(e) => {
            eprintln!("\n[!] FATAL: {e}");
            process::exit(1);
        }
    }
}

/// Loads the configuration, opens the trace, and runs it to completion.
fn run(cli: &Cli) -> Result<SimReport, SimError> {
    let config = loader::load_config(&cli.config)?;
    let simulator = Simulator::new(&config)?;
    let trace = loader::open_trace(&cli.trace)?;
    tracing::info!(
        caches = config.caches.len(),
        trace = %cli.trace.display(),
        "starting simulation"
    );
    simulator.run(trace)
}

/// Installs the stderr subscriber. `--debug` overrides `RUST_LOG`.
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
