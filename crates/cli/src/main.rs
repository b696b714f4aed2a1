//! Kernel interrupt simulator CLI.
//!
//! This binary wires the file-based inputs and outputs around the simulation core. It performs:
//! 1. **Loading:** Reads the trace, the external program list, and an optional JSON config.
//! 2. **Running:** Replays the trace, writing the execution log and appending status snapshots.
//! 3. **Reporting:** Optionally prints run statistics to stdout.
//!
//! Exit codes: 0 on completion, 1 on bad arguments, unreadable inputs, or output failures.

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use clap::error::ErrorKind;
use tracing::error;
use tracing_subscriber::EnvFilter;

use intsim_core::config::Config;
use intsim_core::sim::loader;
use intsim_core::sim::{AppendFileSnapshot, WriterLog};
use intsim_core::{SimError, Simulator};

#[derive(Parser, Debug)]
#[command(
    name = "intsim",
    author,
    version,
    about = "Trace-driven kernel interrupt simulator",
    long_about = "Replay a trace of FORK/EXEC/CPU/SYSCALL/END_IO events against a fixed partition \
                  table and vector table, logging every kernel micro-step with its timestamp and \
                  duration.\n\nExamples:\n  intsim trace.txt external_files.txt execution.txt\n  \
                  intsim trace.txt external_files.txt execution.txt --status status.txt --stats"
)]
struct Cli {
    /// Trace file: one `<EVENT>, <duration>` record per line.
    trace: PathBuf,

    /// External program list: one `<name>, <size>` record per line.
    external_files: PathBuf,

    /// Execution log to write (truncated if it exists).
    output: PathBuf,

    /// File that receives a process table snapshot after every event.
    #[arg(long, default_value = "system_status.txt")]
    status: PathBuf,

    /// JSON configuration overriding the default kernel layout.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print run statistics when the simulation finishes.
    #[arg(long)]
    stats: bool,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::FAILURE,
            };
            let _ = e.print();
            return code;
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

/// Loads every input before touching any output, then runs the simulation.
fn run(cli: &Cli) -> Result<(), SimError> {
    let config = match &cli.config {
        Some(path) => Config::from_json_file(path)?,
        None => Config::default(),
    };

    let trace = loader::read_trace(&cli.trace, config.limits.max_trace_events)?;
    let catalog = loader::read_catalog(&cli.external_files, config.limits.max_external_files)?;

    let mut log = WriterLog::new(BufWriter::new(File::create(&cli.output)?));
    let mut snapshots = AppendFileSnapshot::create(&cli.status)?;

    let mut sim = Simulator::new(&config, catalog);
    sim.run(&trace.records, &mut log, &mut snapshots)?;
    log.flush()?;

    if cli.stats {
        sim.stats().print();
    }
    Ok(())
}
