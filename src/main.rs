use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info};
use rr_model::sim::{read_process_list, simulate};
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;

/// rr_model: single-core round-robin scheduler model
///
/// Reads a process count followed by `<pid> <work>` pairs, then runs every
/// process to completion with a fixed quantum of 2 work units, printing the
/// state of all processes after each tick.
#[derive(Debug, Parser)]
struct Opts {
    /// Process list to read. Reads standard input when absent or `-`.
    input: Option<PathBuf>,

    /// Print run statistics to stderr after the trace.
    #[clap(long, action = clap::ArgAction::SetTrue)]
    summary: bool,

    /// Enable verbose output. Specify multiple times to increase verbosity.
    #[clap(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let opts = Opts::parse();

    let llv = match opts.verbose {
        0 => simplelog::LevelFilter::Warn,
        1 => simplelog::LevelFilter::Info,
        2 => simplelog::LevelFilter::Debug,
        _ => simplelog::LevelFilter::Trace,
    };
    let mut lcfg = simplelog::ConfigBuilder::new();
    lcfg.set_time_level(simplelog::LevelFilter::Error)
        .set_location_level(simplelog::LevelFilter::Off)
        .set_target_level(simplelog::LevelFilter::Off)
        .set_thread_level(simplelog::LevelFilter::Off);
    simplelog::TermLogger::init(
        llv,
        lcfg.build(),
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    )?;

    let specs = match opts.input.as_deref() {
        Some(path) if path.as_os_str() != "-" => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open {}", path.display()))?;
            read_process_list(file)?
        }
        _ => read_process_list(io::stdin().lock())?,
    };
    debug!("Loaded {} processes", specs.len());

    let stdout = io::stdout();
    let summary = simulate(specs, BufWriter::new(stdout.lock()))?;
    info!("Simulation finished after {} ticks", summary.ticks);

    if opts.summary {
        eprintln!("{summary}");
    }

    Ok(())
}
