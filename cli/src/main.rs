//! Runs sample workloads under scope timers.
//!
//! The timing log lands in `$SCOPE_TIMER_DIR/ScopeTimer.log` (the system
//! temp directory by default) unless `--stderr` is given.

mod tracing_setup;
mod workloads;

use anyhow::{Result, ensure};
use clap::Parser;
use scopetimer_core::config;
use scopetimer_core::scope_timer;
use scopetimer_core::sink::{self, ShutdownGuard, WriterSink};
use tracing::{debug, info};

use crate::tracing_setup::init_tracing;
use crate::workloads::{Plan, run_all};

#[derive(Parser, Debug)]
#[command(name = "scopetimer-demo")]
#[command(about = "Time a handful of sample workloads", long_about = None)]
struct Cli {
    /// How many times to run the whole set of workloads
    #[arg(long, short = 'n', default_value_t = 1)]
    runs: u32,

    /// Worker threads in the multithreaded workload
    #[arg(long, short = 't', default_value_t = 3)]
    threads: u32,

    /// Iterations in the looped workload
    #[arg(long, short = 'i', default_value_t = 5)]
    iterations: u32,

    /// Write timing lines to stderr instead of the log file
    #[arg(long)]
    stderr: bool,

    /// Enable verbose debug output
    #[arg(long, short = 'v')]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    ensure!(cli.threads <= 1024, "--threads must be at most 1024");

    // Declared before the main timer, so it is dropped after that timer logs.
    let _shutdown = ShutdownGuard::new();

    if cli.stderr {
        sink::set_sink(WriterSink::new(std::io::stderr()));
    }
    if config::is_enabled() {
        info!(
            log = %config::log_file_path().display(),
            format = %config::duration_format(),
            flush_every = config::flush_interval(),
            to_stderr = cli.stderr,
            "scope timing enabled"
        );
    } else {
        info!("scope timing disabled by SCOPE_TIMER");
    }

    scope_timer!();
    let plan = Plan {
        threads: cli.threads,
        iterations: cli.iterations,
    };
    for run in 1..=cli.runs {
        debug!(run, "starting workloads");
        run_all(plan);
    }
    Ok(())
}
