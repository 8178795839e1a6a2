//! # tally-cli
//!
//! Demo driver for the tally progress indicator.
//!
//! Counts to a known total with a small delay per step, finishes the line,
//! then runs a second indicator with an unknown total and lets drop finish
//! it. Diagnostics go to stderr so they never tear the status line.

use clap::Parser;
use tally_core::{Settings, TallyResult};
use tracing::{error, info};

mod demo;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (built ",
    env!("TALLY_BUILD_DATE"),
    ", ",
    env!("TALLY_RUSTC_VERSION"),
    ")"
);

/// Single-line terminal progress indicator demo
#[derive(Parser, Debug)]
#[command(name = "tally", version, long_version = LONG_VERSION, about = "Terminal progress indicator demo")]
pub struct Cli {
    /// Expected total of the bounded run
    #[arg(short, long, default_value_t = 1000, env = "TALLY_TOTAL")]
    pub total: u64,

    /// Sleep after every step, in milliseconds
    #[arg(short, long, default_value_t = 5, env = "TALLY_DELAY_MS")]
    pub delay_ms: u64,

    /// Stop the bounded run after this many steps
    #[arg(long, value_name = "COUNT")]
    pub stop_at: Option<u64>,

    /// Worker threads sharing the bounded run
    #[arg(short = 'j', long, default_value_t = 1)]
    pub threads: usize,

    /// Label printed before the line
    #[arg(short, long)]
    pub prefix: Option<String>,

    /// Hide the percent column
    #[arg(long)]
    pub no_percent: bool,

    /// Hide the bar
    #[arg(long)]
    pub no_bar: bool,

    /// Hide the elapsed count and time
    #[arg(long)]
    pub no_elapsed: bool,

    /// Hide the throughput
    #[arg(long)]
    pub no_rate: bool,

    /// Hide the expected remaining time
    #[arg(long)]
    pub no_eta: bool,

    /// Report the bounded run as complete even if it stopped early
    #[arg(long)]
    pub enforce: bool,

    /// Erase the bounded run's line instead of finishing it
    #[arg(long, conflicts_with = "enforce")]
    pub remove: bool,

    /// Skip the second run with an unknown total
    #[arg(long)]
    pub skip_unbounded: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Defaults, then `TALLY_*` environment, then command-line flags
    pub fn settings(&self) -> TallyResult<Settings> {
        let mut settings = Settings::from_env()?;

        if let Some(prefix) = &self.prefix {
            settings.display.prefix = Some(prefix.clone());
        }
        if self.no_percent {
            settings.display.show_percent = false;
        }
        if self.no_bar {
            settings.display.show_bar = false;
        }
        if self.no_elapsed {
            settings.display.show_elapsed = false;
        }
        if self.no_rate {
            settings.display.show_rate = false;
        }
        if self.no_eta {
            settings.display.show_eta = false;
        }

        Ok(settings)
    }
}

fn main() -> TallyResult<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose);
    setup_panic_handler();

    info!("Starting tally v{}", env!("CARGO_PKG_VERSION"));

    let settings = cli.settings()?;
    demo::run_bounded(&cli, &settings);
    if !cli.skip_unbounded {
        demo::run_unbounded(&cli, &settings);
    }

    Ok(())
}

/// Filter directives for the binary's own target and the library
fn log_directive(verbose: bool) -> String {
    let level = if verbose { "debug" } else { "info" };
    format!("tally={},tally_core={}", level, level)
}

fn setup_logging(verbose: bool) {
    tracing_subscriber::fmt()
        .with_env_filter(log_directive(verbose))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn setup_panic_handler() {
    std::panic::set_hook(Box::new(|panic_info| {
        error!("tally encountered an unexpected error: {}", panic_info);
        eprintln!("tally crashed! This is a bug.");
        eprintln!("Error: {}", panic_info);
    }));
}
