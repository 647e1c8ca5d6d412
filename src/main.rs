//! pylav-setup CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use pylav_setup::cli::Cli;
use pylav_setup::runner;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by:
/// 1. `--debug` flag sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is INFO
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("pylav_setup=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("pylav_setup=info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    tracing::debug!("pylav-setup starting with args: {:?}", cli);

    // Update failures are folded into the outcome (and already logged);
    // every outcome exits 0 so the container boot proceeds. Only failures
    // before the guarded phase, such as an unreadable bot config or a
    // broken checkout, surface as a non-zero exit.
    match runner::run(&cli) {
        Ok(outcome) => {
            tracing::debug!("run finished: {:?}", outcome);
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("Error: {e}");
            ExitCode::from(1)
        }
    }
}
