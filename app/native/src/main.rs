#![allow(clippy::multiple_crate_versions)]

//! Salah - sets the desktop wallpaper for the current prayer period.
//!
//! Run it from cron or launchd; each invocation sets the wallpaper once and
//! exits. Logs go to stderr and are controlled by `SALAH_LOG`.

use clap::Parser;
use colored::Colorize;
use salah_lib::cli::Cli;
use salah_lib::constants::{APP_NAME, LOG_ENV_VAR};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = cli.execute() {
        tracing::debug!(error = ?err, "command failed");
        eprintln!("{}: {}", APP_NAME.red().bold(), err);
        std::process::exit(1);
    }
}

/// Logs to stderr, filtered by `SALAH_LOG` when set.
///
/// `--verbose` raises the default from warnings to debug output.
fn init_tracing(verbose: bool) {
    let default = if verbose { "salah=debug,salah_lib=debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
