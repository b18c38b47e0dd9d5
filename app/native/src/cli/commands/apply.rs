//! `salah apply`: the scheduled wallpaper for now (or `--at`).

use std::path::PathBuf;

use clap::Args;
use colored::Colorize;

use super::types::{AtTime, Destination};
use crate::config::LoadedConfig;
use crate::error::SalahError;
use crate::pipeline::Pipeline;

/// Arguments of the apply command.
#[derive(Args, Debug, Default)]
pub struct ApplyArgs {
    /// Act as if it were this time (HH:MM today, or RFC 3339).
    #[arg(long, value_name = "TIME")]
    pub at: Option<AtTime>,

    /// Write the wallpaper to this JPEG file instead of setting it.
    #[arg(long, short, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

/// Builds the wallpaper for the current period and delivers it.
///
/// The destination is validated before any network access.
///
/// # Errors
///
/// Returns the first error of the pipeline or the destination.
pub fn execute(loaded: &LoadedConfig, args: &ApplyArgs) -> Result<(), SalahError> {
    let now = AtTime::or_now(args.at);
    let destination = Destination::from_args(loaded, args.output.as_deref())?;
    let pipeline = Pipeline::from_config(loaded)?;

    let composite = pipeline.compose(now)?;
    let path = destination.deliver(&composite.image)?;

    println!(
        "{} {} {}",
        composite.selection.prayer.name().bold(),
        format!("({})", composite.sublabel).dimmed(),
        path.display()
    );

    Ok(())
}
