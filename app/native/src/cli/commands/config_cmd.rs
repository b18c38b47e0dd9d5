//! Creating the configuration file and locating it.

use std::path::{Path, PathBuf};

use clap::Subcommand;
use colored::Colorize;

use crate::config::config_paths;
use crate::config::template::{create_config_file, generate_config_template};
use crate::error::SalahError;

/// Config management commands.
#[derive(Subcommand, Debug)]
#[command(next_display_order = None)]
pub enum ConfigCommands {
    /// Write a configuration file with every option documented.
    ///
    /// All options are commented out; uncomment the ones to change.
    #[command(
        name = "init",
        after_long_help = r"Examples:
  salah config init                          # Create config at the default location
  salah config init --force                  # Overwrite an existing config
  salah config init --path ~/salah.jsonc     # Create at a custom path
  salah config init --stdout > config.jsonc  # Print the template"
    )]
    Init {
        /// Overwrite the file if it exists.
        #[arg(long, short)]
        force: bool,

        /// Where to write the file. Defaults to ~/.config/salah/config.jsonc.
        #[arg(long, short, value_name = "PATH")]
        path: Option<PathBuf>,

        /// Print the template instead of writing a file.
        #[arg(long)]
        stdout: bool,
    },

    /// List the configuration search paths and mark the one in use.
    Path,
}

/// Execute config subcommands.
///
/// `custom` is the global `--config` argument, if any.
///
/// # Errors
///
/// Returns an error if the file exists without `--force` or cannot be written.
pub fn execute(cmd: &ConfigCommands, custom: Option<&Path>) -> Result<(), SalahError> {
    match cmd {
        ConfigCommands::Init { stdout: true, .. } => {
            println!("{}", generate_config_template());
            Ok(())
        }
        ConfigCommands::Init { force, path, .. } => {
            let target = path.clone().or_else(|| custom.map(Path::to_path_buf));
            let written = init_config(*force, target)?;

            println!("Configuration file created at: {}", written.display());
            println!("Uncomment the options you want to change.");
            Ok(())
        }
        ConfigCommands::Path => {
            show_config_path(custom);
            Ok(())
        }
    }
}

/// Writes the template to `path`, or to the preferred search path.
fn init_config(force: bool, path: Option<PathBuf>) -> Result<PathBuf, SalahError> {
    let path = path
        .or_else(|| config_paths().into_iter().next())
        .unwrap_or_else(|| PathBuf::from("config.jsonc"));

    if path.exists() && !force {
        return Err(SalahError::Config(format!(
            "{} already exists. Use --force to overwrite.",
            path.display()
        )));
    }

    create_config_file(&path)
        .map_err(|err| SalahError::Config(format!("Failed to write {}: {err}", path.display())))?;

    Ok(path)
}

fn show_config_path(custom: Option<&Path>) {
    if let Some(path) = custom {
        let marker = if path.exists() { "(active)".green() } else { "(missing)".red() };
        println!("{} {marker}", path.display());
        return;
    }

    println!("Configuration file search paths (in priority order):\n");

    let paths = config_paths();
    let active = paths.iter().position(|path| path.exists());

    for (i, path) in paths.iter().enumerate() {
        let marker = match active {
            Some(index) if index == i => " (active)".green().to_string(),
            _ if path.exists() => " (exists)".dimmed().to_string(),
            _ => String::new(),
        };
        println!("  {}. {}{marker}", i + 1, path.display());
    }

    if active.is_none() {
        println!("\nNo configuration file found; defaults are used.");
        println!("Run 'salah config init' to create one.");
    }
}
