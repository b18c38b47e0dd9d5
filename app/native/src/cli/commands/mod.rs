//! CLI command definitions using Clap.
//!
//! - `apply` - the scheduled wallpaper (default command)
//! - `set` - one image with caller-provided labels
//! - `times` - the day's prayer periods
//! - `config` / `cache` - configuration file and published wallpapers
//! - `types` - shared argument types

use std::io;
use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Generator, Shell, generate};

use crate::config::{self, LoadedConfig};
use crate::constants::APP_NAME;
use crate::error::SalahError;
use crate::schema;

pub mod apply;
pub mod cache;
pub mod config_cmd;
pub mod set;
pub mod times;
pub mod types;

pub use apply::ApplyArgs;
pub use cache::CacheCommands;
pub use config_cmd::ConfigCommands;
pub use set::SetArgs;
pub use times::TimesArgs;

/// Application version from Cargo.toml.
const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Salah - desktop wallpapers that follow the prayer times.
#[derive(Parser, Debug)]
#[command(name = "salah")]
#[command(author, version = APP_VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to a custom configuration file (JSONC).
    ///
    /// Overrides the default configuration file search paths.
    #[arg(long, short, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log progress to stderr.
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
#[command(next_display_order = None)]
pub enum Commands {
    /// Set the wallpaper for the current prayer period.
    ///
    /// Fetches today's timetable, picks the period containing now (or --at),
    /// and sets its image with the period label and time range drawn on it.
    /// This is what runs when no command is given.
    Apply(ApplyArgs),

    /// Set a specific image as the wallpaper.
    Set(SetArgs),

    /// Show today's prayer periods.
    Times(TimesArgs),

    /// Configuration file management commands.
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Published wallpaper management commands.
    #[command(subcommand)]
    Cache(CacheCommands),

    /// Output the configuration JSON Schema.
    ///
    /// Redirect to a file for editors that support JSON Schema validation.
    Schema,

    /// Generate shell completions.
    ///
    /// Usage:
    ///   eval "$(salah completions --shell zsh)"
    ///   salah completions --shell fish > ~/.config/fish/completions/salah.fish
    Completions {
        /// The shell to generate completions for.
        #[arg(long, short, value_enum)]
        shell: Shell,
    },
}

impl Cli {
    /// Loads the configuration named by `--config`, or the default one.
    ///
    /// # Errors
    ///
    /// Returns `SalahError::Config` if the file is missing or invalid.
    pub fn load_config(&self) -> Result<LoadedConfig, SalahError> {
        Ok(config::load(self.config.as_deref())?)
    }

    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if the command execution fails.
    pub fn execute(&self) -> Result<(), SalahError> {
        let Some(command) = &self.command else {
            return apply::execute(&self.load_config()?, &ApplyArgs::default());
        };

        match command {
            Commands::Apply(args) => apply::execute(&self.load_config()?, args),
            Commands::Set(args) => set::execute(&self.load_config()?, args),
            Commands::Times(args) => times::execute(&self.load_config()?, args),
            Commands::Config(cmd) => config_cmd::execute(cmd, self.config.as_deref()),
            Commands::Cache(cmd) => cache::execute(cmd, &self.load_config()?),
            Commands::Schema => {
                println!("{}", schema::generate_schema_json());
                Ok(())
            }
            Commands::Completions { shell } => {
                Self::print_completions(*shell);
                Ok(())
            }
        }
    }

    fn print_completions<G: Generator>(generator: G) {
        let mut cmd = Self::command();
        generate(generator, &mut cmd, APP_NAME, &mut io::stdout());
    }
}
