//! Cache CLI commands.

use clap::Subcommand;

use crate::cache::{clear_dir, format_bytes};
use crate::config::LoadedConfig;
use crate::error::SalahError;
use crate::wallpaper::publish::output_directory;

/// Published wallpaper management commands.
#[derive(Subcommand, Debug)]
#[command(next_display_order = None)]
pub enum CacheCommands {
    /// Show the directory published wallpapers are written to.
    Path,

    /// Remove previously published wallpapers.
    ///
    /// Only `salah-*.jpg` files are removed; the directory and any other
    /// files in it are kept. The current desktop keeps its image until the
    /// next `apply`.
    Clear,
}

/// Execute cache subcommands.
///
/// # Errors
///
/// Returns an error if the directory cannot be read or a wallpaper cannot be removed.
pub fn execute(cmd: &CacheCommands, loaded: &LoadedConfig) -> Result<(), SalahError> {
    let directory = output_directory(loaded);

    match cmd {
        CacheCommands::Path => println!("{}", directory.display()),
        CacheCommands::Clear => {
            let freed = clear_dir(&directory)?;
            tracing::debug!(directory = %directory.display(), freed, "cleared wallpapers");

            if freed == 0 {
                println!("Nothing to clear in {}", directory.display());
            } else {
                println!("Cleared {} from {}", format_bytes(freed), directory.display());
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn loaded_with_directory(directory: &std::path::Path) -> LoadedConfig {
        let mut loaded = LoadedConfig::default();
        loaded.config.publisher.directory = directory.display().to_string();
        loaded
    }

    #[test]
    fn test_clear_removes_published_files() {
        let temp_dir = TempDir::new().unwrap();
        let directory = temp_dir.path().join("wallpapers");
        std::fs::create_dir_all(&directory).unwrap();
        std::fs::write(directory.join("salah-abc.jpg"), vec![0u8; 512]).unwrap();

        execute(&CacheCommands::Clear, &loaded_with_directory(&directory)).unwrap();
        assert!(directory.is_dir());
        assert!(!directory.join("salah-abc.jpg").exists());
    }

    #[test]
    fn test_clear_keeps_source_images_in_shared_directory() {
        let temp_dir = TempDir::new().unwrap();
        let pictures = temp_dir.path().join("Pictures");
        std::fs::create_dir_all(&pictures).unwrap();
        std::fs::write(pictures.join("fajr.jpg"), vec![1u8; 64]).unwrap();
        std::fs::write(pictures.join("salah-k2Lm9q.jpg"), vec![0u8; 128]).unwrap();

        let mut loaded = loaded_with_directory(&pictures);
        loaded.config.images.directory = pictures.display().to_string();

        execute(&CacheCommands::Clear, &loaded).unwrap();

        assert!(pictures.join("fajr.jpg").is_file());
        assert!(!pictures.join("salah-k2Lm9q.jpg").exists());
    }

    #[test]
    fn test_clear_missing_directory_is_ok() {
        let temp_dir = TempDir::new().unwrap();
        let loaded = loaded_with_directory(&temp_dir.path().join("never-created"));
        assert!(execute(&CacheCommands::Clear, &loaded).is_ok());
    }
}
