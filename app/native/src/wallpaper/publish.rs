//! Wallpaper publishing.
//!
//! The composite is written to a uniquely named JPEG and handed to the
//! operating system. The file is left in place afterwards: the desktop reads it
//! asynchronously, so its lifetime belongs to the OS from then on.

use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::process::Command;

use image::RgbImage;

use super::processing::write_jpeg;
use crate::cache;
use crate::config::{LoadedConfig, PublisherBackend, PublisherConfig};
use crate::error::SalahError;
use crate::utils::command::resolve_binary;

/// Placeholder replaced with the wallpaper path in custom commands.
pub const PATH_PLACEHOLDER: &str = "{path}";

/// Applies an image file as the desktop background.
pub trait WallpaperSetter {
    /// Short backend name for logs.
    fn name(&self) -> &'static str;

    /// Sets `path` as the wallpaper.
    ///
    /// # Errors
    ///
    /// Returns `SalahError::Publish` if the OS rejects the wallpaper.
    fn set(&self, path: &Path) -> Result<(), SalahError>;
}

/// Sets the wallpaper of every desktop through AppleScript.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsascriptSetter;

impl OsascriptSetter {
    /// The AppleScript statement for `path`.
    #[must_use]
    pub fn script(path: &Path) -> String {
        let escaped = path.display().to_string().replace('\\', "\\\\").replace('"', "\\\"");
        format!("tell application \"System Events\" to set picture of every desktop to \"{escaped}\"")
    }
}

impl WallpaperSetter for OsascriptSetter {
    fn name(&self) -> &'static str { "osascript" }

    fn set(&self, path: &Path) -> Result<(), SalahError> {
        run(Command::new("osascript").arg("-e").arg(Self::script(path)), "osascript")
    }
}

/// Uses the platform wallpaper API through the `wallpaper` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeSetter;

impl WallpaperSetter for NativeSetter {
    fn name(&self) -> &'static str { "native" }

    fn set(&self, path: &Path) -> Result<(), SalahError> {
        let path = path
            .to_str()
            .ok_or_else(|| SalahError::Publish(format!("path is not UTF-8: {}", path.display())))?;
        wallpaper::set_from_path(path).map_err(|err| SalahError::Publish(err.to_string()))
    }
}

/// Runs a user supplied command with the wallpaper path.
#[derive(Debug, Clone)]
pub struct CommandSetter {
    argv: Vec<String>,
}

impl CommandSetter {
    /// Creates the setter from an argv whose first element is the program.
    ///
    /// # Errors
    ///
    /// Returns `SalahError::Config` if `argv` is empty.
    pub fn new(argv: Vec<String>) -> Result<Self, SalahError> {
        if argv.first().is_none_or(|program| program.trim().is_empty()) {
            return Err(SalahError::Config(
                "publisher.command must name a program when the command backend is used"
                    .to_string(),
            ));
        }
        Ok(Self { argv })
    }

    /// Arguments for `path`: every `{path}` is substituted, or the path is
    /// appended when no argument contains the placeholder.
    #[must_use]
    pub fn arguments(&self, path: &Path) -> Vec<String> {
        let path = path.display().to_string();
        let mut args: Vec<String> =
            self.argv[1..].iter().map(|arg| arg.replace(PATH_PLACEHOLDER, &path)).collect();

        if !self.argv[1..].iter().any(|arg| arg.contains(PATH_PLACEHOLDER)) {
            args.push(path);
        }
        args
    }
}

impl WallpaperSetter for CommandSetter {
    fn name(&self) -> &'static str { "command" }

    fn set(&self, path: &Path) -> Result<(), SalahError> {
        let program = &self.argv[0];
        let binary = resolve_binary(program).map_err(SalahError::Publish)?;
        run(Command::new(binary).args(self.arguments(path)), program)
    }
}

/// Runs `command` to completion, mapping failures to `SalahError::Publish`.
fn run(command: &mut Command, program: &str) -> Result<(), SalahError> {
    let output = command
        .output()
        .map_err(|err| SalahError::Publish(format!("failed to run '{program}': {err}")))?;

    if output.status.success() {
        return Ok(());
    }

    let stderr = String::from_utf8_lossy(&output.stderr);
    let stderr = stderr.trim();
    Err(SalahError::Publish(if stderr.is_empty() {
        format!("'{program}' exited with {}", output.status)
    } else {
        format!("'{program}' exited with {}: {stderr}", output.status)
    }))
}

/// Creates the setter for the configured backend.
///
/// # Errors
///
/// Returns `SalahError::Config` if the command backend has no command.
pub fn setter_for(config: &PublisherConfig) -> Result<Box<dyn WallpaperSetter>, SalahError> {
    Ok(match config.backend {
        PublisherBackend::Auto if cfg!(target_os = "macos") => Box::new(OsascriptSetter),
        PublisherBackend::Auto | PublisherBackend::Native => Box::new(NativeSetter),
        PublisherBackend::Osascript => Box::new(OsascriptSetter),
        PublisherBackend::Command => Box::new(CommandSetter::new(config.command.clone())?),
    })
}

/// Returns the directory published wallpapers are written to.
///
/// Without `publisher.directory`, this is the cache's wallpaper directory.
#[must_use]
pub fn output_directory(loaded: &LoadedConfig) -> PathBuf {
    let directory = &loaded.config.publisher.directory;
    if directory.trim().is_empty() { cache::wallpapers_dir() } else { loaded.resolve(directory) }
}

/// Writes composites to disk and applies them as the wallpaper.
pub struct WallpaperPublisher {
    directory: PathBuf,
    quality: u8,
    setter: Box<dyn WallpaperSetter>,
}

impl std::fmt::Debug for WallpaperPublisher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WallpaperPublisher")
            .field("directory", &self.directory)
            .field("quality", &self.quality)
            .field("setter", &self.setter.name())
            .finish()
    }
}

impl WallpaperPublisher {
    #[must_use]
    pub fn new(directory: PathBuf, quality: u8, setter: Box<dyn WallpaperSetter>) -> Self {
        Self { directory, quality, setter }
    }

    /// Builds the publisher from the configuration.
    ///
    /// # Errors
    ///
    /// Returns `SalahError::Config` if the backend is misconfigured.
    pub fn from_config(loaded: &LoadedConfig) -> Result<Self, SalahError> {
        let config = &loaded.config.publisher;
        Ok(Self::new(output_directory(loaded), config.quality, setter_for(config)?))
    }

    #[must_use]
    pub fn directory(&self) -> &Path { &self.directory }

    /// Encodes `image` into a new, uniquely named JPEG and keeps the file.
    ///
    /// # Errors
    ///
    /// Returns `SalahError::Encode` if the file cannot be created or written.
    pub fn write(&self, image: &RgbImage) -> Result<PathBuf, SalahError> {
        let encode_error =
            |reason: String| SalahError::Encode(format!("{}: {reason}", self.directory.display()));

        std::fs::create_dir_all(&self.directory).map_err(|err| encode_error(err.to_string()))?;

        let mut file = tempfile::Builder::new()
            .prefix(cache::PUBLISHED_PREFIX)
            .suffix(cache::PUBLISHED_SUFFIX)
            .tempfile_in(&self.directory)
            .map_err(|err| encode_error(err.to_string()))?;

        write_jpeg(image, &mut BufWriter::new(file.as_file_mut()), self.quality)
            .map_err(|err| encode_error(err.to_string()))?;

        let (_, path) = file.keep().map_err(|err| encode_error(err.to_string()))?;
        Ok(path)
    }

    /// Writes `image` and applies it as the wallpaper. Never retried.
    ///
    /// # Errors
    ///
    /// Returns `SalahError::Encode` if the file cannot be written and
    /// `SalahError::Publish` if the OS rejects it.
    pub fn publish(&self, image: &RgbImage) -> Result<PathBuf, SalahError> {
        let path = self.write(image)?;
        tracing::debug!(path = %path.display(), backend = self.setter.name(), "applying wallpaper");

        self.setter.set(&path)?;
        tracing::info!(path = %path.display(), "wallpaper published");
        Ok(path)
    }
}
