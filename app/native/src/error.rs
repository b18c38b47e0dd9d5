//! Error types for Salah.
//!
//! This module provides the unified error type used throughout the application.
//! Every error is terminal for a run: it is reported once by the binary and the
//! process exits with a non-zero status.

use thiserror::Error;

use crate::config::ConfigError;

/// Errors that can occur while building and publishing a wallpaper.
#[derive(Debug, Error)]
pub enum SalahError {
    /// The prayer timetable could not be fetched or parsed.
    #[error("Failed to fetch prayer schedule: {0}")]
    ScheduleFetch(String),
    /// No prayer period contains the requested instant.
    #[error("No prayer period matches {0}")]
    ScheduleExhausted(String),
    /// A referenced wallpaper image does not exist.
    #[error("Wallpaper image not found: {0}")]
    ImageNotFound(String),
    /// A wallpaper image exists but could not be decoded.
    #[error("Failed to read image {path}: {reason}")]
    ImageDecode { path: String, reason: String },
    /// The composited wallpaper could not be written to disk.
    #[error("Failed to encode wallpaper: {0}")]
    Encode(String),
    /// The operating system rejected the wallpaper.
    #[error("Failed to set wallpaper: {0}")]
    Publish(String),
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
    /// Invalid command arguments.
    #[error("{0}")]
    InvalidArguments(String),
    /// IO error.
    #[error("IO error: {0}")]
    Io(String),
}

impl From<std::io::Error> for SalahError {
    fn from(err: std::io::Error) -> Self { Self::Io(err.to_string()) }
}

impl From<ConfigError> for SalahError {
    fn from(err: ConfigError) -> Self { Self::Config(err.to_string()) }
}
