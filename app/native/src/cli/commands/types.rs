//! Shared types for CLI commands.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::{DateTime, FixedOffset, Local, NaiveTime};
use image::RgbImage;

use crate::config::LoadedConfig;
use crate::error::SalahError;
use crate::wallpaper::{WallpaperPublisher, encode_jpeg};

/// The instant a command acts on, given as `HH:MM` (today) or RFC 3339.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AtTime(DateTime<FixedOffset>);

impl AtTime {
    /// The current local time.
    #[must_use]
    pub fn now() -> DateTime<FixedOffset> { Local::now().fixed_offset() }

    #[must_use]
    pub const fn get(self) -> DateTime<FixedOffset> { self.0 }

    /// Resolves an optional `--at` argument, defaulting to now.
    #[must_use]
    pub fn or_now(at: Option<Self>) -> DateTime<FixedOffset> { at.map_or_else(Self::now, Self::get) }

    /// Parses `value` relative to `today`.
    ///
    /// A bare `HH:MM` keeps the date and UTC offset of `today`.
    ///
    /// # Errors
    ///
    /// Returns a message naming both accepted forms.
    pub fn parse_on(value: &str, today: DateTime<FixedOffset>) -> Result<Self, String> {
        let value = value.trim();

        if let Ok(instant) = DateTime::parse_from_rfc3339(value) {
            return Ok(Self(instant));
        }

        NaiveTime::parse_from_str(value, "%H:%M")
            .ok()
            .and_then(|time| today.date_naive().and_time(time).and_local_timezone(*today.offset()).single())
            .map(Self)
            .ok_or_else(|| {
                format!("Invalid time '{value}'. Expected HH:MM or an RFC 3339 timestamp.")
            })
    }
}

impl FromStr for AtTime {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> { Self::parse_on(s, Self::now()) }
}

impl std::fmt::Display for AtTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}

/// Where a finished wallpaper goes.
#[derive(Debug)]
pub enum Destination {
    /// Written as a JPEG to the given path; the desktop is untouched.
    File { path: PathBuf, quality: u8 },
    /// Published as the desktop wallpaper.
    Desktop(WallpaperPublisher),
}

impl Destination {
    /// Picks the destination for an optional `--output` argument.
    ///
    /// # Errors
    ///
    /// Returns `SalahError::Config` if the publisher is misconfigured.
    pub fn from_args(loaded: &LoadedConfig, output: Option<&Path>) -> Result<Self, SalahError> {
        Ok(match output {
            Some(path) => {
                Self::File { path: path.to_path_buf(), quality: loaded.config.publisher.quality }
            }
            None => Self::Desktop(WallpaperPublisher::from_config(loaded)?),
        })
    }

    /// Delivers `image` and returns the file it was written to.
    ///
    /// # Errors
    ///
    /// Returns `SalahError::Encode` or `SalahError::Publish`.
    pub fn deliver(&self, image: &RgbImage) -> Result<PathBuf, SalahError> {
        match self {
            Self::File { path, quality } => {
                encode_jpeg(image, path, *quality)?;
                Ok(path.clone())
            }
            Self::Desktop(publisher) => publisher.publish(image),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Datelike, TimeZone, Timelike};
    use image::Rgb;
    use tempfile::TempDir;

    use super::*;

    fn today() -> DateTime<FixedOffset> {
        FixedOffset::east_opt(3600).unwrap().with_ymd_and_hms(2025, 3, 30, 8, 12, 45).unwrap()
    }

    #[test]
    fn test_parse_hh_mm_uses_today() {
        let at = AtTime::parse_on("13:05", today()).unwrap().get();
        assert_eq!((at.year(), at.month(), at.day()), (2025, 3, 30));
        assert_eq!((at.hour(), at.minute(), at.second()), (13, 5, 0));
        assert_eq!(at.offset().local_minus_utc(), 3600);
    }

    #[test]
    fn test_parse_rfc3339() {
        let at = AtTime::parse_on("2025-06-01T21:30:00+02:00", today()).unwrap().get();
        assert_eq!(at.to_rfc3339(), "2025-06-01T21:30:00+02:00");
    }

    #[test]
    fn test_parse_invalid_time() {
        for value in ["noon", "25:00", "13", ""] {
            let err = AtTime::parse_on(value, today()).unwrap_err();
            assert!(err.contains("HH:MM"), "{value}: {err}");
        }
    }

    #[test]
    fn test_or_now_prefers_argument() {
        let at = AtTime::parse_on("04:00", today()).unwrap();
        assert_eq!(AtTime::or_now(Some(at)), at.get());
    }

    #[test]
    fn test_file_destination_writes_jpeg() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("preview.jpg");
        let destination = Destination::File { path: path.clone(), quality: 80 };

        let written = destination.deliver(&RgbImage::from_pixel(16, 10, Rgb([1, 2, 3]))).unwrap();

        assert_eq!(written, path);
        assert_eq!(image::open(&path).unwrap().width(), 16);
    }

    #[test]
    fn test_from_args_with_output_skips_publisher() {
        let mut loaded = LoadedConfig::default();
        loaded.config.publisher.backend = crate::config::PublisherBackend::Command;

        let destination = Destination::from_args(&loaded, Some(Path::new("out.jpg"))).unwrap();
        assert!(matches!(destination, Destination::File { .. }));
        assert!(Destination::from_args(&loaded, None).is_err());
    }
}
