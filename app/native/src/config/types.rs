//! Configuration types for Salah.
//!
//! This module provides the configuration types and loading functionality.
//! The configuration file supports JSONC format (JSON with comments).
//! Both single-line (`//`) and multi-line (`/* */`) comments are allowed.

use std::fs;
use std::path::{Path, PathBuf};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::constants::APP_NAME;
use crate::schedule::Prayer;

/// Default Masjidbox timetable endpoint (the masjid slug is appended).
pub const DEFAULT_ENDPOINT: &str = "https://api.masjidbox.com/1.0/masjidbox/landing/athany";

/// Default referer sent with timetable requests.
pub const DEFAULT_REFERER: &str = "https://masjidbox.com/";

/// Timetable API configuration.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct ScheduleConfig {
    /// Base URL of the timetable API. The masjid slug is appended as a path segment.
    pub endpoint: String,

    /// Masjidbox slug of the masjid whose timetable is used,
    /// e.g. "green-lane-masjid-1666108368685".
    pub masjid: String,

    /// Path to a .env file containing `MASJIDBOX_API_KEY`.
    /// Relative paths are resolved against the configuration file's directory.
    pub api_keys: String,

    /// Referer header sent with timetable requests.
    pub referer: String,

    /// User-Agent header sent with timetable requests.
    pub user_agent: String,

    /// Request timeout in seconds.
    pub timeout: u64,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            masjid: String::new(),
            api_keys: String::new(),
            referer: DEFAULT_REFERER.to_string(),
            user_agent: format!("{APP_NAME}/{}", env!("CARGO_PKG_VERSION")),
            timeout: 30,
        }
    }
}

/// Target screen resolution.
///
/// When either dimension is missing, the primary display is queried instead.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ScreenConfig {
    /// Width in pixels.
    pub width: Option<u32>,

    /// Height in pixels.
    pub height: Option<u32>,
}

/// Candidate images for each prayer period.
///
/// Each entry is either an image file or a directory of images. Directories
/// rotate through their images by day of year.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct ImagesConfig {
    /// Base directory for relative entries.
    /// Relative to the configuration file's directory when not absolute.
    pub directory: String,

    /// Image for Fajr (dawn until sunrise).
    pub fajr: String,

    /// Image for Duha (sunrise until Dhuhr).
    pub duha: String,

    /// Image for Dhuhr (midday until Asr).
    pub dhuhr: String,

    /// Image for Asr (afternoon until Maghrib).
    pub asr: String,

    /// Image for Maghrib (sunset until Isha).
    pub maghrib: String,

    /// Image for Isha (night until the next Fajr).
    pub isha: String,
}

impl Default for ImagesConfig {
    fn default() -> Self {
        Self {
            directory: "images".to_string(),
            fajr: "fajr.jpg".to_string(),
            duha: "duha.jpg".to_string(),
            dhuhr: "dhuhr.jpg".to_string(),
            asr: "asr.jpg".to_string(),
            maghrib: "maghrib.jpg".to_string(),
            isha: "isha.jpg".to_string(),
        }
    }
}

impl ImagesConfig {
    /// Returns the configured entry for a prayer period.
    #[must_use]
    pub fn entry(&self, prayer: Prayer) -> &str {
        match prayer {
            Prayer::Fajr => &self.fajr,
            Prayer::Duha => &self.duha,
            Prayer::Dhuhr => &self.dhuhr,
            Prayer::Asr => &self.asr,
            Prayer::Maghrib => &self.maghrib,
            Prayer::Isha => &self.isha,
        }
    }
}

/// Display label overrides. Unset entries use the period description,
/// e.g. "midday period".
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct LabelsConfig {
    pub fajr: Option<String>,
    pub duha: Option<String>,
    pub dhuhr: Option<String>,
    pub asr: Option<String>,
    pub maghrib: Option<String>,
    pub isha: Option<String>,
}

impl LabelsConfig {
    /// Returns the display label for a prayer period.
    #[must_use]
    pub fn label(&self, prayer: Prayer) -> &str {
        let custom = match prayer {
            Prayer::Fajr => &self.fajr,
            Prayer::Duha => &self.duha,
            Prayer::Dhuhr => &self.dhuhr,
            Prayer::Asr => &self.asr,
            Prayer::Maghrib => &self.maghrib,
            Prayer::Isha => &self.isha,
        };
        custom.as_deref().unwrap_or_else(|| prayer.description())
    }
}

/// Text overlay styling.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct OverlayConfig {
    /// Font files tried in order; the first one that loads is used.
    /// Falls back to a built-in bitmap font when none load.
    pub fonts: Vec<String>,

    /// Pixel size of the prayer name.
    pub main_size: f32,

    /// Pixel size of the time range.
    pub sub_size: f32,

    /// Outline width of the prayer name in pixels.
    pub main_stroke: u32,

    /// Outline width of the time range in pixels.
    pub sub_stroke: u32,

    /// Vertical gap in pixels between the prayer name and the time range.
    pub gap: f32,

    /// Horizontal text position as a fraction of the screen width.
    pub margin_x: f32,

    /// Vertical text position as a fraction of the screen height.
    pub margin_y: f32,

    /// Text fill colour as "#RRGGBB".
    pub fill: String,

    /// Text outline colour as "#RRGGBB".
    pub stroke: String,

    /// strftime-style format used for the time range.
    pub time_format: String,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            fonts: vec![
                "/System/Library/Fonts/SanFrancisco.ttf".to_string(),
                "/System/Library/Fonts/SFNS.ttf".to_string(),
                "/Library/Fonts/Arial.ttf".to_string(),
                "/System/Library/Fonts/HelveticaNeue.ttc".to_string(),
                "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf".to_string(),
            ],
            main_size: 120.0,
            sub_size: 40.0,
            main_stroke: 5,
            sub_stroke: 3,
            gap: 10.0,
            margin_x: 0.05,
            margin_y: 0.1,
            fill: "#FFFFFF".to_string(),
            stroke: "#000000".to_string(),
            time_format: "%H:%M".to_string(),
        }
    }
}

/// Mechanism used to apply the wallpaper.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum PublisherBackend {
    /// `osascript` on macOS, the native backend elsewhere.
    #[default]
    Auto,
    /// AppleScript through `osascript`.
    Osascript,
    /// The platform's native wallpaper API.
    Native,
    /// A user supplied command.
    Command,
}

/// Wallpaper publishing configuration.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct PublisherConfig {
    /// Backend used to apply the wallpaper.
    pub backend: PublisherBackend,

    /// Command for the "command" backend. `{path}` is replaced with the
    /// wallpaper path; the path is appended when no placeholder is present.
    pub command: Vec<String>,

    /// JPEG quality (1-100).
    pub quality: u8,

    /// Directory receiving the generated wallpapers.
    /// Defaults to the application's cache directory.
    pub directory: String,
}

impl Default for PublisherConfig {
    fn default() -> Self {
        Self {
            backend: PublisherBackend::Auto,
            command: Vec::new(),
            quality: 90,
            directory: String::new(),
        }
    }
}

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct SalahConfig {
    /// Prayer timetable source.
    pub schedule: ScheduleConfig,

    /// Target screen resolution.
    pub screen: ScreenConfig,

    /// Wallpaper images per prayer period.
    pub images: ImagesConfig,

    /// Display label overrides per prayer period.
    pub labels: LabelsConfig,

    /// Text overlay styling.
    pub overlay: OverlayConfig,

    /// Wallpaper publishing.
    pub publisher: PublisherConfig,
}

/// Parses a `#RRGGBB` (or `RRGGBB`) colour.
///
/// # Errors
///
/// Returns `ConfigError::Invalid` if the value is not six hexadecimal digits.
pub fn parse_hex_color(value: &str) -> Result<[u8; 3], ConfigError> {
    let hex = value.trim().trim_start_matches('#');
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ConfigError::Invalid(format!("invalid colour '{value}'")));
    }

    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&hex[range], 16)
            .map_err(|_| ConfigError::Invalid(format!("invalid colour '{value}'")))
    };

    Ok([channel(0..2)?, channel(2..4)?, channel(4..6)?])
}

/// Errors that can occur when loading the configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// No configuration file was found in any of the expected locations.
    NotFound,
    /// The configuration file exists but could not be read.
    IoError(std::io::Error),
    /// The configuration file contains invalid JSON.
    ParseError(serde_json::Error),
    /// A configuration value is invalid.
    Invalid(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound => write!(
                f,
                "No configuration file found. Expected at ~/.config/salah/config.jsonc, \
                the platform configuration directory, or ~/.salah.jsonc"
            ),
            Self::IoError(err) => write!(f, "Failed to read configuration file: {err}"),
            Self::ParseError(err) => write!(f, "Failed to parse configuration file: {err}"),
            Self::Invalid(msg) => write!(f, "Invalid configuration value: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::IoError(err) => Some(err),
            Self::ParseError(err) => Some(err),
            Self::NotFound | Self::Invalid(_) => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self { Self::IoError(err) }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self { Self::ParseError(err) }
}

/// Configuration file names to search for (in priority order).
const CONFIG_FILE_NAMES: &[&str] = &["config.jsonc", "config.json"];

/// Legacy configuration file names in home directory.
const LEGACY_CONFIG_FILE_NAMES: &[&str] = &[".salah.jsonc", ".salah.json"];

/// Returns the possible configuration file paths in priority order.
///
/// The function checks the following locations (both `.jsonc` and `.json` variants):
/// 1. `$XDG_CONFIG_HOME/salah/` when the variable is set
/// 2. `~/.config/salah/config.jsonc` or `config.json`
/// 3. The platform configuration directory (`~/Library/Application Support/salah/` on macOS)
/// 4. `~/.salah.jsonc` or `~/.salah.json`
#[must_use]
pub fn config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
        let app_dir = PathBuf::from(xdg_config).join(APP_NAME);
        for filename in CONFIG_FILE_NAMES {
            paths.push(app_dir.join(filename));
        }
    }

    if let Some(home) = dirs::home_dir() {
        let app_dir = home.join(".config").join(APP_NAME);
        for filename in CONFIG_FILE_NAMES {
            let path = app_dir.join(filename);
            // XDG_CONFIG_HOME might be ~/.config
            if !paths.contains(&path) {
                paths.push(path);
            }
        }
    }

    if let Some(config_dir) = dirs::config_dir() {
        let app_dir = config_dir.join(APP_NAME);
        for filename in CONFIG_FILE_NAMES {
            let path = app_dir.join(filename);
            if !paths.contains(&path) {
                paths.push(path);
            }
        }
    }

    if let Some(home) = dirs::home_dir() {
        for filename in LEGACY_CONFIG_FILE_NAMES {
            paths.push(home.join(filename));
        }
    }

    paths
}

/// Loads the configuration from a specific file.
///
/// # Errors
///
/// Returns `ConfigError::NotFound` if the file does not exist,
/// `ConfigError::IoError` if it cannot be read and
/// `ConfigError::ParseError` if it contains invalid JSON.
pub fn load_config_from_path(path: &Path) -> Result<(SalahConfig, PathBuf), ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound);
    }

    let file = fs::File::open(path)?;
    // Strip comments from JSONC before parsing
    let reader = json_comments::StripComments::new(file);
    let config: SalahConfig = serde_json::from_reader(reader)?;
    Ok((config, path.to_path_buf()))
}

/// Loads the configuration from the first available config file.
///
/// # Errors
///
/// Returns `ConfigError::NotFound` if no configuration file exists in any of the expected locations.
/// Returns `ConfigError::IoError` if a configuration file exists but could not be read.
/// Returns `ConfigError::ParseError` if the configuration file contains invalid JSON.
pub fn load_config() -> Result<(SalahConfig, PathBuf), ConfigError> {
    config_paths()
        .into_iter()
        .find(|path| path.exists())
        .map_or(Err(ConfigError::NotFound), |path| load_config_from_path(&path))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_default_config_values() {
        let config = SalahConfig::default();
        assert_eq!(config.schedule.endpoint, DEFAULT_ENDPOINT);
        assert!(config.schedule.masjid.is_empty());
        assert_eq!(config.publisher.quality, 90);
        assert_eq!(config.publisher.backend, PublisherBackend::Auto);
        assert!((config.overlay.main_size - 120.0).abs() < f32::EPSILON);
        assert_eq!(config.overlay.main_stroke, 5);
        assert_eq!(config.overlay.sub_stroke, 3);
    }

    #[test]
    fn test_config_deserializes_camel_case() {
        let json = r#"{
            "schedule": { "masjid": "green-lane", "apiKeys": ".env" },
            "screen": { "width": 1920, "height": 1080 },
            "overlay": { "mainSize": 96, "timeFormat": "%I:%M %p" },
            "publisher": { "backend": "command", "command": ["feh", "--bg-fill", "{path}"] }
        }"#;

        let config: SalahConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.schedule.masjid, "green-lane");
        assert_eq!(config.schedule.api_keys, ".env");
        assert_eq!(config.screen.width, Some(1920));
        assert!((config.overlay.main_size - 96.0).abs() < f32::EPSILON);
        assert_eq!(config.overlay.time_format, "%I:%M %p");
        // Untouched fields keep their defaults
        assert_eq!(config.overlay.sub_stroke, 3);
        assert_eq!(config.publisher.backend, PublisherBackend::Command);
        assert_eq!(config.publisher.command.len(), 3);
    }

    #[test]
    fn test_images_entry_per_prayer() {
        let images = ImagesConfig::default();
        assert_eq!(images.entry(Prayer::Fajr), "fajr.jpg");
        assert_eq!(images.entry(Prayer::Dhuhr), "dhuhr.jpg");
        assert_eq!(images.entry(Prayer::Isha), "isha.jpg");
    }

    #[test]
    fn test_labels_default_to_prayer_name() {
        let labels = LabelsConfig {
            dhuhr: Some("Jumu'ah".to_string()),
            ..Default::default()
        };
        assert_eq!(labels.label(Prayer::Dhuhr), "Jumu'ah");
        assert_eq!(labels.label(Prayer::Asr), "afternoon period");
        assert_eq!(LabelsConfig::default().label(Prayer::Isha), "night period");
    }

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#FFFFFF").unwrap(), [255, 255, 255]);
        assert_eq!(parse_hex_color("1a2B3c").unwrap(), [0x1a, 0x2b, 0x3c]);
        assert!(parse_hex_color("#FFF").is_err());
        assert!(parse_hex_color("#GGGGGG").is_err());
        assert!(parse_hex_color("").is_err());
    }

    #[test]
    fn test_load_config_from_path_strips_comments() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.jsonc");
        let mut file = fs::File::create(&path).unwrap();
        writeln!(
            file,
            r#"{{
                // Green Lane timetable
                "schedule": {{ "masjid": "green-lane" }},
                /* 13" laptop */
                "screen": {{ "width": 2560, "height": 1664 }}
            }}"#
        )
        .unwrap();

        let (config, loaded_path) = load_config_from_path(&path).unwrap();
        assert_eq!(loaded_path, path);
        assert_eq!(config.schedule.masjid, "green-lane");
        assert_eq!(config.screen.height, Some(1664));
    }

    #[test]
    fn test_load_config_from_missing_path() {
        let result = load_config_from_path(Path::new("/nonexistent/salah/config.jsonc"));
        assert!(matches!(result, Err(ConfigError::NotFound)));
    }

    #[test]
    fn test_load_config_from_invalid_json() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        fs::write(&path, "{ \"schedule\": ").unwrap();

        let result = load_config_from_path(&path);
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_config_paths_are_not_empty() {
        let paths = config_paths();
        assert!(!paths.is_empty() || std::env::var("HOME").is_err());
    }

    #[test]
    fn test_config_error_display() {
        assert!(ConfigError::NotFound.to_string().contains("No configuration file found"));
        assert!(
            ConfigError::Invalid("invalid colour 'x'".to_string())
                .to_string()
                .contains("invalid colour")
        );
    }
}
