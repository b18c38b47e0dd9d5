//! Configuration template generation.
//!
//! Generates a commented configuration template with all available options.

use std::fs;
use std::path::Path;

/// Generates a configuration template with all options commented out.
///
/// This creates a JSONC file with documentation for every available
/// configuration option and its default value.
#[must_use]
pub fn generate_config_template() -> String {
    r##"// Salah Configuration File
// ========================
// This file uses JSONC format (JSON with comments).
// All options below are commented out and show their default values.
// Uncomment and modify the options you want to configure.

{
  // ============================================================================
  // Prayer Timetable
  // ============================================================================
  // "schedule": {
  //   // Masjidbox timetable endpoint (the masjid slug is appended)
  //   "endpoint": "https://api.masjidbox.com/1.0/masjidbox/landing/athany",
  //
  //   // Masjidbox slug of your masjid (required)
  //   "masjid": "",
  //
  //   // Path to .env file containing MASJIDBOX_API_KEY
  //   "apiKeys": "",
  //
  //   // Headers sent with every request
  //   "referer": "https://masjidbox.com/",
  //   "userAgent": "salah/<version>",
  //
  //   // Request timeout in seconds
  //   "timeout": 30
  // },

  // ============================================================================
  // Screen
  // ============================================================================
  // Leave unset to use the primary display's resolution
  // "screen": {
  //   "width": 2560,
  //   "height": 1664
  // },

  // ============================================================================
  // Images
  // ============================================================================
  // Each entry is an image file or a directory of images (rotated daily).
  // Relative entries are resolved against "directory".
  // "images": {
  //   "directory": "images",
  //   "fajr": "fajr.jpg",
  //   "duha": "duha.jpg",
  //   "dhuhr": "dhuhr.jpg",
  //   "asr": "asr.jpg",
  //   "maghrib": "maghrib.jpg",
  //   "isha": "isha.jpg"
  // },

  // ============================================================================
  // Labels
  // ============================================================================
  // Override the text drawn for a period (defaults to e.g. "midday period")
  // "labels": {
  //   "dhuhr": "Dhuhr"
  // },

  // ============================================================================
  // Text Overlay
  // ============================================================================
  // "overlay": {
  //   // Fonts tried in order; a built-in bitmap font is used when none load
  //   "fonts": [
  //     "/System/Library/Fonts/SanFrancisco.ttf",
  //     "/Library/Fonts/Arial.ttf",
  //     "/System/Library/Fonts/HelveticaNeue.ttc"
  //   ],
  //
  //   // Prayer name and time range sizes in pixels
  //   "mainSize": 120,
  //   "subSize": 40,
  //
  //   // Outline widths in pixels
  //   "mainStroke": 5,
  //   "subStroke": 3,
  //
  //   // Gap between the two lines in pixels
  //   "gap": 10,
  //
  //   // Text position as a fraction of the screen size
  //   "marginX": 0.05,
  //   "marginY": 0.1,
  //
  //   // Colours
  //   "fill": "#FFFFFF",
  //   "stroke": "#000000",
  //
  //   // Time range format (strftime)
  //   "timeFormat": "%H:%M"
  // },

  // ============================================================================
  // Publishing
  // ============================================================================
  // "publisher": {
  //   // "auto", "osascript", "native" or "command"
  //   "backend": "auto",
  //
  //   // Used by the "command" backend; {path} is replaced with the image path
  //   "command": ["swww", "img", "{path}"],
  //
  //   // JPEG quality (1-100)
  //   "quality": 90,
  //
  //   // Where generated wallpapers are written (defaults to the cache directory)
  //   "directory": ""
  // }
}
"##
    .to_string()
}

/// Creates a configuration file with the template at the specified path.
///
/// Creates parent directories if they don't exist.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn create_config_file(path: &Path) -> Result<(), std::io::Error> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    fs::write(path, generate_config_template())
}
