//! Maps an instant to the prayer period it falls in.

use std::path::PathBuf;

use chrono::{DateTime, Duration, FixedOffset};
use serde::Serialize;

use super::{PeriodWindow, Prayer, PrayerSchedule};
use crate::config::LoadedConfig;
use crate::error::SalahError;

/// The wallpaper chosen for a point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WallpaperSelection {
    /// Period the instant falls in.
    pub prayer: Prayer,
    /// Configured image entry for the period (a file or a directory).
    pub image: PathBuf,
    /// Text drawn as the main label.
    pub label: String,
    /// Bounds of the period. For the pre-dawn part of Isha this starts on the
    /// previous evening.
    pub window: PeriodWindow,
}

impl WallpaperSelection {
    /// Secondary label showing the period's bounds.
    #[must_use]
    pub fn sublabel(&self, time_format: &str) -> String { self.window.format_range(time_format) }
}

/// Picks the image and label for the period containing a given instant.
///
/// Each period has one fixed image entry and one label, indexed by
/// [`Prayer::index`].
#[derive(Debug, Clone)]
pub struct TimeWindowSelector {
    entries: [(PathBuf, String); 6],
}

impl TimeWindowSelector {
    /// Creates a selector from explicit image paths and labels per period.
    #[must_use]
    pub const fn new(entries: [(PathBuf, String); 6]) -> Self { Self { entries } }

    /// Builds the selector from the configured images and labels.
    ///
    /// Relative image entries are resolved against the images directory,
    /// which is itself resolved against the configuration directory.
    #[must_use]
    pub fn from_config(loaded: &LoadedConfig) -> Self {
        let images = &loaded.config.images;
        let labels = &loaded.config.labels;
        let directory = loaded.resolve(&images.directory);

        Self::new(Prayer::ALL.map(|prayer| {
            let image =
                crate::platform::path::expand_and_resolve(images.entry(prayer), &directory);
            (image, labels.label(prayer).to_string())
        }))
    }

    /// Returns the selection for the period containing `now`.
    ///
    /// # Errors
    ///
    /// Returns `SalahError::ScheduleExhausted` if no period contains `now`.
    /// With an ordered schedule every instant is covered, since anything
    /// outside `[fajr, isha)` belongs to Isha.
    pub fn select(
        &self,
        schedule: &PrayerSchedule,
        now: DateTime<FixedOffset>,
    ) -> Result<WallpaperSelection, SalahError> {
        let window = window_at(schedule, now)
            .ok_or_else(|| SalahError::ScheduleExhausted(now.to_rfc3339()))?;

        let (image, label) = self.entries[window.prayer.index()].clone();
        tracing::debug!(prayer = %window.prayer, image = %image.display(), "selected period");

        Ok(WallpaperSelection { prayer: window.prayer, image, label, window })
    }
}

/// Finds the period window containing `now`.
///
/// Daytime periods are matched on their half-open windows. Anything at or
/// after Isha, or before Fajr, is Isha: late evening runs until the next
/// day's Fajr, early morning runs from the previous evening's Isha.
#[must_use]
pub fn window_at(schedule: &PrayerSchedule, now: DateTime<FixedOffset>) -> Option<PeriodWindow> {
    if now >= schedule.isha || now < schedule.fajr {
        let (start, end) = if now < schedule.fajr {
            (schedule.isha - Duration::days(1), schedule.fajr)
        } else {
            (schedule.isha, schedule.next_fajr)
        };
        return Some(PeriodWindow { prayer: Prayer::Isha, start, end });
    }

    schedule.windows()[..5].iter().copied().find(|window| window.contains(now))
}
