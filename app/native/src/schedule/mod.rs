//! Daily prayer schedule.
//!
//! A [`PrayerSchedule`] holds the six prayer instants of one day plus the
//! following day's Fajr. Consecutive instants delimit six [`Prayer`] periods;
//! the last one (Isha) wraps past midnight into the next dawn.

pub mod masjidbox;
pub mod selector;

use chrono::{DateTime, FixedOffset};
use serde::Serialize;

pub use masjidbox::{MasjidboxClient, ScheduleSource, parse_timetable};
pub use selector::{TimeWindowSelector, WallpaperSelection};

/// A prayer period, named after the prayer that opens it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Prayer {
    /// Dawn until sunrise.
    Fajr,
    /// Sunrise until midday.
    Duha,
    /// Midday until afternoon.
    Dhuhr,
    /// Afternoon until sunset.
    Asr,
    /// Sunset until night.
    Maghrib,
    /// Night until the next dawn.
    Isha,
}

impl Prayer {
    /// All periods in chronological order, starting at dawn.
    pub const ALL: [Self; 6] =
        [Self::Fajr, Self::Duha, Self::Dhuhr, Self::Asr, Self::Maghrib, Self::Isha];

    /// Position of the period within [`Self::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Fajr => 0,
            Self::Duha => 1,
            Self::Dhuhr => 2,
            Self::Asr => 3,
            Self::Maghrib => 4,
            Self::Isha => 5,
        }
    }

    /// The prayer's name, used as the default display label.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Fajr => "Fajr",
            Self::Duha => "Duha",
            Self::Dhuhr => "Dhuhr",
            Self::Asr => "Asr",
            Self::Maghrib => "Maghrib",
            Self::Isha => "Isha",
        }
    }

    /// A plain description of the part of the day the period covers.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Fajr => "dawn period",
            Self::Duha => "morning period",
            Self::Dhuhr => "midday period",
            Self::Asr => "afternoon period",
            Self::Maghrib => "sunset period",
            Self::Isha => "night period",
        }
    }
}

impl std::fmt::Display for Prayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { f.write_str(self.name()) }
}

/// A half-open `[start, end)` time window belonging to one period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PeriodWindow {
    pub prayer: Prayer,
    pub start: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
}

impl PeriodWindow {
    /// Returns whether `instant` lies within `[start, end)`.
    #[must_use]
    pub fn contains(&self, instant: DateTime<FixedOffset>) -> bool {
        self.start <= instant && instant < self.end
    }

    /// Formats the window as `"<start> - <end>"` using a strftime format.
    #[must_use]
    pub fn format_range(&self, format: &str) -> String {
        format!("{} - {}", self.start.format(format), self.end.format(format))
    }
}

/// The prayer instants of a single day.
///
/// Instants are expected to be strictly increasing, with `next_fajr` on the
/// following calendar day. The schedule is immutable once built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PrayerSchedule {
    pub fajr: DateTime<FixedOffset>,
    pub sunrise: DateTime<FixedOffset>,
    pub dhuhr: DateTime<FixedOffset>,
    pub asr: DateTime<FixedOffset>,
    pub maghrib: DateTime<FixedOffset>,
    pub isha: DateTime<FixedOffset>,
    pub next_fajr: DateTime<FixedOffset>,
}

impl PrayerSchedule {
    /// All seven instants in chronological order.
    #[must_use]
    pub const fn instants(&self) -> [DateTime<FixedOffset>; 7] {
        [
            self.fajr,
            self.sunrise,
            self.dhuhr,
            self.asr,
            self.maghrib,
            self.isha,
            self.next_fajr,
        ]
    }

    /// Returns whether every instant is strictly later than the previous one.
    #[must_use]
    pub fn is_ordered(&self) -> bool { self.instants().windows(2).all(|pair| pair[0] < pair[1]) }

    /// The six periods of the day, Isha ending at the next day's Fajr.
    #[must_use]
    pub fn windows(&self) -> [PeriodWindow; 6] {
        let instants = self.instants();
        Prayer::ALL.map(|prayer| {
            let index = prayer.index();
            PeriodWindow {
                prayer,
                start: instants[index],
                end: instants[index + 1],
            }
        })
    }
}
