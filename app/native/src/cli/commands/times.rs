//! `salah times`: the day's periods.

use clap::Args;
use colored::Colorize;
use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use super::types::AtTime;
use crate::cli::output;
use crate::config::LoadedConfig;
use crate::config::env::load_api_keys;
use crate::error::SalahError;
use crate::schedule::selector::window_at;
use crate::schedule::{MasjidboxClient, PeriodWindow, PrayerSchedule, ScheduleSource};

/// Arguments of the times command.
#[derive(Args, Debug, Default)]
pub struct TimesArgs {
    /// Show the schedule as of this time (HH:MM today, or RFC 3339).
    #[arg(long, value_name = "TIME")]
    pub at: Option<AtTime>,

    /// Print JSON instead of a table.
    #[arg(long)]
    pub json: bool,
}

#[derive(Tabled)]
struct PeriodRow {
    #[tabled(rename = "")]
    active: String,
    #[tabled(rename = "Period")]
    name: String,
    #[tabled(rename = "Label")]
    label: String,
    #[tabled(rename = "Start")]
    start: String,
    #[tabled(rename = "End")]
    end: String,
}

/// Fetches the schedule and prints it.
///
/// # Errors
///
/// Returns an error if the schedule cannot be fetched.
pub fn execute(loaded: &LoadedConfig, args: &TimesArgs) -> Result<(), SalahError> {
    let config = &loaded.config;
    let now = AtTime::or_now(args.at);

    let api_keys = load_api_keys(&config.schedule.api_keys, &loaded.base_dir());
    let client = MasjidboxClient::new(&config.schedule, api_keys.masjidbox_api_key)?;
    let schedule = client.fetch(now)?;
    let active = window_at(&schedule, now);

    if args.json {
        output::print_highlighted_json(&to_json(&schedule, active, loaded));
        return Ok(());
    }

    let format = &config.overlay.time_format;
    let rows: Vec<PeriodRow> = schedule
        .windows()
        .iter()
        .map(|window| PeriodRow {
            active: output::format_marker(active.is_some_and(|a| a.prayer == window.prayer)),
            name: window.prayer.name().to_string(),
            label: output::truncate(config.labels.label(window.prayer), 32),
            start: window.start.format(format).to_string(),
            end: window.end.format(format).to_string(),
        })
        .collect();

    let table = Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::first()).with(Alignment::center()))
        .with(Modify::new(Columns::new(3..5)).with(Alignment::right()))
        .to_string();

    println!("{}", format!("Prayer periods ({})", schedule.fajr.format("%Y-%m-%d")).bold());
    println!("{table}");
    Ok(())
}

fn to_json(
    schedule: &PrayerSchedule,
    active: Option<PeriodWindow>,
    loaded: &LoadedConfig,
) -> serde_json::Value {
    let periods: Vec<serde_json::Value> = schedule
        .windows()
        .iter()
        .map(|window| {
            serde_json::json!({
                "prayer": window.prayer,
                "label": loaded.config.labels.label(window.prayer),
                "start": window.start.to_rfc3339(),
                "end": window.end.to_rfc3339(),
            })
        })
        .collect();

    serde_json::json!({
        "active": active,
        "schedule": schedule,
        "periods": periods,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::Prayer;
    use crate::schedule::fixtures::{at, schedule};

    #[test]
    fn test_json_lists_six_periods() {
        let value = to_json(&schedule(), window_at(&schedule(), at(13, 0, 0)), &LoadedConfig::default());

        let periods = value["periods"].as_array().unwrap();
        assert_eq!(periods.len(), Prayer::ALL.len());
        assert_eq!(periods[0]["prayer"], "fajr");
        assert_eq!(periods[5]["prayer"], "isha");
        assert_eq!(value["active"]["prayer"], "dhuhr");
        assert_eq!(periods[2]["label"], "midday period");
    }

    #[test]
    fn test_json_active_is_null_without_window() {
        let value = to_json(&schedule(), None, &LoadedConfig::default());
        assert!(value["active"].is_null());
        assert!(value["schedule"]["fajr"].is_string());
    }
}
