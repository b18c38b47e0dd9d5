//! Masjidbox timetable client.
//!
//! The landing API returns a `timetable` array with one object per day. The
//! first day supplies the six prayer instants and the second day supplies the
//! next Fajr, so two days are always requested.

use std::time::Duration;

use chrono::{DateTime, FixedOffset};
use reqwest::StatusCode;
use reqwest::blocking::Client;
use reqwest::header::REFERER;
use serde::Deserialize;

use super::PrayerSchedule;
use crate::config::ScheduleConfig;
use crate::error::SalahError;

/// Header carrying the Masjidbox API key.
const API_KEY_HEADER: &str = "ApiKey";

/// Number of timetable days requested.
const DAYS: usize = 2;

/// A source of daily prayer schedules.
pub trait ScheduleSource {
    /// Fetches the schedule for the calendar day of `now`, in `now`'s offset.
    ///
    /// # Errors
    ///
    /// Returns `SalahError::ScheduleFetch` on network, status or format failures.
    fn fetch(&self, now: DateTime<FixedOffset>) -> Result<PrayerSchedule, SalahError>;
}

#[derive(Debug, Deserialize)]
struct TimetableResponse {
    timetable: Vec<TimetableDay>,
}

#[derive(Debug, Deserialize)]
struct TimetableDay {
    fajr: DateTime<FixedOffset>,
    sunrise: DateTime<FixedOffset>,
    dhuhr: DateTime<FixedOffset>,
    asr: DateTime<FixedOffset>,
    maghrib: DateTime<FixedOffset>,
    isha: DateTime<FixedOffset>,
}

/// Parses a timetable response body into a schedule.
///
/// # Errors
///
/// Returns `SalahError::ScheduleFetch` if the body is not valid JSON, a
/// required field is missing, or fewer than two days are present.
pub fn parse_timetable(body: &str) -> Result<PrayerSchedule, SalahError> {
    let response: TimetableResponse = serde_json::from_str(body)
        .map_err(|err| SalahError::ScheduleFetch(format!("malformed timetable: {err}")))?;

    let [today, tomorrow, ..] = response.timetable.as_slice() else {
        return Err(SalahError::ScheduleFetch(format!(
            "timetable has {} day(s), expected {DAYS}",
            response.timetable.len()
        )));
    };

    let schedule = PrayerSchedule {
        fajr: today.fajr,
        sunrise: today.sunrise,
        dhuhr: today.dhuhr,
        asr: today.asr,
        maghrib: today.maghrib,
        isha: today.isha,
        next_fajr: tomorrow.fajr,
    };

    if !schedule.is_ordered() {
        tracing::warn!(?schedule, "timetable instants are not strictly increasing");
    }

    Ok(schedule)
}

/// Blocking client for the Masjidbox landing API.
#[derive(Debug, Clone)]
pub struct MasjidboxClient {
    http: Client,
    url: String,
    api_key: Option<String>,
    referer: String,
}

impl MasjidboxClient {
    /// Creates a client from the schedule configuration.
    ///
    /// # Errors
    ///
    /// Returns `SalahError::Config` if no masjid is configured and
    /// `SalahError::ScheduleFetch` if the HTTP client cannot be built.
    pub fn new(config: &ScheduleConfig, api_key: Option<String>) -> Result<Self, SalahError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout.max(1)))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|err| SalahError::ScheduleFetch(err.to_string()))?;

        Self::with_http_client(config, api_key, http)
    }

    /// Creates a client that sends requests through `http`.
    ///
    /// # Errors
    ///
    /// Returns `SalahError::Config` if no masjid is configured.
    pub fn with_http_client(
        config: &ScheduleConfig,
        api_key: Option<String>,
        http: Client,
    ) -> Result<Self, SalahError> {
        let masjid = config.masjid.trim();
        if masjid.is_empty() {
            return Err(SalahError::Config(
                "schedule.masjid is not set; add your Masjidbox slug to the configuration"
                    .to_string(),
            ));
        }

        Ok(Self {
            http,
            url: format!("{}/{masjid}", config.endpoint.trim_end_matches('/')),
            api_key: api_key.filter(|key| !key.is_empty()),
            referer: config.referer.clone(),
        })
    }

    /// The timetable URL, without query parameters.
    #[must_use]
    pub fn url(&self) -> &str { &self.url }

    /// The `begin` query value: local midnight of `now`'s day with its offset.
    #[must_use]
    pub fn begin_param(now: DateTime<FixedOffset>) -> String {
        format!("{}T00:00:00.000{}", now.format("%Y-%m-%d"), now.offset())
    }
}

impl ScheduleSource for MasjidboxClient {
    fn fetch(&self, now: DateTime<FixedOffset>) -> Result<PrayerSchedule, SalahError> {
        let begin = Self::begin_param(now);
        let days = DAYS.to_string();
        tracing::debug!(url = %self.url, %begin, "fetching timetable");

        let mut request = self
            .http
            .get(&self.url)
            .query(&[("get", "at"), ("days", days.as_str()), ("begin", begin.as_str())])
            .header(REFERER, &self.referer);

        if let Some(key) = &self.api_key {
            request = request.header(API_KEY_HEADER, key);
        }

        let response = request.send().map_err(|err| SalahError::ScheduleFetch(err.to_string()))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(SalahError::ScheduleFetch(format!("HTTP {status}")));
        }

        let body = response.text().map_err(|err| SalahError::ScheduleFetch(err.to_string()))?;
        parse_timetable(&body)
    }
}
