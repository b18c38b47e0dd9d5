//! The wallpaper pipeline.
//!
//! fetch schedule -> select period -> load image -> adapt to screen ->
//! stamp label and time range. Publishing is left to the caller so the
//! composite can also be written to a file.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Datelike, FixedOffset};
use image::RgbImage;

use crate::config::LoadedConfig;
use crate::config::env::load_api_keys;
use crate::error::SalahError;
use crate::platform::ScreenSize;
use crate::schedule::{
    MasjidboxClient, PrayerSchedule, ScheduleSource, TimeWindowSelector, WallpaperSelection,
};
use crate::wallpaper::{
    OverlayLayout, TextOverlayRenderer, adapt, load_image, resolve_image_source,
};

/// A finished wallpaper and how it was chosen.
#[derive(Debug, Clone)]
pub struct Composite {
    pub selection: WallpaperSelection,
    /// The image file that was actually loaded.
    pub source: PathBuf,
    pub sublabel: String,
    pub layout: OverlayLayout,
    pub image: RgbImage,
}

/// Loads `source`, fits it to `screen` and draws both labels at the overlay anchor.
///
/// # Errors
///
/// Returns `SalahError::ImageNotFound` or `SalahError::ImageDecode` if the
/// image cannot be loaded.
pub fn compose_image(
    renderer: &TextOverlayRenderer,
    screen: ScreenSize,
    source: &Path,
    label: &str,
    sublabel: &str,
) -> Result<(RgbImage, OverlayLayout), SalahError> {
    let decoded = load_image(source)?;
    let mut image = adapt(&decoded, screen);
    tracing::debug!(width = screen.width, height = screen.height, "adapted image");

    let layout = renderer.render_anchored(&mut image, label, sublabel);
    Ok((image, layout))
}

/// Everything needed to turn an instant into a wallpaper.
#[derive(Debug)]
pub struct Pipeline<S> {
    source: S,
    selector: TimeWindowSelector,
    renderer: TextOverlayRenderer,
    screen: ScreenSize,
    time_format: String,
}

impl Pipeline<MasjidboxClient> {
    /// Builds the pipeline backed by the Masjidbox timetable.
    ///
    /// # Errors
    ///
    /// Returns `SalahError::Config` for an incomplete configuration.
    pub fn from_config(loaded: &LoadedConfig) -> Result<Self, SalahError> {
        let config = &loaded.config;
        let base_dir = loaded.base_dir();

        let api_keys = load_api_keys(&config.schedule.api_keys, &base_dir);
        let client = MasjidboxClient::new(&config.schedule, api_keys.masjidbox_api_key)?;

        Ok(Self::new(
            client,
            TimeWindowSelector::from_config(loaded),
            TextOverlayRenderer::from_config(&config.overlay, &base_dir)?,
            ScreenSize::resolve(&config.screen),
            config.overlay.time_format.clone(),
        ))
    }
}

impl<S: ScheduleSource> Pipeline<S> {
    #[must_use]
    pub const fn new(
        source: S,
        selector: TimeWindowSelector,
        renderer: TextOverlayRenderer,
        screen: ScreenSize,
        time_format: String,
    ) -> Self {
        Self { source, selector, renderer, screen, time_format }
    }

    #[must_use]
    pub const fn screen(&self) -> ScreenSize { self.screen }

    /// Fetches the schedule for the day of `now`.
    ///
    /// # Errors
    ///
    /// Returns `SalahError::ScheduleFetch` if the source fails.
    pub fn schedule(&self, now: DateTime<FixedOffset>) -> Result<PrayerSchedule, SalahError> {
        let schedule = self.source.fetch(now)?;
        tracing::info!(fajr = %schedule.fajr, isha = %schedule.isha, "fetched prayer schedule");
        Ok(schedule)
    }

    /// Selects the period for `now` without touching any image.
    ///
    /// # Errors
    ///
    /// Returns `SalahError::ScheduleFetch` or `SalahError::ScheduleExhausted`.
    pub fn select(&self, now: DateTime<FixedOffset>) -> Result<WallpaperSelection, SalahError> {
        let schedule = self.schedule(now)?;
        self.selector.select(&schedule, now)
    }

    /// Builds the wallpaper for `now`.
    ///
    /// The schedule is fetched first; no image is read if that fails.
    ///
    /// # Errors
    ///
    /// Returns the first error of any stage.
    pub fn compose(&self, now: DateTime<FixedOffset>) -> Result<Composite, SalahError> {
        let selection = self.select(now)?;
        tracing::info!(
            prayer = %selection.prayer,
            period = selection.prayer.description(),
            "selected period"
        );

        let source = resolve_image_source(&selection.image, now.ordinal0())?;
        let sublabel = selection.sublabel(&self.time_format);
        let (image, layout) =
            compose_image(&self.renderer, self.screen, &source, &selection.label, &sublabel)?;

        Ok(Composite { selection, source, sublabel, layout, image })
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use image::{DynamicImage, Rgb};
    use tempfile::TempDir;

    use super::*;
    use crate::schedule::Prayer;
    use crate::schedule::fixtures::{at, schedule};
    use crate::schedule::masjidbox::test_server::serve_once;
    use crate::wallpaper::OverlayStyle;
    use crate::wallpaper::fonts::Face;

    struct FixedSource(PrayerSchedule);

    impl ScheduleSource for FixedSource {
        fn fetch(&self, _now: DateTime<FixedOffset>) -> Result<PrayerSchedule, SalahError> { Ok(self.0) }
    }

    struct FailingSource {
        calls: Cell<u32>,
    }

    impl ScheduleSource for FailingSource {
        fn fetch(&self, _now: DateTime<FixedOffset>) -> Result<PrayerSchedule, SalahError> {
            self.calls.set(self.calls.get() + 1);
            Err(SalahError::ScheduleFetch("HTTP 500 Internal Server Error".to_string()))
        }
    }

    fn selector(directory: &Path) -> TimeWindowSelector {
        TimeWindowSelector::new(Prayer::ALL.map(|prayer| {
            (
                directory.join(format!("{}.png", prayer.name().to_lowercase())),
                prayer.description().to_string(),
            )
        }))
    }

    fn pipeline<S: ScheduleSource>(source: S, directory: &Path) -> Pipeline<S> {
        Pipeline::new(
            source,
            selector(directory),
            TextOverlayRenderer::new(Face::Bitmap, OverlayStyle::default()),
            ScreenSize { width: 2560, height: 1664 },
            "%H:%M".to_string(),
        )
    }

    #[test]
    fn test_compose_midday_end_to_end() {
        let temp_dir = TempDir::new().unwrap();
        DynamicImage::ImageRgb8(RgbImage::from_pixel(400, 300, Rgb([30, 90, 150])))
            .save(temp_dir.path().join("dhuhr.png"))
            .unwrap();

        let pipeline = pipeline(FixedSource(schedule()), temp_dir.path());
        let composite = pipeline.compose(at(13, 0, 0)).unwrap();

        assert_eq!(composite.selection.prayer, Prayer::Dhuhr);
        assert_eq!(composite.selection.label, "midday period");
        assert_eq!(composite.sublabel, "12:30 - 15:45");
        assert_eq!(composite.source, temp_dir.path().join("dhuhr.png"));
        assert_eq!(composite.image.dimensions(), (2560, 1664));

        let (x, y) = composite.layout.origin;
        assert!((x - 128.0).abs() < 1e-3);
        assert!((y - 166.4).abs() < 1e-3);

        let main = composite.layout.main.unwrap();
        let sub = composite.layout.sub.unwrap();
        assert!(sub.top - main.bottom >= 10);
        let corner = composite.image.get_pixel(0, 0);
        assert!(corner.0.iter().zip([30u8, 90, 150]).all(|(got, want)| got.abs_diff(want) <= 1));
    }

    #[test]
    fn test_compose_night_before_dawn() {
        let temp_dir = TempDir::new().unwrap();
        DynamicImage::ImageRgb8(RgbImage::from_pixel(64, 40, Rgb([5, 5, 20])))
            .save(temp_dir.path().join("isha.png"))
            .unwrap();

        let mut pipeline = pipeline(FixedSource(schedule()), temp_dir.path());
        pipeline.screen = ScreenSize { width: 320, height: 208 };

        let composite = pipeline.compose(at(2, 15, 0)).unwrap();
        assert_eq!(composite.selection.label, "night period");
        assert_eq!(composite.sublabel, "19:50 - 05:00");
        assert_eq!(composite.image.dimensions(), (320, 208));
    }

    #[test]
    fn test_fetch_failure_skips_image_processing() {
        let source = FailingSource { calls: Cell::new(0) };
        let pipeline = pipeline(source, Path::new("/nonexistent/images"));

        let err = pipeline.compose(at(13, 0, 0)).unwrap_err();

        // A missing image would be reported if loading had been attempted
        assert!(matches!(err, SalahError::ScheduleFetch(_)));
        assert_eq!(pipeline.source.calls.get(), 1);
    }

    #[test]
    fn test_http_500_surfaces_as_schedule_fetch() {
        let (endpoint, server) = serve_once("500 Internal Server Error", "");
        let config = crate::config::ScheduleConfig {
            endpoint,
            masjid: "green-lane".to_string(),
            ..Default::default()
        };
        let http = reqwest::blocking::Client::builder().no_proxy().build().unwrap();
        let client = MasjidboxClient::with_http_client(&config, None, http).unwrap();

        let err = pipeline(client, Path::new("/nonexistent/images")).compose(at(13, 0, 0)).unwrap_err();
        server.join().unwrap();

        assert!(matches!(err, SalahError::ScheduleFetch(_)));
    }

    #[test]
    fn test_missing_image_is_reported() {
        let temp_dir = TempDir::new().unwrap();
        let pipeline = pipeline(FixedSource(schedule()), temp_dir.path());

        let err = pipeline.compose(at(9, 0, 0)).unwrap_err();
        assert!(matches!(err, SalahError::ImageNotFound(_)));
        assert!(err.to_string().contains("duha.png"));
    }

    #[test]
    fn test_from_config_requires_masjid() {
        let err = Pipeline::from_config(&LoadedConfig::default()).unwrap_err();
        assert!(matches!(err, SalahError::Config(_)));
    }
}
