//! Text overlay rendering.
//!
//! Draws a main label and a smaller sub-label onto the wallpaper. Each line is
//! outlined: the ink is dilated by the stroke width and painted in the stroke
//! colour, then the fill is composited on top. The sub-label is placed below
//! the rendered bounds of the main label, never below its nominal size.

use std::path::Path;

use image::{Rgb, RgbImage};

use super::fonts::{Coverage, Face};
use crate::config::{OverlayConfig, parse_hex_color};
use crate::error::SalahError;
use crate::platform::path::expand_and_resolve;

/// Size and outline of one line of text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineStyle {
    /// Pixel size.
    pub size: f32,
    /// Outline width in pixels.
    pub stroke_width: u32,
}

/// Styling shared by both lines of the overlay.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayStyle {
    pub main: LineStyle,
    pub sub: LineStyle,
    /// Minimum vertical distance between the main label's bottom and the sub-label's top.
    pub gap: f32,
    /// Anchor position as a fraction of the canvas width.
    pub margin_x: f32,
    /// Anchor position as a fraction of the canvas height.
    pub margin_y: f32,
    pub fill: Rgb<u8>,
    pub stroke: Rgb<u8>,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            main: LineStyle { size: 120.0, stroke_width: 5 },
            sub: LineStyle { size: 40.0, stroke_width: 3 },
            gap: 10.0,
            margin_x: 0.05,
            margin_y: 0.1,
            fill: Rgb([255, 255, 255]),
            stroke: Rgb([0, 0, 0]),
        }
    }
}

impl OverlayStyle {
    /// Builds the style from the overlay configuration.
    ///
    /// # Errors
    ///
    /// Returns `SalahError::Config` if a colour is not `#RRGGBB`.
    pub fn from_config(config: &OverlayConfig) -> Result<Self, SalahError> {
        Ok(Self {
            main: LineStyle { size: config.main_size, stroke_width: config.main_stroke },
            sub: LineStyle { size: config.sub_size, stroke_width: config.sub_stroke },
            gap: config.gap,
            margin_x: config.margin_x,
            margin_y: config.margin_y,
            fill: Rgb(parse_hex_color(&config.fill)?),
            stroke: Rgb(parse_hex_color(&config.stroke)?),
        })
    }

    /// Text origin for a canvas of the given size.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn anchor(&self, width: u32, height: u32) -> (f32, f32) {
        (width as f32 * self.margin_x, height as f32 * self.margin_y)
    }
}

/// Pixel bounds of rendered ink; `right` and `bottom` are exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextBox {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

/// Where the overlay was drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayLayout {
    /// Requested origin of the main label.
    pub origin: (f32, f32),
    /// Bounds of the main label's ink, if it had any.
    pub main: Option<TextBox>,
    /// Bounds of the sub-label's ink, if it had any.
    pub sub: Option<TextBox>,
}

/// Stamps a label and a sub-label onto an image.
#[derive(Debug)]
pub struct TextOverlayRenderer {
    face: Face,
    style: OverlayStyle,
}

impl TextOverlayRenderer {
    #[must_use]
    pub const fn new(face: Face, style: OverlayStyle) -> Self { Self { face, style } }

    /// Loads the configured fonts and style.
    ///
    /// Font paths are resolved against `base_dir`.
    ///
    /// # Errors
    ///
    /// Returns `SalahError::Config` if a colour is invalid. Unloadable fonts
    /// are not an error.
    pub fn from_config(config: &OverlayConfig, base_dir: &Path) -> Result<Self, SalahError> {
        let style = OverlayStyle::from_config(config)?;
        let candidates: Vec<_> = config
            .fonts
            .iter()
            .map(|font| expand_and_resolve(font, base_dir))
            .filter(|path| !path.as_os_str().is_empty())
            .collect();

        Ok(Self::new(Face::load(&candidates), style))
    }

    #[must_use]
    pub const fn style(&self) -> &OverlayStyle { &self.style }

    #[must_use]
    pub const fn face(&self) -> &Face { &self.face }

    /// Renders both lines at the style's margin anchor.
    pub fn render_anchored(
        &self,
        image: &mut RgbImage,
        main_text: &str,
        sub_text: &str,
    ) -> OverlayLayout {
        let (x, y) = self.style.anchor(image.width(), image.height());
        self.render(image, main_text, sub_text, x, y)
    }

    /// Draws `main_text` at `(origin_x, origin_y)` and `sub_text` below it.
    ///
    /// The sub-label's top edge lies at least `gap` pixels below the bottom of
    /// the main label's ink. Text running off the canvas is clipped.
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    pub fn render(
        &self,
        image: &mut RgbImage,
        main_text: &str,
        sub_text: &str,
        origin_x: f32,
        origin_y: f32,
    ) -> OverlayLayout {
        let x = origin_x.round() as i32;

        let main_coverage = self.face.rasterize(main_text, self.style.main.size);
        let main = self.draw_line(image, &main_coverage, x, origin_y.round() as i32, self.style.main);

        let sub_coverage = self.face.rasterize(sub_text, self.style.sub.size);
        let sub_y = main.map_or(origin_y.round() as i32, |main_box| {
            // Glyphs reaching above the line origin are pushed down as well
            (main_box.bottom as f32 + self.style.gap).ceil() as i32 + (-sub_coverage.top).max(0)
        });
        let sub = self.draw_line(image, &sub_coverage, x, sub_y, self.style.sub);

        tracing::debug!(?main, ?sub, "rendered overlay");
        OverlayLayout { origin: (origin_x, origin_y), main, sub }
    }

    #[allow(clippy::cast_possible_wrap)]
    fn draw_line(
        &self,
        image: &mut RgbImage,
        coverage: &Coverage,
        x: i32,
        y: i32,
        line: LineStyle,
    ) -> Option<TextBox> {
        if coverage.is_empty() || coverage.data.iter().all(|value| *value <= 0.0) {
            return None;
        }

        let left = x + coverage.left;
        let top = y + coverage.top;

        let stroke = dilate(coverage, line.stroke_width);
        let radius = line.stroke_width as i32;
        composite(image, &stroke, left - radius, top - radius, self.style.stroke);
        composite(image, coverage, left, top, self.style.fill);

        Some(TextBox {
            left,
            top,
            right: left + coverage.width as i32,
            bottom: top + coverage.height as i32,
        })
    }
}

/// Grows a mask by a disc of `radius` pixels, keeping the strongest coverage
/// within reach of each pixel. The result is offset by `-radius` on both axes.
#[allow(clippy::cast_possible_wrap, clippy::cast_sign_loss)]
fn dilate(coverage: &Coverage, radius: u32) -> Coverage {
    let r = radius as i32;
    let offsets: Vec<(i32, i32)> = (-r..=r)
        .flat_map(|dy| (-r..=r).map(move |dx| (dx, dy)))
        .filter(|(dx, dy)| dx * dx + dy * dy <= r * r)
        .collect();

    let width = coverage.width + 2 * radius;
    let height = coverage.height + 2 * radius;
    let mut grown = Coverage::new(coverage.left - r, coverage.top - r, width, height);

    for y in 0..height as i32 {
        for x in 0..width as i32 {
            let value = offsets
                .iter()
                .map(|(dx, dy)| coverage.get(x - r + dx, y - r + dy))
                .fold(0.0_f32, f32::max);
            grown.data[y as usize * width as usize + x as usize] = value;
        }
    }

    grown
}

/// Blends `color` into `image` through `mask`, placed with its top-left at `(left, top)`.
#[allow(
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss,
    clippy::cast_possible_truncation
)]
fn composite(image: &mut RgbImage, mask: &Coverage, left: i32, top: i32, color: Rgb<u8>) {
    let (canvas_width, canvas_height) = (image.width() as i32, image.height() as i32);

    for my in 0..mask.height as i32 {
        let py = top + my;
        if py < 0 || py >= canvas_height {
            continue;
        }
        for mx in 0..mask.width as i32 {
            let px = left + mx;
            if px < 0 || px >= canvas_width {
                continue;
            }

            let alpha = mask.get(mx, my).clamp(0.0, 1.0);
            if alpha <= 0.0 {
                continue;
            }

            let pixel = image.get_pixel_mut(px as u32, py as u32);
            for channel in 0..3 {
                let blended = f32::from(color[channel])
                    .mul_add(alpha, f32::from(pixel[channel]) * (1.0 - alpha));
                pixel[channel] = blended.round().clamp(0.0, 255.0) as u8;
            }
        }
    }
}
