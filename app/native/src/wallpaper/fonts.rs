//! Font loading and text rasterisation.
//!
//! Fonts are tried from an ordered list of candidate files and the first one
//! that parses wins. When none load, the built-in 8x8 bitmap font is scaled to
//! the requested size, so a missing font never aborts a run.

use std::fs;
use std::path::{Path, PathBuf};

use font8x8::{BASIC_FONTS, UnicodeFonts};
use rusttype::{Font, Scale, point};

/// Width and height of a bitmap glyph cell in font units.
const BITMAP_CELL: i32 = 8;

/// A typeface that can rasterise a single line of text.
pub enum Face {
    /// A TrueType/OpenType outline font.
    Outline(Box<Font<'static>>),
    /// The built-in bitmap font.
    Bitmap,
}

impl std::fmt::Debug for Face {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Outline(_) => f.write_str("Face::Outline"),
            Self::Bitmap => f.write_str("Face::Bitmap"),
        }
    }
}

/// Anti-aliased ink coverage of a rendered line.
///
/// `left` and `top` give the offset of the ink box from the line's origin
/// (the top-left corner of the line). `data` is row-major with values in `0..=1`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Coverage {
    pub left: i32,
    pub top: i32,
    pub width: u32,
    pub height: u32,
    pub data: Vec<f32>,
}

impl Coverage {
    /// Creates a blank mask.
    #[must_use]
    pub fn new(left: i32, top: i32, width: u32, height: u32) -> Self {
        Self {
            left,
            top,
            width,
            height,
            data: vec![0.0; width as usize * height as usize],
        }
    }

    /// Returns whether the mask has no area.
    #[must_use]
    pub const fn is_empty(&self) -> bool { self.width == 0 || self.height == 0 }

    /// Coverage at mask coordinates, zero outside the mask.
    #[must_use]
    #[allow(clippy::cast_sign_loss)]
    pub fn get(&self, x: i32, y: i32) -> f32 {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return 0.0;
        }
        self.data[y as usize * self.width as usize + x as usize]
    }

    #[allow(clippy::cast_sign_loss)]
    fn raise(&mut self, x: i32, y: i32, value: f32) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        let cell = &mut self.data[y as usize * self.width as usize + x as usize];
        *cell = cell.max(value);
    }
}

impl Face {
    /// Loads the first candidate that parses as a font.
    ///
    /// Falls back to [`Face::Bitmap`] when every candidate fails.
    #[must_use]
    pub fn load(candidates: &[PathBuf]) -> Self {
        for path in candidates {
            if let Some(face) = Self::from_file(path) {
                tracing::debug!(font = %path.display(), "loaded font");
                return face;
            }
        }

        tracing::info!("no configured font could be loaded, using built-in bitmap font");
        Self::Bitmap
    }

    /// Parses a font file, returning `None` if it is missing or invalid.
    #[must_use]
    pub fn from_file(path: &Path) -> Option<Self> {
        let data = fs::read(path)
            .inspect_err(|err| tracing::debug!(font = %path.display(), error = %err, "font unavailable"))
            .ok()?;

        Self::from_bytes(data).or_else(|| {
            tracing::debug!(font = %path.display(), "font could not be parsed");
            None
        })
    }

    /// Parses in-memory font data (the first face of a collection).
    #[must_use]
    pub fn from_bytes(data: Vec<u8>) -> Option<Self> {
        Font::try_from_vec(data).map(|font| Self::Outline(Box::new(font)))
    }

    /// Returns whether this is the built-in bitmap font.
    #[must_use]
    pub const fn is_bitmap(&self) -> bool { matches!(self, Self::Bitmap) }

    /// Rasterises one line of text at `size` pixels.
    ///
    /// The returned mask covers the ink of the line, positioned relative to
    /// the line's top-left origin. Empty text yields an empty mask.
    #[must_use]
    pub fn rasterize(&self, text: &str, size: f32) -> Coverage {
        if text.is_empty() {
            return Coverage::default();
        }

        match self {
            Self::Outline(font) => rasterize_outline(font, text, size),
            Self::Bitmap => rasterize_bitmap(text, size),
        }
    }
}

#[allow(clippy::cast_sign_loss, clippy::cast_possible_wrap)]
fn rasterize_outline(font: &Font<'static>, text: &str, size: f32) -> Coverage {
    let scale = Scale::uniform(size);
    let ascent = font.v_metrics(scale).ascent;
    let glyphs: Vec<_> = font.layout(text, scale, point(0.0, ascent)).collect();

    let Some((min_x, min_y, max_x, max_y)) = glyphs
        .iter()
        .filter_map(rusttype::PositionedGlyph::pixel_bounding_box)
        .map(|bb| (bb.min.x, bb.min.y, bb.max.x, bb.max.y))
        .reduce(|a, b| (a.0.min(b.0), a.1.min(b.1), a.2.max(b.2), a.3.max(b.3)))
    else {
        return Coverage::default();
    };

    let mut coverage =
        Coverage::new(min_x, min_y, (max_x - min_x) as u32, (max_y - min_y) as u32);

    for glyph in &glyphs {
        if let Some(bb) = glyph.pixel_bounding_box() {
            glyph.draw(|gx, gy, value| {
                coverage.raise(
                    bb.min.x - min_x + gx as i32,
                    bb.min.y - min_y + gy as i32,
                    value,
                );
            });
        }
    }

    coverage
}

/// Integer magnification of the 8x8 bitmap font for a pixel size.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn bitmap_factor(size: f32) -> u32 { ((size / 8.0).round() as u32).max(1) }

#[allow(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
fn rasterize_bitmap(text: &str, size: f32) -> Coverage {
    let factor = bitmap_factor(size) as i32;
    let cell = BITMAP_CELL * factor;
    let chars: Vec<char> = text.chars().collect();

    let mut coverage = Coverage::new(0, 0, (cell * chars.len() as i32) as u32, cell as u32);

    for (index, ch) in chars.iter().enumerate() {
        let Some(glyph) = BASIC_FONTS.get(*ch).or_else(|| BASIC_FONTS.get('?')) else {
            continue;
        };

        let cell_x = index as i32 * cell;
        for (row, bits) in glyph.iter().enumerate() {
            for column in 0..BITMAP_CELL {
                if (bits >> column) & 1 == 0 {
                    continue;
                }
                let x = cell_x + column * factor;
                let y = row as i32 * factor;
                for dy in 0..factor {
                    for dx in 0..factor {
                        coverage.raise(x + dx, y + dy, 1.0);
                    }
                }
            }
        }
    }

    coverage
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_load_without_candidates_uses_bitmap() {
        assert!(Face::load(&[]).is_bitmap());
    }

    #[test]
    fn test_load_skips_missing_and_invalid_files() {
        let temp_dir = TempDir::new().unwrap();
        let invalid = temp_dir.path().join("broken.ttf");
        fs::write(&invalid, b"definitely not a font").unwrap();

        let face = Face::load(&[PathBuf::from("/nonexistent/font.ttf"), invalid]);
        assert!(face.is_bitmap());
    }

    #[test]
    fn test_bitmap_factor() {
        assert_eq!(bitmap_factor(120.0), 15);
        assert_eq!(bitmap_factor(40.0), 5);
        assert_eq!(bitmap_factor(2.0), 1);
    }

    #[test]
    fn test_rasterize_empty_text() {
        assert!(Face::Bitmap.rasterize("", 40.0).is_empty());
    }

    #[test]
    fn test_rasterize_bitmap_cell_box() {
        let coverage = Face::Bitmap.rasterize("Asr", 40.0);

        assert_eq!((coverage.left, coverage.top), (0, 0));
        assert_eq!(coverage.width, 3 * 8 * 5);
        assert_eq!(coverage.height, 8 * 5);
        assert!(coverage.data.iter().any(|value| *value > 0.0));
    }

    #[test]
    fn test_rasterize_bitmap_blank_glyph_has_no_ink() {
        let coverage = Face::Bitmap.rasterize(" ", 16.0);
        assert_eq!(coverage.width, 16);
        assert!(coverage.data.iter().all(|value| *value == 0.0));
    }

    #[test]
    fn test_coverage_get_outside_is_zero() {
        let mut coverage = Coverage::new(0, 0, 2, 2);
        coverage.raise(1, 1, 0.5);
        coverage.raise(1, 1, 0.25);

        assert!((coverage.get(1, 1) - 0.5).abs() < f32::EPSILON);
        assert!(coverage.get(-1, 0).abs() < f32::EPSILON);
        assert!(coverage.get(2, 0).abs() < f32::EPSILON);
    }
}
