//! Image loading and processing.
//!
//! Resolves the configured image for a period, decodes it, and crops and
//! resizes it to the exact screen size. Also encodes the final composite.

use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, ImageReader, ImageResult, RgbImage};
use natord::compare;

use crate::error::SalahError;
use crate::platform::ScreenSize;

/// Supported image file extensions.
const SUPPORTED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp"];

/// Checks if a file has a supported image extension.
#[must_use]
pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
}

/// Lists all supported image files in a directory, in natural sort order.
#[must_use]
pub fn list_images_in_directory(dir: &Path) -> Vec<PathBuf> {
    let Ok(entries) = fs::read_dir(dir) else {
        return Vec::new();
    };

    let mut images: Vec<PathBuf> = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && is_supported_image(path))
        .collect();

    images.sort_by(|a, b| compare(a.to_string_lossy().as_ref(), b.to_string_lossy().as_ref()));
    images
}

/// Resolves an image entry to a concrete file.
///
/// A file is returned as-is. A directory yields one of its images, chosen by
/// `day` (typically the zero-based day of the year) modulo the image count, so
/// the choice is stable for a whole day.
///
/// # Errors
///
/// Returns `SalahError::ImageNotFound` if the path does not exist or the
/// directory holds no supported images.
pub fn resolve_image_source(entry: &Path, day: u32) -> Result<PathBuf, SalahError> {
    if entry.is_file() {
        return Ok(entry.to_path_buf());
    }

    if entry.is_dir() {
        let images = list_images_in_directory(entry);
        if images.is_empty() {
            return Err(SalahError::ImageNotFound(format!(
                "{} (directory has no supported images)",
                entry.display()
            )));
        }

        let index = day as usize % images.len();
        tracing::debug!(directory = %entry.display(), index, count = images.len(), "rotating image");
        return Ok(images[index].clone());
    }

    Err(SalahError::ImageNotFound(entry.display().to_string()))
}

/// Loads and decodes an image.
///
/// # Errors
///
/// Returns `SalahError::ImageNotFound` if the file does not exist and
/// `SalahError::ImageDecode` if it cannot be decoded.
pub fn load_image(path: &Path) -> Result<DynamicImage, SalahError> {
    if !path.is_file() {
        return Err(SalahError::ImageNotFound(path.display().to_string()));
    }

    let decode_error = |reason: String| SalahError::ImageDecode {
        path: path.display().to_string(),
        reason,
    };

    ImageReader::open(path)
        .map_err(|err| decode_error(err.to_string()))?
        .with_guessed_format()
        .map_err(|err| decode_error(err.to_string()))?
        .decode()
        .map_err(|err| decode_error(err.to_string()))
}

/// Computes the centred crop `(x, y, width, height)` matching the target aspect ratio.
///
/// Aspect ratios are compared by cross-multiplication, so an image that
/// already has the target ratio is left whole.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn crop_box(width: u32, height: u32, target: ScreenSize) -> (u32, u32, u32, u32) {
    let (iw, ih) = (u64::from(width), u64::from(height));
    let (tw, th) = (u64::from(target.width.max(1)), u64::from(target.height.max(1)));

    if iw * th > ih * tw {
        // Wider than the target: trim left and right
        let new_width = (ih * tw / th).max(1);
        let x = (iw - new_width) / 2;
        (x as u32, 0, new_width as u32, height)
    } else {
        // Taller than (or equal to) the target: trim top and bottom
        let new_height = (iw * th / tw).max(1);
        let y = ih.saturating_sub(new_height) / 2;
        (0, y as u32, width, new_height as u32)
    }
}

/// Crops `image` to the target aspect ratio around its centre and resizes the
/// crop to exactly `target` using Lanczos resampling.
#[must_use]
pub fn adapt(image: &DynamicImage, target: ScreenSize) -> RgbImage {
    let (x, y, width, height) = crop_box(image.width(), image.height(), target);
    tracing::debug!(
        source_width = image.width(),
        source_height = image.height(),
        x,
        y,
        width,
        height,
        "cropping image"
    );

    image
        .crop_imm(x, y, width, height)
        .resize_exact(target.width, target.height, FilterType::Lanczos3)
        .to_rgb8()
}

/// Encodes `image` as a JPEG at the given quality (clamped to 1-100).
///
/// # Errors
///
/// Returns the encoder's error if encoding or writing fails.
pub fn write_jpeg<W: Write>(image: &RgbImage, writer: &mut W, quality: u8) -> ImageResult<()> {
    let encoder = JpegEncoder::new_with_quality(&mut *writer, quality.clamp(1, 100));
    image.write_with_encoder(encoder)?;
    writer.flush()?;
    Ok(())
}

/// Writes `image` as a JPEG file at `path`.
///
/// The JPEG is encoded into a temporary file next to `path` and renamed over
/// it once complete, so a failed write leaves any existing file untouched.
///
/// # Errors
///
/// Returns `SalahError::Encode` if the file cannot be created or written.
pub fn encode_jpeg(image: &RgbImage, path: &Path, quality: u8) -> Result<(), SalahError> {
    let encode_error = |reason: String| SalahError::Encode(format!("{}: {reason}", path.display()));

    let parent = path.parent().filter(|dir| !dir.as_os_str().is_empty()).unwrap_or(Path::new("."));
    let mut file = tempfile::NamedTempFile::new_in(parent).map_err(|err| encode_error(err.to_string()))?;

    write_jpeg(image, &mut BufWriter::new(file.as_file_mut()), quality)
        .map_err(|err| encode_error(err.to_string()))?;
    file.persist(path).map_err(|err| encode_error(err.error.to_string()))?;
    Ok(())
}
