//! Cache directory utilities.
//!
//! Published wallpapers are written to `<cache dir>/salah/wallpapers/` by
//! default (`~/Library/Caches/salah` on macOS, `~/.cache/salah` on Linux),
//! falling back to the system temporary directory when no cache directory is
//! known. Files there are kept after publishing; `salah cache clear` removes them
//! and nothing else.

use std::path::{Path, PathBuf};

use crate::constants::APP_NAME;

/// Subdirectory receiving published wallpapers.
pub const WALLPAPERS_SUBDIR: &str = "wallpapers";

/// Returns the root cache directory for the application.
#[must_use]
pub fn get_cache_dir() -> PathBuf {
    dirs::cache_dir().map_or_else(|| std::env::temp_dir().join(APP_NAME), |cache| cache.join(APP_NAME))
}

/// Returns a cache subdirectory for the given component.
#[must_use]
pub fn get_cache_subdir(subdir: &str) -> PathBuf { get_cache_dir().join(subdir) }

/// Returns the default directory for published wallpapers.
#[must_use]
pub fn wallpapers_dir() -> PathBuf { get_cache_subdir(WALLPAPERS_SUBDIR) }

/// File name prefix of published wallpapers.
pub const PUBLISHED_PREFIX: &str = "salah-";

/// File name suffix of published wallpapers.
pub const PUBLISHED_SUFFIX: &str = ".jpg";

/// Returns whether `path` names a wallpaper written by the publisher.
#[must_use]
pub fn is_published_wallpaper(path: &Path) -> bool {
    path.file_name().and_then(|name| name.to_str()).is_some_and(|name| {
        name.len() > PUBLISHED_PREFIX.len() + PUBLISHED_SUFFIX.len()
            && name.starts_with(PUBLISHED_PREFIX)
            && name.ends_with(PUBLISHED_SUFFIX)
    })
}

/// Removes the published wallpapers in `dir`.
///
/// Only regular files named `salah-*.jpg` are removed. Other files,
/// subdirectories and `dir` itself are left alone: the directory may also hold
/// the user's own images.
///
/// # Returns
///
/// The number of bytes freed; `0` if the directory does not exist.
///
/// # Errors
///
/// Returns an error if the directory cannot be read or a file cannot be removed.
pub fn clear_dir(dir: &Path) -> std::io::Result<u64> {
    if !dir.is_dir() {
        return Ok(0);
    }

    let mut bytes_freed = 0u64;
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if !entry.file_type()?.is_file() || !is_published_wallpaper(&path) {
            continue;
        }

        bytes_freed += entry.metadata().map_or(0, |metadata| metadata.len());
        std::fs::remove_file(&path)?;
    }

    Ok(bytes_freed)
}

/// Formats a byte count as a human-readable string, e.g. "1.50 MB".
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    match bytes {
        b if b >= GB => format!("{:.2} GB", b as f64 / GB as f64),
        b if b >= MB => format!("{:.2} MB", b as f64 / MB as f64),
        b if b >= KB => format!("{:.2} KB", b as f64 / KB as f64),
        b => format!("{b} bytes"),
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_get_cache_dir_contains_app_name() {
        let path = get_cache_dir();
        assert!(path.ends_with(APP_NAME), "unexpected cache dir: {}", path.display());
    }

    #[test]
    fn test_wallpapers_dir_is_under_cache_dir() {
        let path = wallpapers_dir();
        assert!(path.starts_with(get_cache_dir()));
        assert!(path.ends_with(WALLPAPERS_SUBDIR));
    }

    #[test]
    fn test_clear_dir_reports_freed_bytes() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("wallpapers");
        fs::create_dir_all(&target).unwrap();
        fs::write(target.join("salah-a1b2.jpg"), [0u8; 100]).unwrap();
        fs::write(target.join("salah-c3d4.jpg"), [0u8; 24]).unwrap();

        assert_eq!(clear_dir(&target).unwrap(), 124);
        assert!(target.is_dir());
        assert_eq!(fs::read_dir(&target).unwrap().count(), 0);
    }

    #[test]
    fn test_clear_dir_keeps_foreign_files() {
        let temp_dir = TempDir::new().unwrap();
        let pictures = temp_dir.path().join("Pictures");
        fs::create_dir_all(pictures.join("salah-album.jpg")).unwrap();
        fs::write(pictures.join("fajr.jpg"), [1u8; 20]).unwrap();
        fs::write(pictures.join("salah-notes.txt"), [2u8; 5]).unwrap();
        fs::write(pictures.join("salah-x9.jpg"), [3u8; 8]).unwrap();

        assert_eq!(clear_dir(&pictures).unwrap(), 8);

        assert!(pictures.join("fajr.jpg").is_file());
        assert!(pictures.join("salah-notes.txt").is_file());
        assert!(pictures.join("salah-album.jpg").is_dir());
        assert!(!pictures.join("salah-x9.jpg").exists());
    }

    #[test]
    fn test_is_published_wallpaper() {
        assert!(PUBLISHED_PREFIX.starts_with(APP_NAME));
        assert!(is_published_wallpaper(Path::new("/tmp/salah-Xy12ab.jpg")));
        assert!(!is_published_wallpaper(Path::new("/tmp/salah-.jpg")));
        assert!(!is_published_wallpaper(Path::new("/tmp/fajr.jpg")));
        assert!(!is_published_wallpaper(Path::new("/tmp/salah-1.png")));
    }

    #[test]
    fn test_clear_dir_missing_is_zero() {
        assert_eq!(clear_dir(Path::new("/nonexistent/salah/cache")).unwrap(), 0);
    }

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(0), "0 bytes");
        assert_eq!(format_bytes(1023), "1023 bytes");
        assert_eq!(format_bytes(1536), "1.50 KB");
        assert_eq!(format_bytes(1024 * 1024 + 512 * 1024), "1.50 MB");
        assert_eq!(format_bytes(1024 * 1024 * 1024), "1.00 GB");
    }
}
