//! Path utilities for shell-like path expansion.
//!
//! Configured paths may start with `~` and may be relative to the
//! configuration file's directory.

use std::path::{Path, PathBuf};

/// Expands a leading `~` to the user's home directory.
///
/// Absolute and relative paths are returned unchanged; blank input yields an
/// empty path.
#[must_use]
pub fn expand(path: &str) -> PathBuf {
    let path = path.trim();

    if path.is_empty() {
        return PathBuf::new();
    }

    PathBuf::from(shellexpand::tilde(path).as_ref())
}

/// Expands `~` and resolves relative paths against `base_dir`.
///
/// ```ignore
/// use std::path::Path;
/// use salah_lib::platform::path::expand_and_resolve;
///
/// let base = Path::new("/Users/me/.config/salah");
/// assert_eq!(expand_and_resolve("images", base), base.join("images"));
/// ```
#[must_use]
pub fn expand_and_resolve(path: &str, base_dir: &Path) -> PathBuf {
    let expanded = expand(path);

    if expanded.as_os_str().is_empty() || expanded.is_absolute() {
        return expanded;
    }

    base_dir.join(expanded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_blank_is_empty() {
        assert_eq!(expand(""), PathBuf::new());
        assert_eq!(expand("   "), PathBuf::new());
    }

    #[test]
    fn test_expand_keeps_absolute_and_relative() {
        assert_eq!(expand("/Library/Fonts/Arial.ttf"), PathBuf::from("/Library/Fonts/Arial.ttf"));
        assert_eq!(expand("images/fajr.jpg"), PathBuf::from("images/fajr.jpg"));
    }

    #[test]
    fn test_expand_tilde() {
        let result = expand("~/Pictures/salah");
        assert!(!result.to_string_lossy().starts_with('~'));
        assert!(result.to_string_lossy().ends_with("Pictures/salah"));
    }

    #[test]
    fn test_expand_and_resolve_relative() {
        let base = PathBuf::from("/config/salah");
        assert_eq!(expand_and_resolve("images", &base), PathBuf::from("/config/salah/images"));
        assert_eq!(expand_and_resolve("  .env  ", &base), PathBuf::from("/config/salah/.env"));
    }

    #[test]
    fn test_expand_and_resolve_absolute_and_tilde() {
        let base = PathBuf::from("/config/salah");
        assert_eq!(expand_and_resolve("/srv/images", &base), PathBuf::from("/srv/images"));

        let home = expand_and_resolve("~/images", &base);
        assert!(!home.to_string_lossy().contains("/config/salah"));
    }

    #[test]
    fn test_expand_and_resolve_empty() {
        assert_eq!(expand_and_resolve("", Path::new("/base")), PathBuf::new());
    }
}
