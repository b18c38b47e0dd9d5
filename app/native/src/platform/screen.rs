//! Primary display resolution.
//!
//! On macOS the main screen is queried through `NSScreen`, taking the Retina
//! backing scale into account. Other platforms report no size and the caller
//! falls back to [`ScreenSize::FALLBACK`].

use crate::config::ScreenConfig;

/// Screen dimensions in physical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenSize {
    pub width: u32,
    pub height: u32,
}

impl ScreenSize {
    /// Used when neither the configuration nor the OS provides a size.
    pub const FALLBACK: Self = Self { width: 2560, height: 1664 };

    /// Returns the configured size when both dimensions are positive.
    #[must_use]
    pub fn from_config(config: &ScreenConfig) -> Option<Self> {
        match (config.width, config.height) {
            (Some(width), Some(height)) if width > 0 && height > 0 => Some(Self { width, height }),
            _ => None,
        }
    }

    /// Resolves the target size: configuration first, then the primary display.
    #[must_use]
    pub fn resolve(config: &ScreenConfig) -> Self {
        Self::from_config(config).or_else(primary_screen_size).unwrap_or_else(|| {
            tracing::debug!("screen size unavailable, using fallback");
            Self::FALLBACK
        })
    }
}

#[cfg(target_os = "macos")]
#[repr(C)]
#[derive(Debug, Copy, Clone)]
struct NSPoint {
    x: f64,
    y: f64,
}

#[cfg(target_os = "macos")]
#[repr(C)]
#[derive(Debug, Copy, Clone)]
struct NSSize {
    width: f64,
    height: f64,
}

#[cfg(target_os = "macos")]
#[repr(C)]
#[derive(Debug, Copy, Clone)]
struct NSRect {
    origin: NSPoint,
    size: NSSize,
}

/// Gets the primary screen dimensions using macOS APIs.
#[cfg(target_os = "macos")]
#[must_use]
#[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
pub fn primary_screen_size() -> Option<ScreenSize> {
    use objc::runtime::{Class, Object};
    use objc::{msg_send, sel, sel_impl};

    unsafe {
        let screen_class = Class::get("NSScreen")?;

        let main_screen: *mut Object = msg_send![screen_class, mainScreen];
        if main_screen.is_null() {
            return None;
        }

        let frame: NSRect = msg_send![main_screen, frame];
        let scale: f64 = msg_send![main_screen, backingScaleFactor];

        let width = (frame.size.width * scale) as u32;
        let height = (frame.size.height * scale) as u32;

        (width > 0 && height > 0).then_some(ScreenSize { width, height })
    }
}

/// Screen detection is only implemented for macOS.
#[cfg(not(target_os = "macos"))]
#[must_use]
pub const fn primary_screen_size() -> Option<ScreenSize> { None }
