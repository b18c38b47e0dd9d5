//! Wallpaper composition and publishing.
//!
//! - [`processing`]: image lookup, decoding, crop-and-resize, JPEG encoding
//! - [`fonts`]: font candidates and rasterisation
//! - [`overlay`]: label and sub-label rendering
//! - [`publish`]: writing the composite and applying it through the OS

pub mod fonts;
pub mod overlay;
pub mod processing;
pub mod publish;

pub use overlay::{OverlayLayout, OverlayStyle, TextBox, TextOverlayRenderer};
pub use processing::{adapt, encode_jpeg, load_image, resolve_image_source};
pub use publish::{WallpaperPublisher, WallpaperSetter};
