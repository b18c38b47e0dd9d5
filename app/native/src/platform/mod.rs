//! Platform helpers for Salah.
//!
//! - [`path`] - Shell-like path expansion
//! - [`screen`] - Primary display resolution

pub mod path;
pub mod screen;

pub use screen::{ScreenSize, primary_screen_size};
