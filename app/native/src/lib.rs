//! Salah - a desktop wallpaper that follows the daily prayer times.
//!
//! The library fetches a masjid's timetable, works out which prayer period an
//! instant falls in, and turns that period's image into a wallpaper labelled
//! with the period name and its time range. The `salah` binary is a thin
//! wrapper around [`cli::Cli`].

pub mod cache;
pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod pipeline;
pub mod platform;
pub mod schedule;
pub mod schema;
pub mod utils;
pub mod wallpaper;
