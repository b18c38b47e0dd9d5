//! `salah set`: a single image with caller-provided labels.

use std::path::PathBuf;

use clap::Args;

use super::types::Destination;
use crate::config::LoadedConfig;
use crate::error::SalahError;
use crate::pipeline::compose_image;
use crate::platform::ScreenSize;
use crate::wallpaper::TextOverlayRenderer;

/// Arguments of the set command.
#[derive(Args, Debug)]
pub struct SetArgs {
    /// Image to use as the wallpaper.
    #[arg(value_name = "IMAGE")]
    pub image: PathBuf,

    /// Main line of text. Empty draws nothing.
    #[arg(long, default_value = "", value_name = "TEXT")]
    pub label: String,

    /// Smaller line under the label. Empty draws nothing.
    #[arg(long, default_value = "", value_name = "TEXT")]
    pub sublabel: String,

    /// Write the wallpaper to this JPEG file instead of setting it.
    #[arg(long, short, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

/// Fits `IMAGE` to the screen, stamps the labels and delivers it.
///
/// No schedule is fetched.
///
/// # Errors
///
/// Returns an error if the image cannot be loaded or delivered.
pub fn execute(loaded: &LoadedConfig, args: &SetArgs) -> Result<(), SalahError> {
    let config = &loaded.config;
    let destination = Destination::from_args(loaded, args.output.as_deref())?;
    let renderer = TextOverlayRenderer::from_config(&config.overlay, &loaded.base_dir())?;

    let (image, _) = compose_image(
        &renderer,
        ScreenSize::resolve(&config.screen),
        &args.image,
        &args.label,
        &args.sublabel,
    )?;

    let path = destination.deliver(&image)?;
    println!("{}", path.display());
    Ok(())
}
