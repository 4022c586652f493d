use std::fmt::Display;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, TimeZone};
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, RgbaImage, imageops};
use texsnap_core::SelectionError;
use texsnap_types::{CropRect, ScreenSize};

/// Supplies the full-screen bitmap a capture session selects from
pub trait BitmapSource: Send + Sync {
    fn grab(&self) -> Result<RgbaImage>;
}

/// Screenshot previously written to disk
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl BitmapSource for FileSource {
    fn grab(&self) -> Result<RgbaImage> {
        let image = image::open(&self.path)
            .with_context(|| format!("Failed to load screenshot {}", self.path.display()))?;
        Ok(image.into_rgba8())
    }
}

/// Primary monitor
#[cfg(feature = "screen")]
pub struct MonitorSource;

#[cfg(feature = "screen")]
impl BitmapSource for MonitorSource {
    fn grab(&self) -> Result<RgbaImage> {
        let monitors = xcap::Monitor::all().context("Failed to get monitors")?;
        let monitor = monitors.first().context("No monitor found")?;

        let image = monitor.capture_image().context("Failed to capture screen")?;
        RgbaImage::from_raw(image.width(), image.height(), image.into_raw())
            .context("Captured frame does not match its dimensions")
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    #[error(transparent)]
    Selection(#[from] SelectionError),

    #[error("Selection {rect} exceeds the {width}x{height} screen")]
    OutOfBounds {
        rect: CropRect,
        width: u32,
        height: u32,
    },

    #[error("Failed to encode PNG: {0}")]
    Encode(#[from] image::ImageError),
}

pub fn screen_size(image: &RgbaImage) -> ScreenSize {
    ScreenSize::new(image.width(), image.height())
}

pub fn crop(image: &RgbaImage, rect: CropRect) -> Result<RgbaImage, CaptureError> {
    if rect.right() > image.width() || rect.bottom() > image.height() {
        return Err(CaptureError::OutOfBounds {
            rect,
            width: image.width(),
            height: image.height(),
        });
    }

    Ok(imageops::crop_imm(image, rect.x, rect.y, rect.width, rect.height).to_image())
}

pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, CaptureError> {
    let mut buffer = Vec::new();
    PngEncoder::new(&mut buffer).write_image(
        image.as_raw(),
        image.width(),
        image.height(),
        ExtendedColorType::Rgba8,
    )?;
    Ok(buffer)
}

/// `screen_<yyyy-MM-dd-HH-mm-ss>.png`, with `_<attempt>` before the extension
/// once the plain name is taken
pub fn capture_file_name<Tz>(now: &DateTime<Tz>, attempt: u32) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let stamp = now.format("%Y-%m-%d-%H-%M-%S");
    match attempt {
        0 => format!("screen_{}.png", stamp),
        n => format!("screen_{}_{}.png", stamp, n),
    }
}
