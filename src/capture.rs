//! One-shot screen capture of the primary monitor.
//!
//! Runs once at startup; everything afterwards magnifies the captured
//! snapshot. Uses `xcap` for cross-platform screenshots.

use image::RgbaImage;
use thiserror::Error;
use xcap::Monitor;

use crate::display::PixelBuffer;

/// Failure to obtain the startup screenshot.
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("monitor enumeration failed: {0}")]
    Enumerate(xcap::XCapError),
    #[error("no monitors available")]
    NoMonitor,
    #[error("screen capture failed: {0}")]
    Capture(xcap::XCapError),
    #[error("capture returned an empty image")]
    EmptyImage,
}

/// Capture the primary monitor (first monitor when none is marked primary)
/// and convert the frame into the renderer's pixel layout.
///
/// On macOS this needs the Screen Recording permission; the capture error
/// surfaces as a startup failure if it is missing.
pub fn capture_screen() -> Result<PixelBuffer, CaptureError> {
    let monitors = Monitor::all().map_err(CaptureError::Enumerate)?;
    log::debug!("{} monitor(s) detected", monitors.len());

    let monitor = monitors
        .iter()
        .find(|m| m.is_primary())
        .or_else(|| monitors.first())
        .ok_or(CaptureError::NoMonitor)?;

    let image: RgbaImage = monitor.capture_image().map_err(CaptureError::Capture)?;
    let (width, height) = (image.width(), image.height());
    if width == 0 || height == 0 {
        return Err(CaptureError::EmptyImage);
    }

    Ok(PixelBuffer::from_rgba(width, height, image.as_raw()))
}
