//! Capture surfaces: where the résumé bitmap comes from.

use image::imageops::FilterType;
use image::RgbaImage;
use log::debug;
use std::ops::{Deref, DerefMut};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CaptureError {
    #[error("capture target {0} is not mounted")]
    NotMounted(String),
    #[error("capture target has zero size")]
    ZeroSize,
    #[error("failed to decode capture: {0}")]
    Decode(#[from] image::ImageError),
    #[error("browser: {0}")]
    Browser(String),
}

/// What to capture and at which resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptureRequest {
    pub selector: String,
    /// Layout width of the captured element, in CSS pixels.
    pub width_px: u32,
    /// Device pixels per CSS pixel in the resulting bitmap.
    pub scale: f64,
}

impl CaptureRequest {
    /// Bitmap width after scaling.
    pub fn bitmap_width(&self) -> u32 {
        ((self.width_px as f64) * self.scale).round().max(1.0) as u32
    }
}

pub trait CaptureSurface {
    /// Hide every element tagged for exclusion. Returns how many were hidden.
    fn hide_excluded(&mut self) -> Result<usize, CaptureError>;

    /// Undo [`hide_excluded`](Self::hide_excluded). Must be safe to call when
    /// nothing is hidden.
    fn restore_excluded(&mut self);

    fn capture(&mut self, request: &CaptureRequest) -> Result<RgbaImage, CaptureError>;
}

/// Keeps excluded elements hidden for as long as it lives.
pub struct ExclusionGuard<'s, S: CaptureSurface + ?Sized> {
    surface: &'s mut S,
}

impl<'s, S: CaptureSurface + ?Sized> ExclusionGuard<'s, S> {
    pub fn hide(surface: &'s mut S) -> Result<Self, CaptureError> {
        let guard = Self { surface };
        let hidden = guard.surface.hide_excluded()?;
        debug!("hid {hidden} excluded element(s)");
        Ok(guard)
    }
}

impl<S: CaptureSurface + ?Sized> Deref for ExclusionGuard<'_, S> {
    type Target = S;

    fn deref(&self) -> &S {
        self.surface
    }
}

impl<S: CaptureSurface + ?Sized> DerefMut for ExclusionGuard<'_, S> {
    fn deref_mut(&mut self) -> &mut S {
        self.surface
    }
}

impl<S: CaptureSurface + ?Sized> Drop for ExclusionGuard<'_, S> {
    fn drop(&mut self) {
        self.surface.restore_excluded();
    }
}

/// A bitmap captured ahead of time, with exclusions already applied.
pub struct ImageSurface {
    path: PathBuf,
}

impl ImageSurface {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CaptureSurface for ImageSurface {
    fn hide_excluded(&mut self) -> Result<usize, CaptureError> {
        Ok(0)
    }

    fn restore_excluded(&mut self) {}

    fn capture(&mut self, request: &CaptureRequest) -> Result<RgbaImage, CaptureError> {
        if !self.path.is_file() {
            return Err(CaptureError::NotMounted(self.path.display().to_string()));
        }
        let bitmap = image::open(&self.path)?.to_rgba8();
        fit_width(bitmap, request.bitmap_width())
    }
}

/// Scale `bitmap` to `width`, preserving aspect ratio.
pub fn fit_width(bitmap: RgbaImage, width: u32) -> Result<RgbaImage, CaptureError> {
    let (w, h) = bitmap.dimensions();
    if w == 0 || h == 0 {
        return Err(CaptureError::ZeroSize);
    }
    if w == width {
        return Ok(bitmap);
    }
    let height = ((h as f64) * (width as f64) / (w as f64)).round().max(1.0) as u32;
    Ok(image::imageops::resize(&bitmap, width, height, FilterType::Lanczos3))
}
