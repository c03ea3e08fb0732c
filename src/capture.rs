//! Capture service: freeze a render surface into a raster image.
//!
//! Rasterization is a capability behind the [`CaptureBackend`] trait so the
//! pipeline never assumes a specific backend; [`SoftwareCapture`] is the
//! built-in adapter over the crate's own rasterizer. A capture either
//! produces a complete artifact or fails once. There is no retry, and a
//! failed capture leaves prior application state untouched.

use crate::rendering::{paint, raster, RasterImage};
use crate::surface::RenderSurface;
use crate::{Error, Result};

/// Pixel density multiplier applied to every capture.
pub const DEFAULT_PIXEL_RATIO: f32 = 2.0;

/// Core trait for capture backend implementations.
pub trait CaptureBackend: Send + Sync {
    /// Rasterize a currently-mounted surface.
    ///
    /// Precondition: the surface must be mounted with non-zero dimensions;
    /// otherwise the operation reports a precondition failure and produces
    /// no artifact.
    fn capture(&self, surface: &RenderSurface) -> Result<RasterImage>;
}

/// The built-in software capture adapter.
///
/// Deterministic by construction: background color and pixel ratio are fixed
/// at creation, never sampled from ambient state, so two captures of an
/// unchanged surface are byte-identical.
pub struct SoftwareCapture {
    pixel_ratio: f32,
}

impl SoftwareCapture {
    pub fn new(pixel_ratio: f32) -> Self {
        Self { pixel_ratio }
    }
}

impl Default for SoftwareCapture {
    fn default() -> Self {
        Self::new(DEFAULT_PIXEL_RATIO)
    }
}

impl CaptureBackend for SoftwareCapture {
    fn capture(&self, surface: &RenderSurface) -> Result<RasterImage> {
        if !surface.is_mounted() {
            log::warn!("capture aborted: surface is not mounted");
            return Err(Error::CapturePrecondition("surface is not mounted".into()));
        }
        if surface.width() == 0 || surface.height() == 0 {
            log::warn!(
                "capture aborted: surface has zero dimensions ({}x{})",
                surface.width(),
                surface.height()
            );
            return Err(Error::CapturePrecondition("surface has zero dimensions".into()));
        }

        let commands = paint::paint_nodes(surface.nodes());
        raster::rasterize(&commands, surface.width(), surface.height(), self.pixel_ratio)
    }
}
