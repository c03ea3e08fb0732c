//! Rendering module: layout primitives, paint commands, software rasterizer

pub mod layout;
pub mod paint;
pub mod raster;

/// A raster encoding of a render surface plus the pixel dimensions of the
/// output buffer at capture time.
///
/// Ephemeral: a capture artifact lives within one pipeline invocation and
/// is never cached across invocations, because the surface content may have
/// changed in between.
#[derive(Debug, Clone)]
pub struct RasterImage {
    pub width: u32,
    pub height: u32,
    pub png_data: Vec<u8>,
}
