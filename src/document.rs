//! Document assembler: wrap a capture artifact into a downloadable PDF.
//!
//! The page is sized to the captured region's on-screen pixel dimensions,
//! not a fixed paper size, so the plan's layout survives without scaling
//! artifacts or pagination. The raster fills the page exactly from the
//! origin. Assembly is pure serialization into an in-memory buffer via
//! `Write`; nothing touches disk unless the whole document assembled, so a
//! failure never leaves a partial file behind.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use image::codecs::jpeg::JpegEncoder;

use crate::rendering::RasterImage;
use crate::{Error, Result};

/// Fixed, predictable name for the exported document.
pub const EXPORT_FILE_NAME: &str = "2026-Resolution-Roadmap.pdf";

/// Build a single-page PDF embedding `raster`, with the page sized to
/// `width_px` x `height_px` (the source region's on-screen dimensions; the
/// raster itself is denser by the capture pixel ratio).
pub fn assemble(raster: &RasterImage, width_px: u32, height_px: u32) -> Result<Vec<u8>> {
    if width_px == 0 || height_px == 0 {
        return Err(Error::AssembleError("page has zero dimensions".into()));
    }

    // Decode the capture artifact; a corrupt raster is the assembly failure
    // mode and must not produce a file.
    let decoded = image::load_from_memory_with_format(&raster.png_data, image::ImageFormat::Png)
        .map_err(|e| Error::AssembleError(format!("raster decode failed: {}", e)))?;
    let rgb = decoded.to_rgb8();

    // Maximum-quality JPEG for /DCTDecode embedding.
    let mut jpeg = Vec::new();
    JpegEncoder::new_with_quality(&mut jpeg, 100)
        .encode_image(&rgb)
        .map_err(|e| Error::AssembleError(format!("image embed failed: {}", e)))?;

    write_pdf(&jpeg, rgb.width(), rgb.height(), width_px, height_px)
        .map_err(|e| Error::AssembleError(format!("document serialization failed: {}", e)))
}

/// Assemble and persist under the fixed export file name inside `dir`.
/// Returns the written path.
pub fn save(raster: &RasterImage, width_px: u32, height_px: u32, dir: &Path) -> Result<PathBuf> {
    let document = assemble(raster, width_px, height_px)?;
    let path = dir.join(EXPORT_FILE_NAME);
    fs::write(&path, &document)
        .map_err(|e| Error::AssembleError(format!("failed to write {}: {}", path.display(), e)))?;
    Ok(path)
}

fn write_pdf(
    jpeg: &[u8],
    image_w: u32,
    image_h: u32,
    page_w: u32,
    page_h: u32,
) -> io::Result<Vec<u8>> {
    let mut buf: Vec<u8> = Vec::new();
    let mut offsets: Vec<usize> = Vec::new();

    buf.write_all(b"%PDF-1.4\n")?;
    // Binary marker comment so transports treat the file as binary.
    buf.write_all(b"%\xe2\xe3\xcf\xd3\n")?;

    offsets.push(buf.len());
    buf.write_all(b"1 0 obj\n<< /Type /Catalog /Pages 2 0 R >>\nendobj\n")?;

    offsets.push(buf.len());
    buf.write_all(b"2 0 obj\n<< /Type /Pages /Kids [3 0 R] /Count 1 >>\nendobj\n")?;

    offsets.push(buf.len());
    writeln!(
        buf,
        "3 0 obj\n<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {} {}] \
         /Resources << /XObject << /Im0 4 0 R >> /ProcSet [/PDF /ImageC] >> \
         /Contents 5 0 R >>\nendobj",
        page_w, page_h
    )?;

    offsets.push(buf.len());
    writeln!(
        buf,
        "4 0 obj\n<< /Type /XObject /Subtype /Image /Width {} /Height {} \
         /ColorSpace /DeviceRGB /BitsPerComponent 8 /Filter /DCTDecode /Length {} >>\nstream",
        image_w,
        image_h,
        jpeg.len()
    )?;
    buf.write_all(jpeg)?;
    buf.write_all(b"\nendstream\nendobj\n")?;

    // The image XObject is a unit square; the cm matrix scales it to fill
    // the page exactly from the origin.
    let content = format!("q\n{} 0 0 {} 0 0 cm\n/Im0 Do\nQ\n", page_w, page_h);
    offsets.push(buf.len());
    writeln!(
        buf,
        "5 0 obj\n<< /Length {} >>\nstream\n{}endstream\nendobj",
        content.len(),
        content
    )?;

    let xref_start = buf.len();
    writeln!(buf, "xref\n0 {}", offsets.len() + 1)?;
    buf.write_all(b"0000000000 65535 f \n")?;
    for offset in &offsets {
        writeln!(buf, "{:010} 00000 n ", offset)?;
    }
    writeln!(
        buf,
        "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF",
        offsets.len() + 1,
        xref_start
    )?;

    Ok(buf)
}
