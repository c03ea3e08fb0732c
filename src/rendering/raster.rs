/// Software rasterizer: paint commands to an opaque PNG
///
/// Output is deterministic: the background color and pixel density are fixed
/// inputs, never sampled from ambient state, so two rasterizations of the
/// same command list are byte-identical.
use std::io::Cursor;

use font8x8::{UnicodeFonts, BASIC_FONTS};
use image::{Rgba, RgbaImage};

use crate::rendering::layout::{Rgba as Color, GLYPH_PX};
use crate::rendering::paint::PaintCommand;
use crate::rendering::RasterImage;
use crate::{Error, Result};

/// Forced opaque white background. The surface itself may have no defined
/// background; the exported artifact must not leak whatever is behind it.
pub const BACKGROUND: Color = (255, 255, 255, 255);

/// Rasterize `commands` for a `width` x `height` region at `pixel_ratio`
/// times the native density and encode the result as PNG.
pub fn rasterize(
    commands: &[PaintCommand],
    width: u32,
    height: u32,
    pixel_ratio: f32,
) -> Result<RasterImage> {
    if width == 0 || height == 0 {
        return Err(Error::RenderError("raster target has zero dimensions".into()));
    }
    if !(pixel_ratio.is_finite() && pixel_ratio > 0.0) {
        return Err(Error::ConfigError(format!("invalid pixel ratio: {}", pixel_ratio)));
    }

    let out_w = scaled(width, pixel_ratio).max(1);
    let out_h = scaled(height, pixel_ratio).max(1);
    let mut img = RgbaImage::from_pixel(
        out_w,
        out_h,
        Rgba([BACKGROUND.0, BACKGROUND.1, BACKGROUND.2, BACKGROUND.3]),
    );

    for command in commands {
        match command {
            PaintCommand::SolidRect { x, y, width, height, rgba } => {
                fill_rect(
                    &mut img,
                    scale_coord(*x, pixel_ratio),
                    scale_coord(*y, pixel_ratio),
                    scaled(*width, pixel_ratio),
                    scaled(*height, pixel_ratio),
                    *rgba,
                );
            }
            PaintCommand::Text { x, y, text, scale, rgba } => {
                let glyph_scale = ((*scale as f32 * pixel_ratio).round() as u32).max(1);
                draw_text(
                    &mut img,
                    scale_coord(*x, pixel_ratio),
                    scale_coord(*y, pixel_ratio),
                    text,
                    glyph_scale,
                    *rgba,
                );
            }
        }
    }

    let mut png_data = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut png_data), image::ImageOutputFormat::Png)
        .map_err(|e| Error::EncodeError(format!("PNG encode failed: {}", e)))?;

    Ok(RasterImage { width: out_w, height: out_h, png_data })
}

fn scaled(v: u32, ratio: f32) -> u32 {
    (v as f32 * ratio).round() as u32
}

fn scale_coord(v: i32, ratio: f32) -> i32 {
    (v as f32 * ratio).round() as i32
}

fn fill_rect(img: &mut RgbaImage, x: i32, y: i32, width: u32, height: u32, rgba: Color) {
    let pixel = Rgba([rgba.0, rgba.1, rgba.2, rgba.3]);
    for dy in 0..height as i32 {
        for dx in 0..width as i32 {
            let px = x + dx;
            let py = y + dy;
            if px >= 0 && py >= 0 && (px as u32) < img.width() && (py as u32) < img.height() {
                img.put_pixel(px as u32, py as u32, pixel);
            }
        }
    }
}

/// Blit text with the 8x8 bitmap font. Characters outside the basic set fall
/// back to `?`; `\n` starts a new row.
fn draw_text(img: &mut RgbaImage, x: i32, y: i32, text: &str, scale: u32, rgba: Color) {
    let pixel = Rgba([rgba.0, rgba.1, rgba.2, rgba.3]);
    let cell = (GLYPH_PX * scale) as i32;
    let mut cursor_x = x;
    let mut cursor_y = y;
    for ch in text.chars() {
        if ch == '\n' {
            cursor_x = x;
            cursor_y += cell;
            continue;
        }
        let glyph = match BASIC_FONTS.get(ch).or_else(|| BASIC_FONTS.get('?')) {
            Some(g) => g,
            None => {
                cursor_x += cell;
                continue;
            }
        };
        for (row_idx, row) in glyph.iter().enumerate() {
            for col_idx in 0..8i32 {
                if (*row >> col_idx) & 1 == 0 {
                    continue;
                }
                let base_x = cursor_x + col_idx * scale as i32;
                let base_y = cursor_y + row_idx as i32 * scale as i32;
                for sy in 0..scale as i32 {
                    for sx in 0..scale as i32 {
                        let px = base_x + sx;
                        let py = base_y + sy;
                        if px >= 0
                            && py >= 0
                            && (px as u32) < img.width()
                            && (py as u32) < img.height()
                        {
                            img.put_pixel(px as u32, py as u32, pixel);
                        }
                    }
                }
            }
        }
        cursor_x += cell;
    }
}
