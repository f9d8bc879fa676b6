//! Raster export of a stroke buffer.

use super::color::{Color, WHITE};
use super::render::{RenderOptions, render_background, render_strokes};
use super::stroke::Stroke;
use crate::util;
use thiserror::Error;

/// MIME type of every exported sketch.
pub const PNG_MIME: &str = "image/png";

/// Errors that can occur while rasterizing a sketch.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to create drawing surface: {0}")]
    Surface(#[from] cairo::Error),

    #[error("Failed to encode PNG: {0}")]
    Encode(#[from] cairo::IoError),
}

/// Renders strokes onto an opaque canvas and returns the surface.
///
/// Strokes are drawn on their own transparent layer first, so the eraser
/// removes ink but never the paper, and the layer is then composited over
/// `background`.
pub fn rasterize<'a, I>(
    strokes: I,
    width: u32,
    height: u32,
    background: Color,
    options: RenderOptions,
) -> Result<cairo::ImageSurface, ExportError>
where
    I: IntoIterator<Item = &'a Stroke>,
{
    let (w, h) = (width.max(1) as i32, height.max(1) as i32);

    let layer = cairo::ImageSurface::create(cairo::Format::ARgb32, w, h)?;
    {
        let ctx = cairo::Context::new(&layer)?;
        render_strokes(&ctx, strokes, options);
    }

    let canvas = cairo::ImageSurface::create(cairo::Format::ARgb32, w, h)?;
    {
        let ctx = cairo::Context::new(&canvas)?;
        render_background(&ctx, background);
        ctx.set_source_surface(&layer, 0.0, 0.0)?;
        ctx.paint()?;
    }
    canvas.flush();

    Ok(canvas)
}

/// Rasterizes strokes against white paper and encodes the result as PNG.
pub fn export_png<'a, I>(
    strokes: I,
    width: u32,
    height: u32,
    options: RenderOptions,
) -> Result<Vec<u8>, ExportError>
where
    I: IntoIterator<Item = &'a Stroke>,
{
    let canvas = rasterize(strokes, width, height, WHITE, options)?;
    let mut buffer = Vec::new();
    canvas.write_to_png(&mut buffer)?;
    log::debug!(
        "Exported {}x{} sketch ({} bytes)",
        width,
        height,
        buffer.len()
    );
    Ok(buffer)
}

/// Same as [`export_png`], wrapped as a `data:image/png;base64,` URL.
pub fn export_data_url<'a, I>(
    strokes: I,
    width: u32,
    height: u32,
    options: RenderOptions,
) -> Result<String, ExportError>
where
    I: IntoIterator<Item = &'a Stroke>,
{
    let png = export_png(strokes, width, height, options)?;
    Ok(util::encode_data_url(PNG_MIME, &png))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::color::BLACK;
    use crate::input::Tool;

    fn all_pixels_opaque_white(surface: &mut cairo::ImageSurface) -> bool {
        let (w, h) = (surface.width() as usize, surface.height() as usize);
        let stride = surface.stride() as usize;
        let data = surface.data().unwrap();
        (0..h).all(|y| {
            (0..w).all(|x| {
                let o = y * stride + x * 4;
                data[o..o + 4].iter().all(|byte| *byte == 0xff)
            })
        })
    }

    #[test]
    fn empty_buffer_exports_blank_white_png() {
        let png = export_png(&[], 64, 48, RenderOptions::default()).unwrap();
        assert_eq!(&png[0..8], &[137, 80, 78, 71, 13, 10, 26, 10]);

        let mut decoded = cairo::ImageSurface::create_from_png(&mut png.as_slice()).unwrap();
        assert_eq!(decoded.width(), 64);
        assert_eq!(decoded.height(), 48);
        assert!(all_pixels_opaque_white(&mut decoded));
    }

    #[test]
    fn eraser_never_exposes_transparency() {
        let mut ink = Stroke::new(Tool::Pen, (0.0, 10.0), BLACK, 6.0);
        ink.push((20.0, 10.0));
        let mut eraser = Stroke::new(Tool::Eraser, (0.0, 10.0), BLACK, 30.0);
        eraser.push((20.0, 10.0));

        let strokes = [ink, eraser];
        let mut canvas = rasterize(&strokes, 20, 20, WHITE, RenderOptions::default()).unwrap();
        assert!(all_pixels_opaque_white(&mut canvas));
    }

    #[test]
    fn data_url_has_png_prefix() {
        let url = export_data_url(&[], 8, 8, RenderOptions::default()).unwrap();
        assert!(url.starts_with("data:image/png;base64,iVBORw0KGgo"));
    }
}
