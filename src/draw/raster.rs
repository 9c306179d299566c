//! Owned raster images embedded in shapes.
//!
//! Cairo surfaces are reference-counted handles that cannot be compared or
//! sent across threads, so shapes keep their pixels in a [`Raster`] and build
//! a surface only when they are drawn.

use super::error::RenderError;
use crate::util::Rect;

/// Pixel buffer in Cairo's native ARGB32 layout (premultiplied alpha).
#[derive(Clone, PartialEq)]
pub struct Raster {
    width: i32,
    height: i32,
    stride: i32,
    data: Vec<u8>,
}

impl std::fmt::Debug for Raster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Raster")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.data.len())
            .finish()
    }
}

impl Raster {
    /// Builds a raster from straight (non-premultiplied) RGBA bytes.
    ///
    /// Returns `None` when the byte count does not match the dimensions or
    /// the dimensions are too large to address.
    pub fn from_rgba(width: i32, height: i32, rgba: &[u8]) -> Option<Self> {
        if width <= 0 || height <= 0 {
            return None;
        }
        let expected = width.checked_mul(height)?.checked_mul(4)?;
        if rgba.len() != expected as usize {
            return None;
        }

        let stride = cairo::Format::ARgb32.stride_for_width(width as u32).ok()?;
        let mut data = vec![0u8; stride.checked_mul(height)? as usize];

        for y in 0..height {
            for x in 0..width {
                let src = ((y * width + x) * 4) as usize;
                let a = rgba[src + 3] as u32;
                let premultiply = |c: u8| (c as u32 * a + 127) / 255;
                let pixel = (a << 24)
                    | (premultiply(rgba[src]) << 16)
                    | (premultiply(rgba[src + 1]) << 8)
                    | premultiply(rgba[src + 2]);
                let dst = (y * stride + x * 4) as usize;
                data[dst..dst + 4].copy_from_slice(&pixel.to_ne_bytes());
            }
        }

        Some(Self {
            width,
            height,
            stride,
            data,
        })
    }

    /// Copies the pixels out of an ARGB32 image surface.
    pub fn from_surface(surface: &cairo::ImageSurface) -> Result<Self, RenderError> {
        surface.flush();
        let width = surface.width();
        let height = surface.height();
        let stride = surface.stride();
        let mut data = Vec::new();
        surface.with_data(|bytes| data.extend_from_slice(bytes))?;

        Ok(Self {
            width,
            height,
            stride,
            data,
        })
    }

    /// Creates a fresh image surface holding a copy of the pixels.
    pub fn to_surface(&self) -> Result<cairo::ImageSurface, RenderError> {
        let surface = cairo::ImageSurface::create_for_data(
            self.data.clone(),
            cairo::Format::ARgb32,
            self.width,
            self.height,
            self.stride,
        )?;
        Ok(surface)
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Alpha of the pixel at (x, y), or `None` outside the raster.
    pub fn alpha_at(&self, x: i32, y: i32) -> Option<u8> {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return None;
        }
        let offset = (y * self.stride + x * 4) as usize;
        let mut bytes = [0u8; 4];
        bytes.copy_from_slice(&self.data[offset..offset + 4]);
        Some((u32::from_ne_bytes(bytes) >> 24) as u8)
    }

    /// Paints the raster scaled into `rect`.
    pub(crate) fn paint_into(&self, ctx: &cairo::Context, rect: Rect) -> Result<(), RenderError> {
        if rect.width <= 0.0 || rect.height <= 0.0 {
            return Ok(());
        }

        let surface = self.to_surface()?;
        ctx.save()?;
        ctx.translate(rect.x, rect.y);
        ctx.scale(
            rect.width / self.width as f64,
            rect.height / self.height as f64,
        );
        ctx.set_source_surface(&surface, 0.0, 0.0)?;
        // Pad keeps scaled edges opaque; the clip stops it bleeding outside.
        ctx.source().set_extend(cairo::Extend::Pad);
        ctx.rectangle(0.0, 0.0, self.width as f64, self.height as f64);
        ctx.clip();
        let painted = ctx.paint();
        ctx.restore()?;
        painted?;
        Ok(())
    }
}
