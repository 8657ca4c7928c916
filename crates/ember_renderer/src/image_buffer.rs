//! 8-bit RGB output image.

use std::path::Path;

use crate::{error::RenderResult, Color};

/// Bytes per stored pixel.
pub const CHANNELS: usize = 3;

/// Apply gamma correction (gamma = 2.0).
#[inline]
pub fn linear_to_gamma(linear: f32) -> f32 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Convert a linear color to gamma-corrected 8-bit RGB.
pub fn color_to_rgb(color: Color) -> [u8; 3] {
    let quantize = |c: f32| (256.0 * linear_to_gamma(c).clamp(0.0, 0.999)) as u8;
    [quantize(color.x), quantize(color.y), quantize(color.z)]
}

/// Quantize `color` into one stored pixel. Shared by [`ImageBuffer::write`]
/// and the parallel row pass, which fills byte rows directly.
#[inline]
pub(crate) fn store_pixel(pixel: &mut [u8], color: Color) {
    pixel.copy_from_slice(&color_to_rgb(color));
}

/// A `width x height` RGB8 image, stored top scanline first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; width as usize * height as usize * CHANNELS],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Store `color` at image-plane position `(x, y)`, with `y = 0` the
    /// bottom scanline.
    pub fn write(&mut self, x: u32, y: u32, color: Color) {
        let offset = self.offset(x, self.height - 1 - y);
        store_pixel(&mut self.data[offset..offset + CHANNELS], color);
    }

    /// Stored bytes of the pixel at column `x` of byte row `row` (row 0 on top).
    pub fn pixel(&self, x: u32, row: u32) -> [u8; 3] {
        let offset = self.offset(x, row);
        [self.data[offset], self.data[offset + 1], self.data[offset + 2]]
    }

    /// Raw RGB8 bytes, top row first.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// Mutable bytes for the render pass, which fills whole rows at a time.
    pub(crate) fn bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Encode the image as PNG at `path`.
    pub fn save_png(&self, path: impl AsRef<Path>) -> RenderResult<()> {
        let path = path.as_ref();
        image::save_buffer(path, &self.data, self.width, self.height, image::ColorType::Rgb8)?;
        log::info!("Wrote {}x{} image to {}", self.width, self.height, path.display());
        Ok(())
    }

    #[inline]
    fn offset(&self, x: u32, row: u32) -> usize {
        (row as usize * self.width as usize + x as usize) * CHANNELS
    }
}
