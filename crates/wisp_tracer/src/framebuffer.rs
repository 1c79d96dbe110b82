//! Output surface for rendered frames.

use std::path::Path;

use bytemuck::{Pod, Zeroable};
use thiserror::Error;

use crate::bucket::BucketResult;

/// Errors that can occur while writing a framebuffer out.
#[derive(Error, Debug)]
pub enum FramebufferError {
    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),
}

pub type FramebufferResult<T> = Result<T, FramebufferError>;

/// One 8-bit RGBA pixel.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Pod, Zeroable)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const BLACK: Self = Self::new(0, 0, 0, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

/// A row-major grid of RGBA pixels, row 0 at the top.
pub struct Framebuffer {
    pub width: u32,
    pub height: u32,
    pixels: Vec<Rgba8>,
}

impl Framebuffer {
    /// Create a framebuffer filled with opaque black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Rgba8::BLACK; (width as usize) * (height as usize)],
        }
    }

    #[inline]
    fn index(&self, row: u32, col: u32) -> usize {
        (row as usize) * (self.width as usize) + col as usize
    }

    pub fn get(&self, row: u32, col: u32) -> Rgba8 {
        self.pixels[self.index(row, col)]
    }

    pub fn set(&mut self, row: u32, col: u32, pixel: Rgba8) {
        let idx = self.index(row, col);
        self.pixels[idx] = pixel;
    }

    pub fn pixels(&self) -> &[Rgba8] {
        &self.pixels
    }

    /// Raw RGBA bytes, suitable for uploading or saving.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Copy a rendered bucket into place.
    pub fn write_bucket(&mut self, result: &BucketResult) {
        let bucket = &result.bucket;
        for local_y in 0..bucket.height {
            for local_x in 0..bucket.width {
                let src = (local_y * bucket.width + local_x) as usize;
                self.set(bucket.y + local_y, bucket.x + local_x, result.pixels[src]);
            }
        }
    }

    /// Encode as PNG.
    pub fn save_png(&self, path: impl AsRef<Path>) -> FramebufferResult<()> {
        image::save_buffer_with_format(
            path.as_ref(),
            self.as_bytes(),
            self.width,
            self.height,
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )?;
        log::info!("Saved {}x{} image to {}", self.width, self.height, path.as_ref().display());
        Ok(())
    }
}
