//! Texture images sampled by the raytracer.
//!
//! Textures keep their 8-bit RGBA samples as loaded. Decoding to linear
//! floats happens at sample time because whether gamma correction applies
//! is a per-render decision.

use std::path::Path;

use thiserror::Error;
use wisp_math::Vec3;

/// Gamma exponent used to decode and encode 8-bit channels.
pub const GAMMA: f32 = 2.2;

/// Errors that can occur while building or loading a texture.
#[derive(Error, Debug)]
pub enum TextureError {
    #[error("Image decoding error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("Texture is {width}x{height} but holds {actual} pixels")]
    SizeMismatch { width: u32, height: u32, actual: usize },

    #[error("Texture has zero width or height")]
    Empty,
}

pub type TextureResult<T> = Result<T, TextureError>;

/// An RGBA8 texture, stored row-major with row 0 first.
///
/// Always at least 1x1 with exactly `width * height` pixels.
#[derive(Clone, Debug)]
pub struct Texture {
    width: u32,
    height: u32,

    /// Pixel data as [R, G, B, A] bytes
    pixels: Vec<[u8; 4]>,

    /// Source file path (for debugging)
    path: String,
}

impl Texture {
    /// Create a new texture from pixel data.
    pub fn new(
        width: u32,
        height: u32,
        pixels: Vec<[u8; 4]>,
        path: impl Into<String>,
    ) -> TextureResult<Self> {
        if width == 0 || height == 0 {
            return Err(TextureError::Empty);
        }
        if pixels.len() != (width as usize) * (height as usize) {
            return Err(TextureError::SizeMismatch {
                width,
                height,
                actual: pixels.len(),
            });
        }

        Ok(Self {
            width,
            height,
            pixels,
            path: path.into(),
        })
    }

    /// Create a solid color texture (1x1).
    pub fn solid_color(rgba: [u8; 4]) -> Self {
        Self {
            width: 1,
            height: 1,
            pixels: vec![rgba],
            path: "<solid>".to_string(),
        }
    }

    /// Load a texture from any image format the `image` crate understands.
    pub fn load(path: impl AsRef<Path>) -> TextureResult<Self> {
        let path = path.as_ref();
        let img = image::open(path)?;

        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();
        let pixels: Vec<[u8; 4]> = rgba.pixels().map(|p| p.0).collect();

        log::debug!("Loaded texture: {} ({}x{})", path.display(), width, height);

        Self::new(width, height, pixels, path.to_string_lossy().to_string())
    }

    /// Texture width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Texture height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[[u8; 4]] {
        &self.pixels
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Get pixel at integer coordinates.
    pub fn texel(&self, x: u32, y: u32) -> [u8; 4] {
        let idx = (y * self.width + x) as usize;
        self.pixels[idx]
    }

    /// Nearest-neighbour lookup at texture coordinates.
    ///
    /// The texel is `(round(u * width), round(v * height))`, clamped to the
    /// valid index range. Coordinates outside [0, 1] therefore stick to the
    /// border instead of wrapping.
    pub fn sample_nearest(&self, u: f32, v: f32) -> [u8; 4] {
        let x = nearest_index(u, self.width);
        let y = nearest_index(v, self.height);
        self.texel(x, y)
    }

    /// Nearest-neighbour RGB lookup as floats in [0, 1].
    ///
    /// With `gamma_correct` each channel is linearised as `(raw / 255)^2.2`.
    pub fn color_at(&self, u: f32, v: f32, gamma_correct: bool) -> Vec3 {
        let [r, g, b, _] = self.sample_nearest(u, v);
        Vec3::new(
            decode_channel(r, gamma_correct),
            decode_channel(g, gamma_correct),
            decode_channel(b, gamma_correct),
        )
    }
}

/// Convert an 8-bit channel to a float in [0, 1], optionally linearised.
pub fn decode_channel(raw: u8, gamma_correct: bool) -> f32 {
    let value = raw as f32 / 255.0;
    if gamma_correct {
        value.powf(GAMMA)
    } else {
        value
    }
}

fn nearest_index(coord: f32, extent: u32) -> u32 {
    // max() maps NaN to 0
    let index = (coord * extent as f32).round().max(0.0) as u32;
    index.min(extent - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checker_2x2() -> Texture {
        Texture::new(
            2,
            2,
            vec![
                [255, 0, 0, 255],
                [0, 255, 0, 255],
                [0, 0, 255, 255],
                [255, 255, 255, 255],
            ],
            "<checker>",
        )
        .unwrap()
    }

    #[test]
    fn test_solid_color_texture() {
        let tex = Texture::solid_color([255, 128, 0, 255]);
        assert_eq!(tex.width(), 1);
        assert_eq!(tex.height(), 1);
        assert_eq!(tex.pixels().len(), 1);

        let sample = tex.color_at(0.5, 0.5, false);
        assert!((sample.x - 1.0).abs() < 0.001);
        assert!((sample.y - 128.0 / 255.0).abs() < 0.001);
        assert!((sample.z - 0.0).abs() < 0.001);
    }

    #[test]
    fn test_texture_size_validation() {
        assert!(matches!(
            Texture::new(2, 2, vec![[0; 4]; 3], "bad"),
            Err(TextureError::SizeMismatch { actual: 3, .. })
        ));
        assert!(matches!(
            Texture::new(0, 4, Vec::new(), "empty"),
            Err(TextureError::Empty)
        ));
    }

    #[test]
    fn test_every_texture_has_a_texel() {
        for (w, h) in [(0, 0), (0, 4), (4, 0)] {
            assert!(matches!(
                Texture::new(w, h, Vec::new(), "empty"),
                Err(TextureError::Empty)
            ));
        }

        // The smallest valid texture samples its only texel everywhere
        let tex = Texture::new(1, 1, vec![[9, 8, 7, 255]], "tiny").unwrap();
        assert_eq!(tex.sample_nearest(1e6, -1e6), [9, 8, 7, 255]);
        assert_eq!(tex.path(), "tiny");
    }

    #[test]
    fn test_sample_nearest_rounds_coordinates() {
        let tex = checker_2x2();

        // round(0.2 * 2) = 0, round(0.2 * 2) = 0
        assert_eq!(tex.sample_nearest(0.2, 0.2), [255, 0, 0, 255]);
        // round(0.3 * 2) = 1 on x only
        assert_eq!(tex.sample_nearest(0.3, 0.2), [0, 255, 0, 255]);
        // v selects the row
        assert_eq!(tex.sample_nearest(0.0, 0.4), [0, 0, 255, 255]);
    }

    #[test]
    fn test_sample_nearest_clamps_out_of_range() {
        let tex = checker_2x2();

        // u = v = 1 would index one past the end
        assert_eq!(tex.sample_nearest(1.0, 1.0), [255, 255, 255, 255]);
        assert_eq!(tex.sample_nearest(-3.0, -0.5), [255, 0, 0, 255]);
        assert_eq!(tex.sample_nearest(f32::NAN, 7.0), [0, 0, 255, 255]);
    }

    #[test]
    fn test_decode_channel() {
        assert_eq!(decode_channel(0, true), 0.0);
        assert!((decode_channel(255, true) - 1.0).abs() < 0.001);

        // Mid-gray is darker once linearised
        let mid = decode_channel(128, true);
        assert!((mid - (128.0_f32 / 255.0).powf(2.2)).abs() < 0.0001);
        assert!(mid < decode_channel(128, false));
    }

    #[test]
    fn test_load_missing_file_fails() {
        let result = Texture::load("does/not/exist.png");
        assert!(matches!(result, Err(TextureError::ImageError(_))));
    }
}
