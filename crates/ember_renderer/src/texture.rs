//! Surface textures: solid colors, checkers, noise and image maps.

use std::path::Path;
use std::sync::Arc;

use crate::{Color, Perlin};
use ember_math::{Interval, Point3};
use thiserror::Error;

/// Errors that can occur during texture loading.
#[derive(Error, Debug)]
pub enum TextureError {
    #[error("Failed to load texture: {0}")]
    Load(String),

    #[error("Image decoding error: {0}")]
    Image(#[from] image::ImageError),
}

pub type TextureResult<T> = Result<T, TextureError>;

/// Number of octaves summed by [`Texture::Noise`].
const TURBULENCE_DEPTH: u32 = 7;

/// Color returned by an image texture with no pixel data.
const DEBUG_CYAN: Color = Color::new(0.0, 1.0, 1.0);

/// Surface appearance, evaluated per hit at `(u, v, p)`.
#[derive(Debug, Clone)]
pub enum Texture {
    /// Constant color.
    Solid(Color),
    /// 3D checker pattern alternating between two textures.
    Checker { even: Arc<Texture>, odd: Arc<Texture> },
    /// Marble-like pattern driven by Perlin turbulence.
    Noise { perlin: Perlin, scale: f32 },
    /// Decoded RGB8 image sampled by texture coordinates.
    Image(ImageTexture),
}

impl Texture {
    pub fn solid(color: Color) -> Self {
        Texture::Solid(color)
    }

    pub fn checker(even: Color, odd: Color) -> Self {
        Texture::Checker {
            even: Arc::new(Texture::Solid(even)),
            odd: Arc::new(Texture::Solid(odd)),
        }
    }

    pub fn noise(perlin: Perlin, scale: f32) -> Self {
        Texture::Noise { perlin, scale }
    }

    /// Image texture from a PNG path; falls back to the cyan debug texture.
    pub fn image(path: impl AsRef<Path>) -> Self {
        Texture::Image(ImageTexture::open(path))
    }

    /// Texture color at surface coordinates `(u, v)` and hit point `p`.
    pub fn value(&self, u: f32, v: f32, p: Point3) -> Color {
        match self {
            Texture::Solid(color) => *color,
            Texture::Checker { even, odd } => {
                let sines = (10.0 * p.x).sin() * (10.0 * p.y).sin() * (10.0 * p.z).sin();
                if sines < 0.0 {
                    odd.value(u, v, p)
                } else {
                    even.value(u, v, p)
                }
            }
            Texture::Noise { perlin, scale } => {
                let phase = scale * p.z + 10.0 * perlin.turb(p, TURBULENCE_DEPTH);
                Color::ONE * 0.5 * (1.0 + phase.sin())
            }
            Texture::Image(image) => image.value(u, v),
        }
    }
}

impl From<Color> for Texture {
    fn from(color: Color) -> Self {
        Texture::Solid(color)
    }
}

/// A decoded RGB8 image.
///
/// An image with zero width or height samples as solid cyan, which makes a
/// missing texture file obvious in the render without stopping it.
#[derive(Debug, Clone, Default)]
pub struct ImageTexture {
    data: Vec<u8>,
    width: u32,
    height: u32,
}

impl ImageTexture {
    const BYTES_PER_PIXEL: usize = 3;

    /// Decode an image file into RGB8.
    pub fn load(path: impl AsRef<Path>) -> TextureResult<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(TextureError::Load(format!("{} is not a file", path.display())));
        }
        let img = image::open(path)?.to_rgb8();
        let (width, height) = img.dimensions();

        log::debug!("Loaded texture: {} ({}x{})", path.display(), width, height);

        Ok(Self {
            data: img.into_raw(),
            width,
            height,
        })
    }

    /// Like [`ImageTexture::load`], but logs the failure and returns an
    /// empty texture instead of an error.
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(texture) => texture,
            Err(e) => {
                log::warn!("Could not load texture image file '{}': {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Wrap raw RGB8 bytes. Returns `None` if the length doesn't match.
    pub fn from_rgb8(width: u32, height: u32, data: Vec<u8>) -> Option<Self> {
        let expected = width as usize * height as usize * Self::BYTES_PER_PIXEL;
        (data.len() == expected).then_some(Self { data, width, height })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Nearest-pixel lookup; `v = 0` is the bottom row of the image.
    pub fn value(&self, u: f32, v: f32) -> Color {
        if self.is_empty() {
            return DEBUG_CYAN;
        }

        let unit = Interval::new(0.0, 1.0);
        let u = unit.clamp(u);
        let v = 1.0 - unit.clamp(v);

        let i = ((u * self.width as f32) as u32).min(self.width - 1) as usize;
        let j = ((v * self.height as f32) as u32).min(self.height - 1) as usize;

        let offset = (j * self.width as usize + i) * Self::BYTES_PER_PIXEL;
        let pixel = &self.data[offset..offset + Self::BYTES_PER_PIXEL];

        let color_scale = 1.0 / 255.0;
        Color::new(
            color_scale * pixel[0] as f32,
            color_scale * pixel[1] as f32,
            color_scale * pixel[2] as f32,
        )
    }
}
