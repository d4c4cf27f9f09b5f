//! Image buffer for render output.

use std::path::Path;

use image::{ColorType, ImageFormat};
use lumen_math::Interval;

use crate::{Color, RenderError};

/// Row-major RGB buffer. Row 0 is the top of the picture.
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
}

impl Image {
    /// Create a new image filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; (width * height) as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn aspect_ratio(&self) -> f64 {
        self.width as f64 / self.height as f64
    }

    /// Set the pixel at (`row`, `col`), clamping each channel to [0, 1].
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are outside the image.
    pub fn set_pixel(&mut self, row: u32, col: u32, color: Color) {
        let index = self.index(row, col);
        self.pixels[index] = color.clamp(Color::ZERO, Color::ONE);
    }

    /// Get the pixel at (`row`, `col`).
    pub fn get_pixel(&self, row: u32, col: u32) -> Color {
        self.pixels[self.index(row, col)]
    }

    /// Convert to opaque 8-bit RGBA bytes, row by row.
    pub fn to_rgba8(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 4);
        for color in &self.pixels {
            bytes.extend_from_slice(&color_to_rgba(*color));
        }
        bytes
    }

    /// Encode the image as PNG at `path`.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), RenderError> {
        let path = path.as_ref();
        image::save_buffer_with_format(
            path,
            &self.to_rgba8(),
            self.width,
            self.height,
            ColorType::Rgba8,
            ImageFormat::Png,
        )
        .map_err(|source| RenderError::Encode {
            path: path.to_path_buf(),
            source,
        })
    }

    fn index(&self, row: u32, col: u32) -> usize {
        assert!(
            row < self.height && col < self.width,
            "pixel ({row}, {col}) outside {}x{} image",
            self.width,
            self.height
        );
        (row * self.width + col) as usize
    }
}

/// Convert a color to 8-bit RGBA with full alpha.
pub fn color_to_rgba(color: Color) -> [u8; 4] {
    let r = (255.999 * Interval::UNIT.clamp(color.x)) as u8;
    let g = (255.999 * Interval::UNIT.clamp(color.y)) as u8;
    let b = (255.999 * Interval::UNIT.clamp(color.z)) as u8;
    [r, g, b, 255]
}
