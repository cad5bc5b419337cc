//! A 2D debug image represented as a flat array of RGBA pixels.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Errors that can occur when exporting a debug image.
#[derive(Debug, thiserror::Error)]
pub enum DebugImageError {
    /// Failed to create or write the output file.
    #[error("failed to write debug image: {0}")]
    Io(#[from] std::io::Error),

    /// PNG encoding failed.
    #[error("failed to encode debug image: {0}")]
    Encode(#[from] png::EncodingError),
}

/// A 2D debug image for terrain visualization, stored as row-major RGBA pixels.
#[derive(Clone, Debug)]
pub struct DebugImage {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Pixel data in row-major RGBA format. Length = `width * height * 4`.
    pub pixels: Vec<u8>,
}

impl DebugImage {
    /// Create a new black (all-zero) image with the given dimensions.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width as usize * height as usize * 4],
        }
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * 4
    }

    /// Set a single pixel's RGBA value.
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`.
    pub fn set_pixel(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        assert!(x < self.width && y < self.height, "pixel ({x}, {y}) out of bounds");
        let idx = self.offset(x, y);
        self.pixels[idx..idx + 4].copy_from_slice(&rgba);
    }

    /// Get a pixel's RGBA value.
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`.
    pub fn get_pixel(&self, x: u32, y: u32) -> [u8; 4] {
        assert!(x < self.width && y < self.height, "pixel ({x}, {y}) out of bounds");
        let idx = self.offset(x, y);
        [
            self.pixels[idx],
            self.pixels[idx + 1],
            self.pixels[idx + 2],
            self.pixels[idx + 3],
        ]
    }

    /// Returns `(width, height)`.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Encode as an 8-bit RGBA PNG into `writer`.
    pub fn encode_png<W: Write>(&self, writer: W) -> Result<(), DebugImageError> {
        let mut encoder = png::Encoder::new(writer, self.width, self.height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header()?;
        writer.write_image_data(&self.pixels)?;
        writer.finish()?;
        Ok(())
    }

    /// Write the image to `path` as a PNG file.
    pub fn write_png(&self, path: &Path) -> Result<(), DebugImageError> {
        let file = File::create(path)?;
        self.encode_png(BufWriter::new(file))?;
        tracing::info!(path = %path.display(), "wrote debug image");
        Ok(())
    }
}
