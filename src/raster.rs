//! BGR raster view over decoded source images.
//!
//! The tilization kernel consumes pixels in BGR order. Decoding goes
//! through the `image` crate; whatever the source format, pixels are
//! normalized to 8-bit BGR here. The kernel only ever borrows a raster.

use std::path::Path;

use image::RgbImage;

use crate::error::{Result, TileError};
use crate::platform::Bgr;

/// A dense row-major grid of BGR pixels.
#[derive(Debug, Clone)]
pub struct Raster {
    width: usize,
    height: usize,
    pixels: Vec<Bgr>,
}

impl Raster {
    /// Decode an image file into a raster. Decode failures are input
    /// errors; the caller skips the resource and continues.
    pub fn load(path: &Path) -> Result<Self> {
        let img = image::open(path).map_err(|e| TileError::Image {
            path: path.to_path_buf(),
            message: format!("Failed to decode: {}", e),
        })?;
        Ok(Self::from_rgb(&img.to_rgb8()))
    }

    /// Wrap a decoded RGB image.
    pub fn from_rgb(img: &RgbImage) -> Self {
        let width = img.width() as usize;
        let height = img.height() as usize;
        let pixels = img
            .pixels()
            .map(|p| Bgr::from_rgb([p.0[0], p.0[1], p.0[2]]))
            .collect();
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Build a raster from raw pixels. `pixels` is row-major and must hold
    /// exactly `width * height` entries.
    pub fn from_pixels(width: usize, height: usize, pixels: Vec<Bgr>) -> Self {
        assert_eq!(pixels.len(), width * height);
        Self {
            width,
            height,
            pixels,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, x: usize, y: usize) -> Bgr {
        self.pixels[y * self.width + x]
    }

    pub fn pixels(&self) -> &[Bgr] {
        &self.pixels
    }
}
