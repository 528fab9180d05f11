//! RGBA raster image
//!
//! `Raster` is the input side of the pipeline: a photographed page, a
//! rotated/downscaled intermediate, or a decoded symbol template. Pixels
//! are stored row-major as 4 bytes each (R, G, B, A).

use crate::error::{Error, Result};

/// An RGBA8 image, row-major, 4 bytes per pixel.
///
/// Degenerate 0-sized rasters are allowed; pixel algorithms treat them as
/// empty input rather than erroring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Raster {
    /// Create a raster from raw RGBA bytes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BufferSizeMismatch`] if `data.len()` is not
    /// `width * height * 4`.
    pub fn from_rgba8(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        let expected = width as usize * height as usize * 4;
        if data.len() != expected {
            return Err(Error::BufferSizeMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Raster {
            width,
            height,
            data,
        })
    }

    /// Create a raster filled with a single RGBA color.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let mut data = Vec::with_capacity(width as usize * height as usize * 4);
        for _ in 0..width as usize * height as usize {
            data.extend_from_slice(&rgba);
        }
        Raster {
            width,
            height,
            data,
        }
    }

    /// Build a raster by evaluating `f(x, y)` for every pixel.
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> [u8; 4]) -> Self {
        let mut data = Vec::with_capacity(width as usize * height as usize * 4);
        for y in 0..height {
            for x in 0..width {
                data.extend_from_slice(&f(x, y));
            }
        }
        Raster {
            width,
            height,
            data,
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Total pixel count.
    #[inline]
    pub fn len(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// True when either dimension is zero.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Raw RGBA bytes.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Get the RGBA value at (x, y).
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are out of bounds.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        debug_assert!(x < self.width && y < self.height);
        let i = (y as usize * self.width as usize + x as usize) * 4;
        [self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3]]
    }

    /// Integer luminance of the pixel at (x, y).
    ///
    /// Uses the BT.601 weights `0.299 R + 0.587 G + 0.114 B`, truncated to
    /// an integer. Alpha is ignored.
    #[inline]
    pub fn luminance(&self, x: u32, y: u32) -> u8 {
        let [r, g, b, _] = self.pixel(x, y);
        luminance_rgb(r, g, b)
    }
}

/// Truncated BT.601 luminance of an RGB triple.
#[inline]
pub(crate) fn luminance_rgb(r: u8, g: u8, b: u8) -> u8 {
    (0.299f32 * r as f32 + 0.587f32 * g as f32 + 0.114f32 * b as f32) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rgba8_validates_length() {
        assert!(Raster::from_rgba8(2, 2, vec![0u8; 16]).is_ok());
        assert!(Raster::from_rgba8(2, 2, vec![0u8; 15]).is_err());
    }

    #[test]
    fn test_pixel_access() {
        let r = Raster::from_fn(3, 2, |x, y| [x as u8, y as u8, 7, 255]);
        assert_eq!(r.pixel(2, 1), [2, 1, 7, 255]);
        assert_eq!(r.len(), 6);
        assert!(!r.is_empty());
    }

    #[test]
    fn test_luminance_truncates() {
        // 0.299*100 + 0.587*100 + 0.114*100 = 100.0 exactly
        let r = Raster::filled(1, 1, [100, 100, 100, 255]);
        assert_eq!(r.luminance(0, 0), 100);
        // 0.299*255 = 76.245 -> 76
        let r = Raster::filled(1, 1, [255, 0, 0, 255]);
        assert_eq!(r.luminance(0, 0), 76);
    }

    #[test]
    fn test_degenerate_raster() {
        let r = Raster::filled(0, 5, [0, 0, 0, 0]);
        assert!(r.is_empty());
        assert_eq!(r.len(), 0);
    }
}
