//! Binary foreground mask
//!
//! A `BinaryImage` marks ink pixels (foreground) of a thresholded image.
//! It is an immutable value: the pixel algorithms in `psaltica-ops` take a
//! reference and return a freshly allocated result.

use crate::error::{Error, Result};

/// A binary image: width, height and a row-major boolean foreground mask.
///
/// Invariant: `mask.len() == width * height`, enforced by
/// [`BinaryImage::from_mask`]. Zero-sized images are valid and behave as
/// empty input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryImage {
    width: u32,
    height: u32,
    mask: Vec<bool>,
}

impl BinaryImage {
    /// Create a binary image from a row-major mask.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MaskSizeMismatch`] if `mask.len()` is not
    /// `width * height`.
    pub fn from_mask(width: u32, height: u32, mask: Vec<bool>) -> Result<Self> {
        let expected = width as usize * height as usize;
        if mask.len() != expected {
            return Err(Error::MaskSizeMismatch {
                expected,
                actual: mask.len(),
            });
        }
        Ok(BinaryImage {
            width,
            height,
            mask,
        })
    }

    /// Create an all-background image.
    pub fn blank(width: u32, height: u32) -> Self {
        BinaryImage {
            width,
            height,
            mask: vec![false; width as usize * height as usize],
        }
    }

    /// Build a binary image by evaluating `f(x, y)` for every pixel.
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> bool) -> Self {
        let mut mask = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                mask.push(f(x, y));
            }
        }
        BinaryImage {
            width,
            height,
            mask,
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

    /// True when either dimension is zero.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// The raw mask, row-major.
    #[inline]
    pub fn mask(&self) -> &[bool] {
        &self.mask
    }

    /// Foreground test at (x, y).
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are out of bounds.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> bool {
        debug_assert!(x < self.width && y < self.height);
        self.mask[y as usize * self.width as usize + x as usize]
    }

    /// Foreground test with signed coordinates; out-of-bounds reads as
    /// background. This is the boundary condition every neighborhood
    /// operation in the pipeline uses.
    #[inline]
    pub fn at(&self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return false;
        }
        self.mask[y as usize * self.width as usize + x as usize]
    }

    /// Count of foreground pixels.
    pub fn count_foreground(&self) -> usize {
        self.mask.iter().filter(|&&v| v).count()
    }

    /// Per-row foreground pixel counts, top to bottom.
    pub fn row_counts(&self) -> Vec<u32> {
        let w = self.width as usize;
        (0..self.height as usize)
            .map(|y| self.mask[y * w..(y + 1) * w].iter().filter(|&&v| v).count() as u32)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_mask_validates_length() {
        assert!(BinaryImage::from_mask(2, 3, vec![false; 6]).is_ok());
        assert!(BinaryImage::from_mask(2, 3, vec![false; 5]).is_err());
    }

    #[test]
    fn test_zero_sized_allowed() {
        let img = BinaryImage::from_mask(0, 0, Vec::new()).unwrap();
        assert!(img.is_empty());
        assert_eq!(img.count_foreground(), 0);
        assert!(img.row_counts().is_empty());
    }

    #[test]
    fn test_at_out_of_bounds_is_background() {
        let img = BinaryImage::from_fn(2, 2, |_, _| true);
        assert!(img.at(0, 0));
        assert!(!img.at(-1, 0));
        assert!(!img.at(0, 2));
        assert!(!img.at(2, 1));
    }

    #[test]
    fn test_row_counts() {
        let img = BinaryImage::from_fn(4, 3, |x, y| y == 1 && x < 3);
        assert_eq!(img.row_counts(), vec![0, 3, 0]);
        assert_eq!(img.count_foreground(), 3);
    }
}
