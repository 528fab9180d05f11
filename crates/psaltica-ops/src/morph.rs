//! Binary morphology with a full 3x3 structuring element
//!
//! Dilation sets a pixel when any of the nine cells of its neighborhood
//! (itself included) is set; erosion only when all nine are, with
//! out-of-bounds cells reading as background. This gives the asymmetric
//! boundary condition the pipeline relies on: erosion clears the one-pixel
//! border ring, dilation never reaches past the frame.

use psaltica_core::BinaryImage;

/// Dilate with the full 3x3 neighborhood.
pub fn dilate(binary: &BinaryImage) -> BinaryImage {
    BinaryImage::from_fn(binary.width(), binary.height(), |x, y| {
        let (x, y) = (x as i32, y as i32);
        for ny in y - 1..=y + 1 {
            for nx in x - 1..=x + 1 {
                if binary.at(nx, ny) {
                    return true;
                }
            }
        }
        false
    })
}

/// Erode with the full 3x3 neighborhood; out-of-bounds is background.
pub fn erode(binary: &BinaryImage) -> BinaryImage {
    BinaryImage::from_fn(binary.width(), binary.height(), |x, y| {
        let (x, y) = (x as i32, y as i32);
        for ny in y - 1..=y + 1 {
            for nx in x - 1..=x + 1 {
                if !binary.at(nx, ny) {
                    return false;
                }
            }
        }
        true
    })
}

/// Morphological close: dilate then erode. Fills single-pixel gaps.
pub fn close(binary: &BinaryImage) -> BinaryImage {
    erode(&dilate(binary))
}

/// Morphological open: erode then dilate. Removes single-pixel spurs.
pub fn open(binary: &BinaryImage) -> BinaryImage {
    dilate(&erode(binary))
}

/// Close followed by open, the pipeline's standard cleanup step.
pub fn close_open(binary: &BinaryImage) -> BinaryImage {
    open(&close(binary))
}
