//! Global thresholding and binarization
//!
//! Two threshold estimators are provided:
//!
//! - [`estimate_threshold`]: mean luminance minus a fixed bias, for quick
//!   previews.
//! - [`estimate_adaptive_threshold`]: the midpoint of Otsu's threshold and
//!   the global mean, used by the recognition pipeline for both photographs
//!   and symbol templates.
//!
//! Ink is darker than paper, so [`binarize`] marks a pixel as foreground
//! when its luminance is at or below the threshold.

use psaltica_core::{BinaryImage, Raster};

const EMPTY_IMAGE_THRESHOLD: u8 = 128;

/// Estimate a global threshold as `mean luminance - 20`, clamped to
/// `[40, 210]`. An empty image yields 128.
pub fn estimate_threshold(image: &Raster) -> u8 {
    if image.is_empty() {
        return EMPTY_IMAGE_THRESHOLD;
    }
    let mut sum: u64 = 0;
    for y in 0..image.height() {
        for x in 0..image.width() {
            sum += image.luminance(x, y) as u64;
        }
    }
    let mean = (sum / image.len() as u64) as i32;
    (mean - 20).clamp(40, 210) as u8
}

/// Estimate a threshold as the midpoint of Otsu's threshold and the global
/// mean luminance, clamped to `[35, 220]`. An empty image yields 128.
///
/// The midpoint uses truncating integer division. Otsu ties resolve to the
/// lowest candidate threshold (ascending scan, strictly-greater updates);
/// when the histogram never splits (uniform images) the Otsu term stays at
/// its initial value of 128.
pub fn estimate_adaptive_threshold(image: &Raster) -> u8 {
    if image.is_empty() {
        return EMPTY_IMAGE_THRESHOLD;
    }
    let mut histogram = [0u32; 256];
    let mut sum: u64 = 0;
    for y in 0..image.height() {
        for x in 0..image.width() {
            let lum = image.luminance(x, y);
            histogram[lum as usize] += 1;
            sum += lum as u64;
        }
    }
    let mean = (sum / image.len() as u64) as i32;
    let otsu = otsu_threshold(&histogram, image.len());
    ((otsu + mean) / 2).clamp(35, 220) as u8
}

/// Binarize a raster: foreground iff luminance <= threshold.
pub fn binarize(image: &Raster, threshold: u8) -> BinaryImage {
    BinaryImage::from_fn(image.width(), image.height(), |x, y| {
        image.luminance(x, y) <= threshold
    })
}

/// Otsu's threshold over a 256-bin histogram: the split maximizing the
/// inter-class variance `wB * wF * (muB - muF)^2`.
fn otsu_threshold(histogram: &[u32; 256], total: usize) -> i32 {
    let mut sum_all: u64 = 0;
    for (value, &count) in histogram.iter().enumerate() {
        sum_all += value as u64 * count as u64;
    }

    let mut sum_background: u64 = 0;
    let mut weight_background: u64 = 0;
    let mut best_variance = -1.0f64;
    let mut best_threshold = 128i32;

    for (threshold, &count) in histogram.iter().enumerate() {
        weight_background += count as u64;
        if weight_background == 0 {
            continue;
        }
        let weight_foreground = total as u64 - weight_background;
        if weight_foreground == 0 {
            break;
        }
        sum_background += threshold as u64 * count as u64;

        let mean_background = sum_background as f64 / weight_background as f64;
        let mean_foreground = (sum_all - sum_background) as f64 / weight_foreground as f64;
        let diff = mean_background - mean_foreground;
        let variance = weight_background as f64 * weight_foreground as f64 * diff * diff;

        if variance > best_variance {
            best_variance = variance;
            best_threshold = threshold as i32;
        }
    }

    best_threshold
}
