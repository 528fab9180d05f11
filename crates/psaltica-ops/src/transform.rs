//! Cropping, scaling, normalization and rotation
//!
//! Binary crops and the square normalization feed template matching;
//! the raster transforms (bilinear resize, small-angle rotation, final
//! display crop) serve the analyzer's preprocessing stage.
//!
//! Normalization and the foreground similarity score only make sense
//! together: both candidate patches and templates are centered on the same
//! square canvas with the same margin before comparison.

use psaltica_core::{BinaryImage, Raster, Rect};

/// Margin left around normalized content inside the square canvas.
const NORMALIZE_MARGIN: u32 = 8;

const WHITE: [u8; 4] = [255, 255, 255, 255];

/// Copy the pixels of `rect` (clamped to the frame) into a new image.
///
/// A rectangle entirely outside the frame yields a zero-sized image.
pub fn crop(binary: &BinaryImage, rect: &Rect) -> BinaryImage {
    let r = rect.clamp_to(binary.width(), binary.height());
    BinaryImage::from_fn(r.width, r.height, |x, y| {
        binary.get(r.x as u32 + x, r.y as u32 + y)
    })
}

/// Scale a binary image onto a `target` x `target` canvas.
///
/// The content is scaled uniformly (aspect preserved, upscaling allowed) so
/// its larger side fits within `target - 8`, resampled nearest-neighbor and
/// centered by integer offset. Degenerate input produces a blank canvas.
pub fn normalize(binary: &BinaryImage, target: u32) -> BinaryImage {
    if target == 0 {
        return BinaryImage::blank(0, 0);
    }
    if binary.is_empty() {
        return BinaryImage::blank(target, target);
    }

    let inner = target as f32 - NORMALIZE_MARGIN as f32;
    let scale = (inner / binary.width() as f32).min(inner / binary.height() as f32);
    let scaled_w = ((binary.width() as f32 * scale) as i32).max(1) as u32;
    let scaled_h = ((binary.height() as f32 * scale) as i32).max(1) as u32;

    let offset_x = (target as i32 - scaled_w as i32) / 2;
    let offset_y = (target as i32 - scaled_h as i32) / 2;

    let mut mask = vec![false; target as usize * target as usize];
    for y in 0..scaled_h {
        for x in 0..scaled_w {
            let src_x = ((x as f32 / scaled_w as f32) * binary.width() as f32) as i32;
            let src_y = ((y as f32 / scaled_h as f32) * binary.height() as f32) as i32;
            let src_x = src_x.clamp(0, binary.width() as i32 - 1);
            let src_y = src_y.clamp(0, binary.height() as i32 - 1);
            if binary.at(src_x, src_y) {
                let ox = offset_x + x as i32;
                let oy = offset_y + y as i32;
                mask[oy as usize * target as usize + ox as usize] = true;
            }
        }
    }
    BinaryImage::from_mask(target, target, mask)
        .unwrap_or_else(|_| BinaryImage::blank(target, target))
}

/// Bilinear sample with white padding outside the frame.
fn sample_bilinear(image: &Raster, fx: f32, fy: f32) -> [u8; 4] {
    let x0 = fx.floor() as i32;
    let y0 = fy.floor() as i32;
    let tx = fx - x0 as f32;
    let ty = fy - y0 as f32;

    let tap = |x: i32, y: i32| -> [u8; 4] {
        if x < 0 || y < 0 || x >= image.width() as i32 || y >= image.height() as i32 {
            WHITE
        } else {
            image.pixel(x as u32, y as u32)
        }
    };

    let (p00, p10, p01, p11) = (tap(x0, y0), tap(x0 + 1, y0), tap(x0, y0 + 1), tap(x0 + 1, y0 + 1));
    let mut out = [0u8; 4];
    for c in 0..4 {
        let top = p00[c] as f32 * (1.0 - tx) + p10[c] as f32 * tx;
        let bottom = p01[c] as f32 * (1.0 - tx) + p11[c] as f32 * tx;
        out[c] = (top * (1.0 - ty) + bottom * ty).round().clamp(0.0, 255.0) as u8;
    }
    out
}

/// Resize a raster to the given dimensions with bilinear interpolation.
pub fn resize_bilinear(image: &Raster, width: u32, height: u32) -> Raster {
    if image.is_empty() || width == 0 || height == 0 {
        return Raster::filled(width, height, WHITE);
    }
    let sx = image.width() as f32 / width as f32;
    let sy = image.height() as f32 / height as f32;
    Raster::from_fn(width, height, |x, y| {
        let fx = (x as f32 + 0.5) * sx - 0.5;
        let fy = (y as f32 + 0.5) * sy - 0.5;
        sample_bilinear(image, fx, fy)
    })
}

/// Rotate a raster about its center by `degrees`, growing the canvas to
/// fit and filling uncovered corners with white. Angles below 1e-4 degrees
/// return the input unchanged.
pub fn rotate_raster(image: &Raster, degrees: f32) -> Raster {
    if degrees.abs() < 1e-4 || image.is_empty() {
        return image.clone();
    }
    let radians = degrees.to_radians();
    let (sin, cos) = radians.sin_cos();
    let w = image.width() as f32;
    let h = image.height() as f32;
    let out_w = (w * cos.abs() + h * sin.abs()).ceil() as u32;
    let out_h = (w * sin.abs() + h * cos.abs()).ceil() as u32;

    let (ocx, ocy) = (out_w as f32 / 2.0, out_h as f32 / 2.0);
    let (icx, icy) = (w / 2.0, h / 2.0);

    Raster::from_fn(out_w, out_h, |x, y| {
        let dx = x as f32 + 0.5 - ocx;
        let dy = y as f32 + 0.5 - ocy;
        // Inverse rotation back into source coordinates.
        let fx = cos * dx + sin * dy + icx - 0.5;
        let fy = -sin * dx + cos * dy + icy - 0.5;
        sample_bilinear(image, fx, fy)
    })
}

/// Crop a raster to `rect`, clamped to the frame and at least 1x1.
pub fn crop_raster(image: &Raster, rect: &Rect) -> Raster {
    if image.is_empty() {
        return Raster::filled(1, 1, WHITE);
    }
    let mut r = rect.clamp_to(image.width(), image.height());
    if r.is_empty() {
        let x = rect.x.clamp(0, image.width() as i32 - 1);
        let y = rect.y.clamp(0, image.height() as i32 - 1);
        r = Rect::new(x, y, 1, 1);
    }
    Raster::from_fn(r.width, r.height, |x, y| {
        image.pixel(r.x as u32 + x, r.y as u32 + y)
    })
}
