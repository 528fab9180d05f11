//! Isolated-pixel denoising
//!
//! A single pass that clears interior foreground pixels with at most one
//! 8-connected foreground neighbor. Border pixels are left untouched, and
//! neighbor counts read the input mask, so pixels cleared by the pass do
//! not cascade within it.

use psaltica_core::BinaryImage;

/// Remove isolated foreground specks (<= 1 of 8 neighbors set).
pub fn denoise(binary: &BinaryImage) -> BinaryImage {
    let width = binary.width() as i32;
    let height = binary.height() as i32;
    let mut mask = binary.mask().to_vec();

    for y in 1..height - 1 {
        for x in 1..width - 1 {
            if !binary.at(x, y) {
                continue;
            }
            let mut neighbors = 0;
            for ny in y - 1..=y + 1 {
                for nx in x - 1..=x + 1 {
                    if nx == x && ny == y {
                        continue;
                    }
                    if binary.at(nx, ny) {
                        neighbors += 1;
                    }
                }
            }
            if neighbors <= 1 {
                mask[(y * width + x) as usize] = false;
            }
        }
    }

    BinaryImage::from_mask(binary.width(), binary.height(), mask)
        .unwrap_or_else(|_| binary.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_removes_isolated_pixel() {
        let img = BinaryImage::from_fn(5, 5, |x, y| x == 2 && y == 2);
        let out = denoise(&img);
        assert_eq!(out.count_foreground(), 0);
    }

    #[test]
    fn test_keeps_connected_pixels() {
        // A horizontal 3-run: the middle pixel has two neighbors, the inner
        // endpoints one each... endpoints at x=1 and x=3 each have exactly
        // one neighbor and get cleared, the center survives.
        let img = BinaryImage::from_fn(5, 5, |x, y| y == 2 && (1..=3).contains(&x));
        let out = denoise(&img);
        assert!(out.get(2, 2));
        assert!(!out.get(1, 2));
        assert!(!out.get(3, 2));
    }

    #[test]
    fn test_border_untouched() {
        let img = BinaryImage::from_fn(5, 5, |x, y| x == 0 && y == 0);
        let out = denoise(&img);
        assert!(out.get(0, 0));
    }

    #[test]
    fn test_second_pass_is_identity() {
        // Blocks plus an isolated speck: one pass clears the speck, and the
        // blocks keep >= 3 neighbors each, so a second pass changes nothing.
        let img = BinaryImage::from_fn(9, 9, |x, y| {
            let block_a = (2..=3).contains(&x) && (2..=3).contains(&y);
            let block_b = (6..=7).contains(&x) && (5..=6).contains(&y);
            block_a || block_b || (x == 5 && y == 1)
        });
        let once = denoise(&img);
        assert!(!once.get(5, 1));
        let twice = denoise(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_tiny_images_pass_through() {
        let img = BinaryImage::from_fn(2, 2, |_, _| true);
        assert_eq!(denoise(&img), img);
        let empty = BinaryImage::blank(0, 0);
        assert_eq!(denoise(&empty), empty);
    }
}
