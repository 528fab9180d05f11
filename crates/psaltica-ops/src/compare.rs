//! Binary image similarity
//!
//! Template matching scores candidate patches with the F1 measure over
//! foreground pixels: precision and recall of `a`'s ink against `b`'s.
//! Symmetric, in [0, 1], and deliberately strict about the degenerate
//! cases: mismatched dimensions, an inkless side or a disjoint overlap all
//! score zero rather than something "close".

use psaltica_core::BinaryImage;

/// F1 score of the foreground overlap between two equally sized masks.
pub fn foreground_f1(a: &BinaryImage, b: &BinaryImage) -> f32 {
    if a.width() != b.width() || a.height() != b.height() {
        return 0.0;
    }
    let mut intersection = 0u64;
    let mut a_count = 0u64;
    let mut b_count = 0u64;
    for (&av, &bv) in a.mask().iter().zip(b.mask().iter()) {
        if av {
            a_count += 1;
        }
        if bv {
            b_count += 1;
        }
        if av && bv {
            intersection += 1;
        }
    }
    if a_count == 0 || b_count == 0 || intersection == 0 {
        return 0.0;
    }
    let precision = intersection as f32 / a_count as f32;
    let recall = intersection as f32 / b_count as f32;
    (2.0 * precision * recall) / (precision + recall)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_images_score_one() {
        let img = BinaryImage::from_fn(8, 8, |x, y| (x + y) % 3 == 0);
        assert_eq!(foreground_f1(&img, &img), 1.0);
    }

    #[test]
    fn test_disjoint_foregrounds_score_zero() {
        let a = BinaryImage::from_fn(8, 8, |x, _| x < 4);
        let b = BinaryImage::from_fn(8, 8, |x, _| x >= 4);
        assert_eq!(foreground_f1(&a, &b), 0.0);
    }

    #[test]
    fn test_dimension_mismatch_scores_zero() {
        let a = BinaryImage::from_fn(8, 8, |_, _| true);
        let b = BinaryImage::from_fn(8, 7, |_, _| true);
        assert_eq!(foreground_f1(&a, &b), 0.0);
    }

    #[test]
    fn test_empty_foreground_scores_zero() {
        let a = BinaryImage::blank(8, 8);
        let b = BinaryImage::from_fn(8, 8, |_, _| true);
        assert_eq!(foreground_f1(&a, &b), 0.0);
        assert_eq!(foreground_f1(&b, &a), 0.0);
    }

    #[test]
    fn test_partial_overlap() {
        // a covers 4 columns, b covers 2 of them: P = 0.5, R = 1.0.
        let a = BinaryImage::from_fn(4, 1, |_, _| true);
        let b = BinaryImage::from_fn(4, 1, |x, _| x < 2);
        let score = foreground_f1(&a, &b);
        assert!((score - 2.0 / 3.0).abs() < 1e-6);
    }
}
