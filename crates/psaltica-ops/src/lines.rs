//! Staff line isolation
//!
//! Finds the first horizontal band of rows dense enough to be a notation
//! line. Rows qualify when their foreground count reaches an adaptive
//! threshold; the first maximal run of at least six qualifying rows is the
//! line. The returned rectangle is padded and horizontally tightened to
//! the foreground actually present in the band.

use psaltica_core::{BinaryImage, Rect};

/// Minimum height, in rows, for a run of qualifying rows to count as a line.
const MIN_LINE_HEIGHT: i32 = 6;
/// Vertical padding added above and below the detected run.
const VERTICAL_PAD: i32 = 8;
/// Horizontal padding: 8 left, 9 right (historical asymmetry kept so crops
/// line up with previously recorded results).
const LEFT_PAD: i32 = 8;
const RIGHT_PAD: i32 = 9;

/// Detect the bounding rectangle of the first staff-like line.
///
/// Falls back to the full frame when no run qualifies, and to the full
/// width when the detected band contains no foreground.
pub fn first_line_rect(binary: &BinaryImage) -> Rect {
    let width = binary.width() as i32;
    let height = binary.height() as i32;
    let row_counts = binary.row_counts();

    let row_threshold = (width / 90).max(3) as u32;

    // Maximal runs of qualifying rows, in order.
    let mut runs: Vec<(i32, i32)> = Vec::new();
    let mut start: i32 = -1;
    for (y, &count) in row_counts.iter().enumerate() {
        if count >= row_threshold {
            if start < 0 {
                start = y as i32;
            }
        } else if start >= 0 {
            runs.push((start, y as i32 - 1));
            start = -1;
        }
    }
    if start >= 0 {
        runs.push((start, height - 1));
    }

    let Some(&(first, last)) = runs
        .iter()
        .find(|(first, last)| last - first + 1 >= MIN_LINE_HEIGHT)
    else {
        return Rect::of_size(binary.width(), binary.height());
    };

    let top = (first - VERTICAL_PAD).max(0);
    let bottom = (last + VERTICAL_PAD).min(height - 1);

    let mut min_x = width;
    let mut max_x = -1;
    for y in top..=bottom {
        for x in 0..width {
            if binary.at(x, y) {
                if x < min_x {
                    min_x = x;
                }
                if x > max_x {
                    max_x = x;
                }
            }
        }
    }

    if max_x < min_x {
        return Rect::from_edges(0, top, width, bottom + 1);
    }
    let left = (min_x - LEFT_PAD).max(0);
    let right = (max_x + RIGHT_PAD).min(width);
    Rect::from_edges(left, top, right, bottom + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_first_qualifying_band() {
        // 100x60 image with a dense band at rows 20..=29, x 30..=69.
        let img = BinaryImage::from_fn(100, 60, |x, y| {
            (20..=29).contains(&y) && (30..=69).contains(&x)
        });
        let rect = first_line_rect(&img);
        assert_eq!(rect.y, 12); // 20 - 8
        assert_eq!(rect.bottom(), 38); // 29 + 8 + 1
        assert_eq!(rect.x, 22); // 30 - 8
        assert_eq!(rect.right(), 78); // 69 + 9, exclusive, inside the frame
    }

    #[test]
    fn test_short_runs_are_skipped() {
        // A 3-row smudge above a 8-row line: the line wins.
        let img = BinaryImage::from_fn(90, 60, |x, y| {
            let smudge = (5..=7).contains(&y) && x < 50;
            let line = (30..=37).contains(&y) && x < 50;
            smudge || line
        });
        let rect = first_line_rect(&img);
        assert_eq!(rect.y, 22); // 30 - 8
    }

    #[test]
    fn test_no_line_falls_back_to_full_frame() {
        let img = BinaryImage::blank(40, 30);
        assert_eq!(first_line_rect(&img), Rect::of_size(40, 30));
    }

    #[test]
    fn test_padding_clamps_at_borders() {
        let img = BinaryImage::from_fn(50, 20, |x, y| y < 7 && x < 50);
        let rect = first_line_rect(&img);
        assert_eq!(rect.y, 0);
        assert_eq!(rect.x, 0);
        assert_eq!(rect.right(), 50);
        assert_eq!(rect.bottom(), 15); // last row 6 + pad 8, exclusive edge
    }
}
