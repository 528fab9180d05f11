//! Glyph grouping
//!
//! A handwritten neume group (base plus its stacked modifiers) usually
//! splits into several connected components. Components are regrouped by
//! horizontal gap: the split threshold adapts to the line's median
//! component width, floored so that thin ornaments on a sparse line do not
//! collapse everything into one group.

use psaltica_core::Rect;

/// Smallest gap that can separate two groups, in pixels.
const MIN_GAP: i32 = 6;
/// Gap threshold as a fraction of the median component width.
const GAP_MEDIAN_FACTOR: f32 = 0.65;
/// Floor for the median width before the factor applies.
const MIN_MEDIAN_WIDTH: f32 = 8.0;

/// Partition component rects into glyph groups by horizontal gap.
///
/// A component whose left edge is within the gap threshold of the current
/// group's right-most edge (inclusive) joins that group; otherwise it opens
/// a new one. Output groups and their members are ordered left to right.
pub fn group_by_gap(components: &[Rect]) -> Vec<Vec<Rect>> {
    if components.is_empty() {
        return Vec::new();
    }

    let mut sorted: Vec<Rect> = components.to_vec();
    sorted.sort_by_key(|r| r.x);

    let mut widths: Vec<u32> = sorted.iter().map(|r| r.width).collect();
    widths.sort_unstable();
    let median = (widths[widths.len() / 2] as f32).max(MIN_MEDIAN_WIDTH);
    let gap_threshold = MIN_GAP.max((GAP_MEDIAN_FACTOR * median) as i32);

    let mut groups: Vec<Vec<Rect>> = Vec::new();
    let mut current: Vec<Rect> = vec![sorted[0]];
    let mut max_right = sorted[0].right();

    for &rect in &sorted[1..] {
        if rect.x - max_right <= gap_threshold {
            current.push(rect);
        } else {
            groups.push(std::mem::take(&mut current));
            current.push(rect);
        }
        max_right = max_right.max(rect.right());
    }
    groups.push(current);
    groups
}
