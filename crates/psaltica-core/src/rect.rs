//! Axis-aligned pixel rectangle
//!
//! Used for detected line bands, connected-component bounds and event
//! bounding boxes. `x`/`y` are signed so padded rectangles can be clamped
//! without underflow; `right()`/`bottom()` are exclusive.

/// An axis-aligned rectangle in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    /// Create a rectangle from its top-left corner and size.
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Rect {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a rectangle from inclusive-left/top, exclusive-right/bottom
    /// edges. Edges in the wrong order produce a zero-sized rectangle.
    pub fn from_edges(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Rect {
            x: left,
            y: top,
            width: (right - left).max(0) as u32,
            height: (bottom - top).max(0) as u32,
        }
    }

    /// The full frame of an image with the given dimensions.
    pub const fn of_size(width: u32, height: u32) -> Self {
        Rect {
            x: 0,
            y: 0,
            width,
            height,
        }
    }

    /// Exclusive right edge.
    #[inline]
    pub const fn right(&self) -> i32 {
        self.x + self.width as i32
    }

    /// Exclusive bottom edge.
    #[inline]
    pub const fn bottom(&self) -> i32 {
        self.y + self.height as i32
    }

    /// Pixel area of the rectangle.
    #[inline]
    pub const fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// True when the rectangle encloses no pixels.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Smallest rectangle containing both `self` and `other`.
    pub fn union(&self, other: &Rect) -> Rect {
        Rect::from_edges(
            self.x.min(other.x),
            self.y.min(other.y),
            self.right().max(other.right()),
            self.bottom().max(other.bottom()),
        )
    }

    /// Intersection with the frame of a `width` x `height` image. May be
    /// zero-sized when the rectangle lies outside the frame.
    pub fn clamp_to(&self, width: u32, height: u32) -> Rect {
        Rect::from_edges(
            self.x.max(0),
            self.y.max(0),
            self.right().min(width as i32),
            self.bottom().min(height as i32),
        )
    }
}
