//! psaltica-ops - Pixel algorithms for the neume recognition pipeline
//!
//! Every function here is a pure, allocation-returning transform over the
//! value types in `psaltica-core`; there is no shared state and no I/O.
//! Degenerate geometry (zero-sized images, out-of-frame rectangles) always
//! produces an empty or minimal valid result, never a panic: the analyzer
//! absorbs per-unit failures instead of aborting a whole request.
//!
//! The preprocessing chain applied to photographed lines and to symbol
//! templates must be bit-identical for template matching to be meaningful,
//! so both go through the same functions in this crate:
//! adaptive threshold -> binarize -> denoise -> close/open -> normalize.

pub mod compare;
pub mod filter;
pub mod lines;
pub mod morph;
pub mod region;
pub mod threshold;
pub mod transform;

pub use compare::foreground_f1;
pub use filter::denoise;
pub use lines::first_line_rect;
pub use morph::{close, close_open, dilate, erode, open};
pub use region::connected_components;
pub use threshold::{binarize, estimate_adaptive_threshold, estimate_threshold};
pub use transform::{crop, crop_raster, normalize, resize_bilinear, rotate_raster};
