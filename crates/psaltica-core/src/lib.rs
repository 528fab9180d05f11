//! psaltica-core - Core data structures for the psaltica recognition pipeline
//!
//! Provides the three value types everything else operates on:
//!
//! - [`Raster`] - an RGBA8 photograph or template image
//! - [`BinaryImage`] - a boolean foreground mask produced by binarization
//! - [`Rect`] - an axis-aligned pixel rectangle
//!
//! All three are plain immutable values. Pixel transforms live in
//! `psaltica-ops` and always allocate a new image; nothing in this crate
//! mutates shared state.

mod binary;
mod error;
mod raster;
mod rect;

pub use binary::BinaryImage;
pub use error::{Error, Result};
pub use raster::Raster;
pub use rect::Rect;
