//! Error types for psaltica-core

use thiserror::Error;

/// Core error type
#[derive(Error, Debug)]
pub enum Error {
    /// Binary mask length does not match width*height
    #[error("mask size mismatch: expected {expected}, got {actual}")]
    MaskSizeMismatch { expected: usize, actual: usize },

    /// RGBA buffer length does not match width*height*4
    #[error("raster buffer size mismatch: expected {expected}, got {actual}")]
    BufferSizeMismatch { expected: usize, actual: usize },
}

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, Error>;
