//! psaltica-analyze - From a photographed chant line to timed, pitched events
//!
//! The [`MelodyAnalyzer`] orchestrates the whole recognition pipeline:
//! downscale, deskew, binarize, isolate the first text line, split it into
//! connected components, group the components into glyphs, classify each
//! glyph against the symbol templates, then run the rhythm and melody rules
//! to attach durations and note labels.
//!
//! Analysis itself is infallible: degraded inputs (blank page, no
//! recognizable glyphs, missing templates) degrade to an empty or partially
//! flagged result rather than an error.

pub mod analyzer;
pub mod event;
pub mod grouping;

pub use analyzer::MelodyAnalyzer;
pub use event::{
    BaseSymbol, EventFlag, MelodyAnalysisRequest, MelodyAnalysisResult, RecognizedNeumeEvent,
};
pub use grouping::group_by_gap;
