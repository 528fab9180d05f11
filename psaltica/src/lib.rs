//! Psaltica - Handwritten Byzantine chant notation recognition
//!
//! Psaltica turns a photograph of a handwritten chant line into timed,
//! pitched musical events via template matching over binarized glyphs.
//!
//! # Overview
//!
//! The pipeline, crate by crate:
//!
//! - image primitives: RGBA rasters, binary masks, pixel rectangles
//! - binary ops: thresholding, denoising, morphology, line isolation,
//!   connected components, normalization and geometric transforms
//! - symbols: the JSON rule configuration and the memoizing template
//!   repository answering best-match queries
//! - theory: the rhythm (beat duration) and melody (phthong traversal)
//!   rules of Byzantine notation
//! - analyze: the orchestrator joining all of the above
//!
//! # Example
//!
//! ```no_run
//! use psaltica::analyze::{MelodyAnalysisRequest, MelodyAnalyzer};
//! use psaltica::symbols::TemplateRepository;
//! use psaltica::Raster;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let repository = TemplateRepository::open("assets/symbols")?;
//! let analyzer = MelodyAnalyzer::new(repository);
//!
//! let photo = Raster::filled(800, 200, [255, 255, 255, 255]);
//! let request = MelodyAnalysisRequest::new("first", "Πα", photo);
//! let result = analyzer.analyze(&request);
//! for event in &result.events {
//!     println!("{} for {} beats", event.note_label, event.duration_beats);
//! }
//! # Ok(())
//! # }
//! ```

// Re-export core types (primary data structures used everywhere)
pub use psaltica_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use psaltica_analyze as analyze;
pub use psaltica_ops as ops;
pub use psaltica_symbols as symbols;
pub use psaltica_theory as theory;
