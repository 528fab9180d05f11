//! psaltica-theory - Symbolic music rules for recognized neume sequences
//!
//! Two small pure-function engines sit downstream of classification:
//!
//! - [`rhythm`]: modifier set -> duration in beats, including the gorgo
//!   rule that borrows half a beat from the preceding symbol.
//! - [`melody`]: signed step deltas -> phthong (scale degree) labels over
//!   a cyclic degree list, plus the mode's normalized height table.

pub mod melody;
pub mod rhythm;

pub use melody::{DEFAULT_PHTHONGS, MelodyMapper, MelodyTraversal, ModeProfile};
pub use rhythm::{
    MODIFIER_ANTIKENO, MODIFIER_APLI, MODIFIER_FRACTION, MODIFIER_GORGO, RhythmInput,
    beat_durations,
};
