//! Analysis result types

use psaltica_core::{Raster, Rect};
use std::collections::BTreeMap;

/// The melodic base resolved for a glyph group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BaseSymbol {
    /// A core rule matched with sufficient confidence.
    Known { id: String },
    /// No base rule cleared the confidence bar.
    Unknown,
}

impl BaseSymbol {
    /// Stable identifier for display and serialization.
    pub fn id(&self) -> &str {
        match self {
            BaseSymbol::Known { id } => id,
            BaseSymbol::Unknown => "unknown",
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, BaseSymbol::Unknown)
    }
}

/// Diagnostic flags attached to a recognized event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventFlag {
    /// The group's base symbol could not be identified.
    UnknownBase,
}

impl EventFlag {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventFlag::UnknownBase => "unknown_base",
        }
    }
}

/// One glyph group after classification, rhythm and melody resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct RecognizedNeumeEvent {
    pub base: BaseSymbol,
    /// Human-readable name from the display table, the base id otherwise.
    pub display_name: String,
    /// Composition token for playback, from the rule or the fallback catalog.
    pub base_token: Option<String>,
    /// Distinct modifier symbol ids, in match order.
    pub modifiers: Vec<String>,
    /// Best similarity backing the base decision, 0 when nothing matched.
    pub confidence: f32,
    /// Melodic step relative to the previous event.
    pub delta_steps: i32,
    pub duration_beats: f32,
    /// Phthong reached after this event's step.
    pub note_label: String,
    /// Group bounds in deskewed-image coordinates.
    pub bbox: Rect,
    pub flags: Vec<EventFlag>,
}

/// One line analysis job: the photograph plus its musical context.
#[derive(Debug, Clone, PartialEq)]
pub struct MelodyAnalysisRequest {
    /// Mode whose height profile the result should carry.
    pub mode_id: String,
    /// Degree the first event's step is taken from.
    pub base_phthong: String,
    pub image: Raster,
}

impl MelodyAnalysisRequest {
    pub fn new(mode_id: impl Into<String>, base_phthong: impl Into<String>, image: Raster) -> Self {
        MelodyAnalysisRequest {
            mode_id: mode_id.into(),
            base_phthong: base_phthong.into(),
            image,
        }
    }
}

/// Full output of one line analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct MelodyAnalysisResult {
    /// Bounds of the analyzed line on the deskewed image.
    pub crop_rect: Rect,
    /// The analyzed line, cropped from the deskewed image (at least 1x1).
    pub crop_image: Raster,
    pub events: Vec<RecognizedNeumeEvent>,
    /// Note labels of all events, in order.
    pub note_path: Vec<String>,
    /// Degree -> normalized height for the requested mode.
    pub mode_heights: BTreeMap<String, f32>,
    /// Events whose base stayed unknown.
    pub unknown_count: usize,
    /// Events below the review-confidence bar.
    pub low_confidence_count: usize,
}
