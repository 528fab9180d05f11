//! Line analysis orchestration

use crate::event::{
    BaseSymbol, EventFlag, MelodyAnalysisRequest, MelodyAnalysisResult, RecognizedNeumeEvent,
};
use crate::grouping::group_by_gap;
use psaltica_core::{BinaryImage, Raster, Rect};
use psaltica_ops::{
    binarize, close_open, connected_components, crop, crop_raster, denoise,
    estimate_adaptive_threshold, first_line_rect, normalize, resize_bilinear, rotate_raster,
};
use psaltica_symbols::{CatalogMatch, SymbolRole, TEMPLATE_SIZE, TemplateMatch, TemplateRepository};
use psaltica_theory::{MelodyMapper, RhythmInput, beat_durations};
use tracing::debug;

/// Longest image side processed at full resolution.
const MAX_IMAGE_SIDE: u32 = 1600;
/// Hard cap on recognized events per line.
const MAX_EVENTS: usize = 200;
/// A base match below this stays unknown.
const BASE_MATCH_THRESHOLD: f32 = 0.34;
/// Modifier matches below this are discarded.
const MODIFIER_MATCH_THRESHOLD: f32 = 0.30;
/// Core confidence under which the fallback catalog is consulted.
const FALLBACK_MATCH_THRESHOLD: f32 = 0.30;
/// Events below this count toward the review tally.
const LOW_CONFIDENCE_THRESHOLD: f32 = 0.55;
/// Components smaller than this (pixels and bounding box) are noise.
const MIN_COMPONENT_AREA: u32 = 10;
/// Padding around each component before template comparison, in pixels.
const COMPONENT_PAD: i32 = 1;
/// Deskew sweep bounds, in whole degrees.
const MAX_SKEW_DEGREES: i32 = 4;

/// Orchestrates the full photograph-to-events pipeline.
pub struct MelodyAnalyzer {
    repository: TemplateRepository,
}

impl MelodyAnalyzer {
    pub fn new(repository: TemplateRepository) -> Self {
        MelodyAnalyzer { repository }
    }

    pub fn repository(&self) -> &TemplateRepository {
        &self.repository
    }

    /// Analyze one photographed line. Never fails: degraded inputs produce
    /// an empty or flagged result.
    pub fn analyze(&self, request: &MelodyAnalysisRequest) -> MelodyAnalysisResult {
        let base_phthong = request.base_phthong.as_str();
        let scaled = downscale_if_needed(&request.image);
        let deskewed = deskew(&scaled);

        let threshold = estimate_adaptive_threshold(&deskewed);
        let binary = binarize(&deskewed, threshold);
        let cleaned = close_open(&denoise(&binary));
        debug!(
            threshold,
            foreground = cleaned.count_foreground(),
            "line image binarized"
        );

        let line_rect = first_line_rect(&cleaned);
        let line = crop(&cleaned, &line_rect);

        let components = connected_components(&line, MIN_COMPONENT_AREA);
        let groups = group_by_gap(&components);
        debug!(
            components = components.len(),
            groups = groups.len(),
            "line segmented"
        );

        let mut events: Vec<RecognizedNeumeEvent> = groups
            .iter()
            .take(MAX_EVENTS)
            .map(|group| self.parse_group(&line, line_rect, group))
            .collect();

        let rhythm_inputs: Vec<RhythmInput> = events
            .iter()
            .map(|event| RhythmInput::new(event.modifiers.clone(), event.duration_beats))
            .collect();
        let durations = beat_durations(&rhythm_inputs);
        for (event, duration) in events.iter_mut().zip(durations) {
            event.duration_beats = duration;
        }

        let mapper = MelodyMapper::new(
            self.repository.phthongs_order().to_vec(),
            self.repository.mode_profiles().clone(),
        );
        let deltas: Vec<i32> = events.iter().map(|event| event.delta_steps).collect();
        let traversal = mapper.map(base_phthong, &deltas, &request.mode_id);
        for (index, event) in events.iter_mut().enumerate() {
            event.note_label = traversal
                .notes
                .get(index)
                .cloned()
                .unwrap_or_else(|| base_phthong.to_string());
        }

        let unknown_count = events.iter().filter(|e| e.base.is_unknown()).count();
        let low_confidence_count = events
            .iter()
            .filter(|e| e.confidence < LOW_CONFIDENCE_THRESHOLD)
            .count();
        debug!(
            events = events.len(),
            unknown_count, low_confidence_count, "line analyzed"
        );

        MelodyAnalysisResult {
            crop_rect: line_rect,
            crop_image: crop_raster(&deskewed, &line_rect),
            note_path: traversal.notes,
            mode_heights: traversal.mode_heights,
            unknown_count,
            low_confidence_count,
            events,
        }
    }

    /// Classify one glyph group: match each component against the core
    /// rules, pick the base and modifiers, and consult the fallback catalog
    /// when nothing in the core set is convincing.
    fn parse_group(&self, line: &BinaryImage, line_rect: Rect, group: &[Rect]) -> RecognizedNeumeEvent {
        let mut matches: Vec<TemplateMatch> = Vec::new();
        // One entry per component; unscanned components keep a `None` slot so
        // fallback selection ranks them at zero like everything else.
        let mut catalog_candidates: Vec<Option<CatalogMatch>> = Vec::new();
        let mut bbox: Option<Rect> = None;

        for &component in group {
            let padded = pad_rect(component, line);
            let absolute = Rect::new(
                line_rect.x + padded.x,
                line_rect.y + padded.y,
                padded.width,
                padded.height,
            );
            bbox = Some(match bbox {
                Some(existing) => existing.union(&absolute),
                None => absolute,
            });

            let patch = normalize(&crop(line, &padded), TEMPLATE_SIZE);
            let core = self.repository.find_best_core_match(&patch);
            let core_confidence = core.as_ref().map(|m| m.confidence).unwrap_or(0.0);

            // The fallback catalog is only worth scanning for a component
            // the core set saw nothing convincing in.
            if core_confidence < FALLBACK_MATCH_THRESHOLD {
                catalog_candidates.push(self.repository.find_best_catalog_match(&patch));
            } else {
                catalog_candidates.push(None);
            }

            if let Some(found) = core {
                matches.push(found);
            }
        }

        let base_candidate = matches
            .iter()
            .filter(|m| m.role == SymbolRole::Base)
            .cloned()
            .reduce(|best, m| if m.confidence > best.confidence { m } else { best });

        let mut modifiers: Vec<String> = Vec::new();
        for found in &matches {
            if found.role == SymbolRole::Modifier
                && found.confidence >= MODIFIER_MATCH_THRESHOLD
                && !modifiers.contains(&found.symbol_id)
            {
                modifiers.push(found.symbol_id.clone());
            }
        }

        let best_core_confidence = matches
            .iter()
            .map(|m| m.confidence)
            .fold(0.0f32, f32::max);

        // First component with the highest effective score wins; a lone
        // zero-confidence catalog hit cannot beat an earlier unscanned slot.
        let fallback_token = catalog_candidates
            .into_iter()
            .reduce(|best, candidate| {
                let best_score = best.as_ref().map(|m| m.confidence).unwrap_or(0.0);
                let score = candidate.as_ref().map(|m| m.confidence).unwrap_or(0.0);
                if score > best_score { candidate } else { best }
            })
            .flatten()
            .map(|found| found.token);

        let confidence = base_candidate
            .as_ref()
            .map(|m| m.confidence)
            .unwrap_or(best_core_confidence);

        let (base, base_token, delta_steps, base_duration, flags) = match &base_candidate {
            Some(candidate) if candidate.confidence >= BASE_MATCH_THRESHOLD => {
                let rule = self.repository.rule_by_id(&candidate.symbol_id);
                let delta = rule.map(|r| r.delta_steps).unwrap_or(0);
                let duration = rule
                    .and_then(|r| r.default_duration_beats)
                    .unwrap_or(1.0)
                    .max(0.5);
                let token = candidate.base_token.clone().or(fallback_token);
                (
                    BaseSymbol::Known {
                        id: candidate.symbol_id.clone(),
                    },
                    token,
                    delta,
                    duration,
                    Vec::new(),
                )
            }
            _ => (
                BaseSymbol::Unknown,
                fallback_token,
                0,
                1.0,
                vec![EventFlag::UnknownBase],
            ),
        };

        RecognizedNeumeEvent {
            display_name: self.repository.display_name_for(base.id()),
            base,
            base_token,
            modifiers,
            confidence,
            delta_steps,
            duration_beats: base_duration,
            note_label: String::new(),
            bbox: bbox.unwrap_or_else(|| Rect::new(0, 0, 1, 1)),
            flags,
        }
    }
}

/// Shrink so the longest side fits `MAX_IMAGE_SIDE`, keeping aspect ratio.
fn downscale_if_needed(image: &Raster) -> Raster {
    let longest = image.width().max(image.height());
    if longest <= MAX_IMAGE_SIDE {
        return image.clone();
    }
    let scale = MAX_IMAGE_SIDE as f32 / longest as f32;
    let width = ((image.width() as f32 * scale) as u32).max(1);
    let height = ((image.height() as f32 * scale) as u32).max(1);
    debug!(width, height, "downscaling oversized image");
    resize_bilinear(image, width, height)
}

/// Try small whole-degree rotations and keep the one whose binarized rows
/// have the highest population variance; text lines concentrate ink into
/// few rows, so variance peaks when the line is horizontal. The unrotated
/// image is scored first and only a strictly better candidate replaces it.
fn deskew(image: &Raster) -> Raster {
    let mut best = image.clone();
    let mut best_score = row_variance(image);

    for degrees in -MAX_SKEW_DEGREES..=MAX_SKEW_DEGREES {
        if degrees == 0 {
            continue;
        }
        let rotated = rotate_raster(image, degrees as f32);
        let score = row_variance(&rotated);
        if score > best_score {
            best_score = score;
            best = rotated;
        }
    }
    debug!(score = best_score, "deskew selected");
    best
}

fn row_variance(image: &Raster) -> f64 {
    let threshold = estimate_adaptive_threshold(image);
    let counts = binarize(image, threshold).row_counts();
    if counts.is_empty() {
        return 0.0;
    }
    let mean = counts.iter().map(|&c| c as f64).sum::<f64>() / counts.len() as f64;
    counts
        .iter()
        .map(|&c| {
            let diff = c as f64 - mean;
            diff * diff
        })
        .sum::<f64>()
        / counts.len() as f64
}

/// Expand a component by the comparison padding, clamped to the line.
fn pad_rect(rect: Rect, line: &BinaryImage) -> Rect {
    Rect::from_edges(
        rect.x - COMPONENT_PAD,
        rect.y - COMPONENT_PAD,
        rect.right() + COMPONENT_PAD,
        rect.bottom() + COMPONENT_PAD,
    )
    .clamp_to(line.width(), line.height())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_variance_peaks_on_horizontal_band() {
        // A dark horizontal band on white: rows are either full or empty.
        let banded = Raster::from_fn(40, 40, |_, y| {
            if (18..22).contains(&y) {
                [0, 0, 0, 255]
            } else {
                [255, 255, 255, 255]
            }
        });
        // The same ink spread evenly across all rows.
        let spread = Raster::from_fn(40, 40, |x, _| {
            if (18..22).contains(&x) {
                [0, 0, 0, 255]
            } else {
                [255, 255, 255, 255]
            }
        });
        assert!(row_variance(&banded) > row_variance(&spread));
    }

    #[test]
    fn test_downscale_only_when_oversized() {
        let small = Raster::filled(100, 50, [255, 255, 255, 255]);
        let kept = downscale_if_needed(&small);
        assert_eq!((kept.width(), kept.height()), (100, 50));

        let wide = Raster::filled(3200, 400, [255, 255, 255, 255]);
        let scaled = downscale_if_needed(&wide);
        assert_eq!((scaled.width(), scaled.height()), (1600, 200));
    }

    #[test]
    fn test_pad_rect_clamps_to_line() {
        let line = BinaryImage::blank(50, 20);
        let padded = pad_rect(Rect::new(0, 0, 10, 10), &line);
        assert_eq!(padded, Rect::new(0, 0, 11, 11));
        let padded = pad_rect(Rect::new(45, 15, 5, 5), &line);
        assert_eq!(padded, Rect::new(44, 14, 6, 6));
    }
}
