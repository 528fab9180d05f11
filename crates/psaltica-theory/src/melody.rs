//! Melodic traversal over the phthong cycle
//!
//! Byzantine melody is notated as movements relative to the previous note,
//! so recognition yields signed step deltas. `MelodyMapper` walks those
//! deltas over the ordered, cyclic list of phthongs (scale degrees),
//! wrapping in both directions, and also resolves the selected mode's
//! degree -> normalized height table used for diagramming.

use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};

/// The standard seven-degree cycle, used when no configuration overrides it.
pub const DEFAULT_PHTHONGS: [&str; 7] = ["Νη", "Πα", "Βου", "Γα", "Δι", "Κε", "Ζω"];

/// A mode's display profile: normalized height in [0, 1] per phthong.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModeProfile {
    pub id: String,
    #[serde(default)]
    pub note_heights: BTreeMap<String, f32>,
}

/// Result of one melodic traversal.
#[derive(Debug, Clone, PartialEq)]
pub struct MelodyTraversal {
    /// Phthong label reached after each delta, in order.
    pub notes: Vec<String>,
    /// Degree -> normalized height for the selected mode.
    pub mode_heights: BTreeMap<String, f32>,
}

/// Maps step deltas to phthong labels over a cyclic degree list.
#[derive(Debug, Clone)]
pub struct MelodyMapper {
    phthongs: Vec<String>,
    modes: HashMap<String, ModeProfile>,
}

impl MelodyMapper {
    pub fn new(phthongs: Vec<String>, modes: HashMap<String, ModeProfile>) -> Self {
        MelodyMapper { phthongs, modes }
    }

    /// The configured degree cycle, in order.
    pub fn phthongs(&self) -> &[String] {
        &self.phthongs
    }

    /// Walk `deltas` starting from `base_phthong` (first degree if the base
    /// is not in the cycle), wrapping modulo the cycle length. The current
    /// index carries across deltas within this one call only.
    pub fn map(&self, base_phthong: &str, deltas: &[i32], mode_id: &str) -> MelodyTraversal {
        if self.phthongs.is_empty() {
            return MelodyTraversal {
                notes: Vec::new(),
                mode_heights: BTreeMap::new(),
            };
        }

        let mut index = self
            .phthongs
            .iter()
            .position(|p| p == base_phthong)
            .unwrap_or(0);
        let len = self.phthongs.len() as i32;

        let notes = deltas
            .iter()
            .map(|&delta| {
                index = (((index as i32 + delta) % len + len) % len) as usize;
                self.phthongs[index].clone()
            })
            .collect();

        MelodyTraversal {
            notes,
            mode_heights: self.mode_heights(mode_id),
        }
    }

    /// Height table for `mode_id`: configured heights where present, with
    /// linear interpolation over the cycle filling the gaps; the all-linear
    /// table when the mode is unknown or has no heights at all.
    fn mode_heights(&self, mode_id: &str) -> BTreeMap<String, f32> {
        match self.modes.get(mode_id) {
            Some(profile) if !profile.note_heights.is_empty() => self
                .phthongs
                .iter()
                .map(|note| {
                    let height = profile
                        .note_heights
                        .get(note)
                        .copied()
                        .unwrap_or_else(|| self.linear_height(note));
                    (note.clone(), height)
                })
                .collect(),
            _ => self
                .phthongs
                .iter()
                .map(|note| (note.clone(), self.linear_height(note)))
                .collect(),
        }
    }

    fn linear_height(&self, note: &str) -> f32 {
        if self.phthongs.len() <= 1 {
            return 0.0;
        }
        let index = self.phthongs.iter().position(|p| p == note).unwrap_or(0);
        index as f32 / (self.phthongs.len() - 1) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn phthongs() -> Vec<String> {
        DEFAULT_PHTHONGS.iter().map(|p| p.to_string()).collect()
    }

    fn first_mode() -> HashMap<String, ModeProfile> {
        let heights: BTreeMap<String, f32> = [
            ("Νη", 0.0),
            ("Πα", 0.2),
            ("Βου", 0.4),
            ("Γα", 0.6),
            ("Δι", 0.8),
            ("Κε", 0.9),
            ("Ζω", 1.0),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();
        HashMap::from([(
            "first".to_string(),
            ModeProfile {
                id: "first".to_string(),
                note_heights: heights,
            },
        )])
    }

    #[test]
    fn test_maps_deltas_from_base() {
        let mapper = MelodyMapper::new(phthongs(), first_mode());
        let traversal = mapper.map("Πα", &[1, 1, -1, 0, -2], "first");
        assert_eq!(traversal.notes, vec!["Βου", "Γα", "Βου", "Βου", "Νη"]);
        assert_eq!(traversal.mode_heights["Ζω"], 1.0);
        assert_eq!(traversal.mode_heights["Πα"], 0.2);
    }

    #[test]
    fn test_wraps_in_both_directions() {
        let mapper = MelodyMapper::new(phthongs(), HashMap::new());
        let traversal = mapper.map("Ζω", &[1, 1, -8], "unknown_mode");
        assert_eq!(traversal.notes, vec!["Νη", "Πα", "Νη"]);
        // No mode profile: linear fallback table.
        assert_eq!(traversal.mode_heights["Νη"], 0.0);
        assert_eq!(traversal.mode_heights["Ζω"], 1.0);
    }

    #[test]
    fn test_regression_first_mode_base_ni() {
        let mapper = MelodyMapper::new(phthongs(), HashMap::new());
        let traversal = mapper.map("Νη", &[2, -1, 0, 1, 1, -1, -1, -1], "first");
        assert_eq!(
            traversal.notes,
            vec!["Βου", "Πα", "Πα", "Βου", "Γα", "Βου", "Πα", "Νη"]
        );
    }

    #[test]
    fn test_unknown_base_starts_at_first_degree() {
        let mapper = MelodyMapper::new(phthongs(), HashMap::new());
        let traversal = mapper.map("not-a-degree", &[1], "first");
        assert_eq!(traversal.notes, vec!["Πα"]);
    }

    #[test]
    fn test_partial_mode_heights_interpolate_gaps() {
        let modes = HashMap::from([(
            "second".to_string(),
            ModeProfile {
                id: "second".to_string(),
                note_heights: BTreeMap::from([("Νη".to_string(), 0.1)]),
            },
        )]);
        let mapper = MelodyMapper::new(phthongs(), modes);
        let traversal = mapper.map("Νη", &[], "second");
        assert_eq!(traversal.mode_heights["Νη"], 0.1);
        // Δι is index 4 of 7: 4/6.
        assert!((traversal.mode_heights["Δι"] - 4.0 / 6.0).abs() < 1e-6);
    }

    #[test]
    fn test_empty_cycle_degrades() {
        let mapper = MelodyMapper::new(Vec::new(), HashMap::new());
        let traversal = mapper.map("Νη", &[1, 2], "first");
        assert!(traversal.notes.is_empty());
        assert!(traversal.mode_heights.is_empty());
    }
}
