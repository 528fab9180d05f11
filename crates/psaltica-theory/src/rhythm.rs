//! Rhythmic duration rules
//!
//! Each neume starts from its base duration (floored at half a beat) and
//! gains a beat for a `fraction` modifier and another for the `antikeno` +
//! `apli` pair. A second left-to-right pass applies `gorgo`: the gorgo
//! symbol itself collapses to half a beat and discounts its immediate
//! predecessor by half a beat, floored at half a beat. Several gorgos in a
//! row each discount their own predecessor; a predecessor can be hit more
//! than once, bounded only by the floor. That double-discount is observed
//! chant-engraving behavior and is kept as-is.

/// Modifier id adding one beat.
pub const MODIFIER_FRACTION: &str = "fraction";
/// Modifier id halving the symbol and discounting its predecessor.
pub const MODIFIER_GORGO: &str = "gorgo";
/// One of the paired modifiers adding a beat when both are present.
pub const MODIFIER_ANTIKENO: &str = "antikeno";
/// The other half of the antikeno pair.
pub const MODIFIER_APLI: &str = "apli";

/// Minimum duration of any event, in beats.
const MIN_BEATS: f32 = 0.5;

/// One neume's rhythmic inputs: its modifier ids and base duration.
#[derive(Debug, Clone, PartialEq)]
pub struct RhythmInput {
    pub modifiers: Vec<String>,
    pub base_duration_beats: f32,
}

impl RhythmInput {
    pub fn new(modifiers: Vec<String>, base_duration_beats: f32) -> Self {
        RhythmInput {
            modifiers,
            base_duration_beats,
        }
    }

    fn has(&self, modifier: &str) -> bool {
        self.modifiers.iter().any(|m| m == modifier)
    }
}

/// Map a sequence of neume rhythm inputs to durations in beats.
pub fn beat_durations(inputs: &[RhythmInput]) -> Vec<f32> {
    let mut durations: Vec<f32> = inputs
        .iter()
        .map(|input| {
            let mut duration = input.base_duration_beats.max(MIN_BEATS);
            if input.has(MODIFIER_FRACTION) {
                duration += 1.0;
            }
            if input.has(MODIFIER_ANTIKENO) && input.has(MODIFIER_APLI) {
                duration += 1.0;
            }
            duration
        })
        .collect();

    for index in 0..inputs.len() {
        if !inputs[index].has(MODIFIER_GORGO) {
            continue;
        }
        durations[index] = MIN_BEATS;
        if index > 0 {
            durations[index - 1] = (durations[index - 1] - 0.5).max(MIN_BEATS);
        }
    }

    durations
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(modifiers: &[&str], base: f32) -> RhythmInput {
        RhythmInput::new(modifiers.iter().map(|m| m.to_string()).collect(), base)
    }

    #[test]
    fn test_fraction_antikeno_apli_and_gorgo_redistribution() {
        let inputs = vec![
            input(&[], 1.0),
            input(&[], 1.0),
            input(&[], 1.0),
            input(&[], 1.0),
            input(&["fraction"], 1.0),
            input(&["fraction"], 1.0),
            input(&["antikeno", "apli"], 1.0),
            input(&["gorgo"], 1.0),
        ];
        assert_eq!(
            beat_durations(&inputs),
            vec![1.0, 1.0, 1.0, 1.0, 2.0, 2.0, 1.5, 0.5]
        );
    }

    #[test]
    fn test_antikeno_alone_adds_nothing() {
        assert_eq!(beat_durations(&[input(&["antikeno"], 1.0)]), vec![1.0]);
        assert_eq!(beat_durations(&[input(&["apli"], 1.0)]), vec![1.0]);
    }

    #[test]
    fn test_base_duration_floor() {
        assert_eq!(beat_durations(&[input(&[], 0.0)]), vec![0.5]);
        assert_eq!(beat_durations(&[input(&[], -3.0)]), vec![0.5]);
    }

    #[test]
    fn test_gorgo_chain_discounts_each_predecessor() {
        let inputs = vec![
            input(&[], 2.0),
            input(&["gorgo"], 1.0),
            input(&["gorgo"], 1.0),
        ];
        // First gorgo: self 0.5, discounts 2.0 -> 1.5.
        // Second gorgo: self 0.5, discounts the first gorgo's 0.5 -> floor.
        assert_eq!(beat_durations(&inputs), vec![1.5, 0.5, 0.5]);
    }

    #[test]
    fn test_gorgo_predecessor_floor() {
        let inputs = vec![input(&[], 0.5), input(&["gorgo"], 1.0)];
        assert_eq!(beat_durations(&inputs), vec![0.5, 0.5]);
    }

    #[test]
    fn test_leading_gorgo_has_no_predecessor() {
        let inputs = vec![input(&["gorgo"], 1.0), input(&[], 1.0)];
        assert_eq!(beat_durations(&inputs), vec![0.5, 1.0]);
    }

    #[test]
    fn test_empty_sequence() {
        assert!(beat_durations(&[]).is_empty());
    }
}
