// Pairwise chord distance in Tonal Pitch Space.
//
// Two chord-in-key representations are compared with two rules:
//
// - Chord distance rule (CDR): for each of the four levels, count the pitch
//   classes present in exactly one of the two chords, and sum. Symmetric.
// - Circle-of-fifths rule (CFR): classify the root motion from chord A to
//   chord B against two fixed tables, one for ascending and one for
//   descending fifths. Not symmetric.
//
// distance = CDR / 2 + CFR
//
// The CFR tables and their index-based return values reproduce the
// published validation cases (De Haas et al. 2008/2013); the descending
// table deliberately overlaps the ascending one's values. The root motion is
// the plain signed difference, so any motion to a lower pitch class lands in
// neither table and scores the distant penalty.
//
// Consumed by profile.rs, which compares every chord of a sequence against
// the tonic chord of its key.

use crate::error::TpsdError;
use crate::pitch_space::PitchClass;
use crate::tps::{TonalPitchSpace, TpsLevels};
use serde::{Deserialize, Serialize};

/// Root motions in ascending fifths: 0, 1, 2 or 3 steps.
const FIFTHS_ASCENDING: [i32; 4] = [0, 7, 2, 9];

/// Root motions in descending fifths: 1, 2 or 3 steps.
const FIFTHS_DESCENDING: [i32; 3] = [5, 11, 4];

/// CFR value for any root motion in neither table.
const FIFTHS_DISTANT: u8 = 3;

/// Circle-of-fifths rule for a root motion from `root_a` to `root_b`.
///
/// The motion is the signed difference `root_b - root_a`, in -11..=11.
pub fn circle_fifth_rule(root_a: PitchClass, root_b: PitchClass) -> u8 {
    let delta = root_b as i32 - root_a as i32;
    if let Some(idx) = FIFTHS_ASCENDING.iter().position(|&d| d == delta) {
        return idx as u8;
    }
    if let Some(idx) = FIFTHS_DESCENDING.iter().position(|&d| d == delta) {
        return idx as u8 + 1;
    }
    FIFTHS_DISTANT
}

/// Chord distance rule between two level stacks.
pub fn chord_distance_rule(a: &TpsLevels, b: &TpsLevels) -> u32 {
    a.as_array()
        .iter()
        .zip(b.as_array().iter())
        .map(|(la, lb)| la.symmetric_difference_len(*lb) as u32)
        .sum()
}

/// A comparison between two chords, each in its own key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TpsComparison {
    pub a: TonalPitchSpace,
    pub b: TonalPitchSpace,
    levels_a: TpsLevels,
    levels_b: TpsLevels,
}

/// Snapshot of the three values a comparison produces.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub chord_distance_rule: u32,
    pub circle_fifth_rule: u8,
    pub distance: f64,
}

impl TpsComparison {
    pub fn new(a: TonalPitchSpace, b: TonalPitchSpace) -> Self {
        TpsComparison {
            a,
            b,
            levels_a: a.levels(),
            levels_b: b.levels(),
        }
    }

    /// Build both sides from Harte chord symbols and key tokens.
    pub fn from_symbols(
        chord_a: &str,
        key_a: &str,
        chord_b: &str,
        key_b: &str,
    ) -> Result<Self, TpsdError> {
        Ok(TpsComparison::new(
            TonalPitchSpace::from_symbols(chord_a, key_a)?,
            TonalPitchSpace::from_symbols(chord_b, key_b)?,
        ))
    }

    pub fn levels_a(&self) -> &TpsLevels {
        &self.levels_a
    }

    pub fn levels_b(&self) -> &TpsLevels {
        &self.levels_b
    }

    pub fn chord_distance_rule(&self) -> u32 {
        chord_distance_rule(&self.levels_a, &self.levels_b)
    }

    pub fn circle_fifth_rule(&self) -> u8 {
        circle_fifth_rule(self.a.chord.root, self.b.chord.root)
    }

    pub fn distance(&self) -> f64 {
        self.chord_distance_rule() as f64 / 2.0 + self.circle_fifth_rule() as f64
    }

    pub fn result(&self) -> ComparisonResult {
        ComparisonResult {
            chord_distance_rule: self.chord_distance_rule(),
            circle_fifth_rule: self.circle_fifth_rule(),
            distance: self.distance(),
        }
    }
}
