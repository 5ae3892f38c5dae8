// Minimum-area alignment of two sequence profiles (the TPSD proper).
//
// Two profiles of lengths m <= n are compared by sliding the shorter one
// across every position that keeps it fully inside the longer one. For each
// offset s in 0..=n-m the area is the sum of per-beat absolute differences
//
//   area(s) = sum_k |short[k] - long[s + k]|
//
// and the result is min_s area(s) / m. Equal lengths leave a single offset,
// so the result is the mean absolute difference.
//
// The scan is exact brute force, O((n - m + 1) * m), indexing straight into
// both sample slices with no per-offset copies. Offsets are independent, so
// once there are enough of them the scan fans out over rayon; ties always
// resolve to the smallest offset, which makes the parallel result identical
// to the sequential one.

use crate::error::TpsdError;
use crate::pitch_space::Mode;
use crate::profile::{KeyAssignment, SequenceProfile};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Tunables for the offset scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlignmentConfig {
    /// Minimum number of candidate offsets before the scan runs in parallel.
    pub parallel_threshold: usize,
}

impl Default for AlignmentConfig {
    fn default() -> Self {
        AlignmentConfig {
            parallel_threshold: 256,
        }
    }
}

/// Outcome of a minimum-area search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Alignment {
    /// Minimum area divided by the shorter profile's length.
    pub area: f64,
    /// Offset into the longer profile where the shorter one starts.
    pub offset: usize,
    /// Length of the shorter profile (the normalisation window).
    pub window: usize,
    /// True when the first argument was used as the shorter profile.
    pub shorter_is_first: bool,
}

/// Minimum normalised area between two beat-sampled profiles.
pub fn minimum_area(a: &[f64], b: &[f64]) -> Result<Alignment, TpsdError> {
    minimum_area_with(a, b, &AlignmentConfig::default())
}

/// As `minimum_area`, with explicit scan settings.
pub fn minimum_area_with(
    a: &[f64],
    b: &[f64],
    config: &AlignmentConfig,
) -> Result<Alignment, TpsdError> {
    let shorter_is_first = a.len() <= b.len();
    let (short, long) = if shorter_is_first { (a, b) } else { (b, a) };
    let window = short.len();
    if window == 0 {
        return Err(TpsdError::EmptySequence);
    }

    let offsets = long.len() - window + 1;
    log::debug!(
        "alignment: window of {} beats over {} beats, {} offsets",
        window,
        long.len(),
        offsets
    );

    let area_at = |offset: usize| -> (usize, f64) {
        let area = short
            .iter()
            .zip(&long[offset..offset + window])
            .map(|(x, y)| (x - y).abs())
            .sum();
        (offset, area)
    };

    let (offset, area) = if offsets >= config.parallel_threshold {
        (0..offsets)
            .into_par_iter()
            .map(area_at)
            .reduce_with(better)
            .unwrap_or((0, 0.0))
    } else {
        (0..offsets).map(area_at).fold((0, f64::INFINITY), better)
    };

    Ok(Alignment {
        area: area / window as f64,
        offset,
        window,
        shorter_is_first,
    })
}

/// Pick the smaller area, breaking ties toward the earlier offset.
fn better(x: (usize, f64), y: (usize, f64)) -> (usize, f64) {
    if y.1 < x.1 || (y.1 == x.1 && y.0 < x.0) {
        y
    } else {
        x
    }
}

/// Distance between two chord sequences: both are turned into profiles,
/// then aligned.
#[derive(Debug, Clone, PartialEq)]
pub struct TpsdComparison {
    pub profile_a: SequenceProfile,
    pub profile_b: SequenceProfile,
}

impl TpsdComparison {
    pub fn new(profile_a: SequenceProfile, profile_b: SequenceProfile) -> Self {
        TpsdComparison {
            profile_a,
            profile_b,
        }
    }

    /// Build both profiles from Harte chord symbols, key tokens and beat
    /// durations.
    pub fn from_symbols<S: AsRef<str>>(
        chords_a: &[S],
        keys_a: &KeyAssignment<S>,
        durations_a: &[u32],
        chords_b: &[S],
        keys_b: &KeyAssignment<S>,
        durations_b: &[u32],
    ) -> Result<Self, TpsdError> {
        Ok(TpsdComparison::new(
            SequenceProfile::from_symbols(chords_a, keys_a, durations_a, Mode::Major)?,
            SequenceProfile::from_symbols(chords_b, keys_b, durations_b, Mode::Major)?,
        ))
    }

    pub fn minimum_area(&self) -> Result<Alignment, TpsdError> {
        self.minimum_area_with(&AlignmentConfig::default())
    }

    pub fn minimum_area_with(&self, config: &AlignmentConfig) -> Result<Alignment, TpsdError> {
        minimum_area_with(self.profile_a.samples(), self.profile_b.samples(), config)
    }
}
