// Beat-sampled tonal tension profile of a chord sequence.
//
// Each chord is compared with the tonic triad of its key (its "home"
// chord) using the pairwise TPS distance. The distance is then repeated
// once per beat the chord lasts, so the profile is a step function sampled
// at beat resolution: a chord of 4 beats contributes 4 identical samples.
// Order is preserved and repeated values are never merged.
//
// Keys are either a single global key broadcast to every chord or one key
// per chord (local keys, e.g. after modulations).
//
// Consumed by alignment.rs, which compares two profiles.

use crate::chord::Chord;
use crate::comparison::TpsComparison;
use crate::error::TpsdError;
use crate::pitch_space::{Key, Mode};
use crate::tps::TonalPitchSpace;
use serde::{Deserialize, Serialize};

/// How keys are attached to the chords of a sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum KeyAssignment<K = Key> {
    /// One key for the whole sequence.
    Global(K),
    /// One key per chord; must match the sequence length.
    PerChord(Vec<K>),
}

impl<K> KeyAssignment<K> {
    /// Number of keys as seen by a sequence of `chords` chords.
    fn len_for(&self, chords: usize) -> usize {
        match self {
            KeyAssignment::Global(_) => chords,
            KeyAssignment::PerChord(keys) => keys.len(),
        }
    }

    /// Key for position `idx`. Callers check lengths first.
    fn at(&self, idx: usize) -> &K {
        match self {
            KeyAssignment::Global(key) => key,
            KeyAssignment::PerChord(keys) => &keys[idx],
        }
    }
}

/// One chord's contribution to a profile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProfileSpan {
    /// TPS distance between the chord and its key's tonic triad.
    pub distance: f64,
    /// Number of beats the chord lasts.
    pub beats: u32,
}

/// A chord sequence reduced to one distance sample per beat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SequenceProfile {
    spans: Vec<ProfileSpan>,
    samples: Vec<f64>,
}

impl SequenceProfile {
    /// Build a profile from parsed chords, their key(s) and their durations
    /// in beats.
    pub fn build(
        chords: &[Chord],
        keys: &KeyAssignment<Key>,
        durations: &[u32],
    ) -> Result<Self, TpsdError> {
        check_lengths(chords.len(), keys, durations.len())?;

        let spans: Vec<ProfileSpan> = chords
            .iter()
            .zip(durations)
            .enumerate()
            .map(|(idx, (&chord, &beats))| {
                let key = *keys.at(idx);
                let home = TonalPitchSpace::new(key.tonic_chord(), key);
                let distance = TpsComparison::new(TonalPitchSpace::new(chord, key), home).distance();
                ProfileSpan { distance, beats }
            })
            .collect();

        let profile = SequenceProfile::from_spans(spans);
        log::debug!(
            "profile: {} chords sampled into {} beats",
            chords.len(),
            profile.len()
        );
        Ok(profile)
    }

    /// Build a profile from Harte chord symbols and key tokens.
    ///
    /// Key tokens without a root take the root of the chord they apply to;
    /// tokens without a mode use `default_mode`.
    pub fn from_symbols<S: AsRef<str>>(
        chords: &[S],
        keys: &KeyAssignment<S>,
        durations: &[u32],
        default_mode: Mode,
    ) -> Result<Self, TpsdError> {
        check_lengths(chords.len(), keys, durations.len())?;

        let mut parsed_chords = Vec::with_capacity(chords.len());
        let mut parsed_keys = Vec::with_capacity(chords.len());
        for (idx, symbol) in chords.iter().enumerate() {
            let chord = Chord::parse(symbol.as_ref())?;
            let key = Key::parse_with(keys.at(idx).as_ref(), Some(chord.root), default_mode)?;
            parsed_chords.push(chord);
            parsed_keys.push(key);
        }
        SequenceProfile::build(
            &parsed_chords,
            &KeyAssignment::PerChord(parsed_keys),
            durations,
        )
    }

    pub fn from_spans(spans: Vec<ProfileSpan>) -> Self {
        let total: usize = spans.iter().map(|s| s.beats as usize).sum();
        let mut samples = Vec::with_capacity(total);
        for span in &spans {
            samples.extend(std::iter::repeat_n(span.distance, span.beats as usize));
        }
        SequenceProfile { spans, samples }
    }

    /// One distance per beat, in sequence order.
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    /// One entry per chord, in sequence order.
    pub fn spans(&self) -> &[ProfileSpan] {
        &self.spans
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

fn check_lengths<K>(
    chords: usize,
    keys: &KeyAssignment<K>,
    durations: usize,
) -> Result<(), TpsdError> {
    let keys = keys.len_for(chords);
    if keys != chords || durations != chords {
        return Err(TpsdError::SequenceLengthMismatch {
            chords,
            keys,
            durations,
        });
    }
    Ok(())
}
