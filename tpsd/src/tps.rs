// Tonal Pitch Space representation of a chord inside a key.
//
// Lerdahl's pitch space is a stack of nested pitch-class levels, from the
// most restrictive (the chord root) to the least (the key's diatonic
// collection). This module reduces a (chord, key) pair to four levels:
//
//   root      {root}
//   fifth     {root, root + 7}
//   triadic   every chord tone (not only three, despite the name)
//   diatonic  the 7 scale degrees of the key, united with the chord tones
//
// The chromatic level is omitted: it is identical for every chord and so
// never contributes to a distance.
//
// Consumed by comparison.rs (level-by-level distance) and display.rs
// (the table view).

use crate::chord::Chord;
use crate::error::TpsdError;
use crate::pitch_space::{Key, Mode, PitchClassSet};
use serde::{Deserialize, Serialize};

/// The four TPS levels of one chord in one key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TpsLevels {
    pub diatonic: PitchClassSet,
    pub triadic: PitchClassSet,
    pub fifth: PitchClassSet,
    pub root: PitchClassSet,
}

impl TpsLevels {
    /// Levels in the fixed comparison order: diatonic, triadic, fifth, root.
    pub fn as_array(&self) -> [PitchClassSet; 4] {
        [self.diatonic, self.triadic, self.fifth, self.root]
    }
}

/// A chord placed in a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TonalPitchSpace {
    pub chord: Chord,
    pub key: Key,
}

impl TonalPitchSpace {
    pub fn new(chord: Chord, key: Key) -> Self {
        TonalPitchSpace { chord, key }
    }

    /// Parse a Harte chord symbol and a "<note>[:<mode>]" key token.
    ///
    /// A key without a root (":min") takes the chord's root; a key without a
    /// mode is major.
    pub fn from_symbols(chord: &str, key: &str) -> Result<Self, TpsdError> {
        TonalPitchSpace::from_symbols_with_mode(chord, key, Mode::Major)
    }

    /// As `from_symbols`, with an explicit mode for keys that name none.
    pub fn from_symbols_with_mode(
        chord: &str,
        key: &str,
        default_mode: Mode,
    ) -> Result<Self, TpsdError> {
        let chord = Chord::parse(chord)?;
        let key = Key::parse_with(key, Some(chord.root), default_mode)?;
        Ok(TonalPitchSpace::new(chord, key))
    }

    pub fn root_level(&self) -> PitchClassSet {
        PitchClassSet::single(self.chord.root)
    }

    pub fn fifth_level(&self) -> PitchClassSet {
        let mut level = self.root_level();
        level.insert((self.chord.root + 7) % 12);
        level
    }

    pub fn triadic_level(&self) -> PitchClassSet {
        self.chord.tones
    }

    pub fn diatonic_level(&self) -> PitchClassSet {
        self.key.scale().union(self.chord.tones)
    }

    pub fn levels(&self) -> TpsLevels {
        TpsLevels {
            diatonic: self.diatonic_level(),
            triadic: self.triadic_level(),
            fifth: self.fifth_level(),
            root: self.root_level(),
        }
    }
}
