// Chord value type: a root pitch class plus the set of sounding pitch classes.
//
// Chords are produced either directly from pitch classes or by parsing a
// Harte-notation symbol (see harte.rs). Once built a chord is never mutated;
// everything downstream (tps.rs, comparison.rs) reads it by value.

use crate::error::TpsdError;
use crate::harte;
use crate::pitch_space::{PitchClass, PitchClassSet};
use serde::{Deserialize, Deserializer, Serialize, de};
use std::str::FromStr;

/// A chord reduced to what the Tonal Pitch Space model needs.
///
/// `tones` always contains `root`; deserializing goes through `Chord::new`
/// so that holds for chords read from JSON too.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Chord {
    pub root: PitchClass,
    pub tones: PitchClassSet,
}

impl Chord {
    pub fn new(root: PitchClass, mut tones: PitchClassSet) -> Self {
        let root = root % 12;
        tones.insert(root);
        Chord { root, tones }
    }

    /// Parse a Harte-notation symbol such as "G:7" or "E:(b2,2,b3)".
    pub fn parse(symbol: &str) -> Result<Self, TpsdError> {
        harte::parse(symbol)
    }
}

impl<'de> Deserialize<'de> for Chord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Fields {
            root: PitchClass,
            tones: PitchClassSet,
        }

        let fields = Fields::deserialize(deserializer)?;
        if fields.root >= 12 {
            return Err(de::Error::custom(format!(
                "chord root {} out of range 0-11",
                fields.root
            )));
        }
        Ok(Chord::new(fields.root, fields.tones))
    }
}

impl FromStr for Chord {
    type Err = TpsdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Chord::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_is_always_a_tone() {
        let chord = Chord::new(2, [5, 9].into_iter().collect());
        assert!(chord.tones.contains(2));
        assert_eq!(chord.tones.len(), 3);
    }

    #[test]
    fn test_root_is_reduced_modulo_12() {
        let chord = Chord::new(14, PitchClassSet::new());
        assert_eq!(chord.root, 2);
        assert_eq!(chord.tones, PitchClassSet::single(2));
    }

    #[test]
    fn test_deserialize_restores_root_in_tones() {
        let chord: Chord = serde_json::from_str(r#"{"root":3,"tones":[0,4,7]}"#).unwrap();
        assert!(chord.tones.contains(3));
        assert_eq!(chord.tones.iter().collect::<Vec<_>>(), vec![0, 3, 4, 7]);

        assert!(serde_json::from_str::<Chord>(r#"{"root":12,"tones":[0]}"#).is_err());
        assert!(serde_json::from_str::<Chord>(r#"{"root":0,"tones":[13]}"#).is_err());
    }

    #[test]
    fn test_serde_roundtrip_keeps_chord() {
        let chord = Chord::parse("B:hdim7").unwrap();
        let json = serde_json::to_string(&chord).unwrap();
        assert_eq!(json, r#"{"root":11,"tones":[2,5,9,11]}"#);
        assert_eq!(serde_json::from_str::<Chord>(&json).unwrap(), chord);
    }

    #[test]
    fn test_from_str_delegates_to_harte() {
        let chord: Chord = "G:7".parse().unwrap();
        assert_eq!(chord.root, 7);
        assert_eq!(chord.tones.iter().collect::<Vec<_>>(), vec![2, 5, 7, 11]);
    }
}
