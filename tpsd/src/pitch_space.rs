// Pitch-class arithmetic, enharmonic spelling and key/mode tables.
//
// Everything the Tonal Pitch Space model needs to know about the chromatic
// scale lives here:
// - `PitchClassSet`: a 12-bit set over pitch classes 0-11
// - `NOTE_SPELLINGS`: the static enharmonic table (note name -> pitch class)
// - `Mode`: the seven supported modes and their whole/half step patterns
// - `Key`: a tonic pitch class plus a mode, parsed from "C:maj"-style tokens
//
// All tables are immutable constants. Pitch-class arithmetic is modulo 12
// throughout; a `u8` pitch class is always kept in 0..12.
//
// Used by tps.rs for the diatonic level and by profile.rs for the tonic
// reference chord of each key.

use crate::chord::Chord;
use crate::error::TpsdError;
use serde::{Deserialize, Deserializer, Serialize, de};
use std::fmt;
use std::str::FromStr;

/// Pitch class: chromatic position 0-11 (0 = C).
pub type PitchClass = u8;

/// Every accepted spelling of each pitch class, indexed by pitch class.
pub const NOTE_SPELLINGS: [&[&str]; 12] = [
    &["C", "Dbb", "B#"],
    &["C#", "Db"],
    &["D", "C##", "Ebb"],
    &["Eb", "D#"],
    &["E", "D##", "Fb"],
    &["F", "E#", "Gbb"],
    &["F#", "Gb"],
    &["G", "F##", "Abb"],
    &["G#", "Ab"],
    &["A", "G##", "Bbb"],
    &["Bb", "A#"],
    &["B", "A##", "Cb"],
];

/// Display names for the 12 chromatic columns.
const PITCH_NAMES: [&str; 12] = [
    "C", "C#", "D", "Eb", "E", "F", "F#", "G", "G#", "A", "Bb", "B",
];

/// Resolve a note spelling ("C", "Db", "F##") to its pitch class.
pub fn note_index(name: &str) -> Result<PitchClass, TpsdError> {
    NOTE_SPELLINGS
        .iter()
        .position(|spellings| spellings.contains(&name))
        .map(|pc| pc as PitchClass)
        .ok_or_else(|| TpsdError::UnknownNote(name.to_string()))
}

/// Canonical display name for a pitch class.
pub fn pitch_name(pc: PitchClass) -> &'static str {
    PITCH_NAMES[(pc % 12) as usize]
}

/// Transpose a pitch class by a (possibly negative) number of semitones.
pub fn transpose(pc: PitchClass, semitones: i32) -> PitchClass {
    (pc as i32 + semitones).rem_euclid(12) as PitchClass
}

/// A set of pitch classes stored as a 12-bit mask.
///
/// Bit `n` is set when pitch class `n` is a member. Iteration is always in
/// ascending pitch-class order, which keeps every derived view deterministic.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "Vec<PitchClass>", try_from = "Vec<PitchClass>")]
pub struct PitchClassSet(u16);

impl PitchClassSet {
    pub const EMPTY: PitchClassSet = PitchClassSet(0);
    #[cfg(test)]
    pub const CHROMATIC: PitchClassSet = PitchClassSet(0x0FFF);

    pub fn new() -> Self {
        PitchClassSet::EMPTY
    }

    pub fn single(pc: PitchClass) -> Self {
        let mut set = PitchClassSet::EMPTY;
        set.insert(pc);
        set
    }

    pub fn insert(&mut self, pc: PitchClass) {
        self.0 |= 1 << (pc % 12);
    }

    pub fn remove(&mut self, pc: PitchClass) {
        self.0 &= !(1 << (pc % 12));
    }

    pub fn contains(self, pc: PitchClass) -> bool {
        pc < 12 && self.0 & (1 << pc) != 0
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn union(self, other: PitchClassSet) -> PitchClassSet {
        PitchClassSet(self.0 | other.0)
    }

    #[cfg(test)]
    pub fn is_subset(self, other: PitchClassSet) -> bool {
        self.0 & !other.0 == 0
    }

    /// Number of pitch classes present in exactly one of the two sets.
    pub fn symmetric_difference_len(self, other: PitchClassSet) -> usize {
        (self.0 ^ other.0).count_ones() as usize
    }

    /// Members in ascending order.
    pub fn iter(self) -> impl Iterator<Item = PitchClass> {
        (0..12u8).filter(move |&pc| self.contains(pc))
    }
}

impl FromIterator<PitchClass> for PitchClassSet {
    fn from_iter<I: IntoIterator<Item = PitchClass>>(iter: I) -> Self {
        let mut set = PitchClassSet::EMPTY;
        for pc in iter {
            set.insert(pc);
        }
        set
    }
}

impl From<PitchClassSet> for Vec<PitchClass> {
    fn from(set: PitchClassSet) -> Self {
        set.iter().collect()
    }
}

impl TryFrom<Vec<PitchClass>> for PitchClassSet {
    type Error = String;

    fn try_from(pcs: Vec<PitchClass>) -> Result<Self, Self::Error> {
        if let Some(bad) = pcs.iter().find(|&&pc| pc >= 12) {
            return Err(format!("pitch class {bad} out of range 0-11"));
        }
        Ok(pcs.into_iter().collect())
    }
}

impl fmt::Debug for PitchClassSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// The seven supported modes, each a cyclic pattern of whole and half steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mode {
    /// Ionian: W W H W W W H
    #[serde(rename = "maj")]
    Major,
    /// Aeolian: W H W W H W W
    #[serde(rename = "min")]
    Minor,
    /// W H W W W H W
    #[serde(rename = "dor")]
    Dorian,
    /// Major with lowered 7th: W W H W W H W
    #[serde(rename = "mix")]
    Mixolydian,
    /// Raised 4th: W W W H W W H
    #[serde(rename = "lyd")]
    Lydian,
    /// Half-step from 1 to 2: H W W W H W W
    #[serde(rename = "phr")]
    Phrygian,
    /// Diminished 5th over the final: H W W H W W W
    #[serde(rename = "loc")]
    Locrian,
}

impl Mode {
    pub const ALL: [Mode; 7] = [
        Mode::Major,
        Mode::Minor,
        Mode::Dorian,
        Mode::Mixolydian,
        Mode::Lydian,
        Mode::Phrygian,
        Mode::Locrian,
    ];

    /// Semitone steps walked from the key root; always sums to 12.
    ///
    /// Locrian uses its own H W W H W W W pattern. Published TPSD key
    /// tables reuse the major steps for it, so Locrian diatonic levels and
    /// distances differ from results computed with those tables.
    pub fn steps(self) -> [u8; 7] {
        match self {
            Mode::Major => [2, 2, 1, 2, 2, 2, 1],
            Mode::Minor => [2, 1, 2, 2, 1, 2, 2],
            Mode::Dorian => [2, 1, 2, 2, 2, 1, 2],
            Mode::Mixolydian => [2, 2, 1, 2, 2, 1, 2],
            Mode::Lydian => [2, 2, 2, 1, 2, 2, 1],
            Mode::Phrygian => [1, 2, 2, 2, 1, 2, 2],
            Mode::Locrian => [1, 2, 2, 1, 2, 2, 2],
        }
    }

    /// Three-letter token used in key strings.
    pub fn token(self) -> &'static str {
        match self {
            Mode::Major => "maj",
            Mode::Minor => "min",
            Mode::Dorian => "dor",
            Mode::Mixolydian => "mix",
            Mode::Lydian => "lyd",
            Mode::Phrygian => "phr",
            Mode::Locrian => "loc",
        }
    }

    /// Semitones above the root of the third and fifth of the tonic triad.
    fn tonic_triad(self) -> (u8, u8) {
        match self {
            Mode::Major | Mode::Lydian | Mode::Mixolydian => (4, 7),
            Mode::Minor | Mode::Dorian | Mode::Phrygian => (3, 7),
            Mode::Locrian => (3, 6),
        }
    }
}

impl FromStr for Mode {
    type Err = TpsdError;

    /// Only the first three characters matter, case-insensitively, so
    /// "Maj", "minor" and "Dorian" are all accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let prefix: String = s.chars().take(3).collect::<String>().to_lowercase();
        Mode::ALL
            .into_iter()
            .find(|mode| mode.token() == prefix)
            .ok_or_else(|| TpsdError::InvalidMode(s.to_string()))
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// A key: tonic pitch class plus mode.
///
/// Deserializing goes through `Key::new` and rejects roots outside 0-11.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Key {
    pub root: PitchClass,
    pub mode: Mode,
}

impl Key {
    pub fn new(root: PitchClass, mode: Mode) -> Self {
        Key {
            root: root % 12,
            mode,
        }
    }

    /// Parse a "<note>[:<mode>]" token.
    ///
    /// A missing mode falls back to `default_mode`. An empty root (":min")
    /// is only accepted when `fallback_root` is given; it is how a chord's
    /// own root stands in for the key root.
    pub fn parse_with(
        s: &str,
        fallback_root: Option<PitchClass>,
        default_mode: Mode,
    ) -> Result<Self, TpsdError> {
        let (root_name, mode) = match s.split_once(':') {
            Some((root, mode)) => (root, mode.parse()?),
            None => (s, default_mode),
        };
        let root = match (root_name.trim(), fallback_root) {
            ("", Some(pc)) => pc,
            (name, _) => note_index(name)?,
        };
        Ok(Key::new(root, mode))
    }

    /// The seven scale-degree pitch classes, walked from the root through
    /// the mode's steps.
    pub fn scale(&self) -> PitchClassSet {
        let mut pc = self.root;
        let mut scale = PitchClassSet::new();
        for step in self.mode.steps() {
            pc = (pc + step) % 12;
            scale.insert(pc);
        }
        scale
    }

    /// The key's own triad built on its root: the "home" chord that
    /// sequence profiles measure against.
    pub fn tonic_chord(&self) -> Chord {
        let (third, fifth) = self.mode.tonic_triad();
        Chord::new(
            self.root,
            [self.root, (self.root + third) % 12, (self.root + fifth) % 12]
                .into_iter()
                .collect(),
        )
    }
}

#[cfg(test)]
impl Key {
    pub fn major(root: PitchClass) -> Self {
        Key::new(root, Mode::Major)
    }

    pub fn minor(root: PitchClass) -> Self {
        Key::new(root, Mode::Minor)
    }
}

impl<'de> Deserialize<'de> for Key {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Fields {
            root: PitchClass,
            mode: Mode,
        }

        let fields = Fields::deserialize(deserializer)?;
        if fields.root >= 12 {
            return Err(de::Error::custom(format!(
                "key root {} out of range 0-11",
                fields.root
            )));
        }
        Ok(Key::new(fields.root, fields.mode))
    }
}

impl FromStr for Key {
    type Err = TpsdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Key::parse_with(s, None, Mode::Major)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", pitch_name(self.root), self.mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_index_enharmonics() {
        assert_eq!(note_index("C"), Ok(0));
        assert_eq!(note_index("B#"), Ok(0));
        assert_eq!(note_index("Dbb"), Ok(0));
        assert_eq!(note_index("Db"), Ok(1));
        assert_eq!(note_index("Fb"), Ok(4));
        assert_eq!(note_index("A#"), Ok(10));
        assert_eq!(note_index("Cb"), Ok(11));
        assert_eq!(note_index("H"), Err(TpsdError::UnknownNote("H".into())));
    }

    #[test]
    fn test_every_pitch_class_has_a_spelling() {
        for pc in 0..12u8 {
            assert_eq!(note_index(pitch_name(pc)), Ok(pc));
        }
    }

    #[test]
    fn test_mode_steps_sum_to_octave() {
        for mode in Mode::ALL {
            let total: u8 = mode.steps().iter().sum();
            assert_eq!(total, 12, "{mode} steps should sum to 12");
        }
    }

    #[test]
    fn test_mode_parsing_uses_prefix() {
        assert_eq!("maj".parse::<Mode>(), Ok(Mode::Major));
        assert_eq!("Maj".parse::<Mode>(), Ok(Mode::Major));
        assert_eq!("minor".parse::<Mode>(), Ok(Mode::Minor));
        assert_eq!("Dorian".parse::<Mode>(), Ok(Mode::Dorian));
        assert_eq!(
            "blues".parse::<Mode>(),
            Err(TpsdError::InvalidMode("blues".into()))
        );
    }

    #[test]
    fn test_c_major_scale() {
        let key: Key = "C:maj".parse().unwrap();
        let scale: Vec<u8> = key.scale().iter().collect();
        assert_eq!(scale, vec![0, 2, 4, 5, 7, 9, 11]);
    }

    #[test]
    fn test_key_scale_wraps_modulo_12() {
        let key = Key::new(9, Mode::Minor); // A minor
        let scale: Vec<u8> = key.scale().iter().collect();
        assert_eq!(scale, vec![0, 2, 4, 5, 7, 9, 11]);

        let key = Key::new(4, Mode::Phrygian); // E phrygian
        assert_eq!(key.scale(), Key::major(0).scale());
    }

    #[test]
    fn test_locrian_uses_its_own_steps() {
        // B locrian is the white keys, unlike B major.
        assert_eq!(Key::new(11, Mode::Locrian).scale(), Key::major(0).scale());
        assert_ne!(Mode::Locrian.steps(), Mode::Major.steps());
    }

    #[test]
    fn test_key_parsing_defaults() {
        assert_eq!("G".parse::<Key>(), Ok(Key::major(7)));
        assert_eq!("Bb:min".parse::<Key>(), Ok(Key::minor(10)));
        assert_eq!(
            Key::parse_with(":min", Some(2), Mode::Major),
            Ok(Key::minor(2))
        );
        assert!(":min".parse::<Key>().is_err());
        assert_eq!(
            "C:xyz".parse::<Key>(),
            Err(TpsdError::InvalidMode("xyz".into()))
        );
    }

    #[test]
    fn test_tonic_chords() {
        let tones = |key: Key| key.tonic_chord().tones.iter().collect::<Vec<_>>();
        assert_eq!(tones(Key::major(0)), vec![0, 4, 7]);
        assert_eq!(tones(Key::minor(9)), vec![0, 4, 9]);
        assert_eq!(tones(Key::new(11, Mode::Locrian)), vec![2, 5, 11]);
        assert_eq!(Key::minor(9).tonic_chord().root, 9);
    }

    #[test]
    fn test_pitch_class_set_operations() {
        let a: PitchClassSet = [0, 4, 7].into_iter().collect();
        let b: PitchClassSet = [7, 11, 2, 5].into_iter().collect();
        assert_eq!(a.len(), 3);
        assert!(a.contains(4));
        assert!(!a.contains(12));
        assert_eq!(a.symmetric_difference_len(b), 5);
        assert!(a.is_subset(a.union(b)));
        assert!(!a.union(b).is_subset(a));
        assert_eq!(PitchClassSet::CHROMATIC.len(), 12);
    }

    #[test]
    fn test_pitch_class_set_serializes_as_list() {
        let set: PitchClassSet = [7, 0, 4].into_iter().collect();
        assert_eq!(serde_json::to_string(&set).unwrap(), "[0,4,7]");
        let back: PitchClassSet = serde_json::from_str("[4,0,7]").unwrap();
        assert_eq!(back, set);
        assert!(serde_json::from_str::<PitchClassSet>("[12]").is_err());
    }

    #[test]
    fn test_key_display_and_serde() {
        let key = Key::new(10, Mode::Dorian);
        assert_eq!(key.to_string(), "Bb:dor");
        assert_eq!(
            serde_json::to_string(&key).unwrap(),
            r#"{"root":10,"mode":"dor"}"#
        );
    }

    #[test]
    fn test_key_deserialize_rejects_out_of_range_root() {
        let key: Key = serde_json::from_str(r#"{"root":7,"mode":"mix"}"#).unwrap();
        assert_eq!(key, Key::new(7, Mode::Mixolydian));
        assert!(serde_json::from_str::<Key>(r#"{"root":250,"mode":"maj"}"#).is_err());
        assert!(serde_json::from_str::<Key>(r#"{"root":12,"mode":"maj"}"#).is_err());
        assert!(serde_json::from_str::<Key>(r#"{"root":0,"mode":"blues"}"#).is_err());
    }

    #[test]
    fn test_transpose() {
        assert_eq!(transpose(11, 1), 0);
        assert_eq!(transpose(0, -1), 11);
        assert_eq!(transpose(5, 19), 0);
    }
}
