// Tonal Pitch Step Distance
//
// Measures how far apart two chords, or two chord sequences, are in
// Lerdahl's Tonal Pitch Space, following De Haas, Veltkamp and Wiering's
// Tonal Pitch Step Distance (ISMIR 2008). A chord is placed in a key and
// reduced to four nested pitch-class levels; two chords are compared level
// by level plus a circle-of-fifths term; a chord sequence becomes a
// beat-sampled step function of distances to its tonic; two sequences are
// compared by the minimum area between their step functions.
//
// Architecture:
// - pitch_space.rs: Pitch-class sets, enharmonic spellings, modes and keys
// - chord.rs: Chord value type (root + pitch-class set)
// - harte.rs: Harte chord-notation parser and corpus token normalisation
// - tps.rs: The four TPS levels of a chord in a key
// - comparison.rs: Chord distance rule, circle-of-fifths rule, distance
// - profile.rs: Beat-sampled distance profile of a chord sequence
// - alignment.rs: Minimum-area alignment of two profiles (rayon offset scan)
// - display.rs: Level/comparison tables and profile listings as text
// - song.rs: JSON song files and chord-annotation text input
// - config.rs: JSON configuration (default mode, scan and display settings)
// - error.rs: `TpsdError`
//
// Everything is synchronous and pure: no shared state, no I/O outside
// song.rs and config.rs. Errors are returned, never logged by the library.

pub mod alignment;
pub mod chord;
pub mod comparison;
pub mod config;
pub mod display;
pub mod error;
pub mod harte;
pub mod pitch_space;
pub mod profile;
pub mod song;
pub mod tps;

pub use alignment::{Alignment, AlignmentConfig, TpsdComparison, minimum_area};
pub use chord::Chord;
pub use comparison::{ComparisonResult, TpsComparison};
pub use config::TpsdConfig;
pub use error::TpsdError;
pub use pitch_space::{Key, Mode, PitchClass, PitchClassSet};
pub use profile::{KeyAssignment, SequenceProfile};
pub use tps::{TonalPitchSpace, TpsLevels};
