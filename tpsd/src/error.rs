// Error type shared by every fallible operation in the crate.
//
// All failures here are input-validation failures: an unknown note spelling,
// an unsupported mode token, a malformed chord symbol, sequences whose
// lengths disagree, or an empty profile handed to the alignment search.
// None of them is transient, so there is no retry path anywhere. Errors are
// returned to the caller untouched; the library never logs or swallows them.
//
// File loading (song files, config files) sits outside this enum and uses
// `Box<dyn std::error::Error>`, matching the JSON loaders elsewhere.

use thiserror::Error;

/// Validation failures raised by pitch-space, chord, profile and alignment
/// operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TpsdError {
    /// A note name has no entry in the enharmonic table.
    #[error("note `{0}` is not indexed, try an enharmonic spelling")]
    UnknownNote(String),

    /// A key mode token is not one of maj, min, dor, mix, lyd, phr, loc.
    #[error("invalid key mode `{0}`")]
    InvalidMode(String),

    /// A chord symbol could not be parsed as Harte notation.
    #[error("cannot parse chord `{symbol}`: {reason}")]
    ChordParse { symbol: String, reason: String },

    /// Chords, keys and durations of a sequence disagree in length.
    #[error("size mismatch: {chords} chords, {keys} keys, {durations} durations")]
    SequenceLengthMismatch {
        chords: usize,
        keys: usize,
        durations: usize,
    },

    /// Alignment was asked to compare a profile with no samples.
    #[error("cannot align an empty sequence profile")]
    EmptySequence,
}

impl TpsdError {
    pub(crate) fn chord_parse(symbol: &str, reason: impl Into<String>) -> Self {
        TpsdError::ChordParse {
            symbol: symbol.to_string(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_offending_input() {
        let err = TpsdError::UnknownNote("H".into());
        assert!(err.to_string().contains("`H`"));

        let err = TpsdError::chord_parse("C:foo", "unknown shorthand `foo`");
        assert_eq!(
            err.to_string(),
            "cannot parse chord `C:foo`: unknown shorthand `foo`"
        );

        let err = TpsdError::SequenceLengthMismatch {
            chords: 3,
            keys: 3,
            durations: 2,
        };
        assert_eq!(
            err.to_string(),
            "size mismatch: 3 chords, 3 keys, 2 durations"
        );
    }
}
