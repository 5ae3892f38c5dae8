// Harte chord-notation parser.
//
// Turns symbols such as "C", "G:7", "D:min7/b3" or
// "E:(b2,2,b3,b4,4,b5,5,b6,6,b7,7)" into a `Chord` (root pitch class plus
// pitch-class set). The grammar handled here:
//
//   symbol    := root [ ":" [ shorthand ] [ "(" degrees ")" ] ] [ "/" degree ]
//   root      := letter accidental*          (resolved via NOTE_SPELLINGS)
//   degrees   := degree ( "," degree )*
//   degree    := [ "*" ] ( "b" | "#" )* number     ("*" removes the degree)
//
// A bare root is a major triad; "root:(degrees)" builds the chord from the
// listed degrees alone. The bass degree after "/" is added to the chord's
// pitch classes. "N" and "X" (no chord / unknown) carry no root and are
// rejected, since the pitch-space model needs one.
//
// Annotation files from the chord corpora use a few non-standard tokens;
// `normalize_symbol` rewrites them before parsing.

use crate::chord::Chord;
use crate::error::TpsdError;
use crate::pitch_space::{PitchClassSet, note_index, transpose};

/// Shorthand -> degree list, per the Harte syntax plus the corpus extras.
const SHORTHANDS: &[(&str, &[&str])] = &[
    ("maj", &["1", "3", "5"]),
    ("min", &["1", "b3", "5"]),
    ("dim", &["1", "b3", "b5"]),
    ("aug", &["1", "3", "#5"]),
    ("maj7", &["1", "3", "5", "7"]),
    ("min7", &["1", "b3", "5", "b7"]),
    ("7", &["1", "3", "5", "b7"]),
    ("dim7", &["1", "b3", "b5", "bb7"]),
    ("hdim7", &["1", "b3", "b5", "b7"]),
    ("minmaj7", &["1", "b3", "5", "7"]),
    ("maj6", &["1", "3", "5", "6"]),
    ("min6", &["1", "b3", "5", "6"]),
    ("9", &["1", "3", "5", "b7", "9"]),
    ("maj9", &["1", "3", "5", "7", "9"]),
    ("min9", &["1", "b3", "5", "b7", "9"]),
    ("11", &["1", "3", "5", "b7", "9", "11"]),
    ("13", &["1", "3", "5", "b7", "9", "11", "13"]),
    ("sus2", &["1", "2", "5"]),
    ("sus4", &["1", "4", "5"]),
    ("5", &["1", "5"]),
    ("1", &["1"]),
];

/// Semitones above the root of the natural degrees 1-13.
const DEGREE_SEMITONES: [i32; 13] = [0, 2, 4, 5, 7, 9, 11, 12, 14, 16, 17, 19, 21];

/// Rewrites applied to corpus annotations before parsing, in order. The
/// first entry keeps an already-complete "hdim7" from becoming "hdim77".
const CORPUS_REWRITES: [(&str, &str); 6] = [
    ("hdim7", "hdim"),
    ("hdim", "hdim7"),
    ("(s5,*5)", "1"),
    ("*5", "1,3"),
    ("s9", "1,5,9"),
    ("s5", "1, 5"),
];

/// Parse a Harte-notation chord symbol.
pub fn parse(symbol: &str) -> Result<Chord, TpsdError> {
    let symbol = symbol.trim();
    if symbol.is_empty() {
        return Err(TpsdError::chord_parse(symbol, "empty symbol"));
    }
    if symbol == "N" || symbol == "X" {
        return Err(TpsdError::chord_parse(symbol, "no-chord symbol has no root"));
    }

    let (body, bass) = match symbol.split_once('/') {
        Some((body, bass)) => (body, Some(bass)),
        None => (symbol, None),
    };
    let (root_name, quality) = match body.split_once(':') {
        Some((root, quality)) => (root, Some(quality)),
        None => (body, None),
    };
    if !root_name.starts_with(|c: char| matches!(c, 'A'..='G')) {
        return Err(TpsdError::chord_parse(symbol, format!("invalid root `{root_name}`")));
    }
    let root = note_index(root_name)?;

    let mut tones = PitchClassSet::new();
    match quality {
        None => add_degrees(&mut tones, root, shorthand_degrees(symbol, "maj")?, symbol)?,
        Some(quality) => {
            let (shorthand, degrees) = split_degree_list(symbol, quality)?;
            if !shorthand.is_empty() {
                add_degrees(&mut tones, root, shorthand_degrees(symbol, shorthand)?, symbol)?;
            } else if degrees.is_none() {
                return Err(TpsdError::chord_parse(symbol, "missing chord quality after `:`"));
            }
            if let Some(degrees) = degrees {
                let degrees: Vec<&str> = degrees.split(',').map(str::trim).collect();
                add_degrees(&mut tones, root, &degrees, symbol)?;
            }
        }
    }

    if let Some(bass) = bass {
        let bass = bass.trim();
        if bass.starts_with('*') {
            return Err(TpsdError::chord_parse(symbol, "bass degree cannot be removed"));
        }
        add_degrees(&mut tones, root, &[bass], symbol)?;
    }

    Ok(Chord::new(root, tones))
}

/// Rewrite corpus-specific tokens ("hdim", "s5", "*5") into plain Harte.
pub fn normalize_symbol(symbol: &str) -> String {
    CORPUS_REWRITES
        .iter()
        .fold(symbol.trim().to_string(), |acc, (from, to)| acc.replace(from, to))
}

/// Split "min7(9,11)" into ("min7", Some("9,11")).
fn split_degree_list<'a>(
    symbol: &str,
    quality: &'a str,
) -> Result<(&'a str, Option<&'a str>), TpsdError> {
    let Some(open) = quality.find('(') else {
        return Ok((quality, None));
    };
    let Some(inner) = quality[open + 1..].strip_suffix(')') else {
        return Err(TpsdError::chord_parse(symbol, "unbalanced parentheses"));
    };
    if inner.contains(['(', ')']) {
        return Err(TpsdError::chord_parse(symbol, "nested parentheses"));
    }
    Ok((&quality[..open], Some(inner)))
}

fn shorthand_degrees(symbol: &str, shorthand: &str) -> Result<&'static [&'static str], TpsdError> {
    SHORTHANDS
        .iter()
        .find(|(name, _)| *name == shorthand)
        .map(|(_, degrees)| *degrees)
        .ok_or_else(|| TpsdError::chord_parse(symbol, format!("unknown shorthand `{shorthand}`")))
}

fn add_degrees(
    tones: &mut PitchClassSet,
    root: u8,
    degrees: &[&str],
    symbol: &str,
) -> Result<(), TpsdError> {
    for token in degrees {
        let (remove, degree) = match token.strip_prefix('*') {
            Some(rest) => (true, rest),
            None => (false, *token),
        };
        let pc = transpose(root, degree_semitones(symbol, degree)?);
        if remove {
            tones.remove(pc);
        } else {
            tones.insert(pc);
        }
    }
    Ok(())
}

/// Semitone offset of a degree token such as "b3", "#11" or "bb7".
fn degree_semitones(symbol: &str, degree: &str) -> Result<i32, TpsdError> {
    let digits_at = degree
        .find(|c: char| c.is_ascii_digit())
        .ok_or_else(|| TpsdError::chord_parse(symbol, format!("invalid degree `{degree}`")))?;
    let (modifiers, number) = degree.split_at(digits_at);

    let mut shift = 0;
    for m in modifiers.chars() {
        match m {
            'b' => shift -= 1,
            '#' => shift += 1,
            _ => {
                return Err(TpsdError::chord_parse(
                    symbol,
                    format!("invalid degree modifier `{m}`"),
                ));
            }
        }
    }

    let number: usize = number
        .parse()
        .map_err(|_| TpsdError::chord_parse(symbol, format!("invalid degree `{degree}`")))?;
    if !(1..=DEGREE_SEMITONES.len()).contains(&number) {
        return Err(TpsdError::chord_parse(
            symbol,
            format!("degree {number} out of range 1-13"),
        ));
    }
    Ok(DEGREE_SEMITONES[number - 1] + shift)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pcs(symbol: &str) -> Vec<u8> {
        parse(symbol).unwrap().tones.iter().collect()
    }

    #[test]
    fn test_bare_root_is_major_triad() {
        let chord = parse("C").unwrap();
        assert_eq!(chord.root, 0);
        assert_eq!(pcs("C"), vec![0, 4, 7]);
        assert_eq!(pcs("F#"), vec![1, 6, 10]);
    }

    #[test]
    fn test_shorthands() {
        assert_eq!(pcs("D:min"), vec![2, 5, 9]);
        assert_eq!(pcs("G:7"), vec![2, 5, 7, 11]);
        assert_eq!(pcs("B:hdim7"), vec![2, 5, 9, 11]);
        assert_eq!(pcs("C:dim7"), vec![0, 3, 6, 9]);
        assert_eq!(pcs("A:sus4"), vec![2, 4, 9]);
        assert_eq!(pcs("Bb:maj7"), vec![2, 5, 9, 10]);
        assert_eq!(pcs("E:5"), vec![4, 11]);
    }

    #[test]
    fn test_degree_lists_add_and_remove() {
        assert_eq!(pcs("C:maj(9)"), vec![0, 2, 4, 7]);
        assert_eq!(pcs("C:maj(*5)"), vec![0, 4]);
        assert_eq!(pcs("C:(b3,5)"), vec![0, 3, 7]);
        assert_eq!(pcs("C:min7(11)"), vec![0, 3, 5, 7, 10]);
    }

    #[test]
    fn test_full_chromatic_chord() {
        let chord = parse("E:(b2,2,b3,b4,4,b5,5,b6,6,b7,7)").unwrap();
        assert_eq!(chord.root, 4);
        assert_eq!(chord.tones, PitchClassSet::CHROMATIC);
    }

    #[test]
    fn test_bass_degree_is_added() {
        assert_eq!(pcs("C/b7"), vec![0, 4, 7, 10]);
        assert_eq!(pcs("D:min/5"), vec![2, 5, 9]);
        assert_eq!(parse("D:min/5").unwrap().root, 2);
    }

    #[test]
    fn test_enharmonic_roots() {
        assert_eq!(parse("Db:maj").unwrap().root, 1);
        assert_eq!(parse("Cb").unwrap().root, 11);
        assert_eq!(
            parse("Cbb:maj"),
            Err(TpsdError::UnknownNote("Cbb".into()))
        );
    }

    #[test]
    fn test_malformed_symbols() {
        for bad in ["", "N", "X", "H:maj", "C:foo", "C:maj(9", "C:(b3,x)", "C:(14)", "C:", "C/*3"] {
            assert!(parse(bad).is_err(), "`{bad}` should not parse");
        }
        assert!(matches!(parse("C:foo"), Err(TpsdError::ChordParse { .. })));
    }

    #[test]
    fn test_corpus_normalization() {
        assert_eq!(normalize_symbol("B:hdim"), "B:hdim7");
        assert_eq!(normalize_symbol("B:hdim7"), "B:hdim7");
        assert_eq!(normalize_symbol("C:(s5,*5)"), "C:1");
        assert_eq!(normalize_symbol("C:(*5)"), "C:(1,3)");
        assert_eq!(normalize_symbol("C:(s9)"), "C:(1,5,9)");
        assert_eq!(normalize_symbol("C:(s5)"), "C:(1, 5)");
        assert_eq!(pcs(&normalize_symbol("C:(s5)")), vec![0, 7]);
    }
}
