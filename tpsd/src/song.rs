// Chord-sequence input: JSON song files and corpus annotation text.
//
// A song is a list of Harte chord symbols, the key(s) they are heard in and
// the duration of each chord in beats. Two on-disk forms are accepted:
//
// - JSON: { "key": "C:maj", "chords": ["C", "G:7"], "durations": [4, 4] }
//   where "key" may also be a list with one key per chord;
// - annotation text: first line is the key, each following line one chord
//   symbol (corpus tokens are normalised, see harte::normalize_symbol).
//   Annotation files carry no timing, so durations come from the caller.
//
// Loading returns boxed errors like the other file loaders; turning a song
// into a profile returns `TpsdError`.

use crate::error::TpsdError;
use crate::harte::normalize_symbol;
use crate::pitch_space::Mode;
use crate::profile::{KeyAssignment, SequenceProfile};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A chord sequence with its keys and per-chord beat durations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Song {
    pub key: KeyAssignment<String>,
    pub chords: Vec<String>,
    pub durations: Vec<u32>,
}

impl Song {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Parse annotation text: key on the first line, one chord per line
    /// after it. Blank lines are skipped.
    pub fn from_annotation(
        text: &str,
        durations: Vec<u32>,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let mut lines = text.lines().map(str::trim);
        let key = lines
            .next()
            .filter(|line| !line.is_empty())
            .ok_or("annotation has no key line")?
            .to_string();

        let mut skipped = 0;
        let mut chords = Vec::new();
        for line in lines {
            if line.is_empty() {
                skipped += 1;
                continue;
            }
            chords.push(normalize_symbol(line));
        }
        if skipped > 0 {
            log::warn!("skipped {} blank lines in chord annotation", skipped);
        }

        Ok(Song {
            key: KeyAssignment::Global(key),
            chords,
            durations,
        })
    }

    /// Load a song file. `.json` files are read as JSON songs; anything
    /// else is read as annotation text and needs `durations`.
    pub fn load(
        path: &Path,
        durations: Option<Vec<u32>>,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let data = std::fs::read_to_string(path)?;
        let is_json = path.extension().is_some_and(|ext| ext == "json");
        let song = if is_json {
            let mut song = Song::from_json(&data)?;
            if let Some(durations) = durations {
                song.durations = durations;
            }
            song
        } else {
            let durations = durations
                .ok_or_else(|| format!("{}: annotation files need --durations", path.display()))?;
            Song::from_annotation(&data, durations)?
        };
        log::info!(
            "loaded {} chords from {}",
            song.chords.len(),
            path.display()
        );
        Ok(song)
    }

    pub fn profile(&self, default_mode: Mode) -> Result<SequenceProfile, TpsdError> {
        let keys = match &self.key {
            KeyAssignment::Global(key) => KeyAssignment::Global(key.as_str()),
            KeyAssignment::PerChord(keys) => {
                KeyAssignment::PerChord(keys.iter().map(String::as_str).collect())
            }
        };
        let chords: Vec<&str> = self.chords.iter().map(String::as_str).collect();
        SequenceProfile::from_symbols(&chords, &keys, &self.durations, default_mode)
    }
}
