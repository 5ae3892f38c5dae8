// Text views of TPS levels, chord comparisons and profiles.
//
// `level_table` is the display-ready form of a chord in a key: one row per
// level (root, fifth, triadic, diatonic) across the 12 chromatic columns,
// holding the pitch class where the level contains it and nothing
// elsewhere. `comparison_table` lays two chords over the same grid and flags
// the cells where they disagree, which are exactly the cells the chord
// distance rule counts.
//
// The `render_*` functions turn those views into aligned plain text for
// the CLI. Nothing here computes a distance; it only reads the levels that
// tps.rs and comparison.rs produce.

use crate::comparison::TpsComparison;
use crate::pitch_space::{PitchClass, PitchClassSet, pitch_name};
use crate::profile::SequenceProfile;
use crate::tps::{TonalPitchSpace, TpsLevels};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// Row labels, top to bottom, matching `LevelTable` row order.
pub const LEVEL_LABELS: [&str; 4] = ["root", "fifth", "triadic", "diatonic"];

/// Display settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Text shown in columns a level does not contain.
    pub placeholder: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        DisplayConfig {
            placeholder: "_".to_string(),
        }
    }
}

/// One level across the 12 chromatic columns.
pub type LevelRow = [Option<PitchClass>; 12];

/// Rows root, fifth, triadic, diatonic.
pub type LevelTable = [LevelRow; 4];

/// A cell of a two-chord comparison grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonCell {
    /// Both chords agree: the pitch class is in both levels, or in neither.
    Same(Option<PitchClass>),
    /// The pitch class is in exactly one of the two levels.
    Differs(PitchClass),
}

fn level_row(level: PitchClassSet) -> LevelRow {
    std::array::from_fn(|pc| {
        let pc = pc as PitchClass;
        level.contains(pc).then_some(pc)
    })
}

/// Levels top-down: root first, diatonic last.
fn top_down(levels: &TpsLevels) -> [PitchClassSet; 4] {
    [levels.root, levels.fifth, levels.triadic, levels.diatonic]
}

/// The display-ready table for one chord in one key.
pub fn level_table(tps: &TonalPitchSpace) -> LevelTable {
    top_down(&tps.levels()).map(level_row)
}

/// Both chords of a comparison on one grid, flagging disagreements.
pub fn comparison_table(cmp: &TpsComparison) -> [[ComparisonCell; 12]; 4] {
    let a = top_down(cmp.levels_a());
    let b = top_down(cmp.levels_b());
    std::array::from_fn(|row| {
        std::array::from_fn(|pc| {
            let pc = pc as PitchClass;
            match (a[row].contains(pc), b[row].contains(pc)) {
                (true, true) => ComparisonCell::Same(Some(pc)),
                (false, false) => ComparisonCell::Same(None),
                _ => ComparisonCell::Differs(pc),
            }
        })
    })
}

/// Render a level table with the chromatic and note-name rows underneath.
pub fn render_levels(tps: &TonalPitchSpace, config: &DisplayConfig) -> String {
    let mut rows: Vec<(String, Vec<String>)> = LEVEL_LABELS
        .iter()
        .zip(level_table(tps))
        .map(|(label, row)| {
            let cells = row
                .iter()
                .map(|cell| match cell {
                    Some(pc) => pc.to_string(),
                    None => config.placeholder.clone(),
                })
                .collect();
            (label.to_string(), cells)
        })
        .collect();
    push_chromatic_rows(&mut rows);
    render_rows(&rows)
}

/// Render a comparison grid; cells where the chords differ carry a `*`.
pub fn render_comparison(cmp: &TpsComparison, config: &DisplayConfig) -> String {
    let mut rows: Vec<(String, Vec<String>)> = LEVEL_LABELS
        .iter()
        .zip(comparison_table(cmp))
        .map(|(label, row)| {
            let cells = row
                .iter()
                .map(|cell| match cell {
                    ComparisonCell::Same(Some(pc)) => pc.to_string(),
                    ComparisonCell::Same(None) => config.placeholder.clone(),
                    ComparisonCell::Differs(pc) => format!("{pc}*"),
                })
                .collect();
            (label.to_string(), cells)
        })
        .collect();
    push_chromatic_rows(&mut rows);
    render_rows(&rows)
}

/// One line per chord: beat range, distance, and a bar of one `#` per
/// half point of distance.
pub fn render_profile(profile: &SequenceProfile) -> String {
    let mut out = String::new();
    let mut beat = 0usize;
    for span in profile.spans() {
        let end = beat + span.beats as usize;
        let bar = "#".repeat((span.distance * 2.0).round() as usize);
        let _ = writeln!(out, "{:>6}..{:<6} {:>5.1}  {}", beat, end, span.distance, bar);
        beat = end;
    }
    out
}

fn push_chromatic_rows(rows: &mut Vec<(String, Vec<String>)>) {
    rows.push((
        "chromatic".to_string(),
        (0..12u8).map(|pc| pc.to_string()).collect(),
    ));
    rows.push((
        String::new(),
        (0..12u8).map(|pc| pitch_name(pc).to_string()).collect(),
    ));
}

fn render_rows(rows: &[(String, Vec<String>)]) -> String {
    let label_width = rows.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
    let cell_width = rows
        .iter()
        .flat_map(|(_, cells)| cells.iter().map(String::len))
        .max()
        .unwrap_or(1);

    let mut out = String::new();
    for (label, cells) in rows {
        let _ = write!(out, "{label:<label_width$}");
        for cell in cells {
            let _ = write!(out, " {cell:>cell_width$}");
        }
        out.push('\n');
    }
    out
}
