// Tonal Pitch Step Distance: CLI entry point.
//
// A thin caller over the library: parses chords, keys and song files,
// forwards them to the core and prints the numbers (or JSON with --json).
//
// Usage:
//   tpsd levels <CHORD> <KEY>
//   tpsd compare <CHORD_A> <KEY_A> <CHORD_B> <KEY_B>
//   tpsd profile <SONG> [--durations 4,4,2]
//   tpsd align <SONG_A> <SONG_B> [--durations-a ..] [--durations-b ..]
//
// Songs are JSON files ({"key", "chords", "durations"}) or chord-annotation
// text (key on the first line, one chord per line) plus --durations.
// Set RUST_LOG=debug for tracing output.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tpsd::config::TpsdConfig;
use tpsd::display::{render_comparison, render_levels, render_profile};
use tpsd::song::Song;
use tpsd::{KeyAssignment, TonalPitchSpace, TpsComparison, alignment};

#[derive(Parser, Debug)]
#[command(name = "tpsd")]
#[command(about = "Tonal Pitch Space chord and chord-sequence distances")]
#[command(version)]
struct Args {
    /// JSON config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the four TPS levels of a chord in a key
    Levels { chord: String, key: String },
    /// Distance between two chords, each in its own key
    Compare {
        chord_a: String,
        key_a: String,
        chord_b: String,
        key_b: String,
    },
    /// Beat-sampled distance profile of a song
    Profile {
        song: PathBuf,
        /// Beats per chord, comma-separated
        #[arg(long, value_delimiter = ',')]
        durations: Option<Vec<u32>>,
    },
    /// Minimum-area distance between two songs
    Align {
        song_a: PathBuf,
        song_b: PathBuf,
        #[arg(long, value_delimiter = ',')]
        durations_a: Option<Vec<u32>>,
        #[arg(long, value_delimiter = ',')]
        durations_b: Option<Vec<u32>>,
    },
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let config = TpsdConfig::load_or_default(args.config.as_deref())?;
    log::debug!("config: {:?}", config);

    match args.command {
        Command::Levels { chord, key } => {
            let tps = TonalPitchSpace::from_symbols_with_mode(&chord, &key, config.default_mode)?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&tps.levels())?);
            } else {
                println!("{} in {}", chord, tps.key);
                print!("{}", render_levels(&tps, &config.display));
            }
        }
        Command::Compare {
            chord_a,
            key_a,
            chord_b,
            key_b,
        } => {
            let a = TonalPitchSpace::from_symbols_with_mode(&chord_a, &key_a, config.default_mode)?;
            let b = TonalPitchSpace::from_symbols_with_mode(&chord_b, &key_b, config.default_mode)?;
            let cmp = TpsComparison::new(a, b);
            let result = cmp.result();
            if args.json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                println!("{} in {}", chord_a, a.key);
                print!("{}", render_levels(&a, &config.display));
                println!();
                println!("{} in {}", chord_b, b.key);
                print!("{}", render_levels(&b, &config.display));
                println!();
                println!("Differences (*):");
                print!("{}", render_comparison(&cmp, &config.display));
                println!();
                println!("Chord distance rule: {}", result.chord_distance_rule);
                println!("Circle-of-fifths rule: {}", result.circle_fifth_rule);
                println!("Distance: {:.1}", result.distance);
            }
        }
        Command::Profile { song, durations } => {
            let song = Song::load(&song, durations)?;
            let profile = song.profile(config.default_mode)?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&profile)?);
            } else {
                print_key_summary(&song);
                println!("{} chords, {} beats", profile.spans().len(), profile.len());
                print!("{}", render_profile(&profile));
            }
        }
        Command::Align {
            song_a,
            song_b,
            durations_a,
            durations_b,
        } => {
            let profile_a = Song::load(&song_a, durations_a)?.profile(config.default_mode)?;
            let profile_b = Song::load(&song_b, durations_b)?.profile(config.default_mode)?;
            let result = alignment::minimum_area_with(
                profile_a.samples(),
                profile_b.samples(),
                &config.alignment,
            )?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                let (shorter, longer) = if result.shorter_is_first {
                    (&song_a, &song_b)
                } else {
                    (&song_b, &song_a)
                };
                println!(
                    "Aligned {} ({} beats) inside {} at beat {}",
                    shorter.display(),
                    result.window,
                    longer.display(),
                    result.offset
                );
                println!("Minimum area: {:.4}", result.area);
            }
        }
    }
    Ok(())
}

fn print_key_summary(song: &Song) {
    match &song.key {
        KeyAssignment::Global(key) => println!("Key: {}", key),
        KeyAssignment::PerChord(keys) => println!("Keys: {} local keys", keys.len()),
    }
}
