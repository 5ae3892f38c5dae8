// Runtime configuration for the CLI and library entry points.
//
// All tunables live in `TpsdConfig`, loaded from JSON. Every field has a
// default, so a config file only needs to name what it changes:
//
//   { "default_mode": "min", "alignment": { "parallel_threshold": 1024 } }
//
// None of these settings alter a distance value. `default_mode` only
// decides how a key token without a mode ("C") is read, the alignment
// threshold only switches the offset scan between sequential and parallel,
// and the display block only affects text output.

use crate::alignment::AlignmentConfig;
use crate::display::DisplayConfig;
use crate::pitch_space::Mode;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TpsdConfig {
    /// Mode assumed for key tokens that name only a root.
    pub default_mode: Mode,
    pub alignment: AlignmentConfig,
    pub display: DisplayConfig,
}

impl Default for TpsdConfig {
    fn default() -> Self {
        TpsdConfig {
            default_mode: Mode::Major,
            alignment: AlignmentConfig::default(),
            display: DisplayConfig::default(),
        }
    }
}

impl TpsdConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load from a JSON file.
    pub fn load(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let data = std::fs::read_to_string(path)?;
        let config = TpsdConfig::from_json(&data)?;
        log::info!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Load from `path` when given, otherwise use the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, Box<dyn std::error::Error>> {
        match path {
            Some(path) => TpsdConfig::load(path),
            None => Ok(TpsdConfig::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_json_is_default() {
        assert_eq!(TpsdConfig::from_json("{}").unwrap(), TpsdConfig::default());
    }

    #[test]
    fn test_partial_override() {
        let config = TpsdConfig::from_json(
            r#"{ "default_mode": "min", "alignment": { "parallel_threshold": 8 } }"#,
        )
        .unwrap();
        assert_eq!(config.default_mode, Mode::Minor);
        assert_eq!(config.alignment.parallel_threshold, 8);
        assert_eq!(config.display, DisplayConfig::default());
    }

    #[test]
    fn test_unknown_mode_is_rejected() {
        assert!(TpsdConfig::from_json(r#"{ "default_mode": "blues" }"#).is_err());
    }

    #[test]
    fn test_roundtrip_through_json() {
        let config = TpsdConfig {
            default_mode: Mode::Dorian,
            alignment: AlignmentConfig {
                parallel_threshold: 16,
            },
            display: DisplayConfig {
                placeholder: "-".to_string(),
            },
        };
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(TpsdConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(TpsdConfig::load(Path::new("/nonexistent/tpsd.json")).is_err());
        assert_eq!(
            TpsdConfig::load_or_default(None).unwrap(),
            TpsdConfig::default()
        );
    }
}
