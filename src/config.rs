//! Configuration file support for numpick.
//!
//! Configuration is loaded from `~/.config/numpick/config.toml` with the following precedence:
//! 1. CLI arguments (highest priority)
//! 2. `NUMPICK_CONFIG` environment variable (alternate file path)
//! 3. Configuration file
//! 4. Default values (lowest priority)
//!
//! # Example Configuration
//!
//! ```toml
//! # ~/.config/numpick/config.toml
//! [[pickers]]
//! label = "Volume"
//! min = 0
//! max = 100
//! step = 5
//! value = 40
//!
//! [[pickers]]
//! label = "Offset"
//! min = -200
//! max = 200
//! orientation = "horizontal"
//! tracker = "exponential"
//! max_distance = 30
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{PickerError, Result};
use crate::picker::{
    DEFAULT_MAX, DEFAULT_MAX_DISTANCE, DEFAULT_MIN, DEFAULT_STEP, Orientation, TrackerKind,
    ValueModel,
};

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Pickers shown by the demo, top to bottom
    pub pickers: Vec<PickerConfig>,
}

/// Settings for one picker
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PickerConfig {
    pub label: Option<String>,
    pub min: i32,
    pub max: i32,
    pub step: i32,
    pub value: i32,
    pub orientation: Orientation,
    pub tracker: TrackerKind,
    /// Upper bound on the drag distance that spans the whole range, in cells
    pub max_distance: u16,
    pub disable_gestures: bool,
    pub enabled: bool,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            label: None,
            min: DEFAULT_MIN,
            max: DEFAULT_MAX,
            step: DEFAULT_STEP,
            value: 0,
            orientation: Orientation::default(),
            tracker: TrackerKind::default(),
            max_distance: DEFAULT_MAX_DISTANCE,
            disable_gestures: false,
            enabled: true,
        }
    }
}

impl PickerConfig {
    /// Build the value model, validating range and step.
    pub fn model(&self) -> Result<ValueModel> {
        ValueModel::new(self.value, self.min, self.max, self.step, self.orientation)
    }
}

/// CLI overrides applied to every configured picker.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub min: Option<i32>,
    pub max: Option<i32>,
    pub step: Option<i32>,
    pub value: Option<i32>,
    pub orientation: Option<Orientation>,
    pub tracker: Option<TrackerKind>,
}

impl Config {
    /// Load configuration from `path`, or from the default location.
    ///
    /// Returns default configuration if the file doesn't exist or can't be parsed.
    pub fn load(path: Option<&Path>) -> Self {
        match Self::try_load(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Warning: {}", e);
                Self::default()
            }
        }
    }

    /// Like `load`, but parse errors are returned. A missing file is not an error.
    pub fn try_load(path: Option<&Path>) -> Result<Self> {
        let config_path = Self::resolve_path(path);
        if !config_path.exists() {
            return Ok(Self::default());
        }
        Self::from_file(&config_path)
    }

    /// Explicit path, then `NUMPICK_CONFIG`, then the default location.
    pub fn resolve_path(path: Option<&Path>) -> PathBuf {
        path.map(Path::to_path_buf)
            .or_else(|| std::env::var("NUMPICK_CONFIG").ok().map(PathBuf::from))
            .unwrap_or_else(Self::config_path)
    }

    /// Read and parse a config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        toml::from_str(&contents).map_err(|e| PickerError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Get the default configuration file path.
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("numpick")
    }

    /// Merge with CLI overrides.
    ///
    /// CLI arguments take precedence over config file values.
    pub fn with_overrides(mut self, overrides: &Overrides) -> Self {
        if self.pickers.is_empty() {
            self.pickers = self.pickers();
        }
        for picker in self.pickers.iter_mut() {
            if let Some(min) = overrides.min {
                picker.min = min;
            }
            if let Some(max) = overrides.max {
                picker.max = max;
            }
            if let Some(step) = overrides.step {
                picker.step = step;
            }
            if let Some(value) = overrides.value {
                picker.value = value;
            }
            if let Some(orientation) = overrides.orientation {
                picker.orientation = orientation;
            }
            if let Some(tracker) = overrides.tracker {
                picker.tracker = tracker;
            }
        }
        self
    }

    /// Pickers to show, falling back to the demo layout when none are configured.
    pub fn pickers(&self) -> Vec<PickerConfig> {
        if !self.pickers.is_empty() {
            return self.pickers.clone();
        }
        vec![
            PickerConfig {
                label: Some("Linear".to_string()),
                ..PickerConfig::default()
            },
            PickerConfig {
                label: Some("Exponential".to_string()),
                min: -200,
                max: 200,
                orientation: Orientation::Horizontal,
                tracker: TrackerKind::Exponential,
                ..PickerConfig::default()
            },
            PickerConfig {
                label: Some("Stepped".to_string()),
                max: 1000,
                step: 25,
                ..PickerConfig::default()
            },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.pickers.is_empty());
        let pickers = config.pickers();
        assert_eq!(pickers.len(), 3);
        assert_eq!(pickers[1].tracker, TrackerKind::Exponential);
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
            [[pickers]]
            label = "Volume"
            min = -10
            max = 10
            step = 2
            value = 4
            orientation = "horizontal"
            tracker = "exponential"
            max_distance = 12
            disable_gestures = true
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.pickers.len(), 1);
        let picker = &config.pickers[0];
        assert_eq!(picker.label.as_deref(), Some("Volume"));
        assert_eq!((picker.min, picker.max, picker.step, picker.value), (-10, 10, 2, 4));
        assert_eq!(picker.orientation, Orientation::Horizontal);
        assert_eq!(picker.tracker, TrackerKind::Exponential);
        assert_eq!(picker.max_distance, 12);
        assert!(picker.disable_gestures);
        assert!(picker.enabled);
    }

    #[test]
    fn test_partial_picker_uses_defaults() {
        let config: Config = toml::from_str("[[pickers]]\nmax = 5\n").unwrap();
        let picker = &config.pickers[0];
        assert_eq!(picker.min, DEFAULT_MIN);
        assert_eq!(picker.max, 5);
        assert_eq!(picker.tracker, TrackerKind::Linear);
        assert_eq!(picker.max_distance, DEFAULT_MAX_DISTANCE);
    }

    #[test]
    fn test_unknown_tracker_is_error() {
        let result: std::result::Result<Config, _> =
            toml::from_str("[[pickers]]\ntracker = \"spiral\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_overrides_apply_to_all_pickers() {
        let config = Config::default().with_overrides(&Overrides {
            step: Some(3),
            tracker: Some(TrackerKind::Linear),
            ..Overrides::default()
        });
        assert!(config.pickers.iter().all(|p| p.step == 3));
        assert!(config.pickers.iter().all(|p| p.tracker == TrackerKind::Linear));
    }

    #[test]
    fn test_invalid_range_rejected_by_model() {
        let picker = PickerConfig {
            min: 10,
            max: 0,
            ..PickerConfig::default()
        };
        assert!(matches!(
            picker.model(),
            Err(PickerError::InvalidRange { .. })
        ));
    }

    #[test]
    fn test_try_load_missing_file_is_default() {
        let path = std::env::temp_dir().join("numpick-missing-config.toml");
        let config = Config::try_load(Some(&path)).unwrap();
        assert!(config.pickers.is_empty());
    }

    #[test]
    fn test_try_load_reports_parse_error() {
        let path = std::env::temp_dir().join(format!("numpick-bad-{}.toml", std::process::id()));
        std::fs::write(&path, "[[pickers]]\nmin = \"low\"\n").unwrap();
        let result = Config::try_load(Some(&path));
        let _ = std::fs::remove_file(&path);
        assert!(matches!(result, Err(PickerError::Config { .. })));
    }
}
