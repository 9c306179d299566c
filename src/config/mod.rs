//! Configuration file support for scribble.
//!
//! Settings are read from `~/.config/scribble/config.toml` and cover stroke
//! style defaults, gesture thresholds, canvas size, and how drawings are saved.
//!
//! If no config file exists, sensible defaults are used automatically.

pub mod enums;
pub mod types;

pub use enums::{ColorSpec, SessionCompression};
pub use types::{CanvasConfig, DrawingConfig, GestureConfig, SessionConfig};

use anyhow::{Context, Result};
use log::{debug, info, warn};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure containing all user settings.
///
/// # Example TOML
/// ```toml
/// [drawing]
/// stroke_color = "blue"
/// stroke_alpha = 0.6
/// stroke_width = 4.0
/// default_tool = "lasso"
///
/// [gesture]
/// tap_threshold = 10.0
/// velocity_mode = "normalized"
///
/// [canvas]
/// width = 1024
/// height = 768
/// background = "white"
///
/// [session]
/// compress = "auto"
/// backup_retention = 1
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default, JsonSchema)]
pub struct Config {
    /// Stroke style and tool defaults
    #[serde(default)]
    pub drawing: DrawingConfig,

    /// Tap/drag classification
    #[serde(default)]
    pub gesture: GestureConfig,

    /// Canvas size and background
    #[serde(default)]
    pub canvas: CanvasConfig,

    /// Saved drawing format and limits
    #[serde(default)]
    pub session: SessionConfig,
}

impl Config {
    /// Validates and clamps all configuration values to acceptable ranges.
    ///
    /// Invalid values are clamped to the nearest valid value and a warning is
    /// logged.
    ///
    /// Validated ranges:
    /// - `stroke_alpha`: 0.0 - 1.0
    /// - `stroke_width`: 1.0 - 100.0
    /// - `font_size`: 8.0 - 144.0
    /// - `tap_threshold`: 0.0 - 200.0, `commit_threshold` at least `tap_threshold`
    /// - canvas `width`/`height`: 1 - 8192
    pub fn validate_and_clamp(&mut self) {
        if !(0.0..=1.0).contains(&self.drawing.stroke_alpha) {
            warn!(
                "Invalid stroke_alpha {:.2}, clamping to 0.0-1.0 range",
                self.drawing.stroke_alpha
            );
            self.drawing.stroke_alpha = clamp_finite(self.drawing.stroke_alpha, 0.0, 1.0);
        }

        if !(1.0..=100.0).contains(&self.drawing.stroke_width) {
            warn!(
                "Invalid stroke_width {:.1}, clamping to 1.0-100.0 range",
                self.drawing.stroke_width
            );
            self.drawing.stroke_width = clamp_finite(self.drawing.stroke_width, 1.0, 100.0);
        }

        if !(8.0..=144.0).contains(&self.drawing.font_size) {
            warn!(
                "Invalid font_size {:.1}, clamping to 8.0-144.0 range",
                self.drawing.font_size
            );
            self.drawing.font_size = clamp_finite(self.drawing.font_size, 8.0, 144.0);
        }

        let valid_weight = matches!(
            self.drawing.font_weight.to_lowercase().as_str(),
            "normal" | "bold" | "light" | "ultralight" | "heavy" | "ultrabold"
        ) || self
            .drawing
            .font_weight
            .parse::<u32>()
            .is_ok_and(|w| (100..=900).contains(&w));

        if !valid_weight {
            warn!(
                "Invalid font_weight '{}', falling back to 'normal'",
                self.drawing.font_weight
            );
            self.drawing.font_weight = "normal".to_string();
        }

        if !matches!(
            self.drawing.font_style.to_lowercase().as_str(),
            "normal" | "italic" | "oblique"
        ) {
            warn!(
                "Invalid font_style '{}', falling back to 'normal'",
                self.drawing.font_style
            );
            self.drawing.font_style = "normal".to_string();
        }

        if !(0.0..=200.0).contains(&self.gesture.tap_threshold) {
            warn!(
                "Invalid tap_threshold {:.1}, clamping to 0.0-200.0 range",
                self.gesture.tap_threshold
            );
            self.gesture.tap_threshold = clamp_finite(self.gesture.tap_threshold, 0.0, 200.0);
        }

        if self.gesture.commit_threshold.is_nan()
            || self.gesture.commit_threshold < self.gesture.tap_threshold
        {
            warn!(
                "commit_threshold {:.1} is below tap_threshold {:.1}, raising it",
                self.gesture.commit_threshold, self.gesture.tap_threshold
            );
            self.gesture.commit_threshold = self.gesture.tap_threshold;
        }

        for (name, value) in [
            ("width", &mut self.canvas.width),
            ("height", &mut self.canvas.height),
        ] {
            if !(1..=8192).contains(&*value) {
                warn!("Invalid canvas {} {}, clamping to 1-8192 range", name, value);
                *value = (*value).clamp(1, 8192);
            }
        }

        if self.session.max_file_size_mb == 0 {
            warn!("session.max_file_size_mb must be at least 1, using 1");
            self.session.max_file_size_mb = 1;
        }
    }

    /// Returns the path to the configuration file.
    ///
    /// The config file is located at `~/.config/scribble/config.toml`.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("scribble");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads configuration from the default location, or returns defaults if not found.
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;

        if !config_path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", config_path.display());
            return Ok(Self::default());
        }

        Self::load_from(&config_path)
    }

    /// Loads and validates the configuration file at `path`.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or contains invalid TOML.
    pub fn load_from(path: &Path) -> Result<Self> {
        let config_str = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        let mut config: Config = toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;

        config.validate_and_clamp();

        info!("Loaded config from {}", path.display());
        debug!("Config: {:?}", config);

        Ok(config)
    }

    /// Serializes the configuration to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let config_str = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(path, config_str)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;

        info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Saves the configuration to the default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::get_config_path()?)
    }

    /// JSON schema describing the configuration file.
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Config)
    }
}

/// Clamps `value`, mapping NaN to `min`.
fn clamp_finite(value: f64, min: f64, max: f64) -> f64 {
    if value.is_nan() {
        min
    } else {
        value.clamp(min, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{Tool, VelocityMode};

    #[test]
    fn empty_file_yields_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.gesture.tap_threshold, 10.0);
        assert_eq!(config.gesture.commit_threshold, 40.0);
        assert_eq!(config.canvas.width, 1024);
        assert_eq!(config.canvas.height, 768);
        assert_eq!(config.drawing.default_tool, Tool::Pen);
    }

    #[test]
    fn parses_every_section() {
        let config: Config = toml::from_str(
            r#"
            [drawing]
            stroke_color = [0, 128, 255]
            stroke_alpha = 0.5
            fill_color = "yellow"
            velocity_based_width = true
            default_tool = "magic-wand"

            [gesture]
            velocity_mode = "legacy"

            [canvas]
            width = 300
            background = "white"

            [session]
            compress = "off"
            max_shapes = 12
            "#,
        )
        .unwrap();

        assert_eq!(config.drawing.stroke_color, ColorSpec::Rgb([0, 128, 255]));
        assert_eq!(
            config.drawing.fill_color,
            Some(ColorSpec::Name("yellow".into()))
        );
        assert!(config.drawing.velocity_based_width);
        assert_eq!(config.drawing.default_tool, Tool::MagicWand);
        assert_eq!(config.gesture.velocity_mode, VelocityMode::Legacy);
        assert_eq!(config.canvas.width, 300);
        assert_eq!(config.canvas.height, 768);
        assert_eq!(config.session.compress, SessionCompression::Off);
        assert_eq!(config.session.max_shapes, 12);
    }

    #[test]
    fn clamps_out_of_range_values() {
        let mut config = Config::default();
        config.drawing.stroke_alpha = 3.0;
        config.drawing.stroke_width = 0.0;
        config.drawing.font_size = 500.0;
        config.drawing.font_weight = "chunky".into();
        config.drawing.font_style = "wavy".into();
        config.gesture.tap_threshold = 30.0;
        config.gesture.commit_threshold = 5.0;
        config.canvas.width = 0;
        config.canvas.height = 10_000;
        config.session.max_file_size_mb = 0;

        config.validate_and_clamp();

        assert_eq!(config.drawing.stroke_alpha, 1.0);
        assert_eq!(config.drawing.stroke_width, 1.0);
        assert_eq!(config.drawing.font_size, 144.0);
        assert_eq!(config.drawing.font_weight, "normal");
        assert_eq!(config.drawing.font_style, "normal");
        assert_eq!(config.gesture.commit_threshold, 30.0);
        assert_eq!(config.canvas.width, 1);
        assert_eq!(config.canvas.height, 8192);
        assert_eq!(config.session.max_file_size_mb, 1);
    }

    #[test]
    fn nan_width_clamps_to_minimum() {
        let mut config = Config::default();
        config.drawing.stroke_width = f64::NAN;
        config.validate_and_clamp();
        assert_eq!(config.drawing.stroke_width, 1.0);
    }

    #[test]
    fn save_then_load_preserves_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let mut config = Config::default();
        config.drawing.stroke_width = 9.0;
        config.canvas.background = Some(ColorSpec::Name("black".into()));

        config.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn invalid_toml_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[drawing\nstroke_width = ").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(format!("{err:#}").contains("Failed to parse config"));
    }

    #[test]
    fn schema_lists_sections() {
        let schema = serde_json::to_value(Config::json_schema()).unwrap();
        let properties = schema["properties"].as_object().unwrap();
        for section in ["drawing", "gesture", "canvas", "session"] {
            assert!(properties.contains_key(section), "missing {section}");
        }
    }
}
