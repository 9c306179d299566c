//! Configuration type definitions.

use super::enums::{ColorSpec, SessionCompression};
use crate::input::{Tool, VelocityMode};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Style defaults copied into the editor's user settings at startup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DrawingConfig {
    /// Stroke color - either a named color (red, green, blue, yellow, orange, pink, white, black)
    /// or an RGB array like `[255, 0, 0]` for red
    #[serde(default = "default_stroke_color")]
    pub stroke_color: ColorSpec,

    /// Stroke opacity (valid range: 0.0 - 1.0)
    #[serde(default = "default_stroke_alpha")]
    pub stroke_alpha: f64,

    /// Fill for lassos and rectangles; omit for outlines only
    #[serde(default)]
    pub fill_color: Option<ColorSpec>,

    /// Stroke width in canvas units (valid range: 1.0 - 100.0)
    #[serde(default = "default_stroke_width")]
    pub stroke_width: f64,

    /// Vary pen width with drawing speed
    #[serde(default)]
    pub velocity_based_width: bool,

    /// Font size for text shapes in points (valid range: 8.0 - 144.0)
    #[serde(default = "default_font_size")]
    pub font_size: f64,

    /// Font family name (e.g., "Sans", "Monospace")
    #[serde(default = "default_font_family")]
    pub font_family: String,

    /// Font weight (e.g., "normal", "bold", "light", 400, 700)
    #[serde(default = "default_font_weight")]
    pub font_weight: String,

    /// Font style (e.g., "normal", "italic", "oblique")
    #[serde(default = "default_font_style")]
    pub font_style: String,

    /// Tool selected when the editor starts
    #[serde(default = "default_tool")]
    pub default_tool: Tool,
}

impl Default for DrawingConfig {
    fn default() -> Self {
        Self {
            stroke_color: default_stroke_color(),
            stroke_alpha: default_stroke_alpha(),
            fill_color: None,
            stroke_width: default_stroke_width(),
            velocity_based_width: false,
            font_size: default_font_size(),
            font_family: default_font_family(),
            font_weight: default_font_weight(),
            font_style: default_font_style(),
            default_tool: default_tool(),
        }
    }
}

/// Touch classification settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct GestureConfig {
    /// Distance a touch must travel before it stops counting as a tap
    #[serde(default = "default_tap_threshold")]
    pub tap_threshold: f64,

    /// Larger travel distance reported separately to hosts
    #[serde(default = "default_commit_threshold")]
    pub commit_threshold: f64,

    /// Velocity formula (normalized or legacy)
    #[serde(default)]
    pub velocity_mode: VelocityMode,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            tap_threshold: default_tap_threshold(),
            commit_threshold: default_commit_threshold(),
            velocity_mode: VelocityMode::default(),
        }
    }
}

/// Canvas dimensions and backdrop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CanvasConfig {
    /// Width in pixels (valid range: 1 - 8192)
    #[serde(default = "default_canvas_width")]
    pub width: u32,

    /// Height in pixels (valid range: 1 - 8192)
    #[serde(default = "default_canvas_height")]
    pub height: u32,

    /// Color painted under the drawing; omit for a transparent backdrop
    #[serde(default)]
    pub background: Option<ColorSpec>,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: default_canvas_width(),
            height: default_canvas_height(),
            background: None,
        }
    }
}

/// Saved drawing settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SessionConfig {
    /// Compression mode for saved files (auto, on, off)
    #[serde(default)]
    pub compress: SessionCompression,

    /// Payload size in KiB above which `auto` compresses
    #[serde(default = "default_auto_compress_threshold_kb")]
    pub auto_compress_threshold_kb: u64,

    /// Files larger than this are neither written nor read
    #[serde(default = "default_max_file_size_mb")]
    pub max_file_size_mb: u64,

    /// Keep the previous file as `.bak` when overwriting (0 disables)
    #[serde(default = "default_backup_retention")]
    pub backup_retention: usize,

    /// Shapes beyond this count are dropped on load
    #[serde(default = "default_max_shapes")]
    pub max_shapes: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            compress: SessionCompression::default(),
            auto_compress_threshold_kb: default_auto_compress_threshold_kb(),
            max_file_size_mb: default_max_file_size_mb(),
            backup_retention: default_backup_retention(),
            max_shapes: default_max_shapes(),
        }
    }
}

fn default_stroke_color() -> ColorSpec {
    ColorSpec::Name("black".to_string())
}

fn default_stroke_alpha() -> f64 {
    1.0
}

fn default_stroke_width() -> f64 {
    5.0
}

fn default_font_size() -> f64 {
    24.0
}

fn default_font_family() -> String {
    "Sans".to_string()
}

fn default_font_weight() -> String {
    "normal".to_string()
}

fn default_font_style() -> String {
    "normal".to_string()
}

fn default_tool() -> Tool {
    Tool::Pen
}

fn default_tap_threshold() -> f64 {
    10.0
}

fn default_commit_threshold() -> f64 {
    40.0
}

fn default_canvas_width() -> u32 {
    1024
}

fn default_canvas_height() -> u32 {
    768
}

fn default_auto_compress_threshold_kb() -> u64 {
    100
}

fn default_max_file_size_mb() -> u64 {
    10
}

fn default_backup_retention() -> usize {
    1
}

fn default_max_shapes() -> usize {
    10_000
}
