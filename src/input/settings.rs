//! Style values tools copy onto the shapes they create.

use crate::config::DrawingConfig;
use crate::draw::{Color, FontDescriptor, color};

/// Current stroke/fill style, owned by the host and read by tools.
///
/// Tools receive this through the operation context at drag start and drag
/// end; the engine never mutates it.
#[derive(Debug, Clone, PartialEq)]
pub struct UserSettings {
    /// Stroke color including its opacity
    pub stroke_color: Color,
    /// Fill for closed shapes, `None` for outlines only
    pub fill_color: Option<Color>,
    pub stroke_width: f64,
    pub font_size: f64,
    pub font_descriptor: FontDescriptor,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            stroke_color: color::BLACK,
            fill_color: None,
            stroke_width: 5.0,
            font_size: 24.0,
            font_descriptor: FontDescriptor::default(),
        }
    }
}

impl UserSettings {
    pub fn from_config(config: &DrawingConfig) -> Self {
        Self {
            stroke_color: config
                .stroke_color
                .to_color()
                .with_alpha(config.stroke_alpha),
            fill_color: config.fill_color.as_ref().map(|spec| spec.to_color()),
            stroke_width: config.stroke_width,
            font_size: config.font_size,
            font_descriptor: FontDescriptor::new(
                config.font_family.clone(),
                config.font_weight.clone(),
                config.font_style.clone(),
            ),
        }
    }

    /// Opacity of the stroke color.
    pub fn stroke_alpha(&self) -> f64 {
        self.stroke_color.a
    }
}
