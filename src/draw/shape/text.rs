//! Text annotations laid out with Pango.

use super::{ShapeId, TaggedShape};
use crate::draw::color::{self, Color};
use crate::draw::font::FontDescriptor;
use crate::input::UserSettings;
use crate::util::{Point, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Text anchored at its first line's baseline.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TextShape {
    pub id: ShapeId,
    /// Baseline start of the first line
    pub origin: Point,
    /// Content, may contain '\n'
    pub text: String,
    pub color: Color,
    /// Font size in points
    pub font_size: f64,
    #[serde(default)]
    pub font: FontDescriptor,
}

impl TaggedShape for TextShape {
    const TYPE_TAG: &'static str = "Text";
}

impl TextShape {
    pub fn new(origin: Point, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            origin,
            text: text.into(),
            color: color::BLACK,
            font_size: 24.0,
            font: FontDescriptor::default(),
        }
    }

    pub fn apply_settings(&mut self, settings: &UserSettings) {
        self.color = settings.stroke_color;
        self.font_size = settings.font_size;
        self.font = settings.font_descriptor.clone();
    }

    pub fn hit_test(&self, point: Point) -> bool {
        self.bounding_rect().is_some_and(|rect| rect.contains(point))
    }

    /// Ink extents of the laid-out text.
    ///
    /// Measured on a scratch 1x1 surface; `None` for empty text or when
    /// Cairo cannot allocate one.
    pub fn bounding_rect(&self) -> Option<Rect> {
        if self.text.is_empty() {
            return None;
        }

        let surface = cairo::ImageSurface::create(cairo::Format::ARgb32, 1, 1).ok()?;
        let ctx = cairo::Context::new(&surface).ok()?;
        let layout = self.font.layout(&ctx, &self.text, self.font_size);

        let (ink_rect, _logical_rect) = layout.extents();
        let scale = pango::SCALE as f64;
        let baseline = layout.baseline() as f64 / scale;

        Some(Rect::new(
            self.origin.x + ink_rect.x() as f64 / scale,
            self.origin.y - baseline + ink_rect.y() as f64 / scale,
            ink_rect.width() as f64 / scale,
            ink_rect.height() as f64 / scale,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::color::ORANGE;

    #[test]
    fn empty_text_has_no_bounds() {
        let shape = TextShape::new(Point::new(10.0, 10.0), "");
        assert!(shape.bounding_rect().is_none());
        assert!(!shape.hit_test(Point::new(10.0, 10.0)));
    }

    #[test]
    fn settings_set_color_and_font() {
        let mut shape = TextShape::new(Point::ZERO, "hello");
        let settings = UserSettings {
            stroke_color: ORANGE,
            font_size: 48.0,
            ..UserSettings::default()
        };
        shape.apply_settings(&settings);
        assert_eq!(shape.color, ORANGE);
        assert_eq!(shape.font_size, 48.0);
    }

    #[test]
    fn missing_font_decodes_to_default() {
        let value = serde_json::json!({
            "type": "Text",
            "id": Uuid::nil(),
            "origin": { "x": 1.0, "y": 2.0 },
            "text": "note",
            "color": { "r": 0.0, "g": 0.0, "b": 0.0, "a": 1.0 },
            "font_size": 12.0
        });
        let shape = TextShape::decode(&value).unwrap();
        assert_eq!(shape.font, FontDescriptor::default());
        assert_eq!(shape.text, "note");
    }
}
