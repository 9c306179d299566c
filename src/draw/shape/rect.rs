//! Rectangles dragged out between two corners.

use super::{ShapeId, TaggedShape, stroke_padding};
use crate::draw::color::{self, Color};
use crate::input::UserSettings;
use crate::util::{Point, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RectShape {
    pub id: ShapeId,
    /// Corner where the drag started
    pub a: Point,
    /// Corner under the pointer
    pub b: Point,
    pub stroke_color: Color,
    #[serde(default)]
    pub fill_color: Option<Color>,
    pub stroke_width: f64,
    pub is_finished: bool,
}

impl TaggedShape for RectShape {
    const TYPE_TAG: &'static str = "Rect";
}

impl RectShape {
    pub fn new(start: Point) -> Self {
        Self {
            id: Uuid::new_v4(),
            a: start,
            b: start,
            stroke_color: color::BLACK,
            fill_color: None,
            stroke_width: 5.0,
            is_finished: false,
        }
    }

    /// Normalized rectangle between the two corners.
    pub fn rect(&self) -> Rect {
        Rect::from_corners(self.a, self.b)
    }

    pub fn apply_settings(&mut self, settings: &UserSettings) {
        self.stroke_color = settings.stroke_color;
        self.fill_color = settings.fill_color;
        self.stroke_width = settings.stroke_width;
    }

    pub fn hit_test(&self, point: Point) -> bool {
        let padding = stroke_padding(self.stroke_width);
        let rect = self.rect();
        if !rect.inflate(padding).contains(point) {
            return false;
        }
        if self.fill_color.is_some_and(|fill| fill.is_visible()) {
            return true;
        }

        !strictly_inside(&rect.inflate(-padding), point)
    }

    pub fn bounding_rect(&self) -> Rect {
        self.rect().inflate(stroke_padding(self.stroke_width))
    }
}

fn strictly_inside(rect: &Rect, point: Point) -> bool {
    point.x > rect.x && point.x < rect.max_x() && point.y > rect.y && point.y < rect.max_y()
}
