//! Freehand pen and eraser strokes.

use super::{ShapeId, TaggedShape, stroke_padding};
use crate::draw::color::{self, Color};
use crate::draw::segment::PenLineSegment;
use crate::input::UserSettings;
use crate::util::{self, Point, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A freehand stroke made of connected line segments.
///
/// The stroke begins at `start`; each segment starts where the previous one
/// ended. A stroke without segments is a single dot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PenShape {
    pub id: ShapeId,
    /// First touched point
    pub start: Point,
    /// Append-only polyline pieces, each with its own width
    #[serde(default)]
    pub segments: Vec<PenLineSegment>,
    pub stroke_color: Color,
    /// Nominal width; segments may deviate when width follows velocity
    pub stroke_width: f64,
    pub is_finished: bool,
    /// Erasers paint with the Cairo `Clear` operator
    #[serde(default)]
    pub is_eraser: bool,
}

impl TaggedShape for PenShape {
    const TYPE_TAG: &'static str = "Pen";
}

impl PenShape {
    /// Creates an unfinished stroke starting at `start`.
    pub fn new(start: Point) -> Self {
        Self {
            id: Uuid::new_v4(),
            start,
            segments: Vec::new(),
            stroke_color: color::BLACK,
            stroke_width: 5.0,
            is_finished: false,
            is_eraser: false,
        }
    }

    /// End of the last segment, or the start point for a bare dot.
    pub fn last_point(&self) -> Point {
        self.segments.last().map_or(self.start, |segment| segment.b)
    }

    pub fn add_segment(&mut self, segment: PenLineSegment) {
        self.segments.push(segment);
    }

    /// Start point followed by the end of every segment.
    pub fn points(&self) -> Vec<Point> {
        std::iter::once(self.start)
            .chain(self.segments.iter().map(|segment| segment.b))
            .collect()
    }

    pub fn apply_settings(&mut self, settings: &UserSettings) {
        self.stroke_color = settings.stroke_color;
        self.stroke_width = settings.stroke_width;
    }

    /// True when every segment was drawn at the nominal width.
    pub fn has_uniform_width(&self) -> bool {
        self.segments
            .iter()
            .all(|segment| (segment.width - self.stroke_width).abs() < f64::EPSILON)
    }

    fn widest(&self) -> f64 {
        self.segments
            .iter()
            .map(|segment| segment.width)
            .fold(self.stroke_width, f64::max)
    }

    pub fn hit_test(&self, point: Point) -> bool {
        if self.segments.is_empty() {
            return point.distance_to(self.start) <= stroke_padding(self.stroke_width);
        }

        self.segments.iter().any(|segment| {
            util::distance_to_segment(point, segment.a, segment.b) <= stroke_padding(segment.width)
        })
    }

    pub fn bounding_rect(&self) -> Option<Rect> {
        util::bounds_of_points(&self.points()).map(|rect| rect.inflate(stroke_padding(self.widest())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::color::BLUE;

    fn stroke() -> PenShape {
        let mut pen = PenShape::new(Point::new(0.0, 0.0));
        pen.stroke_width = 4.0;
        pen.add_segment(PenLineSegment::new(Point::ZERO, Point::new(10.0, 0.0), 4.0));
        pen.add_segment(PenLineSegment::new(
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            8.0,
        ));
        pen
    }

    #[test]
    fn last_point_follows_segments() {
        let mut pen = PenShape::new(Point::new(3.0, 4.0));
        assert_eq!(pen.last_point(), Point::new(3.0, 4.0));
        pen.add_segment(PenLineSegment::new(Point::new(3.0, 4.0), Point::new(5.0, 6.0), 2.0));
        assert_eq!(pen.last_point(), Point::new(5.0, 6.0));
        assert_eq!(pen.points().len(), 2);
    }

    #[test]
    fn hit_test_respects_segment_width() {
        let pen = stroke();
        assert!(pen.hit_test(Point::new(5.0, 1.9)));
        assert!(!pen.hit_test(Point::new(5.0, 2.5)));
        assert!(pen.hit_test(Point::new(13.5, 5.0)));
        assert!(!pen.hit_test(Point::new(30.0, 30.0)));
    }

    #[test]
    fn dot_hit_test_uses_start_point() {
        let pen = PenShape::new(Point::new(5.0, 5.0));
        assert!(pen.hit_test(Point::new(6.0, 5.0)));
        assert!(!pen.hit_test(Point::new(9.0, 5.0)));
    }

    #[test]
    fn bounding_rect_covers_widest_segment() {
        let rect = stroke().bounding_rect().unwrap();
        assert_eq!(rect, Rect::new(-4.0, -4.0, 18.0, 18.0));
    }

    #[test]
    fn settings_replace_color_and_width() {
        let mut pen = stroke();
        let settings = UserSettings {
            stroke_color: BLUE,
            stroke_width: 12.0,
            ..UserSettings::default()
        };
        pen.apply_settings(&settings);
        assert_eq!(pen.stroke_color, BLUE);
        assert_eq!(pen.stroke_width, 12.0);
        assert!(!pen.has_uniform_width());
    }
}
