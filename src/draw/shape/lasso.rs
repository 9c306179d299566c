//! Closed freehand outlines.

use super::{PenShape, TaggedShape, stroke_padding};
use crate::draw::color::Color;
use crate::input::UserSettings;
use crate::util::{self, Point, Rect};
use serde::{Deserialize, Serialize};

/// Freehand outline closed back to its start once the drag ends.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LassoShape {
    #[serde(flatten)]
    pub pen: PenShape,
    #[serde(default)]
    pub fill_color: Option<Color>,
    /// Anchor recorded at drag end
    #[serde(default)]
    pub end: Option<Point>,
}

impl TaggedShape for LassoShape {
    const TYPE_TAG: &'static str = "Lasso";
}

impl LassoShape {
    pub fn new(start: Point) -> Self {
        Self {
            pen: PenShape::new(start),
            fill_color: None,
            end: None,
        }
    }

    pub fn apply_settings(&mut self, settings: &UserSettings) {
        self.pen.apply_settings(settings);
        self.fill_color = settings.fill_color;
    }

    /// Vertices of the outline: pen points plus the end anchor when it differs.
    pub fn outline(&self) -> Vec<Point> {
        let mut points = self.pen.points();
        if let Some(end) = self.end {
            if points.last() != Some(&end) {
                points.push(end);
            }
        }
        points
    }

    fn is_filled(&self) -> bool {
        self.fill_color.is_some_and(|fill| fill.is_visible())
    }

    pub fn hit_test(&self, point: Point) -> bool {
        let outline = self.outline();
        if self.is_filled() && util::point_in_polygon(point, &outline) {
            return true;
        }
        if outline.len() < 2 {
            return self.pen.hit_test(point);
        }

        let padding = stroke_padding(self.pen.stroke_width);
        let closing = (outline[outline.len() - 1], outline[0]);
        outline
            .windows(2)
            .map(|pair| (pair[0], pair[1]))
            .chain(std::iter::once(closing))
            .any(|(a, b)| util::distance_to_segment(point, a, b) <= padding)
    }

    pub fn bounding_rect(&self) -> Option<Rect> {
        util::bounds_of_points(&self.outline())
            .map(|rect| rect.inflate(stroke_padding(self.pen.stroke_width)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::color::GREEN;
    use crate::draw::segment::PenLineSegment;

    fn triangle(fill: Option<Color>) -> LassoShape {
        let mut lasso = LassoShape::new(Point::ZERO);
        lasso.pen.stroke_width = 2.0;
        lasso.pen.add_segment(PenLineSegment::new(Point::ZERO, Point::new(20.0, 0.0), 2.0));
        lasso.pen.add_segment(PenLineSegment::new(
            Point::new(20.0, 0.0),
            Point::new(0.0, 20.0),
            2.0,
        ));
        lasso.fill_color = fill;
        lasso.end = Some(Point::new(0.0, 20.0));
        lasso
    }

    #[test]
    fn end_anchor_is_not_duplicated() {
        assert_eq!(triangle(None).outline().len(), 3);
    }

    #[test]
    fn unfilled_lasso_hits_only_its_outline() {
        let lasso = triangle(None);
        assert!(!lasso.hit_test(Point::new(4.0, 4.0)));
        // closing edge from (0,20) back to (0,0)
        assert!(lasso.hit_test(Point::new(0.5, 10.0)));
    }

    #[test]
    fn filled_lasso_hits_interior() {
        let lasso = triangle(Some(GREEN));
        assert!(lasso.hit_test(Point::new(4.0, 4.0)));
        assert!(!lasso.hit_test(Point::new(18.0, 18.0)));
    }

    #[test]
    fn settings_carry_fill_color() {
        let mut lasso = triangle(None);
        let settings = UserSettings {
            fill_color: Some(GREEN),
            ..UserSettings::default()
        };
        lasso.apply_settings(&settings);
        assert_eq!(lasso.fill_color, Some(GREEN));
    }
}
