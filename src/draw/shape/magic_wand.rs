//! Magic-wand strokes whose pixels come from an external generator.

use super::{PenShape, TaggedShape};
use crate::draw::raster::Raster;
use crate::util::{Point, Rect, Size};
use serde::{Deserialize, Serialize};

/// Pen stroke that renders a generated raster in place of its geometry.
///
/// The raster is supplied by the magic-wand tool's generator and is never
/// persisted; a shape without one falls back to drawing its pen strokes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MagicWandShape {
    #[serde(flatten)]
    pub pen: PenShape,
    #[serde(skip)]
    pub image: Option<Raster>,
    /// Size the raster is stretched to, anchored at the canvas origin
    #[serde(default)]
    pub draw_size: Size,
}

impl TaggedShape for MagicWandShape {
    const TYPE_TAG: &'static str = "MagicWand";
}

impl MagicWandShape {
    pub fn new(start: Point) -> Self {
        Self {
            pen: PenShape::new(start),
            image: None,
            draw_size: Size::ZERO,
        }
    }

    /// Rectangle covered by the replacement raster, if one is present.
    pub fn image_rect(&self) -> Option<Rect> {
        self.image
            .as_ref()
            .map(|_| Rect::from_origin_size(Point::ZERO, self.draw_size))
    }

    /// Hits the raster's opaque pixels when present, the pen strokes otherwise.
    pub fn hit_test(&self, point: Point) -> bool {
        let (Some(image), Some(rect)) = (&self.image, self.image_rect()) else {
            return self.pen.hit_test(point);
        };
        if rect.is_empty() || !rect.contains(point) {
            return false;
        }

        let x = (point.x * image.width() as f64 / rect.width).floor() as i32;
        let y = (point.y * image.height() as f64 / rect.height).floor() as i32;
        let x = x.min(image.width() - 1);
        let y = y.min(image.height() - 1);
        image.alpha_at(x, y).is_some_and(|alpha| alpha > 0)
    }

    pub fn bounding_rect(&self) -> Option<Rect> {
        match self.image_rect() {
            Some(rect) => Some(rect),
            None => self.pen.bounding_rect(),
        }
    }
}
