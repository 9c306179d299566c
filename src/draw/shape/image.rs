//! Raster images placed on the canvas.

use super::{ShapeId, TaggedShape};
use crate::draw::raster::Raster;
use crate::util::{Point, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An image stretched into `draw_rect`.
///
/// Only the placement is persisted. A decoded image shape has no pixels
/// until the host attaches them again, and paints nothing meanwhile.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ImageShape {
    pub id: ShapeId,
    pub draw_rect: Rect,
    #[serde(skip)]
    pub image: Option<Raster>,
}

impl TaggedShape for ImageShape {
    const TYPE_TAG: &'static str = "Image";
}

impl ImageShape {
    pub fn new(image: Raster, draw_rect: Rect) -> Self {
        Self {
            id: Uuid::new_v4(),
            draw_rect,
            image: Some(image),
        }
    }

    pub fn hit_test(&self, point: Point) -> bool {
        self.image.is_some() && self.draw_rect.contains(point)
    }

    pub fn bounding_rect(&self) -> Option<Rect> {
        self.image.as_ref().map(|_| self.draw_rect)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::shape::{TextShape, TYPE_KEY};
    use crate::draw::error::ShapeCodecError;

    fn placed() -> ImageShape {
        let raster = Raster::from_rgba(1, 1, &[0, 0, 0, 255]).unwrap();
        ImageShape::new(raster, Rect::new(10.0, 10.0, 40.0, 30.0))
    }

    #[test]
    fn hit_test_requires_loaded_pixels() {
        let mut shape = placed();
        assert!(shape.hit_test(Point::new(20.0, 20.0)));
        assert!(!shape.hit_test(Point::new(5.0, 20.0)));
        shape.image = None;
        assert!(!shape.hit_test(Point::new(20.0, 20.0)));
        assert!(shape.bounding_rect().is_none());
    }

    #[test]
    fn encodes_with_its_own_tag() {
        let value = placed().encode().unwrap();
        assert_eq!(value[TYPE_KEY], "Image");
        assert!(value.get("image").is_none());

        let decoded = ImageShape::decode(&value).unwrap();
        assert_eq!(decoded.draw_rect, Rect::new(10.0, 10.0, 40.0, 30.0));
        assert!(decoded.image.is_none());
    }

    #[test]
    fn text_tagged_payload_is_rejected() {
        let mut value = placed().encode().unwrap();
        value[TYPE_KEY] = TextShape::TYPE_TAG.into();
        assert!(matches!(
            ImageShape::decode(&value),
            Err(ShapeCodecError::WrongShapeType { expected: "Image", .. })
        ));
    }
}
