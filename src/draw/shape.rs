//! Shape definitions for drawings.
//!
//! Every persisted shape kind is a plain struct implementing [`TaggedShape`],
//! and [`Shape`] is the closed set of kinds a [`Drawing`](super::Drawing) can
//! hold. Each kind encodes its own fields next to a stable `type` tag, and
//! decoding a kind from a payload carrying another kind's tag fails.

mod image;
mod lasso;
mod magic_wand;
mod pen;
mod rect;
mod text;

pub use image::ImageShape;
pub use lasso::LassoShape;
pub use magic_wand::MagicWandShape;
pub use pen::PenShape;
pub use rect::RectShape;
pub use text::TextShape;

use super::error::ShapeCodecError;
use crate::input::UserSettings;
use crate::util::{Point, Rect};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use uuid::Uuid;

/// Unique identity of a shape within and across drawings.
pub type ShapeId = Uuid;

/// JSON key holding the shape type tag.
pub const TYPE_KEY: &str = "type";

/// Persistence contract shared by every shape kind.
pub trait TaggedShape: Serialize + DeserializeOwned {
    /// Stable tag written under [`TYPE_KEY`].
    const TYPE_TAG: &'static str;

    /// Encodes the shape's fields plus its type tag.
    fn encode(&self) -> Result<Value, ShapeCodecError> {
        let mut fields = match serde_json::to_value(self)? {
            Value::Object(fields) => fields,
            _ => return Err(ShapeCodecError::NotAnObject),
        };
        fields.insert(TYPE_KEY.to_string(), Value::String(Self::TYPE_TAG.to_string()));
        Ok(Value::Object(fields))
    }

    /// Decodes a payload, rejecting one tagged for another shape kind.
    fn decode(value: &Value) -> Result<Self, ShapeCodecError> {
        let mut fields = value.as_object().cloned().ok_or(ShapeCodecError::NotAnObject)?;
        let tag = take_type_tag(&mut fields)?;
        if tag != Self::TYPE_TAG {
            return Err(ShapeCodecError::WrongShapeType {
                expected: Self::TYPE_TAG,
                found: tag,
            });
        }
        Ok(serde_json::from_value(Value::Object(fields))?)
    }
}

fn take_type_tag(fields: &mut Map<String, Value>) -> Result<String, ShapeCodecError> {
    match fields.remove(TYPE_KEY) {
        Some(Value::String(tag)) => Ok(tag),
        Some(other) => Err(ShapeCodecError::UnknownShapeType(other.to_string())),
        None => Err(ShapeCodecError::MissingField(TYPE_KEY)),
    }
}

/// A drawable shape held by a drawing.
///
/// Shapes are created by tools, mutated while a gesture is in progress, and
/// become part of the drawing only through an operation.
#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    /// Freehand pen or eraser stroke
    Pen(PenShape),
    /// Pen stroke replaced by an externally generated raster
    MagicWand(MagicWandShape),
    /// Closed freehand outline
    Lasso(LassoShape),
    /// Axis-aligned rectangle between two corners
    Rect(RectShape),
    /// Embedded raster image
    Image(ImageShape),
    /// Text annotation rendered with Pango
    Text(TextShape),
}

impl Shape {
    pub fn id(&self) -> ShapeId {
        match self {
            Shape::Pen(shape) => shape.id,
            Shape::MagicWand(shape) => shape.pen.id,
            Shape::Lasso(shape) => shape.pen.id,
            Shape::Rect(shape) => shape.id,
            Shape::Image(shape) => shape.id,
            Shape::Text(shape) => shape.id,
        }
    }

    /// Stable type tag of the underlying shape kind.
    pub fn type_tag(&self) -> &'static str {
        match self {
            Shape::Pen(_) => PenShape::TYPE_TAG,
            Shape::MagicWand(_) => MagicWandShape::TYPE_TAG,
            Shape::Lasso(_) => LassoShape::TYPE_TAG,
            Shape::Rect(_) => RectShape::TYPE_TAG,
            Shape::Image(_) => ImageShape::TYPE_TAG,
            Shape::Text(_) => TextShape::TYPE_TAG,
        }
    }

    /// Copies the relevant user settings onto the shape.
    pub fn apply_settings(&mut self, settings: &UserSettings) {
        match self {
            Shape::Pen(shape) => shape.apply_settings(settings),
            Shape::MagicWand(shape) => shape.pen.apply_settings(settings),
            Shape::Lasso(shape) => shape.apply_settings(settings),
            Shape::Rect(shape) => shape.apply_settings(settings),
            Shape::Image(_) => {}
            Shape::Text(shape) => shape.apply_settings(settings),
        }
    }

    /// True when `point` falls on the shape's painted stroke or fill.
    pub fn hit_test(&self, point: Point) -> bool {
        match self {
            Shape::Pen(shape) => shape.hit_test(point),
            Shape::MagicWand(shape) => shape.hit_test(point),
            Shape::Lasso(shape) => shape.hit_test(point),
            Shape::Rect(shape) => shape.hit_test(point),
            Shape::Image(shape) => shape.hit_test(point),
            Shape::Text(shape) => shape.hit_test(point),
        }
    }

    /// Axis-aligned bounds covering everything the shape paints.
    ///
    /// Returns `None` when the shape has nothing to paint.
    pub fn bounding_rect(&self) -> Option<Rect> {
        match self {
            Shape::Pen(shape) => shape.bounding_rect(),
            Shape::MagicWand(shape) => shape.bounding_rect(),
            Shape::Lasso(shape) => shape.bounding_rect(),
            Shape::Rect(shape) => Some(shape.bounding_rect()),
            Shape::Image(shape) => shape.bounding_rect(),
            Shape::Text(shape) => shape.bounding_rect(),
        }
    }

    /// Renders the shape into `ctx`. See [`render_shape`](super::render::render_shape).
    pub fn render(&self, ctx: &cairo::Context) {
        super::render::render_shape(ctx, self);
    }

    /// Encodes the shape with its type tag.
    pub fn encode(&self) -> Result<Value, ShapeCodecError> {
        match self {
            Shape::Pen(shape) => shape.encode(),
            Shape::MagicWand(shape) => shape.encode(),
            Shape::Lasso(shape) => shape.encode(),
            Shape::Rect(shape) => shape.encode(),
            Shape::Image(shape) => shape.encode(),
            Shape::Text(shape) => shape.encode(),
        }
    }

    /// Decodes any known shape kind, dispatching on its type tag.
    pub fn decode(value: &Value) -> Result<Self, ShapeCodecError> {
        let tag = match value.get(TYPE_KEY) {
            Some(Value::String(tag)) => tag.as_str(),
            Some(other) => return Err(ShapeCodecError::UnknownShapeType(other.to_string())),
            None if value.is_object() => return Err(ShapeCodecError::MissingField(TYPE_KEY)),
            None => return Err(ShapeCodecError::NotAnObject),
        };

        match tag {
            PenShape::TYPE_TAG => PenShape::decode(value).map(Shape::Pen),
            MagicWandShape::TYPE_TAG => MagicWandShape::decode(value).map(Shape::MagicWand),
            LassoShape::TYPE_TAG => LassoShape::decode(value).map(Shape::Lasso),
            RectShape::TYPE_TAG => RectShape::decode(value).map(Shape::Rect),
            ImageShape::TYPE_TAG => ImageShape::decode(value).map(Shape::Image),
            TextShape::TYPE_TAG => TextShape::decode(value).map(Shape::Text),
            other => Err(ShapeCodecError::UnknownShapeType(other.to_string())),
        }
    }
}

impl Serialize for Shape {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.encode()
            .map_err(serde::ser::Error::custom)?
            .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Shape {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Shape::decode(&value).map_err(serde::de::Error::custom)
    }
}

impl From<PenShape> for Shape {
    fn from(shape: PenShape) -> Self {
        Shape::Pen(shape)
    }
}

impl From<MagicWandShape> for Shape {
    fn from(shape: MagicWandShape) -> Self {
        Shape::MagicWand(shape)
    }
}

impl From<LassoShape> for Shape {
    fn from(shape: LassoShape) -> Self {
        Shape::Lasso(shape)
    }
}

impl From<RectShape> for Shape {
    fn from(shape: RectShape) -> Self {
        Shape::Rect(shape)
    }
}

impl From<ImageShape> for Shape {
    fn from(shape: ImageShape) -> Self {
        Shape::Image(shape)
    }
}

impl From<TextShape> for Shape {
    fn from(shape: TextShape) -> Self {
        Shape::Text(shape)
    }
}

/// Half a stroke width, never less than one unit, so thin strokes stay hittable.
pub(crate) fn stroke_padding(width: f64) -> f64 {
    (width / 2.0).max(1.0)
}
