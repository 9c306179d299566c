//! Rendering primitives and shape definitions (Cairo-based).
//!
//! This module defines the core drawing types:
//! - [`Color`]: RGBA color representation with predefined color constants
//! - [`Shape`]: Pen strokes, lassos, rectangles, images and text
//! - [`Drawing`]: Committed shape list of a document
//! - [`Canvas`]: Committed raster, transient layer and compositing
//! - Rendering functions for Cairo-based output

pub mod canvas;
pub mod color;
pub mod drawing;
pub mod error;
pub mod font;
pub mod raster;
pub mod render;
pub mod segment;
pub mod shape;

// Re-export commonly used types at module level
pub use canvas::{Canvas, TransientLayer};
pub use color::Color;
pub use drawing::{Drawing, DrawingChange};
pub use error::{RenderError, ShapeCodecError};
pub use font::FontDescriptor;
pub use raster::Raster;
pub use render::{render_shape, render_shapes};
pub use segment::{PenLineSegment, modulated_width};
pub use shape::{
    ImageShape, LassoShape, MagicWandShape, PenShape, RectShape, Shape, ShapeId, TaggedShape,
    TextShape,
};

pub use color::{BLACK, BLUE, GREEN, ORANGE, PINK, RED, TRANSPARENT, WHITE, YELLOW};
