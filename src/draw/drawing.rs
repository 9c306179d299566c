//! Drawing container owning the committed shape list.

use super::shape::{Shape, ShapeId};
use crate::util::{Point, Size};

/// Kind of the most recent mutation, used by the canvas to pick between an
/// incremental draw and a full redraw.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrawingChange {
    /// A shape was pushed on top; earlier pixels are still valid.
    Appended,
    /// Anything else: removal, insertion below the top, clear, replace.
    Rebuilt,
}

/// The committed state of a drawing: canvas size plus shapes in draw order.
///
/// The shape list is exclusively owned here. Mutators are crate-private so
/// committed state only changes through operations applied by the
/// [`OperationStack`](crate::history::OperationStack).
#[derive(Debug, Clone)]
pub struct Drawing {
    size: Size,
    /// Shapes in draw order (first = bottom layer, last = top layer)
    shapes: Vec<Shape>,
    revision: u64,
    last_change: DrawingChange,
}

impl Drawing {
    /// Creates an empty drawing with the given canvas size.
    pub fn new(size: Size) -> Self {
        Self {
            size,
            shapes: Vec::new(),
            revision: 0,
            last_change: DrawingChange::Rebuilt,
        }
    }

    /// Creates a drawing pre-populated with already committed shapes.
    pub fn with_shapes(size: Size, shapes: Vec<Shape>) -> Self {
        Self {
            shapes,
            ..Self::new(size)
        }
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Monotonic counter bumped by every mutation.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn last_change(&self) -> DrawingChange {
        self.last_change
    }

    pub fn index_of(&self, id: ShapeId) -> Option<usize> {
        self.shapes.iter().position(|shape| shape.id() == id)
    }

    pub fn shape(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.iter().find(|shape| shape.id() == id)
    }

    /// Topmost shape whose painted area contains `point`.
    pub fn shape_at(&self, point: Point) -> Option<&Shape> {
        self.shapes.iter().rev().find(|shape| shape.hit_test(point))
    }

    fn touch(&mut self, change: DrawingChange) {
        self.revision += 1;
        self.last_change = change;
    }

    pub(crate) fn push_shape(&mut self, shape: Shape) {
        self.shapes.push(shape);
        self.touch(DrawingChange::Appended);
    }

    /// Inserts at `index`, clamped to the end of the list.
    pub(crate) fn insert_shape(&mut self, index: usize, shape: Shape) {
        let index = index.min(self.shapes.len());
        let change = if index == self.shapes.len() {
            DrawingChange::Appended
        } else {
            DrawingChange::Rebuilt
        };
        self.shapes.insert(index, shape);
        self.touch(change);
    }

    /// Removes the shape at `index`, provided it is the one with `id`.
    ///
    /// Ids are not guaranteed unique in loaded documents, so callers that
    /// know the position remove by position.
    pub(crate) fn remove_shape_at(&mut self, index: usize, id: ShapeId) -> Option<Shape> {
        if self.shapes.get(index)?.id() != id {
            return None;
        }
        let shape = self.shapes.remove(index);
        self.touch(DrawingChange::Rebuilt);
        Some(shape)
    }

    /// Removes every shape, returning them in draw order.
    pub(crate) fn take_shapes(&mut self) -> Vec<Shape> {
        self.touch(DrawingChange::Rebuilt);
        std::mem::take(&mut self.shapes)
    }

    /// Replaces the whole shape list.
    pub(crate) fn replace_shapes(&mut self, shapes: Vec<Shape>) {
        self.shapes = shapes;
        self.touch(DrawingChange::Rebuilt);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::shape::PenShape;

    fn dot(x: f64) -> Shape {
        Shape::Pen(PenShape::new(Point::new(x, x)))
    }

    #[test]
    fn push_records_append() {
        let mut drawing = Drawing::new(Size::new(100.0, 100.0));
        drawing.push_shape(dot(1.0));
        assert_eq!(drawing.revision(), 1);
        assert_eq!(drawing.last_change(), DrawingChange::Appended);
    }

    #[test]
    fn remove_checks_position_and_marks_rebuild() {
        let mut drawing = Drawing::new(Size::new(100.0, 100.0));
        let first = dot(1.0);
        let second = dot(50.0);
        let id = first.id();
        drawing.push_shape(first.clone());
        drawing.push_shape(second);

        assert!(drawing.remove_shape_at(1, id).is_none());
        assert_eq!(drawing.remove_shape_at(0, id), Some(first.clone()));
        assert_eq!(drawing.last_change(), DrawingChange::Rebuilt);
        assert!(drawing.remove_shape_at(0, id).is_none());
        assert_eq!(drawing.revision(), 3);

        drawing.insert_shape(0, first);
        assert_eq!(drawing.index_of(id), Some(0));
        assert_eq!(drawing.last_change(), DrawingChange::Rebuilt);
    }

    #[test]
    fn insert_at_end_counts_as_append() {
        let mut drawing = Drawing::new(Size::new(10.0, 10.0));
        drawing.insert_shape(7, dot(1.0));
        assert_eq!(drawing.len(), 1);
        assert_eq!(drawing.last_change(), DrawingChange::Appended);
    }

    #[test]
    fn shape_at_prefers_topmost() {
        let mut drawing = Drawing::new(Size::new(100.0, 100.0));
        let bottom = dot(10.0);
        let top = dot(10.0);
        let top_id = top.id();
        drawing.push_shape(bottom);
        drawing.push_shape(top);
        assert_eq!(drawing.shape_at(Point::new(10.0, 10.0)).map(Shape::id), Some(top_id));
        assert!(drawing.shape_at(Point::new(90.0, 90.0)).is_none());
    }
}
