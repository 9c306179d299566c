use crate::draw::{Drawing, Shape, ShapeId};
use log::warn;

/// Discriminant of an [`Operation`], carried by history events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    AddShape,
    RemoveShape,
    Clear,
}

impl OperationKind {
    pub fn name(&self) -> &'static str {
        match self {
            OperationKind::AddShape => "add shape",
            OperationKind::RemoveShape => "remove shape",
            OperationKind::Clear => "clear",
        }
    }
}

/// A reversible mutation of a drawing.
///
/// Each variant captures everything needed to undo it: applying and then
/// reverting leaves the shape list exactly as it was.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    /// Push a shape on top of the drawing
    AddShape(Shape),
    /// Remove a shape, remembering where it sat in draw order
    RemoveShape { shape: Shape, index: usize },
    /// Remove every shape
    Clear { shapes: Vec<Shape> },
}

impl Operation {
    pub fn add_shape(shape: impl Into<Shape>) -> Self {
        Operation::AddShape(shape.into())
    }

    /// Captures removal of the shape with `id`, or `None` if the drawing
    /// does not contain it.
    pub fn remove_shape(drawing: &Drawing, id: ShapeId) -> Option<Self> {
        let index = drawing.index_of(id)?;
        let shape = drawing.shapes()[index].clone();
        Some(Operation::RemoveShape { shape, index })
    }

    /// Captures removal of everything currently in the drawing.
    pub fn clear(drawing: &Drawing) -> Self {
        Operation::Clear {
            shapes: drawing.shapes().to_vec(),
        }
    }

    pub fn kind(&self) -> OperationKind {
        match self {
            Operation::AddShape(_) => OperationKind::AddShape,
            Operation::RemoveShape { .. } => OperationKind::RemoveShape,
            Operation::Clear { .. } => OperationKind::Clear,
        }
    }

    /// Forward effect.
    pub(crate) fn apply(&self, drawing: &mut Drawing) {
        match self {
            Operation::AddShape(shape) => drawing.push_shape(shape.clone()),
            Operation::RemoveShape { shape, index } => {
                if drawing.remove_shape_at(*index, shape.id()).is_none() {
                    warn!("Shape {} is no longer at index {}", shape.id(), index);
                }
            }
            Operation::Clear { .. } => {
                drawing.take_shapes();
            }
        }
    }

    /// Inverse effect.
    pub(crate) fn revert(&self, drawing: &mut Drawing) {
        match self {
            Operation::AddShape(shape) => {
                let top = drawing.len().saturating_sub(1);
                if drawing.remove_shape_at(top, shape.id()).is_none() {
                    warn!("Shape {} is not on top; add left in place", shape.id());
                }
            }
            Operation::RemoveShape { shape, index } => drawing.insert_shape(*index, shape.clone()),
            Operation::Clear { shapes } => drawing.replace_shapes(shapes.clone()),
        }
    }
}
