use super::{DrawingTool, PenStroke, RenderMode, Tool, ToolOperationContext};
use crate::draw::{LassoShape, Shape, TransientLayer};
use crate::history::Operation;
use crate::util::{Point, Vector};

/// Draws a freehand outline that closes back to its start on release.
#[derive(Debug)]
pub struct LassoTool {
    stroke: PenStroke<LassoShape>,
}

impl Default for LassoTool {
    fn default() -> Self {
        Self::new()
    }
}

impl LassoTool {
    pub fn new() -> Self {
        Self {
            stroke: PenStroke::new(false),
        }
    }
}

impl DrawingTool for LassoTool {
    fn kind(&self) -> Tool {
        Tool::Lasso
    }

    fn render_mode(&self) -> RenderMode {
        RenderMode::Buffered
    }

    fn handle_drag_start(&mut self, ctx: &mut ToolOperationContext<'_>, point: Point) {
        self.stroke.start(ctx, LassoShape::new(point));
    }

    fn handle_drag_continue(
        &mut self,
        _ctx: &mut ToolOperationContext<'_>,
        point: Point,
        velocity: Vector,
    ) {
        self.stroke.extend(point, velocity);
    }

    fn handle_drag_end(&mut self, ctx: &mut ToolOperationContext<'_>, point: Point) {
        if let Some(shape) = self.stroke.shape_mut() {
            shape.end = Some(point);
        }
        if let Some(shape) = self.stroke.finish(ctx) {
            ctx.commit(Operation::add_shape(shape));
        }
    }

    fn handle_drag_cancel(&mut self, _ctx: &mut ToolOperationContext<'_>, _point: Point) {
        self.stroke.cancel();
    }

    fn render_shape_in_progress(&self, layer: &mut TransientLayer) {
        self.stroke.render_buffered(layer);
    }

    fn shape_in_progress(&self) -> Option<Shape> {
        self.stroke.shape().cloned().map(Shape::Lasso)
    }

    fn is_drawing(&self) -> bool {
        self.stroke.is_active()
    }
}
