use super::{DrawingTool, RenderMode, Tool, ToolOperationContext};
use crate::draw::{RectShape, Shape, TransientLayer, render};
use crate::history::Operation;
use crate::util::{Point, Vector};

/// Drags out a rectangle from the press point to the pointer.
#[derive(Debug, Default)]
pub struct RectTool {
    shape: Option<RectShape>,
}

impl RectTool {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DrawingTool for RectTool {
    fn kind(&self) -> Tool {
        Tool::Rect
    }

    fn render_mode(&self) -> RenderMode {
        RenderMode::Full
    }

    fn handle_drag_start(&mut self, ctx: &mut ToolOperationContext<'_>, point: Point) {
        let mut shape = RectShape::new(point);
        shape.apply_settings(ctx.user_settings);
        self.shape = Some(shape);
    }

    fn handle_drag_continue(
        &mut self,
        _ctx: &mut ToolOperationContext<'_>,
        point: Point,
        _velocity: Vector,
    ) {
        if let Some(shape) = self.shape.as_mut() {
            shape.b = point;
        }
    }

    fn handle_drag_end(&mut self, ctx: &mut ToolOperationContext<'_>, point: Point) {
        let Some(mut shape) = self.shape.take() else {
            return;
        };
        shape.b = point;
        shape.is_finished = true;
        shape.apply_settings(ctx.user_settings);
        ctx.commit(Operation::add_shape(shape));
    }

    fn handle_drag_cancel(&mut self, _ctx: &mut ToolOperationContext<'_>, _point: Point) {
        self.shape = None;
    }

    fn render_shape_in_progress(&self, layer: &mut TransientLayer) {
        if let Some(shape) = &self.shape {
            layer.redraw(|ctx| render::render_rect(ctx, shape));
        }
    }

    fn shape_in_progress(&self) -> Option<Shape> {
        self.shape.clone().map(Shape::Rect)
    }

    fn is_drawing(&self) -> bool {
        self.shape.is_some()
    }
}
