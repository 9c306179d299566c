use super::{DrawingTool, PenStroke, RenderMode, Tool, ToolOperationContext};
use crate::draw::{PenShape, Shape, TransientLayer};
use crate::history::Operation;
use crate::util::{Point, Vector};
use log::debug;

/// Freehand pen, or eraser when built with [`PenTool::eraser`].
///
/// The pen buffers its stroke so a translucent color shows as one
/// continuous line. The eraser draws each segment straight over the
/// committed pixels so the erased area is visible while dragging.
#[derive(Debug)]
pub struct PenTool {
    stroke: PenStroke<PenShape>,
    is_eraser: bool,
}

impl PenTool {
    pub fn pen(velocity_based_width: bool) -> Self {
        Self {
            stroke: PenStroke::new(velocity_based_width),
            is_eraser: false,
        }
    }

    pub fn eraser() -> Self {
        Self {
            stroke: PenStroke::new(false),
            is_eraser: true,
        }
    }

    pub fn is_eraser(&self) -> bool {
        self.is_eraser
    }

    pub fn velocity_based_width(&self) -> bool {
        self.stroke.velocity_based_width
    }

    pub fn set_velocity_based_width(&mut self, enabled: bool) {
        self.stroke.velocity_based_width = enabled && !self.is_eraser;
    }

    pub fn stroke(&self) -> &PenStroke<PenShape> {
        &self.stroke
    }
}

impl DrawingTool for PenTool {
    fn kind(&self) -> Tool {
        if self.is_eraser {
            Tool::Eraser
        } else {
            Tool::Pen
        }
    }

    fn render_mode(&self) -> RenderMode {
        if self.is_eraser {
            RenderMode::Incremental
        } else {
            RenderMode::Buffered
        }
    }

    fn handle_drag_start(&mut self, ctx: &mut ToolOperationContext<'_>, point: Point) {
        let mut shape = PenShape::new(point);
        shape.is_eraser = self.is_eraser;
        self.stroke.start(ctx, shape);
    }

    fn handle_drag_continue(
        &mut self,
        _ctx: &mut ToolOperationContext<'_>,
        point: Point,
        velocity: Vector,
    ) {
        self.stroke.extend(point, velocity);
    }

    fn handle_drag_end(&mut self, ctx: &mut ToolOperationContext<'_>, _point: Point) {
        if let Some(shape) = self.stroke.finish(ctx) {
            debug!(
                "{} stroke finished with {} segment(s)",
                self.name(),
                shape.segments.len()
            );
            ctx.commit(Operation::add_shape(shape));
        }
    }

    fn handle_drag_cancel(&mut self, _ctx: &mut ToolOperationContext<'_>, _point: Point) {
        self.stroke.cancel();
    }

    fn render_shape_in_progress(&self, layer: &mut TransientLayer) {
        match self.render_mode() {
            RenderMode::Buffered => self.stroke.render_buffered(layer),
            _ => self.stroke.render_direct(layer),
        }
    }

    fn shape_in_progress(&self) -> Option<Shape> {
        self.stroke.shape().cloned().map(Shape::Pen)
    }

    fn is_drawing(&self) -> bool {
        self.stroke.is_active()
    }
}
