use super::{DrawingTool, PenStroke, RenderMode, Tool, ToolOperationContext};
use crate::draw::{MagicWandShape, Raster, Shape, TransientLayer};
use crate::history::Operation;
use crate::util::{Point, Size, Vector};
use log::debug;

/// Result of the external segmentation step.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MagicWandImage {
    /// Replacement pixels; `None` keeps the vector stroke
    pub image: Option<Raster>,
    /// Size the image is drawn at, from the canvas origin; an empty size
    /// means the whole drawing
    pub draw_size: Size,
}

/// Segmentation callback: receives every point visited by the gesture.
pub type ImageGenerator = Box<dyn FnMut(&[Point]) -> MagicWandImage>;

/// Pen variant that asks an external generator for a raster to show
/// instead of the traced stroke.
///
/// The generator runs at drag start, at drag end and on tap. Without a
/// generator, or when it returns no image, the stroke renders as vectors.
pub struct MagicWandTool {
    stroke: PenStroke<MagicWandShape>,
    points: Vec<Point>,
    generator: Option<ImageGenerator>,
}

impl std::fmt::Debug for MagicWandTool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MagicWandTool")
            .field("stroke", &self.stroke)
            .field("points", &self.points.len())
            .field("has_generator", &self.generator.is_some())
            .finish()
    }
}

impl Default for MagicWandTool {
    fn default() -> Self {
        Self::new()
    }
}

impl MagicWandTool {
    pub fn new() -> Self {
        Self {
            stroke: PenStroke::new(false),
            points: Vec::new(),
            generator: None,
        }
    }

    pub fn set_generator(&mut self, generator: impl FnMut(&[Point]) -> MagicWandImage + 'static) {
        self.generator = Some(Box::new(generator));
    }

    pub fn clear_generator(&mut self) {
        self.generator = None;
    }

    /// Points visited by the current gesture.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    fn generate(&mut self) -> Option<MagicWandImage> {
        let generator = self.generator.as_mut()?;
        let result = generator(&self.points);
        debug!(
            "Magic wand generator returned {} for {} point(s)",
            if result.image.is_some() { "an image" } else { "no image" },
            self.points.len()
        );
        Some(result)
    }

    fn refresh_image(&mut self) {
        let fallback = self.stroke.drawing_size();
        if let Some(result) = self.generate() {
            if let Some(shape) = self.stroke.shape_mut() {
                shape.image = result.image;
                shape.draw_size = resolve_draw_size(result.draw_size, fallback);
            }
        }
    }
}

fn resolve_draw_size(requested: Size, drawing: Size) -> Size {
    if requested.is_empty() { drawing } else { requested }
}

impl DrawingTool for MagicWandTool {
    fn kind(&self) -> Tool {
        Tool::MagicWand
    }

    fn render_mode(&self) -> RenderMode {
        RenderMode::Incremental
    }

    /// Runs the generator for a single point and commits the result when it
    /// produced an image.
    fn handle_tap(&mut self, ctx: &mut ToolOperationContext<'_>, point: Point) {
        self.points = vec![point];
        let Some(MagicWandImage {
            image: Some(image),
            draw_size,
        }) = self.generate()
        else {
            return;
        };

        let mut shape = MagicWandShape::new(point);
        shape.pen.apply_settings(ctx.user_settings);
        shape.pen.is_finished = true;
        shape.image = Some(image);
        shape.draw_size = resolve_draw_size(draw_size, ctx.drawing.size());
        ctx.commit(Operation::add_shape(shape));
    }

    fn handle_drag_start(&mut self, ctx: &mut ToolOperationContext<'_>, point: Point) {
        self.points = vec![point];
        self.stroke.start(ctx, MagicWandShape::new(point));
        self.refresh_image();
    }

    fn handle_drag_continue(
        &mut self,
        _ctx: &mut ToolOperationContext<'_>,
        point: Point,
        velocity: Vector,
    ) {
        if !self.stroke.is_active() {
            return;
        }
        self.points.push(point);
        self.stroke.extend(point, velocity);
    }

    fn handle_drag_end(&mut self, ctx: &mut ToolOperationContext<'_>, _point: Point) {
        if !self.stroke.is_active() {
            return;
        }
        self.refresh_image();
        self.points.clear();
        if let Some(shape) = self.stroke.finish(ctx) {
            ctx.commit(Operation::add_shape(shape));
        }
    }

    fn handle_drag_cancel(&mut self, _ctx: &mut ToolOperationContext<'_>, _point: Point) {
        self.points.clear();
        self.stroke.cancel();
    }

    fn render_shape_in_progress(&self, layer: &mut TransientLayer) {
        self.stroke.render_direct(layer);
    }

    fn shape_in_progress(&self) -> Option<Shape> {
        self.stroke.shape().cloned().map(Shape::MagicWand)
    }

    fn is_drawing(&self) -> bool {
        self.stroke.is_active()
    }
}
