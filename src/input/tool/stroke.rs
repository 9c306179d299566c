//! Shared in-progress state for the pen family (pen, eraser, magic wand, lasso).

use super::ToolOperationContext;
use crate::draw::shape::{LassoShape, MagicWandShape, PenShape, Shape};
use crate::draw::{PenLineSegment, TransientLayer, modulated_width, render};
use crate::input::UserSettings;
use crate::util::{Point, Size, Vector};

/// Shapes built from a growing pen polyline.
pub trait PenFamilyShape: Into<Shape> {
    fn pen(&self) -> &PenShape;
    fn pen_mut(&mut self) -> &mut PenShape;
    fn apply_settings(&mut self, settings: &UserSettings);
}

impl PenFamilyShape for PenShape {
    fn pen(&self) -> &PenShape {
        self
    }

    fn pen_mut(&mut self) -> &mut PenShape {
        self
    }

    fn apply_settings(&mut self, settings: &UserSettings) {
        PenShape::apply_settings(self, settings);
    }
}

impl PenFamilyShape for MagicWandShape {
    fn pen(&self) -> &PenShape {
        &self.pen
    }

    fn pen_mut(&mut self) -> &mut PenShape {
        &mut self.pen
    }

    fn apply_settings(&mut self, settings: &UserSettings) {
        self.pen.apply_settings(settings);
    }
}

impl PenFamilyShape for LassoShape {
    fn pen(&self) -> &PenShape {
        &self.pen
    }

    fn pen_mut(&mut self) -> &mut PenShape {
        &mut self.pen
    }

    fn apply_settings(&mut self, settings: &UserSettings) {
        LassoShape::apply_settings(self, settings);
    }
}

/// The stroke a pen-family tool is drawing, plus what it captured at drag start.
#[derive(Debug)]
pub struct PenStroke<S> {
    shape: Option<S>,
    /// Stroke opacity, applied when the buffer is shown
    alpha: f64,
    /// Drawing size at drag start; generated images default to covering it
    drawing_size: Size,
    last_velocity: Vector,
    /// Widen fast strokes and thin slow ones
    pub velocity_based_width: bool,
}

impl<S: PenFamilyShape> PenStroke<S> {
    pub fn new(velocity_based_width: bool) -> Self {
        Self {
            shape: None,
            alpha: 1.0,
            drawing_size: Size::ZERO,
            last_velocity: Vector::ZERO,
            velocity_based_width,
        }
    }

    pub fn shape(&self) -> Option<&S> {
        self.shape.as_ref()
    }

    pub fn shape_mut(&mut self) -> Option<&mut S> {
        self.shape.as_mut()
    }

    pub fn is_active(&self) -> bool {
        self.shape.is_some()
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn drawing_size(&self) -> Size {
        self.drawing_size
    }

    /// Begins a stroke with `shape`, replacing any unfinished one.
    ///
    /// The shape takes the user's style but is drawn at full opacity; the
    /// captured alpha is applied to the whole buffered stroke instead.
    pub fn start(&mut self, ctx: &ToolOperationContext<'_>, mut shape: S) {
        self.drawing_size = ctx.drawing.size();
        self.alpha = ctx.user_settings.stroke_alpha();
        self.last_velocity = Vector::ZERO;

        shape.pen_mut().is_finished = false;
        shape.apply_settings(ctx.user_settings);
        let pen = shape.pen_mut();
        pen.stroke_color = pen.stroke_color.with_alpha(1.0);

        self.shape = Some(shape);
    }

    /// Appends a segment from the current end to `point`.
    ///
    /// Returns `false` without touching the shape when no stroke is active
    /// or `point` equals the current end.
    pub fn extend(&mut self, point: Point, velocity: Vector) -> bool {
        let Some(shape) = self.shape.as_mut() else {
            return false;
        };

        let pen = shape.pen_mut();
        let width = if self.velocity_based_width {
            let previous_width = pen.segments.last().map_or(pen.stroke_width, |s| s.width);
            modulated_width(pen.stroke_width, velocity, self.last_velocity, previous_width)
        } else {
            pen.stroke_width
        };
        self.last_velocity = velocity;

        let last_point = pen.last_point();
        if last_point == point {
            return false;
        }
        pen.add_segment(PenLineSegment::new(last_point, point, width));
        true
    }

    /// Finishes the stroke with the user's style restored and hands it over
    /// for committing.
    pub fn finish(&mut self, ctx: &ToolOperationContext<'_>) -> Option<S> {
        let mut shape = self.shape.take()?;
        shape.pen_mut().is_finished = true;
        shape.apply_settings(ctx.user_settings);
        Some(shape)
    }

    /// Abandons the stroke.
    pub fn cancel(&mut self) -> Option<S> {
        let mut shape = self.shape.take()?;
        shape.pen_mut().is_finished = true;
        Some(shape)
    }

    /// Adds the newest segment to the opaque buffer and shows it at the
    /// captured alpha.
    pub fn render_buffered(&self, layer: &mut TransientLayer) {
        if let Some(shape) = &self.shape {
            layer.draw_buffered(self.alpha, |ctx| {
                render::render_pen_latest_segment(ctx, shape.pen())
            });
        }
    }

    /// Draws only the newest segment straight onto the layer.
    pub fn render_direct(&self, layer: &mut TransientLayer) {
        if let Some(shape) = &self.shape {
            layer.draw_direct(|ctx| render::render_pen_latest_segment(ctx, shape.pen()));
        }
    }
}
