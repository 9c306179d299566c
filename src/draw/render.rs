//! Cairo-based rendering functions for shapes.
//!
//! Rendering reads only the shape's own geometry and style and restores the
//! context state it touches, so drawing the same shape twice into the same
//! state yields the same pixels.

use super::color::Color;
use super::segment::PenLineSegment;
use super::shape::{ImageShape, LassoShape, MagicWandShape, PenShape, RectShape, Shape, TextShape};
use crate::util::{Point, Rect};
use log::warn;
use std::f64::consts::PI;

/// Fills the whole surface with a solid background color.
///
/// Should be called after clearing the canvas but before rendering shapes.
pub fn render_background(ctx: &cairo::Context, color: Color) {
    ctx.save().ok();
    color.set_source(ctx);
    ctx.set_operator(cairo::Operator::Source);
    let _ = ctx.paint();
    ctx.restore().ok();
}

/// Clears every pixel to full transparency.
pub fn clear(ctx: &cairo::Context) {
    ctx.save().ok();
    ctx.set_operator(cairo::Operator::Clear);
    let _ = ctx.paint();
    ctx.restore().ok();
}

/// Renders all shapes in order (first shape = bottom layer).
pub fn render_shapes(ctx: &cairo::Context, shapes: &[Shape]) {
    for shape in shapes {
        render_shape(ctx, shape);
    }
}

/// Renders a single shape, dispatching on its kind.
pub fn render_shape(ctx: &cairo::Context, shape: &Shape) {
    match shape {
        Shape::Pen(pen) => render_pen(ctx, pen),
        Shape::MagicWand(wand) => render_magic_wand(ctx, wand),
        Shape::Lasso(lasso) => render_lasso(ctx, lasso),
        Shape::Rect(rect) => render_rect(ctx, rect),
        Shape::Image(image) => render_image(ctx, image),
        Shape::Text(text) => render_text(ctx, text),
    }
}

/// Renders the freehand geometry of a pen-family shape, ignoring any
/// generated raster and lasso fill. Other kinds render normally.
pub fn render_stroke(ctx: &cairo::Context, shape: &Shape) {
    match shape {
        Shape::Pen(pen) => render_pen(ctx, pen),
        Shape::MagicWand(wand) => render_pen(ctx, &wand.pen),
        Shape::Lasso(lasso) => render_pen(ctx, &lasso.pen),
        other => render_shape(ctx, other),
    }
}

/// Render a freehand pen or eraser stroke.
///
/// A stroke without segments is a dot of diameter `stroke_width`. Finished
/// strokes of constant width are stroked as one joined polyline so corners
/// blend; anything else is stroked segment by segment with per-segment width.
pub fn render_pen(ctx: &cairo::Context, pen: &PenShape) {
    ctx.save().ok();
    prepare_pen(ctx, pen);

    if pen.segments.is_empty() {
        render_dot(ctx, pen.start, pen.stroke_width);
    } else if pen.is_finished && pen.has_uniform_width() {
        ctx.set_line_width(pen.stroke_width);
        ctx.move_to(pen.start.x, pen.start.y);
        for segment in &pen.segments {
            ctx.line_to(segment.b.x, segment.b.y);
        }
        let _ = ctx.stroke();
    } else {
        for segment in &pen.segments {
            stroke_segment(ctx, segment);
        }
    }

    ctx.restore().ok();
}

/// Render the last segment of a pen stroke, or its dot if it has none.
pub fn render_pen_latest_segment(ctx: &cairo::Context, pen: &PenShape) {
    ctx.save().ok();
    prepare_pen(ctx, pen);

    match pen.segments.last() {
        Some(segment) => stroke_segment(ctx, segment),
        None => render_dot(ctx, pen.start, pen.stroke_width),
    }

    ctx.restore().ok();
}

fn prepare_pen(ctx: &cairo::Context, pen: &PenShape) {
    if pen.is_eraser {
        ctx.set_operator(cairo::Operator::Clear);
    }
    pen.stroke_color.set_source(ctx);
    ctx.set_line_cap(cairo::LineCap::Round);
    ctx.set_line_join(cairo::LineJoin::Round);
}

fn stroke_segment(ctx: &cairo::Context, segment: &PenLineSegment) {
    ctx.set_line_width(segment.width);
    ctx.move_to(segment.a.x, segment.a.y);
    ctx.line_to(segment.b.x, segment.b.y);
    let _ = ctx.stroke();
}

fn render_dot(ctx: &cairo::Context, center: Point, diameter: f64) {
    ctx.new_sub_path();
    ctx.arc(center.x, center.y, diameter / 2.0, 0.0, 2.0 * PI);
    let _ = ctx.fill();
}

/// Render the generated raster, or the pen strokes when there is none.
pub fn render_magic_wand(ctx: &cairo::Context, wand: &MagicWandShape) {
    match (&wand.image, wand.image_rect()) {
        (Some(image), Some(rect)) => {
            if let Err(err) = image.paint_into(ctx, rect) {
                warn!("Failed to paint magic wand image: {}", err);
            }
        }
        _ => render_pen(ctx, &wand.pen),
    }
}

/// Render a lasso outline.
///
/// While the drag is in progress the lasso looks like a pen stroke; once
/// finished it is closed back to its start and filled when it has a fill.
pub fn render_lasso(ctx: &cairo::Context, lasso: &LassoShape) {
    if !lasso.pen.is_finished {
        render_pen(ctx, &lasso.pen);
        return;
    }

    let outline = lasso.outline();
    let Some((first, rest)) = outline.split_first() else {
        return;
    };
    if rest.is_empty() {
        render_pen(ctx, &lasso.pen);
        return;
    }

    ctx.save().ok();
    ctx.move_to(first.x, first.y);
    for point in rest {
        ctx.line_to(point.x, point.y);
    }
    ctx.close_path();

    if let Some(fill) = lasso.fill_color.filter(Color::is_visible) {
        fill.set_source(ctx);
        let _ = ctx.fill_preserve();
    }

    lasso.pen.stroke_color.set_source(ctx);
    ctx.set_line_width(lasso.pen.stroke_width);
    ctx.set_line_join(cairo::LineJoin::Round);
    let _ = ctx.stroke();
    ctx.restore().ok();
}

/// Render a rectangle with optional fill
pub fn render_rect(ctx: &cairo::Context, shape: &RectShape) {
    let rect = shape.rect();

    ctx.save().ok();
    ctx.set_line_join(cairo::LineJoin::Miter);
    ctx.rectangle(rect.x, rect.y, rect.width, rect.height);

    if let Some(fill) = shape.fill_color.filter(Color::is_visible) {
        fill.set_source(ctx);
        let _ = ctx.fill_preserve();
    }

    shape.stroke_color.set_source(ctx);
    ctx.set_line_width(shape.stroke_width);
    let _ = ctx.stroke();
    ctx.restore().ok();
}

/// Render an embedded image into its draw rect. Paints nothing without pixels.
pub fn render_image(ctx: &cairo::Context, shape: &ImageShape) {
    if let Some(image) = &shape.image {
        if let Err(err) = image.paint_into(ctx, shape.draw_rect) {
            warn!("Failed to paint image shape {}: {}", shape.id, err);
        }
    }
}

/// Renders text with its first line's baseline at the shape origin.
///
/// Text containing '\n' spans multiple lines with spacing from the font
/// metrics.
pub fn render_text(ctx: &cairo::Context, shape: &TextShape) {
    if shape.text.is_empty() {
        return;
    }

    ctx.save().ok();

    // Gray antialiasing; subpixel fringes on transparent surfaces
    ctx.set_antialias(cairo::Antialias::Best);

    let layout = shape.font.layout(ctx, &shape.text, shape.font_size);

    // Pango measures from top-left, we want baseline
    let baseline = layout.baseline() as f64 / pango::SCALE as f64;
    ctx.move_to(shape.origin.x, shape.origin.y - baseline);

    shape.color.set_source(ctx);
    pangocairo::functions::show_layout(ctx, &layout);

    ctx.restore().ok();
}

/// Paints `source` over `ctx` at the given opacity, clipped to `clip` when set.
pub fn paint_surface(
    ctx: &cairo::Context,
    source: &cairo::ImageSurface,
    alpha: f64,
    clip: Option<Rect>,
) {
    ctx.save().ok();
    if let Some(rect) = clip {
        ctx.rectangle(rect.x, rect.y, rect.width, rect.height);
        ctx.clip();
    }
    if ctx.set_source_surface(source, 0.0, 0.0).is_ok() {
        let _ = ctx.paint_with_alpha(alpha);
    }
    ctx.restore().ok();
}
