//! Raster canvas: committed buffer, transient layer, and compositing.
//!
//! The canvas keeps two separate render targets:
//! - the committed buffer mirrors the drawing's shape list and only changes
//!   when [`Canvas::sync`] sees a new drawing revision
//! - the transient layer shows the shape in progress; it is rewritten on every
//!   input sample and dropped when the drag ends or is cancelled

use super::color::Color;
use super::drawing::{Drawing, DrawingChange};
use super::error::RenderError;
use super::render;
use crate::input::RenderMode;
use crate::util::Size;
use log::{debug, warn};
use std::fs::File;
use std::path::Path;

fn new_surface(size: Size) -> Result<cairo::ImageSurface, RenderError> {
    let (width, height) = size.pixel_dimensions();
    Ok(cairo::ImageSurface::create(
        cairo::Format::ARgb32,
        width,
        height,
    )?)
}

/// Render target for the shape currently being drawn.
///
/// Tools draw through one of three entry points matching their
/// [`RenderMode`]; see [`TransientLayer::draw_buffered`],
/// [`TransientLayer::draw_direct`] and [`TransientLayer::redraw`].
pub struct TransientLayer {
    mode: RenderMode,
    surface: cairo::ImageSurface,
    /// Full-opacity accumulation of the stroke (buffered mode only)
    buffer: Option<cairo::ImageSurface>,
}

impl TransientLayer {
    fn new(mode: RenderMode, committed: &cairo::ImageSurface, size: Size) -> Result<Self, RenderError> {
        let surface = new_surface(size)?;
        let buffer = match mode {
            RenderMode::Buffered => Some(new_surface(size)?),
            RenderMode::Incremental => {
                // Start from the committed pixels so erasing shows through.
                let ctx = cairo::Context::new(&surface)?;
                render::paint_surface(&ctx, committed, 1.0, None);
                None
            }
            RenderMode::Full => None,
        };

        Ok(Self {
            mode,
            surface,
            buffer,
        })
    }

    pub fn mode(&self) -> RenderMode {
        self.mode
    }

    pub fn surface(&self) -> &cairo::ImageSurface {
        &self.surface
    }

    /// Adds an increment to the opaque buffer, then shows the whole buffer
    /// at `alpha`, so overlapping segments of a translucent stroke blend as
    /// one shape.
    ///
    /// Falls back to [`draw_direct`](Self::draw_direct) for layers started
    /// in another mode.
    pub fn draw_buffered(&mut self, alpha: f64, draw: impl FnOnce(&cairo::Context)) {
        let Some(buffer) = &self.buffer else {
            self.draw_direct(draw);
            return;
        };

        match cairo::Context::new(buffer) {
            Ok(ctx) => draw(&ctx),
            Err(err) => {
                warn!("Transient buffer unavailable: {}", err);
                return;
            }
        }

        if let Ok(ctx) = cairo::Context::new(&self.surface) {
            render::clear(&ctx);
            render::paint_surface(&ctx, buffer, alpha, None);
        }
    }

    /// Draws an increment straight onto the layer.
    pub fn draw_direct(&mut self, draw: impl FnOnce(&cairo::Context)) {
        match cairo::Context::new(&self.surface) {
            Ok(ctx) => draw(&ctx),
            Err(err) => warn!("Transient layer unavailable: {}", err),
        }
    }

    /// Clears the layer and draws the whole in-progress shape again.
    pub fn redraw(&mut self, draw: impl FnOnce(&cairo::Context)) {
        match cairo::Context::new(&self.surface) {
            Ok(ctx) => {
                render::clear(&ctx);
                draw(&ctx);
            }
            Err(err) => warn!("Transient layer unavailable: {}", err),
        }
    }
}

/// Committed raster of a drawing plus an optional transient layer.
pub struct Canvas {
    size: Size,
    background: Option<Color>,
    committed: cairo::ImageSurface,
    transient: Option<TransientLayer>,
    /// Drawing revision the committed buffer reflects
    synced_revision: Option<u64>,
}

impl Canvas {
    pub fn new(size: Size, background: Option<Color>) -> Result<Self, RenderError> {
        Ok(Self {
            size,
            background,
            committed: new_surface(size)?,
            transient: None,
            synced_revision: None,
        })
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn background(&self) -> Option<Color> {
        self.background
    }

    pub fn committed_surface(&self) -> &cairo::ImageSurface {
        &self.committed
    }

    pub fn transient(&self) -> Option<&TransientLayer> {
        self.transient.as_ref()
    }

    pub fn transient_mut(&mut self) -> Option<&mut TransientLayer> {
        self.transient.as_mut()
    }

    /// Starts a fresh transient layer, replacing any previous one.
    pub fn begin_transient(&mut self, mode: RenderMode) -> Result<&mut TransientLayer, RenderError> {
        let layer = TransientLayer::new(mode, &self.committed, self.size)?;
        Ok(self.transient.insert(layer))
    }

    /// Discards the transient layer.
    pub fn end_transient(&mut self) {
        self.transient = None;
    }

    /// Brings the committed buffer up to date with `drawing`.
    ///
    /// A single appended shape is drawn on top of the existing pixels; any
    /// other change, or a resize, redraws every shape.
    pub fn sync(&mut self, drawing: &Drawing) -> Result<(), RenderError> {
        if drawing.size() != self.size {
            debug!(
                "Canvas resized to {}x{}",
                drawing.size().width,
                drawing.size().height
            );
            self.size = drawing.size();
            self.committed = new_surface(self.size)?;
            self.transient = None;
            self.synced_revision = None;
        }

        let revision = drawing.revision();
        if self.synced_revision == Some(revision) {
            return Ok(());
        }

        let ctx = cairo::Context::new(&self.committed)?;
        let appended_one = self.synced_revision == revision.checked_sub(1)
            && drawing.last_change() == DrawingChange::Appended;

        match drawing.shapes().last() {
            Some(shape) if appended_one => render::render_shape(&ctx, shape),
            _ => {
                render::clear(&ctx);
                render::render_shapes(&ctx, drawing.shapes());
            }
        }

        self.synced_revision = Some(revision);
        Ok(())
    }

    /// Forces the next [`sync`](Self::sync) to redraw everything.
    pub fn invalidate(&mut self) {
        self.synced_revision = None;
    }

    /// Background, committed buffer, and transient layer flattened together.
    ///
    /// An incremental layer already contains the committed pixels, so it
    /// replaces the buffer instead of covering it.
    pub fn composite(&self) -> Result<cairo::ImageSurface, RenderError> {
        let output = new_surface(self.size)?;
        let ctx = cairo::Context::new(&output)?;

        if let Some(background) = self.background {
            render::render_background(&ctx, background);
        }

        match &self.transient {
            Some(layer) if layer.mode == RenderMode::Incremental => {
                render::paint_surface(&ctx, &layer.surface, 1.0, None);
            }
            Some(layer) => {
                render::paint_surface(&ctx, &self.committed, 1.0, None);
                render::paint_surface(&ctx, &layer.surface, 1.0, None);
            }
            None => render::paint_surface(&ctx, &self.committed, 1.0, None),
        }

        drop(ctx);
        output.flush();
        Ok(output)
    }

    /// Writes the composite as a PNG file.
    pub fn write_png(&self, path: &Path) -> Result<(), RenderError> {
        let output = self.composite()?;
        let mut file = File::create(path)?;
        output.write_to_png(&mut file)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::color::{BLACK, RED, WHITE};
    use crate::draw::raster::Raster;
    use crate::draw::segment::PenLineSegment;
    use crate::draw::shape::{PenShape, Shape};
    use crate::util::Point;

    fn pixels(surface: &cairo::ImageSurface) -> Raster {
        Raster::from_surface(surface).unwrap()
    }

    fn horizontal(y: f64) -> Shape {
        let mut pen = PenShape::new(Point::new(2.0, y));
        pen.stroke_color = RED;
        pen.stroke_width = 4.0;
        pen.add_segment(PenLineSegment::new(Point::new(2.0, y), Point::new(30.0, y), 4.0));
        pen.is_finished = true;
        Shape::Pen(pen)
    }

    #[test]
    fn incremental_sync_matches_full_redraw() {
        let size = Size::new(32.0, 32.0);
        let mut drawing = Drawing::new(size);
        let mut incremental = Canvas::new(size, None).unwrap();

        drawing.push_shape(horizontal(8.0));
        incremental.sync(&drawing).unwrap();
        drawing.push_shape(horizontal(20.0));
        incremental.sync(&drawing).unwrap();

        let mut full = Canvas::new(size, None).unwrap();
        full.sync(&drawing).unwrap();

        assert_eq!(
            pixels(incremental.committed_surface()),
            pixels(full.committed_surface())
        );
    }

    #[test]
    fn removal_triggers_full_redraw() {
        let size = Size::new(32.0, 32.0);
        let mut drawing = Drawing::new(size);
        let mut canvas = Canvas::new(size, None).unwrap();
        let shape = horizontal(8.0);
        let id = shape.id();

        drawing.push_shape(shape);
        canvas.sync(&drawing).unwrap();
        assert_eq!(pixels(canvas.committed_surface()).alpha_at(15, 8), Some(255));

        drawing.remove_shape_at(drawing.index_of(id).unwrap(), id);
        canvas.sync(&drawing).unwrap();
        assert_eq!(pixels(canvas.committed_surface()).alpha_at(15, 8), Some(0));
    }

    #[test]
    fn buffered_layer_blends_at_captured_alpha() {
        let size = Size::new(32.0, 32.0);
        let mut canvas = Canvas::new(size, None).unwrap();
        let Shape::Pen(pen) = horizontal(16.0) else {
            unreachable!()
        };

        let layer = canvas.begin_transient(RenderMode::Buffered).unwrap();
        // Two overlapping increments must not double the opacity.
        layer.draw_buffered(0.5, |ctx| render::render_pen_latest_segment(ctx, &pen));
        layer.draw_buffered(0.5, |ctx| render::render_pen_latest_segment(ctx, &pen));

        let alpha = pixels(canvas.composite().as_ref().unwrap())
            .alpha_at(15, 16)
            .unwrap();
        assert!((126..=129).contains(&alpha), "alpha was {alpha}");

        canvas.end_transient();
        assert_eq!(
            pixels(canvas.composite().as_ref().unwrap()).alpha_at(15, 16),
            Some(0)
        );
    }

    #[test]
    fn incremental_layer_shows_erasing_over_committed_pixels() {
        let size = Size::new(32.0, 32.0);
        let mut drawing = Drawing::new(size);
        let mut canvas = Canvas::new(size, Some(WHITE)).unwrap();
        let mut block = PenShape::new(Point::new(16.0, 16.0));
        block.stroke_color = BLACK;
        block.stroke_width = 30.0;
        drawing.push_shape(Shape::Pen(block));
        canvas.sync(&drawing).unwrap();

        let mut eraser = PenShape::new(Point::new(16.0, 16.0));
        eraser.is_eraser = true;
        eraser.stroke_width = 4.0;
        let layer = canvas.begin_transient(RenderMode::Incremental).unwrap();
        layer.draw_direct(|ctx| render::render_pen_latest_segment(ctx, &eraser));

        let composite = pixels(canvas.composite().as_ref().unwrap());
        // erased spot shows the white background, untouched area stays black
        let erased = composite.alpha_at(16, 16);
        assert_eq!(erased, Some(255));
        assert_ne!(
            pixels(canvas.transient().unwrap().surface()).alpha_at(16, 16),
            Some(255)
        );
        assert_eq!(
            pixels(canvas.transient().unwrap().surface()).alpha_at(6, 16),
            Some(255)
        );
    }

    #[test]
    fn write_png_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.png");
        let canvas = Canvas::new(Size::new(8.0, 8.0), Some(WHITE)).unwrap();
        canvas.write_png(&path).unwrap();
        assert!(path.exists());
    }
}
