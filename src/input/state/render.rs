use crate::draw::{Raster, RenderError, render};
use crate::input::RenderMode;
use log::{debug, warn};
use std::path::Path;

use super::Editor;

impl Editor {
    /// Repaints the shape in progress onto the transient layer.
    pub(super) fn refresh_transient(&mut self) {
        let tool = self.tools.get(self.active_tool);
        if let Some(layer) = self.canvas.transient_mut() {
            tool.render_shape_in_progress(layer);
        }
    }

    /// Rebuilds an incremental layer after the drawing changed under a live
    /// drag.
    ///
    /// The layer holds a copy of the committed pixels, so it is re-seeded from
    /// the freshly synced buffer and the whole stroke so far is replayed on it.
    pub(super) fn reseed_transient(&mut self) {
        if self.canvas.transient().map(|layer| layer.mode()) != Some(RenderMode::Incremental) {
            return;
        }
        if let Err(err) = self.canvas.sync(&self.drawing) {
            warn!("Canvas sync failed during drag: {}", err);
            return;
        }

        let shape = self.active().shape_in_progress();
        match self.canvas.begin_transient(RenderMode::Incremental) {
            Ok(layer) => {
                if let Some(shape) = shape {
                    layer.draw_direct(|ctx| render::render_stroke(ctx, &shape));
                }
                debug!("Re-seeded transient layer at revision {}", self.drawing.revision());
            }
            Err(err) => warn!("Could not rebuild transient layer: {}", err),
        }
    }

    /// Brings the committed buffer up to date and returns the flattened frame.
    ///
    /// Clears `needs_redraw`.
    pub fn render(&mut self) -> Result<cairo::ImageSurface, RenderError> {
        self.canvas.sync(&self.drawing)?;
        let frame = self.canvas.composite()?;
        self.needs_redraw = false;
        Ok(frame)
    }

    /// Renders the current frame and reads it back as pixels.
    pub fn snapshot(&mut self) -> Result<Raster, RenderError> {
        let frame = self.render()?;
        Raster::from_surface(&frame)
    }

    /// Renders the current frame to a PNG file.
    pub fn write_png(&mut self, path: &Path) -> Result<(), RenderError> {
        if let Err(err) = self.canvas.sync(&self.drawing) {
            warn!("Canvas sync failed before export: {}", err);
            return Err(err);
        }
        self.canvas.write_png(path)
    }
}
