use crate::event::EngineEvent;
use crate::input::events::TouchEvent;
use crate::input::gesture::GestureState;
use crate::util::{Point, Vector};
use log::{debug, warn};

use super::Editor;

impl Editor {
    /// Feeds one touch event through the recognizer to the active tool.
    ///
    /// Returns the gesture state the event produced, or `None` when the
    /// recognizer ignored it (untracked touch, move without a press).
    ///
    /// # Behavior
    /// - `Began`: drag start, transient layer opened
    /// - `Changed`: drag continue with the recognizer's velocity (zero when
    ///   there is no usable velocity yet)
    /// - `Ended`: drag end when the touch travelled past the tap threshold;
    ///   otherwise the drag is cancelled and delivered as a tap
    /// - `Cancelled`: drag cancel
    pub fn handle_touch(&mut self, event: &TouchEvent) -> Option<GestureState> {
        let state = self.recognizer.handle(event)?;
        let point = self.recognizer.location();

        match state {
            GestureState::Began => self.start_drag(point),
            GestureState::Changed => {
                let velocity = self.recognizer.velocity().unwrap_or(Vector::ZERO);
                self.continue_drag(point, velocity);
            }
            GestureState::Ended => {
                if self.recognizer.has_exceeded_tap_threshold() {
                    self.end_drag(point);
                } else {
                    self.cancel_drag(point);
                    self.tap(point);
                }
            }
            GestureState::Cancelled => self.cancel_drag(point),
            GestureState::Possible => {}
        }

        Some(state)
    }

    fn start_drag(&mut self, point: Point) {
        let tool = self.active_tool;
        self.with_active_tool(|tool, ctx| tool.handle_drag_start(ctx, point));

        // Incremental layers copy the committed pixels, which must be current.
        if let Err(err) = self.canvas.sync(&self.drawing) {
            warn!("Canvas sync failed before drag: {}", err);
        }
        let mode = self.active().render_mode();
        match self.canvas.begin_transient(mode) {
            Ok(_) => self.refresh_transient(),
            Err(err) => warn!("Could not start transient layer: {}", err),
        }

        debug!("{} drag started at ({:.1}, {:.1})", tool, point.x, point.y);
        self.needs_redraw = true;
        self.events.emit(EngineEvent::DragStarted { tool, point });
    }

    fn continue_drag(&mut self, point: Point, velocity: Vector) {
        if !self.active().is_drawing() {
            return;
        }
        self.with_active_tool(|tool, ctx| tool.handle_drag_continue(ctx, point, velocity));
        self.refresh_transient();
        self.needs_redraw = true;

        let tool = self.active_tool;
        self.events.emit(EngineEvent::DragContinued { tool, point });
    }

    fn end_drag(&mut self, point: Point) {
        if !self.active().is_drawing() {
            return;
        }
        self.with_active_tool(|tool, ctx| tool.handle_drag_end(ctx, point));
        self.canvas.end_transient();
        self.needs_redraw = true;

        let tool = self.active_tool;
        debug!("{} drag ended at ({:.1}, {:.1})", tool, point.x, point.y);
        self.events.emit(EngineEvent::DragEnded { tool, point });
    }

    /// Abandons the drag in progress, if any.
    pub(super) fn cancel_drag(&mut self, point: Point) {
        if !self.active().is_drawing() {
            self.canvas.end_transient();
            return;
        }
        self.with_active_tool(|tool, ctx| tool.handle_drag_cancel(ctx, point));
        self.canvas.end_transient();
        self.needs_redraw = true;

        let tool = self.active_tool;
        debug!("{} drag cancelled", tool);
        self.events.emit(EngineEvent::DragCancelled { tool });
    }

    fn tap(&mut self, point: Point) {
        let before = self.drawing.revision();
        self.with_active_tool(|tool, ctx| tool.handle_tap(ctx, point));
        self.needs_redraw |= self.drawing.revision() != before;
    }
}
