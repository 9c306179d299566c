//! Editor state: the drawing, its history, the tools and the canvas.

use crate::config::Config;
use crate::draw::{Canvas, Color, Drawing, RenderError, ShapeId};
use crate::event::{EngineEvent, EventBus, EventHandler};
use crate::history::{Operation, OperationStack};
use crate::input::gesture::ImmediatePanRecognizer;
use crate::input::settings::UserSettings;
use crate::input::tool::{
    DrawingTool, MagicWandImage, Tool, ToolOperationContext, ToolSet,
};
use crate::util::{Point, Size};
use log::{debug, info};

/// Single-threaded engine front end.
///
/// Touch events go through the gesture recognizer to the active tool, tools
/// commit operations through the operation stack, and the canvas mirrors
/// the drawing plus the shape in progress. Everything runs on the caller's
/// thread; hosts that render elsewhere must serialize access to the editor.
pub struct Editor {
    pub(super) drawing: Drawing,
    pub(super) operation_stack: OperationStack,
    pub(super) canvas: Canvas,
    pub(super) tools: ToolSet,
    pub(super) active_tool: Tool,
    pub(super) recognizer: ImmediatePanRecognizer,
    /// Style copied onto new shapes; the host edits it freely
    pub user_settings: UserSettings,
    pub(super) events: EventBus,
    /// Whether the composite changed since the last render
    pub needs_redraw: bool,
}

impl Editor {
    /// Creates an editor for an empty drawing of `size`.
    pub fn new(size: Size, background: Option<Color>) -> Result<Self, RenderError> {
        Self::with_drawing(Drawing::new(size), background)
    }

    /// Creates an editor around an existing drawing with empty history.
    pub fn with_drawing(drawing: Drawing, background: Option<Color>) -> Result<Self, RenderError> {
        let events = EventBus::new();
        Ok(Self {
            canvas: Canvas::new(drawing.size(), background)?,
            drawing,
            operation_stack: OperationStack::new(events.clone()),
            tools: ToolSet::default(),
            active_tool: Tool::Pen,
            recognizer: ImmediatePanRecognizer::default(),
            user_settings: UserSettings::default(),
            events,
            needs_redraw: true,
        })
    }

    /// Creates an editor with canvas, style, tool and gesture settings from `config`.
    pub fn from_config(config: &Config) -> Result<Self, RenderError> {
        let size = Size::new(config.canvas.width as f64, config.canvas.height as f64);
        let background = config.canvas.background.as_ref().map(|spec| spec.to_color());

        let mut editor = Self::new(size, background)?;
        editor.user_settings = UserSettings::from_config(&config.drawing);
        editor.tools = ToolSet::new(config.drawing.velocity_based_width);
        editor.recognizer = ImmediatePanRecognizer::from_config(&config.gesture);
        editor.active_tool = config.drawing.default_tool;

        info!(
            "Editor ready: {}x{} canvas, {} tool",
            config.canvas.width, config.canvas.height, editor.active_tool
        );
        Ok(editor)
    }

    pub fn drawing(&self) -> &Drawing {
        &self.drawing
    }

    pub fn operation_stack(&self) -> &OperationStack {
        &self.operation_stack
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn recognizer(&self) -> &ImmediatePanRecognizer {
        &self.recognizer
    }

    pub fn tools(&self) -> &ToolSet {
        &self.tools
    }

    pub fn tools_mut(&mut self) -> &mut ToolSet {
        &mut self.tools
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    /// Registers a listener for every engine event.
    pub fn subscribe(&self, handler: impl EventHandler + 'static) {
        self.events.subscribe(handler);
    }

    pub fn active_tool(&self) -> Tool {
        self.active_tool
    }

    pub(super) fn active(&self) -> &dyn DrawingTool {
        self.tools.get(self.active_tool)
    }

    /// Switches tools. A drag in progress is cancelled first and the rest
    /// of that gesture is ignored.
    pub fn set_tool(&mut self, tool: Tool) {
        if tool == self.active_tool {
            return;
        }

        if self.active().is_drawing() {
            let point = self.recognizer.location();
            self.cancel_drag(point);
        }
        self.recognizer.reset();

        let old = self.active_tool;
        self.active_tool = tool;
        debug!("Tool changed: {} -> {}", old, tool);
        self.events.emit(EngineEvent::ToolChanged { old, new: tool });
    }

    /// Installs the segmentation callback used by the magic-wand tool.
    pub fn set_magic_wand_generator(
        &mut self,
        generator: impl FnMut(&[Point]) -> MagicWandImage + 'static,
    ) {
        self.tools.magic_wand.set_generator(generator);
    }

    pub fn set_velocity_based_width(&mut self, enabled: bool) {
        self.tools.pen.set_velocity_based_width(enabled);
    }

    pub fn can_undo(&self) -> bool {
        self.operation_stack.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.operation_stack.can_redo()
    }

    /// Reverts the last operation; `false` when history is empty.
    pub fn undo(&mut self) -> bool {
        let undone = self.operation_stack.undo(&mut self.drawing);
        if undone {
            self.reseed_transient();
            self.needs_redraw = true;
        }
        undone
    }

    /// Re-applies the last undone operation; `false` when there is none.
    pub fn redo(&mut self) -> bool {
        let redone = self.operation_stack.redo(&mut self.drawing);
        if redone {
            self.reseed_transient();
            self.needs_redraw = true;
        }
        redone
    }

    /// Applies an operation built outside the tools.
    pub fn apply(&mut self, operation: Operation) {
        self.operation_stack.apply(&mut self.drawing, operation);
        self.reseed_transient();
        self.needs_redraw = true;
    }

    /// Removes a committed shape as an undoable operation.
    pub fn remove_shape(&mut self, id: ShapeId) -> bool {
        match Operation::remove_shape(&self.drawing, id) {
            Some(operation) => {
                self.apply(operation);
                true
            }
            None => false,
        }
    }

    /// Removes every shape as one undoable operation. No-op on an empty drawing.
    pub fn clear(&mut self) -> bool {
        if self.drawing.is_empty() {
            return false;
        }
        let operation = Operation::clear(&self.drawing);
        self.apply(operation);
        true
    }

    /// Replaces the document. History is dropped since it referred to the old one.
    pub fn load_drawing(&mut self, drawing: Drawing) {
        if self.active().is_drawing() {
            let point = self.recognizer.location();
            self.cancel_drag(point);
        }
        self.recognizer.reset();
        self.operation_stack.clear_history();
        self.drawing = drawing;
        self.canvas.invalidate();
        self.needs_redraw = true;
    }

    /// Takes the document out, leaving an empty drawing of the same size.
    pub fn take_drawing(&mut self) -> Drawing {
        let empty = Drawing::new(self.drawing.size());
        let drawing = std::mem::replace(&mut self.drawing, empty);
        self.operation_stack.clear_history();
        self.canvas.invalidate();
        self.needs_redraw = true;
        drawing
    }

    /// Runs the deferred work of the previous event cycle (recognizer reset).
    pub fn tick(&mut self) {
        self.recognizer.tick();
    }

    /// Runs `f` on the active tool with a freshly built operation context.
    pub(super) fn with_active_tool<R>(
        &mut self,
        f: impl FnOnce(&mut dyn DrawingTool, &mut ToolOperationContext<'_>) -> R,
    ) -> R {
        let tool = self.tools.get_mut(self.active_tool);
        let mut ctx = ToolOperationContext {
            drawing: &mut self.drawing,
            operation_stack: &mut self.operation_stack,
            user_settings: &self.user_settings,
        };
        f(tool, &mut ctx)
    }
}
