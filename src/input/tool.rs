//! Drawing tools: strategies turning gestures into shapes and operations.
//!
//! Every tool implements [`DrawingTool`]. Tools keep at most one shape in
//! progress; it becomes part of the drawing only when the tool commits an
//! operation on drag end (or tap, for the magic wand). Cancelling a drag
//! never commits anything.

mod lasso;
mod magic_wand;
mod pen;
mod rect;
mod stroke;

pub use lasso::LassoTool;
pub use magic_wand::{ImageGenerator, MagicWandImage, MagicWandTool};
pub use pen::PenTool;
pub use rect::RectTool;
pub use stroke::{PenFamilyShape, PenStroke};

use crate::draw::{Drawing, Shape, TransientLayer};
use crate::history::{Operation, OperationStack};
use crate::input::UserSettings;
use crate::util::{Point, Vector};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Drawing tool selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum Tool {
    /// Freehand stroke, buffered so translucent colors blend as one shape
    Pen,
    /// Freehand stroke that clears pixels
    Eraser,
    /// Freehand stroke replaced by an externally generated raster
    MagicWand,
    /// Closed freehand outline
    Lasso,
    /// Rectangle between drag start and current point
    Rect,
}

impl Tool {
    pub const ALL: [Tool; 5] = [
        Tool::Pen,
        Tool::Eraser,
        Tool::MagicWand,
        Tool::Lasso,
        Tool::Rect,
    ];

    /// Human-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            Tool::Pen => "Pen",
            Tool::Eraser => "Eraser",
            Tool::MagicWand => "Magic Wand",
            Tool::Lasso => "Lasso",
            Tool::Rect => "Rect",
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How a tool paints its shape in progress onto the transient layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// Accumulate increments in an opaque buffer and show it at the stroke's
    /// alpha, so a translucent stroke reads as one shape
    Buffered,
    /// Draw each increment directly over a copy of the committed pixels
    Incremental,
    /// Clear and redraw the whole shape every frame
    Full,
}

/// Everything a tool callback may touch. Built per call, never stored.
pub struct ToolOperationContext<'a> {
    pub drawing: &'a mut Drawing,
    pub operation_stack: &'a mut OperationStack,
    pub user_settings: &'a UserSettings,
}

impl ToolOperationContext<'_> {
    /// Applies `operation` through the operation stack.
    pub fn commit(&mut self, operation: Operation) {
        self.operation_stack.apply(self.drawing, operation);
    }
}

/// Gesture callbacks shared by every tool.
///
/// Callbacks arriving without a drag in progress are silent no-ops.
pub trait DrawingTool {
    /// Selector value this tool answers to.
    fn kind(&self) -> Tool;

    fn name(&self) -> &'static str {
        self.kind().name()
    }

    fn render_mode(&self) -> RenderMode;

    fn handle_tap(&mut self, _ctx: &mut ToolOperationContext<'_>, _point: Point) {}

    fn handle_drag_start(&mut self, ctx: &mut ToolOperationContext<'_>, point: Point);

    fn handle_drag_continue(
        &mut self,
        ctx: &mut ToolOperationContext<'_>,
        point: Point,
        velocity: Vector,
    );

    fn handle_drag_end(&mut self, ctx: &mut ToolOperationContext<'_>, point: Point);

    /// Discards the shape in progress without creating an undo entry.
    fn handle_drag_cancel(&mut self, ctx: &mut ToolOperationContext<'_>, point: Point);

    /// Paints the shape in progress, if any, onto `layer`.
    fn render_shape_in_progress(&self, layer: &mut TransientLayer);

    /// Snapshot of the shape in progress.
    fn shape_in_progress(&self) -> Option<Shape>;

    fn is_drawing(&self) -> bool {
        self.shape_in_progress().is_some()
    }
}

/// One instance of every tool, looked up by [`Tool`].
pub struct ToolSet {
    pub pen: PenTool,
    pub eraser: PenTool,
    pub magic_wand: MagicWandTool,
    pub lasso: LassoTool,
    pub rect: RectTool,
}

impl Default for ToolSet {
    fn default() -> Self {
        Self::new(false)
    }
}

impl ToolSet {
    pub fn new(velocity_based_width: bool) -> Self {
        Self {
            pen: PenTool::pen(velocity_based_width),
            eraser: PenTool::eraser(),
            magic_wand: MagicWandTool::new(),
            lasso: LassoTool::new(),
            rect: RectTool::new(),
        }
    }

    pub fn get(&self, tool: Tool) -> &dyn DrawingTool {
        match tool {
            Tool::Pen => &self.pen,
            Tool::Eraser => &self.eraser,
            Tool::MagicWand => &self.magic_wand,
            Tool::Lasso => &self.lasso,
            Tool::Rect => &self.rect,
        }
    }

    pub fn get_mut(&mut self, tool: Tool) -> &mut dyn DrawingTool {
        match tool {
            Tool::Pen => &mut self.pen,
            Tool::Eraser => &mut self.eraser,
            Tool::MagicWand => &mut self.magic_wand,
            Tool::Lasso => &mut self.lasso,
            Tool::Rect => &mut self.rect,
        }
    }
}

#[cfg(test)]
mod tests;
