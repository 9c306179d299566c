//! Input handling: touch events, gesture recognition, tools and the editor.
//!
//! Raw touches flow through [`ImmediatePanRecognizer`] into the active
//! [`DrawingTool`]; the [`Editor`] owns the pieces and keeps the canvas in
//! step with the drawing.

pub mod events;
pub mod gesture;
pub mod settings;
pub mod state;
pub mod tool;

pub use events::{TouchEvent, TouchPhase};
pub use gesture::{GestureState, ImmediatePanRecognizer, VelocityMode};
pub use settings::UserSettings;
pub use state::Editor;
pub use tool::{DrawingTool, MagicWandImage, RenderMode, Tool, ToolOperationContext, ToolSet};
