//! Touch-driven vector drawing engine.
//!
//! Raw touches are classified by an immediate pan recognizer, turned into
//! shapes by drawing tools, committed through an undoable operation stack,
//! and rasterized with Cairo. Drawings persist as versioned JSON documents.
//!
//! The [`Editor`] ties these together for hosts; the lower-level modules are
//! public for callers that want to drive tools or the canvas directly.

pub mod config;
pub mod draw;
pub mod event;
pub mod history;
pub mod input;
pub mod script;
pub mod session;
pub mod util;

pub use config::Config;
pub use draw::{Canvas, Drawing, Shape};
pub use event::{EngineEvent, EventBus, EventHandler};
pub use history::{Operation, OperationStack};
pub use input::{Editor, Tool, TouchEvent};
