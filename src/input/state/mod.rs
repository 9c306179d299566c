mod core;
mod render;
mod touch;

pub use core::Editor;
