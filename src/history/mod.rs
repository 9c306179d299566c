//! Undo/redo history of reversible drawing operations.
//!
//! [`Operation`]s are the only way committed drawing state changes, and the
//! [`OperationStack`] is the only thing that applies them.

mod operation;
mod stack;
#[cfg(test)]
mod tests;

pub use operation::{Operation, OperationKind};
pub use stack::OperationStack;
