use super::Operation;
use crate::draw::Drawing;
use crate::event::{EngineEvent, EventBus};
use log::debug;

/// Linear undo/redo history and the only writer of committed drawing state.
///
/// Operations are applied and undone strictly in LIFO order. Applying a new
/// operation discards everything that could have been redone.
#[derive(Debug, Default)]
pub struct OperationStack {
    applied: Vec<Operation>,
    redo_buffer: Vec<Operation>,
    events: EventBus,
}

impl OperationStack {
    /// Creates an empty history emitting into `events`.
    pub fn new(events: EventBus) -> Self {
        Self {
            applied: Vec::new(),
            redo_buffer: Vec::new(),
            events,
        }
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn can_undo(&self) -> bool {
        !self.applied.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_buffer.is_empty()
    }

    /// Applied operations, oldest first.
    pub fn applied(&self) -> &[Operation] {
        &self.applied
    }

    /// Undone operations, the next one to redo last.
    pub fn redo_buffer(&self) -> &[Operation] {
        &self.redo_buffer
    }

    /// Applies `operation` to `drawing` and records it.
    pub fn apply(&mut self, drawing: &mut Drawing, operation: Operation) {
        let kind = operation.kind();
        operation.apply(drawing);
        self.applied.push(operation);
        if !self.redo_buffer.is_empty() {
            debug!("Discarding {} redoable operation(s)", self.redo_buffer.len());
            self.redo_buffer.clear();
        }
        debug!("Applied {} ({} in history)", kind.name(), self.applied.len());
        self.events.emit(EngineEvent::OperationApplied(kind));
    }

    /// Reverts the most recent operation. Returns `false` when there is
    /// nothing to undo.
    pub fn undo(&mut self, drawing: &mut Drawing) -> bool {
        let Some(operation) = self.applied.pop() else {
            return false;
        };

        let kind = operation.kind();
        operation.revert(drawing);
        self.redo_buffer.push(operation);
        debug!("Undid {}", kind.name());
        self.events.emit(EngineEvent::OperationUndone(kind));
        true
    }

    /// Re-applies the most recently undone operation. Returns `false` when
    /// there is nothing to redo.
    pub fn redo(&mut self, drawing: &mut Drawing) -> bool {
        let Some(operation) = self.redo_buffer.pop() else {
            return false;
        };

        let kind = operation.kind();
        operation.apply(drawing);
        self.applied.push(operation);
        debug!("Redid {}", kind.name());
        self.events.emit(EngineEvent::OperationRedone(kind));
        true
    }

    /// Forgets all history without touching the drawing.
    pub fn clear_history(&mut self) {
        self.applied.clear();
        self.redo_buffer.clear();
    }
}
