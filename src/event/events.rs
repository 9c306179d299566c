use crate::history::OperationKind;
use crate::input::Tool;
use crate::util::Point;

/// Notifications broadcast by the editor and the operation stack.
///
/// Hosts subscribe to these to keep UI state (undo button enablement,
/// overlay visibility, active tool highlight) in sync with the engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EngineEvent {
    /// An operation was applied and pushed onto the undo history
    OperationApplied(OperationKind),
    /// The most recent operation was reverted
    OperationUndone(OperationKind),
    /// The most recently undone operation was applied again
    OperationRedone(OperationKind),
    /// The active tool changed
    ToolChanged { old: Tool, new: Tool },
    /// A drag began with the given tool
    DragStarted { tool: Tool, point: Point },
    /// A drag moved
    DragContinued { tool: Tool, point: Point },
    /// A drag finished and its shape (if any) was committed
    DragEnded { tool: Tool, point: Point },
    /// A drag was abandoned without committing anything
    DragCancelled { tool: Tool },
}
