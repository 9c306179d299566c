use super::{EngineEvent, EventHandler};
use log::warn;
use std::cell::RefCell;
use std::rc::Rc;

/// Broadcasts engine events to registered handlers.
///
/// Clones share the same handler list, so the editor and its operation
/// stack can each hold a handle and emit into one set of listeners.
#[derive(Clone, Default)]
pub struct EventBus {
    handlers: Rc<RefCell<Vec<Box<dyn EventHandler>>>>,
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let count = self.handlers.try_borrow().map_or(0, |handlers| handlers.len());
        f.debug_struct("EventBus")
            .field("handlers", &format!("<{} handlers>", count))
            .finish()
    }
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe a handler to receive events
    pub fn subscribe(&self, handler: impl EventHandler + 'static) {
        match self.handlers.try_borrow_mut() {
            Ok(mut handlers) => handlers.push(Box::new(handler)),
            Err(_) => warn!("Ignoring subscription made while an event is being delivered"),
        }
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.try_borrow().map_or(0, |handlers| handlers.len())
    }

    /// Emit an event to all registered handlers, in subscription order.
    ///
    /// Events emitted from inside a handler are dropped with a warning.
    pub fn emit(&self, event: EngineEvent) {
        match self.handlers.try_borrow_mut() {
            Ok(mut handlers) => {
                for handler in handlers.iter_mut() {
                    handler.handle_event(&event);
                }
            }
            Err(_) => warn!("Dropping re-entrant event {:?}", event),
        }
    }
}
