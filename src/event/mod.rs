//! Observer boundary: engine events and the bus that delivers them.

mod bus;
mod events;

pub use bus::EventBus;
pub use events::EngineEvent;

/// Receiver of [`EngineEvent`]s.
///
/// Implemented for every `FnMut(&EngineEvent)` closure.
pub trait EventHandler {
    fn handle_event(&mut self, event: &EngineEvent);
}

impl<F> EventHandler for F
where
    F: FnMut(&EngineEvent),
{
    fn handle_event(&mut self, event: &EngineEvent) {
        self(event)
    }
}
