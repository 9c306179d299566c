//! Raw touch input as delivered by the host.

use crate::util::Point;
use serde::{Deserialize, Serialize};

/// Lifecycle phase of a single touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TouchPhase {
    /// Finger or pointer went down
    Press,
    /// Tracked contact moved
    Move,
    /// Contact lifted
    Release,
    /// The host aborted the touch (e.g. system gesture took over)
    Cancel,
}

/// One press/move/release sample for a single touch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TouchEvent {
    /// Identifies the contact across its phases
    #[serde(default)]
    pub id: u64,
    pub phase: TouchPhase,
    /// Location in canvas coordinates
    pub point: Point,
    /// Seconds on a monotonic clock
    pub timestamp: f64,
    /// Number of contacts currently down, including this one
    #[serde(default = "default_touch_count")]
    pub touch_count: usize,
}

fn default_touch_count() -> usize {
    1
}

impl TouchEvent {
    pub fn new(phase: TouchPhase, point: Point, timestamp: f64) -> Self {
        Self {
            id: 0,
            phase,
            point,
            timestamp,
            touch_count: 1,
        }
    }

    pub fn press(point: Point, timestamp: f64) -> Self {
        Self::new(TouchPhase::Press, point, timestamp)
    }

    pub fn moved(point: Point, timestamp: f64) -> Self {
        Self::new(TouchPhase::Move, point, timestamp)
    }

    pub fn release(point: Point, timestamp: f64) -> Self {
        Self::new(TouchPhase::Release, point, timestamp)
    }

    pub fn cancel(point: Point, timestamp: f64) -> Self {
        Self::new(TouchPhase::Cancel, point, timestamp)
    }

    /// Same event attributed to another contact.
    pub fn with_id(self, id: u64) -> Self {
        Self { id, ..self }
    }

    pub fn with_touch_count(self, touch_count: usize) -> Self {
        Self {
            touch_count,
            ..self
        }
    }
}
