//! Pen line segments and velocity-based width modulation.

use crate::util::{Point, Vector};
use serde::{Deserialize, Serialize};

/// Speed (canvas units per second) that maps to a modulation factor of 1.0.
const VELOCITY_SCALE: f64 = 600.0;
/// Largest relative width change allowed between two consecutive samples.
const MAX_WIDTH_STEP: f64 = 0.7;
const MIN_WIDTH_RATIO: f64 = 0.2;
const MAX_WIDTH_RATIO: f64 = 2.5;

/// One straight piece of a pen stroke.
///
/// Pen-family shapes keep an append-only list of these; each segment starts
/// where the previous one ended.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PenLineSegment {
    pub a: Point,
    pub b: Point,
    pub width: f64,
}

impl PenLineSegment {
    pub fn new(a: Point, b: Point, width: f64) -> Self {
        Self { a, b, width }
    }

    pub fn length(&self) -> f64 {
        self.a.distance_to(self.b)
    }

    pub fn is_degenerate(&self) -> bool {
        self.a == self.b
    }
}

/// Width for the next segment of a velocity-sensitive stroke.
///
/// Speeding up widens the line and slowing down thins it. The change is
/// applied to the previous segment's width so the stroke never jumps, and the
/// result stays within `[0.2 * width, 2.5 * width]`.
pub fn modulated_width(
    width: f64,
    velocity: Vector,
    previous_velocity: Vector,
    previous_width: f64,
) -> f64 {
    let speed = velocity.length() / VELOCITY_SCALE;
    let previous_speed = previous_velocity.length() / VELOCITY_SCALE;
    let step = (speed - previous_speed).clamp(-MAX_WIDTH_STEP, MAX_WIDTH_STEP);

    (previous_width * (1.0 + step)).clamp(width * MIN_WIDTH_RATIO, width * MAX_WIDTH_RATIO)
}
