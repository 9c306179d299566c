//! Immediate pan recognizer.
//!
//! Platform pan recognizers wait for a dead zone before reporting a drag,
//! which drops the start of every stroke. This recognizer reports `Began` on
//! the very first press and `Changed` on every move of the tracked touch,
//! and lets the caller classify tap vs. drag afterwards through
//! [`ImmediatePanRecognizer::has_exceeded_tap_threshold`].
//!
//! Lifecycle:
//! - press: the first touch is tracked, state becomes `Began`; other touches
//!   are ignored apart from setting `had_second_touch`
//! - move: samples shift, thresholds latch, state becomes `Changed`
//! - release/cancel: state becomes `Ended`/`Cancelled` and a reset is
//!   scheduled; flags stay readable until [`ImmediatePanRecognizer::tick`]
//!   or the next press performs it

use super::events::{TouchEvent, TouchPhase};
use crate::config::GestureConfig;
use crate::util::{Point, Vector};
use log::debug;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Recognizer state as seen by the caller after each event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureState {
    /// Idle, waiting for a press
    Possible,
    Began,
    Changed,
    Ended,
    Cancelled,
}

/// How velocity is derived from the last two samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum VelocityMode {
    /// Both axes divided by elapsed time
    #[default]
    Normalized,
    /// `(dx / dt, dy - dt)`, matching drawings recorded with older builds
    Legacy,
}

#[derive(Debug, Clone, Copy)]
struct Sample {
    point: Point,
    time: f64,
}

#[derive(Debug, Clone)]
pub struct ImmediatePanRecognizer {
    tap_threshold: f64,
    commit_threshold: f64,
    velocity_mode: VelocityMode,

    state: GestureState,
    tracked: Option<u64>,
    start: Point,
    previous: Option<Sample>,
    last: Option<Sample>,
    has_exceeded_tap_threshold: bool,
    has_exceeded_commit_threshold: bool,
    had_second_touch: bool,
    reset_pending: bool,
}

impl Default for ImmediatePanRecognizer {
    fn default() -> Self {
        Self::new(10.0, 40.0, VelocityMode::Normalized)
    }
}

impl ImmediatePanRecognizer {
    pub fn new(tap_threshold: f64, commit_threshold: f64, velocity_mode: VelocityMode) -> Self {
        Self {
            tap_threshold,
            commit_threshold,
            velocity_mode,
            state: GestureState::Possible,
            tracked: None,
            start: Point::ZERO,
            previous: None,
            last: None,
            has_exceeded_tap_threshold: false,
            has_exceeded_commit_threshold: false,
            had_second_touch: false,
            reset_pending: false,
        }
    }

    pub fn from_config(config: &GestureConfig) -> Self {
        Self::new(
            config.tap_threshold,
            config.commit_threshold,
            config.velocity_mode,
        )
    }

    pub fn state(&self) -> GestureState {
        self.state
    }

    pub fn tap_threshold(&self) -> f64 {
        self.tap_threshold
    }

    pub fn commit_threshold(&self) -> f64 {
        self.commit_threshold
    }

    pub fn velocity_mode(&self) -> VelocityMode {
        self.velocity_mode
    }

    /// True once the tracked touch has moved at least `tap_threshold` away
    /// from its start. Stays true for the rest of the gesture.
    pub fn has_exceeded_tap_threshold(&self) -> bool {
        self.has_exceeded_tap_threshold
    }

    /// Like the tap threshold flag, for the larger commit distance.
    pub fn has_exceeded_commit_threshold(&self) -> bool {
        self.has_exceeded_commit_threshold
    }

    pub fn had_second_touch(&self) -> bool {
        self.had_second_touch
    }

    pub fn is_reset_pending(&self) -> bool {
        self.reset_pending
    }

    pub fn start_point(&self) -> Point {
        self.start
    }

    /// Location of the most recent sample.
    pub fn location(&self) -> Point {
        self.last.map_or(self.start, |sample| sample.point)
    }

    /// Velocity from the last two samples.
    ///
    /// `None` before the first move or when the samples share a timestamp.
    pub fn velocity(&self) -> Option<Vector> {
        let (previous, last) = (self.previous?, self.last?);
        let dt = last.time - previous.time;
        if dt <= 0.0 {
            return None;
        }

        let delta = last.point - previous.point;
        Some(match self.velocity_mode {
            VelocityMode::Normalized => Vector::new(delta.x / dt, delta.y / dt),
            VelocityMode::Legacy => Vector::new(delta.x / dt, delta.y - dt),
        })
    }

    /// Feeds one touch event. Returns the new state when the event advanced
    /// the gesture, `None` when it was ignored.
    pub fn handle(&mut self, event: &TouchEvent) -> Option<GestureState> {
        match event.phase {
            TouchPhase::Press => self.press(event),
            TouchPhase::Move => self.moved(event),
            TouchPhase::Release => self.finish(event, GestureState::Ended),
            TouchPhase::Cancel => self.finish(event, GestureState::Cancelled),
        }
    }

    /// Performs a reset scheduled by the end of the previous gesture.
    pub fn tick(&mut self) {
        if self.reset_pending {
            self.reset();
        }
    }

    /// Drops the tracked touch and clears every flag.
    pub fn reset(&mut self) {
        self.state = GestureState::Possible;
        self.tracked = None;
        self.previous = None;
        self.last = None;
        self.has_exceeded_tap_threshold = false;
        self.has_exceeded_commit_threshold = false;
        self.had_second_touch = false;
        self.reset_pending = false;
    }

    fn is_active(&self) -> bool {
        matches!(self.state, GestureState::Began | GestureState::Changed)
    }

    fn is_tracked(&self, event: &TouchEvent) -> bool {
        self.is_active() && self.tracked == Some(event.id)
    }

    fn press(&mut self, event: &TouchEvent) -> Option<GestureState> {
        self.tick();

        if self.tracked.is_some() {
            // Another contact landed; note it but keep the gesture alive.
            self.had_second_touch = true;
            return None;
        }

        let sample = Sample {
            point: event.point,
            time: event.timestamp,
        };
        self.tracked = Some(event.id);
        self.had_second_touch = event.touch_count > 1;
        self.start = event.point;
        self.previous = None;
        self.last = Some(sample);
        self.state = GestureState::Began;
        Some(self.state)
    }

    fn moved(&mut self, event: &TouchEvent) -> Option<GestureState> {
        if !self.is_tracked(event) {
            return None;
        }

        self.had_second_touch |= event.touch_count > 1;
        self.previous = self.last;
        self.last = Some(Sample {
            point: event.point,
            time: event.timestamp,
        });

        let displacement = event.point.distance_to(self.start);
        if displacement >= self.tap_threshold && !self.has_exceeded_tap_threshold {
            debug!("Touch left tap radius after {:.1} units", displacement);
            self.has_exceeded_tap_threshold = true;
        }
        if displacement >= self.commit_threshold {
            self.has_exceeded_commit_threshold = true;
        }

        self.state = GestureState::Changed;
        Some(self.state)
    }

    fn finish(&mut self, event: &TouchEvent, state: GestureState) -> Option<GestureState> {
        if !self.is_tracked(event) {
            return None;
        }

        self.state = state;
        self.reset_pending = true;
        Some(self.state)
    }
}
