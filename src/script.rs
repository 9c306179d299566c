//! JSON replay scripts.
//!
//! A script is a list of steps fed to an [`Editor`] in order: raw touch
//! events, whole strokes, tool switches, style changes and history commands.
//!
//! ```json
//! {
//!   "steps": [
//!     { "action": "style", "stroke_color": "red", "stroke_width": 4.0 },
//!     { "action": "stroke", "points": [{"x": 10, "y": 10}, {"x": 80, "y": 40}] },
//!     { "action": "tool", "tool": "rect" },
//!     { "action": "touch", "phase": "press", "point": {"x": 5, "y": 5}, "timestamp": 1.0 },
//!     { "action": "undo" }
//!   ]
//! }
//! ```

use crate::config::ColorSpec;
use crate::input::{Editor, TouchEvent, TouchPhase, Tool};
use crate::util::{Point, Size};
use anyhow::{Context, Result};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Seconds between generated samples of a `stroke` step.
const DEFAULT_SAMPLE_INTERVAL: f64 = 1.0 / 60.0;

fn default_interval() -> f64 {
    DEFAULT_SAMPLE_INTERVAL
}

/// One scripted action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "kebab-case")]
pub enum Step {
    /// A raw touch event
    Touch(TouchEvent),
    /// Press on the first point, move through the rest, release on the last
    Stroke {
        points: Vec<Point>,
        #[serde(default = "default_interval")]
        interval: f64,
    },
    /// Select a tool
    Tool { tool: Tool },
    /// Change the style used for new shapes; omitted fields stay as they are
    Style {
        #[serde(default)]
        stroke_color: Option<ColorSpec>,
        #[serde(default)]
        stroke_alpha: Option<f64>,
        #[serde(default)]
        fill_color: Option<ColorSpec>,
        /// Drop the fill color
        #[serde(default)]
        no_fill: bool,
        #[serde(default)]
        stroke_width: Option<f64>,
        #[serde(default)]
        velocity_based_width: Option<bool>,
    },
    Undo,
    Redo,
    /// Run the recognizer's deferred reset
    Tick,
    /// Remove the shape at `index` as an undoable operation
    Remove { index: usize },
    /// Remove every shape as one undoable operation
    Clear,
}

/// A replayable sequence of steps.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Script {
    /// Canvas size override
    #[serde(default)]
    pub canvas: Option<Size>,
    pub steps: Vec<Step>,
}

/// Tally of what a replay did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplayReport {
    pub steps: usize,
    pub touches: usize,
    /// Undo/redo/remove/clear steps that had nothing to act on
    pub skipped: usize,
}

impl Script {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse replay script")
    }

    /// Reads a script file.
    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read script {}", path.display()))?;
        let script = Self::from_json(&json)
            .with_context(|| format!("Invalid script {}", path.display()))?;
        info!(
            "Loaded script {} ({} steps)",
            path.display(),
            script.steps.len()
        );
        Ok(script)
    }

    /// Feeds every step to `editor`.
    pub fn run(&self, editor: &mut Editor) -> ReplayReport {
        let mut player = Player {
            editor,
            clock: 0.0,
            report: ReplayReport::default(),
        };
        for (index, step) in self.steps.iter().enumerate() {
            debug!("Script step {}: {:?}", index, step);
            player.play(step);
            player.report.steps += 1;
        }
        player.report
    }
}

struct Player<'a> {
    editor: &'a mut Editor,
    /// Timestamp of the latest generated or scripted touch
    clock: f64,
    report: ReplayReport,
}

impl Player<'_> {
    fn play(&mut self, step: &Step) {
        match step {
            Step::Touch(event) => {
                self.clock = self.clock.max(event.timestamp);
                self.touch(*event);
            }
            Step::Stroke { points, interval } => self.stroke(points, *interval),
            Step::Tool { tool } => self.editor.set_tool(*tool),
            Step::Style {
                stroke_color,
                stroke_alpha,
                fill_color,
                no_fill,
                stroke_width,
                velocity_based_width,
            } => {
                let settings = &mut self.editor.user_settings;
                if let Some(spec) = stroke_color {
                    settings.stroke_color = spec.to_color().with_alpha(settings.stroke_color.a);
                }
                if let Some(alpha) = stroke_alpha {
                    settings.stroke_color.a = alpha.clamp(0.0, 1.0);
                }
                if *no_fill {
                    settings.fill_color = None;
                } else if let Some(spec) = fill_color {
                    settings.fill_color = Some(spec.to_color());
                }
                if let Some(width) = stroke_width {
                    settings.stroke_width = width.max(0.1);
                }
                if let Some(enabled) = velocity_based_width {
                    self.editor.set_velocity_based_width(*enabled);
                }
            }
            Step::Undo => self.count_skip(|editor| editor.undo()),
            Step::Redo => self.count_skip(|editor| editor.redo()),
            Step::Tick => self.editor.tick(),
            Step::Remove { index } => {
                let id = self.editor.drawing().shapes().get(*index).map(|s| s.id());
                match id {
                    Some(id) => self.count_skip(|editor| editor.remove_shape(id)),
                    None => {
                        warn!("Script remove: no shape at index {}", index);
                        self.report.skipped += 1;
                    }
                }
            }
            Step::Clear => self.count_skip(|editor| editor.clear()),
        }
    }

    fn touch(&mut self, event: TouchEvent) {
        self.editor.handle_touch(&event);
        self.report.touches += 1;
    }

    fn stroke(&mut self, points: &[Point], interval: f64) {
        let Some((first, rest)) = points.split_first() else {
            warn!("Script stroke without points ignored");
            return;
        };

        self.editor.tick();
        self.touch(TouchEvent::new(TouchPhase::Press, *first, self.clock));
        for point in rest {
            self.clock += interval;
            self.touch(TouchEvent::new(TouchPhase::Move, *point, self.clock));
        }
        self.clock += interval;
        let last = rest.last().unwrap_or(first);
        self.touch(TouchEvent::new(TouchPhase::Release, *last, self.clock));
        self.editor.tick();
    }

    fn count_skip(&mut self, action: impl FnOnce(&mut Editor) -> bool) {
        if !action(self.editor) {
            self.report.skipped += 1;
        }
    }
}
