//! Frame loop plumbing: style transforms, stop flag and the fixed-step clock

use crate::physics::BodyState;
use std::cell::Cell;
use std::rc::Rc;

/// Position and rotation written onto a tracked element each frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementTransform {
    /// CSS `left` in pixels
    pub left: f32,
    /// CSS `top` in pixels
    pub top: f32,
    /// Rotation in radians
    pub angle: f32,
}

impl ElementTransform {
    /// CSS `position` every tracked element is switched to
    pub const POSITION: &'static str = "absolute";

    /// Map a body centre onto the element's top-left corner, offset by the
    /// body's bounding-box extents
    pub fn from_body(state: &BodyState) -> Self {
        Self {
            left: state.x - state.bounds_width,
            top: state.y - state.bounds_height,
            angle: state.angle,
        }
    }

    pub fn css_left(&self) -> String {
        format!("{}px", self.left)
    }

    pub fn css_top(&self) -> String {
        format!("{}px", self.top)
    }

    pub fn css_transform(&self) -> String {
        format!("rotate({}rad)", self.angle)
    }
}

/// Shared running flag for a self-rescheduling loop
#[derive(Debug, Clone)]
pub struct LoopFlag {
    running: Rc<Cell<bool>>,
}

impl LoopFlag {
    pub fn new() -> Self {
        Self {
            running: Rc::new(Cell::new(true)),
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.get()
    }

    /// Stop every loop sharing this flag before its next frame
    pub fn stop(&self) {
        self.running.set(false);
    }
}

impl Default for LoopFlag {
    fn default() -> Self {
        Self::new()
    }
}

/// Converts animation frame timestamps into a number of fixed simulation steps
#[derive(Debug, Clone)]
pub struct StepClock {
    step_ms: f64,
    max_substeps: u32,
    last_timestamp: Option<f64>,
    accumulator: f64,
}

impl StepClock {
    pub fn new(step_hz: f32, max_substeps: u32) -> Self {
        Self {
            step_ms: 1000.0 / step_hz as f64,
            max_substeps: max_substeps.max(1),
            last_timestamp: None,
            accumulator: 0.0,
        }
    }

    /// Steps to run for a frame stamped `timestamp_ms`
    pub fn advance(&mut self, timestamp_ms: f64) -> u32 {
        let Some(last) = self.last_timestamp.replace(timestamp_ms) else {
            // Nothing to measure against yet: step once like a steady frame
            return 1;
        };

        self.accumulator += (timestamp_ms - last).max(0.0);
        let due = (self.accumulator / self.step_ms).floor() as u32;
        if due > self.max_substeps {
            // Fell behind (tab in background); drop the backlog
            self.accumulator = 0.0;
            return self.max_substeps;
        }
        self.accumulator -= due as f64 * self.step_ms;
        due
    }
}
