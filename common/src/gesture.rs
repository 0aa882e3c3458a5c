//! Tap detection for column headers.
//!
//! A header chip is also a drag handle, so a touch sequence only opens the
//! filter editor when it is short and nearly stationary. Anything else is
//! left to the widget as a drag.

use crate::config::{TAP_MAX_DISTANCE_PX, TAP_MAX_DURATION_MS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderGesture {
    /// Open the filter editor.
    Tap,
    /// Let the widget handle it natively.
    Drag,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct TouchPoint {
    x: f64,
    y: f64,
    at_ms: f64,
}

/// Tracks one touch sequence on one header element.
#[derive(Debug, Clone, Default)]
pub struct TapTracker {
    start: Option<TouchPoint>,
}

impl TapTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn touch_start(&mut self, x: f64, y: f64, at_ms: f64) {
        self.start = Some(TouchPoint { x, y, at_ms });
    }

    /// Classifies the sequence that ends at `(x, y)` at `at_ms`. An end
    /// without a recorded start is never a tap.
    pub fn touch_end(&mut self, x: f64, y: f64, at_ms: f64) -> HeaderGesture {
        let Some(start) = self.start.take() else {
            return HeaderGesture::Drag;
        };
        let duration = at_ms - start.at_ms;
        let distance = ((x - start.x).powi(2) + (y - start.y).powi(2)).sqrt();
        if duration < TAP_MAX_DURATION_MS && distance < TAP_MAX_DISTANCE_PX {
            HeaderGesture::Tap
        } else {
            HeaderGesture::Drag
        }
    }

    pub fn cancel(&mut self) {
        self.start = None;
    }
}
