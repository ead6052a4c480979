//! Frame-time normalization
//!
//! Converts host timestamps (milliseconds, as handed to an animation frame
//! callback) into the dimensionless step multiplier the simulation runs on:
//! 1.0 is one frame at 60 Hz.

use crate::consts::{BASELINE_HZ, MAX_FRAME_MS};

#[derive(Debug, Clone, PartialEq)]
pub struct FrameClock {
    last_ms: Option<f64>,
    max_frame_ms: f32,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(MAX_FRAME_MS)
    }
}

impl FrameClock {
    pub fn new(max_frame_ms: f32) -> Self {
        Self {
            last_ms: None,
            max_frame_ms: max_frame_ms.max(0.0),
        }
    }

    /// Step multiplier for the frame at `now_ms`
    ///
    /// The first frame yields 0. Gaps longer than the frame cap (a
    /// backgrounded tab, a slow frame) are clamped; a clock that runs
    /// backwards yields 0.
    pub fn advance(&mut self, now_ms: f64) -> f32 {
        let elapsed = match self.last_ms {
            Some(last) => (now_ms - last).max(0.0) as f32,
            None => 0.0,
        };
        self.last_ms = Some(now_ms);
        normalize(elapsed, self.max_frame_ms)
    }

    /// Forget the previous timestamp, so the next frame yields 0
    pub fn reset(&mut self) {
        self.last_ms = None;
    }
}

/// `min(cap, elapsed_ms) / (1000 / 60)`
pub fn normalize(elapsed_ms: f32, max_frame_ms: f32) -> f32 {
    elapsed_ms.clamp(0.0, max_frame_ms) / (1000.0 / BASELINE_HZ)
}
