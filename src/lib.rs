//! Arcade Pong - two paddles, a bouncing ball and a CPU opponent
//!
//! Core modules:
//! - `sim`: Simulation core (physics, collisions, particles, match state)
//! - `clock`: Frame-time normalization against a 60 Hz baseline
//! - `driver`: Per-frame driver that hands state to the presentation layer
//! - `audio`: Sound cue parameters for collision and scoring events
//! - `settings`: Data-driven tuning and player preferences
//! - `platform`: Browser bridge (wasm32 only)

pub mod audio;
pub mod clock;
pub mod driver;
pub mod platform;
pub mod settings;
pub mod sim;

pub use settings::{PaddleStyle, QualityPreset, Settings, Tuning};

/// Game configuration constants
///
/// Speeds, steps and rates are expressed per normalized frame (60 Hz) and
/// must be scaled by the frame multiplier wherever they are applied.
pub mod consts {
    use std::f32::consts::PI;

    /// Baseline update rate the constants are tuned against
    pub const BASELINE_HZ: f32 = 60.0;
    /// Longest wall-clock gap accepted between two frames (ms)
    pub const MAX_FRAME_MS: f32 = 40.0;

    /// Default playfield size (CSS pixels)
    pub const FIELD_WIDTH: f32 = 960.0;
    pub const FIELD_HEIGHT: f32 = 540.0;
    /// Dead band along the top and bottom edges, also the paddle inset
    pub const PADDING: f32 = 24.0;

    /// Rectangle paddle
    pub const PADDLE_WIDTH: f32 = 12.0;
    pub const PADDLE_MIN_HEIGHT: f32 = 80.0;
    /// Smaller floor used once the field has been resized
    pub const PADDLE_REFLOW_MIN_HEIGHT: f32 = 60.0;
    pub const PADDLE_HEIGHT_RATIO: f32 = 0.14;
    /// Fraction of the remaining distance covered per frame
    pub const PADDLE_SMOOTHING: f32 = 0.12;

    /// Racket paddle (round head on a handle)
    pub const RACKET_HEAD_RADIUS: f32 = 22.0;
    pub const RACKET_HANDLE_WIDTH: f32 = 8.0;
    pub const RACKET_HANDLE_LENGTH: f32 = 46.0;

    /// Ball
    pub const BALL_RADIUS: f32 = 8.0;
    pub const SERVE_SPEED_MIN: f32 = 6.0;
    pub const SERVE_SPEED_MAX: f32 = 8.0;
    /// Serve leaves center within ±22.5°
    pub const SERVE_ANGLE_SPREAD: f32 = PI / 8.0;
    pub const BALL_MAX_SPEED: f32 = 18.0;
    /// Bounce angle at the paddle tips (60°)
    pub const MAX_BOUNCE_ANGLE: f32 = PI / 3.0;
    /// Speed multipliers per paddle contact
    pub const PADDLE_SPEEDUP: f32 = 1.08;
    pub const HEAD_SPEEDUP: f32 = 1.06;
    pub const HANDLE_SPEEDUP: f32 = 1.04;
    /// Gap left between paddle face and ball after a hit
    pub const PADDLE_NUDGE: f32 = 0.5;
    /// Number of recent positions kept for the trail
    pub const TRAIL_LENGTH: usize = 18;
    /// How far past the side edge the ball must travel before a point is scored
    pub const EXIT_MARGIN: f32 = 40.0;

    /// Player controls
    pub const KEYBOARD_SPEED: f32 = 6.0;
    pub const POINTER_BLEND: f32 = 0.92;

    /// CPU tracking step per frame
    pub const CPU_MAX_STEP: f32 = 4.6;

    /// First to this many points wins the round
    pub const WIN_SCORE: u32 = 11;

    /// Downward acceleration applied to particles each frame
    pub const PARTICLE_GRAVITY: f32 = 0.08;

    /// Floor applied to distances before normalizing contact normals
    pub const NORMAL_EPSILON: f32 = 1e-4;
}

/// Move `current` toward `target` by at most `max_step`
#[inline]
pub fn approach(current: f32, target: f32, max_step: f32) -> f32 {
    current + (target - current).clamp(-max_step, max_step)
}

/// Exponential smoothing factor for a per-frame rate scaled by `dt`
#[inline]
pub fn smoothing_factor(rate: f32, dt: f32) -> f32 {
    (rate * dt).clamp(0.0, 1.0)
}
