//! Game settings and tuning
//!
//! `Tuning` holds the physics constants the simulation reads every tick,
//! `Settings` wraps it together with presentation preferences. Both load
//! from JSON; missing fields fall back to the defaults in `crate::consts`.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(QualityPreset::Low),
            "medium" | "med" => Some(QualityPreset::Medium),
            "high" => Some(QualityPreset::High),
            _ => None,
        }
    }

    /// Particle pool capacity for this preset
    pub fn max_particles(&self) -> usize {
        match self {
            QualityPreset::Low => 100,
            QualityPreset::Medium => 500,
            QualityPreset::High => 2000,
        }
    }
}

/// Paddle shape used by both sides
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PaddleStyle {
    /// Classic flat bar with angle-from-offset bounces
    #[default]
    Rectangle,
    /// Round head on a handle with true vector reflection
    Racket,
}

/// Physics and rules constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub padding: f32,
    pub paddle_width: f32,
    pub paddle_min_height: f32,
    pub paddle_height_ratio: f32,
    pub paddle_smoothing: f32,
    pub racket_head_radius: f32,
    pub racket_handle_width: f32,
    pub racket_handle_length: f32,
    pub ball_radius: f32,
    pub serve_speed_min: f32,
    pub serve_speed_max: f32,
    pub serve_angle_spread: f32,
    pub max_speed: f32,
    pub max_bounce_angle: f32,
    pub paddle_speedup: f32,
    pub head_speedup: f32,
    pub handle_speedup: f32,
    pub paddle_nudge: f32,
    pub trail_length: usize,
    pub exit_margin: f32,
    pub keyboard_speed: f32,
    pub pointer_blend: f32,
    pub cpu_max_step: f32,
    pub win_score: u32,
    pub particle_gravity: f32,
    pub max_frame_ms: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            padding: PADDING,
            paddle_width: PADDLE_WIDTH,
            paddle_min_height: PADDLE_MIN_HEIGHT,
            paddle_height_ratio: PADDLE_HEIGHT_RATIO,
            paddle_smoothing: PADDLE_SMOOTHING,
            racket_head_radius: RACKET_HEAD_RADIUS,
            racket_handle_width: RACKET_HANDLE_WIDTH,
            racket_handle_length: RACKET_HANDLE_LENGTH,
            ball_radius: BALL_RADIUS,
            serve_speed_min: SERVE_SPEED_MIN,
            serve_speed_max: SERVE_SPEED_MAX,
            serve_angle_spread: SERVE_ANGLE_SPREAD,
            max_speed: BALL_MAX_SPEED,
            max_bounce_angle: MAX_BOUNCE_ANGLE,
            paddle_speedup: PADDLE_SPEEDUP,
            head_speedup: HEAD_SPEEDUP,
            handle_speedup: HANDLE_SPEEDUP,
            paddle_nudge: PADDLE_NUDGE,
            trail_length: TRAIL_LENGTH,
            exit_margin: EXIT_MARGIN,
            keyboard_speed: KEYBOARD_SPEED,
            pointer_blend: POINTER_BLEND,
            cpu_max_step: CPU_MAX_STEP,
            win_score: WIN_SCORE,
            particle_gravity: PARTICLE_GRAVITY,
            max_frame_ms: MAX_FRAME_MS,
        }
    }
}

impl Tuning {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Rectangle paddle height for a field of the given height
    pub fn paddle_height_for(&self, field_height: f32, min_height: f32) -> f32 {
        min_height.max(field_height * self.paddle_height_ratio)
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Graphics quality preset
    pub quality: QualityPreset,
    /// Paddle shape for both sides
    pub paddle_style: PaddleStyle,

    // === Visual Effects ===
    /// Ball trails
    pub trails: bool,
    /// Particle effects (wall sparks, hit bursts, score bursts)
    pub particles: bool,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Mute all cues
    pub muted: bool,

    /// Physics constants
    pub tuning: Tuning,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,
            paddle_style: PaddleStyle::Rectangle,

            trails: true,
            particles: true,

            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,

            tuning: Tuning::default(),
        }
    }
}

impl Settings {
    /// Create settings from a quality preset
    pub fn from_preset(preset: QualityPreset) -> Self {
        Self {
            quality: preset,
            ..Self::default()
        }
    }

    /// Effective particle pool capacity
    pub fn max_particles(&self) -> usize {
        if !self.particles {
            0
        } else {
            self.quality.max_particles()
        }
    }

    /// Effective trail length
    pub fn trail_length(&self) -> usize {
        if self.trails {
            self.tuning.trail_length
        } else {
            0
        }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load_from(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Could not read settings {}: {}", path.display(), e);
                return Self::default();
            }
        };

        match Self::from_json(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Invalid settings {}: {}, using defaults", path.display(), e);
                Self::default()
            }
        }
    }
}
