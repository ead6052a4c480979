//! Game state and core simulation types
//!
//! Everything the frame loop mutates is owned by `GameState`; the render
//! collaborator reads it through the serialized snapshot.

use std::collections::VecDeque;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::ai::CpuController;
use super::collision::Rect;
use super::particles::ParticlePool;
use super::round::MatchState;
use crate::consts::{FIELD_HEIGHT, FIELD_WIDTH, PADDLE_REFLOW_MIN_HEIGHT};
use crate::settings::{PaddleStyle, Settings, Tuning};

/// Which end of the field a paddle defends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// Player paddle
    Left,
    /// CPU paddle
    Right,
}

impl Side {
    /// Horizontal direction pointing away from this side's goal
    pub fn away(self) -> f32 {
        match self {
            Side::Left => 1.0,
            Side::Right => -1.0,
        }
    }
}

/// Playfield dimensions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub width: f32,
    pub height: f32,
    /// Dead band along the top and bottom edges
    pub padding: f32,
}

impl Field {
    pub fn new(width: f32, height: f32, padding: f32) -> Self {
        Self {
            width,
            height,
            padding,
        }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Legal range for the top edge of a paddle of the given height
    pub fn paddle_band(&self, paddle_height: f32) -> (f32, f32) {
        let lo = self.padding;
        let hi = (self.height - self.padding - paddle_height).max(lo);
        (lo, hi)
    }
}

/// Paddle collision shape
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PaddleShape {
    /// Flat bar
    Rectangle { width: f32, height: f32 },
    /// Round head with a handle hanging below it
    HeadAndHandle {
        head_radius: f32,
        handle_width: f32,
        handle_length: f32,
    },
}

impl PaddleShape {
    pub fn width(&self) -> f32 {
        match *self {
            PaddleShape::Rectangle { width, .. } => width,
            PaddleShape::HeadAndHandle { head_radius, .. } => head_radius * 2.0,
        }
    }

    pub fn height(&self) -> f32 {
        match *self {
            PaddleShape::Rectangle { height, .. } => height,
            PaddleShape::HeadAndHandle {
                head_radius,
                handle_length,
                ..
            } => head_radius * 2.0 + handle_length,
        }
    }
}

/// Paddle geometry in field coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PaddleGeometry {
    Rect(Rect),
    Racket {
        head_center: Vec2,
        head_radius: f32,
        handle: Rect,
    },
}

/// A paddle; `x`/`y` is the top-left corner of its bounding box
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    pub side: Side,
    pub x: f32,
    pub y: f32,
    /// Smoothed target for the top edge (unconstrained)
    pub target_y: f32,
    pub shape: PaddleShape,
}

impl Paddle {
    /// Create a paddle centered vertically on its side of the field
    pub fn new(side: Side, field: &Field, shape: PaddleShape) -> Self {
        let mut paddle = Self {
            side,
            x: 0.0,
            y: (field.height - shape.height()) / 2.0,
            target_y: 0.0,
            shape,
        };
        paddle.place_x(field);
        paddle.y = paddle.clamped(paddle.y, field);
        paddle.target_y = paddle.y;
        paddle
    }

    pub fn width(&self) -> f32 {
        self.shape.width()
    }

    pub fn height(&self) -> f32 {
        self.shape.height()
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width() / 2.0, self.y + self.height() / 2.0)
    }

    /// Record the desired center position (from input or AI)
    pub fn set_target(&mut self, center_y: f32) {
        self.target_y = center_y - self.height() / 2.0;
    }

    /// Shift the target by `dy`
    pub fn nudge_target(&mut self, dy: f32) {
        self.target_y += dy;
    }

    /// Pull the target toward a desired center; `blend` 1 replaces it outright
    pub fn blend_target(&mut self, center_y: f32, blend: f32) {
        let blend = blend.clamp(0.0, 1.0);
        let current = self.target_y;
        self.set_target(center_y);
        self.target_y = current * (1.0 - blend) + self.target_y * blend;
    }

    /// Move a fraction of the remaining distance toward the target, then clamp
    pub fn update(&mut self, dt: f32, smoothing: f32, field: &Field) {
        let dy = self.target_y - self.y;
        self.y += dy * crate::smoothing_factor(smoothing, dt);
        self.y = self.clamped(self.y, field);
    }

    /// Re-seat horizontally against the field edge
    pub fn place_x(&mut self, field: &Field) {
        self.x = match self.side {
            Side::Left => field.padding,
            Side::Right => field.width - field.padding - self.width(),
        };
    }

    fn clamped(&self, y: f32, field: &Field) -> f32 {
        let (lo, hi) = field.paddle_band(self.height());
        y.clamp(lo, hi)
    }

    /// Normal of the face turned toward the opponent
    pub fn face_normal(&self) -> Vec2 {
        Vec2::new(self.side.away(), 0.0)
    }

    pub fn geometry(&self) -> PaddleGeometry {
        match self.shape {
            PaddleShape::Rectangle { width, height } => {
                let top_left = Vec2::new(self.x, self.y);
                PaddleGeometry::Rect(Rect::new(top_left, Vec2::new(width, height)))
            }
            PaddleShape::HeadAndHandle {
                head_radius,
                handle_width,
                handle_length,
            } => {
                let head_center = Vec2::new(self.x + head_radius, self.y + head_radius);
                let handle_x = head_center.x - handle_width / 2.0;
                let handle = Rect::new(
                    Vec2::new(handle_x, self.y + head_radius * 2.0),
                    Vec2::new(handle_width, handle_length),
                );
                PaddleGeometry::Racket {
                    head_center,
                    head_radius,
                    handle,
                }
            }
        }
    }
}

/// The ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Scalar speed, kept equal to `vel.length()`
    pub speed: f32,
    pub radius: f32,
    /// Recent positions, oldest first
    pub trail: VecDeque<Vec2>,
    pub trail_capacity: usize,
}

impl Ball {
    pub fn new(radius: f32, trail_capacity: usize) -> Self {
        Self {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            speed: 0.0,
            radius,
            trail: VecDeque::with_capacity(trail_capacity),
            trail_capacity,
        }
    }

    /// Serve from center toward `toward` with a fresh base speed and a small angle
    pub fn reset<R: Rng>(&mut self, field: &Field, toward: Side, tuning: &Tuning, rng: &mut R) {
        self.pos = field.center();

        let lo = tuning.serve_speed_min.min(tuning.serve_speed_max);
        let hi = tuning.serve_speed_min.max(tuning.serve_speed_max);
        let speed = rng.random_range(lo..=hi);

        let spread = tuning.serve_angle_spread.abs();
        let angle = rng.random_range(-spread..=spread);

        let dir = match toward {
            Side::Right => 1.0,
            Side::Left => -1.0,
        };
        self.vel = Vec2::new(dir * speed * angle.cos(), speed * angle.sin());
        self.speed = speed;
        self.clear_trail();
    }

    /// Set velocity direction and keep `speed` consistent with it
    pub fn set_velocity(&mut self, dir: Vec2, speed: f32) {
        self.vel = dir.normalize_or_zero() * speed;
        self.speed = speed;
    }

    /// Record current position to trail (call each tick)
    pub fn record_trail(&mut self) {
        if self.trail_capacity == 0 {
            return;
        }
        self.trail.push_back(self.pos);
        while self.trail.len() > self.trail_capacity {
            self.trail.pop_front();
        }
    }

    /// Clear trail (on serve)
    pub fn clear_trail(&mut self) {
        self.trail.clear();
    }
}

/// Which part of a racket was struck
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RacketPart {
    Head,
    Handle,
}

/// Discrete things that happened during a tick, in order
///
/// Consumed afterward by the particle system, the audio cue table and the
/// score display.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Ball bounced off the top or bottom boundary
    WallBounce { pos: Vec2 },
    /// Ball struck a rectangle paddle; `offset` is in [-1, 1] from its center
    PaddleHit { side: Side, pos: Vec2, offset: f32 },
    /// Ball struck a racket; `normal` points from the racket toward the ball
    RacketHit {
        side: Side,
        part: RacketPart,
        pos: Vec2,
        normal: Vec2,
        /// Normalized vertical offset from the racket center, in [-1, 1]
        offset: f32,
    },
    /// Ball left the field; `scorer` gets the point
    Scored { scorer: Side, pos: Vec2 },
    /// Either score changed (point scored or restart)
    ScoreChanged { left: u32, right: u32 },
    /// Ball launched from center
    Served { toward: Side },
    /// A score reached the win threshold
    RoundOver { winner: Side },
    /// Scores were cleared for a new round
    Restarted,
    /// Pause flag flipped
    PauseChanged { paused: bool },
}

/// Complete game state
#[derive(Debug, Clone, Serialize)]
pub struct GameState {
    /// Run seed
    pub seed: u64,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub field: Field,
    pub tuning: Tuning,
    pub style: PaddleStyle,
    /// Scores, phase and pause flag
    pub round: MatchState,
    /// Player paddle
    pub left: Paddle,
    /// CPU paddle
    pub right: Paddle,
    pub ball: Ball,
    /// Visual particles (not gameplay-affecting)
    pub particles: ParticlePool,
    #[serde(skip)]
    pub cpu: CpuController,
    #[serde(skip)]
    pub rng: Pcg32,
    /// Events raised outside a tick, reported by the next one
    #[serde(skip)]
    pub pending: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game on the default field with default settings
    pub fn new(seed: u64) -> Self {
        Self::with_settings(seed, &Settings::default(), FIELD_WIDTH, FIELD_HEIGHT)
    }

    pub fn with_settings(seed: u64, settings: &Settings, width: f32, height: f32) -> Self {
        let tuning = settings.tuning.clone();
        let field = Field::new(width, height, tuning.padding);
        let min_height = tuning.paddle_min_height;
        let shape = Self::paddle_shape(settings.paddle_style, &tuning, height, min_height);

        let mut state = Self {
            seed,
            time_ticks: 0,
            field,
            left: Paddle::new(Side::Left, &field, shape),
            right: Paddle::new(Side::Right, &field, shape),
            ball: Ball::new(tuning.ball_radius, settings.trail_length()),
            particles: ParticlePool::new(settings.max_particles(), tuning.particle_gravity),
            round: MatchState::new(tuning.win_score),
            cpu: CpuController::new(tuning.cpu_max_step),
            style: settings.paddle_style,
            rng: Pcg32::seed_from_u64(seed),
            tuning,
            pending: Vec::new(),
        };

        // Opening serve goes to the right, toward the CPU
        let served = state.serve(Side::Right);
        state.pending.push(served);
        log::info!(
            "New match: {}x{} field, {:?} paddles, first to {}",
            width,
            height,
            state.style,
            state.round.win_score
        );
        state
    }

    fn paddle_shape(
        style: PaddleStyle,
        tuning: &Tuning,
        field_height: f32,
        min_height: f32,
    ) -> PaddleShape {
        match style {
            PaddleStyle::Rectangle => PaddleShape::Rectangle {
                width: tuning.paddle_width,
                height: tuning.paddle_height_for(field_height, min_height),
            },
            PaddleStyle::Racket => PaddleShape::HeadAndHandle {
                head_radius: tuning.racket_head_radius,
                handle_width: tuning.racket_handle_width,
                handle_length: tuning.racket_handle_length,
            },
        }
    }

    pub fn paddle(&self, side: Side) -> &Paddle {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    pub fn paddle_mut(&mut self, side: Side) -> &mut Paddle {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    /// Reset the ball at center heading toward `toward`
    pub fn serve(&mut self, toward: Side) -> GameEvent {
        self.ball.reset(&self.field, toward, &self.tuning, &mut self.rng);
        log::debug!("Serve toward {:?} at speed {:.2}", toward, self.ball.speed);
        GameEvent::Served { toward }
    }

    /// Refit paddles and ball to a new field size
    pub fn resize(&mut self, width: f32, height: f32) {
        self.field.width = width;
        self.field.height = height;

        let shape = Self::paddle_shape(self.style, &self.tuning, height, PADDLE_REFLOW_MIN_HEIGHT);
        for side in [Side::Left, Side::Right] {
            let field = self.field;
            let paddle = self.paddle_mut(side);
            paddle.shape = shape;
            paddle.place_x(&field);
            paddle.y = paddle.clamped(paddle.y, &field);
        }

        self.ball.pos = self.field.center();
    }
}
