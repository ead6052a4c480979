//! Deterministic simulation module
//!
//! All gameplay logic lives here:
//! - Time enters only as the normalized `dt` multiplier
//! - Seeded RNG only
//! - No rendering, audio or platform dependencies

pub mod ai;
pub mod collision;
pub mod particles;
pub mod physics;
pub mod round;
pub mod state;
pub mod tick;

pub use ai::CpuController;
pub use collision::{
    CollisionResult, Rect, ball_circle_collision, ball_rect_collision, reflect_velocity,
};
pub use particles::{Burst, Particle, ParticlePool};
pub use physics::step_ball;
pub use round::{GamePhase, MatchState, scoring_side};
pub use state::{
    Ball, Field, GameEvent, GameState, Paddle, PaddleGeometry, PaddleShape, RacketPart, Side,
};
pub use tick::{Click, TickInput, tick};
