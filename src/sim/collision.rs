//! Collision detection and response for paddle geometry
//!
//! Ball vs axis-aligned rectangle and ball vs circle, both producing a
//! contact normal suitable for `v' = v - 2(v·n)n` reflection.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::NORMAL_EPSILON;

/// Axis-aligned rectangle (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            min: pos,
            max: pos + size,
        }
    }

    pub fn closest_point(&self, p: Vec2) -> Vec2 {
        p.clamp(self.min, self.max)
    }
}

/// Result of a collision check
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether a collision occurred
    pub hit: bool,
    /// Contact point on the shape surface
    pub point: Vec2,
    /// Surface normal at contact (pointing toward ball center)
    pub normal: Vec2,
    /// Overlap depth along the normal
    pub penetration: f32,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            point: Vec2::ZERO,
            normal: Vec2::ZERO,
            penetration: 0.0,
        }
    }
}

/// Circle vs rectangle overlap test (closest-point distance ≤ radius)
#[inline]
pub fn circle_overlaps_rect(center: Vec2, radius: f32, rect: &Rect) -> bool {
    center.distance_squared(rect.closest_point(center)) <= radius * radius
}

/// Check collision between a ball and a rectangle
///
/// When the ball center lies inside the rectangle the closest point
/// coincides with it; `fallback_normal` is used in that case.
pub fn ball_rect_collision(
    ball_pos: Vec2,
    ball_radius: f32,
    rect: &Rect,
    fallback_normal: Vec2,
) -> CollisionResult {
    let closest = rect.closest_point(ball_pos);
    let delta = ball_pos - closest;
    let dist_sq = delta.length_squared();

    if dist_sq > ball_radius * ball_radius {
        return CollisionResult::miss();
    }

    let dist = dist_sq.sqrt();
    let normal = if dist > NORMAL_EPSILON {
        delta / dist
    } else {
        fallback_normal
    };

    CollisionResult {
        hit: true,
        point: closest,
        normal,
        penetration: ball_radius - dist,
    }
}

/// Check collision between a ball and a solid circle
pub fn ball_circle_collision(
    ball_pos: Vec2,
    ball_radius: f32,
    circle_center: Vec2,
    circle_radius: f32,
    fallback_normal: Vec2,
) -> CollisionResult {
    let delta = ball_pos - circle_center;
    let reach = ball_radius + circle_radius;
    let dist_sq = delta.length_squared();

    if dist_sq > reach * reach {
        return CollisionResult::miss();
    }

    // Coincident centers have no direction; the epsilon keeps the division finite
    let dist = dist_sq.sqrt();
    let normal = if dist > NORMAL_EPSILON {
        delta / dist
    } else {
        fallback_normal
    };

    CollisionResult {
        hit: true,
        point: circle_center + normal * circle_radius,
        normal,
        penetration: reach - dist,
    }
}

/// Reflect velocity off a surface
///
/// Standard reflection: v' = v - 2(v·n)n
#[inline]
pub fn reflect_velocity(velocity: Vec2, normal: Vec2) -> Vec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}
