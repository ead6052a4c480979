//! Ball integration and collision response
//!
//! Order per step: integrate, walls, paddles (first hit wins), trail.
//! Side effects come back as `GameEvent`s; nothing here touches particles
//! or audio.

use glam::Vec2;

use super::collision::{
    CollisionResult, ball_circle_collision, ball_rect_collision, circle_overlaps_rect,
    reflect_velocity,
};
use super::state::{Ball, Field, GameEvent, Paddle, PaddleGeometry, RacketPart};
use crate::settings::Tuning;

/// Advance the ball by `dt` frames against the walls and the given paddles
///
/// Paddles are tested in slice order and only the first contact is resolved.
pub fn step_ball(
    ball: &mut Ball,
    dt: f32,
    paddles: &[&Paddle],
    field: &Field,
    tuning: &Tuning,
) -> Vec<GameEvent> {
    let mut events = Vec::new();

    ball.pos += ball.vel * dt;

    if let Some(event) = bounce_walls(ball, field) {
        events.push(event);
    }

    for paddle in paddles {
        if let Some(event) = hit_paddle(ball, paddle, tuning) {
            events.push(event);
            break;
        }
    }

    ball.record_trail();
    events
}

/// Reflect off the top/bottom boundary, clamping the ball inside
fn bounce_walls(ball: &mut Ball, field: &Field) -> Option<GameEvent> {
    let top = field.padding + ball.radius;
    let bottom = field.height - field.padding - ball.radius;

    if ball.pos.y <= top {
        ball.pos.y = top;
    } else if ball.pos.y >= bottom {
        ball.pos.y = bottom;
    } else {
        return None;
    }

    ball.vel.y = -ball.vel.y;
    Some(GameEvent::WallBounce { pos: ball.pos })
}

fn hit_paddle(ball: &mut Ball, paddle: &Paddle, tuning: &Tuning) -> Option<GameEvent> {
    match paddle.geometry() {
        PaddleGeometry::Rect(rect) => {
            if !circle_overlaps_rect(ball.pos, ball.radius, &rect) {
                return None;
            }

            let half = paddle.height() / 2.0;
            let offset = ((ball.pos.y - paddle.center().y) / half).clamp(-1.0, 1.0);
            let angle = offset * tuning.max_bounce_angle;
            let dir = paddle.side.away();

            let speed = (ball.speed * tuning.paddle_speedup).min(tuning.max_speed);
            ball.set_velocity(Vec2::new(dir * angle.cos(), angle.sin()), speed);

            // Park the ball just off the face so the next step cannot re-trigger
            ball.pos.x = if dir > 0.0 {
                rect.max.x + ball.radius + tuning.paddle_nudge
            } else {
                rect.min.x - ball.radius - tuning.paddle_nudge
            };

            log::debug!(
                "{:?} paddle hit, offset {:.2}, speed {:.2}",
                paddle.side,
                offset,
                speed
            );
            Some(GameEvent::PaddleHit {
                side: paddle.side,
                pos: ball.pos,
                offset,
            })
        }
        PaddleGeometry::Racket {
            head_center,
            head_radius,
            handle,
        } => {
            let fallback = paddle.face_normal();

            let head =
                ball_circle_collision(ball.pos, ball.radius, head_center, head_radius, fallback);
            let hit = deflect(ball, paddle, &head, RacketPart::Head, tuning);
            if hit.is_some() {
                return hit;
            }

            let grip = ball_rect_collision(ball.pos, ball.radius, &handle, fallback);
            deflect(ball, paddle, &grip, RacketPart::Handle, tuning)
        }
    }
}

/// Mirror the velocity about the contact normal and push the ball clear
fn deflect(
    ball: &mut Ball,
    paddle: &Paddle,
    contact: &CollisionResult,
    part: RacketPart,
    tuning: &Tuning,
) -> Option<GameEvent> {
    // Overlap while already separating is left alone
    if !contact.hit || ball.vel.dot(contact.normal) >= 0.0 {
        return None;
    }

    let speedup = match part {
        RacketPart::Head => tuning.head_speedup,
        RacketPart::Handle => tuning.handle_speedup,
    };

    let reflected = reflect_velocity(ball.vel, contact.normal);
    let speed = (ball.speed * speedup).min(tuning.max_speed);
    ball.set_velocity(reflected, speed);
    ball.pos += contact.normal * contact.penetration;

    let offset = ((ball.pos.y - paddle.center().y) / (paddle.height() / 2.0)).clamp(-1.0, 1.0);
    log::debug!(
        "{:?} racket {:?} hit, speed {:.2}",
        paddle.side,
        part,
        speed
    );
    Some(GameEvent::RacketHit {
        side: paddle.side,
        part,
        pos: contact.point,
        normal: contact.normal,
        offset,
    })
}
