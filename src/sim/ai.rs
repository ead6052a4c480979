//! CPU paddle controller
//!
//! Rate-limited tracking, not prediction: the target follows the ball's
//! current height by at most `max_step` per frame. The step cap is the only
//! difficulty lever.

use super::state::{Ball, Paddle};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CpuController {
    /// Largest target move per normalized frame
    pub max_step: f32,
}

impl Default for CpuController {
    fn default() -> Self {
        Self::new(crate::consts::CPU_MAX_STEP)
    }
}

impl CpuController {
    pub fn new(max_step: f32) -> Self {
        Self { max_step }
    }

    /// Set the paddle's target a bounded step from its position toward the ball
    pub fn update(&self, paddle: &mut Paddle, ball: &Ball, dt: f32) {
        let center = paddle.center().y;
        paddle.set_target(crate::approach(center, ball.pos.y, self.max_step * dt));
    }
}
