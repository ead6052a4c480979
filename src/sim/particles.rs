//! Particle effects
//!
//! Fixed-capacity pool: once full, new particles overwrite slots
//! round-robin. Particles are purely visual.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::{GameEvent, RacketPart, Side};

/// A particle for visual effects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Remaining lifetime in frames
    pub life: f32,
    pub size: f32,
    /// RGBA
    pub color: [u8; 4],
}

/// Base color plus per-channel random jitter
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tint {
    pub base: [u8; 4],
    pub jitter: [u8; 3],
}

impl Tint {
    pub const fn solid(base: [u8; 4]) -> Self {
        Self {
            base,
            jitter: [0, 0, 0],
        }
    }

    fn sample<R: Rng>(&self, rng: &mut R) -> [u8; 4] {
        let mut out = self.base;
        for (channel, &jitter) in out.iter_mut().zip(self.jitter.iter()) {
            if jitter > 0 {
                *channel = channel.saturating_add(rng.random_range(0..=jitter));
            }
        }
        out
    }
}

pub const WALL_TINT: Tint = Tint::solid([150, 200, 255, 230]);
pub const PADDLE_TINT: Tint = Tint {
    base: [80, 200, 180, 242],
    jitter: [40, 55, 40],
};
pub const HEAD_TINT: Tint = Tint {
    base: [255, 180, 80, 242],
    jitter: [0, 40, 40],
};
pub const HANDLE_TINT: Tint = Tint {
    base: [170, 140, 255, 230],
    jitter: [40, 30, 0],
};
pub const SCORE_TINT: Tint = Tint::solid([255, 110, 130, 242]);

/// Spawn recipe for one burst
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Burst {
    pub count: usize,
    /// Uniform velocity spread per axis (±)
    pub spread: Vec2,
    /// Velocity added to every particle
    pub bias: Vec2,
    /// Extra speed along `bias` direction, sampled in [0, 1) × this
    pub kick: f32,
    pub life: (f32, f32),
    pub size: (f32, f32),
    pub tint: Tint,
}

impl Burst {
    /// Plain outward burst
    pub fn outward(count: usize, tint: Tint) -> Self {
        Self {
            count,
            spread: Vec2::new(4.0, 2.0),
            bias: Vec2::ZERO,
            kick: 0.0,
            life: (40.0, 70.0),
            size: (1.0, 3.0),
            tint,
        }
    }

    /// Recipe for a collision or scoring event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<(Vec2, Self)> {
        match *event {
            GameEvent::WallBounce { pos } => Some((pos, Self::outward(8, WALL_TINT))),
            GameEvent::PaddleHit { pos, offset, .. } => Some((
                pos,
                Self {
                    count: 12,
                    spread: Vec2::new(2.0, 2.0),
                    bias: Vec2::new(0.0, offset * 4.0),
                    life: (60.0, 90.0),
                    ..Self::outward(12, PADDLE_TINT)
                },
            )),
            GameEvent::RacketHit {
                part, pos, normal, ..
            } => {
                let tint = match part {
                    RacketPart::Head => HEAD_TINT,
                    RacketPart::Handle => HANDLE_TINT,
                };
                Some((
                    pos,
                    Self {
                        spread: Vec2::new(1.0, 1.0),
                        bias: normal,
                        kick: 2.0,
                        ..Self::outward(10, tint)
                    },
                ))
            }
            GameEvent::Scored { pos, scorer } => {
                // Spray back into the field from the goal line
                let inward = match scorer {
                    Side::Left => Vec2::new(-1.0, 0.0),
                    Side::Right => Vec2::new(1.0, 0.0),
                };
                Some((
                    pos,
                    Self {
                        spread: Vec2::new(3.0, 3.0),
                        bias: inward * 2.0,
                        kick: 3.0,
                        life: (50.0, 80.0),
                        size: (1.5, 3.5),
                        ..Self::outward(16, SCORE_TINT)
                    },
                ))
            }
            _ => None,
        }
    }
}

/// Bounded particle collection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticlePool {
    particles: Vec<Particle>,
    capacity: usize,
    /// Next slot to overwrite once full
    cursor: usize,
    gravity: f32,
}

impl ParticlePool {
    pub fn new(capacity: usize, gravity: f32) -> Self {
        Self {
            particles: Vec::with_capacity(capacity),
            capacity,
            cursor: 0,
            gravity,
        }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    /// Insert a particle, recycling a live slot when the pool is full
    pub fn push(&mut self, particle: Particle) {
        if self.capacity == 0 {
            return;
        }
        if self.particles.len() < self.capacity {
            self.particles.push(particle);
        } else {
            let slot = self.cursor % self.capacity;
            self.particles[slot] = particle;
            self.cursor = (slot + 1) % self.capacity;
        }
    }

    /// Create `count` particles at `pos` with randomized outward velocity
    pub fn spawn<R: Rng>(&mut self, rng: &mut R, pos: Vec2, tint: Tint, count: usize) {
        self.emit(rng, pos, &Burst::outward(count, tint));
    }

    pub fn emit<R: Rng>(&mut self, rng: &mut R, pos: Vec2, burst: &Burst) {
        let bias_dir = burst.bias.normalize_or_zero();
        for _ in 0..burst.count {
            let jitter = Vec2::new(
                rng.random_range(-1.0f32..=1.0) * burst.spread.x,
                rng.random_range(-1.0f32..=1.0) * burst.spread.y,
            );
            let kick = bias_dir * rng.random::<f32>() * burst.kick;
            let life = burst.life.0 + rng.random::<f32>() * (burst.life.1 - burst.life.0);
            let size = burst.size.0 + rng.random::<f32>() * (burst.size.1 - burst.size.0);
            self.push(Particle {
                pos,
                vel: jitter + burst.bias + kick,
                life,
                size,
                color: burst.tint.sample(rng),
            });
        }
    }

    /// Spawn the burst associated with `event`, if any
    pub fn react<R: Rng>(&mut self, rng: &mut R, event: &GameEvent) {
        if let Some((pos, burst)) = Burst::for_event(event) {
            self.emit(rng, pos, &burst);
        }
    }

    /// Age every particle by `dt` frames and drop the expired ones
    pub fn tick(&mut self, dt: f32) {
        for particle in self.particles.iter_mut() {
            particle.pos += particle.vel * dt;
            particle.vel.y += self.gravity * dt;
            particle.life -= dt;
        }
        let before = self.particles.len();
        self.particles.retain(|p| p.life > 0.0);
        if self.particles.len() != before {
            // Slots shifted; restart round-robin from the front
            self.cursor = 0;
        }
    }
}
