//! Per-frame simulation step
//!
//! Advances the match by one normalized frame and reports what happened.

use glam::Vec2;
use rand::Rng;

use super::physics::step_ball;
use super::round::scoring_side;
use super::state::{GameEvent, GameState, Side};

/// Serve/restart request from a click or tap
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Click {
    /// Horizontal field position of the click; `None` serves in a random direction
    pub x: Option<f32>,
}

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Up key held
    pub up: bool,
    /// Down key held
    pub down: bool,
    /// Latest pointer height in field coordinates
    pub pointer_y: Option<f32>,
    /// Pause toggle
    pub pause: bool,
    /// Serve (restarting first if the round is over)
    pub click: Option<Click>,
    /// Attract mode: the CPU controller also drives the player paddle
    pub autopilot: bool,
}

/// Advance the game state by one step of `dt` normalized frames
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) -> Vec<GameEvent> {
    let mut events = std::mem::take(&mut state.pending);

    if input.pause {
        events.extend(state.round.toggle_pause());
    }

    if let Some(click) = input.click {
        if !state.round.running() {
            events.extend(state.round.restart());
        }
        events.extend(state.round.resume());
        let toward = match click.x {
            Some(x) if x > state.field.width / 2.0 => Side::Right,
            Some(_) => Side::Left,
            None if state.rng.random::<bool>() => Side::Right,
            None => Side::Left,
        };
        events.push(state.serve(toward));
    }

    if !state.round.is_live() {
        return events;
    }

    state.round.begin_rally();
    state.time_ticks += 1;

    // Player paddle
    if input.autopilot {
        state.cpu.update(&mut state.left, &state.ball, dt);
    } else {
        let step = state.tuning.keyboard_speed * dt;
        if input.up {
            state.left.nudge_target(-step);
        }
        if input.down {
            state.left.nudge_target(step);
        }
        if let Some(pointer_y) = input.pointer_y {
            state.left.blend_target(pointer_y, state.tuning.pointer_blend);
        }
    }

    // CPU paddle
    state.cpu.update(&mut state.right, &state.ball, dt);

    let smoothing = state.tuning.paddle_smoothing;
    state.left.update(dt, smoothing, &state.field);
    state.right.update(dt, smoothing, &state.field);

    events.extend(step_ball(
        &mut state.ball,
        dt,
        &[&state.left, &state.right],
        &state.field,
        &state.tuning,
    ));

    // Collision sparks age along with everything else this tick
    for event in &events {
        state.particles.react(&mut state.rng, event);
    }
    state.particles.tick(dt);

    let margin = state.tuning.exit_margin;
    if let Some(scorer) = scoring_side(state.ball.pos.x, &state.field, margin) {
        let exit = Vec2::new(
            state.ball.pos.x.clamp(0.0, state.field.width),
            state.ball.pos.y.clamp(0.0, state.field.height),
        );
        let scored = GameEvent::Scored { scorer, pos: exit };
        state.particles.react(&mut state.rng, &scored);
        events.push(scored);
        events.extend(state.round.award_point(scorer));
        // The next ball heads toward whoever just scored
        events.push(state.serve(scorer));
    }

    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::settings::{PaddleStyle, Settings};
    use crate::sim::round::GamePhase;
    use crate::sim::state::PaddleShape;
    use proptest::prelude::*;

    const DT: f32 = 1.0;

    fn served(events: &[GameEvent]) -> bool {
        events.iter().any(|e| matches!(e, GameEvent::Served { .. }))
    }

    fn bounced(ev: &[GameEvent]) -> bool {
        ev.iter().any(|e| matches!(e, GameEvent::WallBounce { .. }))
    }

    fn pause() -> TickInput {
        TickInput {
            pause: true,
            ..Default::default()
        }
    }

    fn click(x: Option<f32>) -> TickInput {
        TickInput {
            click: Some(Click { x }),
            ..Default::default()
        }
    }

    /// Put the ball just past the left exit so the next tick scores for the CPU
    fn push_ball_out_left(state: &mut GameState) {
        state.ball.pos = Vec2::new(-EXIT_MARGIN - 5.0, state.field.height / 2.0);
        state.ball.vel = Vec2::new(-6.0, 0.0);
        state.ball.speed = 6.0;
    }

    #[test]
    fn test_tick_serve_to_rallying() {
        let mut state = GameState::new(12345);
        assert_eq!(state.round.phase, GamePhase::Serving);

        let start = state.ball.pos;
        tick(&mut state, &TickInput::default(), DT);
        assert_eq!(state.round.phase, GamePhase::Rallying);
        assert_eq!(state.time_ticks, 1);
        assert_ne!(state.ball.pos, start);
        assert_eq!(state.ball.trail.len(), 1);
    }

    #[test]
    fn test_tick_pause() {
        let mut state = GameState::new(12345);
        tick(&mut state, &TickInput::default(), DT);

        let events = tick(&mut state, &pause(), DT);
        assert_eq!(events, vec![GameEvent::PauseChanged { paused: true }]);
        let frozen = state.ball.pos;
        for _ in 0..5 {
            tick(&mut state, &TickInput::default(), DT);
        }
        assert_eq!(state.ball.pos, frozen);
        assert_eq!(state.time_ticks, 1);

        // Unpause
        tick(&mut state, &pause(), DT);
        assert!(state.round.is_live());
        assert_ne!(state.ball.pos, frozen);
    }

    #[test]
    fn test_keyboard_moves_target() {
        let mut state = GameState::new(3);
        let before = state.left.target_y;
        let input = TickInput {
            down: true,
            ..Default::default()
        };
        tick(&mut state, &input, 2.0);
        let moved = state.left.target_y - before;
        assert!((moved - KEYBOARD_SPEED * 2.0).abs() < 1e-3);
        assert!(state.left.y > before);
    }

    #[test]
    fn test_pointer_blends_target() {
        let mut state = GameState::new(3);
        let before = state.left.target_y;
        let input = TickInput {
            pointer_y: Some(100.0),
            ..Default::default()
        };
        tick(&mut state, &input, DT);
        let desired = 100.0 - state.left.height() / 2.0;
        let expected = before * (1.0 - POINTER_BLEND) + desired * POINTER_BLEND;
        assert!((state.left.target_y - expected).abs() < 1e-3);
    }

    #[test]
    fn test_paddles_stay_in_band() {
        let mut state = GameState::new(11);
        let input = TickInput {
            up: true,
            pointer_y: Some(-5_000.0),
            ..Default::default()
        };
        for _ in 0..200 {
            tick(&mut state, &input, DT);
            for paddle in [&state.left, &state.right] {
                let (lo, hi) = state.field.paddle_band(paddle.height());
                assert!(paddle.y >= lo && paddle.y <= hi);
            }
        }
        assert_eq!(state.left.y, state.field.padding);
    }

    #[test]
    fn test_exit_left_scores_for_cpu_and_serves_right() {
        let mut state = GameState::new(5);
        tick(&mut state, &TickInput::default(), DT);
        push_ball_out_left(&mut state);

        let events = tick(&mut state, &TickInput::default(), DT);
        assert_eq!((state.round.left, state.round.right), (0, 1));
        let changed = GameEvent::ScoreChanged { left: 0, right: 1 };
        assert!(events.contains(&changed));
        let served_right = GameEvent::Served {
            toward: Side::Right,
        };
        assert!(events.contains(&served_right));
        assert!(events.iter().any(|e| matches!(
            e,
            GameEvent::Scored {
                scorer: Side::Right,
                pos
            } if pos.x == 0.0
        )));
        assert_eq!(state.ball.pos, state.field.center());
        assert!(state.ball.vel.x > 0.0);
        assert_eq!(state.round.phase, GamePhase::Rallying);
    }

    #[test]
    fn test_round_over_then_click_restarts() {
        let mut state = GameState::new(8);
        for _ in 0..WIN_SCORE {
            push_ball_out_left(&mut state);
            tick(&mut state, &TickInput::default(), DT);
        }
        assert_eq!(
            state.round.phase,
            GamePhase::RoundOver {
                winner: Side::Right
            }
        );
        assert!(state.round.paused);

        // Frozen and pause toggles ignored
        let frozen = state.ball.pos;
        assert!(tick(&mut state, &pause(), DT).is_empty());
        assert_eq!(state.ball.pos, frozen);

        let events = tick(&mut state, &click(Some(10.0)), DT);
        assert_eq!(events[0], GameEvent::Restarted);
        let cleared = GameEvent::ScoreChanged { left: 0, right: 0 };
        assert!(events.contains(&cleared));
        assert!(events.contains(&GameEvent::Served { toward: Side::Left }));
        assert_eq!((state.round.left, state.round.right), (0, 0));
        assert!(state.round.is_live());
        assert!(state.ball.vel.x < 0.0);
    }

    #[test]
    fn test_click_resumes_and_serves_toward_click_side() {
        let mut state = GameState::new(21);
        tick(&mut state, &pause(), DT);
        assert!(!state.round.is_live());

        let width = state.field.width;
        let events = tick(&mut state, &click(Some(width - 1.0)), DT);
        assert!(events.contains(&GameEvent::PauseChanged { paused: false }));
        assert!(state.round.is_live());
        assert!(state.ball.vel.x > 0.0);
    }

    #[test]
    fn test_wall_bounce_spawns_particles() {
        let mut state = GameState::new(4);
        state.ball.pos = Vec2::new(400.0, state.field.padding + BALL_RADIUS + 1.0);
        state.ball.vel = Vec2::new(1.0, -5.0);
        state.ball.speed = state.ball.vel.length();

        let events = tick(&mut state, &TickInput::default(), DT);
        assert!(bounced(&events));
        assert_eq!(state.particles.len(), 8);
    }

    #[test]
    fn test_autopilot_tracks_ball() {
        let mut state = GameState::new(9);
        state.ball.pos.y = 100.0;
        state.ball.vel = Vec2::new(-0.5, 0.0);
        state.ball.speed = 0.5;
        let start = state.left.y;
        let input = TickInput {
            autopilot: true,
            ..Default::default()
        };
        tick(&mut state, &input, DT);
        assert!((state.left.target_y - (start - CPU_MAX_STEP)).abs() < 1e-3);
    }

    #[test]
    fn test_opening_serve_is_reported_once() {
        let mut state = GameState::new(31);
        let events = tick(&mut state, &TickInput::default(), DT);
        let opening = GameEvent::Served {
            toward: Side::Right,
        };
        assert_eq!(events.first(), Some(&opening));

        let events = tick(&mut state, &TickInput::default(), DT);
        assert!(!served(&events));
    }

    #[test]
    fn test_collision_sparks_age_on_spawn_tick() {
        let mut state = GameState::new(4);
        tick(&mut state, &TickInput::default(), DT);
        state.ball.pos = Vec2::new(400.0, state.field.padding + BALL_RADIUS + 1.0);
        state.ball.vel = Vec2::new(1.0, -5.0);
        state.ball.speed = state.ball.vel.length();

        tick(&mut state, &TickInput::default(), DT);
        assert_eq!(state.particles.len(), 8);
        // Wall sparks start with life below 70 and have already lost one frame
        assert!(state.particles.iter().all(|p| p.life < 69.0));
    }

    #[test]
    fn test_score_burst_spawns_at_exit() {
        let mut state = GameState::new(5);
        tick(&mut state, &TickInput::default(), DT);
        push_ball_out_left(&mut state);

        tick(&mut state, &TickInput::default(), DT);
        let exit = Vec2::new(0.0, state.field.height / 2.0);
        assert_eq!(state.particles.len(), 16);
        assert!(state.particles.iter().all(|p| p.pos == exit));
        assert!(state.particles.iter().all(|p| p.life >= 50.0));
    }

    #[test]
    fn test_racket_game_reflows_on_resize() {
        let settings = Settings {
            paddle_style: PaddleStyle::Racket,
            ..Settings::default()
        };
        let mut state = GameState::with_settings(2, &settings, FIELD_WIDTH, FIELD_HEIGHT);
        tick(&mut state, &TickInput::default(), DT);
        state.right.y = 400.0;

        state.resize(400.0, 300.0);

        let racket_height = RACKET_HEAD_RADIUS * 2.0 + RACKET_HANDLE_LENGTH;
        for paddle in [&state.left, &state.right] {
            assert!(matches!(paddle.shape, PaddleShape::HeadAndHandle { .. }));
            assert_eq!(paddle.height(), racket_height);
        }
        assert_eq!(state.right.x, 400.0 - PADDING - RACKET_HEAD_RADIUS * 2.0);
        assert_eq!(state.right.y, 300.0 - PADDING - racket_height);

        tick(&mut state, &TickInput::default(), DT);
        let (lo, hi) = state.field.paddle_band(racket_height);
        assert!(state.right.y >= lo && state.right.y <= hi);
    }

    #[test]
    fn test_determinism() {
        let mut state1 = GameState::new(99999);
        let mut state2 = GameState::new(99999);

        let inputs = [
            TickInput {
                pointer_y: Some(120.0),
                ..Default::default()
            },
            click(None),
            TickInput {
                down: true,
                ..Default::default()
            },
            TickInput::default(),
        ];

        for _ in 0..50 {
            for input in &inputs {
                let a = tick(&mut state1, input, DT);
                let b = tick(&mut state2, input, DT);
                assert_eq!(a, b);
            }
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.ball.pos, state2.ball.pos);
        assert_eq!(state1.left.y, state2.left.y);
    }

    proptest! {
        #[test]
        fn paddles_stay_in_band_under_any_input(
            seed in any::<u64>(),
            racket in any::<bool>(),
            up in any::<bool>(),
            down in any::<bool>(),
            pointer_y in proptest::option::of(-500.0f32..1500.0),
            dt in 0.0f32..2.4,
        ) {
            let paddle_style = if racket {
                PaddleStyle::Racket
            } else {
                PaddleStyle::Rectangle
            };
            let settings = Settings {
                paddle_style,
                ..Settings::default()
            };
            let mut state = GameState::with_settings(seed, &settings, FIELD_WIDTH, FIELD_HEIGHT);
            let input = TickInput {
                up,
                down,
                pointer_y,
                ..Default::default()
            };
            for _ in 0..120 {
                tick(&mut state, &input, dt);
                for paddle in [&state.left, &state.right] {
                    let (lo, hi) = state.field.paddle_band(paddle.height());
                    prop_assert!(paddle.y >= lo && paddle.y <= hi);
                }
            }
        }
    }
}
