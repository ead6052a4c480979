//! Frame driver
//!
//! Owns the game state, the frame clock and the input latch. The host
//! forwards raw input as it arrives and calls [`FrameDriver::frame`] once per
//! display refresh; the driver steps the simulation and hands the results to
//! a [`Presenter`].

use crate::audio::{Mixer, SoundCue};
use crate::clock::FrameClock;
use crate::settings::Settings;
use crate::sim::{Click, GameEvent, GameState, TickInput, tick};

/// Output side of the frame loop: drawing, sound and the score display
pub trait Presenter {
    /// Draw the current state; called every frame, paused or not
    fn render(&mut self, state: &GameState);

    /// Play a mixed sound cue
    fn play(&mut self, _cue: SoundCue) {}

    /// Scores changed
    fn show_scores(&mut self, _left: u32, _right: u32) {}
}

/// Presenter that discards everything (headless runs)
#[derive(Debug, Default, Clone, Copy)]
pub struct Headless;

impl Presenter for Headless {
    fn render(&mut self, _state: &GameState) {}
}

/// Game instance holding all state
pub struct FrameDriver {
    state: GameState,
    clock: FrameClock,
    input: TickInput,
    mixer: Mixer,
}

impl FrameDriver {
    pub fn new(seed: u64, settings: &Settings, width: f32, height: f32) -> Self {
        Self {
            state: GameState::with_settings(seed, settings, width, height),
            clock: FrameClock::new(settings.tuning.max_frame_ms),
            input: TickInput::default(),
            mixer: Mixer::from_settings(settings),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn mixer_mut(&mut self) -> &mut Mixer {
        &mut self.mixer
    }

    /// Up key pressed or released
    pub fn set_up(&mut self, held: bool) {
        self.input.up = held;
    }

    /// Down key pressed or released
    pub fn set_down(&mut self, held: bool) {
        self.input.down = held;
    }

    /// Pointer moved to height `y` in field coordinates
    pub fn pointer_moved(&mut self, y: f32) {
        self.input.pointer_y = Some(y);
    }

    /// Pointer left the playfield; keyboard control only
    pub fn pointer_left(&mut self) {
        self.input.pointer_y = None;
    }

    /// Request a pause toggle on the next frame
    pub fn toggle_pause(&mut self) {
        self.input.pause = true;
    }

    /// Pause if running (focus lost, tab hidden)
    pub fn suspend(&mut self) {
        if self.state.round.is_live() {
            self.input.pause = true;
        }
        self.clock.reset();
    }

    /// Serve on the next frame toward the half containing `x`
    pub fn click(&mut self, x: Option<f32>) {
        self.input.click = Some(Click { x });
    }

    pub fn set_autopilot(&mut self, on: bool) {
        self.input.autopilot = on;
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.state.resize(width, height);
        log::debug!("Resized field to {}x{}", width, height);
    }

    /// Run one display frame at host time `now_ms`
    pub fn frame(&mut self, now_ms: f64, presenter: &mut impl Presenter) -> Vec<GameEvent> {
        let dt = self.clock.advance(now_ms);
        self.step(dt, presenter)
    }

    /// Run one frame with an explicit step multiplier
    pub fn step(&mut self, dt: f32, presenter: &mut impl Presenter) -> Vec<GameEvent> {
        let events = tick(&mut self.state, &self.input, dt);

        // Clear one-shot inputs after processing
        self.input.pause = false;
        self.input.click = None;

        for cue in self.mixer.cues(&events) {
            presenter.play(cue);
        }
        if let Some(&GameEvent::ScoreChanged { left, right }) = events
            .iter()
            .rev()
            .find(|e| matches!(e, GameEvent::ScoreChanged { .. }))
        {
            presenter.show_scores(left, right);
        }
        presenter.render(&self.state);

        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::Side;
    use glam::Vec2;

    #[derive(Default)]
    struct Recorder {
        frames: usize,
        cues: Vec<SoundCue>,
        scores: Vec<(u32, u32)>,
    }

    impl Presenter for Recorder {
        fn render(&mut self, _state: &GameState) {
            self.frames += 1;
        }

        fn play(&mut self, cue: SoundCue) {
            self.cues.push(cue);
        }

        fn show_scores(&mut self, left: u32, right: u32) {
            self.scores.push((left, right));
        }
    }

    fn driver() -> FrameDriver {
        FrameDriver::new(77, &Settings::default(), FIELD_WIDTH, FIELD_HEIGHT)
    }

    fn served(events: &[GameEvent]) -> bool {
        events.iter().any(|e| matches!(e, GameEvent::Served { .. }))
    }

    fn bounced(ev: &[GameEvent]) -> bool {
        ev.iter().any(|e| matches!(e, GameEvent::WallBounce { .. }))
    }

    #[test]
    fn test_renders_every_frame_even_paused() {
        let mut driver = driver();
        let mut out = Recorder::default();
        driver.frame(0.0, &mut out);
        driver.toggle_pause();
        driver.frame(16.0, &mut out);
        driver.frame(32.0, &mut out);
        assert_eq!(out.frames, 3);
        assert!(driver.state().round.paused);
    }

    #[test]
    fn test_one_shot_inputs_clear() {
        let mut driver = driver();
        let mut out = Recorder::default();
        driver.toggle_pause();
        let events = driver.step(1.0, &mut out);
        assert_eq!(
            events,
            vec![
                GameEvent::Served {
                    toward: Side::Right
                },
                GameEvent::PauseChanged { paused: true },
            ]
        );
        // Not toggled back on the following frame
        assert!(driver.step(1.0, &mut out).is_empty());
        assert!(driver.state().round.paused);

        driver.click(Some(0.0));
        let events = driver.step(1.0, &mut out);
        assert!(events.contains(&GameEvent::Served { toward: Side::Left }));
        let events = driver.step(1.0, &mut out);
        assert!(!served(&events));
    }

    #[test]
    fn test_held_keys_persist() {
        let mut driver = driver();
        let mut out = Headless;
        let start = driver.state().left.target_y;
        driver.set_up(true);
        driver.step(1.0, &mut out);
        driver.step(1.0, &mut out);
        let moved = driver.state().left.target_y - start;
        assert!((moved + 2.0 * KEYBOARD_SPEED).abs() < 1e-3);

        driver.set_up(false);
        driver.step(1.0, &mut out);
        let moved = driver.state().left.target_y - start;
        assert!((moved + 2.0 * KEYBOARD_SPEED).abs() < 1e-3);
    }

    #[test]
    fn test_score_reaches_presenter() {
        let mut driver = driver();
        let mut out = Recorder::default();
        driver.step(1.0, &mut out);

        driver.state.ball.pos = Vec2::new(FIELD_WIDTH + EXIT_MARGIN + 10.0, 200.0);
        driver.state.ball.vel = Vec2::new(6.0, 0.0);
        driver.step(1.0, &mut out);

        assert_eq!(out.scores, vec![(1, 0)]);
        let cues = &out.cues;
        assert!(cues.iter().any(|c| c.frequency == 420.0));
    }

    #[test]
    fn test_muted_mixer_plays_nothing() {
        let mut driver = driver();
        driver.mixer_mut().set_muted(true);
        let mut out = Recorder::default();
        driver.state.ball.pos = Vec2::new(400.0, PADDING + BALL_RADIUS + 1.0);
        driver.state.ball.vel = Vec2::new(1.0, -4.0);
        let events = driver.step(1.0, &mut out);
        assert!(bounced(&events));
        assert!(out.cues.is_empty());
    }

    #[test]
    fn test_suspend_pauses_live_game() {
        let mut driver = driver();
        driver.suspend();
        driver.step(1.0, &mut Headless);
        assert!(driver.state().round.paused);

        // Already paused: suspending again keeps it paused
        driver.suspend();
        driver.step(1.0, &mut Headless);
        assert!(driver.state().round.paused);
    }
}
