//! Platform layer
//!
//! The browser host owns the canvas, the DOM events and the audio context.
//! This side hands it one JSON frame report per animation frame: the state
//! snapshot to draw, the frame's events and the mixed sound cues to play.

#[cfg(target_arch = "wasm32")]
mod web;
#[cfg(target_arch = "wasm32")]
pub use web::WebGame;

use serde::Serialize;

use crate::audio::SoundCue;
use crate::driver::Presenter;
use crate::sim::{GameEvent, GameState};

/// Presenter that buffers sound cues and score changes for the host
#[derive(Debug, Default)]
pub struct CueCollector {
    pub cues: Vec<SoundCue>,
    pub scores: Option<(u32, u32)>,
}

impl Presenter for CueCollector {
    // The host draws from the serialized snapshot
    fn render(&mut self, _state: &GameState) {}

    fn play(&mut self, cue: SoundCue) {
        self.cues.push(cue);
    }

    fn show_scores(&mut self, left: u32, right: u32) {
        self.scores = Some((left, right));
    }
}

/// Everything the host needs for one frame
#[derive(Debug, Serialize)]
pub struct FrameReport<'a> {
    pub state: &'a GameState,
    pub events: &'a [GameEvent],
    pub cues: &'a [SoundCue],
    /// Present only when the score display needs updating
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scores: Option<(u32, u32)>,
}

impl FrameReport<'_> {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
