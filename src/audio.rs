//! Sound cues
//!
//! Procedurally synthesized beeps: each event maps to an oscillator
//! frequency, duration, waveform and gain. The host plays them; nothing
//! here touches an audio device.

use serde::{Deserialize, Serialize};

use crate::settings::Settings;
use crate::sim::state::{GameEvent, RacketPart, Side};

/// Oscillator shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Waveform {
    Sine,
    Square,
    Triangle,
}

/// A single synthesized beep
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SoundCue {
    /// Hz
    pub frequency: f32,
    /// Seconds
    pub duration: f32,
    pub waveform: Waveform,
    /// Peak gain before mixing
    pub volume: f32,
}

impl SoundCue {
    pub const fn new(frequency: f32, duration: f32, waveform: Waveform, volume: f32) -> Self {
        Self {
            frequency,
            duration,
            waveform,
            volume,
        }
    }
}

pub const WALL_CUE: SoundCue = SoundCue::new(420.0, 0.045, Waveform::Sine, 0.02);
pub const CPU_SCORES_CUE: SoundCue = SoundCue::new(120.0, 0.18, Waveform::Sine, 0.08);
pub const PLAYER_SCORES_CUE: SoundCue = SoundCue::new(420.0, 0.18, Waveform::Sine, 0.08);

const HIT_DURATION: f32 = 0.06;
const HIT_VOLUME: f32 = 0.06;

/// Off-center hits sound lower
fn hit_frequency(offset: f32) -> f32 {
    880.0 - offset.abs().min(1.0) * 280.0
}

/// Cue for an event, if it makes a sound
pub fn cue_for(event: &GameEvent) -> Option<SoundCue> {
    match *event {
        GameEvent::WallBounce { .. } => Some(WALL_CUE),
        GameEvent::PaddleHit { offset, .. } => Some(SoundCue::new(
            hit_frequency(offset),
            HIT_DURATION,
            Waveform::Square,
            HIT_VOLUME,
        )),
        GameEvent::RacketHit { part, offset, .. } => {
            let waveform = match part {
                RacketPart::Head => Waveform::Triangle,
                RacketPart::Handle => Waveform::Square,
            };
            let frequency = hit_frequency(offset);
            Some(SoundCue::new(frequency, HIT_DURATION, waveform, HIT_VOLUME))
        }
        GameEvent::Scored { scorer, .. } => Some(match scorer {
            Side::Right => CPU_SCORES_CUE,
            Side::Left => PLAYER_SCORES_CUE,
        }),
        _ => None,
    }
}

/// Volume mixer applied to every cue
#[derive(Debug, Clone, PartialEq)]
pub struct Mixer {
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl Default for Mixer {
    fn default() -> Self {
        Self::new()
    }
}

impl Mixer {
    pub fn new() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        let mut mixer = Self::new();
        mixer.set_master_volume(settings.master_volume);
        mixer.set_sfx_volume(settings.sfx_volume);
        mixer.set_muted(settings.muted);
        mixer
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Scale a cue by the mixer; silent cues are dropped
    pub fn apply(&self, cue: SoundCue) -> Option<SoundCue> {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return None;
        }
        Some(SoundCue {
            volume: cue.volume * vol,
            ..cue
        })
    }

    /// Mixed cues for a batch of events, in event order
    pub fn cues(&self, events: &[GameEvent]) -> Vec<SoundCue> {
        events
            .iter()
            .filter_map(cue_for)
            .filter_map(|cue| self.apply(cue))
            .collect()
    }
}
