//! Browser bridge
//!
//! JS owns the canvas, the DOM listeners and the Web Audio context; it
//! forwards input here and calls `frame` from `requestAnimationFrame`.

use wasm_bindgen::prelude::*;

use super::{CueCollector, FrameReport};
use crate::driver::FrameDriver;
use crate::settings::Settings;

/// Game handle exported to JS
#[wasm_bindgen]
pub struct WebGame {
    driver: FrameDriver,
}

#[wasm_bindgen]
impl WebGame {
    /// Create a game for a `width`x`height` canvas; `settings_json` falls back to defaults
    #[wasm_bindgen(constructor)]
    pub fn new(width: f32, height: f32, settings_json: Option<String>) -> WebGame {
        console_error_panic_hook::set_once();
        // A second handle on the same page finds the logger already installed
        let _ = console_log::init_with_level(log::Level::Info);

        let settings = match settings_json.as_deref().map(Settings::from_json) {
            Some(Ok(settings)) => settings,
            Some(Err(err)) => {
                log::warn!("Invalid settings, using defaults: {}", err);
                Settings::default()
            }
            None => Settings::default(),
        };

        let seed = js_sys::Date::now() as u64;
        log::info!("Arcade Pong starting (seed {})", seed);

        WebGame {
            driver: FrameDriver::new(seed, &settings, width, height),
        }
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.driver.resize(width, height);
    }

    #[wasm_bindgen(js_name = setUp)]
    pub fn set_up(&mut self, held: bool) {
        self.driver.set_up(held);
    }

    #[wasm_bindgen(js_name = setDown)]
    pub fn set_down(&mut self, held: bool) {
        self.driver.set_down(held);
    }

    /// Pointer height in canvas CSS pixels
    #[wasm_bindgen(js_name = pointerMove)]
    pub fn pointer_move(&mut self, y: f32) {
        self.driver.pointer_moved(y);
    }

    #[wasm_bindgen(js_name = pointerLeave)]
    pub fn pointer_leave(&mut self) {
        self.driver.pointer_left();
    }

    pub fn click(&mut self, x: Option<f32>) {
        self.driver.click(x);
    }

    #[wasm_bindgen(js_name = togglePause)]
    pub fn toggle_pause(&mut self) {
        self.driver.toggle_pause();
    }

    /// Tab hidden or window blurred
    pub fn suspend(&mut self) {
        self.driver.suspend();
    }

    #[wasm_bindgen(js_name = setAutopilot)]
    pub fn set_autopilot(&mut self, on: bool) {
        self.driver.set_autopilot(on);
    }

    #[wasm_bindgen(js_name = setMuted)]
    pub fn set_muted(&mut self, muted: bool) {
        self.driver.mixer_mut().set_muted(muted);
    }

    /// Step one animation frame and return the frame report as JSON
    pub fn frame(&mut self, now_ms: f64) -> String {
        let mut collector = CueCollector::default();
        let events = self.driver.frame(now_ms, &mut collector);

        let report = FrameReport {
            state: self.driver.state(),
            events: &events,
            cues: &collector.cues,
            scores: collector.scores,
        };
        report.to_json().unwrap_or_else(|err| {
            log::error!("Failed to serialize frame: {}", err);
            String::from("null")
        })
    }
}
