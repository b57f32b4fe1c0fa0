//! JavaScript binding
//!
//! The page owns the renderer, input and requestAnimationFrame loop; it calls
//! into [`WebGame`] and draws the JSON snapshot it gets back.

use wasm_bindgen::prelude::*;

use crate::audio::WebAudio;
use crate::game::Game;
use crate::sim::GameEvent;
use crate::storage::LocalStore;
use crate::tuning::Tuning;

const STORAGE_PREFIX: &str = "sky_runner:";

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }
    log::info!("Sky Runner starting...");
}

fn js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

#[wasm_bindgen]
pub struct WebGame {
    game: Game,
    /// Events from the last frame, as JSON
    last_events: String,
}

#[wasm_bindgen]
impl WebGame {
    /// Create a game; `tuning_json` may be empty for the defaults
    #[wasm_bindgen(constructor)]
    pub fn new(tuning_json: &str) -> Result<WebGame, JsValue> {
        let tuning = if tuning_json.trim().is_empty() {
            Tuning::default()
        } else {
            Tuning::from_json(tuning_json).map_err(js_error)?
        };
        // Seeded from the clock; runs are reproducible only within one page load
        let seed = js_sys::Date::now() as u64;
        let game = Game::new(
            seed,
            tuning,
            Box::new(LocalStore::new(STORAGE_PREFIX)),
            Box::new(WebAudio::new()),
        )
        .map_err(js_error)?;

        Ok(WebGame {
            game,
            last_events: "[]".to_string(),
        })
    }

    /// Start from the title screen or after game over. Call from a user gesture
    /// so the browser lets audio start.
    pub fn start(&mut self) -> Result<(), JsValue> {
        self.game.start().map_err(js_error)
    }

    pub fn restart(&mut self) -> Result<(), JsValue> {
        self.game.restart().map_err(js_error)
    }

    pub fn flap(&mut self) {
        self.game.flap();
    }

    pub fn steer(&mut self, left: bool, right: bool) {
        self.game.steer(left, right);
    }

    /// Advance one frame and return the snapshot as JSON
    pub fn frame(&mut self, delta_seconds: f32) -> Result<String, JsValue> {
        let report = self.game.frame(delta_seconds);
        self.last_events = events_json(&report.events).map_err(js_error)?;
        self.game.snapshot().to_json().map_err(js_error)
    }

    /// Events emitted by the last `frame` call, as a JSON array
    #[wasm_bindgen(getter)]
    pub fn events(&self) -> String {
        self.last_events.clone()
    }

    // Scores go out as f64; JavaScript numbers cannot hold every u64

    #[wasm_bindgen(getter)]
    pub fn score(&self) -> f64 {
        self.game.score() as f64
    }

    #[wasm_bindgen(getter, js_name = highScore)]
    pub fn high_score(&self) -> f64 {
        self.game.high_score().best as f64
    }

    #[wasm_bindgen(getter, js_name = isRunning)]
    pub fn is_running(&self) -> bool {
        self.game.state().session.is_running()
    }

    #[wasm_bindgen(js_name = setReducedMotion)]
    pub fn set_reduced_motion(&mut self, enabled: bool) {
        let mut settings = self.game.settings().clone();
        settings.reduced_motion = enabled;
        self.game.apply_settings(settings);
    }

    #[wasm_bindgen(js_name = setMuted)]
    pub fn set_muted(&mut self, muted: bool) {
        let mut settings = self.game.settings().clone();
        settings.muted = muted;
        self.game.apply_settings(settings);
    }
}

fn events_json(events: &[GameEvent]) -> crate::Result<String> {
    Ok(serde_json::to_string(events)?)
}
