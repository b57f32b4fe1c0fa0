//! Frame driver
//!
//! [`Game`] wraps the simulation with everything a host needs per frame:
//! session start/restart gated on audio, the frame-delta skip rule, the
//! error boundary around each tick, sound cues, tilt, the follow camera and
//! high-score persistence.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use glam::Vec3;

use crate::audio::{AudioBackend, SoundEffect};
use crate::camera::FollowCamera;
use crate::error::{Result, RunnerError};
use crate::highscores::HighScore;
use crate::settings::Settings;
use crate::sim::{FatalCause, GameEvent, GameState, SessionPhase, TickOutcome, tick};
use crate::snapshot::WorldSnapshot;
use crate::storage::KeyValueStore;
use crate::tilt::{TiltAnimator, animator_for};
use crate::tuning::Tuning;

/// What happened during one call to [`Game::frame`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameReport {
    /// Gameplay ran this frame
    pub simulated: bool,
    pub outcome: TickOutcome,
    /// Events drained this frame, in emission order
    pub events: Vec<GameEvent>,
}

/// A playable game: simulation plus its collaborators
pub struct Game {
    state: GameState,
    audio: Box<dyn AudioBackend>,
    tilt: Box<dyn TiltAnimator>,
    camera: FollowCamera,
    high_score: HighScore,
    settings: Settings,
    store: Box<dyn KeyValueStore>,
}

impl Game {
    /// Build a game, reading settings and the high score from `store`
    pub fn new(
        seed: u64,
        tuning: Tuning,
        store: Box<dyn KeyValueStore>,
        audio: Box<dyn AudioBackend>,
    ) -> Result<Self> {
        tuning.validate()?;

        let settings = Settings::load(store.as_ref());
        let high_score = HighScore::load(store.as_ref());
        let state = GameState::new(seed, tuning, high_score.best);
        let camera = FollowCamera::new(state.player.pos);

        log::info!(
            "Game created (seed {}, high score {}, {} runs so far)",
            seed,
            high_score.best,
            high_score.runs
        );

        Ok(Self {
            state,
            audio,
            tilt: animator_for(&settings),
            camera,
            high_score,
            settings,
            store,
        })
    }

    // === Session ===

    /// Start a run from `Ready` or `Over`
    ///
    /// Tries to bring audio up first. If that fails the run still starts when
    /// `silent_start` is set; otherwise the error is returned and nothing changes.
    pub fn start(&mut self) -> Result<()> {
        if self.state.session.is_running() {
            return Err(RunnerError::InvalidTransition {
                from: SessionPhase::Running,
                to: SessionPhase::Running,
            });
        }
        self.ensure_audio()?;
        self.state.start_run()?;
        self.tilt.reset();
        self.camera.snap(self.state.player.pos);
        Ok(())
    }

    /// Start a new run after game over
    pub fn restart(&mut self) -> Result<()> {
        let phase = self.state.phase();
        if phase != SessionPhase::Over {
            return Err(RunnerError::InvalidTransition {
                from: phase,
                to: SessionPhase::Running,
            });
        }
        self.start()
    }

    fn ensure_audio(&mut self) -> Result<()> {
        if self.audio.is_ready() {
            return Ok(());
        }
        match self.audio.init() {
            Ok(()) => {
                self.audio.set_volume(self.settings.effective_volume());
                Ok(())
            }
            Err(e) if self.settings.silent_start => {
                log::warn!("Audio unavailable, starting without sound: {}", e);
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    // === Input ===

    pub fn flap(&mut self) {
        if self.state.flap() {
            self.tilt.on_flap();
        }
    }

    /// Held steering keys, in world axes (left is -x)
    pub fn steer(&mut self, left: bool, right: bool) {
        self.state.steer(left, right);
    }

    // === Frame ===

    /// Run one host frame of `delta` seconds
    ///
    /// Never fails: anything that goes wrong inside the tick ends the run.
    pub fn frame(&mut self, delta: f32) -> FrameReport {
        let mut report = FrameReport::default();

        match self.gameplay_delta(delta) {
            Some(dt) => {
                report.simulated = self.state.session.is_running();
                report.outcome = self.guarded_tick(dt);
                self.tilt
                    .update(dt, self.state.player.vel, self.state.session.is_running());
            }
            None => {
                log::debug!("Skipping gameplay for frame delta {}", delta);
                if self.state.session.is_running() && delta.is_finite() && delta > 0.0 {
                    self.state.clock.advance(delta);
                }
            }
        }

        let camera_dt = if delta.is_finite() { delta.max(0.0) } else { 0.0 };
        self.camera.follow(self.state.player.pos, camera_dt);

        report.events = self.state.drain_events();
        self.dispatch(&report.events);
        report
    }

    /// `None` if this frame's gameplay update must be skipped
    fn gameplay_delta(&self, delta: f32) -> Option<f32> {
        (delta.is_finite() && delta >= 0.0 && delta <= self.state.tuning.max_frame_delta)
            .then_some(delta)
    }

    /// Run the tick, ending the run with [`FatalCause::Fault`] on error or panic
    ///
    /// Panics are only caught on targets that unwind. `wasm32-unknown-unknown`
    /// aborts on panic, so there only the `Result` path forces `Over`, and the
    /// tick reports bad state as an error rather than panicking.
    fn guarded_tick(&mut self, dt: f32) -> TickOutcome {
        let result = panic::catch_unwind(AssertUnwindSafe(|| tick(&mut self.state, dt)));
        let failure = match result {
            Ok(Ok(outcome)) => return outcome,
            Ok(Err(e)) => e.to_string(),
            Err(payload) => panic_message(payload.as_ref()),
        };
        log::error!("Tick failed, ending run: {}", failure);
        self.state.end_run(FatalCause::Fault);
        TickOutcome::Fatal(FatalCause::Fault)
    }

    fn dispatch(&mut self, events: &[GameEvent]) {
        for event in events {
            if let GameEvent::GameOver { final_score, .. } = event {
                self.record_run(*final_score);
            }
            if !self.audio.is_ready() {
                continue;
            }
            let Some(effect) = SoundEffect::for_event(event) else {
                continue;
            };
            if let Err(e) = self.audio.play(effect) {
                log::warn!("Failed to play {:?}: {}", effect, e);
            }
        }
    }

    fn record_run(&mut self, score: u64) {
        if self.high_score.submit(score) {
            log::info!("New high score: {}", score);
        }
        if let Err(e) = self.high_score.save(self.store.as_mut()) {
            log::warn!("Failed to save high score: {}", e);
        }
    }

    // === Settings ===

    /// Replace the settings, apply them and persist them
    pub fn apply_settings(&mut self, settings: Settings) {
        if settings.reduced_motion != self.settings.reduced_motion {
            self.tilt = animator_for(&settings);
        }
        self.audio.set_volume(settings.effective_volume());
        self.settings = settings;
        if let Err(e) = self.settings.save(self.store.as_mut()) {
            log::warn!("Failed to save settings: {}", e);
        }
    }

    // === Accessors ===

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> SessionPhase {
        self.state.phase()
    }

    pub fn score(&self) -> u64 {
        self.state.score()
    }

    pub fn high_score(&self) -> &HighScore {
        &self.high_score
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn camera(&self) -> &FollowCamera {
        &self.camera
    }

    pub fn tilt(&self) -> Vec3 {
        self.tilt.rotation()
    }

    pub fn is_audio_ready(&self) -> bool {
        self.audio.is_ready()
    }

    pub fn store(&self) -> &dyn KeyValueStore {
        self.store.as_ref()
    }

    pub fn snapshot(&self) -> WorldSnapshot {
        WorldSnapshot::capture(&self.state, self.tilt.rotation(), &self.camera)
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "panic".to_string()
    }
}
