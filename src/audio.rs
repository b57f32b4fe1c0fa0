//! Audio cues
//!
//! Sounds are procedurally generated; no external files needed. The game only
//! talks to [`AudioBackend`], so headless runs and tests use [`NullAudio`].

use crate::error::Result;
use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Player flapped
    Flap,
    /// Obstacle pair cleared
    Score,
    /// Run ended on the ground or an obstacle
    Collision,
    /// Collectible picked up
    Collect,
    /// Run ended with a new high score
    HighScore,
}

impl SoundEffect {
    /// Cue for a simulation event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::Flapped => Some(Self::Flap),
            GameEvent::Scored { .. } => Some(Self::Score),
            GameEvent::Collected { .. } => Some(Self::Collect),
            GameEvent::GameOver {
                new_high_score: true,
                ..
            } => Some(Self::HighScore),
            GameEvent::GameOver { .. } => Some(Self::Collision),
        }
    }
}

/// Something that can play sound cues
///
/// `init` may be called more than once; it must be cheap once ready.
pub trait AudioBackend {
    fn is_ready(&self) -> bool;
    fn init(&mut self) -> Result<()>;
    fn play(&mut self, effect: SoundEffect) -> Result<()>;
    /// Volume in 0.0 - 1.0; 0 silences every cue
    fn set_volume(&mut self, volume: f32);
}

/// Backend that plays nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NullAudio {
    ready: bool,
}

impl NullAudio {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AudioBackend for NullAudio {
    fn is_ready(&self) -> bool {
        self.ready
    }

    fn init(&mut self) -> Result<()> {
        self.ready = true;
        Ok(())
    }

    fn play(&mut self, _effect: SoundEffect) -> Result<()> {
        Ok(())
    }

    fn set_volume(&mut self, _volume: f32) {}
}

#[cfg(target_arch = "wasm32")]
pub use web_audio::WebAudio;

#[cfg(target_arch = "wasm32")]
mod web_audio {
    use web_sys::{AudioContext, AudioContextState, GainNode, OscillatorNode, OscillatorType};

    use super::{AudioBackend, SoundEffect};
    use crate::error::{Result, RunnerError};

    /// Web Audio API backend
    pub struct WebAudio {
        ctx: Option<AudioContext>,
        volume: f32,
    }

    impl Default for WebAudio {
        fn default() -> Self {
            Self::new()
        }
    }

    impl WebAudio {
        pub fn new() -> Self {
            Self {
                ctx: None,
                volume: 0.8,
            }
        }

        fn context(&self) -> Result<&AudioContext> {
            self.ctx
                .as_ref()
                .ok_or_else(|| RunnerError::AudioUnavailable("not initialized".into()))
        }

        /// Create an oscillator with gain envelope
        fn create_osc(
            ctx: &AudioContext,
            freq: f32,
            osc_type: OscillatorType,
        ) -> Option<(OscillatorNode, GainNode)> {
            let osc = ctx.create_oscillator().ok()?;
            let gain = ctx.create_gain().ok()?;

            osc.set_type(osc_type);
            osc.frequency().set_value(freq);
            osc.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(&ctx.destination()).ok()?;

            Some((osc, gain))
        }

        /// Flap - short upward chirp
        fn play_flap(ctx: &AudioContext, vol: f32) {
            let Some((osc, gain)) = Self::create_osc(ctx, 300.0, OscillatorType::Triangle) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol * 0.3, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.12)
                .ok();
            osc.frequency().set_value_at_time(300.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(700.0, t + 0.1)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.15).ok();
        }

        /// Score - two-note blip
        fn play_score(ctx: &AudioContext, vol: f32) {
            for (i, freq) in [660.0, 880.0].iter().enumerate() {
                let delay = i as f64 * 0.06;
                if let Some((osc, gain)) = Self::create_osc(ctx, *freq, OscillatorType::Sine) {
                    let t = ctx.current_time() + delay;
                    gain.gain().set_value_at_time(vol * 0.25, t).ok();
                    gain.gain()
                        .exponential_ramp_to_value_at_time(0.01, t + 0.12)
                        .ok();
                    osc.start_with_when(t).ok();
                    osc.stop_with_when(t + 0.15).ok();
                }
            }
        }

        /// Collect - bright ding
        fn play_collect(ctx: &AudioContext, vol: f32) {
            for (i, freq) in [900.0, 1200.0, 1500.0].iter().enumerate() {
                let delay = i as f64 * 0.04;
                if let Some((osc, gain)) = Self::create_osc(ctx, *freq, OscillatorType::Sine) {
                    let t = ctx.current_time() + delay;
                    gain.gain().set_value_at_time(vol * 0.2, t).ok();
                    gain.gain()
                        .exponential_ramp_to_value_at_time(0.01, t + 0.2)
                        .ok();
                    osc.start_with_when(t).ok();
                    osc.stop_with_when(t + 0.25).ok();
                }
            }
        }

        /// Collision - low crunch with a crack on top
        fn play_collision(ctx: &AudioContext, vol: f32) {
            let t = ctx.current_time();

            if let Some((osc, gain)) = Self::create_osc(ctx, 120.0, OscillatorType::Sawtooth) {
                gain.gain().set_value_at_time(vol * 0.5, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.4)
                    .ok();
                osc.frequency().set_value_at_time(120.0, t).ok();
                osc.frequency()
                    .exponential_ramp_to_value_at_time(30.0, t + 0.4)
                    .ok();
                osc.start().ok();
                osc.stop_with_when(t + 0.5).ok();
            }

            if let Some((osc, gain)) = Self::create_osc(ctx, 1500.0, OscillatorType::Square) {
                gain.gain().set_value_at_time(vol * 0.2, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.1)
                    .ok();
                osc.frequency().set_value_at_time(1500.0, t).ok();
                osc.frequency().set_value_at_time(300.0, t + 0.03).ok();
                osc.frequency().set_value_at_time(1200.0, t + 0.05).ok();
                osc.start().ok();
                osc.stop_with_when(t + 0.15).ok();
            }
        }

        /// High score - celebratory run
        fn play_high_score(ctx: &AudioContext, vol: f32) {
            for (i, freq) in [500.0, 600.0, 700.0, 800.0, 1000.0].iter().enumerate() {
                let delay = i as f64 * 0.08;
                if let Some((osc, gain)) = Self::create_osc(ctx, *freq, OscillatorType::Triangle) {
                    let t = ctx.current_time() + delay;
                    gain.gain().set_value_at_time(vol * 0.25, t).ok();
                    gain.gain()
                        .exponential_ramp_to_value_at_time(0.01, t + 0.25)
                        .ok();
                    osc.start_with_when(t).ok();
                    osc.stop_with_when(t + 0.3).ok();
                }
            }
        }
    }

    impl AudioBackend for WebAudio {
        fn is_ready(&self) -> bool {
            self.ctx
                .as_ref()
                .is_some_and(|ctx| ctx.state() != AudioContextState::Closed)
        }

        fn init(&mut self) -> Result<()> {
            if self.ctx.is_none() {
                // Fails outside a secure context
                let ctx = AudioContext::new()
                    .map_err(|e| RunnerError::AudioUnavailable(format!("{e:?}")))?;
                self.ctx = Some(ctx);
                log::info!("AudioContext created");
            }
            // Browsers keep the context suspended until a user gesture
            let ctx = self.context()?;
            if ctx.state() == AudioContextState::Suspended {
                let _ = ctx.resume();
            }
            Ok(())
        }

        fn play(&mut self, effect: SoundEffect) -> Result<()> {
            let vol = self.volume;
            if vol <= 0.0 {
                return Ok(());
            }
            let ctx = self.context()?;

            match effect {
                SoundEffect::Flap => Self::play_flap(ctx, vol),
                SoundEffect::Score => Self::play_score(ctx, vol),
                SoundEffect::Collect => Self::play_collect(ctx, vol),
                SoundEffect::Collision => Self::play_collision(ctx, vol),
                SoundEffect::HighScore => Self::play_high_score(ctx, vol),
            }
            Ok(())
        }

        fn set_volume(&mut self, volume: f32) {
            self.volume = volume.clamp(0.0, 1.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::FatalCause;

    #[test]
    fn test_event_cues() {
        assert_eq!(SoundEffect::for_event(&GameEvent::Flapped), Some(SoundEffect::Flap));
        assert_eq!(
            SoundEffect::for_event(&GameEvent::Scored { points: 1 }),
            Some(SoundEffect::Score)
        );
        assert_eq!(
            SoundEffect::for_event(&GameEvent::Collected { points: 5 }),
            Some(SoundEffect::Collect)
        );
        let over = |new_high_score| GameEvent::GameOver {
            final_score: 3,
            new_high_score,
            cause: FatalCause::Ground,
        };
        assert_eq!(SoundEffect::for_event(&over(false)), Some(SoundEffect::Collision));
        assert_eq!(SoundEffect::for_event(&over(true)), Some(SoundEffect::HighScore));
    }

    #[test]
    fn test_null_audio_handshake() {
        let mut audio = NullAudio::new();
        assert!(!audio.is_ready());
        audio.init().unwrap();
        assert!(audio.is_ready());
        assert!(audio.play(SoundEffect::Flap).is_ok());
    }
}
