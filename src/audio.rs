//! Audio cues
//!
//! The session fires cues and never waits on them. On the web they are
//! procedurally generated with the Web Audio API - no external files needed!

use serde::{Deserialize, Serialize};

/// Sound cue types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundCue {
    /// Session started
    Start,
    /// Target hit
    Hit,
    /// Background click, or a target expired
    Miss,
    /// One of the last five seconds ticked over
    Tick,
    /// Session finished
    GameOver,
}

/// Fire-and-forget audio collaborator
pub trait AudioSink {
    fn play(&mut self, cue: SoundCue);
}

/// Plays nothing (native builds, tests, muted sessions)
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentAudio;

impl AudioSink for SilentAudio {
    fn play(&mut self, _cue: SoundCue) {}
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::{AudioSink, SoundCue};

    /// Web Audio implementation
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        /// Shared output gain, created with the context
        master: Option<GainNode>,
        master_volume: f32,
        muted: bool,
    }

    impl Default for AudioManager {
        fn default() -> Self {
            Self::new()
        }
    }

    impl AudioManager {
        pub fn new() -> Self {
            Self {
                ctx: None,
                master: None,
                master_volume: 0.3,
                muted: false,
            }
        }

        /// Create the context lazily: browsers only allow it after a user gesture
        fn ensure_context(&mut self) -> Option<(AudioContext, GainNode)> {
            if self.ctx.is_none() {
                let Ok(ctx) = AudioContext::new() else {
                    log::warn!("Failed to create AudioContext - audio disabled");
                    return None;
                };
                let master = ctx.create_gain().ok()?;
                master.connect_with_audio_node(&ctx.destination()).ok()?;
                self.ctx = Some(ctx);
                self.master = Some(master);
            }

            let ctx = self.ctx.clone()?;
            let master = self.master.clone()?;
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }
            master.gain().set_value(self.master_volume);
            Some((ctx, master))
        }

        /// Flip mute and return the new state
        pub fn toggle_muted(&mut self) -> bool {
            self.muted = !self.muted;
            self.muted
        }

        pub fn is_muted(&self) -> bool {
            self.muted
        }

        /// Create an oscillator routed through a fresh gain envelope
        fn create_osc(
            ctx: &AudioContext,
            master: &GainNode,
            freq: f32,
            osc_type: OscillatorType,
        ) -> Option<(OscillatorNode, GainNode)> {
            let osc = ctx.create_oscillator().ok()?;
            let gain = ctx.create_gain().ok()?;

            osc.set_type(osc_type);
            osc.frequency().set_value(freq);
            osc.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(master).ok()?;

            Some((osc, gain))
        }

        /// Hit - bright rising "coin"
        fn play_hit(ctx: &AudioContext, master: &GainNode) {
            let Some((osc, gain)) = Self::create_osc(ctx, master, 1200.0, OscillatorType::Sine)
            else {
                return;
            };
            let t = ctx.current_time();

            osc.frequency().set_value_at_time(1200.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(1800.0, t + 0.1)
                .ok();
            gain.gain().set_value_at_time(0.5, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.1)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.1).ok();
        }

        /// Miss - low dull thud
        fn play_miss(ctx: &AudioContext, master: &GainNode) {
            let Some((osc, gain)) =
                Self::create_osc(ctx, master, 150.0, OscillatorType::Triangle)
            else {
                return;
            };
            let t = ctx.current_time();

            osc.frequency().set_value_at_time(150.0, t).ok();
            osc.frequency()
                .linear_ramp_to_value_at_time(100.0, t + 0.15)
                .ok();
            gain.gain().set_value_at_time(0.5, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.15)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.15).ok();
        }

        /// Countdown - short wooden click
        fn play_tick(ctx: &AudioContext, master: &GainNode) {
            let Some((osc, gain)) = Self::create_osc(ctx, master, 800.0, OscillatorType::Square)
            else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(0.1, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.001, t + 0.05)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.05).ok();
        }

        /// Start - rising power-up
        fn play_start(ctx: &AudioContext, master: &GainNode) {
            let Some((osc, gain)) = Self::create_osc(ctx, master, 440.0, OscillatorType::Sine)
            else {
                return;
            };
            let t = ctx.current_time();

            osc.frequency().set_value_at_time(440.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(880.0, t + 0.3)
                .ok();
            gain.gain().set_value_at_time(0.0, t).ok();
            gain.gain().linear_ramp_to_value_at_time(0.5, t + 0.1).ok();
            gain.gain().linear_ramp_to_value_at_time(0.0, t + 0.3).ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.3).ok();
        }

        /// Game over - falling tone
        fn play_game_over(ctx: &AudioContext, master: &GainNode) {
            let Some((osc, gain)) =
                Self::create_osc(ctx, master, 600.0, OscillatorType::Triangle)
            else {
                return;
            };
            let t = ctx.current_time();

            osc.frequency().set_value_at_time(600.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(200.0, t + 0.5)
                .ok();
            gain.gain().set_value_at_time(0.5, t).ok();
            gain.gain().linear_ramp_to_value_at_time(0.0, t + 0.5).ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.5).ok();
        }
    }

    impl AudioSink for AudioManager {
        fn play(&mut self, cue: SoundCue) {
            if self.muted || self.master_volume <= 0.0 {
                return;
            }
            let Some((ctx, master)) = self.ensure_context() else {
                return;
            };

            match cue {
                SoundCue::Start => Self::play_start(&ctx, &master),
                SoundCue::Hit => Self::play_hit(&ctx, &master),
                SoundCue::Miss => Self::play_miss(&ctx, &master),
                SoundCue::Tick => Self::play_tick(&ctx, &master),
                SoundCue::GameOver => Self::play_game_over(&ctx, &master),
            }
        }
    }
}
