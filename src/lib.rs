//! Aim Trainer - a timed reflex game played in the browser
//!
//! Core modules:
//! - `sim`: Session state machine (targets, scoring, pause, statistics)
//! - `renderer`: Draw lists and the Canvas 2D backend
//! - `audio`: Sound cues and the Web Audio player
//! - `coach`: Post-session coaching tips
//! - `settings` / `highscores`: LocalStorage-backed configuration and records

pub mod audio;
pub mod coach;
pub mod error;
pub mod highscores;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use audio::{AudioSink, SilentAudio, SoundCue};
pub use error::{CoachError, SessionError, SettingsError};
pub use highscores::HighScores;
pub use settings::{Difficulty, Settings};
pub use sim::{PointerOutcome, Session, SessionPhase, SessionSummary, TickOutcome, Viewport};

/// Game configuration constants
pub mod consts {
    /// Extra gap between a target's full radius and the surface edge (px)
    pub const SPAWN_PADDING: f32 = 20.0;
    /// Fraction of the remaining radius a target grows per tick
    pub const GROWTH_RATE: f32 = 0.1;
    /// Life fraction after which targets start fading out
    pub const FADE_START: f32 = 0.8;

    /// Points for an instant hit; one point lost per millisecond of reaction
    pub const MAX_HIT_POINTS: f64 = 1000.0;
    /// Floor for a slow hit
    pub const MIN_HIT_POINTS: u64 = 10;
    /// Deducted per background click (score never drops below zero)
    pub const MISS_PENALTY: u64 = 50;

    /// Countdown cue plays for each of the last N seconds
    pub const COUNTDOWN_SECS: u32 = 5;

    /// Particles per hit/miss burst
    pub const BURST_PARTICLES: usize = 8;
    /// Particle life lost per tick
    pub const PARTICLE_DECAY: f32 = 0.05;
    pub const MAX_PARTICLES: usize = 256;
}
