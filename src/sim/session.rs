//! Session controller
//!
//! Owns all per-session state and drives it through
//! Menu → Playing ⇄ Paused → Finished. The host calls [`Session::tick`] once
//! per animation frame and [`Session::pointer_down`] for every press; both
//! take the current host timestamp so the controller never reads a clock.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::clock::GameClock;
use super::effects::{spawn_burst, update_particles};
use super::field::TargetField;
use super::resolver::{PointerOutcome, resolve_pointer};
use super::state::{BurstKind, Particle, SessionPhase, Target, Viewport};
use super::stats::{RunningStats, SessionSummary};
use crate::audio::{AudioSink, SoundCue};
use crate::consts::COUNTDOWN_SECS;
use crate::error::SessionError;
use crate::settings::Settings;

/// Live values for the heads-up display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HudUpdate {
    pub score: u64,
    /// Whole seconds remaining, rounded up
    pub time_left: u32,
}

/// Receives HUD updates every Playing tick and the summary once per session
pub trait SessionListener {
    fn on_hud(&mut self, hud: HudUpdate);
    fn on_session_end(&mut self, summary: &SessionSummary);
}

/// Listener that ignores everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NullListener;

impl SessionListener for NullListener {
    fn on_hud(&mut self, _hud: HudUpdate) {}
    fn on_session_end(&mut self, _summary: &SessionSummary) {}
}

/// What a tick did
#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    /// Not playing; nothing changed
    Idle,
    /// No usable surface this frame; nothing changed
    Skipped,
    Running,
    /// The session just ended on this tick
    Finished(SessionSummary),
}

pub struct Session<A: AudioSink, L: SessionListener> {
    settings: Settings,
    phase: SessionPhase,
    clock: GameClock,
    field: TargetField,
    stats: RunningStats,
    particles: Vec<Particle>,
    rng: Pcg32,
    /// Last countdown second a cue was played for
    last_countdown: u32,
    last_summary: Option<SessionSummary>,
    audio: A,
    listener: L,
}

impl<A: AudioSink, L: SessionListener> Session<A, L> {
    /// New controller in the Menu phase
    pub fn new(settings: Settings, seed: u64, audio: A, listener: L) -> Self {
        Self {
            last_countdown: settings.duration,
            settings,
            phase: SessionPhase::Menu,
            clock: GameClock::default(),
            field: TargetField::new(),
            stats: RunningStats::new(),
            particles: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            last_summary: None,
            audio,
            listener,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn stats(&self) -> &RunningStats {
        &self.stats
    }

    pub fn score(&self) -> u64 {
        self.stats.score
    }

    pub fn targets(&self) -> &[Target] {
        self.field.targets()
    }

    /// Targets spawned in the current (or last) session
    pub fn total_targets(&self) -> u32 {
        self.field.total_spawned()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Summary of the most recently finished session
    pub fn last_summary(&self) -> Option<&SessionSummary> {
        self.last_summary.as_ref()
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn audio_mut(&mut self) -> &mut A {
        &mut self.audio
    }

    pub fn listener(&self) -> &L {
        &self.listener
    }

    /// Game time into the session (ms), frozen while paused
    pub fn elapsed(&self, now: f64) -> f64 {
        match self.phase {
            SessionPhase::Playing | SessionPhase::Paused => self.clock.elapsed(now),
            SessionPhase::Finished => self.settings.duration_ms(),
            SessionPhase::Menu => 0.0,
        }
    }

    /// Remaining game time (ms), never negative
    pub fn time_left(&self, now: f64) -> f64 {
        (self.settings.duration_ms() - self.elapsed(now)).max(0.0)
    }

    /// Replace the settings. Only allowed between sessions.
    pub fn configure(&mut self, settings: Settings) -> Result<(), SessionError> {
        if self.phase.is_active() {
            return Err(self.reject("change settings"));
        }
        settings.validate()?;
        self.settings = settings;
        Ok(())
    }

    /// Menu → Playing
    pub fn start(&mut self, now: f64) -> Result<(), SessionError> {
        self.begin(now, "start")
    }

    /// Finished → Playing, same as a fresh start
    pub fn restart(&mut self, now: f64) -> Result<(), SessionError> {
        self.begin(now, "restart")
    }

    fn begin(&mut self, now: f64, request: &'static str) -> Result<(), SessionError> {
        if self.phase.is_active() {
            return Err(self.reject(request));
        }
        self.settings.validate()?;

        self.clock.reset(now);
        self.field.clear();
        self.stats.reset();
        self.particles.clear();
        self.last_countdown = self.settings.duration;
        self.last_summary = None;
        self.phase = SessionPhase::Playing;

        self.audio.play(SoundCue::Start);
        log::info!(
            "Session started: {}s, {}, radius {}px, spawn every {}ms",
            self.settings.duration,
            self.settings.difficulty.as_str(),
            self.settings.target_size,
            self.settings.spawn_rate
        );
        Ok(())
    }

    /// Playing → Paused
    pub fn pause(&mut self, now: f64) -> Result<(), SessionError> {
        if self.phase != SessionPhase::Playing {
            return Err(self.reject("pause"));
        }
        self.clock.pause(now);
        self.phase = SessionPhase::Paused;
        log::info!("Session paused at {:.1}s", self.clock.elapsed(now) / 1000.0);
        Ok(())
    }

    /// Paused → Playing. Every game timestamp moves forward by the pause
    /// length, so neither session time nor target ages advance while paused.
    pub fn resume(&mut self, now: f64) -> Result<(), SessionError> {
        if self.phase != SessionPhase::Paused {
            return Err(self.reject("resume"));
        }
        let shift = self.clock.resume(now);
        self.field.shift_time(shift);
        self.phase = SessionPhase::Playing;
        log::info!("Session resumed after {:.0}ms pause", shift);
        Ok(())
    }

    /// Playing/Paused/Finished → Menu. An abandoned session emits no summary.
    pub fn quit(&mut self) -> Result<(), SessionError> {
        if self.phase == SessionPhase::Menu {
            return Err(self.reject("quit"));
        }
        if self.phase.is_active() {
            log::info!("Session abandoned with score {}", self.stats.score);
        }
        self.clock = GameClock::default();
        self.field.clear();
        self.stats.reset();
        self.particles.clear();
        self.phase = SessionPhase::Menu;
        Ok(())
    }

    /// Advance one frame. Per-tick order: clock → end check → HUD → spawn →
    /// age/expire → particles.
    pub fn tick(&mut self, now: f64, viewport: Option<Viewport>) -> TickOutcome {
        if self.phase != SessionPhase::Playing {
            return TickOutcome::Idle;
        }
        let Some(viewport) = viewport.filter(Viewport::is_drawable) else {
            log::debug!("No drawable surface, skipping frame");
            return TickOutcome::Skipped;
        };

        let time_left = self.time_left(now);
        let seconds_left = whole_seconds_left(time_left);
        if seconds_left <= COUNTDOWN_SECS
            && seconds_left > 0
            && seconds_left != self.last_countdown
        {
            self.audio.play(SoundCue::Tick);
            self.last_countdown = seconds_left;
        }

        if time_left <= 0.0 {
            return TickOutcome::Finished(self.finish());
        }

        self.listener.on_hud(HudUpdate {
            score: self.stats.score,
            time_left: seconds_left,
        });

        if self
            .field
            .spawn_due(now, self.settings.spawn_rate as f64)
        {
            self.field.spawn(
                &mut self.rng,
                now,
                viewport,
                self.settings.target_size,
                self.settings.target_lifetime_ms(),
            );
        }

        let expired = self.field.tick(now);
        if expired > 0 {
            self.stats.record_expired(expired);
            self.audio.play(SoundCue::Miss);
        }

        update_particles(&mut self.particles);
        TickOutcome::Running
    }

    /// Resolve a pointer-down at surface-relative `point`
    pub fn pointer_down(&mut self, now: f64, point: Vec2) -> PointerOutcome {
        if self.phase != SessionPhase::Playing {
            return PointerOutcome::Ignored;
        }

        let elapsed = self.clock.elapsed(now);
        let outcome = resolve_pointer(&mut self.field, &mut self.stats, now, elapsed, point);
        match outcome {
            PointerOutcome::Hit { at, .. } => {
                spawn_burst(&mut self.particles, &mut self.rng, at, BurstKind::Hit);
                self.audio.play(SoundCue::Hit);
            }
            PointerOutcome::Miss => {
                spawn_burst(&mut self.particles, &mut self.rng, point, BurstKind::Miss);
                self.audio.play(SoundCue::Miss);
            }
            PointerOutcome::Ignored => {}
        }
        outcome
    }

    /// Playing → Finished. Targets still on screen count as expired.
    fn finish(&mut self) -> SessionSummary {
        let leftover = self.field.expire_all();
        self.stats.record_expired(leftover);
        self.particles.clear();
        self.phase = SessionPhase::Finished;

        let summary = self.stats.summarize(self.field.total_spawned());
        self.audio.play(SoundCue::GameOver);
        self.listener.on_session_end(&summary);
        log::info!(
            "Session finished: score {}, {}/{} hits, {:.1}% accuracy, {:.0}ms avg reaction",
            summary.score,
            summary.clicked_targets,
            summary.total_targets,
            summary.accuracy,
            summary.avg_reaction_time
        );
        self.last_summary = Some(summary.clone());
        summary
    }

    fn reject(&self, request: &'static str) -> SessionError {
        log::warn!("Rejected {} request while {}", request, self.phase.as_str());
        SessionError::InvalidTransition {
            from: self.phase,
            request,
        }
    }
}

fn whole_seconds_left(time_left_ms: f64) -> u32 {
    (time_left_ms / 1000.0).ceil().max(0.0) as u32
}
