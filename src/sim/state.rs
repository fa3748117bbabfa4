//! Core simulation types
//!
//! Entities owned by the session controller. Timestamps are host
//! milliseconds; positions are surface pixels.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Session state machine phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SessionPhase {
    /// Settings menu, nothing running
    #[default]
    Menu,
    /// Active play: ticks and pointer events take effect
    Playing,
    /// Loop stopped, clock frozen
    Paused,
    /// Duration elapsed, summary emitted
    Finished,
}

impl SessionPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionPhase::Menu => "menu",
            SessionPhase::Playing => "playing",
            SessionPhase::Paused => "paused",
            SessionPhase::Finished => "finished",
        }
    }

    /// Whether a session is in progress (its stats are live)
    pub fn is_active(&self) -> bool {
        matches!(self, SessionPhase::Playing | SessionPhase::Paused)
    }
}

/// Pixel size of the play surface
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// A surface we can spawn onto and draw into
    pub fn is_drawable(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// A clickable target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Target {
    /// Spawn order; higher ids are drawn on top
    pub id: u32,
    pub pos: Vec2,
    /// Current radius, eases toward `max_radius`
    pub radius: f32,
    pub max_radius: f32,
    /// Spawn timestamp, shifted forward across pauses
    pub created_at: f64,
    /// Clickable window (ms)
    pub lifetime: f64,
}

impl Target {
    pub fn new(id: u32, pos: Vec2, max_radius: f32, created_at: f64, lifetime: f64) -> Self {
        Self {
            id,
            pos,
            radius: 0.0,
            max_radius,
            created_at,
            lifetime,
        }
    }

    pub fn age(&self, now: f64) -> f64 {
        now - self.created_at
    }

    pub fn is_live(&self, now: f64) -> bool {
        self.age(now) < self.lifetime
    }

    /// Remaining clickable time (ms), never negative
    pub fn remaining(&self, now: f64) -> f64 {
        (self.lifetime - self.age(now)).max(0.0)
    }

    /// Fraction of the lifetime used up, 0..=1
    pub fn life_fraction(&self, now: f64) -> f32 {
        (self.age(now) / self.lifetime).clamp(0.0, 1.0) as f32
    }

    /// Opacity: solid, then fading out over the last 20% of the lifetime
    pub fn alpha(&self, now: f64) -> f32 {
        let life = self.life_fraction(now);
        if life > FADE_START {
            (1.0 - (life - FADE_START) * 5.0).clamp(0.0, 1.0)
        } else {
            1.0
        }
    }

    /// One step of the exponential ease-in toward full size
    pub fn grow(&mut self) {
        if self.radius < self.max_radius {
            self.radius += (self.max_radius - self.radius) * GROWTH_RATE;
            self.radius = self.radius.min(self.max_radius);
        }
    }

    /// Point-in-disc test against the current (not final) radius
    pub fn contains(&self, point: Vec2) -> bool {
        self.pos.distance(point) <= self.radius
    }
}

/// Which interaction produced a particle burst
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BurstKind {
    Hit,
    Miss,
}

/// Cosmetic particle, frame-based (freezes with the loop)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// 1.0 at birth, removed at or below 0
    pub life: f32,
    pub kind: BurstKind,
}

impl Particle {
    pub fn advance(&mut self) {
        self.pos += self.vel;
        self.life -= PARTICLE_DECAY;
    }

    pub fn is_alive(&self) -> bool {
        self.life > 0.0
    }
}
