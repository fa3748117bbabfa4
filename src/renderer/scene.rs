//! Draw lists for targets and particles

use glam::Vec2;
use std::f32::consts::TAU;

use crate::sim::{BurstKind, Particle, Target, Viewport};

/// Straight RGBA, alpha in 0..=1
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const CYAN: Rgba = Rgba::rgb(6, 182, 212);
    pub const WHITE: Rgba = Rgba::rgb(255, 255, 255);
    pub const RED: Rgba = Rgba::rgb(239, 68, 68);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self {
            a: a.clamp(0.0, 1.0),
            ..self
        }
    }

    /// CSS `rgba(...)` string for canvas styles
    pub fn css(&self) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

/// Particle dot radius (px)
const PARTICLE_RADIUS: f32 = 3.0;
/// Inner highlight as a fraction of the target radius
const INNER_SCALE: f32 = 0.6;
/// Gap between the target edge and its countdown ring (px)
const RING_OFFSET: f32 = 2.0;
const RING_WIDTH: f32 = 2.0;

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear { width: f32, height: f32 },
    Disc { center: Vec2, radius: f32, color: Rgba },
    /// Clockwise stroke from angle 0 through `sweep` radians
    Arc {
        center: Vec2,
        radius: f32,
        sweep: f32,
        width: f32,
        color: Rgba,
    },
}

/// Everything to draw for one frame, back to front
pub fn build_scene(
    viewport: Viewport,
    targets: &[Target],
    particles: &[Particle],
    now: f64,
) -> Vec<DrawCommand> {
    let mut commands = Vec::with_capacity(1 + targets.len() * 3 + particles.len());
    commands.push(DrawCommand::Clear {
        width: viewport.width,
        height: viewport.height,
    });

    for target in targets {
        push_target(&mut commands, target, now);
    }

    for particle in particles {
        let color = match particle.kind {
            BurstKind::Hit => Rgba::CYAN,
            BurstKind::Miss => Rgba::RED,
        };
        commands.push(DrawCommand::Disc {
            center: particle.pos,
            radius: PARTICLE_RADIUS,
            color: color.with_alpha(particle.life),
        });
    }

    commands
}

fn push_target(commands: &mut Vec<DrawCommand>, target: &Target, now: f64) {
    let alpha = target.alpha(now);
    commands.push(DrawCommand::Disc {
        center: target.pos,
        radius: target.radius,
        color: Rgba::CYAN.with_alpha(alpha),
    });
    commands.push(DrawCommand::Disc {
        center: target.pos,
        radius: target.radius * INNER_SCALE,
        color: Rgba::WHITE.with_alpha(alpha * 0.5),
    });

    // Ring shrinks as the target ages
    let sweep = TAU * (1.0 - target.life_fraction(now));
    if sweep > 0.0 {
        commands.push(DrawCommand::Arc {
            center: target.pos,
            radius: target.radius + RING_OFFSET,
            sweep,
            width: RING_WIDTH,
            color: Rgba::WHITE.with_alpha(alpha * 0.3),
        });
    }
}
