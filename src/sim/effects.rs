//! Cosmetic particle bursts on hit/miss
//!
//! Nothing here affects scoring.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::state::{BurstKind, Particle};
use crate::consts::{BURST_PARTICLES, MAX_PARTICLES};

/// Ring of particles flying outward from `origin`
pub fn spawn_burst(particles: &mut Vec<Particle>, rng: &mut Pcg32, origin: Vec2, kind: BurstKind) {
    for i in 0..BURST_PARTICLES {
        if particles.len() >= MAX_PARTICLES {
            // Remove oldest particles to make room
            particles.remove(0);
        }
        let angle = std::f32::consts::TAU * i as f32 / BURST_PARTICLES as f32;
        let speed: f32 = rng.random_range(2.0..4.0);
        particles.push(Particle {
            pos: origin,
            vel: Vec2::from_angle(angle) * speed,
            life: 1.0,
            kind,
        });
    }
}

/// Advance one frame and drop dead particles
pub fn update_particles(particles: &mut Vec<Particle>) {
    for particle in particles.iter_mut() {
        particle.advance();
    }
    particles.retain(Particle::is_alive);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_burst_shape() {
        let mut particles = Vec::new();
        let mut rng = Pcg32::seed_from_u64(1);
        spawn_burst(&mut particles, &mut rng, Vec2::new(10.0, 20.0), BurstKind::Miss);

        assert_eq!(particles.len(), BURST_PARTICLES);
        for p in &particles {
            assert_eq!(p.pos, Vec2::new(10.0, 20.0));
            assert_eq!(p.life, 1.0);
            assert_eq!(p.kind, BurstKind::Miss);
            let speed = p.vel.length();
            assert!((2.0..4.0 + 1e-4).contains(&speed), "speed {}", speed);
        }
        // First particle heads along +x
        assert!(particles[0].vel.y.abs() < 1e-4);
    }

    #[test]
    fn test_particles_die_after_twenty_frames() {
        let mut particles = Vec::new();
        let mut rng = Pcg32::seed_from_u64(2);
        spawn_burst(&mut particles, &mut rng, Vec2::ZERO, BurstKind::Hit);
        for _ in 0..19 {
            update_particles(&mut particles);
        }
        assert_eq!(particles.len(), BURST_PARTICLES);
        for _ in 0..2 {
            update_particles(&mut particles);
        }
        assert!(particles.is_empty());
    }

    #[test]
    fn test_particle_cap_drops_oldest() {
        let mut particles = Vec::new();
        let mut rng = Pcg32::seed_from_u64(3);
        for _ in 0..(MAX_PARTICLES / BURST_PARTICLES) {
            spawn_burst(&mut particles, &mut rng, Vec2::ZERO, BurstKind::Hit);
        }
        spawn_burst(&mut particles, &mut rng, Vec2::ONE, BurstKind::Miss);
        assert_eq!(particles.len(), MAX_PARTICLES);
        assert_eq!(particles.last().map(|p| p.kind), Some(BurstKind::Miss));
    }
}
