//! Target field: spawning, growth, expiry and hit lookup
//!
//! Targets are kept in spawn order (ascending id), so the last match in
//! iteration order is the one drawn on top.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::state::{Target, Viewport};
use crate::consts::SPAWN_PADDING;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TargetField {
    targets: Vec<Target>,
    /// Next id; also the count of targets ever spawned
    next_id: u32,
    /// `None` until the first spawn of the session
    last_spawn_at: Option<f64>,
}

impl TargetField {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every target and restart the id counter
    pub fn clear(&mut self) {
        self.targets.clear();
        self.next_id = 0;
        self.last_spawn_at = None;
    }

    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    #[cfg(test)]
    pub(crate) fn targets_mut(&mut self) -> &mut [Target] {
        &mut self.targets
    }

    pub fn live_count(&self) -> usize {
        self.targets.len()
    }

    /// Targets spawned since the last `clear`
    pub fn total_spawned(&self) -> u32 {
        self.next_id
    }

    pub fn last_spawn_at(&self) -> Option<f64> {
        self.last_spawn_at
    }

    /// Whether the spawn interval has passed (always true before the first spawn)
    pub fn spawn_due(&self, now: f64, spawn_rate_ms: f64) -> bool {
        match self.last_spawn_at {
            Some(last) => now - last > spawn_rate_ms,
            None => true,
        }
    }

    /// Spawn one target at a uniformly random position that keeps it fully
    /// on screen. Returns the new id.
    pub fn spawn(
        &mut self,
        rng: &mut Pcg32,
        now: f64,
        viewport: Viewport,
        max_radius: f32,
        lifetime: f64,
    ) -> u32 {
        let margin = max_radius + SPAWN_PADDING;
        let pos = Vec2::new(
            random_coord(rng, margin, viewport.width),
            random_coord(rng, margin, viewport.height),
        );

        let id = self.next_id;
        self.next_id += 1;
        self.targets
            .push(Target::new(id, pos, max_radius, now, lifetime));
        self.last_spawn_at = Some(now);

        log::debug!("spawned target {} at ({:.0}, {:.0})", id, pos.x, pos.y);
        id
    }

    /// Advance growth and remove expired targets. Returns how many expired.
    pub fn tick(&mut self, now: f64) -> u32 {
        for target in &mut self.targets {
            target.grow();
        }
        self.retain_live(now)
    }

    /// Remove every target that has reached its lifetime, keeping order
    pub fn retain_live(&mut self, now: f64) -> u32 {
        let before = self.targets.len();
        self.targets.retain(|t| t.is_live(now));
        (before - self.targets.len()) as u32
    }

    /// Remove all remaining targets (session end). Returns how many there were.
    pub fn expire_all(&mut self) -> u32 {
        let count = self.targets.len() as u32;
        self.targets.clear();
        count
    }

    /// Topmost live target under `point`, if any. Targets past their
    /// lifetime but not yet swept by `tick` are not clickable.
    pub fn hit_test(&self, point: Vec2, now: f64) -> Option<u32> {
        self.targets
            .iter()
            .rev()
            .find(|t| t.is_live(now) && t.contains(point))
            .map(|t| t.id)
    }

    /// Remove a target by id
    pub fn remove(&mut self, id: u32) -> Option<Target> {
        let index = self.targets.iter().position(|t| t.id == id)?;
        Some(self.targets.remove(index))
    }

    /// Move every game timestamp forward by `delta` ms (pause excision)
    pub fn shift_time(&mut self, delta: f64) {
        for target in &mut self.targets {
            target.created_at += delta;
        }
        if let Some(last) = self.last_spawn_at.as_mut() {
            *last += delta;
        }
    }
}

/// Uniform coordinate in `[margin, extent - margin]`, or the centre when the
/// surface is too small to honour the margin
fn random_coord(rng: &mut Pcg32, margin: f32, extent: f32) -> f32 {
    let hi = extent - margin;
    if hi > margin {
        rng.random_range(margin..=hi)
    } else {
        extent / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    const LIFETIME: f64 = 2000.0;

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(7)
    }

    fn viewport() -> Viewport {
        Viewport::new(800.0, 600.0)
    }

    #[test]
    fn test_spawn_stays_inside_padded_bounds() {
        let mut field = TargetField::new();
        let mut rng = rng();
        for i in 0..500 {
            field.spawn(&mut rng, i as f64, viewport(), 30.0, LIFETIME);
        }
        for t in field.targets() {
            assert!(t.pos.x >= 50.0 && t.pos.x <= 750.0, "x = {}", t.pos.x);
            assert!(t.pos.y >= 50.0 && t.pos.y <= 550.0, "y = {}", t.pos.y);
            assert_eq!(t.radius, 0.0);
            assert_eq!(t.max_radius, 30.0);
        }
        assert_eq!(field.total_spawned(), 500);
    }

    #[test]
    fn test_spawn_on_tiny_surface_centres_target() {
        let mut field = TargetField::new();
        let mut rng = rng();
        field.spawn(&mut rng, 0.0, Viewport::new(60.0, 40.0), 30.0, LIFETIME);
        assert_eq!(field.targets()[0].pos, Vec2::new(30.0, 20.0));
    }

    #[test]
    fn test_ids_are_monotonic() {
        let mut field = TargetField::new();
        let mut rng = rng();
        let a = field.spawn(&mut rng, 0.0, viewport(), 30.0, LIFETIME);
        let b = field.spawn(&mut rng, 1.0, viewport(), 30.0, LIFETIME);
        field.remove(a);
        let c = field.spawn(&mut rng, 2.0, viewport(), 30.0, LIFETIME);
        assert!(a < b && b < c);
        assert_eq!(field.total_spawned(), 3);
    }

    #[test]
    fn test_spawn_due_is_strictly_after_interval() {
        let mut field = TargetField::new();
        assert!(field.spawn_due(0.0, 600.0));
        field.spawn(&mut rng(), 1000.0, viewport(), 30.0, LIFETIME);
        assert!(!field.spawn_due(1600.0, 600.0));
        assert!(field.spawn_due(1600.1, 600.0));
    }

    #[test]
    fn test_tick_grows_and_expires() {
        let mut field = TargetField::new();
        let mut rng = rng();
        field.spawn(&mut rng, 0.0, viewport(), 30.0, LIFETIME);
        field.spawn(&mut rng, 1000.0, viewport(), 30.0, LIFETIME);

        assert_eq!(field.tick(1500.0), 0);
        assert!(field.targets().iter().all(|t| t.radius > 0.0));

        assert_eq!(field.tick(2000.0), 1);
        assert_eq!(field.live_count(), 1);
        assert_eq!(field.targets()[0].id, 1);

        assert_eq!(field.tick(3000.0), 1);
        assert_eq!(field.live_count(), 0);
        assert_eq!(field.total_spawned(), 2);
    }

    #[test]
    fn test_hit_test_prefers_most_recent() {
        let mut field = TargetField::new();
        let mut rng = rng();
        let a = field.spawn(&mut rng, 0.0, viewport(), 30.0, LIFETIME);
        let b = field.spawn(&mut rng, 1.0, viewport(), 30.0, LIFETIME);
        for t in field.targets_mut() {
            t.pos = Vec2::new(100.0, 100.0);
            t.radius = 30.0;
        }
        assert_eq!(field.hit_test(Vec2::new(110.0, 100.0), 10.0), Some(b));
        field.remove(b);
        assert_eq!(field.hit_test(Vec2::new(110.0, 100.0), 10.0), Some(a));
        assert_eq!(field.hit_test(Vec2::new(300.0, 300.0), 10.0), None);
    }

    #[test]
    fn test_hit_test_skips_unswept_expired_target() {
        let mut field = TargetField::new();
        let mut rng = rng();
        let old = field.spawn(&mut rng, 0.0, viewport(), 30.0, LIFETIME);
        let young = field.spawn(&mut rng, 1500.0, viewport(), 30.0, LIFETIME);
        for t in field.targets_mut() {
            t.pos = Vec2::new(200.0, 200.0);
            t.radius = 30.0;
        }
        // Both still stored; only the younger one is live at 2000
        assert_eq!(field.hit_test(Vec2::new(200.0, 200.0), 1999.0), Some(young));
        field.remove(young);
        assert_eq!(field.hit_test(Vec2::new(200.0, 200.0), 1999.0), Some(old));
        assert_eq!(field.hit_test(Vec2::new(200.0, 200.0), 2000.0), None);
        assert_eq!(field.live_count(), 1);
    }

    #[test]
    fn test_shift_time_preserves_remaining_lifetime() {
        let mut field = TargetField::new();
        field.spawn(&mut rng(), 1000.0, viewport(), 30.0, LIFETIME);
        let before = field.targets()[0].remaining(1500.0);

        field.shift_time(30_000.0);
        assert_eq!(field.targets()[0].remaining(31_500.0), before);
        assert_eq!(field.last_spawn_at(), Some(31_000.0));
        assert_eq!(field.tick(31_500.0), 0);
    }

    #[test]
    fn test_expire_all_and_clear() {
        let mut field = TargetField::new();
        let mut rng = rng();
        field.spawn(&mut rng, 0.0, viewport(), 30.0, LIFETIME);
        field.spawn(&mut rng, 0.0, viewport(), 30.0, LIFETIME);
        assert_eq!(field.expire_all(), 2);
        assert_eq!(field.total_spawned(), 2);

        field.clear();
        assert_eq!(field.total_spawned(), 0);
        assert_eq!(field.last_spawn_at(), None);
    }
}
