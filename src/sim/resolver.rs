//! Pointer-down resolution: hit the topmost target under the pointer or miss

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::field::TargetField;
use super::stats::RunningStats;

/// Result of a pointer-down
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerOutcome {
    /// Not playing; nothing changed
    Ignored,
    Hit {
        target_id: u32,
        /// Target centre, for the hit effect
        at: Vec2,
        reaction_ms: f64,
        points: u64,
    },
    Miss,
}

/// Apply one pointer-down at `point`. `elapsed_ms` is game time into the
/// session, used to bucket the reaction history.
pub fn resolve_pointer(
    field: &mut TargetField,
    stats: &mut RunningStats,
    now: f64,
    elapsed_ms: f64,
    point: Vec2,
) -> PointerOutcome {
    stats.record_click();

    let Some(target) = field.hit_test(point, now).and_then(|id| field.remove(id)) else {
        stats.record_miss();
        log::debug!("miss at ({:.0}, {:.0})", point.x, point.y);
        return PointerOutcome::Miss;
    };

    let reaction_ms = target.age(now).max(0.0);
    let points = stats.record_hit(reaction_ms, elapsed_ms);
    log::debug!(
        "hit target {} after {:.0}ms (+{})",
        target.id,
        reaction_ms,
        points
    );
    PointerOutcome::Hit {
        target_id: target.id,
        at: target.pos,
        reaction_ms,
        points,
    }
}
