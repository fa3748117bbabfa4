//! Session simulation
//!
//! All gameplay logic lives here. This module must stay host-agnostic:
//! - Timestamps are passed in, never read
//! - Seeded RNG only
//! - Stable iteration order (by target id)
//! - No rendering or platform dependencies

pub mod clock;
pub mod effects;
pub mod field;
pub mod resolver;
pub mod session;
pub mod state;
pub mod stats;

pub use clock::GameClock;
pub use effects::{spawn_burst, update_particles};
pub use field::TargetField;
pub use resolver::{PointerOutcome, resolve_pointer};
pub use session::{HudUpdate, NullListener, Session, SessionListener, TickOutcome};
pub use state::{BurstKind, Particle, SessionPhase, Target, Viewport};
pub use stats::{ReactionPoint, RunningStats, SessionSummary, hit_points};
