//! Combat module - fighters, missiles, AI, and per-tick match resolution.
//!
//! Everything below `plugin`/`systems` is plain Rust with no ECS access, so
//! the simulation can be driven directly from tests.

mod ai;
mod character;
mod plugin;
mod projectile;
mod resolver;
mod snapshot;
mod systems;
mod tuning;

pub use ai::{AiBehavior, AiPlan, AiPolicy, AiView, CLOSE_RANGE_WEIGHTS, LONG_RANGE_WEIGHTS};
pub use character::{Character, DamageTaken, MeleeKind, MeleeSwing, Particle, Side};
pub use plugin::CombatPlugin;
pub use projectile::Projectile;
pub use resolver::{HitKind, HitRecord, Match, MatchOutcome, PlayerIntent, TickReport};
pub use snapshot::{FighterSnapshot, MatchSnapshot, ProjectileSnapshot};
pub use systems::{build_match, CombatSet, HitEvent};
pub use tuning::{AiTuning, CombatTuning};
