//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod track;

pub use collision::{Aabb, entity_hitbox, player_hitbox};
pub use spawn::{SpawnEvent, SpawnTimers};
pub use state::{GameEvent, GamePhase, GameState, Player, VerticalState};
pub use tick::{TickInput, tick};
pub use track::{EntityKind, ObstacleTier, TrackEntities, TrackEntity};
