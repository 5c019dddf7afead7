//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod collision;
pub mod rect;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{
    CollisionOutcome, resolve_enemies, resolve_obstacles, resolve_projectiles,
};
pub use rect::Rect;
pub use spawn::{SpawnRequest, Spawner};
pub use state::{
    Enemy, GameEvent, GamePhase, GameState, Obstacle, ObstacleKind, Player, Projectile,
};
pub use tick::{TickInput, tick, update};
