//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed frame per tick
//! - Seeded RNG only
//! - Stable iteration order (player before enemy, bullets in fire order)
//! - No rendering or platform dependencies

pub mod ai;
pub mod collision;
pub mod state;
pub mod tick;
pub mod wall;

pub use ai::{ShooterIntent, decide};
pub use collision::{BulletOutcome, resolve_bullets, resolve_collisions};
pub use state::{
    Bullet, BulletList, GameEvent, GamePhase, GameState, Heading, Shooter, ShooterId, VerticalDir,
};
pub use tick::{TickInput, evaluate_outcome, tick};
pub use wall::Wall;
