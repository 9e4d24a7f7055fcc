//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Frame-stepped only (velocities are pixels per frame)
//! - Seeded RNG only
//! - Time enters only through `TickInput::now_ms`
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod entity;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{detect_catches, resolve_catches};
pub use entity::{Aabb, Entity};
pub use spawner::Spawner;
pub use state::{FallingObject, GameEvent, GamePhase, GameState, Player};
pub use tick::{LoopControl, TickInput, tick};
