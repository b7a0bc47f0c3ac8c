//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Per-tick updates only (the caller supplies the tick length)
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod combo;
pub mod effects;
pub mod enemy;
pub mod input;
pub mod movement;
pub mod state;
pub mod tick;

pub use collision::{circles_overlap, first_collision};
pub use combo::{ComboDetector, angular_change};
pub use effects::{Effects, Explosion, Flash, Particle, Shockwave};
pub use enemy::{Edge, pursue, push_within, remove_within, spawn_enemy};
pub use input::{InputState, Key, TickInput};
pub use state::{Boost, Enemy, GameEvent, GamePhase, GameState, Player};
pub use tick::{fire_combo, score_for, tick};
