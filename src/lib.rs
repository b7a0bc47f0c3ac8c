//! Swarm Dodge - survive a homing swarm on a flat canvas
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, combos, enemies, effects)
//! - `session`: Session context and fixed-step frame clock
//! - `renderer`: WebGPU rendering pipeline
//! - `config`: Data-driven game tuning

pub mod config;
pub mod renderer;
pub mod session;
pub mod sim;

pub use config::{ComboMode, ConfigError, GameConfig, InputBlend};
pub use session::{FrameClock, FrameStatus, Session};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep in milliseconds (60 Hz)
    pub const SIM_DT_MS: f64 = 1000.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest host frame gap fed into the accumulator (tab switch, debugger)
    pub const MAX_FRAME_GAP_MS: f64 = 100.0;

    /// Default canvas extents
    pub const CANVAS_WIDTH: f32 = 800.0;
    pub const CANVAS_HEIGHT: f32 = 600.0;

    /// Player defaults
    pub const PLAYER_HALF_SIZE: f32 = 10.0;
    pub const PLAYER_SPEED: f32 = 5.0;

    /// Enemy defaults
    pub const ENEMY_RADIUS: f32 = 10.0;
    pub const ENEMY_SPEED_MIN: f32 = 1.0;
    pub const ENEMY_SPEED_MAX: f32 = 3.0;
    /// Chance per tick of a new enemy (~1 every 50 ticks)
    pub const SPAWN_PROBABILITY: f64 = 0.02;

    /// Combo trigger: fires above this speed (px/tick) or a quarter turn
    pub const COMBO_SPEED_THRESHOLD: f32 = 7.5;
    pub const COMBO_ANGLE_THRESHOLD: f32 = std::f32::consts::FRAC_PI_2;
    pub const COMBO_COOLDOWN_MS: f64 = 1000.0;
    pub const COMBO_PROXIMITY_RADIUS: f32 = 100.0;
    pub const COMBO_PUSH_DISTANCE: f32 = 50.0;
}

/// Heading angle (radians) from one point to another
#[inline]
pub fn heading(from: Vec2, to: Vec2) -> f32 {
    let d = to - from;
    d.y.atan2(d.x)
}

/// Vector of length `len` pointing along `angle`
#[inline]
pub fn from_heading(angle: f32, len: f32) -> Vec2 {
    Vec2::new(angle.cos() * len, angle.sin() * len)
}

/// Clamp a point so a body of `extent` stays fully inside `[0, size]`
#[inline]
pub fn clamp_to_bounds(pos: Vec2, extent: f32, size: Vec2) -> Vec2 {
    // max-then-min keeps a sane result even if the body is wider than the canvas
    Vec2::new(
        pos.x.max(extent).min(size.x - extent),
        pos.y.max(extent).min(size.y - extent),
    )
}
