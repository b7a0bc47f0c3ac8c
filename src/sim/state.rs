//! Game state and core simulation types
//!
//! Everything a tick reads or writes lives in [`GameState`]; there are no
//! globals. The host owns one state per session and hands it to `tick`.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::combo::ComboDetector;
use super::effects::Effects;
use crate::clamp_to_bounds;
use crate::config::GameConfig;

/// Session phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Player was caught; only a restart leaves this phase
    GameOver,
}

/// Notable things that happened during a tick (drained by the session)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    EnemySpawned { id: u32 },
    BoostStarted,
    ComboFired { destroyed: usize, pushed: usize },
    PlayerCaught { enemy_id: u32 },
}

/// Short burst of extra speed
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Boost {
    pub active: bool,
    /// Time left on the current burst
    pub remaining_ms: f64,
    /// Elapsed time before which a new burst is refused
    pub cooldown_until_ms: f64,
}

/// The player's square
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Center of the square
    pub pos: Vec2,
    pub half_size: f32,
    /// Base speed in pixels per tick
    pub speed: f32,
    pub vel: Vec2,
    /// Velocity of the previous tick, used for whiplash detection
    pub last_vel: Vec2,
    pub boost: Boost,
}

impl Player {
    /// Player at rest in the middle of the canvas
    pub fn centered(bounds: Vec2, config: &GameConfig) -> Self {
        Self {
            pos: bounds * 0.5,
            half_size: config.player_half_size,
            speed: config.player_speed,
            vel: Vec2::ZERO,
            last_vel: Vec2::ZERO,
            boost: Boost::default(),
        }
    }

    /// Collision radius (the square is treated as its inscribed circle)
    #[inline]
    pub fn radius(&self) -> f32 {
        self.half_size
    }

    /// Keep the square inside the canvas
    pub fn clamp_to(&mut self, bounds: Vec2) {
        self.pos = clamp_to_bounds(self.pos, self.half_size, bounds);
    }
}

/// A homing enemy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub pos: Vec2,
    pub radius: f32,
    /// Pixels per tick
    pub speed: f32,
}

/// Complete game state (deterministic for a given seed and input stream)
#[derive(Debug, Clone, Serialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Spawn/particle RNG
    #[serde(skip_serializing)]
    pub rng: Pcg32,
    pub phase: GamePhase,
    /// Canvas extents in pixels
    pub bounds: Vec2,
    pub player: Player,
    /// Active enemies (in spawn order)
    pub enemies: Vec<Enemy>,
    /// Visual effects (not gameplay-affecting)
    pub effects: Effects,
    pub combo: ComboDetector,
    /// Milliseconds spent in the Playing phase
    pub elapsed_ms: f64,
    /// Whole seconds survived
    pub score: u64,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Combos fired this session
    pub combos_fired: u32,
    /// Events raised since the last drain
    #[serde(skip_serializing)]
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a fresh Playing session with the given seed
    pub fn new(config: &GameConfig, seed: u64) -> Self {
        let bounds = config.canvas_size();
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Playing,
            bounds,
            player: Player::centered(bounds, config),
            enemies: Vec::new(),
            effects: Effects::default(),
            combo: ComboDetector::from_config(config),
            elapsed_ms: 0.0,
            score: 0,
            time_ticks: 0,
            combos_fired: 0,
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Reinitialize in place, keeping the current canvas extents
    pub fn reset(&mut self, config: &GameConfig, seed: u64) {
        let bounds = self.bounds;
        *self = Self::new(config, seed);
        self.bounds = bounds;
        self.player = Player::centered(bounds, config);
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    #[inline]
    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Apply new canvas extents; the player is pulled back inside
    pub fn resize(&mut self, bounds: Vec2) {
        self.bounds = bounds;
        self.player.clamp_to(bounds);
    }

    /// Take the events raised since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_centered_and_playing() {
        let config = GameConfig::default();
        let state = GameState::new(&config, 7);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.player.pos, Vec2::new(400.0, 300.0));
        assert!(state.enemies.is_empty());
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_reset_keeps_resized_bounds() {
        let config = GameConfig::default();
        let mut state = GameState::new(&config, 7);
        state.resize(Vec2::new(1000.0, 500.0));
        state.phase = GamePhase::GameOver;
        state.score = 12;

        state.reset(&config, 8);
        assert_eq!(state.bounds, Vec2::new(1000.0, 500.0));
        assert_eq!(state.player.pos, Vec2::new(500.0, 250.0));
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
        assert_eq!(state.seed, 8);
    }

    #[test]
    fn test_resize_clamps_player() {
        let config = GameConfig::default();
        let mut state = GameState::new(&config, 1);
        state.player.pos = Vec2::new(790.0, 590.0);
        state.resize(Vec2::new(300.0, 200.0));
        assert_eq!(state.player.pos, Vec2::new(290.0, 190.0));
    }

    #[test]
    fn test_entity_ids_are_unique() {
        let mut state = GameState::new(&GameConfig::default(), 1);
        let a = state.next_entity_id();
        let b = state.next_entity_id();
        assert_ne!(a, b);
    }
}
