//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically. Movement, enemy
//! speed, spawn chance and effect aging are per tick; `dt_ms` only drives the
//! clocks (score, combo cooldown, boost timer).

use rand::Rng;

use super::collision::first_collision;
use super::effects::{Explosion, Shockwave};
use super::enemy::{pursue, push_within, remove_within, spawn_enemy};
use super::input::TickInput;
use super::movement::{move_player, update_boost};
use super::state::{GameEvent, GamePhase, GameState};
use crate::config::{ComboMode, GameConfig};

/// Flash opacity on a combo
const COMBO_FLASH_OPACITY: f32 = 0.8;

/// Advance the game state by one tick of `dt_ms` milliseconds
pub fn tick(state: &mut GameState, input: &TickInput, config: &GameConfig, dt_ms: f64) {
    // Don't tick once the session is over
    if state.phase == GamePhase::GameOver {
        return;
    }

    state.time_ticks += 1;

    // Movement intent
    let speed_mult = update_boost(state, input.boost, config, dt_ms);
    move_player(state, input, config, speed_mult);

    // Whiplash combo
    if config.combo_enabled {
        let (vel, last_vel) = (state.player.vel, state.player.last_vel);
        if state.combo.check(vel, last_vel, state.elapsed_ms) {
            fire_combo(state, config);
        }
    }

    // Enemies
    if state.rng.random_bool(config.spawn_probability) {
        let id = state.next_entity_id();
        let enemy = spawn_enemy(&mut state.rng, id, state.bounds, config);
        state.enemies.push(enemy);
        state.events.push(GameEvent::EnemySpawned { id });
    }
    pursue(&mut state.enemies, state.player.pos);

    // Collision ends the run immediately; the state freezes as-is
    if let Some(enemy) = first_collision(&state.enemies, state.player.pos, state.player.radius()) {
        let enemy_id = enemy.id;
        state.phase = GamePhase::GameOver;
        state.events.push(GameEvent::PlayerCaught { enemy_id });
        return;
    }

    state.effects.update();

    state.elapsed_ms += dt_ms;
    state.score = score_for(state.elapsed_ms);
}

/// Whole seconds survived
#[inline]
pub fn score_for(elapsed_ms: f64) -> u64 {
    (elapsed_ms / 1000.0).floor().max(0.0) as u64
}

/// Apply a combo at the player's position
pub fn fire_combo(state: &mut GameState, config: &GameConfig) {
    let center = state.player.pos;
    let radius = config.combo_proximity_radius;

    let (destroyed, pushed) = match config.combo_mode {
        ComboMode::Destroy => {
            let removed = remove_within(&mut state.enemies, center, radius);
            for enemy in &removed {
                let explosion = Explosion::new(&mut state.rng, enemy.pos, config.explosion_particles);
                if !explosion.is_done() {
                    state.effects.explosions.push(explosion);
                }
            }
            (removed.len(), 0)
        }
        ComboMode::PushBack => {
            let pushed = push_within(
                &mut state.enemies,
                center,
                radius,
                config.combo_push_distance,
                state.bounds,
            );
            (0, pushed)
        }
    };

    state
        .effects
        .flash
        .trigger(COMBO_FLASH_OPACITY, config.flash_decay);
    state.effects.shockwaves.push(Shockwave::new(
        center,
        config.shockwave_max_radius,
        config.shockwave_growth,
        config.shockwave_fade,
    ));

    state.combos_fired += 1;
    state.events.push(GameEvent::ComboFired { destroyed, pushed });
}
