//! Turns a read-only game state into one triangle list
//!
//! Draw order: shockwaves, enemies, particles, player, flash, game-over dim.

use glam::Vec2;

use super::shapes::{circle, rect, ring, square};
use super::vertex::{Vertex, colors};
use crate::sim::{GamePhase, GameState};

/// Shockwave line width in pixels
const SHOCKWAVE_WIDTH: f32 = 3.0;

/// Build every vertex for the current frame
pub fn build_scene(state: &GameState) -> Vec<Vertex> {
    let mut vertices = Vec::new();

    for wave in &state.effects.shockwaves {
        vertices.extend(ring(
            wave.origin,
            wave.radius,
            SHOCKWAVE_WIDTH,
            colors::with_alpha(colors::SHOCKWAVE, wave.opacity),
        ));
    }

    for enemy in &state.enemies {
        vertices.extend(circle(enemy.pos, enemy.radius, colors::ENEMY));
    }

    for explosion in &state.effects.explosions {
        for p in &explosion.particles {
            vertices.extend(circle(p.pos, p.radius, colors::with_alpha(p.color, p.alpha)));
        }
    }

    let player = &state.player;
    let player_color = if player.boost.active {
        colors::PLAYER_BOOST
    } else {
        colors::PLAYER
    };
    vertices.extend(square(player.pos, player.half_size, player_color));

    let flash = &state.effects.flash;
    if flash.active {
        vertices.extend(rect(
            Vec2::ZERO,
            state.bounds,
            colors::with_alpha(colors::FLASH, flash.opacity),
        ));
    }

    if state.phase == GamePhase::GameOver {
        vertices.extend(rect(Vec2::ZERO, state.bounds, colors::GAME_OVER_DIM));
    }

    vertices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::sim::Enemy;

    #[test]
    fn test_empty_scene_is_just_the_player() {
        let state = GameState::new(&GameConfig::default(), 1);
        let v = build_scene(&state);
        assert_eq!(v.len(), 6);
        assert_eq!(v[0].color, colors::PLAYER);
    }

    #[test]
    fn test_flash_overlay_uses_opacity() {
        let mut state = GameState::new(&GameConfig::default(), 1);
        state.effects.flash.trigger(0.4, 0.05);
        let v = build_scene(&state);
        let last = v.last().unwrap();
        assert_eq!(last.color[3], 0.4);
    }

    #[test]
    fn test_game_over_dims_screen() {
        let mut state = GameState::new(&GameConfig::default(), 1);
        state.enemies.push(Enemy {
            id: 1,
            pos: Vec2::new(100.0, 100.0),
            radius: 10.0,
            speed: 1.0,
        });
        state.phase = GamePhase::GameOver;
        let v = build_scene(&state);
        assert_eq!(v.last().unwrap().color, colors::GAME_OVER_DIM);
        assert!(v.iter().any(|v| v.color == colors::ENEMY));
    }
}
