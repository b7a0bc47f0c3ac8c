//! Movement intent: input directions, speed boost, one Euler step per tick

use glam::Vec2;

use super::input::TickInput;
use super::state::{GameEvent, GameState, Player};
use crate::config::{GameConfig, InputBlend};

/// Unit pointer direction for this tick.
///
/// A touch target beats relative mouse motion. Within one player step of the
/// target the direction is zero, otherwise the square would jitter across it.
pub fn pointer_dir(input: &TickInput, player: &Player, step: f32) -> Vec2 {
    if let Some(target) = input.touch_target {
        let to_target = target - player.pos;
        if to_target.length() <= step {
            return Vec2::ZERO;
        }
        return to_target.normalize_or_zero();
    }
    input
        .mouse_delta
        .map(|d| d.normalize_or_zero())
        .unwrap_or(Vec2::ZERO)
}

/// Combine keyboard and pointer unit vectors according to the blend mode
pub fn blend_directions(keyboard: Vec2, pointer: Vec2, blend: InputBlend) -> Vec2 {
    match blend {
        InputBlend::Additive => keyboard + pointer,
        InputBlend::Exclusive => {
            if pointer != Vec2::ZERO {
                pointer
            } else {
                keyboard
            }
        }
    }
}

/// Advance the boost timers and start a burst if requested.
///
/// Returns the speed multiplier for this tick.
pub fn update_boost(state: &mut GameState, wants_boost: bool, config: &GameConfig, dt_ms: f64) -> f32 {
    if !config.boost_enabled {
        return 1.0;
    }

    let now = state.elapsed_ms;
    let boost = &mut state.player.boost;

    if boost.active {
        boost.remaining_ms -= dt_ms;
        if boost.remaining_ms <= 0.0 {
            boost.active = false;
            boost.remaining_ms = 0.0;
            boost.cooldown_until_ms = now + config.boost_cooldown_ms;
        }
    } else if wants_boost && now >= boost.cooldown_until_ms {
        boost.active = true;
        boost.remaining_ms = config.boost_duration_ms;
        state.events.push(GameEvent::BoostStarted);
    }

    if state.player.boost.active {
        config.boost_multiplier
    } else {
        1.0
    }
}

/// Resolve this tick's velocity and move the player (clamped to the canvas)
pub fn move_player(state: &mut GameState, input: &TickInput, config: &GameConfig, speed_mult: f32) {
    let player = &mut state.player;
    let step = player.speed * speed_mult;

    let keyboard = input.keyboard_dir();
    let pointer = pointer_dir(input, player, step);
    let dir = blend_directions(keyboard, pointer, config.input_blend);

    player.last_vel = player.vel;
    player.vel = dir * step;
    player.pos += player.vel;
    player.clamp_to(state.bounds);
}
