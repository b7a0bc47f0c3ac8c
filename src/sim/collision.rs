//! Circle-circle collision between the player and enemies

use glam::Vec2;

use super::state::Enemy;

/// Strict overlap: touching circles (distance == sum of radii) do not collide
#[inline]
pub fn circles_overlap(a: Vec2, ra: f32, b: Vec2, rb: f32) -> bool {
    a.distance(b) < ra + rb
}

/// First enemy (in collection order) overlapping the player, if any
pub fn first_collision(enemies: &[Enemy], player_pos: Vec2, player_radius: f32) -> Option<&Enemy> {
    enemies
        .iter()
        .find(|e| circles_overlap(e.pos, e.radius, player_pos, player_radius))
}
