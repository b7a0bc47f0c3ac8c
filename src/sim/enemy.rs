//! Enemy spawning and pursuit
//!
//! Enemies are plain records; everything that moves or removes them is a free
//! function over the collection.

use glam::Vec2;
use rand::Rng;

use super::state::Enemy;
use crate::config::GameConfig;
use crate::{clamp_to_bounds, from_heading, heading};

/// Canvas edge an enemy enters from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Top,
    Bottom,
    Left,
    Right,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Top, Edge::Bottom, Edge::Left, Edge::Right];

    /// Point just outside this edge, `along` in `0..1` of its length
    pub fn spawn_point(self, bounds: Vec2, along: f32, radius: f32) -> Vec2 {
        match self {
            Edge::Top => Vec2::new(along * bounds.x, -radius),
            Edge::Bottom => Vec2::new(along * bounds.x, bounds.y + radius),
            Edge::Left => Vec2::new(-radius, along * bounds.y),
            Edge::Right => Vec2::new(bounds.x + radius, along * bounds.y),
        }
    }
}

/// Build an enemy just outside a uniformly chosen edge
pub fn spawn_enemy<R: Rng>(rng: &mut R, id: u32, bounds: Vec2, config: &GameConfig) -> Enemy {
    let edge = Edge::ALL[rng.random_range(0..Edge::ALL.len())];
    let along = rng.random::<f32>();
    let speed = if config.enemy_speed_max > config.enemy_speed_min {
        rng.random_range(config.enemy_speed_min..config.enemy_speed_max)
    } else {
        config.enemy_speed_min
    };

    Enemy {
        id,
        pos: edge.spawn_point(bounds, along, config.enemy_radius),
        radius: config.enemy_radius,
        speed,
    }
}

/// Move every enemy straight at the target by its own speed
pub fn pursue(enemies: &mut [Enemy], target: Vec2) {
    for enemy in enemies {
        let angle = heading(enemy.pos, target);
        enemy.pos += from_heading(angle, enemy.speed);
    }
}

/// Remove enemies whose centers are within `radius` of `center` (inclusive)
pub fn remove_within(enemies: &mut Vec<Enemy>, center: Vec2, radius: f32) -> Vec<Enemy> {
    let mut removed = Vec::new();
    enemies.retain(|e| {
        if e.pos.distance(center) <= radius {
            removed.push(e.clone());
            false
        } else {
            true
        }
    });
    removed
}

/// Shove enemies within `radius` of `center` outward by `distance`, then clamp
/// them back inside the canvas. Returns how many were pushed.
pub fn push_within(
    enemies: &mut [Enemy],
    center: Vec2,
    radius: f32,
    distance: f32,
    bounds: Vec2,
) -> usize {
    let mut pushed = 0;
    for enemy in enemies.iter_mut() {
        if enemy.pos.distance(center) > radius {
            continue;
        }
        // An enemy sitting exactly on the player has no outward direction
        let away = (enemy.pos - center).normalize_or_zero();
        enemy.pos = clamp_to_bounds(enemy.pos + away * distance, enemy.radius, bounds);
        pushed += 1;
    }
    pushed
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn enemy(id: u32, x: f32, y: f32) -> Enemy {
        Enemy {
            id,
            pos: Vec2::new(x, y),
            radius: 10.0,
            speed: 2.0,
        }
    }

    #[test]
    fn test_spawn_is_just_outside_an_edge() {
        let config = GameConfig::default();
        let bounds = config.canvas_size();
        let mut rng = Pcg32::seed_from_u64(42);

        for id in 0..200 {
            let e = spawn_enemy(&mut rng, id, bounds, &config);
            let r = config.enemy_radius;
            let outside = e.pos.x == -r
                || e.pos.x == bounds.x + r
                || e.pos.y == -r
                || e.pos.y == bounds.y + r;
            assert!(outside, "spawned inside the canvas at {:?}", e.pos);
            assert!(e.speed >= config.enemy_speed_min && e.speed < config.enemy_speed_max);
        }
    }

    #[test]
    fn test_spawn_uses_every_edge() {
        let config = GameConfig::default();
        let bounds = config.canvas_size();
        let mut rng = Pcg32::seed_from_u64(3);
        let mut seen = [false; 4];
        for id in 0..200 {
            let e = spawn_enemy(&mut rng, id, bounds, &config);
            if e.pos.y < 0.0 {
                seen[0] = true;
            } else if e.pos.y > bounds.y {
                seen[1] = true;
            } else if e.pos.x < 0.0 {
                seen[2] = true;
            } else {
                seen[3] = true;
            }
        }
        assert_eq!(seen, [true; 4]);
    }

    #[test]
    fn test_fixed_speed_range() {
        let config = GameConfig {
            enemy_speed_min: 2.0,
            enemy_speed_max: 2.0,
            ..Default::default()
        };
        let mut rng = Pcg32::seed_from_u64(1);
        let e = spawn_enemy(&mut rng, 1, config.canvas_size(), &config);
        assert_eq!(e.speed, 2.0);
    }

    #[test]
    fn test_pursue_closes_distance_by_speed() {
        let mut enemies = vec![enemy(1, 0.0, 0.0)];
        pursue(&mut enemies, Vec2::new(30.0, 40.0));
        assert!((enemies[0].pos - Vec2::new(1.2, 1.6)).length() < 1e-5);
    }

    #[test]
    fn test_remove_within_is_inclusive() {
        let center = Vec2::new(100.0, 100.0);
        let mut enemies = vec![
            enemy(1, 200.0, 100.0), // exactly on the radius
            enemy(2, 200.1, 100.0),
            enemy(3, 150.0, 150.0),
        ];
        let removed = remove_within(&mut enemies, center, 100.0);
        let removed_ids: Vec<u32> = removed.iter().map(|e| e.id).collect();
        assert_eq!(removed_ids, vec![1, 3]);
        assert_eq!(enemies.len(), 1);
        assert_eq!(enemies[0].id, 2);
    }

    #[test]
    fn test_push_within_moves_outward_and_clamps() {
        let bounds = Vec2::new(800.0, 600.0);
        let center = Vec2::new(100.0, 100.0);
        let mut enemies = vec![
            enemy(1, 150.0, 100.0),
            enemy(2, 30.0, 100.0),
            enemy(3, 500.0, 500.0),
        ];
        let pushed = push_within(&mut enemies, center, 100.0, 50.0, bounds);
        assert_eq!(pushed, 2);
        assert_eq!(enemies[0].pos, Vec2::new(200.0, 100.0));
        // Pushed past the left wall, clamped back in
        assert_eq!(enemies[1].pos, Vec2::new(10.0, 100.0));
        assert_eq!(enemies[2].pos, Vec2::new(500.0, 500.0));
    }
}
