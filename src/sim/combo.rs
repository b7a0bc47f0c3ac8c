//! Whiplash combo detection
//!
//! Speed and heading change are two independent analog signals; the detector
//! fuses them into a single discrete event, gated by a cooldown so a sustained
//! sprint or wiggle fires at most once per window.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::config::GameConfig;

/// Heading change (radians, `0..=π`) between two velocities.
///
/// A zero-length velocity on either side counts as no change. A denominator
/// that underflows to zero is replaced with 1 so NaN never escapes.
pub fn angular_change(vel: Vec2, last_vel: Vec2) -> f32 {
    let len = vel.length();
    let last_len = last_vel.length();
    if len == 0.0 || last_len == 0.0 {
        return 0.0;
    }

    let mut denom = len * last_len;
    if denom == 0.0 {
        denom = 1.0;
    }
    let cos = (vel.dot(last_vel) / denom).clamp(-1.0, 1.0);
    let angle = cos.acos();
    if angle.is_finite() { angle } else { 0.0 }
}

/// Cooldown-gated combo trigger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComboDetector {
    /// Elapsed time of the previous fire (None until the first one)
    pub last_fire_ms: Option<f64>,
    pub cooldown_ms: f64,
    pub speed_threshold: f32,
    pub angle_threshold: f32,
}

impl ComboDetector {
    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            last_fire_ms: None,
            cooldown_ms: config.combo_cooldown_ms,
            speed_threshold: config.combo_speed_threshold,
            angle_threshold: config.combo_angle_threshold,
        }
    }

    /// Whether the motion alone qualifies (ignoring the cooldown)
    pub fn motion_qualifies(&self, vel: Vec2, last_vel: Vec2) -> bool {
        vel.length() >= self.speed_threshold
            || angular_change(vel, last_vel) >= self.angle_threshold
    }

    /// Whether the cooldown window has passed at `now_ms`
    pub fn ready(&self, now_ms: f64) -> bool {
        self.last_fire_ms
            .is_none_or(|last| now_ms - last >= self.cooldown_ms)
    }

    /// Evaluate the trigger for this tick; stamps the fire time when it fires
    pub fn check(&mut self, vel: Vec2, last_vel: Vec2, now_ms: f64) -> bool {
        if self.ready(now_ms) && self.motion_qualifies(vel, last_vel) {
            self.last_fire_ms = Some(now_ms);
            true
        } else {
            false
        }
    }
}
