//! Input state and per-tick snapshots
//!
//! Host events land here as they arrive. Once per tick the simulation takes a
//! [`TickInput`] snapshot, which drains the relative mouse accumulator.

use std::collections::HashSet;

use glam::Vec2;

/// Logical keys the game understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Boost,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value (arrows and WASD share directions)
    pub fn from_dom_key(key: &str) -> Option<Self> {
        match key {
            "ArrowUp" | "w" | "W" => Some(Key::Up),
            "ArrowDown" | "s" | "S" => Some(Key::Down),
            "ArrowLeft" | "a" | "A" => Some(Key::Left),
            "ArrowRight" | "d" | "D" => Some(Key::Right),
            "Shift" => Some(Key::Boost),
            _ => None,
        }
    }
}

/// Input commands for a single tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    /// Raw keyboard axes (each component -1, 0 or 1; not normalized)
    pub keyboard: Vec2,
    /// Relative mouse motion since the previous tick (only under pointer lock)
    pub mouse_delta: Option<Vec2>,
    /// Absolute touch point (canvas pixels) while a finger is down
    pub touch_target: Option<Vec2>,
    /// Boost key held
    pub boost: bool,
}

impl TickInput {
    /// Unit keyboard direction, zero when no (or cancelling) keys are held
    pub fn keyboard_dir(&self) -> Vec2 {
        self.keyboard.normalize_or_zero()
    }
}

/// Live input collected between ticks
#[derive(Debug, Clone, Default)]
pub struct InputState {
    pressed: HashSet<Key>,
    pointer_locked: bool,
    mouse_delta: Vec2,
    touch_target: Option<Vec2>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key press; unknown keys are ignored. Returns whether it mapped.
    pub fn key_down(&mut self, dom_key: &str) -> bool {
        match Key::from_dom_key(dom_key) {
            Some(key) => {
                self.pressed.insert(key);
                true
            }
            None => false,
        }
    }

    /// Record a key release. Returns whether it mapped.
    pub fn key_up(&mut self, dom_key: &str) -> bool {
        match Key::from_dom_key(dom_key) {
            Some(key) => {
                self.pressed.remove(&key);
                true
            }
            None => false,
        }
    }

    pub fn is_pressed(&self, key: Key) -> bool {
        self.pressed.contains(&key)
    }

    pub fn pointer_locked(&self) -> bool {
        self.pointer_locked
    }

    /// Pointer capture engaged or lost. Pending motion is dropped on release.
    pub fn set_pointer_locked(&mut self, locked: bool) {
        self.pointer_locked = locked;
        if !locked {
            self.mouse_delta = Vec2::ZERO;
        }
    }

    /// Accumulate relative motion; ignored unless pointer capture is active
    pub fn add_mouse_motion(&mut self, dx: f32, dy: f32) {
        if self.pointer_locked && dx.is_finite() && dy.is_finite() {
            self.mouse_delta += Vec2::new(dx, dy);
        }
    }

    /// Pending (not yet consumed) relative motion
    pub fn pending_mouse_delta(&self) -> Vec2 {
        self.mouse_delta
    }

    /// A new finger replaces any stale target
    pub fn touch_start(&mut self, x: f32, y: f32) {
        if self.touch_target.is_some() {
            log::debug!("Touch restarted before touchend");
        }
        self.touch_target = Some(Vec2::new(x, y));
    }

    pub fn touch_move(&mut self, x: f32, y: f32) {
        self.touch_target = Some(Vec2::new(x, y));
    }

    pub fn touch_end(&mut self) {
        self.touch_target = None;
    }

    /// Snapshot for one tick. The mouse accumulator is drained exactly here.
    pub fn take_tick_input(&mut self) -> TickInput {
        let axis = |neg: Key, pos: Key| -> f32 {
            (self.is_pressed(pos) as i32 - self.is_pressed(neg) as i32) as f32
        };
        let keyboard = Vec2::new(axis(Key::Left, Key::Right), axis(Key::Up, Key::Down));

        let mouse_delta = if self.pointer_locked {
            Some(std::mem::take(&mut self.mouse_delta))
        } else {
            None
        };

        TickInput {
            keyboard,
            mouse_delta,
            touch_target: self.touch_target,
            boost: self.is_pressed(Key::Boost),
        }
    }

    /// Forget everything (restart)
    pub fn clear(&mut self) {
        let locked = self.pointer_locked;
        *self = Self::default();
        // Pointer lock belongs to the browser, not the session
        self.pointer_locked = locked;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrows_and_wasd_share_directions() {
        assert_eq!(Key::from_dom_key("ArrowLeft"), Some(Key::Left));
        assert_eq!(Key::from_dom_key("a"), Some(Key::Left));
        assert_eq!(Key::from_dom_key("A"), Some(Key::Left));
        assert_eq!(Key::from_dom_key("Enter"), None);
    }

    #[test]
    fn test_keyboard_axes() {
        let mut input = InputState::new();
        input.key_down("ArrowRight");
        input.key_down("w");
        let tick = input.take_tick_input();
        assert_eq!(tick.keyboard, Vec2::new(1.0, -1.0));

        let dir = tick.keyboard_dir();
        assert!((dir.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_opposite_keys_cancel() {
        let mut input = InputState::new();
        input.key_down("ArrowUp");
        input.key_down("s");
        let tick = input.take_tick_input();
        assert_eq!(tick.keyboard_dir(), Vec2::ZERO);
    }

    #[test]
    fn test_key_release() {
        let mut input = InputState::new();
        input.key_down("d");
        input.key_up("ArrowRight");
        assert!(!input.is_pressed(Key::Right));
    }

    #[test]
    fn test_mouse_motion_requires_lock() {
        let mut input = InputState::new();
        input.add_mouse_motion(5.0, 0.0);
        assert_eq!(input.pending_mouse_delta(), Vec2::ZERO);
        assert_eq!(input.take_tick_input().mouse_delta, None);

        input.set_pointer_locked(true);
        input.add_mouse_motion(5.0, 0.0);
        input.add_mouse_motion(1.0, 2.0);
        assert_eq!(input.pending_mouse_delta(), Vec2::new(6.0, 2.0));
    }

    #[test]
    fn test_mouse_delta_consumed_once() {
        let mut input = InputState::new();
        input.set_pointer_locked(true);
        input.add_mouse_motion(3.0, 4.0);

        let first = input.take_tick_input();
        assert_eq!(first.mouse_delta, Some(Vec2::new(3.0, 4.0)));

        let second = input.take_tick_input();
        assert_eq!(second.mouse_delta, Some(Vec2::ZERO));
    }

    #[test]
    fn test_unlock_discards_pending_motion() {
        let mut input = InputState::new();
        input.set_pointer_locked(true);
        input.add_mouse_motion(3.0, 4.0);
        input.set_pointer_locked(false);
        input.set_pointer_locked(true);
        assert_eq!(input.pending_mouse_delta(), Vec2::ZERO);
    }

    #[test]
    fn test_touch_lifecycle() {
        let mut input = InputState::new();
        input.touch_start(10.0, 20.0);
        input.touch_move(30.0, 40.0);
        assert_eq!(input.take_tick_input().touch_target, Some(Vec2::new(30.0, 40.0)));
        input.touch_end();
        assert_eq!(input.take_tick_input().touch_target, None);
    }

    #[test]
    fn test_touch_start_replaces_stale_target() {
        let mut input = InputState::new();
        input.touch_start(10.0, 20.0);
        input.touch_start(50.0, 60.0);
        assert_eq!(input.take_tick_input().touch_target, Some(Vec2::new(50.0, 60.0)));
    }

    #[test]
    fn test_clear_keeps_pointer_lock() {
        let mut input = InputState::new();
        input.set_pointer_locked(true);
        input.key_down("Shift");
        input.clear();
        assert!(input.pointer_locked());
        assert!(!input.is_pressed(Key::Boost));
    }
}
