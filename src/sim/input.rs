//! Per-tick input snapshot
//!
//! The host keeps a set of held keys; [`InputLatch`] turns that into the
//! edge-triggered intents the tick consumes. Holding jump or fire never
//! re-triggers: a fresh press is needed.

use serde::{Deserialize, Serialize};

/// Keys currently held, as sampled by the host
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyState {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    pub fire: bool,
    pub pause: bool,
}

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    /// Move left (held)
    pub left: bool,
    /// Move right (held)
    pub right: bool,
    /// Jump was pressed since the previous tick
    pub jump_pressed: bool,
    /// Fire was pressed since the previous tick
    pub fire_pressed: bool,
    /// Pause toggle
    pub pause_pressed: bool,
}

impl TickInput {
    /// Horizontal intent: -1, 0 or 1. Opposite keys cancel.
    pub fn axis(&self) -> f32 {
        match (self.left, self.right) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        }
    }
}

/// Edge detector over successive [`KeyState`] samples
#[derive(Debug, Clone, Copy, Default)]
pub struct InputLatch {
    prev: KeyState,
}

impl InputLatch {
    pub fn latch(&mut self, keys: KeyState) -> TickInput {
        let input = TickInput {
            left: keys.left,
            right: keys.right,
            jump_pressed: keys.jump && !self.prev.jump,
            fire_pressed: keys.fire && !self.prev.fire,
            pause_pressed: keys.pause && !self.prev.pause,
        };
        self.prev = keys;
        input
    }

    /// Forget held keys (e.g. after a restart)
    pub fn reset(&mut self) {
        self.prev = KeyState::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_held_jump_triggers_once() {
        let mut latch = InputLatch::default();
        let held = KeyState {
            jump: true,
            ..Default::default()
        };
        assert!(latch.latch(held).jump_pressed);
        assert!(!latch.latch(held).jump_pressed);
        assert!(!latch.latch(held).jump_pressed);
        latch.latch(KeyState::default());
        assert!(latch.latch(held).jump_pressed);
    }

    #[test]
    fn test_movement_is_level_triggered() {
        let mut latch = InputLatch::default();
        let keys = KeyState {
            right: true,
            ..Default::default()
        };
        assert_eq!(latch.latch(keys).axis(), 1.0);
        assert_eq!(latch.latch(keys).axis(), 1.0);
    }

    #[test]
    fn test_opposite_keys_cancel() {
        let input = TickInput {
            left: true,
            right: true,
            ..Default::default()
        };
        assert_eq!(input.axis(), 0.0);
    }

    #[test]
    fn test_reset_rearms_edges() {
        let mut latch = InputLatch::default();
        let keys = KeyState {
            fire: true,
            pause: true,
            ..Default::default()
        };
        latch.latch(keys);
        latch.reset();
        let input = latch.latch(keys);
        assert!(input.fire_pressed);
        assert!(input.pause_pressed);
    }
}
