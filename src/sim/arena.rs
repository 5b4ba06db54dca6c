//! Boss arena gate
//!
//! Crossing the trigger seals the arena once; defeating the boss drops the
//! walls for good. Walls are ordinary `ArenaWall` platforms whose solidity
//! is decided here.

use serde::{Deserialize, Serialize};

use super::level::ArenaSpec;
use super::state::{Platform, PlatformKind};
use crate::consts::{ARENA_WALL_WIDTH, FALL_LIMIT};

/// Top of generated walls; high enough that no jump clears them
const WALL_TOP: f32 = -400.0;

/// Transition reported by [`ArenaGate::update`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateTransition {
    Sealed,
    Opened,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArenaGate {
    pub start_x: f32,
    pub end_x: f32,
    pub trigger_x: f32,
    /// Set once the player crosses the trigger; never cleared
    pub active: bool,
    /// Set once the boss falls; walls are gone for good
    pub cleared: bool,
}

impl ArenaGate {
    pub fn new(spec: ArenaSpec) -> Self {
        Self {
            start_x: spec.start_x,
            end_x: spec.end_x,
            trigger_x: spec.trigger_x,
            active: false,
            cleared: false,
        }
    }

    /// Wall platforms bounding `[start_x, end_x]`
    pub fn walls(&self) -> [Platform; 2] {
        let height = FALL_LIMIT - WALL_TOP;
        [
            Platform::new(
                self.start_x - ARENA_WALL_WIDTH,
                WALL_TOP,
                ARENA_WALL_WIDTH,
                height,
                PlatformKind::ArenaWall,
            ),
            Platform::new(
                self.end_x,
                WALL_TOP,
                ARENA_WALL_WIDTH,
                height,
                PlatformKind::ArenaWall,
            ),
        ]
    }

    /// Whether wall platforms take part in collision and drawing
    #[inline]
    pub fn walls_solid(&self) -> bool {
        self.active && !self.cleared
    }

    /// Horizontal range the boss is confined to
    pub fn bounds(&self) -> (f32, f32) {
        (self.start_x, self.end_x)
    }

    pub fn update(&mut self, player_x: f32, boss_alive: bool) -> Option<GateTransition> {
        if !boss_alive && !self.cleared {
            self.cleared = true;
            // Only worth announcing if the walls were actually up
            return self.active.then_some(GateTransition::Opened);
        }
        if !self.active && !self.cleared && player_x > self.trigger_x {
            self.active = true;
            return Some(GateTransition::Sealed);
        }
        None
    }
}

/// Whether wall platforms are solid for an optional gate
pub fn walls_solid(gate: Option<&ArenaGate>) -> bool {
    gate.is_some_and(ArenaGate::walls_solid)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gate() -> ArenaGate {
        ArenaGate::new(ArenaSpec {
            start_x: 1800.0,
            end_x: 2600.0,
            trigger_x: 1900.0,
        })
    }

    #[test]
    fn test_inactive_until_trigger() {
        let mut gate = gate();
        assert_eq!(gate.update(1850.0, true), None);
        assert!(!gate.active);
        assert!(!gate.walls_solid());
    }

    #[test]
    fn test_activation_is_one_shot() {
        let mut gate = gate();
        assert_eq!(gate.update(1901.0, true), Some(GateTransition::Sealed));
        assert!(gate.walls_solid());
        // Retreating behind the trigger does not reopen
        assert_eq!(gate.update(1500.0, true), None);
        assert!(gate.active);
        assert_eq!(gate.update(1950.0, true), None);
    }

    #[test]
    fn test_boss_defeat_drops_walls_for_good() {
        let mut gate = gate();
        gate.update(1950.0, true);
        assert_eq!(gate.update(2000.0, false), Some(GateTransition::Opened));
        assert!(gate.active);
        assert!(!gate.walls_solid());
        assert_eq!(gate.update(2000.0, false), None);
    }

    #[test]
    fn test_boss_dead_before_trigger_never_seals() {
        let mut gate = gate();
        assert_eq!(gate.update(100.0, false), None);
        assert_eq!(gate.update(2000.0, false), None);
        assert!(!gate.walls_solid());
    }

    #[test]
    fn test_walls_frame_the_arena() {
        let [left, right] = gate().walls();
        assert_eq!(left.x + left.width, 1800.0);
        assert_eq!(right.x, 2600.0);
        assert_eq!(left.kind, PlatformKind::ArenaWall);
        assert!(left.y + left.height >= FALL_LIMIT);
    }
}
