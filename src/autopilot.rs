//! Demo input for headless runs
//!
//! Plays from the published snapshot only, the way a human would from the
//! screen: run right, hop gaps, walls and enemies, shoot what is ahead.

use crate::sim::input::KeyState;
use crate::sim::snapshot::Snapshot;
use crate::sim::state::PlatformKind;

/// How far ahead of the player's front edge to look for trouble
const LOOK_AHEAD: f32 = 40.0;
/// Distance at which an enemy in front is worth jumping over
const HOP_RANGE: f32 = 110.0;
/// Distance at which an enemy in front is worth shooting
const FIRE_RANGE: f32 = 420.0;
/// Vertical band around the player's feet counted as "in the way"
const LANE_HEIGHT: f32 = 70.0;

#[derive(Debug, Default)]
pub struct Autopilot {
    jump_held: bool,
    fire_held: bool,
}

impl Autopilot {
    pub fn keys(&mut self, snapshot: &Snapshot) -> KeyState {
        let player = &snapshot.player;
        let front = player.pos.x + player.size.x;
        let feet = player.pos.y + player.size.y;

        let ground_ahead = snapshot.platforms.iter().any(|p| {
            let ahead = front + LOOK_AHEAD;
            p.x <= ahead && ahead <= p.x + p.width && p.y >= feet - 1.0
        });
        let wall_ahead = snapshot.platforms.iter().any(|p| {
            p.kind != PlatformKind::Platform
                && p.kind != PlatformKind::Glass
                && p.x >= front
                && p.x - front < LOOK_AHEAD
                && p.y < feet - 10.0
        });

        let nearest_enemy = snapshot
            .enemies
            .iter()
            .filter(|e| e.pos.x + e.size.x > player.pos.x)
            .filter(|e| (e.pos.y + e.size.y - feet).abs() < LANE_HEIGHT)
            .map(|e| e.pos.x - front)
            .fold(f32::INFINITY, f32::min);

        let want_jump = player.grounded
            && (!ground_ahead || wall_ahead || nearest_enemy < HOP_RANGE);
        let want_fire = player.ranged_unlocked && nearest_enemy < FIRE_RANGE;

        // Release between presses so each press is a fresh edge
        let jump = want_jump && !self.jump_held;
        let fire = want_fire && !self.fire_held;
        self.jump_held = jump;
        self.fire_held = fire;

        KeyState {
            left: false,
            right: true,
            jump,
            fire,
            pause: false,
        }
    }
}
