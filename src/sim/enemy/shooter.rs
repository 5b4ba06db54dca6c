//! Shooter: a patroller that plants itself and fires two-shot bursts with
//! a linear lead on the player

use glam::Vec2;

use super::{Body, ProjectileSpawn, WorldView, walk};
use crate::direction_to;
use crate::sim::state::ShooterState;

pub const PATROL_SPEED: f32 = 1.8;
pub const FIRE_RANGE: f32 = 450.0;
/// Inside this distance the shooter keeps walking instead of planting
pub const MELEE_RANGE: f32 = 100.0;
pub const BRAKE: f32 = 0.8;

pub const SHOT_SPEED: f32 = 6.0;
pub const SHOT_LIFT: f32 = 3.0;
pub const SHOTS_PER_BURST: u32 = 2;
pub const BURST_RELOAD_TICKS: u32 = 25;
pub const BURST_COOLDOWN_TICKS: u32 = 180;

pub fn update(state: &mut ShooterState, body: &mut Body, view: &WorldView) -> Vec<ProjectileSpawn> {
    let player = view.player_pos;
    let distance = (player.x - body.pos.x).abs();
    let in_range = distance < FIRE_RANGE;

    if in_range && distance > MELEE_RANGE {
        body.vel.x *= BRAKE;
    } else {
        if body.vel.x.abs() < PATROL_SPEED * 0.5 {
            body.vel.x = if body.vel.x >= 0.0 {
                PATROL_SPEED
            } else {
                -PATROL_SPEED
            };
        }
        walk(body, state.bounds, view);
    }

    let mut spawns = Vec::new();
    if state.attack_cooldown == 0 && in_range {
        spawns.push(ProjectileSpawn {
            pos: body.muzzle(),
            vel: aim(*body.pos, player, view.player_vel, distance),
            damage: 1,
        });

        state.burst_count += 1;
        if state.burst_count >= SHOTS_PER_BURST {
            state.attack_cooldown = BURST_COOLDOWN_TICKS;
            state.burst_count = 0;
        } else {
            state.attack_cooldown = BURST_RELOAD_TICKS;
        }
    } else {
        state.attack_cooldown = state.attack_cooldown.saturating_sub(1);
    }

    spawns
}

/// Shot velocity leading the target by its current velocity
fn aim(from: Vec2, target: Vec2, target_vel: Vec2, distance: f32) -> Vec2 {
    let time_to_hit = distance / SHOT_SPEED;
    let predicted = Vec2::new(
        target.x + target_vel.x * time_to_hit,
        target.y + target_vel.y * time_to_hit * 0.5,
    );

    let angle = (predicted.y - from.y).atan2((predicted.x - from.x).abs());
    let lift = angle.sin() * SHOT_LIFT;
    let vy = if lift.is_finite() {
        lift
    } else {
        log::warn!("Non-finite shooter aim toward {predicted:?}; firing level");
        0.0
    };

    Vec2::new(direction_to(from.x, predicted.x) * SHOT_SPEED, vy)
}
