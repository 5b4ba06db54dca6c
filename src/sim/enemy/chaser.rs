//! Chaser: falls and lands like the player, pursues inside its aggro
//! radius with a short dash and platform-reaching jumps

use rand::Rng;

use super::{Body, EDGE_SLACK, SUPPORT_SLACK, WorldView};
use crate::Rect;
use crate::direction_to;
use crate::sim::collision;
use crate::sim::physics;
use crate::sim::state::ChaserState;

pub const CHASE_SPEED: f32 = 4.5;
pub const CHASE_ACCEL: f32 = 0.3;
pub const CHASE_DAMPING: f32 = 0.9;
pub const PATROL_SPEED: f32 = 1.2;

/// Horizontal distance band in which a grounded chaser dashes
pub const DASH_MIN: f32 = 30.0;
pub const DASH_MAX: f32 = 80.0;
pub const DASH_FACTOR: f32 = 2.5;
pub const DASH_COOLDOWN_TICKS: u32 = 120;

pub const JUMP_FORCE: f32 = -13.0;
pub const JUMP_COOLDOWN_TICKS: u32 = 60;
/// How far above the chaser the player must be to be chased upward
pub const PLAYER_ABOVE_MARGIN: f32 = 40.0;

pub fn update(state: &mut ChaserState, body: &mut Body, view: &WorldView, rng: &mut impl Rng) {
    let player = view.player_pos;
    state.is_aggro = player.distance(*body.pos) < state.aggro_radius;

    state.dash_cooldown = state.dash_cooldown.saturating_sub(1);
    state.jump_cooldown = state.jump_cooldown.saturating_sub(1);

    let grounded = *body.grounded;
    let dir = direction_to(body.pos.x, player.x);

    if state.is_aggro {
        let dx = (player.x - body.pos.x).abs();
        if grounded && state.dash_cooldown == 0 && dx > DASH_MIN && dx < DASH_MAX {
            body.vel.x = dir * CHASE_SPEED * DASH_FACTOR;
            state.dash_cooldown = DASH_COOLDOWN_TICKS;
        } else if player.x > body.pos.x + body.size.x {
            body.vel.x = (body.vel.x + CHASE_ACCEL).min(CHASE_SPEED);
        } else if player.x + view.player_size.x < body.pos.x {
            body.vel.x = (body.vel.x - CHASE_ACCEL).max(-CHASE_SPEED);
        } else {
            body.vel.x *= CHASE_DAMPING;
        }

        if grounded && state.jump_cooldown == 0 {
            let player_above = player.y < body.pos.y - PLAYER_ABOVE_MARGIN;
            let obstacle =
                collision::obstacle_ahead(body.rect(), dir, view.solids, view.landing_tolerance);
            if player_above || obstacle {
                let scale = if player_above { 1.1 } else { 0.9 };
                body.vel.y = JUMP_FORCE * scale;
                state.jump_cooldown = JUMP_COOLDOWN_TICKS;
            }
        }
    } else {
        if body.vel.x.abs() < 0.5 {
            body.vel.x = if rng.random_bool(0.5) {
                PATROL_SPEED
            } else {
                -PATROL_SPEED
            };
        }
        if grounded {
            let ahead = Rect::from_pos_size(*body.pos + glam::Vec2::new(body.vel.x, 0.0), body.size);
            if !collision::is_supported(ahead, view.solids, EDGE_SLACK, SUPPORT_SLACK) {
                body.vel.x = -body.vel.x;
            }
        }
    }

    let prev = body.rect();
    physics::integrate(body.pos, body.vel, view.gravity, 1.0);
    let contact = collision::resolve_platforms(
        body.pos,
        body.vel,
        body.size,
        prev,
        view.solids,
        view.landing_tolerance,
    );
    *body.grounded = contact.grounded;
    if contact.wall && !state.is_aggro {
        body.vel.x = -body.vel.x;
    }
    physics::clamp_to_level(body.pos, body.size.x, view.level_width);

    if body.pos.y > view.fall_limit {
        *body.alive = false;
        log::debug!("Chaser fell out of the level at x={:.0}", body.pos.x);
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::super::update as update_enemy;
    use crate::sim::state::{Behavior, ChaserState, EnemyVariant};
    use glam::Vec2;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn chaser(x: f32, radius: f32) -> crate::sim::state::Enemy {
        let mut enemy = enemy(EnemyVariant::Chaser, x, 480.0);
        if let Behavior::Chaser(state) = &mut enemy.behavior {
            state.aggro_radius = radius;
        }
        enemy
    }

    fn state(enemy: &crate::sim::state::Enemy) -> &ChaserState {
        match &enemy.behavior {
            Behavior::Chaser(state) => state,
            other => panic!("not a chaser: {other:?}"),
        }
    }

    #[test]
    fn test_aggro_switches_on_inside_radius() {
        let solids = ground();
        let mut rng = Pcg32::seed_from_u64(7);

        let mut enemy = chaser(500.0, 250.0);
        update_enemy(&mut enemy, &view(Vec2::new(760.0, 480.0), &solids), &mut rng);
        assert!(!state(&enemy).is_aggro);

        // Next tick the player is 240 away from wherever the chaser now stands
        let player = Vec2::new(enemy.pos.x + 240.0, enemy.pos.y);
        update_enemy(&mut enemy, &view(player, &solids), &mut rng);
        assert!(state(&enemy).is_aggro);
    }

    #[test]
    fn test_lands_and_stays_grounded() {
        let solids = ground();
        let mut rng = Pcg32::seed_from_u64(7);
        let mut enemy = chaser(500.0, 250.0);
        for _ in 0..10 {
            update_enemy(&mut enemy, &view(Vec2::new(1500.0, 456.0), &solids), &mut rng);
        }
        assert!(enemy.grounded);
        assert_eq!(enemy.pos.y, 480.0);
    }

    #[test]
    fn test_accelerates_toward_player_up_to_cap() {
        let solids = ground();
        let mut rng = Pcg32::seed_from_u64(7);
        let mut enemy = chaser(500.0, 300.0);
        enemy.vel.x = 0.0;
        let player = Vec2::new(700.0, 456.0);
        update_enemy(&mut enemy, &view(player, &solids), &mut rng);
        assert!((enemy.vel.x - 0.3).abs() < 1e-5);
        for _ in 0..30 {
            update_enemy(&mut enemy, &view(player, &solids), &mut rng);
            assert!(enemy.vel.x <= 4.5 * 2.5 + 1e-4);
        }
        assert!(enemy.pos.x > 500.0);
    }

    #[test]
    fn test_jumps_when_player_above() {
        let solids = ground();
        let mut rng = Pcg32::seed_from_u64(7);
        let mut enemy = chaser(500.0, 300.0);
        enemy.grounded = true;
        update_enemy(&mut enemy, &view(Vec2::new(520.0, 300.0), &solids), &mut rng);
        // Jump impulse plus one tick of gravity
        assert!((enemy.vel.y - (-13.0 * 1.1 + 0.6)).abs() < 1e-4);
        assert_eq!(state(&enemy).jump_cooldown, 60);
    }

    #[test]
    fn test_jumps_lower_for_obstacle_ahead() {
        let mut solids = ground();
        solids.push(crate::sim::collision::Solid {
            rect: crate::Rect::new(600.0, 440.0, 200.0, 80.0),
            blocks_sides: true,
        });
        let mut rng = Pcg32::seed_from_u64(7);
        let mut enemy = chaser(500.0, 300.0);
        enemy.grounded = true;
        // Player level with the chaser, beyond the wall and the dash band
        update_enemy(&mut enemy, &view(Vec2::new(700.0, 480.0), &solids), &mut rng);
        assert!((enemy.vel.y - (-13.0 * 0.9 + 0.6)).abs() < 1e-4);
        assert_eq!(state(&enemy).jump_cooldown, 60);
    }

    #[test]
    fn test_patrol_turns_at_wall() {
        let mut solids = ground();
        solids.push(crate::sim::collision::Solid {
            rect: crate::Rect::new(550.0, 300.0, 50.0, 220.0),
            blocks_sides: true,
        });
        let mut rng = Pcg32::seed_from_u64(7);
        let mut enemy = chaser(500.0, 100.0);
        enemy.grounded = true;
        enemy.vel.x = 3.0;
        update_enemy(&mut enemy, &view(Vec2::new(1500.0, 456.0), &solids), &mut rng);
        assert_eq!(enemy.pos.x, 550.0 - 48.0);
        assert!(enemy.vel.x < 0.0);
    }

    #[test]
    fn test_dash_in_close_band() {
        let solids = ground();
        let mut rng = Pcg32::seed_from_u64(7);
        let mut enemy = chaser(500.0, 300.0);
        enemy.grounded = true;
        update_enemy(&mut enemy, &view(Vec2::new(560.0, 480.0), &solids), &mut rng);
        assert!((enemy.vel.x - 11.25).abs() < 1e-4);
        assert_eq!(state(&enemy).dash_cooldown, 120);
    }

    #[test]
    fn test_dies_below_fall_limit() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut enemy = chaser(500.0, 100.0);
        enemy.pos.y = 640.0;
        enemy.vel.y = 12.0;
        update_enemy(&mut enemy, &view(Vec2::new(1500.0, 456.0), &[]), &mut rng);
        assert!(!enemy.alive);
    }
}
