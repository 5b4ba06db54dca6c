//! Projectile manager
//!
//! Player and hostile shots share one update law: advance, test against the
//! opposing side, cull outside the camera window. Spawns requested by enemy
//! AI are turned into projectiles here.

use glam::Vec2;

use super::enemy::ProjectileSpawn;
use super::state::{Enemy, EntityId, EntityKind, HitOutcome, Player, Projectile, Side, World};
use crate::tuning::Tuning;

/// Player shot leaving the front of the player at mid-height
pub fn fire_player_shot(world: &mut World) {
    let id = world.next_entity_id(EntityKind::Projectile);
    let player = &world.player;
    let dir = player.facing.sign();
    let front = if dir > 0.0 { player.size.x } else { 0.0 };
    world.player_projectiles.push(Projectile {
        id,
        pos: Vec2::new(player.pos.x + front, player.pos.y + player.size.y / 2.0),
        vel: Vec2::new(dir * world.tuning.projectile_speed, 0.0),
        owner: Side::Player,
        active: true,
        damage: 1,
    });
}

/// Turn enemy spawn requests into hostile projectiles, in request order
pub fn spawn_hostile(world: &mut World, spawns: Vec<ProjectileSpawn>) {
    for spawn in spawns {
        let id = world.next_entity_id(EntityKind::Projectile);
        world.hostile_projectiles.push(Projectile {
            id,
            pos: spawn.pos,
            vel: spawn.vel,
            owner: Side::Hostile,
            active: true,
            damage: spawn.damage,
        });
    }
}

pub fn advance(projectiles: &mut [Projectile]) {
    for projectile in projectiles.iter_mut().filter(|p| p.active) {
        projectile.pos += projectile.vel;
    }
}

/// Resolve player shots against live enemies. Each shot hits at most one
/// enemy, the first in spawn order.
pub fn hit_enemies(projectiles: &mut [Projectile], enemies: &mut [Enemy]) -> Vec<(EntityId, HitOutcome)> {
    let mut hits = Vec::new();
    for projectile in projectiles.iter_mut().filter(|p| p.active) {
        let hitbox = projectile.hitbox();
        if let Some(enemy) = enemies
            .iter_mut()
            .find(|e| e.alive && e.rect().intersects(&hitbox))
        {
            projectile.active = false;
            hits.push((enemy.id, enemy.take_hit(projectile.damage)));
        }
    }
    hits
}

/// Resolve hostile shots against the player. Shots pass through an
/// invincible player. Returns true if the player lost health.
pub fn hit_player(projectiles: &mut [Projectile], player: &mut Player, tuning: &Tuning) -> bool {
    let mut hurt = false;
    let body = player.rect();
    for projectile in projectiles.iter_mut().filter(|p| p.active) {
        if player.invincible() || player.is_dead() {
            break;
        }
        if projectile.hitbox().intersects(&body) {
            projectile.active = false;
            hurt |= player.take_damage(projectile.damage, tuning.invincibility_ticks);
        }
    }
    hurt
}

/// Drop spent shots and those outside `[camera_x - behind, camera_x + ahead]`
/// or below the fall limit
pub fn cull(projectiles: &mut Vec<Projectile>, camera_x: f32, tuning: &Tuning) {
    let min_x = camera_x - tuning.cull_behind;
    let max_x = camera_x + tuning.cull_ahead;
    projectiles.retain(|p| {
        p.active && p.pos.x >= min_x && p.pos.x <= max_x && p.pos.y <= tuning.fall_limit
    });
}
