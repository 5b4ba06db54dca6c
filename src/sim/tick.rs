//! Fixed timestep simulation tick
//!
//! Core game loop that advances the world deterministically. Stages run in a
//! fixed order and later stages read what earlier ones wrote: player
//! physics and collision, enemy behavior, contacts, projectiles, power-ups,
//! camera, arena gate, goal.

use super::arena::GateTransition;
use super::collision::{self, Solid};
use super::enemy::{self, ProjectileSpawn, WorldView};
use super::event::GameEvent;
use super::input::TickInput;
use super::physics;
use super::powerup;
use super::projectile;
use super::state::{Behavior, EntityId, Facing, HitOutcome, SessionPhase, World};

/// Advance the world by one tick. Returns the events raised, in order.
pub fn tick(world: &mut World, input: &TickInput) -> Vec<GameEvent> {
    let mut events = Vec::new();

    // Handle pause toggle
    if input.pause_pressed {
        match world.phase {
            SessionPhase::Playing => {
                world.phase = SessionPhase::Paused;
                events.push(GameEvent::Paused);
                return events;
            }
            SessionPhase::Paused => {
                world.phase = SessionPhase::Playing;
                events.push(GameEvent::Resumed);
            }
            _ => {}
        }
    }

    // Don't tick if paused or the level is over
    if world.phase != SessionPhase::Playing {
        return events;
    }

    world.time_ticks += 1;
    let solids = collision::solids(&world.platforms, world.time_ticks, world.walls_solid());

    update_player(world, input, &solids);
    if world.player.pos.y > world.tuning.fall_limit {
        end_run(world, &mut events, "fell out of the level");
        return events;
    }

    let spawns = update_enemies(world, &solids);
    projectile::spawn_hostile(world, spawns);

    enemy_contacts(world, &mut events);
    update_projectiles(world, &mut events);
    if world.player.is_dead() {
        end_run(world, &mut events, "ran out of health");
        return events;
    }

    // Power-ups
    powerup::tick_buffs(&mut world.player);
    for (id, kind) in powerup::collect(&mut world.power_ups, &mut world.player, &world.tuning) {
        log::debug!("Collected {kind:?} ({id})");
        events.push(GameEvent::PowerUpCollected { id, kind });
    }

    world
        .camera
        .follow(world.player.pos.x, world.level_width, &world.tuning);

    // Arena gate
    let boss_alive = world.boss_alive();
    if let Some(gate) = &mut world.gate {
        match gate.update(world.player.pos.x, boss_alive) {
            Some(GateTransition::Sealed) => {
                log::info!("Arena sealed [{:.0}, {:.0}]", gate.start_x, gate.end_x);
                events.push(GameEvent::ArenaSealed);
            }
            Some(GateTransition::Opened) => {
                log::info!("Arena opened");
                events.push(GameEvent::ArenaOpened);
            }
            None => {}
        }
    }

    // Goal
    let at_goal = world
        .goal
        .is_some_and(|goal| world.player.rect().intersects(&goal));
    if !boss_alive && at_goal {
        let (progression, currency) = (world.player.progression, world.player.currency);
        world.phase = SessionPhase::LevelComplete;
        log::info!(
            "Level {} complete at tick {} (progression {progression}, currency {currency})",
            world.level_id,
            world.time_ticks
        );
        events.push(GameEvent::LevelComplete {
            progression,
            currency,
        });
    }

    events
}

/// Intent, integration and collision for the player
fn update_player(world: &mut World, input: &TickInput, solids: &[Solid]) {
    let tuning = &world.tuning;
    let player = &mut world.player;
    let buffed = player.speed_buffed();

    let axis = input.axis();
    if axis < 0.0 {
        player.facing = Facing::Left;
    } else if axis > 0.0 {
        player.facing = Facing::Right;
    }
    player.vel.x = axis * tuning.run_speed(buffed, player.modifiers.speed_multiplier);

    player.invincible_ticks = player.invincible_ticks.saturating_sub(1);
    player.fire_cooldown = player.fire_cooldown.saturating_sub(1);

    if input.jump_pressed {
        let impulse = tuning.jump_impulse(buffed, player.modifiers.jump_multiplier);
        if player.grounded {
            player.vel.y = impulse;
            player.grounded = false;
            player.jumping = true;
        } else if player.modifiers.can_double_jump && !player.double_jumped {
            player.vel.y = impulse * tuning.double_jump_factor;
            player.double_jumped = true;
        }
    }

    let prev = player.rect();
    physics::integrate(
        &mut player.pos,
        &mut player.vel,
        tuning.gravity,
        player.modifiers.gravity_multiplier,
    );
    physics::clamp_to_level(&mut player.pos, player.size.x, world.level_width);
    let contact = collision::resolve_platforms(
        &mut player.pos,
        &mut player.vel,
        player.size,
        prev,
        solids,
        tuning.landing_tolerance,
    );
    player.grounded = contact.grounded;
    if contact.grounded {
        player.jumping = false;
        player.double_jumped = false;
    }

    if input.fire_pressed && player.ranged_unlocked && player.fire_cooldown == 0 {
        player.fire_cooldown = player.modifiers.fire_cooldown_ticks;
        projectile::fire_player_shot(world);
    }
}

fn update_enemies(world: &mut World, solids: &[Solid]) -> Vec<ProjectileSpawn> {
    let view = WorldView {
        player_pos: world.player.pos,
        player_vel: world.player.vel,
        player_size: world.player.size,
        solids,
        tick: world.time_ticks,
        level_width: world.level_width,
        gravity: world.tuning.gravity,
        landing_tolerance: world.tuning.landing_tolerance,
        fall_limit: world.tuning.fall_limit,
        arena: world.gate.map(|g| g.bounds()),
    };

    let mut spawns = Vec::new();
    for e in &mut world.enemies {
        spawns.extend(enemy::update(e, &view, &mut world.rng));
    }
    spawns
}

/// Body contact between the player and live enemies: stomps from above,
/// damage otherwise
fn enemy_contacts(world: &mut World, events: &mut Vec<GameEvent>) {
    let tuning = &world.tuning;
    let player = &mut world.player;

    for e in world
        .enemies
        .iter_mut()
        .filter(|e| e.alive && !matches!(e.behavior, Behavior::Inert))
    {
        let body = player.rect();
        let target = e.rect();
        if !body.intersects(&target) {
            continue;
        }

        let stomp = player.vel.y > 0.0 && body.bottom() < target.y + target.h / 2.0;
        if stomp {
            // Clear of the target so a surviving boss is not touched again
            player.pos.y = target.y - player.size.y;
            player.vel.y = tuning.jump_force / 2.0;
            let outcome = e.take_hit(1);
            record_hit(e.id, outcome, events);
        } else if player.take_damage(1, tuning.invincibility_ticks) {
            log::debug!("Player hit by {}; health {}", e.id, player.health);
            events.push(GameEvent::PlayerHurt {
                health: player.health,
            });
        }
    }
}

fn update_projectiles(world: &mut World, events: &mut Vec<GameEvent>) {
    projectile::advance(&mut world.player_projectiles);
    projectile::advance(&mut world.hostile_projectiles);

    for (id, outcome) in projectile::hit_enemies(&mut world.player_projectiles, &mut world.enemies) {
        record_hit(id, outcome, events);
    }
    if projectile::hit_player(&mut world.hostile_projectiles, &mut world.player, &world.tuning) {
        log::debug!("Player shot; health {}", world.player.health);
        events.push(GameEvent::PlayerHurt {
            health: world.player.health,
        });
    }

    projectile::cull(&mut world.player_projectiles, world.camera.x, &world.tuning);
    projectile::cull(&mut world.hostile_projectiles, world.camera.x, &world.tuning);
}

fn record_hit(id: EntityId, outcome: HitOutcome, events: &mut Vec<GameEvent>) {
    match outcome {
        HitOutcome::Defeated => {
            log::debug!("Enemy {id} defeated");
            events.push(GameEvent::EnemyDefeated { id });
        }
        HitOutcome::BossDefeated => {
            log::info!("Boss {id} defeated");
            events.push(GameEvent::EnemyDefeated { id });
            events.push(GameEvent::BossDefeated);
        }
        HitOutcome::Damaged | HitOutcome::Ignored => {}
    }
}

fn end_run(world: &mut World, events: &mut Vec<GameEvent>, reason: &str) {
    world.phase = SessionPhase::GameOver;
    log::info!(
        "Game over on level {} at tick {}: player {reason}",
        world.level_id,
        world.time_ticks
    );
    events.push(GameEvent::GameOver);
}
