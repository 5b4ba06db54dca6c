//! Boss: three-phase arena fight
//!
//! Phase follows remaining health and only ever escalates. Each phase has
//! its own movement pattern; damage forces a short retreat that overrides
//! it. Attacks are fans whose width and speed grow with the phase, plus a
//! rain volley in the last phase.

use glam::Vec2;
use rand::Rng;

use super::{Body, ProjectileSpawn, WorldView};
use crate::direction_to;
use crate::sim::state::{BossPhase, BossState};

pub const BASE_SPEED: f32 = 1.5;
pub const SPEED_PER_PHASE: f32 = 0.7;

/// Phase 1: approach beyond this distance
pub const APPROACH_DISTANCE: f32 = 200.0;
/// Phase 1: back off inside this distance
pub const BACKOFF_DISTANCE: f32 = 100.0;

pub const FAN_BASE_SPREAD: f32 = 0.3;
pub const FAN_SPREAD_PER_PHASE: f32 = 0.15;
pub const FAN_BASE_SPEED: f32 = 4.0;
pub const FAN_SPEED_PER_PHASE: f32 = 1.5;
/// Vertical bias toward the player per pixel of height difference
pub const FAN_AIM_BIAS: f32 = 0.015;

pub const RAIN_SHOTS: usize = 5;
pub const RAIN_HEIGHT: f32 = 50.0;
pub const RAIN_SCATTER: f32 = 200.0;

pub const MIN_ATTACK_COOLDOWN: u32 = 45;

/// Horizontal speed for a phase
pub fn move_speed(phase: BossPhase) -> f32 {
    BASE_SPEED + phase.level() as f32 * SPEED_PER_PHASE
}

/// Ticks between attacks for a phase
pub fn attack_cooldown(phase: BossPhase) -> u32 {
    (100u32.saturating_sub(phase.level() * 20)).max(MIN_ATTACK_COOLDOWN)
}

pub fn update(
    state: &mut BossState,
    body: &mut Body,
    view: &WorldView,
    rng: &mut impl Rng,
) -> Vec<ProjectileSpawn> {
    let phase = state.refresh_phase();
    let speed = move_speed(phase);
    let player = view.player_pos;
    let toward = direction_to(body.pos.x, player.x);
    let tick = view.tick;

    if state.retreat_ticks > 0 {
        body.vel.x = -toward * speed * 2.0;
        state.retreat_ticks -= 1;
    } else {
        let distance = (player.x - body.pos.x).abs();
        body.vel.x = match phase {
            BossPhase::One => {
                if distance > APPROACH_DISTANCE {
                    toward * speed
                } else if distance < BACKOFF_DISTANCE {
                    -toward * speed * 0.5
                } else {
                    body.vel.x * 0.9
                }
            }
            // Strafing bursts alternate with a sideways weave
            BossPhase::Two => {
                if tick % 120 < 60 {
                    toward * speed * 1.5
                } else {
                    (tick as f32 * 0.05).sin() * speed * 2.0
                }
            }
            // Dashes alternate with jitter
            BossPhase::Three => {
                if tick % 60 < 30 {
                    toward * speed * 2.0
                } else {
                    (rng.random::<f32>() - 0.5) * speed * 4.0
                }
            }
        };
    }

    body.pos.x += body.vel.x;
    let (min_x, max_x) = view.arena.unwrap_or((0.0, view.level_width));
    body.pos.x = body.pos.x.clamp(min_x, (max_x - body.size.x).max(min_x));

    let mut spawns = Vec::new();
    if state.attack_cooldown == 0 {
        fan(&mut spawns, phase, body, player);
        if phase == BossPhase::Three && tick % 180 < 60 {
            rain(&mut spawns, player, rng);
        }
        state.attack_cooldown = attack_cooldown(phase);
    } else {
        state.attack_cooldown -= 1;
    }

    spawns
}

fn fan(spawns: &mut Vec<ProjectileSpawn>, phase: BossPhase, body: &Body, player: Vec2) {
    let count = phase.level() + 1;
    let spread = FAN_BASE_SPREAD + phase.level() as f32 * FAN_SPREAD_PER_PHASE;
    let speed = FAN_BASE_SPEED + phase.level() as f32 * FAN_SPEED_PER_PHASE;
    let dir = direction_to(body.pos.x, player.x);
    let origin = body.muzzle();

    for i in 0..count {
        let offset = (i as f32 - (count - 1) as f32 / 2.0) * spread;
        spawns.push(ProjectileSpawn {
            pos: origin,
            vel: Vec2::new(
                dir * speed * offset.cos(),
                (player.y - body.pos.y) * FAN_AIM_BIAS + offset.sin() * 2.0,
            ),
            damage: 1,
        });
    }
}

fn rain(spawns: &mut Vec<ProjectileSpawn>, player: Vec2, rng: &mut impl Rng) {
    for _ in 0..RAIN_SHOTS {
        let x = player.x + (rng.random::<f32>() - 0.5) * RAIN_SCATTER;
        let vx = (rng.random::<f32>() - 0.5) * 2.0;
        let vy = 4.0 + rng.random::<f32>() * 2.0;
        spawns.push(ProjectileSpawn {
            pos: Vec2::new(x, RAIN_HEIGHT),
            vel: Vec2::new(vx, vy),
            damage: 1,
        });
    }
}
