//! Game state and core simulation types
//!
//! Every entity is created fresh from a [`Level`] when the world is built and
//! mutated in place by the per-tick stages. Nothing here has behavior beyond
//! small accessors and the one-way state transitions (`alive`, `collected`).

use std::fmt;
use std::str::FromStr;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::arena::ArenaGate;
use super::camera::Camera;
use super::character::{CharacterId, CharacterModifiers};
use super::level::{EnemySpawn, Level};
use crate::Rect;
use crate::consts::*;
use crate::tuning::Tuning;

/// Entity families that receive generated IDs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Enemy,
    Projectile,
    PowerUp,
}

/// Stable entity identity: spawn tick plus a per-kind sequence number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityId {
    pub kind: EntityKind,
    pub tick: u64,
    pub seq: u32,
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = match self.kind {
            EntityKind::Enemy => "enemy",
            EntityKind::Projectile => "proj",
            EntityKind::PowerUp => "powerup",
        };
        write!(f, "{prefix}-{}-{}", self.tick, self.seq)
    }
}

/// Per-kind monotonic sequence counters
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IdAllocator {
    enemy: u32,
    projectile: u32,
    power_up: u32,
}

impl IdAllocator {
    pub fn allocate(&mut self, kind: EntityKind, tick: u64) -> EntityId {
        let counter = match kind {
            EntityKind::Enemy => &mut self.enemy,
            EntityKind::Projectile => &mut self.projectile,
            EntityKind::PowerUp => &mut self.power_up,
        };
        let seq = *counter;
        *counter += 1;
        EntityId { kind, tick, seq }
    }
}

/// Horizontal facing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    #[inline]
    pub fn sign(&self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }
}

/// The player character
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    pub grounded: bool,
    pub facing: Facing,
    /// A ground jump is in progress (cleared on landing)
    pub jumping: bool,
    /// The air jump has been spent since the last landing
    pub double_jumped: bool,
    pub health: u32,
    pub max_health: u32,
    pub invincible_ticks: u32,
    /// Remaining speed/jump buff duration (0 = inactive)
    pub speed_buff_ticks: u32,
    pub ranged_unlocked: bool,
    /// Progression items (networking contacts)
    pub progression: u32,
    /// Currency items (coins)
    pub currency: u32,
    pub fire_cooldown: u32,
    pub modifiers: CharacterModifiers,
}

impl Player {
    /// Spawn defaults for the selected character
    pub fn spawn(modifiers: CharacterModifiers, tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(PLAYER_SPAWN_X, PLAYER_SPAWN_Y),
            vel: Vec2::ZERO,
            size: Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
            grounded: false,
            facing: Facing::Right,
            jumping: false,
            double_jumped: false,
            health: tuning.player_max_health,
            max_health: tuning.player_max_health,
            invincible_ticks: 0,
            speed_buff_ticks: 0,
            ranged_unlocked: modifiers.starts_with_ranged,
            progression: 0,
            currency: 0,
            fire_cooldown: 0,
            modifiers,
        }
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    #[inline]
    pub fn invincible(&self) -> bool {
        self.invincible_ticks > 0
    }

    #[inline]
    pub fn speed_buffed(&self) -> bool {
        self.speed_buff_ticks > 0
    }

    #[inline]
    pub fn is_dead(&self) -> bool {
        self.health == 0
    }

    /// Apply damage unless invincible. Returns true if health changed.
    pub fn take_damage(&mut self, amount: u32, invincibility_ticks: u32) -> bool {
        if self.invincible() || self.is_dead() {
            return false;
        }
        self.health = self.health.saturating_sub(amount);
        self.invincible_ticks = invincibility_ticks;
        true
    }
}

/// Platform kinds. Static kinds differ only cosmetically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PlatformKind {
    Ground,
    /// Thin one-way ledge (no side collision)
    Platform,
    Moving,
    Building,
    Desk,
    /// See-through ledge (no side collision)
    Glass,
    Rooftop,
    /// Solid only while a boss arena is sealed
    ArenaWall,
}

impl PlatformKind {
    /// Whether the kind pushes entities back on side contact
    pub fn blocks_sides(&self) -> bool {
        !matches!(self, PlatformKind::Platform | PlatformKind::Glass)
    }
}

/// Sinusoidal horizontal motion for moving platforms
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlatformMotion {
    pub min: f32,
    pub max: f32,
    pub speed: f32,
}

/// Static level geometry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub kind: PlatformKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub motion: Option<PlatformMotion>,
}

impl Platform {
    pub fn new(x: f32, y: f32, width: f32, height: f32, kind: PlatformKind) -> Self {
        Self {
            x,
            y,
            width,
            height,
            kind,
            motion: None,
        }
    }

    /// Horizontal position at the given tick (moving platforms oscillate)
    pub fn x_at(&self, tick: u64) -> f32 {
        match (self.kind, self.motion) {
            (PlatformKind::Moving, Some(m)) => {
                let range = m.max - m.min;
                let offset = (tick as f32 * PLATFORM_MOTION_RATE * m.speed).sin() * range / 2.0;
                m.min + range / 2.0 + offset
            }
            _ => self.x,
        }
    }

    pub fn rect_at(&self, tick: u64) -> Rect {
        Rect::new(self.x_at(tick), self.y, self.width, self.height)
    }
}

/// Horizontal walking range
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PatrolBounds {
    pub min: f32,
    pub max: f32,
}

impl PatrolBounds {
    /// True when a walker at `x` moving with `vx` is heading further past
    /// a limit. A walker outside the range is free to walk back into it.
    #[inline]
    pub fn blocks(&self, x: f32, vx: f32) -> bool {
        (vx < 0.0 && x <= self.min) || (vx > 0.0 && x >= self.max)
    }
}

/// Boss difficulty tier; ordering follows severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum BossPhase {
    #[default]
    One,
    Two,
    Three,
}

/// Health fraction at or below which phase 2 starts
pub const BOSS_PHASE_TWO_AT: f32 = 0.6;
/// Health fraction at or below which phase 3 starts
pub const BOSS_PHASE_THREE_AT: f32 = 0.3;

impl BossPhase {
    pub fn from_health_fraction(fraction: f32) -> Self {
        if fraction <= BOSS_PHASE_THREE_AT {
            BossPhase::Three
        } else if fraction <= BOSS_PHASE_TWO_AT {
            BossPhase::Two
        } else {
            BossPhase::One
        }
    }

    /// Numeric tier (1-3)
    pub fn level(&self) -> u32 {
        match self {
            BossPhase::One => 1,
            BossPhase::Two => 2,
            BossPhase::Three => 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatrollerState {
    pub bounds: Option<PatrolBounds>,
    /// Rushes the player when close
    pub ambush: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChaserState {
    pub aggro_radius: f32,
    pub is_aggro: bool,
    pub jump_cooldown: u32,
    pub dash_cooldown: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShooterState {
    pub bounds: Option<PatrolBounds>,
    pub attack_cooldown: u32,
    pub burst_count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BossState {
    pub name: Option<String>,
    pub health: u32,
    pub max_health: u32,
    pub phase: BossPhase,
    pub attack_cooldown: u32,
    pub retreat_ticks: u32,
}

impl BossState {
    pub fn health_fraction(&self) -> f32 {
        if self.max_health == 0 {
            return 0.0;
        }
        self.health as f32 / self.max_health as f32
    }

    /// Recompute the phase from health; never steps back to an easier tier
    pub fn refresh_phase(&mut self) -> BossPhase {
        self.phase = self
            .phase
            .max(BossPhase::from_health_fraction(self.health_fraction()));
        self.phase
    }
}

/// Variant tag as written in level descriptors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EnemyVariant {
    Patroller,
    Chaser,
    Shooter,
    Boss,
}

impl FromStr for EnemyVariant {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "patroller" | "sloth" => Ok(EnemyVariant::Patroller),
            "chaser" | "deadline" => Ok(EnemyVariant::Chaser),
            "shooter" | "spam" => Ok(EnemyVariant::Shooter),
            "boss" => Ok(EnemyVariant::Boss),
            _ => Err(()),
        }
    }
}

/// Per-variant behavior state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Behavior {
    Patroller(PatrollerState),
    Chaser(ChaserState),
    Shooter(ShooterState),
    Boss(BossState),
    /// Unrecognized variant: holds position and never acts
    Inert,
}

/// Result of a hit landing on an enemy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitOutcome {
    Ignored,
    Damaged,
    Defeated,
    BossDefeated,
}

/// Ticks a boss spends backing off after taking damage
pub const BOSS_RETREAT_TICKS: u32 = 30;

/// An enemy entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: EntityId,
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    pub alive: bool,
    pub grounded: bool,
    pub behavior: Behavior,
}

impl Enemy {
    /// Build a live enemy from its descriptor entry
    pub fn from_spawn(id: EntityId, spawn: &EnemySpawn) -> Self {
        let behavior = match spawn.variant() {
            Some(EnemyVariant::Patroller) => Behavior::Patroller(PatrollerState {
                bounds: spawn.patrol,
                ambush: spawn.ambush.unwrap_or(true),
            }),
            Some(EnemyVariant::Chaser) => Behavior::Chaser(ChaserState {
                aggro_radius: spawn.aggro_radius.unwrap_or(super::level::DEFAULT_AGGRO_RADIUS),
                is_aggro: false,
                jump_cooldown: 0,
                dash_cooldown: 0,
            }),
            Some(EnemyVariant::Shooter) => Behavior::Shooter(ShooterState {
                bounds: spawn.patrol,
                attack_cooldown: 0,
                burst_count: 0,
            }),
            Some(EnemyVariant::Boss) => {
                let health = spawn.health.unwrap_or(super::level::DEFAULT_BOSS_HEALTH);
                let mut boss = BossState {
                    name: spawn.name.clone(),
                    health,
                    max_health: health,
                    phase: BossPhase::One,
                    attack_cooldown: 0,
                    retreat_ticks: 0,
                };
                boss.refresh_phase();
                Behavior::Boss(boss)
            }
            None => {
                log::warn!(
                    "Enemy {id} has unknown variant `{}`; spawning inert",
                    spawn.variant
                );
                Behavior::Inert
            }
        };

        Self {
            id,
            pos: Vec2::new(spawn.x, spawn.y),
            vel: Vec2::new(spawn.vx, 0.0),
            size: Vec2::new(spawn.width, spawn.height),
            alive: true,
            grounded: false,
            behavior,
        }
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    #[inline]
    pub fn is_boss(&self) -> bool {
        matches!(self.behavior, Behavior::Boss(_))
    }

    pub fn boss(&self) -> Option<&BossState> {
        match &self.behavior {
            Behavior::Boss(boss) => Some(boss),
            _ => None,
        }
    }

    /// Apply a hit. Regular enemies fall to one hit; the boss loses health
    /// and backs off.
    pub fn take_hit(&mut self, damage: u32) -> HitOutcome {
        if !self.alive {
            return HitOutcome::Ignored;
        }
        match &mut self.behavior {
            Behavior::Boss(boss) => {
                boss.health = boss.health.saturating_sub(damage);
                boss.retreat_ticks = BOSS_RETREAT_TICKS;
                boss.refresh_phase();
                if boss.health == 0 {
                    self.alive = false;
                    HitOutcome::BossDefeated
                } else {
                    HitOutcome::Damaged
                }
            }
            _ => {
                self.alive = false;
                HitOutcome::Defeated
            }
        }
    }
}

/// Which side fired a projectile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Player,
    Hostile,
}

/// A projectile entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: EntityId,
    pub pos: Vec2,
    pub vel: Vec2,
    pub owner: Side,
    pub active: bool,
    pub damage: u32,
}

impl Projectile {
    /// Hitbox, centred vertically on the projectile's position
    pub fn hitbox(&self) -> Rect {
        let size = match self.owner {
            Side::Player => PLAYER_SHOT_SIZE,
            Side::Hostile => HOSTILE_SHOT_SIZE,
        };
        Rect::new(self.pos.x, self.pos.y - size / 2.0, size, size)
    }
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PowerUpKind {
    /// Timed speed and jump boost
    #[serde(alias = "coffee")]
    SpeedBuff,
    /// Permanent ranged attack
    #[serde(alias = "wifi")]
    RangedUnlock,
    /// Counts toward level progression
    #[serde(alias = "networking")]
    Progression,
    #[serde(alias = "coin")]
    Currency,
}

/// A collectible
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub id: EntityId,
    pub kind: PowerUpKind,
    pub pos: Vec2,
    pub collected: bool,
}

impl PowerUp {
    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(POWER_UP_SIZE / 2.0)
    }
}

/// Current phase of a running level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    Playing,
    Paused,
    LevelComplete,
    GameOver,
}

/// Complete state of one running level instance
#[derive(Debug, Clone)]
pub struct World {
    pub level_id: u32,
    pub level_width: f32,
    pub character: CharacterId,
    pub tuning: Tuning,
    pub seed: u64,
    pub phase: SessionPhase,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub player: Player,
    /// Live and defeated enemies, in descriptor order
    pub enemies: Vec<Enemy>,
    /// Level geometry followed by any arena walls
    pub platforms: Vec<Platform>,
    pub player_projectiles: Vec<Projectile>,
    pub hostile_projectiles: Vec<Projectile>,
    pub power_ups: Vec<PowerUp>,
    /// Absent when the descriptor has no usable goal
    pub goal: Option<Rect>,
    /// Progression items placed in the level
    pub progression_total: usize,
    pub camera: Camera,
    pub gate: Option<ArenaGate>,
    pub rng: Pcg32,
    ids: IdAllocator,
}

impl World {
    /// Instantiate every entity fresh from the descriptor
    pub fn new(level: &Level, character: CharacterId, tuning: Tuning, seed: u64) -> Self {
        let mut ids = IdAllocator::default();
        let modifiers = character.modifiers();

        let enemies = level
            .enemies
            .iter()
            .map(|spawn| Enemy::from_spawn(ids.allocate(EntityKind::Enemy, 0), spawn))
            .collect();

        let power_ups = level
            .power_ups
            .iter()
            .map(|spawn| PowerUp {
                id: ids.allocate(EntityKind::PowerUp, 0),
                kind: spawn.kind,
                pos: Vec2::new(spawn.x, spawn.y),
                collected: false,
            })
            .collect();

        let mut platforms = level.platforms.clone();
        let gate = level.arena.map(ArenaGate::new);
        if let Some(gate) = &gate {
            platforms.extend(gate.walls());
        }

        let goal = level
            .goal
            .map(|g| g.rect())
            .filter(|r| r.is_finite() && r.w > 0.0 && r.h > 0.0);
        let player = Player::spawn(modifiers, &tuning);

        log::info!(
            "Level {} \"{}\" started as {} (seed {})",
            level.id,
            level.name,
            character,
            seed
        );

        Self {
            level_id: level.id,
            level_width: level.width,
            character,
            tuning,
            seed,
            phase: SessionPhase::Playing,
            time_ticks: 0,
            player,
            enemies,
            platforms,
            player_projectiles: Vec::new(),
            hostile_projectiles: Vec::new(),
            power_ups,
            goal,
            progression_total: level.progression_total(),
            camera: Camera::default(),
            gate,
            rng: Pcg32::seed_from_u64(seed),
            ids,
        }
    }

    /// Allocate an ID stamped with the current tick
    pub fn next_entity_id(&mut self, kind: EntityKind) -> EntityId {
        self.ids.allocate(kind, self.time_ticks)
    }

    /// True while any boss is still standing
    pub fn boss_alive(&self) -> bool {
        self.enemies.iter().any(|e| e.alive && e.is_boss())
    }

    /// Whether arena walls collide (and are drawn) right now
    pub fn walls_solid(&self) -> bool {
        super::arena::walls_solid(self.gate.as_ref()) && self.boss_alive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_allocator_sequences_per_kind() {
        let mut ids = IdAllocator::default();
        let a = ids.allocate(EntityKind::Projectile, 5);
        let b = ids.allocate(EntityKind::Projectile, 5);
        let c = ids.allocate(EntityKind::Enemy, 5);
        assert_ne!(a, b);
        assert_eq!(b.seq, 1);
        assert_eq!(c.seq, 0);
        assert_eq!(a.to_string(), "proj-5-0");
    }

    #[test]
    fn test_boss_phase_thresholds() {
        assert_eq!(BossPhase::from_health_fraction(1.0), BossPhase::One);
        assert_eq!(BossPhase::from_health_fraction(0.9), BossPhase::One);
        assert_eq!(BossPhase::from_health_fraction(0.6), BossPhase::Two);
        assert_eq!(BossPhase::from_health_fraction(0.3), BossPhase::Three);
        assert_eq!(BossPhase::from_health_fraction(0.0), BossPhase::Three);
    }

    #[test]
    fn test_boss_phase_never_regresses() {
        let mut boss = BossState {
            name: None,
            health: 2,
            max_health: 10,
            phase: BossPhase::One,
            attack_cooldown: 0,
            retreat_ticks: 0,
        };
        assert_eq!(boss.refresh_phase(), BossPhase::Three);
        // Healing is not supposed to happen, but must not undo the phase
        boss.health = 10;
        assert_eq!(boss.refresh_phase(), BossPhase::Three);
    }

    #[test]
    fn test_player_damage_respects_invincibility() {
        let mut player = Player::spawn(CharacterModifiers::default(), &Tuning::default());
        assert!(player.take_damage(1, 90));
        assert_eq!(player.health, 2);
        assert!(player.invincible());
        assert!(!player.take_damage(1, 90));
        assert_eq!(player.health, 2);
    }

    #[test]
    fn test_moving_platform_oscillates_within_range() {
        let mut platform = Platform::new(500.0, 420.0, 100.0, 24.0, PlatformKind::Moving);
        platform.motion = Some(PlatformMotion {
            min: 500.0,
            max: 650.0,
            speed: 1.0,
        });
        assert!((platform.x_at(0) - 575.0).abs() < 1e-3);
        for tick in 0..1000 {
            let x = platform.x_at(tick);
            assert!((500.0 - 1e-3..=650.0 + 1e-3).contains(&x));
        }
    }

    #[test]
    fn test_pass_through_kinds() {
        assert!(!PlatformKind::Platform.blocks_sides());
        assert!(!PlatformKind::Glass.blocks_sides());
        assert!(PlatformKind::Ground.blocks_sides());
        assert!(PlatformKind::ArenaWall.blocks_sides());
    }
}
