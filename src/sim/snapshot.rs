//! Read-only view of a completed tick for renderers and HUDs

use serde::Serialize;

use super::character::CharacterId;
use super::state::{Enemy, Platform, PlatformKind, Player, PowerUp, Projectile, SessionPhase, World};
use crate::Rect;

#[derive(Debug, Clone, Serialize)]
pub struct BossBar {
    pub name: Option<String>,
    pub health: u32,
    pub max_health: u32,
    pub phase: u32,
}

/// Owned copy of everything a renderer may draw. Built only between ticks;
/// nothing in it feeds back into the simulation.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub level_id: u32,
    pub character: CharacterId,
    pub phase: SessionPhase,
    pub time_ticks: u64,
    pub camera_x: f32,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub player_projectiles: Vec<Projectile>,
    pub hostile_projectiles: Vec<Projectile>,
    pub power_ups: Vec<PowerUp>,
    /// Platforms as drawn this tick: moving platforms at their current x,
    /// arena walls only while sealed
    pub platforms: Vec<Platform>,
    pub goal: Option<Rect>,
    /// Progression items in the level, for the HUD's "n of total"
    pub progression_total: usize,
    pub boss: Option<BossBar>,
}

impl Snapshot {
    pub fn capture(world: &World) -> Self {
        let walls = world.walls_solid();
        let platforms = world
            .platforms
            .iter()
            .filter(|p| walls || p.kind != PlatformKind::ArenaWall)
            .map(|p| Platform {
                x: p.x_at(world.time_ticks),
                ..p.clone()
            })
            .collect();

        let boss = world
            .enemies
            .iter()
            .filter(|e| e.alive)
            .find_map(Enemy::boss)
            .map(|b| BossBar {
                name: b.name.clone(),
                health: b.health,
                max_health: b.max_health,
                phase: b.phase.level(),
            });

        Self {
            level_id: world.level_id,
            character: world.character,
            phase: world.phase,
            time_ticks: world.time_ticks,
            camera_x: world.camera.x,
            player: world.player.clone(),
            enemies: world.enemies.iter().filter(|e| e.alive).cloned().collect(),
            player_projectiles: world.player_projectiles.clone(),
            hostile_projectiles: world.hostile_projectiles.clone(),
            power_ups: world.power_ups.iter().filter(|p| !p.collected).cloned().collect(),
            platforms,
            goal: world.goal,
            progression_total: world.progression_total,
            boss,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::level::builtin_level;
    use crate::tuning::Tuning;

    #[test]
    fn test_hides_open_arena_walls() {
        let level = builtin_level(4).expect("level 4");
        let mut world = World::new(&level, CharacterId::default(), Tuning::default(), 3);
        let count = |s: &Snapshot| {
            s.platforms
                .iter()
                .filter(|p| p.kind == PlatformKind::ArenaWall)
                .count()
        };

        assert_eq!(count(&Snapshot::capture(&world)), 0);
        if let Some(gate) = &mut world.gate {
            gate.active = true;
        }
        assert_eq!(count(&Snapshot::capture(&world)), 2);
        let snapshot = Snapshot::capture(&world);
        assert_eq!(snapshot.boss.as_ref().map(|b| b.max_health), Some(10));
    }

    #[test]
    fn test_serializes() {
        let level = builtin_level(1).expect("level 1");
        let world = World::new(&level, CharacterId::default(), Tuning::default(), 3);
        let json = Snapshot::capture(&world).to_json().expect("json");
        assert!(json.contains("\"camera_x\""));
        assert!(json.contains("\"player\""));
        assert_eq!(Snapshot::capture(&world).progression_total, 3);
    }
}
