//! Events emitted by the simulation and the host callback surface

use serde::Serialize;

use super::state::{EntityId, PowerUpKind};

/// Something the host may want to react to. Collected per tick in order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum GameEvent {
    Paused,
    Resumed,
    LevelComplete { progression: u32, currency: u32 },
    GameOver,
    BossDefeated,
    EnemyDefeated { id: EntityId },
    PlayerHurt { health: u32 },
    PowerUpCollected { id: EntityId, kind: PowerUpKind },
    ArenaSealed,
    ArenaOpened,
}

/// Host-side callbacks. Everything defaults to a no-op so hosts implement
/// only what they use.
pub trait Host {
    fn on_level_complete(&mut self, _progression: u32, _currency: u32) {}
    fn on_game_over(&mut self) {}
    fn on_boss_defeated(&mut self) {}
    /// Pause intent. Fires for every press unless `on_resume` is overridden.
    fn on_pause(&mut self) {}
    /// Pause pressed while paused. Defaults to `on_pause`, so a host that
    /// only tracks the toggle sees both presses.
    fn on_resume(&mut self) {
        self.on_pause();
    }
    fn on_enemy_defeated(&mut self, _id: EntityId) {}
    fn on_player_hurt(&mut self, _health: u32) {}
    fn on_power_up(&mut self, _id: EntityId, _kind: PowerUpKind) {}
    fn on_arena_sealed(&mut self) {}
    fn on_arena_opened(&mut self) {}
}

/// Host that ignores everything
impl Host for () {}

impl GameEvent {
    /// Route this event to the matching host callback
    pub fn dispatch(&self, host: &mut impl Host) {
        match *self {
            GameEvent::Paused => host.on_pause(),
            GameEvent::Resumed => host.on_resume(),
            GameEvent::LevelComplete {
                progression,
                currency,
            } => host.on_level_complete(progression, currency),
            GameEvent::GameOver => host.on_game_over(),
            GameEvent::BossDefeated => host.on_boss_defeated(),
            GameEvent::EnemyDefeated { id } => host.on_enemy_defeated(id),
            GameEvent::PlayerHurt { health } => host.on_player_hurt(health),
            GameEvent::PowerUpCollected { id, kind } => host.on_power_up(id, kind),
            GameEvent::ArenaSealed => host.on_arena_sealed(),
            GameEvent::ArenaOpened => host.on_arena_opened(),
        }
    }
}
