//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (level descriptor order)
//! - No rendering or platform dependencies

pub mod arena;
pub mod camera;
pub mod character;
pub mod collision;
pub mod enemy;
pub mod event;
pub mod input;
pub mod level;
pub mod physics;
pub mod powerup;
pub mod projectile;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use arena::{ArenaGate, GateTransition};
pub use camera::Camera;
pub use character::{CharacterId, CharacterModifiers};
pub use collision::{Contact, Solid, resolve_platforms};
pub use enemy::{ProjectileSpawn, WorldView};
pub use event::{GameEvent, Host};
pub use input::{InputLatch, KeyState, TickInput};
pub use level::{Level, LevelError, builtin_level, builtin_levels};
pub use snapshot::Snapshot;
pub use state::{
    Behavior, BossPhase, Enemy, EntityId, Platform, PlatformKind, Player, PowerUp, PowerUpKind,
    Projectile, SessionPhase, Side, World,
};
pub use tick::tick;
