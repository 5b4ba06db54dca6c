//! Cowork Quest - a side-scrolling platformer simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, enemy AI, game state)
//! - `tuning`: Data-driven game balance
//! - `session`: Host-side driver (restart, input latching, snapshot publishing)
//! - `autopilot`: Demo input for the headless runner

pub mod autopilot;
pub mod session;
pub mod sim;
pub mod tuning;

pub use session::Session;
pub use tuning::Tuning;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Game configuration constants
pub mod consts {
    /// Simulation rate (one tick per display refresh)
    pub const TICK_RATE: u32 = 60;
    /// Fixed timestep in seconds
    pub const SIM_DT: f32 = 1.0 / TICK_RATE as f32;
    /// Maximum ticks per frame (prevents spiral of death)
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Downward acceleration per tick
    pub const GRAVITY: f32 = 0.6;
    /// Initial vertical velocity of a ground jump (negative is up)
    pub const JUMP_FORCE: f32 = -14.0;
    /// Double jump impulse relative to the ground jump
    pub const DOUBLE_JUMP_FACTOR: f32 = 0.85;
    /// Horizontal speed set directly from input
    pub const MOVE_SPEED: f32 = 5.0;

    /// Speed buff bonuses
    pub const SPEED_BUFF_BONUS: f32 = 2.0;
    pub const JUMP_BUFF_BONUS: f32 = -3.0;
    pub const BUFF_DURATION_TICKS: u32 = 300;

    /// Player projectile speed
    pub const PROJECTILE_SPEED: f32 = 12.0;
    /// Default ranged-attack cooldown
    pub const FIRE_COOLDOWN_TICKS: u32 = 60;
    /// Cooldown for the slow-firing archetype
    pub const SLOW_FIRE_COOLDOWN_TICKS: u32 = 180;

    /// Player defaults
    pub const PLAYER_WIDTH: f32 = 48.0;
    pub const PLAYER_HEIGHT: f32 = 64.0;
    pub const PLAYER_SPAWN_X: f32 = 100.0;
    pub const PLAYER_SPAWN_Y: f32 = 400.0;
    pub const PLAYER_MAX_HEALTH: u32 = 3;
    pub const INVINCIBILITY_TICKS: u32 = 90;

    /// One-way landing/ceiling tolerance (pixels)
    pub const LANDING_TOLERANCE: f32 = 10.0;
    /// Falling below this y is fatal
    pub const FALL_LIMIT: f32 = 650.0;
    /// Phase rate of moving platforms (radians per tick per unit speed)
    pub const PLATFORM_MOTION_RATE: f32 = 0.02;

    /// Viewport and camera
    pub const VIEWPORT_WIDTH: f32 = 800.0;
    pub const CAMERA_LEAD: f32 = 400.0;
    pub const CAMERA_SMOOTHING: f32 = 0.1;

    /// Projectiles outside [camera - behind, camera + ahead] are culled
    pub const CULL_BEHIND: f32 = 100.0;
    pub const CULL_AHEAD: f32 = 900.0;
    pub const PLAYER_SHOT_SIZE: f32 = 20.0;
    pub const HOSTILE_SHOT_SIZE: f32 = 16.0;

    /// Power-up pickup geometry
    pub const POWER_UP_SIZE: f32 = 32.0;
    pub const COLLECT_RADIUS: f32 = 32.0;
    pub const COLLECT_MARGIN: f32 = 20.0;

    /// Enemy defaults
    pub const ENEMY_WIDTH: f32 = 48.0;
    pub const ENEMY_HEIGHT: f32 = 40.0;

    /// Goal defaults
    pub const GOAL_WIDTH: f32 = 60.0;
    pub const GOAL_HEIGHT: f32 = 100.0;

    /// Arena wall thickness
    pub const ARENA_WALL_WIDTH: f32 = 24.0;
}

/// Axis-aligned rectangle (top-left origin, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    #[inline]
    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self::new(pos.x, pos.y, size.x, size.y)
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Strict overlap test (touching edges do not count)
    #[inline]
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.w.is_finite() && self.h.is_finite()
    }
}

/// Sign of `target - from` as -1.0 or 1.0 (ties go left)
#[inline]
pub fn direction_to(from: f32, target: f32) -> f32 {
    if target > from { 1.0 } else { -1.0 }
}
