//! Level descriptors
//!
//! Levels are authored as JSON and validated once at load time, so that a
//! bad entry fails with a message naming it instead of misbehaving mid-run.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::state::{EnemyVariant, PatrolBounds, Platform, PlatformKind, PowerUpKind};
use crate::Rect;
use crate::consts::*;

/// Chaser detection radius when the descriptor omits one
pub const DEFAULT_AGGRO_RADIUS: f32 = 300.0;
/// Boss health when the descriptor omits one
pub const DEFAULT_BOSS_HEALTH: u32 = 15;

/// Errors raised while loading or validating a level descriptor.
#[derive(Debug, Error)]
pub enum LevelError {
    #[error("failed to read level file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid level json: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("level {level}: no goal defined")]
    MissingGoal { level: u32 },

    #[error("level {level}: goal at ({x}, {y}) has unusable size {width}x{height}")]
    DegenerateGoal {
        level: u32,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    },

    #[error("level {level}: width must be positive, got {width}")]
    InvalidWidth { level: u32, width: f32 },

    #[error("level {level}: platform #{index} at ({x}, {y}) has zero or negative size {width}x{height}")]
    DegeneratePlatform {
        level: u32,
        index: usize,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    },

    #[error("level {level}: platform #{index} has non-finite geometry")]
    NonFinitePlatform { level: u32, index: usize },

    #[error("level {level}: moving platform #{index} at ({x}, {y}) has no motion range")]
    MissingMotion {
        level: u32,
        index: usize,
        x: f32,
        y: f32,
    },

    #[error("level {level}: platform #{index} motion range {min}..{max} is inverted")]
    InvalidMotion {
        level: u32,
        index: usize,
        min: f32,
        max: f32,
    },

    #[error("level {level}: arena-wall platform #{index} but the level has no arena gate")]
    StrayArenaWall { level: u32, index: usize },

    #[error("level {level}: enemy #{index} at ({x}, {y}) has unknown variant `{variant}`")]
    UnknownEnemy {
        level: u32,
        index: usize,
        variant: String,
        x: f32,
        y: f32,
    },

    #[error("level {level}: enemy #{index} has degenerate size {width}x{height}")]
    DegenerateEnemy {
        level: u32,
        index: usize,
        width: f32,
        height: f32,
    },

    #[error("level {level}: enemy #{index} patrol range {min}..{max} is inverted")]
    InvalidPatrol {
        level: u32,
        index: usize,
        min: f32,
        max: f32,
    },

    #[error("level {level}: boss #{index} has zero health")]
    InvalidBoss { level: u32, index: usize },

    #[error("level {level}: arena gate start {start_x} must be left of end {end_x}")]
    InvalidArena {
        level: u32,
        start_x: f32,
        end_x: f32,
    },

    #[error("level {level}: arena gate defined but no boss to defeat")]
    ArenaWithoutBoss { level: u32 },

    #[error("no built-in level with id {0}")]
    UnknownLevel(u32),
}

fn default_goal_width() -> f32 {
    GOAL_WIDTH
}

fn default_goal_height() -> f32 {
    GOAL_HEIGHT
}

/// Goal rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub x: f32,
    pub y: f32,
    #[serde(default = "default_goal_width")]
    pub width: f32,
    #[serde(default = "default_goal_height")]
    pub height: f32,
}

impl Goal {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

fn default_enemy_width() -> f32 {
    ENEMY_WIDTH
}

fn default_enemy_height() -> f32 {
    ENEMY_HEIGHT
}

fn default_enemy_vx() -> f32 {
    -1.0
}

/// Enemy spawn entry. Variant-specific fields are optional and ignored by
/// variants that do not use them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemySpawn {
    #[serde(rename = "type")]
    pub variant: String,
    pub x: f32,
    pub y: f32,
    #[serde(default = "default_enemy_width")]
    pub width: f32,
    #[serde(default = "default_enemy_height")]
    pub height: f32,
    /// Initial horizontal velocity
    #[serde(default = "default_enemy_vx")]
    pub vx: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patrol: Option<PatrolBounds>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ambush: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aggro_radius: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl EnemySpawn {
    pub fn new(variant: EnemyVariant, x: f32, y: f32) -> Self {
        let variant = match variant {
            EnemyVariant::Patroller => "patroller",
            EnemyVariant::Chaser => "chaser",
            EnemyVariant::Shooter => "shooter",
            EnemyVariant::Boss => "boss",
        };
        Self {
            variant: variant.to_string(),
            x,
            y,
            width: ENEMY_WIDTH,
            height: ENEMY_HEIGHT,
            vx: default_enemy_vx(),
            patrol: None,
            ambush: None,
            aggro_radius: None,
            health: None,
            name: None,
        }
    }

    /// Parsed variant tag (None if unrecognized)
    pub fn variant(&self) -> Option<EnemyVariant> {
        self.variant.parse().ok()
    }
}

/// Power-up spawn entry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PowerUpSpawn {
    pub x: f32,
    pub y: f32,
    pub kind: PowerUpKind,
}

/// Boss arena gate descriptor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArenaSpec {
    pub start_x: f32,
    pub end_x: f32,
    pub trigger_x: f32,
}

/// Static level descriptor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub width: f32,
    #[serde(default)]
    pub background: String,
    #[serde(default)]
    pub goal: Option<Goal>,
    pub platforms: Vec<Platform>,
    #[serde(default)]
    pub enemies: Vec<EnemySpawn>,
    #[serde(default)]
    pub power_ups: Vec<PowerUpSpawn>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arena: Option<ArenaSpec>,
}

impl Level {
    /// Parse and validate a level from JSON
    pub fn from_json_str(json: &str) -> Result<Self, LevelError> {
        let level: Level = serde_json::from_str(json)?;
        level.validate()?;
        Ok(level)
    }

    /// Load and validate a level file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LevelError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| LevelError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Check every entry; the first offending one is reported
    pub fn validate(&self) -> Result<(), LevelError> {
        let level = self.id;

        if !self.width.is_finite() || self.width <= 0.0 {
            return Err(LevelError::InvalidWidth {
                level,
                width: self.width,
            });
        }

        let Some(goal) = self.goal else {
            return Err(LevelError::MissingGoal { level });
        };
        if !goal.rect().is_finite() || goal.width <= 0.0 || goal.height <= 0.0 {
            return Err(LevelError::DegenerateGoal {
                level,
                x: goal.x,
                y: goal.y,
                width: goal.width,
                height: goal.height,
            });
        }

        for (index, p) in self.platforms.iter().enumerate() {
            let rect = Rect::new(p.x, p.y, p.width, p.height);
            if !rect.is_finite() {
                return Err(LevelError::NonFinitePlatform { level, index });
            }
            if p.width <= 0.0 || p.height <= 0.0 {
                return Err(LevelError::DegeneratePlatform {
                    level,
                    index,
                    x: p.x,
                    y: p.y,
                    width: p.width,
                    height: p.height,
                });
            }
            match (p.kind, p.motion) {
                (PlatformKind::Moving, None) => {
                    return Err(LevelError::MissingMotion {
                        level,
                        index,
                        x: p.x,
                        y: p.y,
                    });
                }
                (_, Some(m)) if m.min > m.max || !m.speed.is_finite() => {
                    return Err(LevelError::InvalidMotion {
                        level,
                        index,
                        min: m.min,
                        max: m.max,
                    });
                }
                (PlatformKind::ArenaWall, _) if self.arena.is_none() => {
                    return Err(LevelError::StrayArenaWall { level, index });
                }
                _ => {}
            }
        }

        let mut has_boss = false;
        for (index, e) in self.enemies.iter().enumerate() {
            let Some(variant) = e.variant() else {
                return Err(LevelError::UnknownEnemy {
                    level,
                    index,
                    variant: e.variant.clone(),
                    x: e.x,
                    y: e.y,
                });
            };
            if e.width <= 0.0 || e.height <= 0.0 {
                return Err(LevelError::DegenerateEnemy {
                    level,
                    index,
                    width: e.width,
                    height: e.height,
                });
            }
            if let Some(bounds) = e.patrol
                && bounds.min > bounds.max
            {
                return Err(LevelError::InvalidPatrol {
                    level,
                    index,
                    min: bounds.min,
                    max: bounds.max,
                });
            }
            if variant == EnemyVariant::Boss {
                if e.health == Some(0) {
                    return Err(LevelError::InvalidBoss { level, index });
                }
                has_boss = true;
            }
        }

        if let Some(arena) = self.arena {
            if arena.start_x >= arena.end_x {
                return Err(LevelError::InvalidArena {
                    level,
                    start_x: arena.start_x,
                    end_x: arena.end_x,
                });
            }
            if !has_boss {
                return Err(LevelError::ArenaWithoutBoss { level });
            }
        }

        Ok(())
    }

    /// Count of progression items placed in the level (for HUD totals)
    pub fn progression_total(&self) -> usize {
        self.power_ups
            .iter()
            .filter(|p| p.kind == PowerUpKind::Progression)
            .count()
    }
}

const BUILTIN_LEVELS: [&str; 4] = [
    include_str!("../../levels/01-city-streets.json"),
    include_str!("../../levels/02-road-to-the-building.json"),
    include_str!("../../levels/03-coworking-floor.json"),
    include_str!("../../levels/04-demo-day.json"),
];

/// All shipped levels, validated
pub fn builtin_levels() -> Result<Vec<Level>, LevelError> {
    BUILTIN_LEVELS
        .iter()
        .map(|json| Level::from_json_str(json))
        .collect()
}

/// A shipped level by id
pub fn builtin_level(id: u32) -> Result<Level, LevelError> {
    builtin_levels()?
        .into_iter()
        .find(|level| level.id == id)
        .ok_or(LevelError::UnknownLevel(id))
}
