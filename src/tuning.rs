//! Data-driven game balance
//!
//! Every field falls back to the value in [`crate::consts`], so a tuning file
//! only needs to name what it overrides.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors that can occur while loading a tuning file.
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid tuning json: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("tuning value `{field}` is out of range: {value}")]
    OutOfRange { field: &'static str, value: f32 },
}

/// Simulation tunables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Movement ===
    pub gravity: f32,
    pub jump_force: f32,
    pub double_jump_factor: f32,
    pub move_speed: f32,

    // === Buffs ===
    pub speed_buff_bonus: f32,
    pub jump_buff_bonus: f32,
    pub buff_duration_ticks: u32,

    // === Combat ===
    pub projectile_speed: f32,
    pub player_max_health: u32,
    pub invincibility_ticks: u32,

    // === World ===
    /// One-way platform heuristic; treat as a feel knob, not a contract
    pub landing_tolerance: f32,
    pub fall_limit: f32,

    // === Camera ===
    pub viewport_width: f32,
    pub camera_lead: f32,
    pub camera_smoothing: f32,
    pub cull_behind: f32,
    pub cull_ahead: f32,

    // === Pickups ===
    pub collect_radius: f32,
    pub collect_margin: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            jump_force: JUMP_FORCE,
            double_jump_factor: DOUBLE_JUMP_FACTOR,
            move_speed: MOVE_SPEED,

            speed_buff_bonus: SPEED_BUFF_BONUS,
            jump_buff_bonus: JUMP_BUFF_BONUS,
            buff_duration_ticks: BUFF_DURATION_TICKS,

            projectile_speed: PROJECTILE_SPEED,
            player_max_health: PLAYER_MAX_HEALTH,
            invincibility_ticks: INVINCIBILITY_TICKS,

            landing_tolerance: LANDING_TOLERANCE,
            fall_limit: FALL_LIMIT,

            viewport_width: VIEWPORT_WIDTH,
            camera_lead: CAMERA_LEAD,
            camera_smoothing: CAMERA_SMOOTHING,
            cull_behind: CULL_BEHIND,
            cull_ahead: CULL_AHEAD,

            collect_radius: COLLECT_RADIUS,
            collect_margin: COLLECT_MARGIN,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON; absent fields keep their defaults
    pub fn from_json_str(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load tuning from a JSON file on disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| TuningError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let tuning = Self::from_json_str(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    fn validate(&self) -> Result<(), TuningError> {
        let positive = [
            ("gravity", self.gravity),
            ("move_speed", self.move_speed),
            ("projectile_speed", self.projectile_speed),
            ("landing_tolerance", self.landing_tolerance),
            ("viewport_width", self.viewport_width),
            ("camera_smoothing", self.camera_smoothing),
            ("collect_radius", self.collect_radius),
        ];
        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(TuningError::OutOfRange { field, value });
            }
        }
        if !self.jump_force.is_finite() || self.jump_force >= 0.0 {
            return Err(TuningError::OutOfRange {
                field: "jump_force",
                value: self.jump_force,
            });
        }
        Ok(())
    }

    /// Horizontal speed for the given buff state and character multiplier
    pub fn run_speed(&self, buffed: bool, speed_multiplier: f32) -> f32 {
        let base = if buffed {
            self.move_speed + self.speed_buff_bonus
        } else {
            self.move_speed
        };
        base * speed_multiplier
    }

    /// Ground jump impulse for the given buff state and character multiplier
    pub fn jump_impulse(&self, buffed: bool, jump_multiplier: f32) -> f32 {
        let base = if buffed {
            self.jump_force + self.jump_buff_bonus
        } else {
            self.jump_force
        };
        base * jump_multiplier
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json_str(r#"{ "gravity": 0.5, "landing_tolerance": 6.0 }"#)
            .expect("valid tuning");
        assert_eq!(tuning.gravity, 0.5);
        assert_eq!(tuning.landing_tolerance, 6.0);
        assert_eq!(tuning.move_speed, MOVE_SPEED);
        assert_eq!(tuning.buff_duration_ticks, BUFF_DURATION_TICKS);
    }

    #[test]
    fn test_rejects_non_positive_gravity() {
        let err = Tuning::from_json_str(r#"{ "gravity": 0.0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::OutOfRange { field: "gravity", .. }));
    }

    #[test]
    fn test_rejects_downward_jump() {
        let err = Tuning::from_json_str(r#"{ "jump_force": 3.0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::OutOfRange { field: "jump_force", .. }));
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(
            Tuning::from_json_str("{ gravity"),
            Err(TuningError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = Tuning::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, TuningError::Io { .. }));
    }

    #[test]
    fn test_buffed_speed_and_jump() {
        let tuning = Tuning::default();
        assert_eq!(tuning.run_speed(false, 1.0), 5.0);
        assert_eq!(tuning.run_speed(true, 1.0), 7.0);
        assert!((tuning.run_speed(false, 1.25) - 6.25).abs() < 1e-6);
        assert_eq!(tuning.jump_impulse(false, 1.0), -14.0);
        assert_eq!(tuning.jump_impulse(true, 1.0), -17.0);
    }
}
