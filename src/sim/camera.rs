//! Horizontal follow camera

use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Camera scroll position (left edge of the viewport, world space)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub x: f32,
}

impl Camera {
    /// Ease toward keeping the player `camera_lead` pixels from the left edge,
    /// clamped so the viewport never leaves the level
    pub fn follow(&mut self, player_x: f32, level_width: f32, tuning: &Tuning) {
        let target = player_x - tuning.camera_lead;
        let eased = self.x + (target - self.x) * tuning.camera_smoothing;
        let max_x = (level_width - tuning.viewport_width).max(0.0);
        self.x = eased.clamp(0.0, max_x);
    }
}
