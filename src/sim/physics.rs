//! Arcade physics integration
//!
//! Horizontal velocity is set directly from intent each tick (no inertia);
//! only the vertical axis accumulates gravity.

use glam::Vec2;

/// Apply one tick of gravity and move by the resulting velocity
#[inline]
pub fn integrate(pos: &mut Vec2, vel: &mut Vec2, gravity: f32, gravity_multiplier: f32) {
    vel.y += gravity * gravity_multiplier;
    *pos += *vel;
}

/// Clamp an entity's x so it stays inside `[0, level_width - width]`
#[inline]
pub fn clamp_to_level(pos: &mut Vec2, width: f32, level_width: f32) {
    pos.x = pos.x.clamp(0.0, (level_width - width).max(0.0));
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_first_tick_from_spawn() {
        let mut pos = Vec2::new(100.0, 400.0);
        let mut vel = Vec2::ZERO;
        integrate(&mut pos, &mut vel, 0.6, 1.0);
        assert!((vel.y - 0.6).abs() < 1e-6);
        assert!((pos.y - 400.6).abs() < 1e-4);
        assert_eq!(pos.x, 100.0);
    }

    #[test]
    fn test_gravity_multiplier() {
        let mut pos = Vec2::ZERO;
        let mut vel = Vec2::ZERO;
        integrate(&mut pos, &mut vel, 0.6, 0.65);
        assert!((vel.y - 0.39).abs() < 1e-6);
    }

    #[test]
    fn test_clamp_to_level() {
        let mut pos = Vec2::new(-5.0, 0.0);
        clamp_to_level(&mut pos, 48.0, 1000.0);
        assert_eq!(pos.x, 0.0);
        pos.x = 990.0;
        clamp_to_level(&mut pos, 48.0, 1000.0);
        assert_eq!(pos.x, 952.0);
    }

    proptest! {
        #[test]
        fn prop_free_fall_speeds_up(start_vy in -20.0f32..20.0, ticks in 2usize..120) {
            let mut pos = Vec2::new(0.0, 0.0);
            let mut vel = Vec2::new(0.0, start_vy);
            let mut last = vel.y;
            for _ in 0..ticks {
                integrate(&mut pos, &mut vel, 0.6, 1.0);
                prop_assert!(vel.y > last);
                last = vel.y;
            }
        }
    }
}
