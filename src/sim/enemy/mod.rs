//! Enemy behavior engine
//!
//! Each variant is a small state machine run once per tick. An update reads
//! the player and level through a [`WorldView`], mutates only its own enemy,
//! and returns the projectiles it wants spawned; the tick hands those to the
//! projectile manager once every enemy has run.

pub mod boss;
pub mod chaser;
pub mod patroller;
pub mod shooter;

use glam::Vec2;
use rand::Rng;

use super::collision::{self, Solid};
use super::state::{Behavior, Enemy, PatrolBounds};

/// Ledge overhang a walker tolerates before it turns around
pub const EDGE_SLACK: f32 = 10.0;
/// Vertical distance from a platform top that still counts as standing on it
pub const SUPPORT_SLACK: f32 = 15.0;

/// Read-only slice of the world an enemy update may look at
#[derive(Debug, Clone, Copy)]
pub struct WorldView<'a> {
    pub player_pos: Vec2,
    pub player_vel: Vec2,
    pub player_size: Vec2,
    /// Solid geometry for this tick
    pub solids: &'a [Solid],
    pub tick: u64,
    pub level_width: f32,
    pub gravity: f32,
    pub landing_tolerance: f32,
    pub fall_limit: f32,
    /// Horizontal range of the boss arena, if the level has one
    pub arena: Option<(f32, f32)>,
}

/// Request to spawn a hostile projectile
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectileSpawn {
    pub pos: Vec2,
    pub vel: Vec2,
    pub damage: u32,
}

/// Run one tick of the enemy's behavior
pub fn update(enemy: &mut Enemy, view: &WorldView, rng: &mut impl Rng) -> Vec<ProjectileSpawn> {
    if !enemy.alive {
        return Vec::new();
    }

    // Split borrows: the variant state and the body are updated side by side
    let Enemy {
        behavior,
        pos,
        vel,
        size,
        alive,
        grounded,
        ..
    } = enemy;
    let mut body = Body {
        pos,
        vel,
        size: *size,
        alive,
        grounded,
    };

    match behavior {
        Behavior::Patroller(state) => {
            patroller::update(state, &mut body, view);
            Vec::new()
        }
        Behavior::Chaser(state) => {
            chaser::update(state, &mut body, view, rng);
            Vec::new()
        }
        Behavior::Shooter(state) => shooter::update(state, &mut body, view),
        Behavior::Boss(state) => boss::update(state, &mut body, view, rng),
        Behavior::Inert => Vec::new(),
    }
}

/// Mutable view of an enemy's physical fields
pub struct Body<'e> {
    pub pos: &'e mut Vec2,
    pub vel: &'e mut Vec2,
    pub size: Vec2,
    pub alive: &'e mut bool,
    pub grounded: &'e mut bool,
}

impl Body<'_> {
    #[inline]
    pub fn rect(&self) -> crate::Rect {
        crate::Rect::from_pos_size(*self.pos, self.size)
    }

    /// Where ranged shots leave the body
    pub(crate) fn muzzle(&self) -> Vec2 {
        Vec2::new(
            self.pos.x + self.size.x / 2.0,
            self.pos.y + self.size.y / 3.0,
        )
    }
}

/// Step a ground walker by its velocity, turning around at ledges, patrol
/// limits and the level edges. The offending step is undone so the walker
/// never leaves its platform.
pub(crate) fn walk(body: &mut Body, bounds: Option<PatrolBounds>, view: &WorldView) {
    let prev_x = body.pos.x;
    body.pos.x += body.vel.x;

    let supported = collision::is_supported(body.rect(), view.solids, EDGE_SLACK, SUPPORT_SLACK);
    let vx = body.vel.x;
    let at_bounds = bounds.is_some_and(|b| b.blocks(body.pos.x, vx));
    let out_of_level = (vx < 0.0 && body.pos.x < 0.0)
        || (vx > 0.0 && body.pos.x > view.level_width - body.size.x);

    if !supported || at_bounds || out_of_level {
        body.pos.x = prev_x;
        body.vel.x = -body.vel.x;
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::Rect;
    use crate::sim::level::EnemySpawn;
    use crate::sim::state::{EntityId, EntityKind, EnemyVariant};

    pub fn ground() -> Vec<Solid> {
        vec![Solid {
            rect: Rect::new(0.0, 520.0, 2000.0, 80.0),
            blocks_sides: true,
        }]
    }

    pub fn enemy(variant: EnemyVariant, x: f32, y: f32) -> Enemy {
        let id = EntityId {
            kind: EntityKind::Enemy,
            tick: 0,
            seq: 0,
        };
        Enemy::from_spawn(id, &EnemySpawn::new(variant, x, y))
    }

    pub fn view(player_pos: Vec2, solids: &[Solid]) -> WorldView<'_> {
        WorldView {
            player_pos,
            player_vel: Vec2::ZERO,
            player_size: Vec2::new(48.0, 64.0),
            solids,
            tick: 1,
            level_width: 2000.0,
            gravity: 0.6,
            landing_tolerance: 10.0,
            fall_limit: 650.0,
            arena: None,
        }
    }
}
