//! Collision detection and response against level geometry
//!
//! Bodies are resolved after they move, using the rectangle they occupied
//! before the move to decide which face they came through. Landing beats
//! ceiling, and ceiling beats side contact.

use glam::Vec2;

use super::state::{Platform, PlatformKind};
use crate::Rect;

/// Reach within which a chaser notices a wall it has to jump
pub const OBSTACLE_REACH: f32 = 80.0;
/// Tallest obstacle a chaser will try to jump
pub const OBSTACLE_MAX_HEIGHT: f32 = 100.0;

/// A platform's collision box for the current tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Solid {
    pub rect: Rect,
    pub blocks_sides: bool,
}

/// Collision boxes of every platform that is solid this tick.
///
/// Moving platforms are placed at their position for `tick`; arena walls are
/// included only while `walls_solid` is set.
pub fn solids(platforms: &[Platform], tick: u64, walls_solid: bool) -> Vec<Solid> {
    platforms
        .iter()
        .filter(|p| p.kind != PlatformKind::ArenaWall || walls_solid)
        .map(|p| Solid {
            rect: p.rect_at(tick),
            blocks_sides: p.kind.blocks_sides(),
        })
        .collect()
}

/// Result of resolving one body against the level
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Contact {
    /// Resting on a top surface (vertical velocity zeroed)
    pub grounded: bool,
    /// Pushed out of a side
    pub wall: bool,
}

impl Contact {
    pub fn none() -> Self {
        Self::default()
    }
}

/// Resolve a body that has already moved this tick.
///
/// `prev` is the body's rectangle before the move. `tolerance` lets a body
/// whose previous bottom sat slightly below a platform top still land on it.
pub fn resolve_platforms(
    pos: &mut Vec2,
    vel: &mut Vec2,
    size: Vec2,
    prev: Rect,
    solids: &[Solid],
    tolerance: f32,
) -> Contact {
    let mut contact = Contact::none();

    for solid in solids {
        let body = Rect::from_pos_size(*pos, size);
        if !body.intersects(&solid.rect) {
            continue;
        }

        if vel.y > 0.0 && prev.bottom() <= solid.rect.y + tolerance {
            // Landing
            pos.y = solid.rect.y - size.y;
            vel.y = 0.0;
            contact.grounded = true;
        } else if vel.y < 0.0 && prev.y >= solid.rect.bottom() - tolerance {
            // Ceiling bump
            pos.y = solid.rect.bottom();
            vel.y = 0.0;
        } else if solid.blocks_sides {
            if vel.x > 0.0 {
                pos.x = solid.rect.x - size.x;
                contact.wall = true;
            } else if vel.x < 0.0 {
                pos.x = solid.rect.right();
                contact.wall = true;
            }
        }
    }

    contact
}

/// Whether the body's feet are fully over a single solid top.
///
/// Walkers use this to turn around at ledges; `edge_slack` lets them hang a
/// little past the edge before it counts as unsupported.
pub fn is_supported(body: Rect, solids: &[Solid], edge_slack: f32, height_slack: f32) -> bool {
    solids.iter().any(|s| {
        body.x >= s.rect.x - edge_slack
            && body.right() <= s.rect.right() + edge_slack
            && (body.bottom() - s.rect.y).abs() < height_slack
    })
}

/// Whether a side-blocking solid rises in front of the body, low enough to
/// jump. `dir` is the walking direction (-1 or 1).
pub fn obstacle_ahead(body: Rect, dir: f32, solids: &[Solid], tolerance: f32) -> bool {
    solids.iter().filter(|s| s.blocks_sides).any(|s| {
        let gap = if dir >= 0.0 {
            s.rect.x - body.right()
        } else {
            body.x - s.rect.right()
        };
        let top = s.rect.y;
        (-tolerance..OBSTACLE_REACH).contains(&gap)
            && top < body.bottom() - tolerance
            && top > body.bottom() - OBSTACLE_MAX_HEIGHT
    })
}
