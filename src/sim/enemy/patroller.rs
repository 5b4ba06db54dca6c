//! Patroller: walks its platform back and forth, rushing the player when
//! they come close

use super::{Body, WorldView, walk};
use crate::direction_to;
use crate::sim::state::PatrollerState;

pub const PATROL_SPEED: f32 = 1.2;
/// Horizontal distance at which an ambusher starts rushing
pub const AMBUSH_RANGE: f32 = 150.0;
pub const AMBUSH_SPEED_FACTOR: f32 = 1.8;

pub fn update(state: &mut PatrollerState, body: &mut Body, view: &WorldView) {
    let dx = view.player_pos.x - body.pos.x;

    if state.ambush && dx.abs() < AMBUSH_RANGE {
        body.vel.x = direction_to(body.pos.x, view.player_pos.x) * PATROL_SPEED * AMBUSH_SPEED_FACTOR;
    } else if body.vel.x.abs() < PATROL_SPEED * 0.5 {
        // Back to cruising speed after a rush or a standing start
        body.vel.x = if body.vel.x >= 0.0 {
            PATROL_SPEED
        } else {
            -PATROL_SPEED
        };
    }

    walk(body, state.bounds, view);
}
