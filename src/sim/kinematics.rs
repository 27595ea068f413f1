//! Player motion integration
//!
//! Discrete directional impulses accumulate into a per-axis velocity with a
//! saturating cap; position integrates the velocity rotated by the current
//! camera yaw, so "forward" always means "away from the camera". Releasing a
//! direction zeroes that axis immediately: the saucer has no glide.

use super::state::Player;
use crate::consts::WORLD_RADIUS;
use crate::yaw_rotate;

/// Held movement directions for one tick
#[derive(Debug, Clone, Copy, Default)]
pub struct MoveInput {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
}

impl MoveInput {
    pub fn any(&self) -> bool {
        self.forward || self.backward || self.left || self.right
    }
}

/// Advance the saucer by one tick of held input.
///
/// Returns `true` if the move carried the saucer outside the world radius,
/// which ends the round.
pub fn integrate(player: &mut Player, input: &MoveInput) -> bool {
    // Forward/back accumulate on the local z axis
    if input.forward {
        player.vel.z = (player.vel.z + player.accel).min(player.max_speed);
    }
    if input.backward {
        player.vel.z = (player.vel.z - player.accel).max(-player.max_speed);
    }
    if !input.forward && !input.backward {
        player.vel.z = 0.0;
    }

    // Strafe accumulates on the local x axis
    if input.right {
        player.vel.x = (player.vel.x + player.accel).min(player.max_speed);
    }
    if input.left {
        player.vel.x = (player.vel.x - player.accel).max(-player.max_speed);
    }
    if !input.left && !input.right {
        player.vel.x = 0.0;
    }

    player.pos += yaw_rotate(player.vel, player.yaw);

    let planar = player.pos.x.hypot(player.pos.z);
    planar > WORLD_RADIUS
}
