//! Circle-vs-rounded-square proximity test
//!
//! The one collision primitive in the game: a circular agent (saucer or
//! cow footprint) against an axis-aligned square building footprint. Used
//! for player collision, cow spawn validation, and beam range checks.

use glam::Vec2;

use super::state::{Building, Player};
use crate::consts::UFO_RADIUS;

/// Does a circle of `radius` at `(px, pz)` intersect the axis-aligned square
/// of `half_extent` centered at `(ox, oz)`?
///
/// Touching exactly at distance `half_extent + radius` counts as a miss.
/// The corner case compares squared distances; one early game revision
/// compared against a non-squared threshold there, which was a bug.
pub fn circle_intersects_square(
    px: f32,
    pz: f32,
    radius: f32,
    ox: f32,
    oz: f32,
    half_extent: f32,
) -> bool {
    let dx = (px - ox).abs();
    let dz = (pz - oz).abs();

    // Fast reject: outside the expanded bounding box
    if dx >= half_extent + radius || dz >= half_extent + radius {
        return false;
    }
    // Fast accept: center projects onto a face of the square
    if dx <= half_extent || dz <= half_extent {
        return true;
    }
    // Corner region
    let cx = dx - half_extent;
    let cz = dz - half_extent;
    cx * cx + cz * cz < radius * radius
}

/// Circle-vs-building wrapper taking the ground-plane position
#[inline]
pub fn circle_hits_building(pos: Vec2, radius: f32, building: &Building) -> bool {
    circle_intersects_square(
        pos.x,
        pos.y,
        radius,
        building.center.x,
        building.center.y,
        building.half_extent,
    )
}

/// Has the saucer flown into any building?
pub fn has_collided(player: &Player, buildings: &[Building]) -> bool {
    let pos = Vec2::new(player.pos.x, player.pos.z);
    buildings
        .iter()
        .any(|b| circle_hits_building(pos, UFO_RADIUS, b))
}
