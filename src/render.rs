//! Draw-call contract
//!
//! The scene framework owns meshes, shaders and the actual GPU work; the
//! core only supplies `(shape, transform, material)` triples once per frame.
//! Nothing in here feeds back into the simulation.

use glam::{Mat4, Quat, Vec3};

use crate::sim::GameState;

/// Shapes the external framework knows how to draw
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeId {
    Ground,
    Building,
    Cow,
    Saucer,
    BeamCone,
}

/// Material/style selector passed through to the framework
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaterialId {
    Turf,
    /// Index into the building palette
    Facade(u8),
    Hide,
    Hull,
    Beam,
}

/// Sink for one frame of draw calls; always succeeds
pub trait DrawTarget {
    fn draw(&mut self, shape: ShapeId, transform: Mat4, material: MaterialId);
}

/// Saucer spin period divisor: the hull rotates once per ~0.75 s
const SAUCER_SPIN_DIVISOR: f32 = 750.0;
/// Ground plane half-extent
const GROUND_EXTENT: f32 = 200.0;

/// Walk the state and emit this frame's draw calls
pub fn submit_frame(state: &GameState, target: &mut impl DrawTarget) {
    target.draw(
        ShapeId::Ground,
        Mat4::from_scale(Vec3::new(GROUND_EXTENT, 1.0, GROUND_EXTENT)),
        MaterialId::Turf,
    );

    for building in &state.buildings {
        // The rise offset sinks fresh buildings below grade; collision
        // already ignored it, here it is purely visual
        let center_y = building.height / 2.0 - building.rise_offset;
        let transform = Mat4::from_scale_rotation_translation(
            Vec3::new(building.half_extent, building.height / 2.0, building.half_extent),
            Quat::IDENTITY,
            Vec3::new(building.center.x, center_y, building.center.y),
        );
        target.draw(ShapeId::Building, transform, MaterialId::Facade(building.style));
    }

    for cow in &state.cows {
        let rotation = Quat::from_rotation_y(cow.heading) * Quat::from_rotation_z(cow.tilt);
        let transform = Mat4::from_rotation_translation(rotation, cow.pos);
        target.draw(ShapeId::Cow, transform, MaterialId::Hide);
    }

    let spin = (state.time_ms as f32) / SAUCER_SPIN_DIVISOR;
    let saucer = Mat4::from_rotation_translation(Quat::from_rotation_y(spin), state.player.pos);
    target.draw(ShapeId::Saucer, saucer, MaterialId::Hull);

    if state.beam.active {
        // Cone from the saucer's belly down to the ground
        let reach = state.player.pos.y;
        let transform = Mat4::from_scale_rotation_translation(
            Vec3::new(1.0, reach, 1.0),
            Quat::IDENTITY,
            state.player.pos - Vec3::Y * reach / 2.0,
        );
        target.draw(ShapeId::BeamCone, transform, MaterialId::Beam);
    }
}
