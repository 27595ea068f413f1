//! Moo Beam - a flying-saucer cow-abduction arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (kinematics, world generation, abduction)
//! - `camera`: Discrete camera-mode selector producing view transforms
//! - `render`: Draw-call contract consumed by the external scene framework
//! - `hud`: Score and countdown display values
//! - `tuning`: Data-driven game balance

pub mod camera;
pub mod hud;
pub mod render;
pub mod sim;
pub mod tuning;

pub use camera::{CameraMode, CameraRig};
pub use tuning::Tuning;

use glam::Vec3;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// City grid cell pitch (world units)
    pub const CELL_PITCH: f32 = 40.0;
    /// Sub-cell offsets that push a footprint off the cell boundary
    pub const CELL_SUB_OFFSETS: [f32; 2] = [11.0, 29.0];
    /// Base cells are drawn from `0..CELL_RANGE` on each axis before mirroring
    pub const CELL_RANGE: i32 = 4;
    /// Placement/spawn resample cap before generation fails loudly
    pub const MAX_PLACEMENT_RETRIES: u32 = 64;

    /// Saucers escaping this planar radius end the round
    pub const WORLD_RADIUS: f32 = 160.0;

    /// Building footprint half-extent
    pub const BUILDING_HALF_EXTENT: f32 = 5.0;
    /// Building height band
    pub const BUILDING_MIN_HEIGHT: f32 = 8.0;
    pub const BUILDING_MAX_HEIGHT: f32 = 24.0;
    /// Number of entries in the building material palette
    pub const BUILDING_PALETTE: u8 = 4;

    /// Saucer collision radius
    pub const UFO_RADIUS: f32 = 2.0;
    /// Saucer cruising altitude
    pub const UFO_ALTITUDE: f32 = 20.0;
    /// Velocity gained per directional impulse (units per tick)
    pub const UFO_ACCEL: f32 = 0.02;
    /// Per-axis speed cap (units per tick)
    pub const UFO_MAX_SPEED: f32 = 0.6;
    /// Camera yaw adjustment per turn press (radians)
    pub const TURN_STEP: f32 = std::f32::consts::PI / 36.0;

    /// Cow footprint radius used for spawn-overlap checks
    pub const COW_RADIUS: f32 = 2.0;
    /// Beam capture-radius terms: dist^2 <= COW_SIZE + BEAM_SIZE + bonus
    pub const COW_SIZE: f32 = 4.0;
    pub const BEAM_SIZE: f32 = 16.0;
    /// Tracking cows close on the saucer at this rate (units per ms)
    pub const COW_RISE_SPEED: f32 = 0.008;
    /// Per-tick elapsed cap while tracking, so frame hitches never teleport a cow
    pub const MAX_TRACK_STEP_MS: f64 = 1500.0;
    /// Tumble angle accumulation rate (radians per ms, scaled by altitude ratio)
    pub const TUMBLE_RATE: f32 = 0.004;
    /// Score awarded per abducted cow
    pub const CAPTURE_AWARD: u32 = 50;

    /// Beam stays active (and on cooldown) for this long
    pub const BEAM_DURATION_MS: f64 = 1000.0;
    /// Countdown tick interval
    pub const TIMER_INTERVAL_MS: f64 = 1000.0;

    /// Direction-normalization guard for coincident cow/saucer positions
    pub const DIR_EPSILON: f32 = 1e-4;
}

/// Normalize an angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

/// Rotate a vector around the Y axis so movement stays relative to camera yaw.
///
/// Forward (+Z) maps to `(sin a, 0, cos a)`, strafe (+X) to `(cos a, 0, -sin a)`.
#[inline]
pub fn yaw_rotate(v: Vec3, angle: f32) -> Vec3 {
    let (sin, cos) = angle.sin_cos();
    Vec3::new(v.x * cos + v.z * sin, v.y, -v.x * sin + v.z * cos)
}

/// Squared distance in the ground plane (x/z), ignoring altitude
#[inline]
pub fn planar_distance_sq(a: Vec3, b: Vec3) -> f32 {
    let dx = a.x - b.x;
    let dz = a.z - b.z;
    dx * dx + dz * dz
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_yaw_rotate_forward() {
        let v = yaw_rotate(Vec3::Z, 0.0);
        assert!((v - Vec3::Z).length() < 1e-6);

        // Quarter turn: forward becomes +X
        let v = yaw_rotate(Vec3::Z, FRAC_PI_2);
        assert!((v - Vec3::X).length() < 1e-6);
    }

    #[test]
    fn test_yaw_rotate_strafe_perpendicular() {
        let angle = 0.7;
        let fwd = yaw_rotate(Vec3::Z, angle);
        let strafe = yaw_rotate(Vec3::X, angle);
        assert!(fwd.dot(strafe).abs() < 1e-6);
    }

    #[test]
    fn test_planar_distance_ignores_altitude() {
        let a = Vec3::new(3.0, 100.0, 4.0);
        let b = Vec3::new(0.0, -5.0, 0.0);
        assert!((planar_distance_sq(a, b) - 25.0).abs() < 1e-6);
    }
}
