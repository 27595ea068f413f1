//! Headless demo round
//!
//! Runs the simulation at the fixed timestep with a tiny autopilot: steer
//! toward the nearest cow, fire the beam once in range, and report the HUD
//! values when the round ends. Useful for profiling and for eyeballing the
//! round flow without the scene framework attached.

use glam::Mat4;

use moo_beam::consts::{SIM_DT, TURN_STEP};
use moo_beam::render::{self, DrawTarget, MaterialId, ShapeId};
use moo_beam::sim::{self, GameState, RoundPhase, TickInput};
use moo_beam::{CameraMode, CameraRig, Tuning, hud, normalize_angle, planar_distance_sq};

/// Discards draw calls, keeping only a count for the end-of-run report
#[derive(Default)]
struct NullTarget {
    calls: usize,
}

impl DrawTarget for NullTarget {
    fn draw(&mut self, _shape: ShapeId, _transform: Mat4, _material: MaterialId) {
        self.calls += 1;
    }
}

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        log::error!("demo failed: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), sim::GenError> {
    let mut state = GameState::new(0xC0FFEE, Tuning::default())?;
    let rig = CameraRig::new(CameraMode::Behind);
    let mut target = NullTarget::default();

    // Two minutes of frames is more than a full round
    for _ in 0..(60 * 120) {
        let input = autopilot(&state);
        sim::tick(&mut state, &input, SIM_DT)?;

        let _view = rig.view_matrix(&state.player);
        render::submit_frame(&state, &mut target);

        if state.phase == RoundPhase::Ended {
            break;
        }
        if state.cows.is_empty() {
            log::info!("herd cleared, stopping demo");
            break;
        }
    }

    let hud = hud::hud_model(&state);
    log::info!("{} draw calls submitted", target.calls);
    println!("score {}  time left {}", hud.score, hud.clock);
    Ok(())
}

/// Steer toward the nearest cow; beam when inside the capture radius
fn autopilot(state: &GameState) -> TickInput {
    let mut input = TickInput::default();

    // The countdown only starts on a directional input
    if state.phase == RoundPhase::NotStarted {
        input.forward = true;
        return input;
    }

    let player = &state.player;
    let Some(cow) = state.cows.iter().min_by(|a, b| {
        let da = planar_distance_sq(a.pos, player.pos);
        let db = planar_distance_sq(b.pos, player.pos);
        da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
    }) else {
        return input;
    };

    let dx = cow.pos.x - player.pos.x;
    let dz = cow.pos.z - player.pos.z;
    let delta = normalize_angle(dx.atan2(dz) - player.yaw);
    if delta > TURN_STEP {
        input.turn_left = true;
    } else if delta < -TURN_STEP {
        input.turn_right = true;
    }

    if planar_distance_sq(cow.pos, player.pos) > state.tuning.capture_radius_sq() {
        input.forward = true;
    } else {
        input.beam = true;
    }
    input
}
