//! Fixed timestep simulation tick
//!
//! Per-frame order matches the data flow of the game: input starts or resets
//! the round, the queue drains deferred effects, kinematics moves the
//! saucer, collision and bounds checks may end the round, the beam and the
//! herd advance, and presentation channels settle. The camera pose is
//! computed by the caller from the resulting state.

use super::cows::{activate_beam, advance_cows};
use super::events::EventKind;
use super::kinematics::{self, MoveInput};
use super::layout::GenError;
use super::proximity::has_collided;
use super::state::{EndReason, GameState, RoundPhase};
use crate::consts::*;

/// Discrete named control actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    MoveForward,
    MoveBackward,
    MoveLeft,
    MoveRight,
    TurnLeft,
    TurnRight,
    Beam,
    Reset,
}

impl Action {
    /// Map a control-panel action name; unknown names are simply ignored by
    /// callers (`None`).
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "move_forward" => Some(Self::MoveForward),
            "move_backward" => Some(Self::MoveBackward),
            "move_left" => Some(Self::MoveLeft),
            "move_right" => Some(Self::MoveRight),
            "turn_left" => Some(Self::TurnLeft),
            "turn_right" => Some(Self::TurnRight),
            "beam" => Some(Self::Beam),
            "reset" => Some(Self::Reset),
            _ => None,
        }
    }
}

/// Input for a single tick. Movement fields are held-state (a released key
/// shows up as `false`, zeroing that velocity axis); the rest are
/// edge-triggered presses.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    pub turn_left: bool,
    pub turn_right: bool,
    pub beam: bool,
    pub reset: bool,
}

impl TickInput {
    /// Register a pressed action for this tick
    pub fn press(&mut self, action: Action) {
        match action {
            Action::MoveForward => self.forward = true,
            Action::MoveBackward => self.backward = true,
            Action::MoveLeft => self.left = true,
            Action::MoveRight => self.right = true,
            Action::TurnLeft => self.turn_left = true,
            Action::TurnRight => self.turn_right = true,
            Action::Beam => self.beam = true,
            Action::Reset => self.reset = true,
        }
    }

    fn movement(&self) -> MoveInput {
        MoveInput {
            forward: self.forward,
            backward: self.backward,
            left: self.left,
            right: self.right,
        }
    }
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) -> Result<(), GenError> {
    if input.reset {
        state.reset()?;
        return Ok(());
    }

    // Terminal until reset
    if state.phase == RoundPhase::Ended {
        return Ok(());
    }

    let movement = input.movement();

    // First directional input starts the countdown
    if state.phase == RoundPhase::NotStarted && movement.any() {
        state.phase = RoundPhase::Running;
        state.events.schedule(
            state.time_ms + TIMER_INTERVAL_MS,
            state.generation,
            EventKind::TimerTick,
        );
        log::info!("round started");
    }

    if state.phase != RoundPhase::Running {
        return Ok(());
    }

    state.time_ms += (dt * 1000.0) as f64;

    for event in state.events.drain_due(state.time_ms, state.generation) {
        match event.kind {
            EventKind::TimerTick => {
                state.time_left_secs = state.time_left_secs.saturating_sub(1);
                if state.time_left_secs == 0 {
                    state.end_round(EndReason::TimeUp);
                } else {
                    // Re-arm from the previous due time to keep an exact
                    // one-second cadence
                    state.events.schedule(
                        event.due_ms + TIMER_INTERVAL_MS,
                        state.generation,
                        EventKind::TimerTick,
                    );
                }
            }
            EventKind::BeamOff => {
                state.beam.active = false;
                state.beam.cooling = false;
            }
        }
    }
    if state.phase == RoundPhase::Ended {
        return Ok(());
    }

    // Turning adjusts the persistent camera yaw in discrete steps
    if input.turn_left {
        state.player.yaw += TURN_STEP;
    }
    if input.turn_right {
        state.player.yaw -= TURN_STEP;
    }

    if kinematics::integrate(&mut state.player, &movement) {
        state.end_round(EndReason::OutOfBounds);
        return Ok(());
    }
    if has_collided(&state.player, &state.buildings) {
        state.end_round(EndReason::BuildingCollision);
        return Ok(());
    }

    if input.beam {
        activate_beam(state);
    }
    advance_cows(state);

    // Presentation only: newly generated buildings rise out of the ground
    for building in &mut state.buildings {
        building.rise_offset *= 0.92;
        if building.rise_offset < 0.01 {
            building.rise_offset = 0.0;
        }
    }

    Ok(())
}
