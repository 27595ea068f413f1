//! Game state and core simulation types
//!
//! Everything the simulation mutates lives in [`GameState`], passed by
//! reference into the update functions. Nothing here touches the renderer.

use glam::{Vec2, Vec3};
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::events::EventQueue;
use super::layout::{GenError, generate_city, spawn_herd};
use crate::consts::*;
use crate::tuning::Tuning;

/// Current phase of the round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    /// Waiting for the first directional input
    NotStarted,
    /// Countdown running, saucer under player control
    Running,
    /// Terminal until an explicit reset
    Ended,
}

/// Why the round ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndReason {
    TimeUp,
    BuildingCollision,
    OutOfBounds,
}

/// The player-controlled saucer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec3,
    pub vel: Vec3,
    /// Velocity gained per directional impulse
    pub accel: f32,
    /// Per-axis saturating speed cap
    pub max_speed: f32,
    /// Facing/camera yaw (radians); movement is relative to this
    pub yaw: f32,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Vec3::new(0.0, UFO_ALTITUDE, 0.0),
            vel: Vec3::ZERO,
            accel: UFO_ACCEL,
            max_speed: UFO_MAX_SPEED,
            yaw: 0.0,
        }
    }
}

/// Abduction lifecycle. Capture is terminal: captured cows are removed from
/// the herd rather than stored in a third state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CowState {
    /// Grazing; `local_time_ms` is resynced to the frame clock every tick
    Idle,
    /// Caught by the beam, rising toward the saucer
    Tracking,
}

/// An abductable cow
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cow {
    pub pos: Vec3,
    /// Facing angle on the ground (radians)
    pub heading: f32,
    pub state: CowState,
    /// Frame clock value the current animation step measures elapsed time from
    pub local_time_ms: f64,
    /// Tumble angle while rising; visual only, never fed back into physics
    pub tilt: f32,
}

impl Cow {
    pub fn new(pos: Vec3, heading: f32) -> Self {
        Self {
            pos,
            heading,
            state: CowState::Idle,
            local_time_ms: 0.0,
            tilt: 0.0,
        }
    }

    #[inline]
    pub fn is_tracking(&self) -> bool {
        self.state == CowState::Tracking
    }
}

/// A static city building: axis-aligned square footprint, fixed height band
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Building {
    /// Footprint center in the ground plane (x, z)
    pub center: Vec2,
    /// Footprint half-extent
    pub half_extent: f32,
    pub height: f32,
    /// Index into the material palette
    pub style: u8,
    /// Vertical presentation offset; ignored by collision logic
    pub rise_offset: f32,
}

/// Beam flags. `cooling` stays set until the shutoff event fires, so the
/// beam cannot be re-triggered mid-pulse.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Beam {
    pub active: bool,
    pub cooling: bool,
}

/// RNG state wrapper for serialization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
    /// Bumped on reset so every round lays out a fresh city
    pub round: u32,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed, round: 0 }
    }

    pub fn to_rng(&self) -> Pcg32 {
        Pcg32::seed_from_u64(self.seed ^ ((self.round as u64) << 32))
    }
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng_state: RngState,
    pub phase: RoundPhase,
    pub end_reason: Option<EndReason>,
    pub score: u32,
    /// Remaining seconds; floors at zero
    pub time_left_secs: u32,
    /// Simulation clock (ms since round start)
    pub time_ms: f64,
    /// Round generation; guards scheduled events across resets
    pub generation: u32,
    pub player: Player,
    pub buildings: Vec<Building>,
    pub cows: Vec<Cow>,
    pub beam: Beam,
    pub events: EventQueue,
    pub tuning: Tuning,
}

impl GameState {
    /// Create a fresh round. Fails if the configured entity counts exceed
    /// what the placement grid can host.
    pub fn new(seed: u64, tuning: Tuning) -> Result<Self, GenError> {
        let mut state = Self {
            seed,
            rng_state: RngState::new(seed),
            phase: RoundPhase::NotStarted,
            end_reason: None,
            score: 0,
            time_left_secs: tuning.time_limit_secs,
            time_ms: 0.0,
            generation: 0,
            player: Player::default(),
            buildings: Vec::new(),
            cows: Vec::new(),
            beam: Beam::default(),
            events: EventQueue::new(),
            tuning,
        };
        state.populate()?;
        log::info!(
            "new round: seed={} buildings={} cows={}",
            seed,
            state.buildings.len(),
            state.cows.len()
        );
        Ok(state)
    }

    /// Replace the city and the herd wholesale from the current round RNG
    fn populate(&mut self) -> Result<(), GenError> {
        let mut rng = self.rng_state.to_rng();
        self.buildings = generate_city(&mut rng, &self.tuning)?;
        self.cows = spawn_herd(&mut rng, &self.buildings, &self.tuning)?;
        Ok(())
    }

    /// Reinitialize everything for a new round. Bumps the generation so any
    /// event still queued from this round becomes a no-op.
    pub fn reset(&mut self) -> Result<(), GenError> {
        self.generation += 1;
        self.rng_state.round += 1;
        self.events.clear();
        self.player = Player::default();
        self.score = 0;
        self.time_left_secs = self.tuning.time_limit_secs;
        self.time_ms = 0.0;
        self.phase = RoundPhase::NotStarted;
        self.end_reason = None;
        self.beam = Beam::default();
        self.populate()?;
        log::info!("round reset, generation {}", self.generation);
        Ok(())
    }

    /// Transition Running -> Ended. Idempotent; the round stays terminal
    /// until reset.
    pub fn end_round(&mut self, reason: EndReason) {
        if self.phase == RoundPhase::Running {
            self.phase = RoundPhase::Ended;
            self.end_reason = Some(reason);
            log::info!("round over ({reason:?}), score {}", self.score);
        }
    }
}
