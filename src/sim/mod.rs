//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order
//! - No rendering or platform dependencies

pub mod cows;
pub mod events;
pub mod kinematics;
pub mod layout;
pub mod proximity;
pub mod state;
pub mod tick;

pub use cows::{activate_beam, advance_cows};
pub use events::{EventKind, EventQueue, ScheduledEvent};
pub use layout::{GenError, generate_city, spawn_herd};
pub use proximity::{circle_hits_building, circle_intersects_square, has_collided};
pub use state::{Beam, Building, Cow, CowState, EndReason, GameState, Player, RoundPhase};
pub use tick::{Action, TickInput, tick};
