//! Data-driven game balance
//!
//! Knobs that varied between game revisions (capture radius, capture
//! altitude margin) live here rather than in `consts`, so a round can be
//! configured without recompiling.

use serde::{Deserialize, Serialize};

use crate::consts::{BEAM_SIZE, COW_SIZE};

/// Balance knobs for one round configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tuning {
    /// Round length in seconds
    #[serde(default = "default_time_limit")]
    pub time_limit_secs: u32,
    /// Buildings placed per round
    #[serde(default = "default_building_count")]
    pub building_count: usize,
    /// Cows spawned per round
    #[serde(default = "default_cow_count")]
    pub cow_count: usize,
    /// Added to `COW_SIZE + BEAM_SIZE` to form the squared capture radius.
    /// Revisions shipped with totals of 23 and 24; the default lands on 24.
    #[serde(default = "default_capture_radius_bonus")]
    pub capture_radius_bonus: f32,
    /// A tracking cow is captured once it rises to within this many units
    /// below the saucer
    #[serde(default = "default_capture_altitude_margin")]
    pub capture_altitude_margin: f32,
}

fn default_time_limit() -> u32 {
    90
}

fn default_building_count() -> usize {
    20
}

fn default_cow_count() -> usize {
    12
}

fn default_capture_radius_bonus() -> f32 {
    4.0
}

fn default_capture_altitude_margin() -> f32 {
    3.0
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            time_limit_secs: default_time_limit(),
            building_count: default_building_count(),
            cow_count: default_cow_count(),
            capture_radius_bonus: default_capture_radius_bonus(),
            capture_altitude_margin: default_capture_altitude_margin(),
        }
    }
}

impl Tuning {
    /// Squared planar capture radius for beam eligibility
    #[inline]
    pub fn capture_radius_sq(&self) -> f32 {
        COW_SIZE + BEAM_SIZE + self.capture_radius_bonus
    }

    /// Parse a tuning override from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
