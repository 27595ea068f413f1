//! Score and countdown display values
//!
//! The DOM overlay (external) shows two values: the integer score and the
//! remaining time as `minutes:seconds` with zero-padded seconds.

use serde::{Deserialize, Serialize};

use crate::sim::GameState;

/// One frame's worth of HUD output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HudModel {
    pub score: u32,
    pub clock: String,
}

/// Format remaining seconds as `m:ss`
pub fn format_clock(secs: u32) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}

/// Snapshot the display values for the current frame
pub fn hud_model(state: &GameState) -> HudModel {
    HudModel {
        score: state.score,
        clock: format_clock(state.time_left_secs),
    }
}
