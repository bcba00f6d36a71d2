//! # Simulation parameters

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::Deserialize;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SimParams {
    /// Time the arm takes to travel between positions once its solenoid switches.
    pub arm_travel_s: f64,

    /// Time the roller must run inwards before a piece is held.
    pub piece_acquire_s: f64,

    /// Time the roller must run outwards before a held piece leaves.
    pub piece_release_s: f64,

    /// Roller current drawn at full power, in amps.
    pub roller_free_current_a: f64,

    /// Roller current drawn while jammed and powered, in amps.
    pub roller_stall_current_a: f64,

    /// If true the arm starts in the score position.
    pub arm_starts_at_score: bool,

    /// If true the robot starts holding a piece.
    pub starts_with_piece: bool,
}

impl Default for SimParams {
    fn default() -> Self {
        Self {
            arm_travel_s: 0.25,
            piece_acquire_s: 1.0,
            piece_release_s: 0.3,
            roller_free_current_a: 8.0,
            roller_stall_current_a: 30.0,
            arm_starts_at_score: true,
            starts_with_piece: false,
        }
    }
}
