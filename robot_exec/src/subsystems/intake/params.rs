//! Parameters structure for Intake

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for the intake roller.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Params {
    // ---- POWERS ----
    /// Roller power while intaking. Negative is inwards.
    pub intake_power: f64,

    /// Roller power while scoring.
    pub score_power: f64,

    // ---- PIECE SENSOR ----
    /// Time the piece sensor must report a piece before it is considered present.
    ///
    /// Units: seconds
    pub piece_rising_debounce_s: f64,

    /// Time the piece sensor must report no piece before it is considered gone.
    ///
    /// Units: seconds
    pub piece_falling_debounce_s: f64,

    // ---- JAM PROTECTION ----
    /// Roller current above which the roller is considered jammed.
    ///
    /// Units: amps
    pub jam_current_a: f64,

    /// Time the current must stay above the jam threshold before the roller is stopped.
    ///
    /// Units: seconds
    pub jam_debounce_s: f64,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            intake_power: -0.5,
            score_power: 0.5,
            piece_rising_debounce_s: 0.1,
            piece_falling_debounce_s: 0.25,
            jam_current_a: 15.0,
            jam_debounce_s: 0.25,
        }
    }
}
