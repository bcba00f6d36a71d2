//! Parameters structure for Arm

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for the end-effector arm.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Params {
    /// Time the arm is given to settle after a move is commanded.
    ///
    /// Units: seconds
    pub settle_s: f64,

    /// Maximum time a move command may run for.
    ///
    /// Units: seconds
    pub move_timeout_s: f64,

    /// Debounce window of the score position limit switch.
    ///
    /// Units: seconds
    pub limit_debounce_s: f64,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            settle_s: 0.3,
            move_timeout_s: 1.0,
            limit_debounce_s: 0.0,
        }
    }
}
