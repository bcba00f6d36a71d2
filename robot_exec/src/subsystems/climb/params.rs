//! Parameters structure for Climb

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use comms_if::eqpt::SolenoidPosition;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for the climb mechanism.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Params {
    /// Solenoid position that deploys the climber.
    pub deployed_position: SolenoidPosition,

    /// Solenoid position that retracts the climber.
    pub retracted_position: SolenoidPosition,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            deployed_position: SolenoidPosition::Forward,
            retracted_position: SolenoidPosition::Reverse,
        }
    }
}
