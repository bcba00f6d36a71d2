//! # Climb subsystem
//!
//! A single pneumatic cylinder that deploys the climbing hooks.
//!
//! Commands:
//! - `climb` - hold the cylinder deployed for as long as the command runs.
//! - `stop` - retract the cylinder once.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod params;
mod state;

// ---------------------------------------------------------------------------
// EXPORTS
// ---------------------------------------------------------------------------

pub use params::*;
pub use state::*;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Name of the climb resource group.
pub const GROUP_NAME: &str = "climb";

/// Name of the climb cylinder's solenoid.
pub const SOLENOID_NAME: &str = "climb_solenoid";
