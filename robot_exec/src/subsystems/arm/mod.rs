//! # Arm subsystem
//!
//! The end-effector arm pivots between two positions on a double solenoid: the intake position
//! (solenoid forward) and the score position (solenoid reverse). A limit switch reports when the
//! arm is in the score position.
//!
//! Both move commands are idempotent. If the limit switch already reports the target position the
//! command finishes straight away without touching the solenoid. Otherwise it switches the
//! solenoid and only finishes once the settle time has passed, so that nothing sequenced after a
//! move can start before the arm has physically arrived.

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

pub const GROUP_NAME: &str = "arm";

pub const SOLENOID_NAME: &str = "arm_solenoid";

pub const LIMIT_SWITCH_NAME: &str = "arm_score_limit";
