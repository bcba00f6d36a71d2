//! # Pneumatics subsystem
//!
//! The compressor feeding the arm and climb cylinders. It runs whenever the robot is not in safe
//! mode, through its group's default command.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod state;

// ---------------------------------------------------------------------------
// EXPORTS
// ---------------------------------------------------------------------------

pub use state::*;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

pub const GROUP_NAME: &str = "pneumatics";

pub const COMPRESSOR_NAME: &str = "compressor";
