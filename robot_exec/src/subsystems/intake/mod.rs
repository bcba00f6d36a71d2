//! # Intake subsystem
//!
//! A roller that pulls game pieces in and pushes them out to score, with a beam break sensor
//! reporting whether a piece is held and a current sensor on the roller motor.
//!
//! The subsystem moves through the following states, always under the arbitration of the
//! scheduler so that `stop` pre-empts anything in flight:
//!
//! ```text
//!            intake (no piece)               score (piece)
//!   Idle ----------------------> Intaking    Idle ------------> Scoring
//!    ^                               |        ^                    |
//!    +------- piece detected --------+        +---- piece gone ----+
//!
//!   Any state --- stop ---> Idle
//! ```
//!
//! Detecting a piece while intaking stops the roller and schedules the arm's score position
//! command, so the roller is never left running with a piece held.

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

pub const GROUP_NAME: &str = "intake";

pub const ROLLER_NAME: &str = "intake_roller";

pub const PIECE_SENSOR_NAME: &str = "piece_beam_break";

pub const CURRENT_SENSOR_NAME: &str = "intake_roller_current";
