//! # Communications interface crate.
//!
//! Provides all common interfaces between the robot software and its external
//! collaborators: the hardware drivers (equipment) and the operator.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Operator telecommands
pub mod tc;

/// Interface definitions for equipment (actuators and sensors)
pub mod eqpt;
